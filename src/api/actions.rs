use serde::{Deserialize, Serialize};

use crate::domain::{Card, GameType, PlayerId, RoomId};
use crate::domain::chips::Chips;
use crate::session::{
    PokerActionKind, SessionAction, SessionError, TienLenActionKind,
};

/// Запрос действия игрока в том виде, в каком он приходит снаружи:
/// строковый тип действия плюс опциональные поля. Валидация формы
/// (наличие amount/cards, известность типа) — в `to_session_action`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerActionRequest {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub game_type: GameType,
    /// "FOLD" | "CHECK" | "CALL" | "RAISE" | "ALL_IN" | "PLAY" | "SKIP".
    pub action_type: String,
    /// Размер повышения для RAISE.
    pub amount: Option<u64>,
    /// Карты для PLAY.
    pub cards: Option<Vec<Card>>,
}

impl PlayerActionRequest {
    /// Преобразовать запрос в типизированное действие сессии.
    pub fn to_session_action(&self) -> Result<SessionAction, SessionError> {
        match (self.game_type, self.action_type.as_str()) {
            (GameType::Poker, "FOLD") => Ok(SessionAction::Poker(PokerActionKind::Fold)),
            (GameType::Poker, "CHECK") => Ok(SessionAction::Poker(PokerActionKind::Check)),
            (GameType::Poker, "CALL") => Ok(SessionAction::Poker(PokerActionKind::Call)),
            (GameType::Poker, "RAISE") => {
                let amount = self
                    .amount
                    .ok_or_else(|| SessionError::MissingAmount(self.action_type.clone()))?;
                Ok(SessionAction::Poker(PokerActionKind::Raise(Chips(amount))))
            }
            (GameType::Poker, "ALL_IN") => Ok(SessionAction::Poker(PokerActionKind::AllIn)),
            (GameType::TienLen, "PLAY") => {
                let cards = self
                    .cards
                    .clone()
                    .ok_or_else(|| SessionError::MissingCards(self.action_type.clone()))?;
                Ok(SessionAction::TienLen(TienLenActionKind::Play(cards)))
            }
            (GameType::TienLen, "SKIP") => Ok(SessionAction::TienLen(TienLenActionKind::Skip)),
            _ => Err(SessionError::UnknownAction(self.action_type.clone())),
        }
    }
}
