use std::time::Instant;

use crate::domain::deck::Deck;
use crate::domain::{GameType, PlayerId};
use crate::tienlen::{can_beat, classify, TienLenError, TienLenState, TurnAdvance};

use super::{
    GameSession, MatchSnapshot, RandomSource, SessionAction, SessionError, TienLenActionKind,
};

/// Сессия Tiến Lên: валидация PLAY/SKIP поверх движка комбинаций
/// и состояния матча. Политика завершения — первый финишировавший
/// выигрывает весь матч.
#[derive(Debug)]
pub struct TienLenSession {
    state: TienLenState,
    winner: Option<PlayerId>,
    started_at: Instant,
}

impl TienLenSession {
    /// Создать сессию: перемешать колоду и раздать по 13 карт.
    /// При 4 игроках колода исчерпывается ровно.
    pub fn new<R: RandomSource>(
        player_order: Vec<PlayerId>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);

        let mut state = TienLenState::new(player_order.clone());
        for player in &player_order {
            let cards = deck.draw_n(13);
            if cards.len() < 13 {
                return Err(TienLenError::EmptyDeck.into());
            }
            state.deal_hand(*player, cards)?;
        }

        Ok(Self {
            state,
            winner: None,
            started_at: Instant::now(),
        })
    }

    pub fn state(&self) -> &TienLenState {
        &self.state
    }

    /// После успешного хода/паса передать очередь дальше;
    /// замкнувшийся круг закрывает раунд (трик и пасы очищаются,
    /// право хода остаётся у последнего сыгравшего).
    fn advance(&mut self) {
        match self.state.advance_turn() {
            TurnAdvance::Next(_) => {}
            TurnAdvance::RoundClosed => self.state.start_new_round(),
        }
    }
}

impl GameSession for TienLenSession {
    fn game_type(&self) -> GameType {
        GameType::TienLen
    }

    fn player_order(&self) -> &[PlayerId] {
        &self.state.player_order
    }

    fn apply_action(
        &mut self,
        player: PlayerId,
        action: SessionAction,
    ) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(TienLenError::MatchFinished.into());
        }
        let kind = match action {
            SessionAction::TienLen(kind) => kind,
            SessionAction::Poker(_) => {
                return Err(SessionError::WrongGameType {
                    expected: GameType::TienLen,
                })
            }
        };

        if self.state.current_player() != player {
            return Err(TienLenError::NotPlayersTurn(player).into());
        }

        match kind {
            TienLenActionKind::Play(cards) => {
                let combo = classify(&cards).ok_or(TienLenError::InvalidCombination)?;
                if let Some(trick) = &self.state.current_trick {
                    if !can_beat(trick, &combo) {
                        return Err(TienLenError::CannotBeatTrick.into());
                    }
                }
                self.state.play(player, combo)?;

                // Опустевшая рука: первый финишировавший выигрывает матч.
                if self.state.finished.first() == Some(&player) {
                    self.winner = Some(player);
                    return Ok(());
                }
                self.advance();
            }
            TienLenActionKind::Skip => {
                if self.state.current_trick.is_none() {
                    return Err(TienLenError::SkipWithoutTrick.into());
                }
                self.state.pass_turn(player)?;
                self.advance();
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::TienLen(self.state.clone())
    }

    fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn started_at(&self) -> Instant {
        self.started_at
    }
}
