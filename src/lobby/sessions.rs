use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::chips::Chips;
use crate::domain::room::Room;
use crate::domain::{GameType, RoomId};
use crate::session::{GameSession, PokerSession, RandomSource, SessionError, TienLenSession};

use super::errors::LobbyError;

/// Реестр активных сессий: одна сессия на комнату.
#[derive(Default)]
pub struct SessionManager {
    sessions: HashMap<RoomId, Box<dyn GameSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать сессию для комнаты, если её ещё нет. Возвращает флаг
    /// «создана сейчас» и саму сессию. Повторный вызов идемпотентен:
    /// существующая сессия не пересоздаётся.
    pub fn start_if_absent<R: RandomSource>(
        &mut self,
        room: &Room,
        starting_chips: Chips,
        rng: &mut R,
    ) -> Result<(bool, &mut Box<dyn GameSession>), LobbyError> {
        let entry = match self.sessions.entry(room.id) {
            Entry::Occupied(entry) => return Ok((false, entry.into_mut())),
            Entry::Vacant(entry) => entry,
        };

        let order = room.player_order();
        if order.is_empty() {
            return Err(LobbyError::EmptyPlayerOrder);
        }

        let session: Box<dyn GameSession> = match room.game_type {
            GameType::Poker => Box::new(
                PokerSession::new(order, starting_chips, rng).map_err(session_start_failed)?,
            ),
            GameType::TienLen => {
                Box::new(TienLenSession::new(order, rng).map_err(session_start_failed)?)
            }
        };
        Ok((true, entry.insert(session)))
    }

    pub fn get_mut(&mut self, room_id: RoomId) -> Option<&mut Box<dyn GameSession>> {
        self.sessions.get_mut(&room_id)
    }

    pub fn contains(&self, room_id: RoomId) -> bool {
        self.sessions.contains_key(&room_id)
    }

    pub fn remove(&mut self, room_id: RoomId) -> Option<Box<dyn GameSession>> {
        self.sessions.remove(&room_id)
    }
}

/// Старт сессии может не удаться только при невозможной раздаче
/// (слишком много игроков на одну колоду).
fn session_start_failed(err: SessionError) -> LobbyError {
    log::warn!("Не удалось создать сессию: {err}");
    LobbyError::SessionStart(err.to_string())
}
