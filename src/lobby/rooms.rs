use std::collections::HashMap;

use crate::api::RoomInfo;
use crate::domain::room::{Room, RoomStatus};
use crate::domain::{GameType, PlayerId, RoomId};

use super::errors::LobbyError;

/// Результат выхода игрока из комнаты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Игрок вышел, комната жива (возможно, с новым хостом).
    Left(RoomInfo),
    /// Вышел последний игрок — комната уничтожена.
    Destroyed,
}

/// Реестр комнат. Membership-правила живут здесь,
/// игровые сессии — в `SessionManager`.
#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: HashMap<RoomId, Room>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать комнату; создатель становится хостом на месте 0.
    pub fn create_room(
        &mut self,
        id: RoomId,
        name: String,
        game_type: GameType,
        host_id: PlayerId,
        capacity: u8,
    ) -> RoomInfo {
        let room = Room::new(id, name, game_type, host_id, capacity);
        let info = RoomInfo::from(&room);
        self.rooms.insert(id, room);
        info
    }

    /// Посадить игрока в комнату. Разрешено только в статусе Waiting,
    /// при свободных местах и если игрок ещё не внутри.
    pub fn join_room(&mut self, room_id: RoomId, player_id: PlayerId) -> Result<RoomInfo, LobbyError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(LobbyError::RoomNotFound(room_id))?;
        if room.status != RoomStatus::Waiting {
            return Err(LobbyError::RoomNotWaiting(room_id));
        }
        if room.contains(player_id) {
            return Err(LobbyError::AlreadyInRoom(player_id, room_id));
        }
        if room.seat_player(player_id).is_none() {
            return Err(LobbyError::RoomFull(room_id));
        }
        Ok(RoomInfo::from(&*room))
    }

    /// Убрать игрока из комнаты. Пустая комната уничтожается.
    pub fn leave_room(
        &mut self,
        room_id: RoomId,
        player_id: PlayerId,
    ) -> Result<LeaveOutcome, LobbyError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(LobbyError::RoomNotFound(room_id))?;
        if !room.unseat_player(player_id) {
            return Err(LobbyError::NotInRoom(player_id, room_id));
        }
        if room.is_empty() {
            self.rooms.remove(&room_id);
            return Ok(LeaveOutcome::Destroyed);
        }
        Ok(LeaveOutcome::Left(RoomInfo::from(&*room)))
    }

    pub fn room(&self, room_id: RoomId) -> Result<&Room, LobbyError> {
        self.rooms.get(&room_id).ok_or(LobbyError::RoomNotFound(room_id))
    }

    pub fn room_mut(&mut self, room_id: RoomId) -> Result<&mut Room, LobbyError> {
        self.rooms
            .get_mut(&room_id)
            .ok_or(LobbyError::RoomNotFound(room_id))
    }

    pub fn remove(&mut self, room_id: RoomId) -> Option<Room> {
        self.rooms.remove(&room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
