use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{GameType, PlayerId, RoomId};

/// Индекс места в комнате (0..capacity-1).
pub type SeatIndex = u8;

/// Статус комнаты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomStatus {
    /// Комната набирает игроков, join разрешён.
    Waiting,
    /// Идёт матч, join запрещён.
    Playing,
    /// Матч завершён и расчёты проведены.
    Finished,
}

/// Комната: именованная рассадка игроков одного типа игры.
/// Игровой логики здесь нет — только membership и статус.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub game_type: GameType,
    pub host_id: PlayerId,
    pub capacity: u8,
    pub status: RoomStatus,
    /// Игрок → занятое им место.
    pub seats: HashMap<PlayerId, SeatIndex>,
}

impl Room {
    /// Создать комнату: хост занимает место 0, статус Waiting.
    /// Вместимость меньше одного места не бывает — хост уже сидит.
    pub fn new(id: RoomId, name: String, game_type: GameType, host_id: PlayerId, capacity: u8) -> Self {
        let mut seats = HashMap::new();
        seats.insert(host_id, 0);
        Self {
            id,
            name,
            game_type,
            host_id,
            capacity: capacity.max(1),
            status: RoomStatus::Waiting,
            seats,
        }
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.capacity as usize
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.seats.contains_key(&player_id)
    }

    /// Наименьший свободный индекс места.
    pub fn next_free_seat(&self) -> Option<SeatIndex> {
        (0..self.capacity).find(|seat| !self.seats.values().any(|s| s == seat))
    }

    /// Посадить игрока на наименьшее свободное место.
    /// Возвращает None, если мест нет или игрок уже сидит.
    pub fn seat_player(&mut self, player_id: PlayerId) -> Option<SeatIndex> {
        if self.contains(player_id) {
            return None;
        }
        let seat = self.next_free_seat()?;
        self.seats.insert(player_id, seat);
        Some(seat)
    }

    /// Убрать игрока с места. Если ушёл хост и кто-то остался —
    /// роль хоста переходит к игроку с наименьшим местом.
    pub fn unseat_player(&mut self, player_id: PlayerId) -> bool {
        if self.seats.remove(&player_id).is_none() {
            return false;
        }
        if self.host_id == player_id {
            if let Some(next_host) = self.player_order().first().copied() {
                self.host_id = next_host;
            }
        }
        true
    }

    /// Игроки в порядке возрастания мест — фиксированный порядок хода матча.
    pub fn player_order(&self) -> Vec<PlayerId> {
        let mut pairs: Vec<(SeatIndex, PlayerId)> =
            self.seats.iter().map(|(p, s)| (*s, *p)).collect();
        pairs.sort();
        pairs.into_iter().map(|(_, p)| p).collect()
    }
}
