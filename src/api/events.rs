use serde::{Deserialize, Serialize};

use crate::domain::room::{Room, RoomStatus, SeatIndex};
use crate::domain::{GameType, PlayerId, RoomId};
use crate::session::MatchSnapshot;

/// Публичное описание комнаты для клиентов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: RoomId,
    pub name: String,
    pub game_type: GameType,
    pub host_id: PlayerId,
    pub capacity: u8,
    pub status: RoomStatus,
    /// Пары (игрок, место) по возрастанию места.
    pub players: Vec<(PlayerId, SeatIndex)>,
}

impl From<&Room> for RoomInfo {
    fn from(room: &Room) -> Self {
        let mut players: Vec<(PlayerId, SeatIndex)> =
            room.seats.iter().map(|(p, s)| (*p, *s)).collect();
        players.sort_by_key(|(_, seat)| *seat);
        Self {
            id: room.id,
            name: room.name.clone(),
            game_type: room.game_type,
            host_id: room.host_id,
            capacity: room.capacity,
            status: room.status,
            players,
        }
    }
}

/// Событие рассылки подписчикам комнаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ServerEvent {
    /// Состав или статус комнаты изменились.
    RoomUpdate { room: RoomInfo },

    /// Матч стартовал; снимок — начальное состояние.
    MatchStart {
        room_id: RoomId,
        game_type: GameType,
        player_order: Vec<PlayerId>,
        initial_state: MatchSnapshot,
    },

    /// Текущее состояние матча после обработки действия.
    StateSnapshot {
        room_id: RoomId,
        game_type: GameType,
        state: MatchSnapshot,
    },

    /// Матч завершён и расчёты проведены.
    MatchEnd {
        room_id: RoomId,
        game_type: GameType,
        winner_id: Option<PlayerId>,
        /// Участники в порядке мест.
        player_ids: Vec<PlayerId>,
        /// Изменения кредитов по каждому участнику, в том же порядке.
        credit_changes: Vec<i64>,
    },
}
