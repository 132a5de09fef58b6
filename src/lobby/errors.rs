use thiserror::Error;

use crate::domain::{PlayerId, RoomId};

/// Ошибки уровня лобби.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LobbyError {
    #[error("Комната {0} не найдена")]
    RoomNotFound(RoomId),

    #[error("Комната {0} заполнена")]
    RoomFull(RoomId),

    #[error("Комната {0} не принимает игроков (матч идёт или завершён)")]
    RoomNotWaiting(RoomId),

    #[error("Игрок {0} уже находится в комнате {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    #[error("Игрок {0} не находится в комнате {1}")]
    NotInRoom(PlayerId, RoomId),

    #[error("Нельзя стартовать матч без игроков")]
    EmptyPlayerOrder,

    #[error("Не удалось создать сессию: {0}")]
    SessionStart(String),

    #[error("Тип игры в запросе не совпадает с типом игры комнаты")]
    GameTypeMismatch,
}
