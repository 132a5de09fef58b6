use thiserror::Error;

use crate::domain::PlayerId;

/// Ошибки покерного движка и сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PokerError {
    #[error("Игрок {0} не участвует в матче")]
    PlayerNotInMatch(PlayerId),

    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок {0} уже сфолдил")]
    PlayerFolded(PlayerId),

    #[error("Невозможно выполнить check — нужно уравнять ставку")]
    CannotCheck,

    #[error("Операция недопустима на текущей стадии раздачи")]
    WrongStage,

    #[error("Колода исчерпана")]
    EmptyDeck,

    #[error("Матч уже завершён")]
    MatchFinished,
}
