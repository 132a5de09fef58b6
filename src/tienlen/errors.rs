use thiserror::Error;

use crate::domain::PlayerId;

/// Ошибки движка Tiến Lên (состояние матча и валидация ходов).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TienLenError {
    #[error("Игрок {0} не участвует в матче")]
    PlayerNotInMatch(PlayerId),

    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(PlayerId),

    #[error("Сыгранных карт нет в руке игрока")]
    CardsNotInHand,

    #[error("Набор карт не образует допустимую комбинацию")]
    InvalidCombination,

    #[error("Комбинация не бьёт текущий трик")]
    CannotBeatTrick,

    #[error("Пропуск хода разрешён только при выложенном трике")]
    SkipWithoutTrick,

    #[error("Игрок {0} уже закончил руку")]
    AlreadyFinished(PlayerId),

    #[error("В колоде не хватило карт для раздачи")]
    EmptyDeck,

    #[error("Матч уже завершён")]
    MatchFinished,
}
