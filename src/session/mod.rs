//! Сессия матча: общий контракт жизненного цикла и две его реализации.
//!
//! Сессия создаётся один раз на матч комнаты, привязана к одному
//! `GameType` и держит фиксированный порядок игроков. Вся валидация
//! очерёдности и легальности хода — здесь; невалидные действия
//! отклоняются ошибкой и не меняют состояние.

pub mod poker;
pub mod tienlen;

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::{Card, GameType, PlayerId};
use crate::poker::{PokerError, PokerState};
use crate::tienlen::{TienLenError, TienLenState};

pub use poker::PokerSession;
pub use tienlen::TienLenSession;

/// Источник случайности для перемешивания колоды.
/// Реализации — в `infra::rng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Действие в покерной сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerActionKind {
    Fold,
    /// Пропуск без ставки; легален только когда доплачивать нечего.
    Check,
    /// Доплатить разницу до текущей ставки.
    Call,
    /// Уравнять и поднять на указанную величину.
    Raise(Chips),
    /// Поставить весь остаток стека.
    AllIn,
}

/// Действие в сессии Tiến Lên.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TienLenActionKind {
    Play(Vec<Card>),
    /// Пас; легален только при выложенном трике.
    Skip,
}

/// Типизированное действие игрока, уже привязанное к игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionAction {
    Poker(PokerActionKind),
    TienLen(TienLenActionKind),
}

/// Снимок состояния матча для рассылки: тегированное объединение,
/// payload выбирается тегом типа игры, а не инспекцией содержимого.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game_type", content = "state")]
pub enum MatchSnapshot {
    Poker(PokerState),
    TienLen(TienLenState),
}

/// Ошибки сессии: привязка к игре + ошибки конкретных движков.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Действие не соответствует типу игры сессии ({expected:?})")]
    WrongGameType { expected: GameType },

    #[error("Неизвестный тип действия: {0}")]
    UnknownAction(String),

    #[error("Для действия {0} требуется поле amount")]
    MissingAmount(String),

    #[error("Для действия {0} требуется поле cards")]
    MissingCards(String),

    #[error(transparent)]
    Poker(#[from] PokerError),

    #[error(transparent)]
    TienLen(#[from] TienLenError),
}

/// Контракт жизненного цикла матча. Две независимые реализации
/// (покер и Tiến Lên) выбираются при создании сессии; общего
/// мутабельного состояния за пределами контракта нет.
pub trait GameSession: Send {
    fn game_type(&self) -> GameType;

    /// Порядок игроков, зафиксированный при создании (по местам).
    fn player_order(&self) -> &[PlayerId];

    /// Применить действие игрока. Ошибка означает «отклонено,
    /// состояние не изменилось».
    fn apply_action(&mut self, player: PlayerId, action: SessionAction)
        -> Result<(), SessionError>;

    /// Иммутабельная копия состояния для рассылки.
    fn snapshot(&self) -> MatchSnapshot;

    fn is_finished(&self) -> bool;

    fn winner(&self) -> Option<PlayerId>;

    /// Момент создания сессии — от него считается длительность матча.
    fn started_at(&self) -> Instant;
}
