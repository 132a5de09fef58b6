//! Доменная модель: карты, колода, фишки, комнаты, базовые идентификаторы.

pub mod card;
pub mod chips;
pub mod deck;
pub mod room;

use serde::{Deserialize, Serialize};

// Базовые идентификаторы. Генерация — в infra::ids.
pub type PlayerId = u64;
pub type RoomId = u64;

/// Тип игры, к которому привязаны комната и сессия.
/// Выбирается при создании комнаты и больше не меняется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GameType {
    Poker,
    TienLen,
}

// Реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use room::*;
