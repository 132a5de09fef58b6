//! Покерная раздача: стадии, ставки, общие карты.
//!
//! `PokerState` — state machine одного матча. Комплект операций
//! намеренно низкоуровневый: детект завершения круга торговли и
//! передача хода — ответственность сессии (`session::PokerSession`).

pub mod errors;
pub mod state;

pub use errors::PokerError;
pub use state::{PokerPlayer, PokerStage, PokerState};
