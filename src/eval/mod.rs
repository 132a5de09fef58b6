//! Оценка покерной руки: из 5–7 карт выбрать лучшую пятёрку.
//!
//! Основная операция — `evaluate_best_hand`. Функция чистая и
//! детерминированная: для одного мультимножества карт результат
//! не зависит от порядка на входе.

pub mod evaluator;
pub mod hand_rank;
pub mod masks;

use thiserror::Error;

pub use evaluator::evaluate_best_hand;
pub use hand_rank::{describe_hand, HandCategory, HandRank};

/// Ошибки оценщика руки.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Для оценки руки нужно минимум 5 карт, получено {got}")]
    InsufficientCards { got: usize },
}
