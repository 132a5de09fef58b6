//! Tiến Lên: порядок карт, движок комбинаций и состояние матча.
//!
//! Основные операции:
//!   - `classify` — распознать комбинацию в наборе карт;
//!   - `can_beat` — бьёт ли новая комбинация текущую (включая «бомбы»);
//!   - `TienLenState` — state machine одного матча (руки, трик, ходы).

pub mod combination;
pub mod errors;
pub mod ordering;
pub mod rules;
pub mod state;

pub use combination::{classify, ComboKind, Combination};
pub use errors::TienLenError;
pub use rules::can_beat;
pub use state::{TienLenState, TurnAdvance};
