//! Внешний контракт сервиса: входящие запросы действий и исходящие
//! события рассылки. Всё сериализуемо через serde; формат действия —
//! строковый тип плюс опциональные поля, чтобы один запрос покрывал
//! обе игры.

pub mod actions;
pub mod events;

pub use actions::PlayerActionRequest;
pub use events::{RoomInfo, ServerEvent};
