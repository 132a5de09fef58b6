//! Лобби: реестр комнат, реестр активных сессий и сервис-оркестратор,
//! связывающий их с персистентностью и рассылкой.

pub mod errors;
pub mod rooms;
pub mod service;
pub mod sessions;

pub use errors::LobbyError;
pub use rooms::{LeaveOutcome, RoomManager};
pub use service::{CardroomConfig, CardroomService};
pub use sessions::SessionManager;
