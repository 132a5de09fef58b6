//! Инфраструктура: случайность, генерация идентификаторов,
//! персистентность результатов и рассылка событий. Всё за трейтами,
//! чтобы тесты подставляли детерминированные/собирающие реализации.

pub mod broadcast;
pub mod ids;
pub mod persistence;
pub mod rng;

pub use broadcast::{Broadcaster, CollectingBroadcaster, NullBroadcaster};
pub use ids::IdGenerator;
pub use persistence::{
    InMemoryPersistence, MatchOutcome, MatchRecord, Persistence, PersistenceError,
};
pub use rng::{DeterministicRng, SystemRng};
