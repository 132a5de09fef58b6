use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::RoomId;

/// Генератор идентификаторов комнат: монотонный счётчик,
/// безопасный для конкурентных вызовов.
#[derive(Debug)]
pub struct IdGenerator {
    room_counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            room_counter: AtomicU64::new(1),
        }
    }

    pub fn next_room_id(&self) -> RoomId {
        self.room_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
