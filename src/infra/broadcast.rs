use std::sync::Mutex;

use crate::api::ServerEvent;

/// Канал рассылки событий подписчикам. Доставка best-effort:
/// реализация не возвращает ошибок, сервис на неё не полагается.
pub trait Broadcaster: Send + Sync {
    fn broadcast(&self, event: &ServerEvent);
}

/// Рассылка «в никуда».
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn broadcast(&self, _event: &ServerEvent) {}
}

/// Собирающая рассылка для тестов: копит события в памяти.
#[derive(Debug, Default)]
pub struct CollectingBroadcaster {
    events: Mutex<Vec<ServerEvent>>,
}

impl CollectingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ServerEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Broadcaster for CollectingBroadcaster {
    fn broadcast(&self, event: &ServerEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
