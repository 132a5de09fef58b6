use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{GameType, PlayerId};

/// Исход матча для одного участника.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Loss,
}

/// Запись в истории матчей игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub player_id: PlayerId,
    pub game_type: GameType,
    /// Метка режима (из конфигурации сервиса).
    pub mode: String,
    pub outcome: MatchOutcome,
    pub credit_delta: i64,
    pub opponent_count: u32,
    pub duration_seconds: u64,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Ошибка хранилища: {0}")]
    Storage(String),
}

/// Хранилище результатов. Ошибки записи не должны ломать финализацию
/// матча — вызывающая сторона обязана переживать их per-player.
pub trait Persistence: Send + Sync {
    /// Применить изменение кредитов игрока (может быть отрицательным).
    fn apply_credit_delta(&self, player: PlayerId, delta: i64) -> Result<(), PersistenceError>;

    /// Сохранить запись об итогах матча для игрока.
    fn save_match_record(&self, record: MatchRecord) -> Result<(), PersistenceError>;
}

/// Хранилище в памяти: балансы кредитов и лента записей.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    credits: Mutex<HashMap<PlayerId, i64>>,
    records: Mutex<Vec<MatchRecord>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credits(&self, player: PlayerId) -> i64 {
        self.credits
            .lock()
            .map(|c| c.get(&player).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Persistence for InMemoryPersistence {
    fn apply_credit_delta(&self, player: PlayerId, delta: i64) -> Result<(), PersistenceError> {
        let mut credits = self
            .credits
            .lock()
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        *credits.entry(player).or_insert(0) += delta;
        Ok(())
    }

    fn save_match_record(&self, record: MatchRecord) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| PersistenceError::Storage(e.to_string()))?;
        records.push(record);
        Ok(())
    }
}
