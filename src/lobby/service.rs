use std::sync::{Mutex, MutexGuard};

use crate::api::{PlayerActionRequest, RoomInfo, ServerEvent};
use crate::domain::chips::Chips;
use crate::domain::room::RoomStatus;
use crate::domain::{GameType, PlayerId, RoomId};
use crate::infra::{Broadcaster, IdGenerator, MatchOutcome, MatchRecord, Persistence};
use crate::session::RandomSource;

use super::errors::LobbyError;
use super::rooms::{LeaveOutcome, RoomManager};
use super::sessions::SessionManager;

/// Конфигурация сервиса.
#[derive(Clone, Debug)]
pub struct CardroomConfig {
    /// Стартовый стек фишек каждого игрока в покерном матче.
    pub starting_chips: Chips,
    /// Кредиты победителю матча.
    pub win_credit_bonus: i64,
    /// Кредиты, списываемые с проигравших (хранится положительным).
    pub loss_credit_penalty: i64,
    /// Метка режима, попадающая в записи истории матчей.
    pub mode_label: String,
}

impl Default for CardroomConfig {
    fn default() -> Self {
        Self {
            starting_chips: Chips(1000),
            win_credit_bonus: 100,
            loss_credit_penalty: 50,
            mode_label: "standard".to_string(),
        }
    }
}

/// Мутабельная часть сервиса. Один мьютекс на всё лобби:
/// действия над комнатами и матчами сериализуются полностью,
/// конкурентные запросы видят согласованное состояние.
struct Inner<R> {
    rooms: RoomManager,
    sessions: SessionManager,
    rng: R,
}

/// Сервис карточных комнат: фасад над реестрами комнат и сессий,
/// персистентностью и рассылкой. Все публичные методы берут `&self`.
pub struct CardroomService<R, P, B> {
    inner: Mutex<Inner<R>>,
    persistence: P,
    broadcaster: B,
    config: CardroomConfig,
    ids: IdGenerator,
}

impl<R, P, B> CardroomService<R, P, B>
where
    R: RandomSource,
    P: Persistence,
    B: Broadcaster,
{
    pub fn new(rng: R, persistence: P, broadcaster: B, config: CardroomConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rooms: RoomManager::new(),
                sessions: SessionManager::new(),
                rng,
            }),
            persistence,
            broadcaster,
            config,
            ids: IdGenerator::new(),
        }
    }

    /// Захватить лобби. Отравленный мьютекс восстанавливаем:
    /// инварианты состояния не зависят от паниковавшего потока.
    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    /// Создать комнату; создатель — хост на месте 0.
    pub fn create_room(
        &self,
        name: String,
        game_type: GameType,
        host_id: PlayerId,
        capacity: u8,
    ) -> Result<RoomInfo, LobbyError> {
        let id = self.ids.next_room_id();
        let info = {
            let mut inner = self.lock();
            inner.rooms.create_room(id, name, game_type, host_id, capacity)
        };
        log::info!("Комната {} создана игроком {}", info.id, host_id);
        self.broadcaster
            .broadcast(&ServerEvent::RoomUpdate { room: info.clone() });
        Ok(info)
    }

    pub fn join_room(&self, room_id: RoomId, player_id: PlayerId) -> Result<RoomInfo, LobbyError> {
        let info = {
            let mut inner = self.lock();
            inner.rooms.join_room(room_id, player_id)?
        };
        self.broadcaster
            .broadcast(&ServerEvent::RoomUpdate { room: info.clone() });
        Ok(info)
    }

    /// Выход игрока. Опустевшая комната уничтожается вместе с сессией.
    pub fn leave_room(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
    ) -> Result<LeaveOutcome, LobbyError> {
        let outcome = {
            let mut inner = self.lock();
            let outcome = inner.rooms.leave_room(room_id, player_id)?;
            if outcome == LeaveOutcome::Destroyed {
                inner.sessions.remove(room_id);
                log::info!("Комната {} опустела и уничтожена", room_id);
            }
            outcome
        };
        if let LeaveOutcome::Left(info) = &outcome {
            self.broadcaster
                .broadcast(&ServerEvent::RoomUpdate { room: info.clone() });
        }
        Ok(outcome)
    }

    pub fn room_info(&self, room_id: RoomId) -> Result<RoomInfo, LobbyError> {
        let inner = self.lock();
        inner.rooms.room(room_id).map(RoomInfo::from)
    }

    /// Явный старт матча. Идемпотентен: повторный вызов для комнаты
    /// с живой сессией ничего не меняет.
    pub fn start_session(&self, room_id: RoomId, game_type: GameType) -> Result<(), LobbyError> {
        let mut inner = self.lock();
        self.ensure_session(&mut inner, room_id, game_type)?;
        Ok(())
    }

    /// Обработать действие игрока. Сессия создаётся лениво при первом
    /// действии. Невалидные действия отклоняются без изменения
    /// состояния, но снимок рассылается в любом случае.
    pub fn handle_player_action(&self, request: &PlayerActionRequest) -> Result<(), LobbyError> {
        let mut inner = self.lock();
        self.ensure_session(&mut inner, request.room_id, request.game_type)?;

        let session = inner
            .sessions
            .get_mut(request.room_id)
            .ok_or(LobbyError::RoomNotFound(request.room_id))?;

        match request.to_session_action() {
            Ok(action) => {
                if let Err(err) = session.apply_action(request.player_id, action) {
                    log::warn!(
                        "Действие {} игрока {} отклонено: {err}",
                        request.action_type,
                        request.player_id
                    );
                }
            }
            Err(err) => {
                log::warn!(
                    "Некорректный запрос действия от игрока {}: {err}",
                    request.player_id
                );
            }
        }

        self.broadcaster.broadcast(&ServerEvent::StateSnapshot {
            room_id: request.room_id,
            game_type: session.game_type(),
            state: session.snapshot(),
        });

        if session.is_finished() {
            self.finalize_match(&mut inner, request.room_id)?;
        }
        Ok(())
    }

    /// Создать сессию комнаты, если её нет: комната переходит в Playing,
    /// подписчикам уходит MatchStart с начальным состоянием.
    fn ensure_session(
        &self,
        inner: &mut Inner<R>,
        room_id: RoomId,
        game_type: GameType,
    ) -> Result<(), LobbyError> {
        let starting_chips = self.config.starting_chips;
        let inner = &mut *inner;
        let room = inner.rooms.room(room_id)?;
        if room.game_type != game_type {
            return Err(LobbyError::GameTypeMismatch);
        }
        // Завершённая комната не перезапускается.
        if room.status == RoomStatus::Finished {
            return Err(LobbyError::RoomNotWaiting(room_id));
        }

        let (created, session) =
            inner
                .sessions
                .start_if_absent(room, starting_chips, &mut inner.rng)?;
        if !created {
            return Ok(());
        }

        let event = ServerEvent::MatchStart {
            room_id,
            game_type: session.game_type(),
            player_order: session.player_order().to_vec(),
            initial_state: session.snapshot(),
        };
        inner.rooms.room_mut(room_id)?.status = RoomStatus::Playing;
        log::info!("Матч в комнате {} стартовал ({:?})", room_id, game_type);
        self.broadcaster.broadcast(&event);
        Ok(())
    }

    /// Финализация завершившегося матча: начисление кредитов,
    /// записи истории, статус комнаты, рассылка MatchEnd, снос сессии.
    /// Сбои персистентности переживаются per-player и не срывают
    /// финализацию остальных.
    fn finalize_match(&self, inner: &mut Inner<R>, room_id: RoomId) -> Result<(), LobbyError> {
        let (winner, players, game_type, duration_seconds) = {
            let session = inner
                .sessions
                .get_mut(room_id)
                .ok_or(LobbyError::RoomNotFound(room_id))?;
            (
                session.winner(),
                session.player_order().to_vec(),
                session.game_type(),
                session.started_at().elapsed().as_secs(),
            )
        };
        inner.sessions.remove(room_id);

        let credit_changes: Vec<i64> = players
            .iter()
            .map(|p| {
                if Some(*p) == winner {
                    self.config.win_credit_bonus
                } else {
                    -self.config.loss_credit_penalty
                }
            })
            .collect();

        let opponent_count = players.len().saturating_sub(1) as u32;
        for (player, delta) in players.iter().zip(&credit_changes) {
            if let Err(err) = self.persistence.apply_credit_delta(*player, *delta) {
                log::warn!("Не удалось начислить кредиты игроку {player}: {err}");
            }
            let record = MatchRecord {
                player_id: *player,
                game_type,
                mode: self.config.mode_label.clone(),
                outcome: if Some(*player) == winner {
                    MatchOutcome::Win
                } else {
                    MatchOutcome::Loss
                },
                credit_delta: *delta,
                opponent_count,
                duration_seconds,
            };
            if let Err(err) = self.persistence.save_match_record(record) {
                log::warn!("Не удалось сохранить запись матча игрока {player}: {err}");
            }
        }

        let room = inner.rooms.room_mut(room_id)?;
        room.status = RoomStatus::Finished;
        let info = RoomInfo::from(&*room);
        log::info!(
            "Матч в комнате {} завершён, победитель: {:?}",
            room_id,
            winner
        );
        self.broadcaster
            .broadcast(&ServerEvent::RoomUpdate { room: info });
        self.broadcaster.broadcast(&ServerEvent::MatchEnd {
            room_id,
            game_type,
            winner_id: winner,
            player_ids: players,
            credit_changes,
        });
        Ok(())
    }
}
