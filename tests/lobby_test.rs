use cardroom_engine::api::{PlayerActionRequest, ServerEvent};
use cardroom_engine::domain::room::RoomStatus;
use cardroom_engine::domain::{GameType, PlayerId, RoomId};
use cardroom_engine::infra::{
    CollectingBroadcaster, InMemoryPersistence, MatchOutcome, Persistence, PersistenceError,
};
use cardroom_engine::lobby::{
    CardroomConfig, CardroomService, LeaveOutcome, LobbyError, RoomManager,
};
use cardroom_engine::session::RandomSource;

#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

/// Персистентность, у которой всегда «сломан диск».
struct FailingPersistence;

impl Persistence for FailingPersistence {
    fn apply_credit_delta(&self, _player: PlayerId, _delta: i64) -> Result<(), PersistenceError> {
        Err(PersistenceError::Storage("disk on fire".into()))
    }

    fn save_match_record(
        &self,
        _record: cardroom_engine::infra::MatchRecord,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::Storage("disk on fire".into()))
    }
}

fn make_service() -> CardroomService<DummyRng, InMemoryPersistence, CollectingBroadcaster> {
    CardroomService::new(
        DummyRng::default(),
        InMemoryPersistence::new(),
        CollectingBroadcaster::new(),
        CardroomConfig::default(),
    )
}

fn fold_request(room_id: RoomId, player_id: PlayerId) -> PlayerActionRequest {
    PlayerActionRequest {
        room_id,
        player_id,
        game_type: GameType::Poker,
        action_type: "FOLD".into(),
        amount: None,
        cards: None,
    }
}

//
// rooms.rs
//
#[test]
fn room_manager_membership_rules() {
    let mut rooms = RoomManager::new();
    let info = rooms.create_room(1, "t".into(), GameType::Poker, 10, 2);
    assert_eq!(info.players, vec![(10, 0)]);

    rooms.join_room(1, 11).unwrap();
    assert_eq!(
        rooms.join_room(1, 11).unwrap_err(),
        LobbyError::AlreadyInRoom(11, 1)
    );
    assert_eq!(rooms.join_room(1, 12).unwrap_err(), LobbyError::RoomFull(1));
    assert_eq!(
        rooms.join_room(99, 12).unwrap_err(),
        LobbyError::RoomNotFound(99)
    );

    // Матч пошёл — войти нельзя.
    rooms.room_mut(1).unwrap().status = RoomStatus::Playing;
    rooms.room_mut(1).unwrap().capacity = 3;
    assert_eq!(
        rooms.join_room(1, 12).unwrap_err(),
        LobbyError::RoomNotWaiting(1)
    );
}

#[test]
fn room_manager_destroys_empty_room() {
    let mut rooms = RoomManager::new();
    rooms.create_room(1, "t".into(), GameType::TienLen, 10, 4);
    rooms.join_room(1, 11).unwrap();

    match rooms.leave_room(1, 10).unwrap() {
        LeaveOutcome::Left(info) => {
            // Хост ушёл — роль переходит к оставшемуся.
            assert_eq!(info.host_id, 11);
        }
        LeaveOutcome::Destroyed => panic!("комната не должна была умереть"),
    }

    assert_eq!(rooms.leave_room(1, 11).unwrap(), LeaveOutcome::Destroyed);
    assert!(rooms.room(1).is_err());
    assert_eq!(
        rooms.leave_room(1, 11).unwrap_err(),
        LobbyError::RoomNotFound(1)
    );
}

//
// service.rs — жизненный цикл матча
//
#[test]
fn fold_finalizes_match_and_pays_out_credits() {
    let svc = make_service();
    let room = svc.create_room("hu".into(), GameType::Poker, 1, 4).unwrap();
    svc.join_room(room.id, 2).unwrap();

    // Первое действие лениво стартует сессию; фолд сразу её завершает.
    svc.handle_player_action(&fold_request(room.id, 1)).unwrap();

    assert_eq!(svc.room_info(room.id).unwrap().status, RoomStatus::Finished);

    // Кредиты: победителю бонус, проигравшему штраф.
    assert_eq!(svc.persistence().credits(2), 100);
    assert_eq!(svc.persistence().credits(1), -50);

    let records = svc.persistence().records();
    assert_eq!(records.len(), 2);
    let winner_record = records.iter().find(|r| r.player_id == 2).unwrap();
    assert_eq!(winner_record.outcome, MatchOutcome::Win);
    assert_eq!(winner_record.credit_delta, 100);
    assert_eq!(winner_record.opponent_count, 1);
    assert_eq!(winner_record.mode, "standard");
    assert_eq!(winner_record.game_type, GameType::Poker);

    // Рассылка: старт, снимок, финал.
    let events = svc.broadcaster().events();
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::MatchStart { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::StateSnapshot { .. })));
    let end = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::MatchEnd {
                winner_id,
                player_ids,
                credit_changes,
                ..
            } => Some((winner_id, player_ids, credit_changes)),
            _ => None,
        })
        .expect("нет MatchEnd");
    assert_eq!(*end.0, Some(2));
    assert_eq!(*end.1, vec![1, 2]);
    assert_eq!(*end.2, vec![-50, 100]);

    // Завершённый матч не перезапускается новым действием.
    let err = svc.handle_player_action(&fold_request(room.id, 2)).unwrap_err();
    assert_eq!(err, LobbyError::RoomNotWaiting(room.id));

    // Действие в несуществующей комнате — жёсткая ошибка.
    let err = svc.handle_player_action(&fold_request(99, 1)).unwrap_err();
    assert_eq!(err, LobbyError::RoomNotFound(99));
}

#[test]
fn start_session_is_idempotent() {
    let svc = make_service();
    let room = svc
        .create_room("tl".into(), GameType::TienLen, 1, 4)
        .unwrap();
    for p in 2..=4 {
        svc.join_room(room.id, p).unwrap();
    }

    svc.start_session(room.id, GameType::TienLen).unwrap();
    svc.start_session(room.id, GameType::TienLen).unwrap();

    assert_eq!(svc.room_info(room.id).unwrap().status, RoomStatus::Playing);
    let starts = svc
        .broadcaster()
        .events()
        .iter()
        .filter(|e| matches!(e, ServerEvent::MatchStart { .. }))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn game_type_mismatch_is_rejected() {
    let svc = make_service();
    let room = svc.create_room("hu".into(), GameType::Poker, 1, 4).unwrap();
    svc.join_room(room.id, 2).unwrap();

    let err = svc
        .start_session(room.id, GameType::TienLen)
        .unwrap_err();
    assert_eq!(err, LobbyError::GameTypeMismatch);
}

#[test]
fn malformed_action_is_tolerated_and_state_rebroadcast() {
    let svc = make_service();
    let room = svc.create_room("hu".into(), GameType::Poker, 1, 4).unwrap();
    svc.join_room(room.id, 2).unwrap();

    let request = PlayerActionRequest {
        room_id: room.id,
        player_id: 1,
        game_type: GameType::Poker,
        action_type: "DANCE".into(),
        amount: None,
        cards: None,
    };
    // Мусорное действие — не ошибка сервиса: предупреждение в лог
    // и повторная рассылка неизменённого снимка.
    svc.handle_player_action(&request).unwrap();

    assert_eq!(svc.room_info(room.id).unwrap().status, RoomStatus::Playing);
    let snapshots = svc
        .broadcaster()
        .events()
        .iter()
        .filter(|e| matches!(e, ServerEvent::StateSnapshot { .. }))
        .count();
    assert_eq!(snapshots, 1);

    // RAISE без amount — тоже мягкий отказ.
    let request = PlayerActionRequest {
        action_type: "RAISE".into(),
        ..request
    };
    svc.handle_player_action(&request).unwrap();
}

#[test]
fn persistence_failures_do_not_abort_finalize() {
    let svc = CardroomService::new(
        DummyRng::default(),
        FailingPersistence,
        CollectingBroadcaster::new(),
        CardroomConfig::default(),
    );
    let room = svc.create_room("hu".into(), GameType::Poker, 1, 4).unwrap();
    svc.join_room(room.id, 2).unwrap();

    // Хранилище падает на каждом вызове, но финализация доживает
    // до конца: комната закрыта, MatchEnd разослан.
    svc.handle_player_action(&fold_request(room.id, 1)).unwrap();

    assert_eq!(svc.room_info(room.id).unwrap().status, RoomStatus::Finished);
    assert!(svc
        .broadcaster()
        .events()
        .iter()
        .any(|e| matches!(e, ServerEvent::MatchEnd { .. })));
}

#[test]
fn leaving_last_player_destroys_room_and_session() {
    let svc = make_service();
    let room = svc.create_room("solo".into(), GameType::Poker, 1, 4).unwrap();

    assert_eq!(
        svc.leave_room(room.id, 1).unwrap(),
        LeaveOutcome::Destroyed
    );
    assert_eq!(
        svc.room_info(room.id).unwrap_err(),
        LobbyError::RoomNotFound(room.id)
    );
    assert_eq!(
        svc.join_room(room.id, 2).unwrap_err(),
        LobbyError::RoomNotFound(room.id)
    );
}

#[test]
fn room_updates_are_broadcast_on_membership_changes() {
    let svc = make_service();
    let room = svc.create_room("hu".into(), GameType::Poker, 1, 4).unwrap();
    svc.join_room(room.id, 2).unwrap();
    svc.leave_room(room.id, 2).unwrap();

    let updates: Vec<_> = svc
        .broadcaster()
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ServerEvent::RoomUpdate { room } => Some(room.players.len()),
            _ => None,
        })
        .collect();
    // Создание, вход, выход.
    assert_eq!(updates, vec![1, 2, 1]);
}
