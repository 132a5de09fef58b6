use std::collections::HashSet;

use cardroom_engine::domain::card::Card;
use cardroom_engine::domain::chips::Chips;
use cardroom_engine::poker::{PokerError, PokerStage};
use cardroom_engine::session::{
    GameSession, MatchSnapshot, PokerActionKind, PokerSession, RandomSource, SessionAction,
    SessionError, TienLenActionKind, TienLenSession,
};
use cardroom_engine::tienlen::TienLenError;

/// Детерминированный RNG для тестов: shuffle ничего не делает,
/// колода остаётся в порядке создания (♣, ♦, ♥, ♠ от двойки к тузу;
/// раздача идёт с конца, то есть со старших пик).
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

fn c(s: &str) -> Card {
    s.parse().expect("bad card literal")
}

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|t| c(t)).collect()
}

fn poker(action: PokerActionKind) -> SessionAction {
    SessionAction::Poker(action)
}

fn play(s: &str) -> SessionAction {
    SessionAction::TienLen(TienLenActionKind::Play(cards(s)))
}

fn skip() -> SessionAction {
    SessionAction::TienLen(TienLenActionKind::Skip)
}

//
// PokerSession
//
#[test]
fn poker_deal_gives_two_hole_cards_in_seat_order() {
    let mut rng = DummyRng::default();
    let session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    // Неперемешанная колода раздаётся со старших пик.
    assert_eq!(session.state().player(1).unwrap().hole_cards, cards("As Ks"));
    assert_eq!(session.state().player(2).unwrap().hole_cards, cards("Qs Js"));
    assert_eq!(session.player_order(), &[1, 2]);
    assert!(!session.is_finished());
}

#[test]
fn poker_fold_gives_immediate_win_to_last_standing() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    session.apply_action(1, poker(PokerActionKind::Fold)).unwrap();

    assert!(session.is_finished());
    assert_eq!(session.winner(), Some(2));
    assert_eq!(session.state().stage, PokerStage::Finished);

    // После конца матча действия отклоняются.
    let err = session
        .apply_action(2, poker(PokerActionKind::Check))
        .unwrap_err();
    assert_eq!(err, SessionError::Poker(PokerError::MatchFinished));
}

#[test]
fn poker_out_of_turn_and_illegal_check_are_rejected() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    // Ходит игрок 1, а не 2.
    let err = session
        .apply_action(2, poker(PokerActionKind::Check))
        .unwrap_err();
    assert_eq!(err, SessionError::Poker(PokerError::NotPlayersTurn(2)));

    session
        .apply_action(1, poker(PokerActionKind::Raise(Chips(100))))
        .unwrap();

    // Против ставки чекать нельзя.
    let err = session
        .apply_action(2, poker(PokerActionKind::Check))
        .unwrap_err();
    assert_eq!(err, SessionError::Poker(PokerError::CannotCheck));
}

#[test]
fn poker_raise_rotates_action_forward_not_backward() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2, 3], Chips(1000), &mut rng).unwrap();

    session.apply_action(1, poker(PokerActionKind::Check)).unwrap();
    session
        .apply_action(2, poker(PokerActionKind::Raise(Chips(100))))
        .unwrap();

    // После рейза второго ход продолжается по кругу — к третьему,
    // а не назад к первому.
    let state = session.state();
    assert_eq!(state.players[state.turn_idx].id, 3);

    session.apply_action(3, poker(PokerActionKind::Call)).unwrap();
    let state = session.state();
    assert_eq!(state.players[state.turn_idx].id, 1);

    // Первый уравнивает — круг закрыт, открыт флоп.
    session.apply_action(1, poker(PokerActionKind::Call)).unwrap();
    assert_eq!(session.state().stage, PokerStage::Flop);
    assert_eq!(session.state().pot, Chips(300));
}

#[test]
fn poker_checked_down_hand_reaches_showdown() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    // Префлоп: рейз и колл.
    session
        .apply_action(1, poker(PokerActionKind::Raise(Chips(100))))
        .unwrap();
    session.apply_action(2, poker(PokerActionKind::Call)).unwrap();
    assert_eq!(session.state().stage, PokerStage::Flop);
    assert_eq!(session.state().community, cards("Ts 9s 8s"));
    assert_eq!(session.state().pot, Chips(200));

    // Флоп, тёрн и ривер прочекиваются до шоудауна.
    for _ in 0..3 {
        session.apply_action(1, poker(PokerActionKind::Check)).unwrap();
        session.apply_action(2, poker(PokerActionKind::Check)).unwrap();
    }

    // На доске Ts 9s 8s 7s 6s; у игрока 2 стрит-флеш до дамы.
    assert!(session.is_finished());
    assert_eq!(session.winner(), Some(2));
    assert_eq!(session.state().player(2).unwrap().chips, Chips(1100));
    assert_eq!(session.state().player(1).unwrap().chips, Chips(900));
}

#[test]
fn poker_all_in_cascades_streets_to_showdown() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    session.apply_action(1, poker(PokerActionKind::AllIn)).unwrap();
    session.apply_action(2, poker(PokerActionKind::Call)).unwrap();

    // Торговаться больше некому: улицы открываются каскадом до шоудауна.
    assert!(session.is_finished());
    assert_eq!(session.state().community.len(), 5);
    assert_eq!(session.winner(), Some(2));
    assert_eq!(session.state().player(2).unwrap().chips, Chips(2000));
    assert_eq!(session.state().player(1).unwrap().chips, Chips::ZERO);
}

#[test]
fn poker_raise_beyond_stack_clamps_to_all_in() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(500), &mut rng).unwrap();

    session
        .apply_action(1, poker(PokerActionKind::Raise(Chips(99_999))))
        .unwrap();

    let p1 = session.state().player(1).unwrap();
    assert_eq!(p1.chips, Chips::ZERO);
    assert_eq!(session.state().current_bet, Chips(500));
    assert_eq!(session.state().pot, Chips(500));

    // Второй фолдит: победа первого, банк возвращается, сумма фишек
    // равна стартовой (500 + 500).
    session.apply_action(2, poker(PokerActionKind::Fold)).unwrap();
    assert!(session.is_finished());
    assert_eq!(session.winner(), Some(1));
    assert_eq!(session.state().player(1).unwrap().chips, Chips(500));
    assert_eq!(session.state().player(2).unwrap().chips, Chips(500));
    assert_eq!(session.state().pot, Chips::ZERO);
}

#[test]
fn poker_rejects_tienlen_actions() {
    let mut rng = DummyRng::default();
    let mut session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    let err = session.apply_action(1, skip()).unwrap_err();
    assert!(matches!(err, SessionError::WrongGameType { .. }));
}

//
// TienLenSession
//
#[test]
fn tienlen_deal_splits_deck_without_overlap() {
    let mut rng = DummyRng::default();
    let session = TienLenSession::new(vec![1, 2, 3, 4], &mut rng).unwrap();

    let mut seen: HashSet<Card> = HashSet::new();
    for player in 1..=4 {
        let hand = session.state().hand(player).unwrap();
        assert_eq!(hand.len(), 13);
        seen.extend(hand.iter().copied());
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn tienlen_five_players_do_not_fit_one_deck() {
    let mut rng = DummyRng::default();
    let err = TienLenSession::new(vec![1, 2, 3, 4, 5], &mut rng).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::EmptyDeck));
}

#[test]
fn tienlen_trick_round_passes_and_reopens() {
    let mut rng = DummyRng::default();
    // Неперемешанная колода: у игрока 1 все пики, у 2 — червы,
    // у 3 — бубны, у 4 — трефы.
    let mut session = TienLenSession::new(vec![1, 2, 3, 4], &mut rng).unwrap();

    // Пас без трика запрещён.
    let err = session.apply_action(1, skip()).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::SkipWithoutTrick));

    session.apply_action(1, play("3s")).unwrap();
    // Тройка черв бьёт тройку пик мастью.
    session.apply_action(2, play("3h")).unwrap();

    // Тройка бубён младше тройки черв — отказ без изменения состояния.
    let err = session.apply_action(3, play("3d")).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::CannotBeatTrick));
    assert_eq!(session.state().hand(3).unwrap().len(), 13);

    session.apply_action(3, skip()).unwrap();
    session.apply_action(4, skip()).unwrap();
    session.apply_action(1, skip()).unwrap();

    // Все спасовали: раунд закрыт, ходит последний сыгравший, стол пуст.
    assert!(session.state().current_trick.is_none());
    assert_eq!(session.state().current_player(), 2);
    assert!(session.state().passed.is_empty());
}

#[test]
fn tienlen_rejects_out_of_turn_and_invalid_sets() {
    let mut rng = DummyRng::default();
    let mut session = TienLenSession::new(vec![1, 2, 3, 4], &mut rng).unwrap();

    let err = session.apply_action(3, play("3d")).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::NotPlayersTurn(3)));

    // 3♠ + 5♠ — не комбинация.
    let err = session.apply_action(1, play("3s 5s")).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::InvalidCombination));

    // Карт не из своей руки сыграть нельзя.
    let err = session.apply_action(1, play("3h")).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::CardsNotInHand));

    // Дубль единственной двойки пик — не пара: каждая сыгранная карта
    // должна расходовать своё вхождение в руке.
    let err = session.apply_action(1, play("2s 2s")).unwrap_err();
    assert_eq!(err, SessionError::TienLen(TienLenError::CardsNotInHand));
    assert_eq!(session.state().hand(1).unwrap().len(), 13);
    assert!(session.state().current_trick.is_none());
}

//
// MatchSnapshot — форма сериализации
//
#[test]
fn snapshot_serializes_as_tagged_union() {
    let mut rng = DummyRng::default();

    let tienlen = TienLenSession::new(vec![1, 2, 3, 4], &mut rng).unwrap();
    let json = serde_json::to_value(tienlen.snapshot()).unwrap();
    assert_eq!(json["game_type"], "TienLen");
    assert!(json["state"]["hands"].is_object());

    let poker = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();
    let json = serde_json::to_value(poker.snapshot()).unwrap();
    assert_eq!(json["game_type"], "Poker");
    assert_eq!(json["state"]["stage"], "PreFlop");
}

#[test]
fn seeded_rng_reproduces_the_deal() {
    use cardroom_engine::infra::DeterministicRng;

    let mut a = DeterministicRng::from_seed(7);
    let mut b = DeterministicRng::from_seed(7);
    let first = TienLenSession::new(vec![1, 2, 3, 4], &mut a).unwrap();
    let second = TienLenSession::new(vec![1, 2, 3, 4], &mut b).unwrap();
    assert_eq!(first.snapshot(), second.snapshot());

    let mut other = DeterministicRng::from_seed(8);
    let third = TienLenSession::new(vec![1, 2, 3, 4], &mut other).unwrap();
    assert_ne!(first.snapshot(), third.snapshot());
}

#[test]
fn snapshot_roundtrips_through_serde() {
    let mut rng = DummyRng::default();
    let session = PokerSession::new(vec![1, 2], Chips(1000), &mut rng).unwrap();

    let snapshot = session.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
