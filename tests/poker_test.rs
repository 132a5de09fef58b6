use cardroom_engine::domain::chips::Chips;
use cardroom_engine::domain::deck::Deck;
use cardroom_engine::poker::{PokerError, PokerStage, PokerState};

fn sum_chips(state: &PokerState) -> Chips {
    state
        .players
        .iter()
        .fold(state.pot, |acc, p| acc + p.chips)
}

#[test]
fn new_state_starts_at_preflop_with_equal_stacks() {
    let state = PokerState::new(&[1, 2, 3], Chips(1000));
    assert_eq!(state.stage, PokerStage::PreFlop);
    assert_eq!(state.players.len(), 3);
    assert!(state.players.iter().all(|p| p.chips == Chips(1000)));
    assert_eq!(state.pot, Chips::ZERO);
    assert_eq!(state.community.len(), 0);
}

#[test]
fn bet_moves_chips_to_pot_and_raises_target() {
    let mut state = PokerState::new(&[1, 2], Chips(1000));

    let real = state.bet(1, Chips(300)).unwrap();
    assert_eq!(real, Chips(300));
    assert_eq!(state.pot, Chips(300));
    assert_eq!(state.current_bet, Chips(300));
    assert_eq!(state.player(1).unwrap().chips, Chips(700));

    assert_eq!(state.to_call(2), Chips(300));
    assert_eq!(state.to_call(1), Chips::ZERO);
}

#[test]
fn bet_over_stack_clamps_to_all_in() {
    let mut state = PokerState::new(&[1, 2], Chips(500));

    let real = state.bet(1, Chips(9999)).unwrap();
    assert_eq!(real, Chips(500));
    assert_eq!(state.player(1).unwrap().chips, Chips::ZERO);
    assert_eq!(state.current_bet, Chips(500));
    assert_eq!(state.pot, Chips(500));
}

#[test]
fn chip_sum_is_conserved_until_settle() {
    let mut state = PokerState::new(&[1, 2, 3], Chips(1000));
    let total = sum_chips(&state);

    state.bet(1, Chips(100)).unwrap();
    state.bet(2, Chips(250)).unwrap();
    state.bet(3, Chips(9999)).unwrap(); // all-in
    assert_eq!(sum_chips(&state), total);

    state.settle(2).unwrap();
    assert_eq!(state.stage, PokerStage::Finished);
    assert_eq!(state.pot, Chips::ZERO);
    assert_eq!(sum_chips(&state), total);
}

#[test]
fn folded_player_cannot_act_again() {
    let mut state = PokerState::new(&[1, 2], Chips(1000));
    state.fold(1).unwrap();

    assert_eq!(state.fold(1).unwrap_err(), PokerError::PlayerFolded(1));
    assert_eq!(
        state.bet(1, Chips(100)).unwrap_err(),
        PokerError::PlayerFolded(1)
    );
    // Стек сфолдившего заморожен.
    assert_eq!(state.player(1).unwrap().chips, Chips(1000));

    let active: Vec<_> = state.active_players().map(|p| p.id).collect();
    assert_eq!(active, vec![2]);
}

#[test]
fn streets_reveal_in_order_and_only_in_order() {
    let mut state = PokerState::new(&[1, 2], Chips(1000));
    let mut deck = Deck::standard_52();

    // Тёрн до флопа недопустим.
    assert_eq!(state.reveal_turn(&mut deck).unwrap_err(), PokerError::WrongStage);

    state.reveal_flop(&mut deck).unwrap();
    assert_eq!(state.stage, PokerStage::Flop);
    assert_eq!(state.community.len(), 3);

    state.reveal_turn(&mut deck).unwrap();
    assert_eq!(state.community.len(), 4);

    state.reveal_river(&mut deck).unwrap();
    assert_eq!(state.community.len(), 5);
    assert_eq!(state.stage, PokerStage::River);

    // Повторный ривер невозможен.
    assert_eq!(state.reveal_river(&mut deck).unwrap_err(), PokerError::WrongStage);

    state.enter_showdown().unwrap();
    assert_eq!(state.stage, PokerStage::Showdown);
}

#[test]
fn street_bets_reset_between_rounds() {
    let mut state = PokerState::new(&[1, 2], Chips(1000));
    state.bet(1, Chips(100)).unwrap();
    state.bet(2, Chips(100)).unwrap();

    state.reset_street_bets();
    assert_eq!(state.current_bet, Chips::ZERO);
    assert!(state.players.iter().all(|p| p.bet == Chips::ZERO));
    // Банк при этом не трогаем.
    assert_eq!(state.pot, Chips(200));
}

#[test]
fn settle_twice_is_an_error() {
    let mut state = PokerState::new(&[1, 2], Chips(1000));
    state.bet(1, Chips(100)).unwrap();
    state.settle(2).unwrap();
    assert_eq!(state.player(2).unwrap().chips, Chips(1100));

    assert_eq!(state.settle(2).unwrap_err(), PokerError::MatchFinished);
}
