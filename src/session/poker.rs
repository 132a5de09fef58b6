use std::time::Instant;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::{GameType, PlayerId};
use crate::eval::evaluate_best_hand;
use crate::poker::{PokerError, PokerStage, PokerState};

use super::{
    GameSession, MatchSnapshot, PokerActionKind, RandomSource, SessionAction, SessionError,
};

/// Покерная сессия: оборачивает `PokerState`, ведёт очередь торговли
/// и решает, когда круг ставок завершён и пора открывать улицу.
pub struct PokerSession {
    state: PokerState,
    deck: Deck,
    /// Порядок игроков, зафиксированный при создании.
    order: Vec<PlayerId>,
    /// Кто ещё должен сходить на текущей улице.
    to_act: Vec<PlayerId>,
    winner: Option<PlayerId>,
    started_at: Instant,
}

impl PokerSession {
    /// Создать сессию: перемешать колоду, раздать по 2 карманные карты,
    /// выставить очередь префлопа.
    pub fn new<R: RandomSource>(
        player_order: Vec<PlayerId>,
        starting_chips: Chips,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);

        let mut state = PokerState::new(&player_order, starting_chips);
        for player in &player_order {
            let c1 = deck.draw_one().ok_or(PokerError::EmptyDeck)?;
            let c2 = deck.draw_one().ok_or(PokerError::EmptyDeck)?;
            state.deal_hole(*player, [c1, c2])?;
        }

        Ok(Self {
            state,
            deck,
            to_act: player_order.clone(),
            order: player_order,
            winner: None,
            started_at: Instant::now(),
        })
    }

    pub fn state(&self) -> &PokerState {
        &self.state
    }

    /// Игроки, которые ещё могут торговаться: не сфолдили и со стеком.
    fn betting_players(&self) -> Vec<PlayerId> {
        self.state
            .players
            .iter()
            .filter(|p| !p.folded && !p.chips.is_zero())
            .map(|p| p.id)
            .collect()
    }

    /// Перезапустить очередь после рейза: все торгующиеся, кроме агрессора,
    /// начиная со следующего за ним по кругу — ход идёт вперёд, не назад.
    fn reopen_betting(&mut self, aggressor: PlayerId) {
        let eligible = self.betting_players();
        let n = self.order.len();
        let start = self
            .order
            .iter()
            .position(|p| *p == aggressor)
            .map_or(0, |i| (i + 1) % n);
        self.to_act = (0..n)
            .map(|step| self.order[(start + step) % n])
            .filter(|p| *p != aggressor && eligible.contains(p))
            .collect();
    }

    fn mark_acted(&mut self, player: PlayerId) {
        self.to_act.retain(|p| *p != player);
    }

    /// Передать ход первому в очереди (если очередь не пуста).
    fn point_turn_at_queue_head(&mut self) {
        if let Some(next) = self.to_act.first().copied() {
            if let Some(idx) = self.state.index_of(next) {
                self.state.turn_idx = idx;
            }
        }
    }

    /// Круг торговли завершён — открыть следующую улицу.
    /// Улицы каскадируются, пока очередь пуста (например, все в all-in).
    fn advance_streets(&mut self) -> Result<(), SessionError> {
        while self.to_act.is_empty() && self.winner.is_none() {
            match self.state.stage {
                PokerStage::PreFlop => self.state.reveal_flop(&mut self.deck)?,
                PokerStage::Flop => self.state.reveal_turn(&mut self.deck)?,
                PokerStage::Turn => self.state.reveal_river(&mut self.deck)?,
                PokerStage::River => {
                    self.state.enter_showdown()?;
                    self.resolve_showdown()?;
                    return Ok(());
                }
                PokerStage::Showdown | PokerStage::Finished => return Ok(()),
            }
            self.state.reset_street_bets();
            self.to_act = self.betting_players();
            self.point_turn_at_queue_head();
        }
        Ok(())
    }

    /// Шоудаун: сравнить руки не сфолдивших через оценщик,
    /// банк — лучшему (при полном равенстве — раннему месту).
    fn resolve_showdown(&mut self) -> Result<(), SessionError> {
        let mut best: Option<(PlayerId, crate::eval::HandRank)> = None;
        for p in self.state.active_players() {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&self.state.community);
            // 2 карманные + 5 общих, InsufficientCards здесь невозможна.
            let rank = evaluate_best_hand(&cards)
                .map_err(|_| PokerError::WrongStage)?;
            log::debug!(
                "Шоудаун: игрок {} — {}",
                p.id,
                crate::eval::describe_hand(rank)
            );
            if best.map_or(true, |(_, b)| rank > b) {
                best = Some((p.id, rank));
            }
        }
        if let Some((winner, _)) = best {
            self.finish_with_winner(winner)?;
        }
        Ok(())
    }

    fn finish_with_winner(&mut self, winner: PlayerId) -> Result<(), SessionError> {
        self.state.settle(winner)?;
        self.winner = Some(winner);
        Ok(())
    }
}

impl GameSession for PokerSession {
    fn game_type(&self) -> GameType {
        GameType::Poker
    }

    fn player_order(&self) -> &[PlayerId] {
        &self.order
    }

    fn apply_action(
        &mut self,
        player: PlayerId,
        action: SessionAction,
    ) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(PokerError::MatchFinished.into());
        }
        let kind = match action {
            SessionAction::Poker(kind) => kind,
            SessionAction::TienLen(_) => {
                return Err(SessionError::WrongGameType {
                    expected: GameType::Poker,
                })
            }
        };

        let current = self.state.players[self.state.turn_idx].id;
        if player != current {
            return Err(PokerError::NotPlayersTurn(player).into());
        }

        let to_call = self.state.to_call(player);
        let bet_before = self.state.current_bet;

        match kind {
            PokerActionKind::Fold => {
                self.state.fold(player)?;
            }
            PokerActionKind::Check => {
                if !to_call.is_zero() {
                    return Err(PokerError::CannotCheck.into());
                }
            }
            PokerActionKind::Call => {
                if !to_call.is_zero() {
                    self.state.bet(player, to_call)?;
                }
            }
            PokerActionKind::Raise(increment) => {
                // Сумма сверх стека кламптся движком до all-in.
                self.state.bet(player, to_call + increment)?;
            }
            PokerActionKind::AllIn => {
                let stack = self
                    .state
                    .player(player)
                    .map(|p| p.chips)
                    .ok_or(PokerError::PlayerNotInMatch(player))?;
                self.state.bet(player, stack)?;
            }
        }

        self.mark_acted(player);
        if self.state.current_bet > bet_before {
            // Рейз (в т.ч. all-in сверх ставки) заново открывает торговлю.
            self.reopen_betting(player);
        }

        // Остался один не сфолдивший — немедленная победа без шоудауна.
        let active: Vec<PlayerId> = self.state.active_players().map(|p| p.id).collect();
        if active.len() == 1 {
            return self.finish_with_winner(active[0]);
        }

        if self.to_act.is_empty() {
            self.advance_streets()?;
        } else {
            self.point_turn_at_queue_head();
        }
        Ok(())
    }

    fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::Poker(self.state.clone())
    }

    fn is_finished(&self) -> bool {
        self.state.stage == PokerStage::Finished
    }

    fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    fn started_at(&self) -> Instant {
        self.started_at
    }
}
