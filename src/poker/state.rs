use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::PlayerId;

use super::errors::PokerError;

/// Стадия раздачи. Переходы строго вперёд, назад пути нет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum PokerStage {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

/// Игрок в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerPlayer {
    pub id: PlayerId,
    /// Остаток стека.
    pub chips: Chips,
    /// Ставка на текущей улице.
    pub bet: Chips,
    /// Фолд необратим до конца матча; стек сфолдившего заморожен.
    pub folded: bool,
    pub hole_cards: Vec<Card>,
}

impl PokerPlayer {
    fn new(id: PlayerId, chips: Chips) -> Self {
        Self {
            id,
            chips,
            bet: Chips::ZERO,
            folded: false,
            hole_cards: Vec::new(),
        }
    }
}

/// Состояние покерного матча.
///
/// Инвариант: sum(chips) + pot неизменна до `settle`.
/// Банк и общие карты растут монотонно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerState {
    pub stage: PokerStage,
    /// Игроки в порядке мест в комнате.
    pub players: Vec<PokerPlayer>,
    /// Общие карты (0 → 5).
    pub community: Vec<Card>,
    pub pot: Chips,
    /// Текущая целевая ставка улицы.
    pub current_bet: Chips,
    /// Чей ход — индекс в `players`. Выставляется сессией явно.
    pub turn_idx: usize,
}

impl PokerState {
    pub fn new(player_order: &[PlayerId], starting_chips: Chips) -> Self {
        Self {
            stage: PokerStage::PreFlop,
            players: player_order
                .iter()
                .map(|id| PokerPlayer::new(*id, starting_chips))
                .collect(),
            community: Vec::new(),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            turn_idx: 0,
        }
    }

    pub fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    pub fn player(&self, player: PlayerId) -> Option<&PokerPlayer> {
        self.players.iter().find(|p| p.id == player)
    }

    fn player_mut(&mut self, player: PlayerId) -> Result<&mut PokerPlayer, PokerError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player)
            .ok_or(PokerError::PlayerNotInMatch(player))
    }

    /// Выдать игроку карманные карты.
    pub fn deal_hole(&mut self, player: PlayerId, cards: [Card; 2]) -> Result<(), PokerError> {
        let p = self.player_mut(player)?;
        p.hole_cards = cards.to_vec();
        Ok(())
    }

    /// Поставить фишки. Сумма сверх стека кламптся до стека (all-in).
    /// Возвращает реально внесённую сумму; она уходит из стека в банк,
    /// и если новая ставка игрока превысила целевую — целевая растёт.
    pub fn bet(&mut self, player: PlayerId, amount: Chips) -> Result<Chips, PokerError> {
        let p = self.player_mut(player)?;
        if p.folded {
            return Err(PokerError::PlayerFolded(player));
        }
        let real = amount.min(p.chips);
        p.chips -= real;
        p.bet += real;
        let new_bet = p.bet;
        self.pot += real;
        if new_bet > self.current_bet {
            self.current_bet = new_bet;
        }
        Ok(real)
    }

    /// Фолд. Повторный фолд — ошибка, стек больше не трогается.
    pub fn fold(&mut self, player: PlayerId) -> Result<(), PokerError> {
        let p = self.player_mut(player)?;
        if p.folded {
            return Err(PokerError::PlayerFolded(player));
        }
        p.folded = true;
        Ok(())
    }

    /// Открыть флоп (3 карты), стадия PreFlop → Flop.
    pub fn reveal_flop(&mut self, deck: &mut Deck) -> Result<(), PokerError> {
        self.reveal(deck, PokerStage::PreFlop, PokerStage::Flop, 3)
    }

    /// Открыть тёрн (1 карта), стадия Flop → Turn.
    pub fn reveal_turn(&mut self, deck: &mut Deck) -> Result<(), PokerError> {
        self.reveal(deck, PokerStage::Flop, PokerStage::Turn, 1)
    }

    /// Открыть ривер (1 карта), стадия Turn → River.
    pub fn reveal_river(&mut self, deck: &mut Deck) -> Result<(), PokerError> {
        self.reveal(deck, PokerStage::Turn, PokerStage::River, 1)
    }

    fn reveal(
        &mut self,
        deck: &mut Deck,
        expect: PokerStage,
        next: PokerStage,
        count: usize,
    ) -> Result<(), PokerError> {
        if self.stage != expect {
            return Err(PokerError::WrongStage);
        }
        for _ in 0..count {
            let card = deck.draw_one().ok_or(PokerError::EmptyDeck)?;
            self.community.push(card);
        }
        self.stage = next;
        Ok(())
    }

    /// River → Showdown (карт больше не открываем).
    pub fn enter_showdown(&mut self) -> Result<(), PokerError> {
        if self.stage != PokerStage::River {
            return Err(PokerError::WrongStage);
        }
        self.stage = PokerStage::Showdown;
        Ok(())
    }

    /// Сбросить ставки улицы перед новым кругом торговли.
    pub fn reset_street_bets(&mut self) {
        for p in &mut self.players {
            p.bet = Chips::ZERO;
        }
        self.current_bet = Chips::ZERO;
    }

    /// Отдать банк победителю и завершить матч.
    pub fn settle(&mut self, winner: PlayerId) -> Result<(), PokerError> {
        if self.stage == PokerStage::Finished {
            return Err(PokerError::MatchFinished);
        }
        let pot = self.pot;
        let p = self.player_mut(winner)?;
        p.chips += pot;
        self.pot = Chips::ZERO;
        self.stage = PokerStage::Finished;
        Ok(())
    }

    /// Не сфолдившие игроки.
    pub fn active_players(&self) -> impl Iterator<Item = &PokerPlayer> {
        self.players.iter().filter(|p| !p.folded)
    }

    /// Сколько нужно доплатить игроку до текущей целевой ставки.
    pub fn to_call(&self, player: PlayerId) -> Chips {
        match self.player(player) {
            Some(p) => self.current_bet.saturating_sub(p.bet),
            None => Chips::ZERO,
        }
    }
}
