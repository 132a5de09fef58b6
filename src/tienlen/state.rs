use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::PlayerId;

use super::combination::Combination;
use super::errors::TienLenError;
use super::ordering::sort_cards;

/// Результат продвижения хода.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAdvance {
    /// Ход перешёл к следующему игроку.
    Next(PlayerId),
    /// Круг замкнулся на последнем сыгравшем: раунд нужно закрыть
    /// (`start_new_round`), право первого хода у него.
    RoundClosed,
}

/// Состояние одного матча Tiến Lên.
///
/// Инвариант: карта лежит либо ровно в одной руке, либо в текущем трике.
/// Руки только уменьшаются; финишировавший игрок из `finished` не исчезает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TienLenState {
    /// Фиксированный порядок игроков (по местам в комнате).
    pub player_order: Vec<PlayerId>,
    /// Руки игроков, отсортированные по Tiến Lên-порядку.
    pub hands: HashMap<PlayerId, Vec<Card>>,
    /// Последняя принятая комбинация на столе (или пусто).
    pub current_trick: Option<Combination>,
    /// Указатель хода — индекс в `player_order`.
    pub turn_idx: usize,
    /// Кто спасовал с момента последней очистки трика.
    pub passed: HashSet<PlayerId>,
    /// Порядок финиширования (опустошения руки).
    pub finished: Vec<PlayerId>,
    /// Кто сыграл текущий трик.
    pub last_player: Option<PlayerId>,
}

impl TienLenState {
    pub fn new(player_order: Vec<PlayerId>) -> Self {
        let hands = player_order.iter().map(|p| (*p, Vec::new())).collect();
        Self {
            player_order,
            hands,
            current_trick: None,
            turn_idx: 0,
            passed: HashSet::new(),
            finished: Vec::new(),
            last_player: None,
        }
    }

    /// Чей сейчас ход.
    pub fn current_player(&self) -> PlayerId {
        self.player_order[self.turn_idx]
    }

    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.hands.get(&player).map(|h| h.as_slice())
    }

    /// Раздать игроку стартовую руку (13 карт), отсортировав её.
    pub fn deal_hand(&mut self, player: PlayerId, mut cards: Vec<Card>) -> Result<(), TienLenError> {
        let hand = self
            .hands
            .get_mut(&player)
            .ok_or(TienLenError::PlayerNotInMatch(player))?;
        sort_cards(&mut cards);
        *hand = cards;
        Ok(())
    }

    /// Принять сыгранную комбинацию: карты уходят из руки на стол,
    /// игрок становится последним сыгравшим. Опустевшая рука добавляет
    /// игрока в порядок финиширования (повторно финишировать нельзя).
    ///
    /// Каждая сыгранная карта расходует ровно одно вхождение в руке:
    /// продублированная во входе карта не пройдёт как «пара из ничего».
    pub fn play(&mut self, player: PlayerId, combo: Combination) -> Result<(), TienLenError> {
        if self.finished.contains(&player) {
            return Err(TienLenError::AlreadyFinished(player));
        }
        let hand = self
            .hands
            .get_mut(&player)
            .ok_or(TienLenError::PlayerNotInMatch(player))?;

        // Снимаем карты с копии: при нехватке рука остаётся нетронутой.
        let mut rest = hand.clone();
        for card in &combo.cards {
            match rest.iter().position(|c| c == card) {
                Some(idx) => {
                    rest.remove(idx);
                }
                None => return Err(TienLenError::CardsNotInHand),
            }
        }
        *hand = rest;

        let emptied = hand.is_empty();
        self.current_trick = Some(combo);
        self.last_player = Some(player);
        if emptied && !self.finished.contains(&player) {
            self.finished.push(player);
        }
        Ok(())
    }

    /// Зафиксировать пас игрока в текущем раунде. Трик не меняется.
    pub fn pass_turn(&mut self, player: PlayerId) -> Result<(), TienLenError> {
        if !self.hands.contains_key(&player) {
            return Err(TienLenError::PlayerNotInMatch(player));
        }
        if self.finished.contains(&player) {
            return Err(TienLenError::AlreadyFinished(player));
        }
        self.passed.insert(player);
        Ok(())
    }

    /// Передать ход дальше по фиксированному порядку, пропуская
    /// финишировавших и спасовавших. Если первым подходящим оказывается
    /// последний сыгравший — раунд замкнулся, об этом сигнализируем явно.
    pub fn advance_turn(&mut self) -> TurnAdvance {
        let n = self.player_order.len();
        for step in 1..=n {
            let idx = (self.turn_idx + step) % n;
            let candidate = self.player_order[idx];
            if self.finished.contains(&candidate) {
                continue;
            }
            if Some(candidate) == self.last_player {
                self.turn_idx = idx;
                return TurnAdvance::RoundClosed;
            }
            if self.passed.contains(&candidate) {
                continue;
            }
            self.turn_idx = idx;
            return TurnAdvance::Next(candidate);
        }
        // Все остальные спасовали или финишировали.
        TurnAdvance::RoundClosed
    }

    /// Закрыть раунд: очистить трик и список спасовавших.
    /// Право первого хода — у последнего сыгравшего.
    pub fn start_new_round(&mut self) {
        self.current_trick = None;
        self.passed.clear();
        if let Some(leader) = self.last_player {
            if let Some(idx) = self.player_order.iter().position(|p| *p == leader) {
                self.turn_idx = idx;
            }
        }
    }
}
