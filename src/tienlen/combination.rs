use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

use super::ordering::{rank_weight, sort_cards};

/// Тип комбинации Tiến Lên.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComboKind {
    Single,
    Pair,
    Triple,
    Straight,
    /// Последовательность пар подряд идущих рангов (≥3 пар).
    PairSequence,
    FourOfAKind,
}

/// Распознанная комбинация. Карты хранятся отсортированными
/// по возрастанию Tiến Lên-порядка, так что `top` — последняя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combination {
    pub kind: ComboKind,
    pub cards: Vec<Card>,
    /// Старшая карта комбинации — ею сравниваются равные типы.
    pub top: Card,
}

impl Combination {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Классификация набора карт. `None` — недопустимая комбинация.
///
/// Правила по размеру набора:
///   1 → Single; 2 → Pair (равный ранг); 3 → Triple или стрит;
///   4 → каре или стрит; ≥5 → стрит; чётный размер ≥6 из подряд
///   идущих пар → PairSequence. Стрит никогда не содержит двойку.
pub fn classify(cards: &[Card]) -> Option<Combination> {
    if cards.is_empty() {
        return None;
    }

    let mut sorted = cards.to_vec();
    sort_cards(&mut sorted);
    let top = *sorted.last()?;

    let kind = match sorted.len() {
        1 => ComboKind::Single,
        2 if same_rank(&sorted) => ComboKind::Pair,
        3 if same_rank(&sorted) => ComboKind::Triple,
        3 if is_run(&sorted) => ComboKind::Straight,
        4 if same_rank(&sorted) => ComboKind::FourOfAKind,
        4 if is_run(&sorted) => ComboKind::Straight,
        n if n >= 5 && is_run(&sorted) => ComboKind::Straight,
        n if n >= 6 && n % 2 == 0 && is_pair_run(&sorted) => ComboKind::PairSequence,
        _ => return None,
    };

    Some(Combination {
        kind,
        cards: sorted,
        top,
    })
}

fn same_rank(sorted: &[Card]) -> bool {
    sorted.windows(2).all(|w| w[0].rank == w[1].rank)
}

/// Подряд идущие ранги без двойки (двойка в стрит не входит).
fn is_run(sorted: &[Card]) -> bool {
    if sorted.iter().any(|c| c.rank == Rank::Two) {
        return false;
    }
    sorted
        .windows(2)
        .all(|w| rank_weight(w[1].rank) == rank_weight(w[0].rank) + 1)
}

/// Пары равных рангов, ранги пар идут подряд.
fn is_pair_run(sorted: &[Card]) -> bool {
    let pairs_consecutive = sorted
        .chunks(2)
        .all(|ch| ch.len() == 2 && ch[0].rank == ch[1].rank);
    if !pairs_consecutive {
        return false;
    }
    sorted
        .chunks(2)
        .collect::<Vec<_>>()
        .windows(2)
        .all(|w| rank_weight(w[1][0].rank) == rank_weight(w[0][0].rank) + 1)
}
