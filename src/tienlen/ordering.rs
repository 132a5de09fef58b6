use std::cmp::Ordering;

use crate::domain::card::{Card, Rank, Suit};

/// Вес ранга в порядке Tiến Lên: тройка — младшая (0), двойка — старшая (12).
pub fn rank_weight(rank: Rank) -> u8 {
    match rank {
        Rank::Two => 12,
        // Three=3 → 0, ..., Ace=14 → 11.
        r => (r as u8) - 3,
    }
}

/// Вес масти: пики < трефы < бубны < червы.
pub fn suit_weight(suit: Suit) -> u8 {
    match suit {
        Suit::Spades => 0,
        Suit::Clubs => 1,
        Suit::Diamonds => 2,
        Suit::Hearts => 3,
    }
}

/// Полный вес карты: сначала ранг, при равенстве — масть.
pub fn card_weight(card: Card) -> u8 {
    rank_weight(card.rank) * 4 + suit_weight(card.suit)
}

/// Сравнение карт по правилам Tiến Lên.
pub fn cmp_cards(a: Card, b: Card) -> Ordering {
    card_weight(a).cmp(&card_weight(b))
}

/// Отсортировать карты по возрастанию (Tiến Lên-порядок).
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by(|a, b| cmp_cards(*a, *b));
}
