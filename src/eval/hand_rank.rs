use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе. 10 категорий, включая роял-флеш.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Ранг руки, упакованный в u32:
///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
/// Ранги идут от старшего кикера к младшему, поэтому обычный `Ord`
/// на u32 даёт ровно нужный тотальный порядок: сначала категория,
/// потом лексикографическое сравнение кикеров.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl HandRank {
    /// Собрать HandRank из категории и 5 рангов (от старшего к младшему).
    /// «Лишние» позиции категорий с коротким списком кикеров забиваются
    /// двойками — на сравнение внутри категории это не влияет.
    pub fn from_category_and_ranks(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().enumerate() {
            value |= ((*r as u32) & 0x0F) << (16 - 4 * i);
        }
        HandRank(value)
    }

    /// Категория руки.
    pub fn category(&self) -> HandCategory {
        match (self.0 >> 20) & 0x0F {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::RoyalFlush,
        }
    }

    /// Пять рангов-кикеров (от старшего к младшему).
    pub fn ranks(&self) -> [Rank; 5] {
        let nib = |shift: u32| nibble_to_rank(((self.0 >> shift) & 0x0F) as u8);
        [nib(16), nib(12), nib(8), nib(4), nib(0)]
    }
}

fn nibble_to_rank(n: u8) -> Rank {
    match n {
        2 => Rank::Two,
        3 => Rank::Three,
        4 => Rank::Four,
        5 => Rank::Five,
        6 => Rank::Six,
        7 => Rank::Seven,
        8 => Rank::Eight,
        9 => Rank::Nine,
        10 => Rank::Ten,
        11 => Rank::Jack,
        12 => Rank::Queen,
        13 => Rank::King,
        14 => Rank::Ace,
        _ => Rank::Two, // при корректной упаковке сюда не попадаем
    }
}

/// Человекочитаемое название категории (для логов и истории матчей).
pub fn describe_hand(rank: HandRank) -> &'static str {
    match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
        HandCategory::RoyalFlush => "Royal flush",
    }
}
