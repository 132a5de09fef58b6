use crate::domain::card::{Card, Rank, Suit};

use super::hand_rank::{HandCategory, HandRank};
use super::masks::{detect_straight, rank_to_bit, RankMask};
use super::EvalError;

/// Главная функция: лучшая 5-карточная комбинация из 5–7 карт.
///
/// Перебираем все C(n,5) пятёрок (n ≤ 7 ⇒ максимум 21 вариант),
/// оцениваем каждую независимо и берём максимум по `HandRank`.
pub fn evaluate_best_hand(cards: &[Card]) -> Result<HandRank, EvalError> {
    let n = cards.len();
    if n < 5 {
        return Err(EvalError::InsufficientCards { got: n });
    }

    // Любая реальная рука упакована строго больше нуля,
    // а хотя бы одна пятёрка при n >= 5 есть всегда.
    let mut best = HandRank(0);
    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_five(&five);
                        if rank > best {
                            best = rank;
                        }
                    }
                }
            }
        }
    }

    Ok(best)
}

/// Оценка ровно пяти карт.
fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        let suit_idx = match card.suit {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    if is_flush {
        if let Some(high) = straight_high {
            let category = if high == Rank::Ace {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandRank::from_category_and_ranks(category, straight_ranks(high));
        }
    }

    // (ранг, сколько раз встречается), сортировка: count desc, rank desc.
    let mut groups: Vec<(Rank, u8)> = Vec::with_capacity(5);
    for r_val in (2usize..=14).rev() {
        if rank_counts[r_val] > 0 {
            groups.push((rank_from_value(r_val as u8), rank_counts[r_val]));
        }
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();

    if pattern == [4, 1] {
        // Каре: [ранг каре, кикер].
        let ranks = [groups[0].0, groups[1].0, Rank::Two, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::FourOfAKind, ranks);
    }

    if pattern == [3, 2] {
        // Фулл-хаус: [ранг тройки, ранг пары].
        let ranks = [groups[0].0, groups[1].0, Rank::Two, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::FullHouse, ranks);
    }

    if is_flush {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.rank.cmp(&a.rank));
        let ranks = [
            sorted[0].rank,
            sorted[1].rank,
            sorted[2].rank,
            sorted[3].rank,
            sorted[4].rank,
        ];
        return HandRank::from_category_and_ranks(HandCategory::Flush, ranks);
    }

    if let Some(high) = straight_high {
        return HandRank::from_category_and_ranks(HandCategory::Straight, straight_ranks(high));
    }

    if pattern == [3, 1, 1] {
        let ranks = [groups[0].0, groups[1].0, groups[2].0, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::ThreeOfAKind, ranks);
    }

    if pattern == [2, 2, 1] {
        let ranks = [groups[0].0, groups[1].0, groups[2].0, Rank::Two, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::TwoPair, ranks);
    }

    if pattern == [2, 1, 1, 1] {
        let ranks = [groups[0].0, groups[1].0, groups[2].0, groups[3].0, Rank::Two];
        return HandRank::from_category_and_ranks(HandCategory::OnePair, ranks);
    }

    // Старшая карта: все 5 рангов по убыванию.
    let ranks = [
        groups[0].0,
        groups[1].0,
        groups[2].0,
        groups[3].0,
        groups[4].0,
    ];
    HandRank::from_category_and_ranks(HandCategory::HighCard, ranks)
}

/// Пять рангов стрита по убыванию; wheel кодируем как 5-4-3-2-A.
fn straight_ranks(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let h = high as u8;
    [
        rank_from_value(h),
        rank_from_value(h - 1),
        rank_from_value(h - 2),
        rank_from_value(h - 3),
        rank_from_value(h - 4),
    ]
}

fn rank_from_value(v: u8) -> Rank {
    match v {
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
        _ => Rank::Ace,
    }
}
