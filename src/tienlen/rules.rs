use std::cmp::Ordering;

use crate::domain::card::Rank;

use super::combination::{ComboKind, Combination};
use super::ordering::cmp_cards;

/// «Бомбовый» уровень комбинации:
///   1 — три пары подряд, 2 — каре, 3 — четыре пары подряд.
/// Обычные комбинации (и более длинные последовательности пар) — None.
fn bomb_tier(combo: &Combination) -> Option<u8> {
    match combo.kind {
        ComboKind::FourOfAKind => Some(2),
        ComboKind::PairSequence if combo.len() == 6 => Some(1),
        ComboKind::PairSequence if combo.len() == 8 => Some(3),
        _ => None,
    }
}

/// Одиночная двойка («свинья») — старшая карта игры, уязвимая для бомб.
fn is_single_pig(combo: &Combination) -> bool {
    combo.kind == ComboKind::Single && combo.top.rank == Rank::Two
}

/// Пара двоек.
fn is_pig_pair(combo: &Combination) -> bool {
    combo.kind == ComboKind::Pair && combo.top.rank == Rank::Two
}

/// Старшая карта `curr` строго выше старшей карты `prev`.
fn higher_top(prev: &Combination, curr: &Combination) -> bool {
    cmp_cards(curr.top, prev.top) == Ordering::Greater
}

/// Бьёт ли комбинация `curr` лежащую на столе `prev`.
///
/// Базовое правило: одинаковый тип, одинаковый размер, старшая карта выше.
/// Бомбы образуют строгий частичный порядок силы поверх базового правила:
///   - три пары подряд бьют одиночную свинью и меньшие три пары;
///   - каре бьёт одиночную свинью, пару свиней, любые три пары
///     и меньшее каре;
///   - четыре пары подряд бьют всё перечисленное и меньшие четыре пары.
/// Отношение асимметрично: проигравшая категория не бьёт более сильную
/// ни при каких рангах карт.
pub fn can_beat(prev: &Combination, curr: &Combination) -> bool {
    if let Some(tier) = bomb_tier(curr) {
        return match tier {
            1 => {
                is_single_pig(prev)
                    || (bomb_tier(prev) == Some(1) && higher_top(prev, curr))
            }
            2 => {
                is_single_pig(prev)
                    || is_pig_pair(prev)
                    || bomb_tier(prev) == Some(1)
                    || (prev.kind == ComboKind::FourOfAKind && higher_top(prev, curr))
            }
            _ => {
                is_single_pig(prev)
                    || is_pig_pair(prev)
                    || bomb_tier(prev) == Some(1)
                    || prev.kind == ComboKind::FourOfAKind
                    || (bomb_tier(prev) == Some(3) && higher_top(prev, curr))
            }
        };
    }

    prev.kind == curr.kind && prev.len() == curr.len() && higher_top(prev, curr)
}
