use crate::domain::card::Rank;

/// Битовая маска рангов: бит 0 — двойка, бит 12 — туз.
pub type RankMask = u16;

/// Бит одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << ((rank as u8) - 2)
}

/// Маска wheel-стрита A2345 (туз играет как младшая карта).
const WHEEL_MASK: RankMask = 0b1_0000_0000_1111;

/// Найти стрит в маске рангов; вернуть старшую карту стрита.
///
/// Проверяем окна из 5 подряд идущих бит от бродвея вниз,
/// wheel (A2345) — отдельный случай со старшей картой Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    // Старшая карта окна: от туза (бит 12) до шестёрки (бит 4).
    for high_bit in (4..=12u8).rev() {
        let window: RankMask = 0b1_1111 << (high_bit - 4);
        if rank_mask & window == window {
            return Some(bit_to_rank(high_bit));
        }
    }
    if rank_mask & WHEEL_MASK == WHEEL_MASK {
        return Some(Rank::Five);
    }
    None
}

fn bit_to_rank(bit: u8) -> Rank {
    match bit + 2 {
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
