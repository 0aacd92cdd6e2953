use core::cmp::Ordering;

use crate::domain::card::{Card, Rank};
use crate::engine::errors::EngineError;

use super::hand_rank::{HandCategory, HandRank};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Оценка строго 5-карточной комбинации.
///
/// Порядок карт на входе не важен: результат одинаков для любой перестановки.
pub fn evaluate_five(cards: &[Card]) -> Result<HandRank, EngineError> {
    if cards.len() != 5 {
        return Err(EngineError::InvalidHandSize(cards.len()));
    }

    // Подсчёт рангов.
    let mut rank_counts = [0u8; 15]; // индексы 0..14, используем 2..14
    let mut rank_mask: RankMask = 0;
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = if rank_mask.count_ones() == 5 {
        detect_straight(rank_mask)
    } else {
        None
    };

    // Список (ранг, количество): сначала по количеству, затем по рангу, оба по убыванию.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (r, rank_counts[r as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let keys = keys_of(&groups);

    if is_flush {
        if let Some(high) = straight_high {
            if high == Rank::Ace {
                // Все роял-флеши равны между собой.
                return Ok(HandRank::from_parts(HandCategory::RoyalFlush, [0; 5]));
            }
            return Ok(HandRank::from_parts(
                HandCategory::StraightFlush,
                [high.value(), 0, 0, 0, 0],
            ));
        }
    }

    let rank = match pattern.as_slice() {
        [4, 1] => HandRank::from_parts(HandCategory::FourOfAKind, keys),
        [3, 2] => HandRank::from_parts(HandCategory::FullHouse, keys),
        _ if is_flush => HandRank::from_parts(HandCategory::Flush, keys),
        _ if straight_high.is_some() => {
            let high = straight_high.map(Rank::value).unwrap_or(0);
            HandRank::from_parts(HandCategory::Straight, [high, 0, 0, 0, 0])
        }
        [3, 1, 1] => HandRank::from_parts(HandCategory::ThreeOfAKind, keys),
        [2, 2, 1] => HandRank::from_parts(HandCategory::TwoPair, keys),
        [2, 1, 1, 1] => HandRank::from_parts(HandCategory::OnePair, keys),
        _ => HandRank::from_parts(HandCategory::HighCard, keys),
    };
    Ok(rank)
}

/// Ключи тай-брейка: ранги групп в порядке значимости.
/// Для пар и сетов это сначала ранг группы, потом кикеры по убыванию.
fn keys_of(groups: &[(u8, u8)]) -> [u8; 5] {
    let mut keys = [0u8; 5];
    for (slot, (rank, _)) in keys.iter_mut().zip(groups.iter()) {
        *slot = *rank;
    }
    keys
}

/// Только категория руки.
pub fn classify(cards: &[Card]) -> Result<HandCategory, EngineError> {
    evaluate_five(cards).map(|r| r.category())
}

/// Сравнить две 5-карточные руки.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Result<Ordering, EngineError> {
    Ok(evaluate_five(a)?.cmp(&evaluate_five(b)?))
}

/// `a` строго слабее `b`. Если ни одна не слабее другой – точная ничья.
pub fn less_than(a: &[Card], b: &[Card]) -> Result<bool, EngineError> {
    Ok(compare_hands(a, b)? == Ordering::Less)
}
