use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::engine::errors::EngineError;

use super::evaluator::evaluate_five;
use super::hand_rank::{HandCategory, HandRank};

/// Лучшие 5 карт игрока и их сила.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestHand {
    /// Карты по возрастанию ранга.
    pub cards: [Card; 5],
    pub rank: HandRank,
}

impl BestHand {
    pub fn category(&self) -> HandCategory {
        self.rank.category()
    }
}

/// Лучшая 5-карточная рука из общих карт (минимум 3 открыты) и двух карманных.
///
/// Перебираем все C(n,5) подмножеств, n = 5..7. При равной силе остаётся
/// первое найденное подмножество.
pub fn best_hand(
    community: &[Option<Card>; 5],
    hole: &[Option<Card>; 2],
) -> Result<BestHand, EngineError> {
    let mut cards: Vec<Card> = community.iter().flatten().copied().collect();
    if cards.len() < 3 {
        return Err(EngineError::InsufficientCommunityCards(cards.len()));
    }
    for card in hole {
        cards.push(card.ok_or(EngineError::MissingHoleCards)?);
    }
    cards.sort();

    let n = cards.len();
    let mut best: Option<BestHand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_five(&five)?;
                        if best.map_or(true, |current| rank > current.rank) {
                            best = Some(BestHand { cards: five, rank });
                        }
                    }
                }
            }
        }
    }

    best.ok_or(EngineError::Internal("no 5-card combination"))
}
