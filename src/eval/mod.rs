//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_five(cards) -> HandRank` – сила ровно пяти карт;
//!   `best_hand(community, hole) -> BestHand` – лучшие 5 из 5..7.

pub mod best_hand;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use best_hand::{best_hand, BestHand};
pub use evaluator::{classify, compare_hands, evaluate_five, less_than};
pub use hand_rank::{describe_hand, HandCategory, HandRank};
