use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Колода карт на одну раздачу.
///
/// Карты лежат в порядке раздачи: верх колоды – конец вектора.
/// Перемешивание один раз при создании + раздача сверху эквивалентны
/// выбору случайной оставшейся карты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Diamonds 2..A, Hearts 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Новая колода в равномерно случайном порядке.
    pub fn shuffled<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle_cards(&mut deck.cards);
        deck
    }

    /// Заранее разложенная колода: `order[0]` будет сдана первой.
    /// Нужна для тестов и реплея.
    pub fn from_deal_order(order: Vec<Card>) -> Self {
        let mut cards = order;
        cards.reverse();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Сдать одну карту. Пустая колода – нарушение инварианта раздачи.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyDeck)
    }

    /// Сжечь карту перед открытием следующей.
    pub fn skip(&mut self) -> Result<(), EngineError> {
        self.deal().map(|_| ())
    }

    /// Оставшиеся карты (в порядке снизу вверх).
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }
}
