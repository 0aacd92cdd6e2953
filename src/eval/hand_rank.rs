use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе (от слабой к сильной).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
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
    /// Место в шкале зарезервировано, но из одной 52-карточной колоды
    /// такую руку не собрать: детектор её никогда не возвращает.
    FiveOfAKind = 10,
}

impl HandCategory {
    pub const ALL: [HandCategory; 11] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
        HandCategory::FiveOfAKind,
    ];

    fn from_id(id: u8) -> HandCategory {
        HandCategory::ALL
            .get(id as usize)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Название для статуса стола.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "HIGH CARD",
            HandCategory::OnePair => "ONE PAIR",
            HandCategory::TwoPair => "TWO PAIRS",
            HandCategory::ThreeOfAKind => "THREE OF A KIND",
            HandCategory::Straight => "STRAIGHT",
            HandCategory::Flush => "FLUSH",
            HandCategory::FullHouse => "FULL HOUSE",
            HandCategory::FourOfAKind => "FOUR OF A KIND",
            HandCategory::StraightFlush => "STRAIGHT FLUSH",
            HandCategory::RoyalFlush => "ROYAL FLUSH",
            HandCategory::FiveOfAKind => "FIVE OF A KIND",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Сила 5-карточной руки, упакованная в одно число.
///
/// Схема кодирования (u32):
///   [категория:4 бита][k0:4][k1:4][k2:4][k3:4][k4:4]
/// где k0..k4 – значения рангов для тай-брейка в порядке значимости
/// (неиспользуемые позиции = 0). Сравнение двух HandRank как чисел
/// даёт полный порядок силы рук, равенство = точная ничья.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

impl HandRank {
    /// Собрать HandRank из категории и ключей тай-брейка.
    pub fn from_parts(category: HandCategory, keys: [u8; 5]) -> Self {
        let mut value = (category as u32 & 0x0F) << 20;
        for (i, k) in keys.iter().enumerate() {
            value |= ((*k as u32) & 0x0F) << (16 - 4 * i);
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Ключи тай-брейка (0 – позиция не используется).
    pub fn keys(&self) -> [u8; 5] {
        let mut keys = [0u8; 5];
        for (i, k) in keys.iter_mut().enumerate() {
            *k = ((self.0 >> (16 - 4 * i)) & 0x0F) as u8;
        }
        keys
    }

    /// Старшая карта стрита (для стрита и стрит-флеша).
    /// Для колеса A2345 это пятёрка.
    pub fn straight_high(&self) -> Option<Rank> {
        match self.category() {
            HandCategory::Straight | HandCategory::StraightFlush => Rank::from_value(self.keys()[0]),
            HandCategory::RoyalFlush => Some(Rank::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    rank.category().name().to_string()
}
