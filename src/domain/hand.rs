use core::fmt;

use serde::{Deserialize, Serialize};

/// Стадия раунда. Строго линейная последовательность,
/// `End` – терминальная.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Init,
    CompulsoryBets,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    End,
}

impl Stage {
    /// Следующая стадия. Для `End` – снова `End`.
    pub fn next(self) -> Stage {
        match self {
            Stage::Init => Stage::CompulsoryBets,
            Stage::CompulsoryBets => Stage::Preflop,
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River => Stage::Showdown,
            Stage::Showdown | Stage::End => Stage::End,
        }
    }

    /// Стадия ждёт действия игрока.
    pub fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }

    /// Сколько общих карт открывается при входе в стадию.
    pub fn community_cards_to_deal(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Init => "Init",
            Stage::CompulsoryBets => "Compulsory Bets",
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
            Stage::End => "End",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
