use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::{RoundId, SeatIndex, TableId, UserId};
use crate::engine::actions::PlayerActionKind;
use crate::eval::{BestHand, HandCategory};

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новый раунд начался.
    RoundStarted {
        table_id: TableId,
        round_id: RoundId,
        dealer: SeatIndex,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: [Card; 2] },

    /// Блайнды (фактически внесённые суммы, после ограничения стеком).
    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Переход на новую стадию.
    StageChanged { stage: Stage },

    /// Открыты общие карты.
    BoardDealt { stage: Stage, cards: Vec<Card> },

    /// Лучшая комбинация игрока после открытия карт.
    BestHandUpdated {
        seat: SeatIndex,
        stage: Stage,
        category: HandCategory,
    },

    /// Действие игрока.
    PlayerActed {
        user_id: UserId,
        seat: SeatIndex,
        action: PlayerActionKind,
        stack_after: Chips,
        pot_after: Chips,
    },

    /// Игрок ушёл посреди раунда.
    SeatForcedOut { seat: SeatIndex, user_id: UserId },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        user_id: UserId,
        hole_cards: [Card; 2],
        best: BestHand,
    },

    /// Выплата из банка.
    PotAwarded {
        seat: SeatIndex,
        user_id: UserId,
        amount: Chips,
    },

    /// Игрок выбыл: стек закончился.
    SeatEliminated { seat: SeatIndex, user_id: UserId },

    /// Раунд завершён.
    RoundFinished { round_id: RoundId, table_id: TableId },

    /// Раунд прерван из-за внутренней ошибки, ставки возвращены.
    RoundAborted { round_id: RoundId, reason: String, refunded: Chips },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandEventKind> {
        self.events.iter().map(|e| &e.kind)
    }
}
