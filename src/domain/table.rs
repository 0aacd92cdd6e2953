use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Seat;
use crate::domain::{TableId, UserId};

/// Индекс места за столом (0..MAX_SEATS-1).
pub type SeatIndex = usize;

/// Фиксированное количество мест за столом.
pub const MAX_SEATS: usize = 10;

/// Малый блайнд.
pub const SMALL_BLIND: Chips = Chips(50);

/// Большой блайнд.
pub const BIG_BLIND: Chips = Chips(100);

/// Минимальный шаг рейза поверх колла.
pub const MIN_RAISE: Chips = Chips(100);

/// Потолок бай-ина по умолчанию.
pub const DEFAULT_BUY_IN_CAP: Chips = Chips(5000);

/// Конфиг стола.
///
/// Блайнды и минимальный рейз – константы модуля, а не настройки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub name: String,
    /// Количество слотов (не больше `MAX_SEATS`).
    pub max_seats: usize,
    /// Сколько фишек максимум можно купить при посадке.
    pub buy_in_cap: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Texas Hold'em".to_string(),
            max_seats: MAX_SEATS,
            buy_in_cap: DEFAULT_BUY_IN_CAP,
        }
    }
}

/// Стол: живёт между раундами.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<Seat>>,

    /// Указатель дилерской кнопки. Следующий раунд начнётся
    /// со следующего занятого места после него.
    pub dealer: SeatIndex,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, config: TableConfig) -> Self {
        let slots = config.max_seats.clamp(2, MAX_SEATS);
        Self {
            id,
            config,
            seats: vec![None; slots],
            dealer: 0,
        }
    }

    pub fn max_seats(&self) -> usize {
        self.seats.len()
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.seated_count() == 0
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats.get(index).map(|s| s.is_none()).unwrap_or(true)
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(index).and_then(|s| s.as_mut())
    }

    /// Найти место пользователя.
    pub fn find_user(&self, user_id: UserId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.as_ref().map(|p| p.user_id == user_id).unwrap_or(false))
    }

    pub fn first_empty_seat(&self) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.is_none())
    }

    /// Стек на месте (0 для пустого).
    pub fn stack(&self, index: SeatIndex) -> Chips {
        self.seat(index).map(|s| s.stack).unwrap_or(Chips::ZERO)
    }

    /// Следующее занятое место по часовой стрелке после `start` (не включая его).
    pub fn next_occupied_after(&self, start: SeatIndex) -> Option<SeatIndex> {
        let max = self.max_seats();
        (1..=max)
            .map(|i| (start + i) % max)
            .find(|&idx| self.seats[idx].is_some())
    }

    /// Посадить на конкретное место.
    pub fn take_seat(&mut self, index: SeatIndex, seat: Seat) {
        if let Some(slot) = self.seats.get_mut(index) {
            *slot = Some(seat);
        }
    }

    /// Освободить место, вернув того, кто там сидел.
    pub fn clear_seat(&mut self, index: SeatIndex) -> Option<Seat> {
        self.seats.get_mut(index).and_then(|s| s.take())
    }

    /// Сумма всех стеков (для проверок сохранения фишек).
    pub fn total_stacks(&self) -> Chips {
        self.seats.iter().flatten().map(|s| s.stack).sum()
    }
}
