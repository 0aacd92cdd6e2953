//! Покерный движок: раунд, ставки, очередь хода, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `TableSession`
//! Основные операции:
//!   - `start_round` – запустить новый раунд
//!   - `apply_action` – применить действие игрока
//!   - `advance_stage` – шаг автоматических стадий
//!
//! Сам движок однопоточный; столы живут в `TableManager`,
//! где у каждого стола свой мьютекс.

pub mod actions;
pub mod errors;
pub mod hand_history;
pub mod positions;
pub mod round;
pub mod session;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::{EngineError, SeatUnavailableReason};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use round::Round;
pub use session::TableSession;
pub use side_pots::SidePot;
pub use table_manager::{ManagerError, SharedSession, TableManager};

use crate::domain::card::Card;

/// RNG интерфейс для engine.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равномерно перемешать карты.
    fn shuffle_cards(&mut self, cards: &mut [Card]);

    /// Случайное число в [0, bound). Для bound = 0 – ноль.
    fn next_below(&mut self, bound: u64) -> u64;
}
