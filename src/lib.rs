//! Движок Texas Hold'em на несколько мест.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, места, стол;
//! - `eval` – оценка 5-карточных рук и выбор лучшей руки из 7 карт;
//! - `engine` – раунд (стадии, очередь хода, ставки), сайд-поты, сессия стола, реестр столов;
//! - `infra` – RNG, справочник игроков с кошельками, конфигурация;
//! - `api` – типизированные команды, статус стола, ошибки для клиента.
//!
//! Логирование идёт через фасад `log`; логгер выбирает встраивающий процесс.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Card, Chips, Rank, Seat, SeatStatus, Stage, Suit, Table, TableConfig, UserProfile};
pub use engine::{EngineError, PlayerAction, PlayerActionKind, Round, TableManager, TableSession};
pub use eval::{best_hand, evaluate_five, BestHand, HandCategory, HandRank};
pub use infra::{DeterministicRng, EngineConfig, InMemoryPlayerDirectory, PlayerDirectory, SystemRng};
