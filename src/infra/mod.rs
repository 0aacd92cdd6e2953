//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - справочник игроков и кошельки;
//! - конфигурация.

pub mod config;
pub mod ids;
pub mod persistence;
pub mod rng;

pub use config::*;
pub use ids::*;
pub use persistence::*;
pub use rng::*;
