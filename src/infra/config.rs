use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::TableConfig;

/// Настройки кошелька: сколько выдаётся при пополнении.
///
/// Игрок получает `bonus_base + random[0, bonus_spread)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WalletConfig {
    pub bonus_base: Chips,
    pub bonus_spread: Chips,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            bonus_base: Chips(1000),
            bonus_spread: Chips(1000),
        }
    }
}

/// Полная конфигурация движка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub table: TableConfig,
    pub wallet: WalletConfig,
}

impl EngineConfig {
    /// Разобрать конфиг из JSON. Отсутствующие поля берутся по умолчанию.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
