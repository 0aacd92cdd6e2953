use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::UserId;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::config::WalletConfig;

/// Куда слать личные уведомления игроку (id приватного чата).
pub type Destination = i64;

/// Ошибки хранилища игроков.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Недостаточно средств: на кошельке {balance}, запрошено {requested}")]
    InsufficientBalance { balance: Chips, requested: Chips },

    #[error("Хранилище недоступно: {0}")]
    Unavailable(String),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        EngineError::Storage(err.to_string())
    }
}

/// Справочник игроков: регистрация и постоянный кошелёк.
///
/// Движок обращается к нему только при посадке и уходе из-за стола.
pub trait PlayerDirectory: Send + Sync {
    /// Есть ли у игрока адрес для личных уведомлений.
    fn is_registered(&self, user_id: UserId) -> Result<bool, StorageError>;

    /// Баланс кошелька (0 для неизвестного игрока).
    fn balance(&self, user_id: UserId) -> Result<Chips, StorageError>;

    /// Списать с кошелька. Возвращает новый баланс.
    fn withdraw(&self, user_id: UserId, amount: Chips) -> Result<Chips, StorageError>;

    /// Зачислить на кошелёк. Возвращает новый баланс.
    fn deposit(&self, user_id: UserId, amount: Chips) -> Result<Chips, StorageError>;
}

#[derive(Clone, Debug, Default)]
struct Account {
    destination: Option<Destination>,
    balance: Chips,
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryPlayerDirectory {
    accounts: Mutex<HashMap<UserId, Account>>,
}

impl InMemoryPlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn accounts(&self) -> Result<MutexGuard<'_, HashMap<UserId, Account>>, StorageError> {
        self.accounts
            .lock()
            .map_err(|_| StorageError::Unavailable("accounts lock poisoned".to_string()))
    }

    /// Запомнить, куда слать личные сообщения игроку.
    pub fn register(&self, user_id: UserId, destination: Destination) -> Result<(), StorageError> {
        self.accounts()?.entry(user_id).or_default().destination = Some(destination);
        Ok(())
    }

    pub fn destination(&self, user_id: UserId) -> Result<Option<Destination>, StorageError> {
        Ok(self.accounts()?.get(&user_id).and_then(|a| a.destination))
    }

    /// Пополнение кошелька: `bonus_base + random[0, bonus_spread)`.
    /// Возвращает (выдано, новый баланс).
    pub fn grant_bonus(
        &self,
        user_id: UserId,
        rng: &mut dyn RandomSource,
        config: &WalletConfig,
    ) -> Result<(Chips, Chips), StorageError> {
        let granted = config.bonus_base + Chips(rng.next_below(config.bonus_spread.0));
        let balance = self.deposit(user_id, granted)?;
        Ok((granted, balance))
    }
}

impl PlayerDirectory for InMemoryPlayerDirectory {
    fn is_registered(&self, user_id: UserId) -> Result<bool, StorageError> {
        Ok(self.destination(user_id)?.is_some())
    }

    fn balance(&self, user_id: UserId) -> Result<Chips, StorageError> {
        Ok(self
            .accounts()?
            .get(&user_id)
            .map(|a| a.balance)
            .unwrap_or(Chips::ZERO))
    }

    fn withdraw(&self, user_id: UserId, amount: Chips) -> Result<Chips, StorageError> {
        let mut accounts = self.accounts()?;
        let account = accounts.entry(user_id).or_default();
        if account.balance < amount {
            return Err(StorageError::InsufficientBalance {
                balance: account.balance,
                requested: amount,
            });
        }
        account.balance -= amount;
        Ok(account.balance)
    }

    fn deposit(&self, user_id: UserId, amount: Chips) -> Result<Chips, StorageError> {
        let mut accounts = self.accounts()?;
        let account = accounts.entry(user_id).or_default();
        account.balance += amount;
        Ok(account.balance)
    }
}
