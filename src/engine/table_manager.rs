use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use log::info;
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::UserProfile;
use crate::domain::table::TableConfig;
use crate::domain::TableId;
use crate::engine::errors::EngineError;
use crate::engine::session::TableSession;
use crate::engine::RandomSource;
use crate::infra::persistence::PlayerDirectory;

/// Ошибки уровня менеджера столов (над сессией одного стола).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Стол {0} уже открыт")]
    TableExists(TableId),

    #[error("Блокировка стола повреждена")]
    Poisoned,

    /// Проброшенная ошибка из движка.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Разделяемый дескриптор сессии: вызовы по одному столу сериализуются мьютексом.
pub type SharedSession = Arc<Mutex<TableSession>>;

/// Реестр столов:
/// - хранит сессии по TableId, у каждой свой мьютекс;
/// - открывает стол вместе с первым игроком;
/// - закрывает стол, когда за ним никого не осталось.
pub struct TableManager {
    tables: RwLock<HashMap<TableId, SharedSession>>,
    directory: Arc<dyn PlayerDirectory>,
}

impl TableManager {
    pub fn new(directory: Arc<dyn PlayerDirectory>) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            directory,
        }
    }

    /// Открыть стол и посадить за него создателя.
    ///
    /// Если создатель не может сесть, стол не создаётся.
    /// Возвращает стек создателя.
    pub fn open_table(
        &self,
        table_id: TableId,
        config: TableConfig,
        rng: impl RandomSource + Send + 'static,
        creator: &UserProfile,
    ) -> Result<Chips, ManagerError> {
        let mut tables = self.tables.write().map_err(|_| ManagerError::Poisoned)?;
        if tables.contains_key(&table_id) {
            return Err(ManagerError::TableExists(table_id));
        }

        let mut session = TableSession::new(table_id, config, rng, Arc::clone(&self.directory));
        let stack = session.join(creator)?;
        tables.insert(table_id, Arc::new(Mutex::new(session)));

        info!("стол {table_id} открыт игроком {}", creator.display_name);
        Ok(stack)
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.tables
            .read()
            .map(|t| t.contains_key(&table_id))
            .unwrap_or(false)
    }

    /// Получить дескриптор сессии.
    pub fn session(&self, table_id: TableId) -> Result<SharedSession, ManagerError> {
        let tables = self.tables.read().map_err(|_| ManagerError::Poisoned)?;
        tables
            .get(&table_id)
            .cloned()
            .ok_or(ManagerError::TableNotFound(table_id))
    }

    /// Выполнить замыкание над сессией под её мьютексом.
    pub fn with_session<T>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&mut TableSession) -> T,
    ) -> Result<T, ManagerError> {
        let shared = self.session(table_id)?;
        let mut session = lock(&shared)?;
        Ok(f(&mut session))
    }

    /// Закрыть стол, если за ним никого нет. Возвращает true, если закрыт.
    pub fn close_if_empty(&self, table_id: TableId) -> Result<bool, ManagerError> {
        let mut tables = self.tables.write().map_err(|_| ManagerError::Poisoned)?;
        let empty = match tables.get(&table_id) {
            Some(shared) => lock(shared)?.is_empty(),
            None => return Err(ManagerError::TableNotFound(table_id)),
        };
        if empty {
            tables.remove(&table_id);
            info!("стол {table_id} закрыт: за ним никого не осталось");
        }
        Ok(empty)
    }

    /// Все открытые столы по возрастанию id.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self
            .tables
            .read()
            .map(|t| t.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }
}

fn lock(shared: &SharedSession) -> Result<MutexGuard<'_, TableSession>, ManagerError> {
    shared.lock().map_err(|_| ManagerError::Poisoned)
}
