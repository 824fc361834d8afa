use crate::adapters::{JsonFileStore, MemoryStore};
use crate::config::toml_config::{StoreBackend, StoreConfig, TomlConfig};
use crate::domain::model::User;
use crate::domain::ports::Store;
use crate::domain::services::UserService;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation;
use async_trait::async_trait;

/// The backend picked at start-up. Keeps the service statically typed while
/// the choice itself comes from configuration.
#[derive(Debug)]
pub enum AnyStore {
    Memory(MemoryStore<User>),
    File(JsonFileStore<User>),
}

impl AnyStore {
    pub fn backend(&self) -> StoreBackend {
        match self {
            AnyStore::Memory(_) => StoreBackend::Memory,
            AnyStore::File(_) => StoreBackend::File,
        }
    }
}

#[async_trait]
impl Store<User> for AnyStore {
    async fn insert(&self, record: User) -> std::result::Result<(), StoreError> {
        match self {
            AnyStore::Memory(store) => store.insert(record).await,
            AnyStore::File(store) => store.insert(record).await,
        }
    }

    async fn fetch(&self, id: &str, out: &mut User) -> std::result::Result<(), StoreError> {
        match self {
            AnyStore::Memory(store) => store.fetch(id, out).await,
            AnyStore::File(store) => store.fetch(id, out).await,
        }
    }
}

pub fn build_store(config: &StoreConfig) -> Result<AnyStore> {
    let store = match config.backend {
        StoreBackend::Memory => AnyStore::Memory(MemoryStore::new()),
        StoreBackend::File => {
            let path = validation::validate_required_field("store.path", &config.path)?;
            validation::validate_store_path("store.path", path)?;
            AnyStore::File(JsonFileStore::new(path))
        }
    };

    tracing::debug!("Using {:?} store", store.backend());
    Ok(store)
}

pub fn build_service(config: &TomlConfig) -> Result<UserService<AnyStore>> {
    let store = build_store(&config.store)?;
    Ok(UserService::new(store))
}
