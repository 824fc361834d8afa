pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{JsonFileStore, MemoryStore};
pub use app::{build_service, AnyStore};
pub use config::TomlConfig;
pub use domain::{
    context::Context,
    model::{Record, User},
    ports::Store,
    services::UserService,
};
pub use utils::error::{AppError, Result, StoreError};
