// Application layer: builds concrete stores from configuration and drives the service.

pub mod import;
pub mod wiring;

pub use import::{import_users, load_users_file, ImportReport};
pub use wiring::{build_service, build_store, AnyStore};
