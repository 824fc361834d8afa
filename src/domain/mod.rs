// Domain layer: the user model, the store port and the service built on it.
// Nothing in here knows which backend is in use.

pub mod context;
pub mod model;
pub mod ports;
pub mod services;
