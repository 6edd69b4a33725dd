#![deny(rust_2018_idioms, unsafe_code)]

//! The in-memory connector: entity stores keyed by identifier, plus the
//! integrity enforcer that validates foreign keys before writes and runs the
//! cascade pass after a user delete.

mod error;
mod integrity;
mod store;

pub use error::{ConnectorError, ErrorKind};
pub use integrity::IntegrityEnforcer;
pub use store::DataStore;

pub type Result<T> = std::result::Result<T, ConnectorError>;
