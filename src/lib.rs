//! Portfolio Engine - аналитика портфеля проектов

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{EngineError, Result};
pub use models::*;
pub use preprocessing::*;
pub use types::*;
