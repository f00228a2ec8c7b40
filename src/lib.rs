//! TELL ML - вспомогательные функции для регрессионных моделей нагрузки

pub mod config;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod types;

pub use config::MlConfig;
pub use error::{MlError, Result};
pub use models::*;
pub use preprocessing::*;
pub use types::*;
