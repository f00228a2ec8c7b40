/// Работа с обученными моделями: сохранение, метрики, валидация

pub mod metrics;
pub mod persistence;
pub mod validation;

pub use persistence::{load_model, save_model, ModelProvenance, ModelStore, VersionCheck};
pub use validation::validate;
