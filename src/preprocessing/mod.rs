/// Предобработка данных

pub mod denormalization;
pub mod normalization;

pub use denormalization::unscale_features;
pub use normalization::{scale_features, DataNormalizer};
