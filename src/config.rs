//! Конфигурация из переменных окружения (и `.env`, если есть)

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{MlError, Result};
use crate::models::persistence::{ModelStore, MODEL_FORMAT_VERSION, MODEL_LIBRARY_TAG};

pub const DEFAULT_NODATA_VALUE: f64 = -9999.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MlConfig {
    pub nodata_value: f64,        // маркер отсутствующих наблюдений
    pub model_directory: PathBuf, // куда сохраняются модели
    pub library_tag: String,      // тег библиотеки в имени файла модели
    pub model_version: String,    // версия этой библиотеки
}

impl MlConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Сборка конфигурации из произвольного источника ключей
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Чужой тег без версии записал бы в имя файла нашу версию
        let (library_tag, model_version) = match (
            lookup("TELL_ML_LIBRARY_TAG"),
            lookup("TELL_ML_MODEL_VERSION"),
        ) {
            (None, None) => (MODEL_LIBRARY_TAG.to_string(), MODEL_FORMAT_VERSION.to_string()),
            (Some(tag), Some(version)) => (tag, version),
            (Some(tag), None) if tag == MODEL_LIBRARY_TAG => (tag, MODEL_FORMAT_VERSION.to_string()),
            (None, Some(version)) => (MODEL_LIBRARY_TAG.to_string(), version),
            (Some(tag), None) => {
                return Err(MlError::Config(format!(
                    "TELL_ML_LIBRARY_TAG={:?} requires TELL_ML_MODEL_VERSION",
                    tag
                )))
            }
        };

        Ok(Self {
            nodata_value: parse_or(&lookup, "TELL_ML_NODATA", DEFAULT_NODATA_VALUE)?,
            model_directory: lookup("TELL_ML_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            library_tag,
            model_version,
        })
    }

    pub fn model_store(&self) -> ModelStore {
        ModelStore::new(self.library_tag.clone(), self.model_version.clone())
    }

    /// Голое имя файла ищется в каталоге моделей, пути остаются как есть
    pub fn resolve_model_path(&self, model_file: impl AsRef<Path>) -> PathBuf {
        let model_file = model_file.as_ref();
        match model_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => model_file.to_path_buf(),
            _ => self.model_directory.join(model_file),
        }
    }

    /// Сохранение в каталог моделей из конфигурации
    pub fn save_model<M: Serialize>(&self, region: &str, model: &M, model_name: &str) -> Result<PathBuf> {
        self.model_store()
            .save(region, model, model_name, &self.model_directory)
    }

    pub fn load_model<M: DeserializeOwned>(&self, model_file: impl AsRef<Path>) -> Result<M> {
        self.model_store().load(self.resolve_model_path(model_file))
    }
}

impl Default for MlConfig {
    fn default() -> Self {
        Self {
            nodata_value: DEFAULT_NODATA_VALUE,
            model_directory: PathBuf::from("."),
            library_tag: MODEL_LIBRARY_TAG.to_string(),
            model_version: MODEL_FORMAT_VERSION.to_string(),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| MlError::Config(format!("{}={:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}
