//! Сохранение и загрузка обученных моделей
//!
//! Имя файла несет регион, тип модели и версию библиотеки, с которой
//! модель была сохранена:
//! `{region}_{model_name}_{library}-version-{version}.json`.
//! Несовпадение версии при загрузке только логируется.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub const MODEL_LIBRARY_TAG: &str = "tell-ml";
pub const MODEL_FORMAT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MODEL_FILE_EXTENSION: &str = "json";

/// Происхождение модели, закодированное в имени файла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProvenance {
    pub region: String,
    pub model_name: String,
    pub library: String,
    pub version: String,
}

impl ModelProvenance {
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}-version-{}.{}",
            self.region, self.model_name, self.library, self.version, MODEL_FILE_EXTENSION
        )
    }

    /// Разбор имени файла. Имя модели может содержать `_`, регион и тег
    /// библиотеки - нет.
    pub fn parse(path: impl AsRef<Path>) -> Option<Self> {
        let stem = path.as_ref().file_stem()?.to_str()?;
        let (head, version) = stem.rsplit_once("-version-")?;
        let (rest, library) = head.rsplit_once('_')?;
        let (region, model_name) = rest.split_once('_')?;

        if region.is_empty() || model_name.is_empty() || library.is_empty() || version.is_empty() {
            return None;
        }

        Some(Self {
            region: region.to_string(),
            model_name: model_name.to_string(),
            library: library.to_string(),
            version: version.to_string(),
        })
    }
}

/// Версия из имени файла: все после последнего `-` в имени без расширения
pub fn saved_version(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.rsplit('-').next().unwrap_or_default().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub saved: String,
    pub running: String,
}

impl VersionCheck {
    pub fn is_match(&self) -> bool {
        self.saved == self.running
    }
}

#[derive(Debug, Clone)]
pub struct ModelStore {
    library: String,
    version: String,
}

impl ModelStore {
    pub fn new(library: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            version: version.into(),
        }
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn provenance(&self, region: &str, model_name: &str) -> ModelProvenance {
        ModelProvenance {
            region: region.to_string(),
            model_name: model_name.to_string(),
            library: self.library.clone(),
            version: self.version.clone(),
        }
    }

    /// Сохраняет модель в `output_directory`. Существующий файл
    /// перезаписывается, каталог должен существовать.
    pub fn save<M: Serialize>(
        &self,
        region: &str,
        model: &M,
        model_name: &str,
        output_directory: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let basename = self.provenance(region, model_name).file_name();
        let output_file = output_directory.as_ref().join(basename);

        let mut writer = BufWriter::new(File::create(&output_file)?);
        serde_json::to_writer(&mut writer, model)?;
        writer.flush()?;

        tracing::debug!("Model saved to {}", output_file.display());
        Ok(output_file)
    }

    pub fn check_version(&self, model_file: impl AsRef<Path>) -> VersionCheck {
        VersionCheck {
            saved: saved_version(model_file),
            running: self.version.clone(),
        }
    }

    /// Загружает модель. Несовпадение версий не мешает загрузке,
    /// ошибки десериализации возвращаются как есть.
    pub fn load<M: DeserializeOwned>(&self, model_file: impl AsRef<Path>) -> Result<M> {
        let model_file = model_file.as_ref();

        let check = self.check_version(model_file);
        if !check.is_match() {
            tracing::warn!(
                "Incompatible {} version for saved model ({}) and current version ({})",
                self.library,
                check.saved,
                check.running
            );
        }

        let reader = BufReader::new(File::open(model_file)?);
        let model = serde_json::from_reader(reader)?;

        tracing::debug!("Model loaded from {}", model_file.display());
        Ok(model)
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new(MODEL_LIBRARY_TAG, MODEL_FORMAT_VERSION)
    }
}

pub fn save_model<M: Serialize>(
    region: &str,
    model: &M,
    model_name: &str,
    output_directory: impl AsRef<Path>,
) -> Result<PathBuf> {
    ModelStore::default().save(region, model, model_name, output_directory)
}

pub fn load_model<M: DeserializeOwned>(model_file: impl AsRef<Path>) -> Result<M> {
    ModelStore::default().load(model_file)
}
