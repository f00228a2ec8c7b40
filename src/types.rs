/// Типы данных для ML модуля

use chrono::NaiveDateTime;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Статистики z-нормализации, вычисленные только по обучающей выборке.
///
/// Должны храниться вместе с моделью: без них предсказания нельзя
/// вернуть в исходный масштаб.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingStats {
    pub mean_x: f64,
    pub std_x: f64,
    pub mean_y: f64,
    pub std_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledDataset {
    pub stats: ScalingStats,
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Option<Array1<f64>>, // None, если нет фактических значений
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Datetime")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Predictions")]
    pub prediction: f64,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionTable {
    pub rows: Vec<PredictionRecord>,
}

impl PredictionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Колонка предсказаний в исходном масштабе
    pub fn predictions(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.prediction).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Итоговая строка валидации модели по региону
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub region: String,
    #[serde(rename = "RMS_ABS")]
    pub rms_abs: f64,
    #[serde(rename = "RMS_NORM")]
    pub rms_norm: f64,
    #[serde(rename = "MAPE")]
    pub mape: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
}
