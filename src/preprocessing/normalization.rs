//! Нормализация данных

#![allow(non_snake_case)]

use ndarray::{Array, Array1, Array2, Dimension};

use crate::error::{MlError, Result};
use crate::types::{ScaledDataset, ScalingStats};

/// Среднее и стандартное отклонение (ddof = 0) по всем элементам массива
fn mean_std<D: Dimension>(values: &Array<f64, D>) -> Option<(f64, f64)> {
    let mean = values.mean()?;
    let variance = values.mapv(|v| (v - mean).powi(2)).mean()?;
    Some((mean, variance.sqrt()))
}

fn z_score<D: Dimension>(values: &Array<f64, D>, mean: f64, std: f64) -> Array<f64, D> {
    values.mapv(|v| (v - mean) / std)
}

impl ScalingStats {
    /// Статистики считаются только по обучающим массивам.
    ///
    /// Нулевое отклонение не исправляется: дальнейшее деление даст inf/NaN.
    pub fn fit(X_train: &Array2<f64>, y_train: &Array1<f64>) -> Result<Self> {
        let (mean_x, std_x) = mean_std(X_train).ok_or(MlError::EmptyInput("x_train"))?;
        let (mean_y, std_y) = mean_std(y_train).ok_or(MlError::EmptyInput("y_train"))?;

        if std_x == 0.0 {
            tracing::warn!("Training features have zero variance; scaled features will not be finite");
        }
        if std_y == 0.0 {
            tracing::warn!("Training targets have zero variance; scaled targets will not be finite");
        }

        tracing::debug!(mean_x, std_x, mean_y, std_y, "Computed scaling statistics");

        Ok(Self {
            mean_x,
            std_x,
            mean_y,
            std_y,
        })
    }

    pub fn scale_x<D: Dimension>(&self, X: &Array<f64, D>) -> Array<f64, D> {
        z_score(X, self.mean_x, self.std_x)
    }

    pub fn scale_y<D: Dimension>(&self, y: &Array<f64, D>) -> Array<f64, D> {
        z_score(y, self.mean_y, self.std_y)
    }

    /// Обратное преобразование целевой переменной: v * std_y + mean_y
    pub fn unscale_y<D: Dimension>(&self, y: &Array<f64, D>) -> Array<f64, D> {
        y.mapv(|v| v * self.std_y + self.mean_y)
    }
}

pub struct DataNormalizer {
    stats: Option<ScalingStats>,
}

impl DataNormalizer {
    pub fn new() -> Self {
        Self { stats: None }
    }

    /// Нормализатор с ранее сохраненными статистиками
    pub fn from_stats(stats: ScalingStats) -> Self {
        Self { stats: Some(stats) }
    }

    pub fn stats(&self) -> Option<&ScalingStats> {
        self.stats.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.stats.is_some()
    }

    pub fn fit(&mut self, X_train: &Array2<f64>, y_train: &Array1<f64>) -> Result<ScalingStats> {
        let stats = ScalingStats::fit(X_train, y_train)?;
        self.stats = Some(stats);
        Ok(stats)
    }

    pub fn transform(
        &self,
        X_train: &Array2<f64>,
        X_test: &Array2<f64>,
        y_train: &Array1<f64>,
        y_test: Option<&Array1<f64>>,
    ) -> Result<ScaledDataset> {
        let stats = self.stats.ok_or(MlError::NotFitted)?;

        Ok(ScaledDataset {
            stats,
            x_train: stats.scale_x(X_train),
            x_test: stats.scale_x(X_test),
            y_train: stats.scale_y(y_train),
            y_test: y_test.map(|y| stats.scale_y(y)),
        })
    }

    pub fn fit_transform(
        &mut self,
        X_train: &Array2<f64>,
        X_test: &Array2<f64>,
        y_train: &Array1<f64>,
        y_test: Option<&Array1<f64>>,
    ) -> Result<ScaledDataset> {
        self.fit(X_train, y_train)?;
        self.transform(X_train, X_test, y_train, y_test)
    }
}

impl Default for DataNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Z-нормализация признаков и целевой переменной.
///
/// Среднее и отклонение берутся только из обучающих массивов и без
/// изменений применяются к тестовым, чтобы тестовые данные не влияли на
/// статистики. `y_test` нормализуется, только если передан.
pub fn scale_features(
    X_train: &Array2<f64>,
    X_test: &Array2<f64>,
    y_train: &Array1<f64>,
    y_test: Option<&Array1<f64>>,
) -> Result<ScaledDataset> {
    DataNormalizer::new().fit_transform(X_train, X_test, y_train, y_test)
}
