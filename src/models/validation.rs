//! Валидация предсказаний модели по фактическим данным

use ndarray::Array1;

use crate::error::{MlError, Result};
use crate::models::metrics::{mean_absolute_percentage_error, mean_squared_error, r2_score};
use crate::types::ValidationSummary;

/// Сравнение предсказаний с фактическими значениями.
///
/// Позиции, где `y_comparison` точно равно `nodata_value`, исключаются
/// из всех метрик. MAPE и R² считаются с предсказаниями на месте
/// фактических значений: `metric(y_predicted, y_comparison)`.
pub fn validate(
    region: &str,
    y_predicted: &Array1<f64>,
    y_comparison: &Array1<f64>,
    nodata_value: f64,
) -> Result<ValidationSummary> {
    if y_predicted.len() != y_comparison.len() {
        return Err(MlError::LengthMismatch {
            expected: y_comparison.len(),
            actual: y_predicted.len(),
        });
    }

    // Удаляем no-data значения
    let (y_pred, y_comp): (Vec<f64>, Vec<f64>) = y_predicted
        .iter()
        .zip(y_comparison.iter())
        .filter(|&(_, &comp)| comp != nodata_value)
        .map(|(&pred, &comp)| (pred, comp))
        .unzip();

    if y_comp.is_empty() {
        return Err(MlError::NoValidObservations);
    }

    let y_pred = Array1::from(y_pred);
    let y_comp = Array1::from(y_comp);

    // y_comp не пуст (проверено выше), поэтому mean() всегда Some
    let rms_abs = mean_squared_error(&y_pred, &y_comp)?.sqrt();
    let rms_norm = rms_abs / y_comp.mean().ok_or(MlError::NoValidObservations)?;
    let mape = mean_absolute_percentage_error(&y_pred, &y_comp)?;
    let r2 = r2_score(&y_pred, &y_comp)?;

    tracing::info!(
        "Validation for {}: {} of {} points, RMS_ABS: {:.4}, RMS_NORM: {:.4}, MAPE: {:.4}, R2: {:.4}",
        region,
        y_comp.len(),
        y_comparison.len(),
        rms_abs,
        rms_norm,
        mape,
        r2
    );

    Ok(ValidationSummary {
        region: region.to_string(),
        rms_abs,
        rms_norm,
        mape,
        r2,
    })
}
