//! Возврат предсказаний в исходный масштаб

use chrono::NaiveDateTime;
use ndarray::Array1;

use crate::error::{MlError, Result};
use crate::types::{PredictionRecord, PredictionTable, ScalingStats};

/// Денормализация предсказаний модели.
///
/// Предсказания и метки времени сопоставляются по позиции, регион
/// добавляется к каждой строке.
pub fn unscale_features(
    region: &str,
    stats: &ScalingStats,
    y_predicted_normalized: &Array1<f64>,
    timestamps: &[NaiveDateTime],
) -> Result<PredictionTable> {
    if y_predicted_normalized.len() != timestamps.len() {
        return Err(MlError::LengthMismatch {
            expected: timestamps.len(),
            actual: y_predicted_normalized.len(),
        });
    }

    let y_p = stats.unscale_y(y_predicted_normalized);

    let rows = timestamps
        .iter()
        .zip(y_p.iter())
        .map(|(&timestamp, &prediction)| PredictionRecord {
            timestamp,
            prediction,
            region: region.to_string(),
        })
        .collect();

    Ok(PredictionTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, NaiveDate};
    use ndarray::array;

    fn hourly(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| start + Duration::hours(i as i64)).collect()
    }

    fn stats() -> ScalingStats {
        ScalingStats {
            mean_x: 0.0,
            std_x: 1.0,
            mean_y: 1000.0,
            std_y: 250.0,
        }
    }

    #[test]
    fn rescales_and_labels_rows() {
        let timestamps = hourly(3);
        let table = unscale_features("ERCO", &stats(), &array![-1.0, 0.0, 2.0], &timestamps).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.rows.iter().all(|r| r.region == "ERCO"));
        assert_abs_diff_eq!(table.rows[0].prediction, 750.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table.rows[1].prediction, 1000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table.rows[2].prediction, 1500.0, epsilon = 1e-12);
        assert_eq!(
            table.rows.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            timestamps
        );
    }

    #[test]
    fn inverts_target_scaling() {
        let s = stats();
        let original = array![512.0, 1000.0, 1733.3];
        let scaled = s.scale_y(&original);

        let table = unscale_features("PJM", &s, &scaled, &hourly(3)).unwrap();

        for (p, o) in table.predictions().iter().zip(original.iter()) {
            assert_abs_diff_eq!(*p, *o, epsilon = 1e-9);
        }
    }

    #[test]
    fn misaligned_timestamps_are_rejected() {
        let err = unscale_features("PJM", &stats(), &array![0.0, 1.0], &hourly(3)).unwrap_err();
        assert!(matches!(
            err,
            MlError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn serializes_with_column_names() {
        let table = unscale_features("CISO", &stats(), &array![0.0], &hourly(1)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();

        let row = &json[0];
        assert_eq!(row["region"], "CISO");
        assert_eq!(row["Predictions"], 1000.0);
        assert_eq!(row["Datetime"], "2019-01-01T00:00:00");
    }
}
