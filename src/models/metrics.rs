//! Метрики регрессии

use ndarray::Array1;

use crate::error::{MlError, Result};

fn check_lengths(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(MlError::LengthMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MlError::EmptyInput("y_true"));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let squared = (y_true - y_pred).mapv(|e| e * e);
    // пустой вход уже отсеян в check_lengths
    squared.mean().ok_or(MlError::EmptyInput("y_true"))
}

/// MAPE в долях (не в процентах). Знаменатель ограничен снизу
/// `f64::EPSILON`, поэтому нулевые `y_true` дают очень большое, но
/// конечное значение.
pub fn mean_absolute_percentage_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let ape: Array1<f64> = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (p - t).abs() / t.abs().max(f64::EPSILON))
        .collect();
    // пустой вход уже отсеян в check_lengths
    ape.mean().ok_or(MlError::EmptyInput("y_true"))
}

/// Коэффициент детерминации R².
///
/// При постоянном `y_true` возвращает 1.0 для точного совпадения и 0.0
/// иначе; для одного наблюдения значение не определено (NaN).
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    if y_true.len() < 2 {
        tracing::warn!("R^2 score is not well-defined with less than two samples");
        return Ok(f64::NAN);
    }

    // не может быть None: y_true.len() >= 2
    let mean = y_true.mean().ok_or(MlError::EmptyInput("y_true"))?;
    let ss_res = (y_true - y_pred).mapv(|e| e * e).sum();
    let ss_tot = y_true.mapv(|v| (v - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn mse_of_known_values() {
        let mse = mean_squared_error(&array![1.0, 2.0, 3.0], &array![1.0, 4.0, 0.0]).unwrap();
        assert_abs_diff_eq!(mse, 13.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn mape_divides_by_first_argument() {
        let mape = mean_absolute_percentage_error(&array![100.0, 200.0], &array![110.0, 150.0]).unwrap();
        assert_abs_diff_eq!(mape, (0.1 + 0.25) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn mape_with_zero_truth_is_finite() {
        let mape = mean_absolute_percentage_error(&array![0.0], &array![1.0]).unwrap();
        assert!(mape.is_finite());
        assert!(mape > 1e15);
    }

    #[test]
    fn r2_perfect_and_baseline() {
        let y = array![3.0, -0.5, 2.0, 7.0];
        assert_abs_diff_eq!(r2_score(&y, &y).unwrap(), 1.0, epsilon = 1e-12);

        let mean = y.mean().unwrap();
        let baseline = Array1::from_elem(4, mean);
        assert_abs_diff_eq!(r2_score(&y, &baseline).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn r2_of_known_values() {
        let r2 = r2_score(&array![3.0, -0.5, 2.0, 7.0], &array![2.5, 0.0, 2.0, 8.0]).unwrap();
        assert_abs_diff_eq!(r2, 0.9486081370449679, epsilon = 1e-12);
    }

    #[test]
    fn r2_constant_truth() {
        let y = array![5.0, 5.0, 5.0];
        assert_eq!(r2_score(&y, &y).unwrap(), 1.0);
        assert_eq!(r2_score(&y, &array![5.0, 5.0, 6.0]).unwrap(), 0.0);
    }

    #[test]
    fn r2_single_sample_is_nan() {
        assert!(r2_score(&array![1.0], &array![1.0]).unwrap().is_nan());
    }

    #[test]
    fn mismatched_and_empty_inputs_fail() {
        assert!(matches!(
            mean_squared_error(&array![1.0, 2.0], &array![1.0]),
            Err(MlError::LengthMismatch { expected: 2, actual: 1 })
        ));
        let empty = Array1::<f64>::zeros(0);
        assert!(matches!(
            r2_score(&empty, &empty),
            Err(MlError::EmptyInput(_))
        ));
    }
}
