//! Statistical utility functions shared by the estimators and the
//! propagation step.

use crate::{IipcastError, Result};

/// Denominators with an absolute value below this are treated as zero.
pub const MIN_DENOMINATOR: f64 = 1e-12;

/// Arithmetic mean. Returns NaN for an empty slice.
///
/// # Examples
///
/// ```
/// use iipcast_traits::stats::mean;
///
/// assert!((mean(&[98.0, 100.0, 102.0]) - 100.0).abs() < 1e-12);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Root-mean-squared error between two equally long series.
///
/// Returns NaN when the series are empty or their lengths differ.
///
/// # Examples
///
/// ```
/// use iipcast_traits::stats::rmse;
///
/// assert_eq!(rmse(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
/// assert!((rmse(&[0.0, 0.0], &[3.0, 4.0]) - 12.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return f64::NAN;
    }
    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sse / actual.len() as f64).sqrt()
}

/// Divides `numerator` by `denominator`, refusing zero or non-finite
/// denominators.
///
/// # Errors
///
/// Returns [`IipcastError::DivideByZero`] when the denominator is zero or
/// not finite, and [`IipcastError::InvalidData`] for a non-finite numerator.
///
/// # Examples
///
/// ```
/// use iipcast_traits::stats::checked_ratio;
///
/// assert_eq!(checked_ratio(120.0, 100.0).unwrap(), 1.2);
/// assert!(checked_ratio(120.0, 0.0).is_err());
/// ```
pub fn checked_ratio(numerator: f64, denominator: f64) -> Result<f64> {
    if !denominator.is_finite() || denominator.abs() < MIN_DENOMINATOR {
        return Err(IipcastError::DivideByZero(format!(
            "cannot divide {numerator} by {denominator}"
        )));
    }
    if !numerator.is_finite() {
        return Err(IipcastError::InvalidData(format!(
            "non-finite numerator {numerator}"
        )));
    }
    Ok(numerator / denominator)
}
