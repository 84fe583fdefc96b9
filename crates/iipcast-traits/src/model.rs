//! Regressor traits for fitting industry-index models.
//!
//! A [`Regressor`] is an unfitted estimator configuration. Fitting it on a
//! feature matrix and target vector yields a [`FittedModel`] that owns its
//! in-sample predictions and can forecast from a new indicator row.

use std::fmt;

use ndarray::Array1;

use crate::{FeatureMatrix, Result};

/// An estimator that can be fitted on indicator observations.
///
/// Implementations must be thread-safe (`Send + Sync`) so that boxed
/// regressors can be stored in engine configuration.
///
/// # Example
///
/// ```no_run
/// use iipcast_traits::{FeatureMatrix, FittedModel, Regressor, Result};
/// use ndarray::Array1;
///
/// #[derive(Debug)]
/// struct LastValue(f64, usize);
///
/// impl FittedModel for LastValue {
///     fn predict_in_sample(&self) -> Array1<f64> {
///         Array1::from_elem(self.1, self.0)
///     }
///
///     fn predict_one(&self, _row: &[f64]) -> Result<f64> {
///         Ok(self.0)
///     }
/// }
///
/// struct Naive;
///
/// impl Regressor for Naive {
///     fn name(&self) -> &str {
///         "naive"
///     }
///
///     fn min_observations(&self) -> usize {
///         1
///     }
///
///     fn fit(&self, _x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
///         Ok(Box::new(LastValue(y[y.len() - 1], y.len())))
///     }
/// }
/// ```
pub trait Regressor: Send + Sync {
    /// Short identifier used in reports and logs, e.g. `"linear"`.
    fn name(&self) -> &str;

    /// Minimum number of aligned observations required to fit.
    fn min_observations(&self) -> usize;

    /// Fits the estimator on `x` (one row per period) and `y`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IipcastError::InsufficientData`] when fewer than
    /// [`Regressor::min_observations`] rows are supplied, and
    /// [`crate::IipcastError::ModelFit`] when the fit degenerates.
    fn fit(&self, x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>>;
}

/// A fitted estimator.
pub trait FittedModel: Send + Sync + fmt::Debug {
    /// Predictions for the training periods starting at
    /// [`FittedModel::in_sample_offset`].
    fn predict_in_sample(&self) -> Array1<f64>;

    /// Index of the first training period covered by
    /// [`FittedModel::predict_in_sample`].
    ///
    /// Models that need a lagged value before they can predict start later
    /// than zero.
    fn in_sample_offset(&self) -> usize {
        0
    }

    /// Named fitted parameters for reporting, e.g. `("intercept", 3.2)`.
    ///
    /// Models without a compact parameter set return nothing.
    fn parameters(&self) -> Vec<(String, f64)> {
        Vec::new()
    }

    /// Forecasts the next period's index from one indicator row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IipcastError::InvalidData`] when the row width does
    /// not match the training matrix.
    fn predict_one(&self, row: &[f64]) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IipcastError;

    #[derive(Debug)]
    struct MeanFit {
        mean: f64,
        len: usize,
    }

    impl FittedModel for MeanFit {
        fn predict_in_sample(&self) -> Array1<f64> {
            Array1::from_elem(self.len, self.mean)
        }

        fn predict_one(&self, _row: &[f64]) -> Result<f64> {
            Ok(self.mean)
        }
    }

    struct MeanRegressor;

    impl Regressor for MeanRegressor {
        fn name(&self) -> &str {
            "mean"
        }

        fn min_observations(&self) -> usize {
            2
        }

        fn fit(&self, _x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
            if y.len() < self.min_observations() {
                return Err(IipcastError::InsufficientData("need two rows".into()));
            }
            Ok(Box::new(MeanFit {
                mean: y.mean().unwrap_or(f64::NAN),
                len: y.len(),
            }))
        }
    }

    fn matrix(rows: usize) -> FeatureMatrix {
        FeatureMatrix::from_rows(
            vec!["a".to_string()],
            &(0..rows).map(|i| vec![i as f64]).collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_regressor_fit_and_predict() {
        let y = Array1::from_vec(vec![1.0, 3.0]);
        let fitted = MeanRegressor.fit(&matrix(2), &y).unwrap();
        assert_eq!(fitted.in_sample_offset(), 0);
        assert!(fitted.parameters().is_empty());
        assert_eq!(fitted.predict_in_sample().to_vec(), vec![2.0, 2.0]);
        assert_eq!(fitted.predict_one(&[7.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_regressor_insufficient_data() {
        let y = Array1::from_vec(vec![1.0]);
        let result = MeanRegressor.fit(&matrix(1), &y);
        assert!(matches!(result, Err(IipcastError::InsufficientData(_))));
    }

    #[test]
    fn test_regressor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Regressor>();
        assert_send_sync::<dyn FittedModel>();
    }
}
