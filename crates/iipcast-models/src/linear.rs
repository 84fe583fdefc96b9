//! Ordinary least squares regression.

use iipcast_traits::{FeatureMatrix, FittedModel, IipcastError, Regressor, Result};
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

use crate::lstsq::least_squares;

/// Configuration for [`LinearRegression`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressionConfig {
    /// Fit an intercept term (data is centered before solving).
    pub fit_intercept: bool,
}

impl Default for LinearRegressionConfig {
    fn default() -> Self {
        Self {
            fit_intercept: true,
        }
    }
}

/// Unregularized OLS over every indicator column.
///
/// Coefficients the data cannot identify are set to zero. A single
/// observation therefore yields the constant model `y`.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    config: LinearRegressionConfig,
}

impl LinearRegression {
    /// Creates the estimator.
    pub const fn new(config: LinearRegressionConfig) -> Self {
        Self { config }
    }
}

impl Regressor for LinearRegression {
    fn name(&self) -> &str {
        "linear"
    }

    fn min_observations(&self) -> usize {
        1
    }

    fn fit(&self, x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        if x.nrows() != y.len() {
            return Err(IipcastError::InvalidData(format!(
                "{} feature rows for {} targets",
                x.nrows(),
                y.len()
            )));
        }
        if y.len() < self.min_observations() {
            return Err(IipcastError::InsufficientData(
                "linear regression needs at least one observation".into(),
            ));
        }

        let values = x.values();
        let (coefficients, intercept) = if self.config.fit_intercept {
            let x_mean = values
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::zeros(values.ncols()));
            let y_mean = y.mean().unwrap_or(0.0);
            let centered_x = values - &x_mean;
            let centered_y = y - y_mean;
            let beta = least_squares(centered_x.view(), centered_y.view());
            let intercept = y_mean - x_mean.dot(&beta);
            (beta, intercept)
        } else {
            (least_squares(values.view(), y.view()), 0.0)
        };

        let fitted = values.dot(&coefficients) + intercept;
        tracing::debug!(
            intercept,
            coefficients = ?coefficients.to_vec(),
            "linear regression fitted"
        );

        Ok(Box::new(LinearFit {
            columns: x.columns().to_vec(),
            coefficients,
            intercept,
            fitted,
        }))
    }
}

/// A fitted [`LinearRegression`].
#[derive(Debug, Clone)]
pub struct LinearFit {
    columns: Vec<String>,
    coefficients: Array1<f64>,
    intercept: f64,
    fitted: Array1<f64>,
}

impl LinearFit {
    /// Indicator coefficients in column order.
    pub fn coefficients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.coefficients.iter().copied())
    }

    /// Intercept term.
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl FittedModel for LinearFit {
    fn predict_in_sample(&self) -> Array1<f64> {
        self.fitted.clone()
    }

    fn parameters(&self) -> Vec<(String, f64)> {
        std::iter::once(("intercept".to_string(), self.intercept()))
            .chain(self.coefficients().map(|(name, c)| (name.to_string(), c)))
            .collect()
    }

    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(IipcastError::InvalidData(format!(
                "forecast row has {} values, model expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }
        Ok(self.intercept + Array1::from(row.to_vec()).dot(&self.coefficients))
    }
}
