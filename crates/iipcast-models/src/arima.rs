//! ARIMA(p, 1, 0) on the target series.
//!
//! The series is differenced once and an AR(p) model without a constant is
//! fitted to the differences by conditional least squares. The indicator
//! matrix is ignored: the model is univariate in `y`.
//!
//! In-sample predictions are one step ahead and cover `y[1..]`; differences
//! before the start of the series are taken as zero. The forecast is the
//! one-step-ahead prediction for the period after the last observation.

use iipcast_traits::{FeatureMatrix, FittedModel, IipcastError, Regressor, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::lstsq::least_squares;

/// Configuration for [`Arima`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArimaConfig {
    /// Autoregressive order p.
    pub ar_order: usize,
}

impl Default for ArimaConfig {
    fn default() -> Self {
        Self { ar_order: 5 }
    }
}

/// ARIMA(p, 1, 0) estimator.
#[derive(Debug, Clone, Default)]
pub struct Arima {
    config: ArimaConfig,
}

impl Arima {
    /// Creates the estimator.
    pub const fn new(config: ArimaConfig) -> Self {
        Self { config }
    }

    /// Model order as `(p, d, q)`.
    pub const fn order(&self) -> (usize, usize, usize) {
        (self.config.ar_order, 1, 0)
    }
}

impl Regressor for Arima {
    fn name(&self) -> &str {
        "arima"
    }

    /// One lost to differencing, p lags, and at least one residual.
    fn min_observations(&self) -> usize {
        self.config.ar_order + 2
    }

    fn fit(&self, _x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        let (p, d, q) = self.order();
        if y.len() < self.min_observations() {
            return Err(IipcastError::InsufficientData(format!(
                "ARIMA({p},{d},{q}) needs at least {} observations, got {}",
                self.min_observations(),
                y.len()
            )));
        }

        let series = y.to_vec();
        let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

        let rows = diffs.len() - p;
        let mut design = Array2::zeros((rows, p));
        let mut target = Array1::zeros(rows);
        for (r, t) in (p..diffs.len()).enumerate() {
            for lag in 1..=p {
                design[[r, lag - 1]] = diffs[t - lag];
            }
            target[r] = diffs[t];
        }
        let phi = least_squares(design.view(), target.view());

        let fit = ArimaFit { phi, series };
        if fit.phi.iter().any(|v| !v.is_finite()) {
            return Err(IipcastError::model_fit(self.name(), "non-finite AR coefficients"));
        }
        tracing::debug!(phi = ?fit.phi.to_vec(), "ARIMA fitted");
        Ok(Box::new(fit))
    }
}

/// A fitted [`Arima`] model.
#[derive(Debug, Clone)]
pub struct ArimaFit {
    phi: Array1<f64>,
    series: Vec<f64>,
}

impl ArimaFit {
    /// AR coefficients, lag 1 first.
    pub fn ar_coefficients(&self) -> &[f64] {
        self.phi.as_slice().unwrap_or(&[])
    }

    /// Difference ending at index `t`, zero before the series starts.
    fn diff(&self, t: isize) -> f64 {
        if t < 1 {
            return 0.0;
        }
        let t = t.unsigned_abs();
        self.series
            .get(t)
            .zip(self.series.get(t - 1))
            .map_or(0.0, |(cur, prev)| cur - prev)
    }

    /// One-step-ahead prediction of `y[j]` from data up to `j - 1`.
    fn predict_at(&self, j: usize) -> f64 {
        let level = self.series[j - 1];
        let step: f64 = self
            .phi
            .iter()
            .enumerate()
            .map(|(i, phi)| phi * self.diff(j as isize - (i as isize + 1)))
            .sum();
        level + step
    }
}

impl FittedModel for ArimaFit {
    fn predict_in_sample(&self) -> Array1<f64> {
        (1..self.series.len()).map(|j| self.predict_at(j)).collect()
    }

    fn in_sample_offset(&self) -> usize {
        1
    }

    fn parameters(&self) -> Vec<(String, f64)> {
        self.ar_coefficients()
            .iter()
            .enumerate()
            .map(|(i, phi)| (format!("ar.L{}", i + 1), *phi))
            .collect()
    }

    fn predict_one(&self, _row: &[f64]) -> Result<f64> {
        Ok(self.predict_at(self.series.len()))
    }
}
