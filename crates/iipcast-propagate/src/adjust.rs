//! Rescaling of precomputed correlation coefficients.
//!
//! Every coefficient of a stock is multiplied by `predicted / mean`, the
//! ratio of the forecast industry index to its historical mean. Buckets are
//! assigned from the raw coefficient, not the adjusted one.

use iipcast_data::StockCorrelationRow;
use iipcast_traits::{stats, CorrelationBucket, Result};
use serde::{Deserialize, Serialize};

/// Ratio of the forecast to the historical mean.
///
/// # Errors
///
/// Returns [`iipcast_traits::IipcastError::DivideByZero`] when `mean` is
/// zero or not finite.
pub fn ratio(predicted: f64, mean: f64) -> Result<f64> {
    stats::checked_ratio(predicted, mean)
}

/// One rescaled coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedCorrelation {
    /// Financial metric name.
    pub metric: String,
    /// Coefficient as loaded.
    pub raw: f64,
    /// `raw * ratio`.
    pub adjusted: f64,
    /// Bucket of the raw coefficient.
    pub bucket: CorrelationBucket,
}

/// Every rescaled coefficient of one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedCorrelationRow {
    /// Stock name.
    pub stock: String,
    /// Ratio applied to every coefficient.
    pub ratio: f64,
    /// Coefficients in table column order.
    pub entries: Vec<AdjustedCorrelation>,
}

impl AdjustedCorrelationRow {
    /// The adjusted entry for `metric`.
    pub fn get(&self, metric: &str) -> Option<&AdjustedCorrelation> {
        self.entries.iter().find(|e| e.metric == metric)
    }
}

/// Applies one forecast's ratio to correlation rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationAdjuster {
    predicted: f64,
    mean: f64,
    ratio: f64,
}

impl CorrelationAdjuster {
    /// Creates an adjuster for a forecast and the mean it is compared with.
    ///
    /// # Errors
    ///
    /// Fails as [`ratio`] does.
    pub fn new(predicted: f64, mean: f64) -> Result<Self> {
        Ok(Self {
            predicted,
            mean,
            ratio: ratio(predicted, mean)?,
        })
    }

    /// Forecast industry index.
    pub const fn predicted(&self) -> f64 {
        self.predicted
    }

    /// Historical mean of the index.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// `predicted / mean`.
    pub const fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Rescales every coefficient of `row`.
    pub fn adjust(&self, row: &StockCorrelationRow) -> AdjustedCorrelationRow {
        let entries = row
            .coefficients
            .iter()
            .map(|(metric, raw)| AdjustedCorrelation {
                metric: metric.clone(),
                raw: *raw,
                adjusted: raw * self.ratio,
                bucket: CorrelationBucket::classify(*raw),
            })
            .collect();

        AdjustedCorrelationRow {
            stock: row.stock.clone(),
            ratio: self.ratio,
            entries,
        }
    }
}
