//! Common types used throughout the iipcast pipeline.
//!
//! This module defines the feature matrix handed to every estimator, the
//! period label type and the qualitative correlation buckets.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{IipcastError, Result};

/// A reporting period label such as `"Jun 2024"`.
///
/// Labels are matched exactly and never parsed as calendar dates.
pub type Period = String;

/// Indicator observations laid out as rows (periods) by columns (indicators).
///
/// The matrix owns its column names so that estimators and renderers can
/// refer back to the indicator each coefficient belongs to.
///
/// # Example
///
/// ```
/// use iipcast_traits::FeatureMatrix;
///
/// let x = FeatureMatrix::from_rows(
///     vec!["Retail Sales Data".to_string()],
///     &[vec![101.0], vec![103.5]],
/// )
/// .unwrap();
/// assert_eq!(x.nrows(), 2);
/// assert_eq!(x.ncols(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureMatrix {
    /// Creates a matrix from column names and a values array.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] when the number of names does not
    /// match the number of columns or a value is not finite.
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(IipcastError::InvalidData(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                values.ncols()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(IipcastError::InvalidData(
                "feature matrix contains non-finite values".to_string(),
            ));
        }
        Ok(Self { columns, values })
    }

    /// Creates a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] when rows have differing lengths.
    pub fn from_rows(columns: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = columns.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(IipcastError::InvalidData(format!(
                "row has {} values, expected {}",
                bad.len(),
                ncols
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let values = Array2::from_shape_vec((rows.len(), ncols), flat)
            .map_err(|e| IipcastError::InvalidData(e.to_string()))?;
        Self::new(columns, values)
    }

    /// Column (indicator) names in matrix order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The underlying values.
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of observations.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of indicators.
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Whether the matrix holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Returns a copy of row `index`, if present.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.nrows()).then(|| self.values.row(index).to_vec())
    }

    /// Returns all rows as vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

/// Qualitative strength of a correlation coefficient.
///
/// Thresholds: `> 0.8` strong positive, `(0.3, 0.8]` slight positive,
/// `[-0.3, 0.3]` neutral, `[-0.8, -0.3)` slight negative, `< -0.8` strong
/// negative. Boundary values fall into the milder bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationBucket {
    /// Coefficient above 0.8.
    StrongPositive,
    /// Coefficient in (0.3, 0.8].
    SlightPositive,
    /// Coefficient in [-0.3, 0.3].
    Neutral,
    /// Coefficient in [-0.8, -0.3).
    SlightNegative,
    /// Coefficient below -0.8.
    StrongNegative,
}

impl CorrelationBucket {
    /// Every bucket, strongest positive first.
    pub const ALL: [Self; 5] = [
        Self::StrongPositive,
        Self::SlightPositive,
        Self::Neutral,
        Self::SlightNegative,
        Self::StrongNegative,
    ];

    /// Classifies a coefficient. Non-finite input is treated as neutral.
    ///
    /// # Example
    ///
    /// ```
    /// use iipcast_traits::CorrelationBucket;
    ///
    /// assert_eq!(CorrelationBucket::classify(0.85), CorrelationBucket::StrongPositive);
    /// assert_eq!(CorrelationBucket::classify(0.8), CorrelationBucket::SlightPositive);
    /// assert_eq!(CorrelationBucket::classify(-0.3), CorrelationBucket::Neutral);
    /// ```
    pub fn classify(coefficient: f64) -> Self {
        if !coefficient.is_finite() {
            return Self::Neutral;
        }
        if coefficient > 0.8 {
            Self::StrongPositive
        } else if coefficient > 0.3 {
            Self::SlightPositive
        } else if coefficient >= -0.3 {
            Self::Neutral
        } else if coefficient >= -0.8 {
            Self::SlightNegative
        } else {
            Self::StrongNegative
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StrongPositive => "Strong Positive",
            Self::SlightPositive => "Slight Positive",
            Self::Neutral => "Neutral",
            Self::SlightNegative => "Slight Negative",
            Self::StrongNegative => "Strong Negative",
        }
    }
}

impl fmt::Display for CorrelationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CorrelationBucket {
    type Err = IipcastError;

    /// Accepts `StrongPositive`, `strong-positive` or `Strong Positive`.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.label().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| IipcastError::NotFound(format!("unknown correlation bucket '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_matrix_from_rows() {
        let x = FeatureMatrix::from_rows(
            vec!["a".to_string(), "b".to_string()],
            &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), 2);
        assert_eq!(x.row(1), Some(vec![3.0, 4.0]));
        assert_eq!(x.row(3), None);
        assert_eq!(x.to_rows().len(), 3);
    }

    #[test]
    fn test_feature_matrix_ragged_rows() {
        let result = FeatureMatrix::from_rows(
            vec!["a".to_string(), "b".to_string()],
            &[vec![1.0, 2.0], vec![3.0]],
        );
        assert!(matches!(result, Err(IipcastError::InvalidData(_))));
    }

    #[test]
    fn test_feature_matrix_rejects_nan() {
        let result = FeatureMatrix::from_rows(vec!["a".to_string()], &[vec![f64::NAN]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(CorrelationBucket::classify(0.81), CorrelationBucket::StrongPositive);
        assert_eq!(CorrelationBucket::classify(0.8), CorrelationBucket::SlightPositive);
        assert_eq!(CorrelationBucket::classify(0.31), CorrelationBucket::SlightPositive);
        assert_eq!(CorrelationBucket::classify(0.3), CorrelationBucket::Neutral);
        assert_eq!(CorrelationBucket::classify(0.0), CorrelationBucket::Neutral);
        assert_eq!(CorrelationBucket::classify(-0.3), CorrelationBucket::Neutral);
        assert_eq!(CorrelationBucket::classify(-0.31), CorrelationBucket::SlightNegative);
        assert_eq!(CorrelationBucket::classify(-0.8), CorrelationBucket::SlightNegative);
        assert_eq!(CorrelationBucket::classify(-0.81), CorrelationBucket::StrongNegative);
        assert_eq!(CorrelationBucket::classify(-1.0), CorrelationBucket::StrongNegative);
        assert_eq!(CorrelationBucket::classify(1.0), CorrelationBucket::StrongPositive);
    }

    #[test]
    fn test_bucket_total_over_unit_interval() {
        for step in -100..=100 {
            let c = f64::from(step) / 100.0;
            let bucket = CorrelationBucket::classify(c);
            assert!(CorrelationBucket::ALL.contains(&bucket));
        }
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(
            "StrongPositive".parse::<CorrelationBucket>().unwrap(),
            CorrelationBucket::StrongPositive
        );
        assert_eq!(
            "slight-negative".parse::<CorrelationBucket>().unwrap(),
            CorrelationBucket::SlightNegative
        );
        assert_eq!(
            "Neutral".parse::<CorrelationBucket>().unwrap(),
            CorrelationBucket::Neutral
        );
        assert!("sideways".parse::<CorrelationBucket>().is_err());
    }

    #[test]
    fn test_bucket_serde_is_kebab_case() {
        let json = serde_json::to_string(&CorrelationBucket::StrongPositive).unwrap();
        assert_eq!(json, "\"strong-positive\"");
        let bucket: CorrelationBucket = serde_json::from_str("\"slight-negative\"").unwrap();
        assert_eq!(bucket, CorrelationBucket::SlightNegative);
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(CorrelationBucket::StrongNegative.to_string(), "Strong Negative");
    }
}
