//! Leading-indicator observations for one industry.

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_traits::{IipcastError, Period, Result};
use polars::prelude::DataFrame;

use crate::frame::{f64_values, read_csv, string_values};
use crate::schema::INDICATORS;

/// Indicator name to observations, aligned with period labels.
///
/// Static files and operator-supplied files produce the same shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorTable {
    periods: Vec<Period>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl IndicatorTable {
    /// Loads an indicator CSV and validates it against `required`.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] naming `Date` or any absent
    /// indicator, [`IipcastError::NotFound`] when the file does not exist.
    pub fn load<S: AsRef<str>>(path: &Path, required: &[S]) -> Result<Self> {
        Self::from_frame(&read_csv(path)?, required)
    }

    /// Builds a table from a frame, keeping only the `required` indicators.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] naming every absent column.
    pub fn from_frame<S: AsRef<str>>(df: &DataFrame, required: &[S]) -> Result<Self> {
        INDICATORS.validate(df, required)?;

        let periods = string_values(df, INDICATORS.key)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        let mut columns = BTreeMap::new();
        for name in required {
            let name = name.as_ref();
            columns.insert(name.to_string(), f64_values(df, name)?);
        }

        Ok(Self { periods, columns })
    }

    /// Builds a table directly from labels and columns.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] when a column length differs
    /// from the number of periods.
    pub fn from_columns(
        periods: Vec<Period>,
        columns: BTreeMap<String, Vec<Option<f64>>>,
    ) -> Result<Self> {
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != periods.len()) {
            return Err(IipcastError::InvalidData(format!(
                "indicator '{name}' has {} values for {} periods",
                values.len(),
                periods.len()
            )));
        }
        Ok(Self { periods, columns })
    }

    /// Period labels in file order. Rows without a label carry `""`.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Indicator names held by the table.
    pub fn indicators(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Observations for one indicator.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// The values of `names` at `row`, or `None` when any is missing.
    pub fn row(&self, row: usize, names: &[String]) -> Option<Vec<f64>> {
        names
            .iter()
            .map(|n| self.columns.get(n).and_then(|c| c.get(row).copied().flatten()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_from_frame_keeps_required() {
        let df = df! {
            "Date" => &["Jan 2024", "Feb 2024"],
            "Retail Sales Data" => &[Some(1.0), None],
            "Agricultural Output" => &[2.0, 3.0],
            "Unrelated" => &[9.0, 9.0],
        }
        .unwrap();
        let table =
            IndicatorTable::from_frame(&df, &["Retail Sales Data", "Agricultural Output"]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.indicators().count(), 2);
        assert!(table.column("Unrelated").is_none());

        let names = vec!["Agricultural Output".to_string(), "Retail Sales Data".to_string()];
        assert_eq!(table.row(0, &names), Some(vec![2.0, 1.0]));
        assert_eq!(table.row(1, &names), None);
        assert_eq!(table.row(5, &names), None);
    }

    #[test]
    fn test_missing_indicator_column() {
        let df = df! {
            "Date" => &["Jan 2024"],
            "Retail Sales Data" => &[1.0],
        }
        .unwrap();
        let err = IndicatorTable::from_frame(&df, &["Retail Sales Data", "Agricultural Output"])
            .unwrap_err();
        assert!(err.to_string().contains("Agricultural Output"));
    }
}
