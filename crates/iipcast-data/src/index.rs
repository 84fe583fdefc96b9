//! Industry index table (the forecasting target).

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_traits::{IipcastError, Period, Result};
use polars::prelude::DataFrame;

use crate::frame::{f64_values, numeric_column_names, read_csv, string_values};
use crate::schema::INDUSTRY_INDEX;

/// Index values of every industry, keyed by period label.
#[derive(Debug, Clone, Default)]
pub struct IndustryIndex {
    periods: Vec<Period>,
    series: BTreeMap<String, Vec<Option<f64>>>,
}

/// Ordered `(period, value)` observations for one industry.
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryIndexSeries {
    /// Industry name.
    pub industry: String,
    /// Period labels, in file order.
    pub periods: Vec<Period>,
    /// Index values aligned with `periods`; `None` where missing.
    pub values: Vec<Option<f64>>,
}

impl IndustryIndex {
    /// Loads the industry index CSV.
    ///
    /// # Errors
    ///
    /// Fails when the file is absent or lacks a `Date` column.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_frame(&read_csv(path)?)
    }

    /// Builds the index from a frame with a `Date` column and one numeric
    /// column per industry.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] without a `Date` column and
    /// [`IipcastError::InvalidData`] when a period label is empty.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        INDUSTRY_INDEX.validate::<&str>(df, &[])?;

        let periods = string_values(df, INDUSTRY_INDEX.key)?
            .into_iter()
            .enumerate()
            .map(|(row, label)| {
                label.filter(|l| !l.is_empty()).ok_or_else(|| {
                    IipcastError::InvalidData(format!("industry index row {row} has no Date"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut series = BTreeMap::new();
        for name in numeric_column_names(df) {
            let values = f64_values(df, &name)?;
            series.insert(name, values);
        }

        Ok(Self { periods, series })
    }

    /// Builds an index directly from labels and per-industry values.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] when a series length differs
    /// from the number of periods.
    pub fn from_series(
        periods: Vec<Period>,
        series: BTreeMap<String, Vec<Option<f64>>>,
    ) -> Result<Self> {
        if let Some((name, values)) = series.iter().find(|(_, v)| v.len() != periods.len()) {
            return Err(IipcastError::InvalidData(format!(
                "industry '{name}' has {} values for {} periods",
                values.len(),
                periods.len()
            )));
        }
        Ok(Self { periods, series })
    }

    /// Industry names present in the table.
    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Period labels in file order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the series for one industry.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] for an unknown industry.
    pub fn series(&self, industry: &str) -> Result<IndustryIndexSeries> {
        let values = self.series.get(industry).ok_or_else(|| {
            IipcastError::NotFound(format!("industry '{industry}' is not in the index table"))
        })?;
        Ok(IndustryIndexSeries {
            industry: industry.to_string(),
            periods: self.periods.clone(),
            values: values.clone(),
        })
    }
}

impl IndustryIndexSeries {
    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the series has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Position of `period` in the series.
    pub fn position(&self, period: &str) -> Option<usize> {
        self.periods.iter().position(|p| p == period)
    }
}
