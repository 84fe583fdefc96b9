//! Precomputed stock correlation results.

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_traits::{IipcastError, Result};
use polars::prelude::DataFrame;

use crate::frame::{f64_values, numeric_column_names, read_csv, string_values};
use crate::schema::CORRELATIONS;

/// Slack allowed on the [-1, 1] bound for rounding in exported files.
const COEFFICIENT_TOLERANCE: f64 = 1e-9;

/// Correlation coefficients of one stock against the industry index.
#[derive(Debug, Clone, PartialEq)]
pub struct StockCorrelationRow {
    /// Stock name as it appears in the results table.
    pub stock: String,
    /// `(metric, coefficient)` pairs in table column order.
    pub coefficients: Vec<(String, f64)>,
}

impl StockCorrelationRow {
    /// Creates a row, checking that every coefficient lies in [-1, 1].
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] naming the first offending
    /// metric.
    pub fn new(stock: impl Into<String>, coefficients: Vec<(String, f64)>) -> Result<Self> {
        let stock = stock.into();
        if let Some((metric, value)) = coefficients
            .iter()
            .find(|(_, c)| !c.is_finite() || c.abs() > 1.0 + COEFFICIENT_TOLERANCE)
        {
            return Err(IipcastError::InvalidData(format!(
                "correlation '{metric}' for stock '{stock}' is {value}, outside [-1, 1]"
            )));
        }
        Ok(Self {
            stock,
            coefficients,
        })
    }

    /// Coefficient for one metric.
    pub fn coefficient(&self, metric: &str) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|(m, _)| m == metric)
            .map(|(_, c)| *c)
    }
}

/// All stocks' correlation rows, keyed by stock name.
#[derive(Debug, Clone, Default)]
pub struct CorrelationTable {
    metrics: Vec<String>,
    rows: BTreeMap<String, StockCorrelationRow>,
}

impl CorrelationTable {
    /// Loads the correlation-results CSV.
    ///
    /// # Errors
    ///
    /// Fails when the file is absent, lacks a `Stock` column or holds a
    /// coefficient outside [-1, 1].
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_frame(&read_csv(path)?)
    }

    /// Builds the table from a frame with a `Stock` column and one numeric
    /// column per correlation metric.
    ///
    /// # Errors
    ///
    /// See [`CorrelationTable::load`].
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        CORRELATIONS.validate::<&str>(df, &[])?;

        let stocks = string_values(df, CORRELATIONS.key)?;
        let metrics: Vec<String> = numeric_column_names(df)
            .into_iter()
            .filter(|m| m != CORRELATIONS.key)
            .collect();
        let columns = metrics
            .iter()
            .map(|m| f64_values(df, m))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = BTreeMap::new();
        for (i, stock) in stocks.into_iter().enumerate() {
            let Some(stock) = stock.filter(|s| !s.is_empty()) else {
                tracing::warn!(row = i, "skipping correlation row without a stock name");
                continue;
            };
            let coefficients = metrics
                .iter()
                .zip(&columns)
                .filter_map(|(m, col)| col[i].map(|c| (m.clone(), c)))
                .collect();
            let row = StockCorrelationRow::new(stock.clone(), coefficients)?;
            rows.insert(stock, row);
        }

        Ok(Self { metrics, rows })
    }

    /// Builds a table from already validated rows.
    pub fn from_rows(rows: Vec<StockCorrelationRow>) -> Self {
        let mut metrics: Vec<String> = Vec::new();
        for row in &rows {
            for (m, _) in &row.coefficients {
                if !metrics.contains(m) {
                    metrics.push(m.clone());
                }
            }
        }
        let rows = rows.into_iter().map(|r| (r.stock.clone(), r)).collect();
        Self { metrics, rows }
    }

    /// Metric names in column order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Stock names, sorted.
    pub fn stocks(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// The row for one stock.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when the stock has no row.
    pub fn row(&self, stock: &str) -> Result<&StockCorrelationRow> {
        self.rows.get(stock).ok_or_else(|| {
            IipcastError::NotFound(format!("no correlation results for stock '{stock}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_from_frame() {
        let df = df! {
            "Stock" => &["Britannia", "Nestle"],
            "Total Revenue/Income" => &[Some(0.85), Some(-0.2)],
            "Net Profit" => &[Some(0.4), None],
        }
        .unwrap();
        let table = CorrelationTable::from_frame(&df).unwrap();
        assert_eq!(table.metrics(), ["Total Revenue/Income", "Net Profit"]);
        assert_eq!(table.stocks().collect::<Vec<_>>(), vec!["Britannia", "Nestle"]);

        let nestle = table.row("Nestle").unwrap();
        assert_eq!(nestle.coefficients.len(), 1);
        assert_eq!(nestle.coefficient("Total Revenue/Income"), Some(-0.2));
        assert_eq!(nestle.coefficient("Net Profit"), None);
    }

    #[test]
    fn test_out_of_range_coefficient_fails_loudly() {
        let df = df! {
            "Stock" => &["Britannia"],
            "Total Revenue/Income" => &[1.4],
        }
        .unwrap();
        let err = CorrelationTable::from_frame(&df).unwrap_err();
        assert!(matches!(err, IipcastError::InvalidData(_)));
        assert!(err.to_string().contains("Britannia"));
    }

    #[test]
    fn test_unknown_stock() {
        let table = CorrelationTable::from_rows(vec![
            StockCorrelationRow::new("Britannia", vec![("Net Profit".into(), 0.5)]).unwrap(),
        ]);
        assert_eq!(table.metrics(), ["Net Profit"]);
        assert!(table.row("Britannia").is_ok());
        assert!(matches!(table.row("Unknown"), Err(IipcastError::NotFound(_))));
    }
}
