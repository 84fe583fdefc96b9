//! Per-stock price history.

use std::path::Path;

use iipcast_traits::{IipcastError, Result};
use polars::prelude::DataFrame;

use crate::frame::{column_names, f64_values, has_column, read_csv};

/// Price history of one stock, kept as loaded.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    stock: String,
    frame: DataFrame,
}

impl PriceHistory {
    /// Loads a price CSV.
    ///
    /// # Errors
    ///
    /// Fails when the file is absent or unreadable.
    pub fn load(stock: impl Into<String>, path: &Path) -> Result<Self> {
        Ok(Self::new(stock, read_csv(path)?))
    }

    /// Wraps an already loaded frame.
    pub fn new(stock: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            stock: stock.into(),
            frame,
        }
    }

    /// Stock name.
    pub fn stock(&self) -> &str {
        &self.stock
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Column names.
    pub fn columns(&self) -> Vec<String> {
        column_names(&self.frame)
    }

    /// Last non-missing value of `column`.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when the column is absent.
    pub fn latest(&self, column: &str) -> Result<Option<f64>> {
        if !has_column(&self.frame, column) {
            return Err(IipcastError::NotFound(format!(
                "price history of '{}' has no '{column}' column",
                self.stock
            )));
        }
        Ok(f64_values(&self.frame, column)?
            .into_iter()
            .rev()
            .find_map(|v| v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_latest_skips_missing() {
        let df = df! {
            "Date" => &["2024-06-27", "2024-06-28"],
            "Close" => &[Some(5120.5), None],
        }
        .unwrap();
        let history = PriceHistory::new("Britannia", df);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest("Close").unwrap(), Some(5120.5));
        assert!(history.latest("Volume").is_err());
    }
}
