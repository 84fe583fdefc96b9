//! Declared schemas for every table the store loads.
//!
//! Each table type names its key column; callers add the data columns they
//! depend on. Validation happens once, when a table is loaded, and reports
//! every absent column at once.

use iipcast_traits::{IipcastError, Result};
use polars::prelude::DataFrame;

use crate::frame::has_column;

/// Schema of one table type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name used in error messages.
    pub table: &'static str,
    /// Column that keys each row.
    pub key: &'static str,
}

/// Industry index table: one row per period, one column per industry.
pub const INDUSTRY_INDEX: TableSchema = TableSchema {
    table: "industry index",
    key: "Date",
};

/// Leading-indicator table: one row per period, one column per indicator.
pub const INDICATORS: TableSchema = TableSchema {
    table: "leading indicators",
    key: "Date",
};

/// Correlation results: one row per stock, one column per metric.
pub const CORRELATIONS: TableSchema = TableSchema {
    table: "correlation results",
    key: "Stock",
};

/// Financial statement sheet: one row per reporting date.
pub const STATEMENTS: TableSchema = TableSchema {
    table: "financial statement",
    key: "Date",
};

impl TableSchema {
    /// Checks that `df` has the key column and every `required` column.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] naming every absent column.
    pub fn validate<S: AsRef<str>>(&self, df: &DataFrame, required: &[S]) -> Result<()> {
        let missing: Vec<&str> = std::iter::once(self.key)
            .chain(required.iter().map(AsRef::as_ref))
            .filter(|col| !has_column(df, col))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IipcastError::missing_columns(self.table, &missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_validate_ok() {
        let df = df! {
            "Date" => &["Jan 2024"],
            "Retail Sales Data" => &[1.0],
        }
        .unwrap();
        assert!(INDICATORS.validate(&df, &["Retail Sales Data"]).is_ok());
    }

    #[test]
    fn test_validate_reports_all_missing() {
        let df = df! {
            "Retail Sales Data" => &[1.0],
        }
        .unwrap();
        let err = INDICATORS
            .validate(&df, &["Retail Sales Data", "Agricultural Output"])
            .unwrap_err();
        match err {
            IipcastError::MissingColumn { table, columns } => {
                assert_eq!(table, "leading indicators");
                assert_eq!(columns, vec!["Date", "Agricultural Output"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_key_only() {
        let df = df! { "Stock" => &["ABC"] }.unwrap();
        assert!(CORRELATIONS.validate::<&str>(&df, &[]).is_ok());
        assert!(STATEMENTS.validate::<&str>(&df, &[]).is_err());
    }
}
