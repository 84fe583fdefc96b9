//! Polars helpers for reading CSV tables and extracting typed columns.

use std::path::Path;

use iipcast_traits::{IipcastError, Result};
use polars::prelude::*;

/// Reads a headed CSV file into a DataFrame.
///
/// A missing file is reported as [`IipcastError::NotFound`] so callers can
/// distinguish absent data from malformed data.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IipcastError::NotFound(format!(
            "file {} does not exist",
            path.display()
        )));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Whether `df` has a column called `name`.
pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Column names in frame order.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Names of every numeric column, in frame order.
pub(crate) fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric()
}

/// Extracts a column as floats. Nulls and NaN become `None`.
pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// Extracts a column as trimmed strings, whatever its inferred dtype.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_and_columns() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Date,Sales,Note").unwrap();
        writeln!(file, "Jan 2024,10.5,a").unwrap();
        writeln!(file, "Feb 2024,,b").unwrap();
        file.flush().unwrap();

        let df = read_csv(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert!(has_column(&df, "Sales"));
        assert!(!has_column(&df, "Volume"));
        assert_eq!(column_names(&df), vec!["Date", "Sales", "Note"]);
        assert_eq!(numeric_column_names(&df), vec!["Sales"]);
        assert_eq!(f64_values(&df, "Sales").unwrap(), vec![Some(10.5), None]);
        assert_eq!(
            string_values(&df, "Date").unwrap(),
            vec![Some("Jan 2024".to_string()), Some("Feb 2024".to_string())]
        );
    }

    #[test]
    fn test_integer_column_casts_to_float() {
        let df = df! {
            "Units" => &[1i64, 2, 3],
        }
        .unwrap();
        assert_eq!(
            f64_values(&df, "Units").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_every_integer_width_is_numeric() {
        let df = df! {
            "Date" => &["Jan 2024", "Feb 2024"],
            "Signed" => &[1i32, 2],
            "Unsigned" => &[3u32, 4],
            "Wide" => &[5u64, 6],
            "Flag" => &[true, false],
        }
        .unwrap();
        assert_eq!(numeric_column_names(&df), vec!["Signed", "Unsigned", "Wide"]);
        assert_eq!(f64_values(&df, "Unsigned").unwrap(), vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_csv(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IipcastError::NotFound(_))));
    }
}
