//! Per-stock financial statements.
//!
//! Each stock owns a directory with one CSV per statement sheet. Every sheet
//! has a `Date` column of human-readable period labels (`"Jun 2024"`) that are
//! matched exactly, never parsed.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use iipcast_traits::{IipcastError, Period, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::frame::{f64_values, numeric_column_names, read_csv, string_values};
use crate::schema::STATEMENTS;

/// Statement sheet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Balance sheet.
    BalanceSheet,
    /// Income statement.
    IncomeStatement,
    /// Cash flow statement.
    CashFlow,
}

impl StatementKind {
    /// Every sheet type.
    pub const ALL: [Self; 3] = [Self::BalanceSheet, Self::IncomeStatement, Self::CashFlow];

    /// Sheet name, also the CSV file stem.
    pub const fn sheet_name(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "BalanceSheet",
            Self::IncomeStatement => "IncomeStatement",
            Self::CashFlow => "CashFlow",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for StatementKind {
    type Err = IipcastError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "balancesheet" | "balance" => Ok(Self::BalanceSheet),
            "incomestatement" | "income" => Ok(Self::IncomeStatement),
            "cashflow" | "cash" => Ok(Self::CashFlow),
            _ => Err(IipcastError::NotFound(format!("unknown statement sheet '{s}'"))),
        }
    }
}

/// Named numeric fields of one statement row.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatementSnapshot {
    /// Stock name.
    pub stock: String,
    /// Sheet the row came from.
    pub kind: StatementKind,
    /// Reporting period label.
    pub date: Period,
    /// `(field, value)` pairs in sheet column order; empty cells are omitted.
    pub fields: Vec<(String, f64)>,
}

impl FinancialStatementSnapshot {
    /// Value of one field.
    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields.iter().find(|(f, _)| f == name).map(|(_, v)| *v)
    }
}

/// All loaded sheets of one stock.
#[derive(Debug, Clone, Default)]
pub struct FinancialStatements {
    stock: String,
    sheets: BTreeMap<StatementKind, DataFrame>,
}

impl FinancialStatements {
    /// Loads every sheet present in `dir`. Absent sheets are skipped.
    ///
    /// # Errors
    ///
    /// Fails when a present sheet cannot be read or lacks a `Date` column.
    pub fn load(stock: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut statements = Self::new(stock);
        for kind in StatementKind::ALL {
            let path = dir.join(format!("{}.csv", kind.sheet_name()));
            if !path.is_file() {
                continue;
            }
            statements = statements.with_sheet(kind, read_csv(&path)?)?;
        }
        Ok(statements)
    }

    /// Creates an empty set of statements.
    pub fn new(stock: impl Into<String>) -> Self {
        Self {
            stock: stock.into(),
            sheets: BTreeMap::new(),
        }
    }

    /// Adds a validated sheet.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] without a `Date` column.
    pub fn with_sheet(mut self, kind: StatementKind, df: DataFrame) -> Result<Self> {
        STATEMENTS
            .validate::<&str>(&df, &[])
            .map_err(|e| match e {
                IipcastError::MissingColumn { table, columns } => IipcastError::MissingColumn {
                    table: format!("{table} {kind} of '{}'", self.stock),
                    columns,
                },
                other => other,
            })?;
        self.sheets.insert(kind, df);
        Ok(self)
    }

    /// Stock name.
    pub fn stock(&self) -> &str {
        &self.stock
    }

    /// Sheets available for this stock.
    pub fn kinds(&self) -> impl Iterator<Item = StatementKind> + '_ {
        self.sheets.keys().copied()
    }

    /// Picks the last row of `kind` whose `Date` equals `date`.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when the sheet is absent or no row
    /// carries the label.
    pub fn snapshot(&self, kind: StatementKind, date: &str) -> Result<FinancialStatementSnapshot> {
        let df = self.sheet(kind)?;
        let dates = string_values(df, STATEMENTS.key)?;
        let row = dates
            .iter()
            .rposition(|d| d.as_deref() == Some(date))
            .ok_or_else(|| {
                IipcastError::NotFound(format!(
                    "no {kind} row dated '{date}' for stock '{}'",
                    self.stock
                ))
            })?;

        let mut fields = Vec::new();
        for name in numeric_column_names(df) {
            if name == STATEMENTS.key {
                continue;
            }
            if let Some(value) = f64_values(df, &name)?[row] {
                fields.push((name, value));
            }
        }

        Ok(FinancialStatementSnapshot {
            stock: self.stock.clone(),
            kind,
            date: date.to_string(),
            fields,
        })
    }

    fn sheet(&self, kind: StatementKind) -> Result<&DataFrame> {
        self.sheets.get(&kind).ok_or_else(|| {
            IipcastError::NotFound(format!("stock '{}' has no {kind} sheet", self.stock))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::fs;

    fn income() -> DataFrame {
        df! {
            "Date" => &["Dec 2023", "Jun 2024", "Jun 2024"],
            "Total Revenue/Income" => &[Some(900.0), Some(1000.0), Some(1010.0)],
            "Net Profit" => &[Some(90.0), Some(100.0), None],
        }
        .unwrap()
    }

    #[test]
    fn test_snapshot_picks_last_matching_row() {
        let statements = FinancialStatements::new("Britannia")
            .with_sheet(StatementKind::IncomeStatement, income())
            .unwrap();
        let snap = statements
            .snapshot(StatementKind::IncomeStatement, "Jun 2024")
            .unwrap();
        assert_eq!(snap.field("Total Revenue/Income"), Some(1010.0));
        // empty cell omitted
        assert_eq!(snap.field("Net Profit"), None);
        assert_eq!(snap.fields.len(), 1);
    }

    #[test]
    fn test_snapshot_missing_date_is_not_found() {
        let statements = FinancialStatements::new("Britannia")
            .with_sheet(StatementKind::IncomeStatement, income())
            .unwrap();
        let result = statements.snapshot(StatementKind::IncomeStatement, "Mar 2025");
        assert!(matches!(result, Err(IipcastError::NotFound(_))));

        let result = statements.snapshot(StatementKind::CashFlow, "Jun 2024");
        assert!(matches!(result, Err(IipcastError::NotFound(_))));
    }

    #[test]
    fn test_sheet_without_date_rejected() {
        let df = df! { "Net Profit" => &[1.0] }.unwrap();
        let err = FinancialStatements::new("Nestle")
            .with_sheet(StatementKind::BalanceSheet, df)
            .unwrap_err();
        assert!(err.to_string().contains("BalanceSheet"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("IncomeStatement.csv"),
            "Date,Total Revenue/Income,Net Profit\nDec 2023,900,90\nJun 2024,1000,100\n",
        )
        .unwrap();
        let statements = FinancialStatements::load("Britannia", dir.path()).unwrap();
        assert_eq!(
            statements.kinds().collect::<Vec<_>>(),
            vec![StatementKind::IncomeStatement]
        );
        let snap = statements
            .snapshot(StatementKind::IncomeStatement, "Dec 2023")
            .unwrap();
        assert_eq!(snap.field("Net Profit"), Some(90.0));
    }

    #[test]
    fn test_statement_kind_parse() {
        assert_eq!(
            "IncomeStatement".parse::<StatementKind>().unwrap(),
            StatementKind::IncomeStatement
        );
        assert_eq!(
            "cash-flow".parse::<StatementKind>().unwrap(),
            StatementKind::CashFlow
        );
        assert!("ledger".parse::<StatementKind>().is_err());
    }
}
