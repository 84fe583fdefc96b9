//! Read-once data store.
//!
//! Every static table is loaded by [`DataStore::load`] before any pipeline
//! run and then shared by reference. Nothing is reloaded or mutated for the
//! rest of the process.
//!
//! # Directory layout
//!
//! ```text
//! <root>/iip.csv                         Date, <industry>...
//! <root>/correlations.csv                Stock, <metric>...
//! <root>/indicators/<industry>.csv       Date, <indicator>...      (optional)
//! <root>/stockdata/<stock>.csv           price history             (optional)
//! <root>/financial/<stock>/<Sheet>.csv   Date, <field>...          (optional)
//! ```
//!
//! The index and correlation files are required. An optional table that
//! fails to load is logged, recorded in [`DataStore::skipped`] and left out,
//! so one bad file only affects its own industry or stock.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use iipcast_traits::{IipcastError, Result};

use crate::catalog::IndicatorCatalog;
use crate::correlations::CorrelationTable;
use crate::index::{IndustryIndex, IndustryIndexSeries};
use crate::indicators::IndicatorTable;
use crate::prices::PriceHistory;
use crate::statements::FinancialStatements;

/// Industry index file name.
pub const INDEX_FILE: &str = "iip.csv";
/// Correlation results file name.
pub const CORRELATIONS_FILE: &str = "correlations.csv";
/// Directory of per-industry indicator tables.
pub const INDICATORS_DIR: &str = "indicators";
/// Directory of per-stock price histories.
pub const PRICES_DIR: &str = "stockdata";
/// Directory of per-stock statement directories.
pub const FINANCIAL_DIR: &str = "financial";

/// An optional table left out of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTable {
    /// File or directory that failed to load.
    pub path: PathBuf,
    /// Why it was left out.
    pub reason: String,
}

/// Immutable in-memory copy of every static table.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    index: IndustryIndex,
    correlations: CorrelationTable,
    indicators: BTreeMap<String, IndicatorTable>,
    prices: BTreeMap<String, PriceHistory>,
    financials: BTreeMap<String, FinancialStatements>,
    skipped: Vec<SkippedTable>,
}

impl DataStore {
    /// Loads every table under `root`.
    ///
    /// Indicator tables are validated against the leading indicators the
    /// catalog declares for their industry.
    ///
    /// # Errors
    ///
    /// Fails when the index or correlation file is absent or malformed, or
    /// when an optional directory cannot be listed. Optional tables that
    /// fail to load are skipped, see [`DataStore::skipped`].
    pub fn load(root: &Path, catalog: &IndicatorCatalog) -> Result<Self> {
        let index = IndustryIndex::load(&root.join(INDEX_FILE))?;
        let correlations = CorrelationTable::load(&root.join(CORRELATIONS_FILE))?;
        let mut skipped = Vec::new();

        let mut indicators = BTreeMap::new();
        for (industry, path) in csv_files(&root.join(INDICATORS_DIR))? {
            let table = catalog
                .leading(&industry)
                .map_err(|_| {
                    IipcastError::NotFound(format!(
                        "industry '{industry}' is missing from the catalog"
                    ))
                })
                .and_then(|leading| IndicatorTable::load(&path, leading));
            if let Some(table) = keep(table, &path, &mut skipped) {
                indicators.insert(industry, table);
            }
        }

        let mut prices = BTreeMap::new();
        for (stock, path) in csv_files(&root.join(PRICES_DIR))? {
            if let Some(history) = keep(PriceHistory::load(stock.clone(), &path), &path, &mut skipped) {
                prices.insert(stock, history);
            }
        }

        let mut financials = BTreeMap::new();
        for (stock, dir) in subdirectories(&root.join(FINANCIAL_DIR))? {
            let statements = FinancialStatements::load(stock.clone(), &dir);
            if let Some(statements) = keep(statements, &dir, &mut skipped) {
                financials.insert(stock, statements);
            }
        }

        tracing::info!(
            root = %root.display(),
            industries = index.industries().count(),
            periods = index.periods().len(),
            indicator_tables = indicators.len(),
            price_histories = prices.len(),
            correlated_stocks = correlations.stocks().count(),
            statement_sets = financials.len(),
            skipped = skipped.len(),
            "data store loaded"
        );

        Ok(Self {
            index,
            correlations,
            indicators,
            prices,
            financials,
            skipped,
        })
    }

    /// Creates a store from in-memory tables.
    pub fn new(index: IndustryIndex, correlations: CorrelationTable) -> Self {
        Self {
            index,
            correlations,
            ..Self::default()
        }
    }

    /// Adds an indicator table for `industry`.
    #[must_use]
    pub fn with_indicators(mut self, industry: impl Into<String>, table: IndicatorTable) -> Self {
        self.indicators.insert(industry.into(), table);
        self
    }

    /// Adds a stock's financial statements.
    #[must_use]
    pub fn with_financials(mut self, statements: FinancialStatements) -> Self {
        self.financials
            .insert(statements.stock().to_string(), statements);
        self
    }

    /// Adds a stock's price history.
    #[must_use]
    pub fn with_prices(mut self, history: PriceHistory) -> Self {
        self.prices.insert(history.stock().to_string(), history);
        self
    }

    /// The industry index table.
    pub const fn index(&self) -> &IndustryIndex {
        &self.index
    }

    /// One industry's index series.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] for an unknown industry.
    pub fn industry_series(&self, industry: &str) -> Result<IndustryIndexSeries> {
        self.index.series(industry)
    }

    /// The stored indicator table of one industry.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when no table was loaded.
    pub fn indicators(&self, industry: &str) -> Result<&IndicatorTable> {
        self.indicators.get(industry).ok_or_else(|| {
            IipcastError::NotFound(format!("no indicator table for industry '{industry}'"))
        })
    }

    /// The correlation results table.
    pub const fn correlations(&self) -> &CorrelationTable {
        &self.correlations
    }

    /// One stock's price history.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when no history was loaded.
    pub fn prices(&self, stock: &str) -> Result<&PriceHistory> {
        self.prices
            .get(stock)
            .ok_or_else(|| IipcastError::NotFound(format!("no price history for '{stock}'")))
    }

    /// One stock's financial statements.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when no statements were loaded.
    pub fn financials(&self, stock: &str) -> Result<&FinancialStatements> {
        self.financials
            .get(stock)
            .ok_or_else(|| IipcastError::NotFound(format!("no financial statements for '{stock}'")))
    }

    /// Optional tables left out by [`DataStore::load`], in load order.
    pub fn skipped(&self) -> &[SkippedTable] {
        &self.skipped
    }

    /// Every stock named by any table, sorted and deduplicated.
    pub fn stocks(&self) -> Vec<String> {
        let mut stocks: Vec<String> = self
            .correlations
            .stocks()
            .map(str::to_string)
            .chain(self.prices.keys().cloned())
            .chain(self.financials.keys().cloned())
            .collect();
        stocks.sort();
        stocks.dedup();
        stocks
    }
}

/// Passes a loaded table through, or records why it was skipped.
fn keep<T>(loaded: Result<T>, path: &Path, skipped: &mut Vec<SkippedTable>) -> Option<T> {
    match loaded {
        Ok(table) => Some(table),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable table");
            skipped.push(SkippedTable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            None
        }
    }
}

/// `(file stem, path)` of every `.csv` file in `dir`, sorted by stem.
/// A missing directory yields nothing.
fn csv_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    list_dir(dir, |path| {
        path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    })
}

/// `(name, path)` of every subdirectory of `dir`, sorted by name.
fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    list_dir(dir, Path::is_dir)
}

fn list_dir(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "optional data directory not found");
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !keep(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            entries.push((stem.to_string(), path));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
