//! Feature and target assembly.
//!
//! Builds the indicator matrix X and the industry-index target y the
//! estimators are fitted on. Indicators lead the index by one period: the
//! indicator row for period `t` is paired with the index value of period
//! `t + 1`.

use std::collections::BTreeMap;

use iipcast_traits::{FeatureMatrix, IipcastError, Period, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::index::IndustryIndexSeries;
use crate::indicators::IndicatorTable;

/// Target used for a single manually entered row when no history exists.
pub const DEFAULT_MANUAL_TARGET: f64 = 100.0;

/// Where indicator observations come from.
#[derive(Debug, Clone, Copy)]
pub enum IndicatorSource<'a> {
    /// One row of values typed in by the user, keyed by indicator name.
    Manual(&'a BTreeMap<String, f64>),
    /// A historical or supplied indicator table paired with the index it
    /// predicts.
    Table {
        /// Indicator observations.
        indicators: &'a IndicatorTable,
        /// Industry index the indicators lead.
        index: &'a IndustryIndexSeries,
    },
}

/// How a training set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Single manual row with a placeholder target.
    Manual,
    /// Shifted historical table.
    Table,
}

/// Aligned features and target for one industry.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    /// Industry name.
    pub industry: String,
    /// Target period of each row.
    pub periods: Vec<Period>,
    /// Indicator matrix, one column per leading indicator.
    pub x: FeatureMatrix,
    /// Industry index values aligned with `x`.
    pub y: Array1<f64>,
    /// Indicator row used for the one-step-ahead forecast.
    pub future_row: Vec<f64>,
    /// How the set was built.
    pub source: SourceKind,
}

impl TrainingSet {
    /// Number of aligned observations.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the set has no observations.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Mean of the target, the denominator of the adjustment ratio.
    pub fn historical_mean(&self) -> f64 {
        self.y.mean().unwrap_or(f64::NAN)
    }
}

/// Builds [`TrainingSet`]s for one industry.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    industry: String,
    leading: Vec<String>,
    manual_target: f64,
}

impl FeatureAssembler {
    /// Creates an assembler for `industry` using its leading indicators.
    pub fn new(industry: impl Into<String>, leading: &[String]) -> Self {
        Self {
            industry: industry.into(),
            leading: leading.to_vec(),
            manual_target: DEFAULT_MANUAL_TARGET,
        }
    }

    /// Overrides the placeholder target used for manual input.
    #[must_use]
    pub const fn with_manual_target(mut self, target: f64) -> Self {
        self.manual_target = target;
        self
    }

    /// Leading indicator names, in matrix column order.
    pub fn leading(&self) -> &[String] {
        &self.leading
    }

    /// Assembles features and target from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::MissingColumn`] naming every absent indicator
    /// and [`IipcastError::InsufficientData`] when no row survives alignment.
    pub fn assemble(&self, source: IndicatorSource<'_>) -> Result<TrainingSet> {
        match source {
            IndicatorSource::Manual(values) => self.assemble_manual(values),
            IndicatorSource::Table { indicators, index } => self.assemble_table(indicators, index),
        }
    }

    fn assemble_manual(&self, values: &BTreeMap<String, f64>) -> Result<TrainingSet> {
        let missing: Vec<&String> = self
            .leading
            .iter()
            .filter(|name| !values.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(IipcastError::missing_columns("manual input", &missing));
        }

        let row: Vec<f64> = self.leading.iter().map(|name| values[name]).collect();
        let x = FeatureMatrix::from_rows(self.leading.clone(), std::slice::from_ref(&row))?;

        Ok(TrainingSet {
            industry: self.industry.clone(),
            periods: vec!["manual".to_string()],
            x,
            y: Array1::from_vec(vec![self.manual_target]),
            future_row: row,
            source: SourceKind::Manual,
        })
    }

    fn assemble_table(
        &self,
        indicators: &IndicatorTable,
        index: &IndustryIndexSeries,
    ) -> Result<TrainingSet> {
        let missing: Vec<&String> = self
            .leading
            .iter()
            .filter(|name| indicators.column(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(IipcastError::missing_columns("leading indicators", &missing));
        }

        let mut periods = Vec::new();
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        let mut future_row = None;

        for (i, period) in indicators.periods().iter().enumerate() {
            let Some(row) = indicators.row(i, &self.leading) else {
                continue;
            };
            future_row = Some(row.clone());

            let target = index.position(period).and_then(|p| {
                let next = p + 1;
                Some((index.periods.get(next)?, index.values.get(next).copied().flatten()?))
            });
            if let Some((target_period, value)) = target {
                periods.push(target_period.clone());
                rows.push(row);
                targets.push(value);
            }
        }

        if rows.is_empty() {
            return Err(IipcastError::InsufficientData(format!(
                "no indicator rows for '{}' align with a following index period",
                self.industry
            )));
        }
        let future_row = future_row.ok_or_else(|| {
            IipcastError::InsufficientData("no complete indicator row to forecast from".into())
        })?;

        tracing::debug!(
            industry = %self.industry,
            table_rows = indicators.len(),
            aligned = rows.len(),
            "assembled training set"
        );

        Ok(TrainingSet {
            industry: self.industry.clone(),
            periods,
            x: FeatureMatrix::from_rows(self.leading.clone(), &rows)?,
            y: Array1::from_vec(targets),
            future_row,
            source: SourceKind::Table,
        })
    }
}
