//! Financial statement projection.
//!
//! Two projection policies exist and neither is authoritative, so both are
//! selectable:
//!
//! - [`ProjectionPolicy::RatioScaling`] multiplies every numeric field by
//!   `predicted / mean`. It needs no correlation data.
//! - [`ProjectionPolicy::CorrelationGrowth`] grows each field that has an
//!   adjusted coefficient by that fraction: `value * adjusted + value`.
//!   Fields without a coefficient are carried over unchanged and flagged.

use std::fmt;
use std::str::FromStr;

use iipcast_data::{FinancialStatementSnapshot, StatementKind};
use iipcast_traits::{IipcastError, Period, Result};
use serde::{Deserialize, Serialize};

use crate::adjust::AdjustedCorrelationRow;

/// How statement fields are projected from a forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionPolicy {
    /// `value * predicted / mean` for every field.
    #[default]
    RatioScaling,
    /// `value * adjusted + value` for fields with a coefficient.
    CorrelationGrowth,
}

impl ProjectionPolicy {
    /// Short identifier.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RatioScaling => "ratio-scaling",
            Self::CorrelationGrowth => "correlation-growth",
        }
    }
}

impl fmt::Display for ProjectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionPolicy {
    type Err = IipcastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ratio-scaling" | "ratio" | "a" => Ok(Self::RatioScaling),
            "correlation-growth" | "growth" | "b" => Ok(Self::CorrelationGrowth),
            other => Err(IipcastError::NotFound(format!(
                "unknown projection policy '{other}' (expected ratio-scaling or correlation-growth)"
            ))),
        }
    }
}

/// One projected statement field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedFinancialLine {
    /// Field name.
    pub field: String,
    /// Value in the snapshot.
    pub original: f64,
    /// Projected value.
    pub predicted: f64,
    /// Adjusted coefficient applied under correlation growth.
    pub coefficient: Option<f64>,
    /// Whether the value was carried over without projection.
    pub carried: bool,
}

/// A projected statement row for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedStatement {
    /// Stock name.
    pub stock: String,
    /// Sheet projected.
    pub kind: StatementKind,
    /// Period label of the source row.
    pub date: Period,
    /// Policy that produced the lines.
    pub policy: ProjectionPolicy,
    /// Projected fields in sheet column order.
    pub lines: Vec<PredictedFinancialLine>,
}

impl ProjectedStatement {
    /// The projected line for `field`.
    pub fn line(&self, field: &str) -> Option<&PredictedFinancialLine> {
        self.lines.iter().find(|l| l.field == field)
    }

    /// Fields carried over without projection.
    pub fn carried(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| l.carried)
            .map(|l| l.field.as_str())
    }
}

/// Projects statement snapshots under one policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialProjector {
    policy: ProjectionPolicy,
}

impl FinancialProjector {
    /// Creates a projector.
    pub const fn new(policy: ProjectionPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub const fn policy(&self) -> ProjectionPolicy {
        self.policy
    }

    /// Projects every field of `snapshot`.
    ///
    /// Ratio scaling uses `ratio` alone; correlation growth uses the stock's
    /// adjusted correlations.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] under correlation growth when the
    /// stock has no correlation results.
    pub fn project(
        &self,
        snapshot: &FinancialStatementSnapshot,
        ratio: f64,
        adjusted: Option<&AdjustedCorrelationRow>,
    ) -> Result<ProjectedStatement> {
        if self.policy == ProjectionPolicy::CorrelationGrowth && adjusted.is_none() {
            return Err(IipcastError::NotFound(format!(
                "{} needs correlation results for stock '{}'",
                self.policy, snapshot.stock
            )));
        }

        let lines: Vec<PredictedFinancialLine> = snapshot
            .fields
            .iter()
            .map(|(field, value)| match self.policy {
                ProjectionPolicy::RatioScaling => PredictedFinancialLine {
                    field: field.clone(),
                    original: *value,
                    predicted: value * ratio,
                    coefficient: None,
                    carried: false,
                },
                ProjectionPolicy::CorrelationGrowth => {
                    let coefficient = adjusted
                        .and_then(|row| row.get(field))
                        .map(|e| e.adjusted);
                    PredictedFinancialLine {
                        field: field.clone(),
                        original: *value,
                        predicted: coefficient.map_or(*value, |c| value * c + value),
                        coefficient,
                        carried: coefficient.is_none(),
                    }
                }
            })
            .collect();

        let carried = lines.iter().filter(|l| l.carried).count();
        if carried > 0 {
            tracing::debug!(
                stock = %snapshot.stock,
                carried,
                "fields without a correlation carried unchanged"
            );
        }

        Ok(ProjectedStatement {
            stock: snapshot.stock.clone(),
            kind: snapshot.kind,
            date: snapshot.date.clone(),
            policy: self.policy,
            lines,
        })
    }
}
