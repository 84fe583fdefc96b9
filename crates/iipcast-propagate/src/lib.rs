#![doc(issue_tracker_base_url = "https://github.com/iipcast/iipcast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Propagation of an industry forecast into stock-level figures.
//!
//! A [`CorrelationAdjuster`] rescales each stock's correlation coefficients
//! by the forecast-to-mean ratio, and a [`FinancialProjector`] turns a
//! statement snapshot into projected figures under a [`ProjectionPolicy`].

pub mod adjust;
pub mod project;

pub use adjust::{ratio, AdjustedCorrelation, AdjustedCorrelationRow, CorrelationAdjuster};
pub use project::{
    FinancialProjector, PredictedFinancialLine, ProjectedStatement, ProjectionPolicy,
};
