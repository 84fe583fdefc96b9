#![doc(issue_tracker_base_url = "https://github.com/iipcast/iipcast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # iipcast
//!
//! Industry index forecasting and propagation into stock financials.
//!
//! iipcast is an umbrella crate that re-exports the iipcast sub-crates and
//! adds the [`Pipeline`] that ties them together.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use iipcast::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let catalog = IndicatorCatalog::builtin()?;
//! let interpretations = InterpretationLookup::builtin()?;
//! let store = DataStore::load(Path::new("data"), &catalog)?;
//!
//! let pipeline = Pipeline::new(&store, &catalog, &interpretations, PipelineConfig::default());
//! let output = pipeline.run(&PipelineRequest {
//!     industry: "Manufacture of Food Products".into(),
//!     input: IndicatorInput::Stored,
//!     stocks: vec!["Britannia".into()],
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Errors, the feature matrix, correlation buckets and the
//!   [`Regressor`] traits
//! - [`data`] - Read-once data store, table schemas, catalog and feature
//!   assembly
//! - [`models`] - Linear, ARIMA and random forest estimators
//! - [`propagate`] - Correlation adjustment and statement projection
//! - [`pipeline`] - The end-to-end run
//!
//! ## Flow
//!
//! 1. **Assemble** indicator rows and the industry index into X and y
//! 2. **Fit** the three estimators and forecast the next period
//! 3. **Adjust** each stock's correlations by `forecast / historical mean`
//! 4. **Project** the stock's statement row under a [`ProjectionPolicy`]

/// Version information for the iipcast crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`Regressor`] / [`FittedModel`] - estimator seam
/// - [`FeatureMatrix`] - indicator observations
/// - [`CorrelationBucket`] - qualitative correlation strength
pub mod traits {
    pub use iipcast_traits::*;
}

pub use iipcast_traits::{
    CorrelationBucket, FeatureMatrix, FittedModel, IipcastError, Period, Regressor, Result,
};

// ============================================================================
// Data
// ============================================================================

/// Data loading and feature assembly.
///
/// ## Layout
///
/// ```text
/// <data>/iip.csv                         Date, <industry>...
/// <data>/correlations.csv                Stock, <metric>...
/// <data>/indicators/<industry>.csv       Date, <indicator>...
/// <data>/stockdata/<stock>.csv           price history
/// <data>/financial/<stock>/<Sheet>.csv   Date, <field>...
/// ```
pub mod data {
    pub use iipcast_data::*;
}

pub use iipcast_data::{DataStore, IndicatorCatalog, InterpretationLookup, StatementKind};

// ============================================================================
// Models
// ============================================================================

/// Estimators and the forecast engine.
///
/// ## Estimators
///
/// - **LinearRegression**: OLS with intercept
/// - **Arima**: ARIMA(5, 1, 0) on the target series
/// - **RandomForest**: 100 trees, seed 42
///
/// Each is scored by in-sample RMSE:
///
/// ```text
/// RMSE = sqrt(mean((y_t - yhat_t)^2))
/// ```
pub mod models {
    pub use iipcast_models::*;
}

pub use iipcast_models::{ForecastEngine, ForecastReport, ForecastSelection, ModelKind};

// ============================================================================
// Propagation
// ============================================================================

/// Correlation adjustment and statement projection.
///
/// ```text
/// ratio    = predicted / mean(y)
/// adjusted = raw * ratio
/// ratio-scaling:      field * ratio
/// correlation-growth: field * adjusted + field
/// ```
pub mod propagate {
    pub use iipcast_propagate::*;
}

pub use iipcast_propagate::{CorrelationAdjuster, FinancialProjector, ProjectionPolicy};

pub use pipeline::{
    IndicatorInput, Pipeline, PipelineConfig, PipelineOutput, PipelineRequest, StockOutcome,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use iipcast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::pipeline::{
        IndicatorInput, Pipeline, PipelineConfig, PipelineOutput, PipelineRequest, StockOutcome,
    };
    pub use crate::{
        CorrelationBucket, DataStore, ForecastSelection, IipcastError, IndicatorCatalog,
        InterpretationLookup, ModelKind, ProjectionPolicy, Result,
    };
}
