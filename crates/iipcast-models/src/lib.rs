#![doc(issue_tracker_base_url = "https://github.com/iipcast/iipcast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Estimators and the forecast engine for iipcast.
//!
//! Three independent estimators implement [`iipcast_traits::Regressor`]:
//! - [`LinearRegression`]: OLS with intercept
//! - [`Arima`]: ARIMA(5, 1, 0) on the target series
//! - [`RandomForest`]: seeded random forest regression
//!
//! [`ForecastEngine`] runs all three and collects a [`ForecastReport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use iipcast_models::{ForecastEngine, ForecastSelection};
//! use iipcast_traits::FeatureMatrix;
//! use ndarray::Array1;
//!
//! let x = FeatureMatrix::from_rows(vec!["Retail Sales Data".into()], &[vec![100.0]]).unwrap();
//! let y = Array1::from_vec(vec![100.0]);
//! let report = ForecastEngine::default().run(&x, &y, &[100.0]);
//! let forecast = report.select(ForecastSelection::Consensus).unwrap();
//! ```

mod lstsq;

pub mod arima;
pub mod engine;
pub mod forest;
pub mod linear;

pub use arima::{Arima, ArimaConfig, ArimaFit};
pub use engine::{
    EngineConfig, ForecastEngine, ForecastReport, ForecastSelection, ModelForecast, ModelKind,
    ModelOutcome,
};
pub use forest::{ForestFit, RandomForest, RandomForestConfig};
pub use linear::{LinearFit, LinearRegression, LinearRegressionConfig};
