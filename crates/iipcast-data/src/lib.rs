#![doc(issue_tracker_base_url = "https://github.com/iipcast/iipcast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Data layer for the iipcast pipeline.
//!
//! This crate loads the static tables once into a [`DataStore`], declares
//! the schema of each table type, carries the industry [`IndicatorCatalog`]
//! and the [`InterpretationLookup`], and assembles the feature matrix and
//! target vector the estimators are fitted on.

mod frame;

pub mod catalog;
pub mod correlations;
pub mod features;
pub mod index;
pub mod indicators;
pub mod interpret;
pub mod prices;
pub mod schema;
pub mod statements;
pub mod store;

pub use catalog::{IndicatorCatalog, IndustryIndicators};
pub use correlations::{CorrelationTable, StockCorrelationRow};
pub use features::{FeatureAssembler, IndicatorSource, SourceKind, TrainingSet};
pub use index::{IndustryIndex, IndustryIndexSeries};
pub use indicators::IndicatorTable;
pub use interpret::InterpretationLookup;
pub use prices::PriceHistory;
pub use schema::TableSchema;
pub use statements::{FinancialStatementSnapshot, FinancialStatements, StatementKind};
pub use store::{DataStore, SkippedTable};
