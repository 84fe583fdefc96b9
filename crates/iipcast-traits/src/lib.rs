#![doc(issue_tracker_base_url = "https://github.com/iipcast/iipcast/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the iipcast forecasting pipeline.
//!
//! This crate provides the foundational abstractions shared by the data,
//! model and propagation crates: the error taxonomy, the feature matrix,
//! correlation buckets, statistics helpers and the regressor traits.

/// The version of the iipcast-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod model;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{IipcastError, Result};
pub use model::{FittedModel, Regressor};
pub use types::{CorrelationBucket, FeatureMatrix, Period};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
