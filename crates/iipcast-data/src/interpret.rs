//! Canned explanations keyed by financial metric and correlation bucket.
//!
//! The text lives in a JSON asset so it can be edited or replaced without
//! touching code:
//!
//! ```json
//! { "<metric>": { "StrongPositive": "...", "Neutral": "..." } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_traits::{CorrelationBucket, IipcastError, Result};

const BUILTIN_INTERPRETATIONS: &str = include_str!("../assets/interpretations.json");

/// Lookup table from `(metric, bucket)` to explanatory text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpretationLookup {
    entries: BTreeMap<String, BTreeMap<CorrelationBucket, String>>,
}

impl InterpretationLookup {
    /// The interpretations embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded asset is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_INTERPRETATIONS)
    }

    /// Loads interpretations from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or names an unknown bucket.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Parses interpretations from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] for an unknown bucket label.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for (metric, texts) in raw {
            let mut by_bucket = BTreeMap::new();
            for (label, text) in texts {
                let bucket = label.parse::<CorrelationBucket>().map_err(|_| {
                    IipcastError::InvalidData(format!(
                        "interpretation for '{metric}' uses unknown bucket '{label}'"
                    ))
                })?;
                by_bucket.insert(bucket, text);
            }
            entries.insert(metric, by_bucket);
        }
        Ok(Self { entries })
    }

    /// Metrics with at least one interpretation.
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Text for one metric and bucket.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] when the combination is absent.
    pub fn lookup(&self, metric: &str, bucket: CorrelationBucket) -> Result<&str> {
        self.entries
            .get(metric)
            .and_then(|texts| texts.get(&bucket))
            .map(String::as_str)
            .ok_or_else(|| {
                IipcastError::NotFound(format!("no interpretation for '{metric}' ({bucket})"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_bucket() {
        let lookup = InterpretationLookup::builtin().unwrap();
        for metric in lookup.metrics() {
            for bucket in CorrelationBucket::ALL {
                assert!(
                    lookup.lookup(metric, bucket).is_ok(),
                    "{metric} lacks {bucket}"
                );
            }
        }
        assert!(
            lookup
                .lookup("Total Revenue/Income", CorrelationBucket::StrongPositive)
                .unwrap()
                .contains("Revenue")
        );
    }

    #[test]
    fn test_missing_combination() {
        let lookup = InterpretationLookup::from_json(
            r#"{"Net Profit": {"Neutral": "No link."}}"#,
        )
        .unwrap();
        assert_eq!(
            lookup.lookup("Net Profit", CorrelationBucket::Neutral).unwrap(),
            "No link."
        );
        assert!(matches!(
            lookup.lookup("Net Profit", CorrelationBucket::StrongPositive),
            Err(IipcastError::NotFound(_))
        ));
        assert!(matches!(
            lookup.lookup("Dividends", CorrelationBucket::Neutral),
            Err(IipcastError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_bucket_label() {
        let result = InterpretationLookup::from_json(r#"{"Net Profit": {"Sideways": "?"}}"#);
        assert!(matches!(result, Err(IipcastError::InvalidData(_))));
    }
}
