//! Industry to indicator mapping.
//!
//! The catalog is configuration data. A default catalog is embedded in the
//! crate; operators can supply their own JSON file with the same shape:
//!
//! ```json
//! { "<industry>": { "leading": ["..."], "lagging": ["..."] } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_traits::{IipcastError, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Leading and lagging indicator names of one industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryIndicators {
    /// Indicators that predict next period's index; used for fitting.
    pub leading: Vec<String>,
    /// Indicators that reflect past movement; displayed only.
    #[serde(default)]
    pub lagging: Vec<String>,
}

/// Mapping from industry name to its indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorCatalog {
    industries: BTreeMap<String, IndustryIndicators>,
}

impl IndicatorCatalog {
    /// The catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded asset is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a valid catalog.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InvalidData`] when an industry has no leading
    /// indicators.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        if let Some((name, _)) = catalog
            .industries
            .iter()
            .find(|(_, ind)| ind.leading.is_empty())
        {
            return Err(IipcastError::InvalidData(format!(
                "industry '{name}' has no leading indicators"
            )));
        }
        Ok(catalog)
    }

    /// Industry names, sorted.
    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industries.keys().map(String::as_str)
    }

    /// Indicators of one industry.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] for an unknown industry.
    pub fn get(&self, industry: &str) -> Result<&IndustryIndicators> {
        self.industries.get(industry).ok_or_else(|| {
            IipcastError::NotFound(format!("industry '{industry}' is not in the catalog"))
        })
    }

    /// Leading indicator names of one industry.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::NotFound`] for an unknown industry.
    pub fn leading(&self, industry: &str) -> Result<&[String]> {
        self.get(industry).map(|i| i.leading.as_slice())
    }
}
