//! Data loading utilities for the iipcast CLI.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use iipcast::data::{IndicatorTable, features::DEFAULT_MANUAL_TARGET};
use iipcast::{DataStore, IndicatorCatalog, IndicatorInput, InterpretationLookup, PipelineConfig};

use crate::InputArgs;

/// Everything loaded once at startup.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) catalog: IndicatorCatalog,
    pub(crate) interpretations: InterpretationLookup,
    pub(crate) store: DataStore,
}

impl Context {
    /// Load every table under `data_dir`.
    pub(crate) fn load(
        data_dir: &Path,
        catalog: IndicatorCatalog,
        interpretations: InterpretationLookup,
    ) -> Result<Self> {
        let store = DataStore::load(data_dir, &catalog)
            .with_context(|| format!("loading data from {}", data_dir.display()))?;
        Ok(Self {
            catalog,
            interpretations,
            store,
        })
    }
}

/// Read the pipeline configuration, or the defaults without a file.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(p) => PipelineConfig::from_path(p)
            .with_context(|| format!("reading config {}", p.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Read the indicator catalog, or the built-in one without a file.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<IndicatorCatalog> {
    match path {
        Some(p) => IndicatorCatalog::from_path(p)
            .with_context(|| format!("reading catalog {}", p.display())),
        None => Ok(IndicatorCatalog::builtin()?),
    }
}

/// Read the interpretation text, or the built-in text without a file.
pub(crate) fn load_interpretations(path: Option<&Path>) -> Result<InterpretationLookup> {
    match path {
        Some(p) => InterpretationLookup::from_path(p)
            .with_context(|| format!("reading interpretations {}", p.display())),
        None => Ok(InterpretationLookup::builtin()?),
    }
}

/// Build the indicator input for a run from the command-line arguments.
pub(crate) fn indicator_input(leading: &[String], args: &InputArgs) -> Result<IndicatorInput> {
    if args.history {
        return Ok(IndicatorInput::Stored);
    }
    if let Some(path) = &args.indicators {
        let table = IndicatorTable::load(path, leading)
            .with_context(|| format!("loading indicators from {}", path.display()))?;
        return Ok(IndicatorInput::Supplied(table));
    }
    Ok(IndicatorInput::Manual(parse_manual_values(leading, &args.values)?))
}

/// Parse `NAME=VALUE` pairs. Indicators not given default to 100.
pub(crate) fn parse_manual_values(
    leading: &[String],
    pairs: &[String],
) -> Result<BTreeMap<String, f64>> {
    let mut values: BTreeMap<String, f64> = leading
        .iter()
        .map(|name| (name.clone(), DEFAULT_MANUAL_TARGET))
        .collect();

    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{pair}'"))?;
        let name = name.trim();
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for '{name}'"))?;
        if !value.is_finite() {
            bail!("value for '{name}' must be finite");
        }
        let Some(slot) = values.get_mut(name) else {
            bail!(
                "'{name}' is not a leading indicator (expected one of: {})",
                leading.join(", ")
            );
        };
        *slot = value;
    }

    Ok(values)
}
