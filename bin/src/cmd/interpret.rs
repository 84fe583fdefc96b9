//! Interpretation lookup command implementation.

use anyhow::Result;
use iipcast::{CorrelationBucket, InterpretationLookup};

/// Print the interpretation text for a metric and bucket.
pub(crate) fn show_interpretation(
    lookup: &InterpretationLookup,
    metric: &str,
    bucket: CorrelationBucket,
) -> Result<()> {
    match lookup.lookup(metric, bucket) {
        Ok(text) => {
            println!("\n{metric} ({bucket})\n");
            println!("{text}\n");
        }
        Err(e) if e.is_not_found() => {
            println!("No interpretation for {metric} ({bucket}).");
            println!(
                "Metrics with interpretations: {}",
                lookup.metrics().collect::<Vec<_>>().join(", ")
            );
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
