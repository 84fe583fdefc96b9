//! Industry listing command implementation.

use anyhow::Result;
use iipcast::IndicatorCatalog;

use super::banner;

/// List industries in the indicator catalog.
pub(crate) fn list_industries(catalog: &IndicatorCatalog, verbose: bool) -> Result<()> {
    banner("Industries");

    for industry in catalog.industries() {
        println!("{industry}");
        if verbose {
            let indicators = catalog.get(industry)?;
            println!("{}", "-".repeat(60));
            println!("  Leading: {}", indicators.leading.join(", "));
            if !indicators.lagging.is_empty() {
                println!("  Lagging: {}", indicators.lagging.join(", "));
            }
            println!();
        }
    }

    if !verbose {
        println!("\nUse --verbose to list each industry's indicators.\n");
    }
    Ok(())
}
