//! CLI subcommand modules.
//!
//! This module contains the implementations for all iipcast CLI subcommands.

pub(crate) mod forecast;
pub(crate) mod industries;
pub(crate) mod interpret;
pub(crate) mod project;
pub(crate) mod stocks;

/// Print a boxed section title.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Print a heavy rule with a heading.
pub(crate) fn section(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
