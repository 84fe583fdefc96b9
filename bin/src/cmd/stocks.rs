//! Stock listing command implementation.

use anyhow::Result;
use iipcast::data::StatementKind;

use super::banner;
use crate::data::Context;

/// List every stock the data directory knows about and what is loaded for it.
pub(crate) fn list_stocks(ctx: &Context) -> Result<()> {
    banner("Stocks");

    println!(
        "{:<30} {:>12} {:>8} {:>12}",
        "Stock", "Correlation", "Prices", "Statements"
    );
    println!("{}", "─".repeat(66));

    for stock in ctx.store.stocks() {
        let correlated = ctx.store.correlations().row(&stock).is_ok();
        let prices = ctx.store.prices(&stock).map(|p| p.len()).unwrap_or(0);
        let sheets = ctx
            .store
            .financials(&stock)
            .map(|f| f.kinds().map(sheet_letter).collect::<String>())
            .unwrap_or_default();

        println!(
            "{:<30} {:>12} {:>8} {:>12}",
            stock,
            if correlated { "yes" } else { "-" },
            prices,
            if sheets.is_empty() { "-".to_string() } else { sheets }
        );
    }

    println!("\nStatements: B = balance sheet, I = income statement, C = cash flow\n");

    let skipped = ctx.store.skipped();
    if !skipped.is_empty() {
        println!("Skipped while loading:");
        for table in skipped {
            println!("  {}: {}", table.path.display(), table.reason);
        }
        println!();
    }
    Ok(())
}

const fn sheet_letter(kind: StatementKind) -> char {
    match kind {
        StatementKind::BalanceSheet => 'B',
        StatementKind::IncomeStatement => 'I',
        StatementKind::CashFlow => 'C',
    }
}
