//! Forecast command implementation.

use anyhow::Result;
use iipcast::data::SourceKind;
use iipcast::pipeline::ForecastOutcome;
use iipcast::{ForecastSelection, ModelKind, Pipeline, PipelineConfig};

use super::{banner, section};
use crate::InputArgs;
use crate::data::{self, Context};

/// Fit every estimator for an industry and print the forecasts.
pub(crate) fn show_forecast(ctx: &Context, config: PipelineConfig, args: &InputArgs) -> Result<()> {
    banner("Industry Forecast");

    let leading = ctx.catalog.leading(&args.industry)?;
    let input = data::indicator_input(leading, args)?;
    let selection = config.selection;
    let pipeline = Pipeline::new(&ctx.store, &ctx.catalog, &ctx.interpretations, config);

    let outcome = pipeline.forecast(&args.industry, &input)?;
    print_report(&outcome, selection);
    Ok(())
}

/// Print the training summary and the per-model table.
pub(crate) fn print_report(outcome: &ForecastOutcome, selection: ForecastSelection) {
    let training = &outcome.training;
    println!("Industry:     {}", training.industry);
    println!(
        "Input:        {}",
        match training.source {
            SourceKind::Manual => "manual values",
            SourceKind::Table => "indicator table",
        }
    );
    println!("Observations: {}", training.len());
    if let (Some(first), Some(last)) = (training.periods.first(), training.periods.last())
        && training.source == SourceKind::Table
    {
        println!("Periods:      {first} .. {last}");
    }
    println!("Mean index:   {:.2}", training.historical_mean());
    println!();

    println!("Forecast input:");
    for (name, value) in training.x.columns().iter().zip(&training.future_row) {
        println!("  {name:30} {value:>10.2}");
    }
    println!();

    print_performance(outcome);

    section("MODEL FORECASTS");
    println!("{:<20} {:>10} {:>12}", "Model", "RMSE", "Forecast");
    println!("{}", "─".repeat(44));
    for kind in ModelKind::ALL {
        match outcome.report.get(kind) {
            Some(Ok(model)) => {
                println!("{:<20} {:>10.2} {:>12.2}", kind.label(), model.rmse, model.forecast);
            }
            Some(Err(_)) => println!("{:<20} {:>10} {:>12}", kind.label(), "-", "-"),
            None => {}
        }
    }
    println!();

    for model in outcome.report.successes() {
        if model.parameters.is_empty() {
            continue;
        }
        println!("{} parameters:", model.kind.label());
        for (name, value) in &model.parameters {
            println!("  {name:30} {value:>12.4}");
        }
        println!();
    }

    for (kind, error) in outcome.report.failures() {
        println!("{} failed: {error}", kind.label());
    }

    match outcome.report.select(selection) {
        Ok(value) => println!("Selected ({selection}): {value:.2}"),
        Err(e) => println!("Selected ({selection}): unavailable, {e}"),
    }
    println!();
}

/// Actual index against each model's in-sample prediction, period by period.
fn print_performance(outcome: &ForecastOutcome) {
    section("MODEL PERFORMANCE");
    print!("{:<14} {:>10}", "Period", "Actual");
    for kind in ModelKind::ALL {
        print!(" {:>10}", kind.name());
    }
    println!();
    println!("{}", "─".repeat(26 + 11 * ModelKind::ALL.len()));

    for row in outcome.performance() {
        print!("{:<14} {:>10.2}", row.period, row.actual);
        for (_, prediction) in &row.predictions {
            match prediction {
                Some(value) => print!(" {value:>10.2}"),
                None => print!(" {:>10}", "-"),
            }
        }
        println!();
    }
    println!();
}
