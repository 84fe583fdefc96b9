//! Projection command implementation.

use anyhow::{Result, bail};
use iipcast::pipeline::{Propagation, StockProjection};
use iipcast::{Pipeline, PipelineConfig, PipelineRequest, StockOutcome};
use serde_json::{Value, json};

use super::forecast::print_report;
use super::{banner, section};
use crate::InputArgs;
use crate::data::{self, Context};

/// Forecast an industry and project each stock's statement.
pub(crate) fn project_stocks(
    ctx: &Context,
    config: PipelineConfig,
    args: &InputArgs,
    stocks: &[String],
    format: &str,
) -> Result<()> {
    if format != "text" && format != "json" {
        bail!("unknown format '{format}' (expected text or json)");
    }

    let leading = ctx.catalog.leading(&args.industry)?;
    let request = PipelineRequest {
        industry: args.industry.clone(),
        input: data::indicator_input(leading, args)?,
        stocks: stocks.to_vec(),
    };
    let selection = config.selection;
    let policy = config.policy;
    let date = config.target_date.clone();
    let statement = config.statement;
    let pipeline = Pipeline::new(&ctx.store, &ctx.catalog, &ctx.interpretations, config);
    let output = pipeline.run(&request)?;

    if format == "json" {
        let propagation = match &output.propagation {
            Ok(p) => propagation_json(p),
            Err(e) => json!({ "error": e.to_string() }),
        };
        let models: Vec<Value> = output
            .forecast
            .report
            .outcomes
            .iter()
            .map(|o| match &o.result {
                Ok(m) => json!({
                    "model": o.kind,
                    "rmse": m.rmse,
                    "forecast": m.forecast,
                    "parameters": m
                        .parameters
                        .iter()
                        .map(|(name, value)| (name.clone(), json!(value)))
                        .collect::<serde_json::Map<_, _>>(),
                }),
                Err(e) => json!({ "model": o.kind, "error": e.to_string() }),
            })
            .collect();
        let performance: Vec<Value> = output
            .forecast
            .performance()
            .into_iter()
            .map(|row| {
                let mut entry = json!({ "period": row.period, "actual": row.actual });
                for (kind, prediction) in &row.predictions {
                    entry[kind.name()] = json!(prediction);
                }
                entry
            })
            .collect();
        let body = json!({
            "industry": args.industry,
            "observations": output.forecast.training.len(),
            "mean": output.forecast.training.historical_mean(),
            "models": models,
            "performance": performance,
            "propagation": propagation,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    banner("Stock Projection");
    print_report(&output.forecast, selection);

    let propagation = match output.propagation {
        Ok(p) => p,
        Err(e) => {
            println!("Propagation unavailable: {e}\n");
            return Ok(());
        }
    };

    println!("Ratio (forecast / mean): {:.4}", propagation.ratio);
    println!("Policy:                  {policy}");
    println!("Statement:               {statement} ({date})");
    println!();

    for (stock, outcome) in &propagation.stocks {
        section(&stock.to_uppercase());
        match outcome {
            StockOutcome::Projected(projection) => print_projection(projection),
            StockOutcome::Skipped(e) => println!("Skipped: {e}\n"),
        }
    }
    Ok(())
}

fn print_projection(projection: &StockProjection) {
    if let Some(price) = projection.latest_price {
        println!("Latest close: {price:.2}\n");
    }

    match &projection.correlations {
        Some(correlations) => {
            println!("{:<30} {:>8} {:>10}  {}", "Metric", "Raw", "Adjusted", "Bucket");
            println!("{}", "─".repeat(68));
            for entry in &correlations.entries {
                println!(
                    "{:<30} {:>8.3} {:>10.3}  {}",
                    entry.metric, entry.raw, entry.adjusted, entry.bucket
                );
            }
        }
        None => println!("No correlation results, statement scaled by the ratio only."),
    }
    println!();

    let statement = &projection.statement;
    println!("{:<30} {:>14} {:>14}", "Field", "Original", "Projected");
    println!("{}", "─".repeat(60));
    for line in &statement.lines {
        let marker = if line.carried { " *" } else { "" };
        println!(
            "{:<30} {:>14.2} {:>14.2}{marker}",
            line.field, line.original, line.predicted
        );
    }
    if statement.carried().next().is_some() {
        println!("\n* no correlation coefficient, carried over unchanged");
    }
    println!();

    for interpretation in &projection.interpretations {
        println!("{} ({}):", interpretation.metric, interpretation.bucket);
        println!("  {}\n", interpretation.text);
    }
}

fn propagation_json(propagation: &Propagation) -> Value {
    let stocks: Vec<Value> = propagation
        .stocks
        .iter()
        .map(|(stock, outcome)| match outcome {
            StockOutcome::Projected(p) => json!({
                "stock": stock,
                "latest_price": p.latest_price,
                "correlations": p.correlations,
                "statement": p.statement,
                "interpretations": p.interpretations,
            }),
            StockOutcome::Skipped(e) => json!({ "stock": stock, "skipped": e.to_string() }),
        })
        .collect();

    json!({
        "selection": propagation.selection,
        "predicted": propagation.predicted,
        "mean": propagation.mean,
        "ratio": propagation.ratio,
        "stocks": stocks,
    })
}
