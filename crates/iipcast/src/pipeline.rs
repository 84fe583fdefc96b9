//! End-to-end forecast and propagation.
//!
//! A [`Pipeline`] borrows the read-once [`DataStore`] and runs, for one
//! industry: feature assembly, the three estimators, correlation adjustment
//! and statement projection for each requested stock. Failures stay local:
//! a failing estimator is recorded in the [`ForecastReport`], and a stock
//! without data becomes [`StockOutcome::Skipped`] without affecting the
//! other stocks.

use std::collections::BTreeMap;
use std::path::Path;

use iipcast_data::{
    DataStore, FeatureAssembler, IndicatorCatalog, IndicatorSource, IndicatorTable,
    InterpretationLookup, StatementKind, TrainingSet,
};
use iipcast_models::{EngineConfig, ForecastEngine, ForecastReport, ForecastSelection, ModelKind};
use iipcast_propagate::{
    AdjustedCorrelationRow, CorrelationAdjuster, FinancialProjector, ProjectedStatement,
    ProjectionPolicy,
};
use iipcast_traits::{CorrelationBucket, IipcastError, Period, Result};
use serde::{Deserialize, Serialize};

/// Statement date used when none is configured.
pub const DEFAULT_TARGET_DATE: &str = "Jun 2024";

/// Price column reported next to each projection.
pub const PRICE_COLUMN: &str = "Close";

/// Run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Statement row label to project from.
    pub target_date: Period,
    /// Statement sheet to project.
    pub statement: StatementKind,
    /// Target placeholder for a single manually entered row.
    pub manual_target: f64,
    /// Forecast that feeds the propagation step.
    pub selection: ForecastSelection,
    /// Statement projection policy.
    pub policy: ProjectionPolicy,
    /// Estimator settings.
    pub engine: EngineConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_date: DEFAULT_TARGET_DATE.to_string(),
            statement: StatementKind::IncomeStatement,
            manual_target: iipcast_data::features::DEFAULT_MANUAL_TARGET,
            selection: ForecastSelection::default(),
            policy: ProjectionPolicy::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Where the indicator observations for a run come from.
#[derive(Debug, Clone)]
pub enum IndicatorInput {
    /// One row of values keyed by indicator name.
    Manual(BTreeMap<String, f64>),
    /// The industry's indicator table held by the store.
    Stored,
    /// A table supplied for this run.
    Supplied(IndicatorTable),
}

/// What to run.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Industry to forecast.
    pub industry: String,
    /// Indicator observations.
    pub input: IndicatorInput,
    /// Stocks to project, in output order.
    pub stocks: Vec<String>,
}

/// Training set and per-model forecasts.
#[derive(Debug)]
pub struct ForecastOutcome {
    /// Features and target the models were fitted on.
    pub training: TrainingSet,
    /// Per-model results.
    pub report: ForecastReport,
}

impl ForecastOutcome {
    /// Actual index next to every estimator's in-sample prediction, one row
    /// per training period.
    pub fn performance(&self) -> Vec<PerformanceRow> {
        self.training
            .periods
            .iter()
            .zip(self.report.actual.iter())
            .enumerate()
            .map(|(row, (period, actual))| PerformanceRow {
                period: period.clone(),
                actual: *actual,
                predictions: ModelKind::ALL
                    .iter()
                    .map(|kind| {
                        let prediction = match self.report.get(*kind) {
                            Some(Ok(model)) => model.prediction_at(row),
                            _ => None,
                        };
                        (*kind, prediction)
                    })
                    .collect(),
            })
            .collect()
    }
}

/// One training period of the model performance view.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    /// Target period.
    pub period: Period,
    /// Industry index value.
    pub actual: f64,
    /// In-sample prediction per estimator, in [`ModelKind::ALL`] order.
    /// `None` where the estimator failed or does not cover the period.
    pub predictions: Vec<(ModelKind, Option<f64>)>,
}

impl PerformanceRow {
    /// Prediction of one estimator.
    pub fn prediction(&self, kind: ModelKind) -> Option<f64> {
        self.predictions
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, p)| *p)
    }
}

/// Interpretation text attached to one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Financial metric.
    pub metric: String,
    /// Bucket of the raw coefficient.
    pub bucket: CorrelationBucket,
    /// Explanatory text.
    pub text: String,
}

/// Everything produced for one stock.
#[derive(Debug, Clone)]
pub struct StockProjection {
    /// Adjusted correlation coefficients, absent when the stock has no
    /// correlation results and the policy does not need them.
    pub correlations: Option<AdjustedCorrelationRow>,
    /// Interpretation text for every metric that has one.
    pub interpretations: Vec<Interpretation>,
    /// Projected statement.
    pub statement: ProjectedStatement,
    /// Latest close price, when a price history is loaded.
    pub latest_price: Option<f64>,
}

/// Per-stock result.
#[derive(Debug)]
pub enum StockOutcome {
    /// The stock was projected.
    Projected(Box<StockProjection>),
    /// The stock was skipped.
    Skipped(IipcastError),
}

/// Propagation of one forecast to every requested stock.
#[derive(Debug)]
pub struct Propagation {
    /// Which forecast was used.
    pub selection: ForecastSelection,
    /// The forecast value.
    pub predicted: f64,
    /// Historical mean of the target.
    pub mean: f64,
    /// `predicted / mean`.
    pub ratio: f64,
    /// `(stock, outcome)` in request order.
    pub stocks: Vec<(String, StockOutcome)>,
}

/// Output of [`Pipeline::run`].
#[derive(Debug)]
pub struct PipelineOutput {
    /// Forecast stage.
    pub forecast: ForecastOutcome,
    /// Propagation stage; an error here means no forecast could be selected
    /// or the ratio was undefined.
    pub propagation: Result<Propagation>,
}

/// Runs forecasts and propagation against a loaded store.
#[derive(Debug)]
pub struct Pipeline<'a> {
    store: &'a DataStore,
    catalog: &'a IndicatorCatalog,
    interpretations: &'a InterpretationLookup,
    config: PipelineConfig,
    engine: ForecastEngine,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over shared, already loaded data.
    pub fn new(
        store: &'a DataStore,
        catalog: &'a IndicatorCatalog,
        interpretations: &'a InterpretationLookup,
        config: PipelineConfig,
    ) -> Self {
        let engine = ForecastEngine::new(config.engine.clone());
        Self {
            store,
            catalog,
            interpretations,
            config,
            engine,
        }
    }

    /// The run settings.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Assembles features for `industry` and runs every estimator.
    ///
    /// # Errors
    ///
    /// Fails when the industry is unknown to the catalog or the index, or
    /// when feature assembly fails. Estimator failures are not errors here;
    /// they are recorded in the report.
    pub fn forecast(&self, industry: &str, input: &IndicatorInput) -> Result<ForecastOutcome> {
        let leading = self.catalog.leading(industry)?;
        let assembler = FeatureAssembler::new(industry, leading)
            .with_manual_target(self.config.manual_target);

        let training = match input {
            IndicatorInput::Manual(values) => {
                assembler.assemble(IndicatorSource::Manual(values))?
            }
            IndicatorInput::Stored => {
                let index = self.store.industry_series(industry)?;
                let indicators = self.store.indicators(industry)?;
                assembler.assemble(IndicatorSource::Table {
                    indicators,
                    index: &index,
                })?
            }
            IndicatorInput::Supplied(indicators) => {
                let index = self.store.industry_series(industry)?;
                assembler.assemble(IndicatorSource::Table {
                    indicators,
                    index: &index,
                })?
            }
        };

        tracing::info!(
            industry,
            source = ?training.source,
            observations = training.len(),
            "training set assembled"
        );
        let report = self
            .engine
            .run(&training.x, &training.y, &training.future_row);
        Ok(ForecastOutcome { training, report })
    }

    /// Propagates a forecast to `stocks`.
    ///
    /// # Errors
    ///
    /// Fails when the selected forecast is unavailable or the historical
    /// mean is zero. Per-stock problems are reported as
    /// [`StockOutcome::Skipped`].
    pub fn propagate(&self, forecast: &ForecastOutcome, stocks: &[String]) -> Result<Propagation> {
        let predicted = forecast.report.select(self.config.selection)?;
        let mean = forecast.training.historical_mean();
        let adjuster = CorrelationAdjuster::new(predicted, mean)?;
        let projector = FinancialProjector::new(self.config.policy);

        tracing::info!(
            selection = %self.config.selection,
            predicted,
            mean,
            ratio = adjuster.ratio(),
            policy = %self.config.policy,
            "propagating forecast"
        );

        let stocks = stocks
            .iter()
            .map(|stock| {
                let outcome = match self.project_stock(stock, &adjuster, &projector) {
                    Ok(projection) => StockOutcome::Projected(Box::new(projection)),
                    Err(e) => {
                        tracing::warn!(stock = %stock, error = %e, "stock skipped");
                        StockOutcome::Skipped(e)
                    }
                };
                (stock.clone(), outcome)
            })
            .collect();

        Ok(Propagation {
            selection: self.config.selection,
            predicted,
            mean,
            ratio: adjuster.ratio(),
            stocks,
        })
    }

    /// Forecasts and propagates in one call.
    ///
    /// # Errors
    ///
    /// Fails as [`Pipeline::forecast`] does. Propagation errors are carried
    /// in [`PipelineOutput::propagation`].
    pub fn run(&self, request: &PipelineRequest) -> Result<PipelineOutput> {
        let forecast = self.forecast(&request.industry, &request.input)?;
        let propagation = self.propagate(&forecast, &request.stocks);
        Ok(PipelineOutput {
            forecast,
            propagation,
        })
    }

    fn project_stock(
        &self,
        stock: &str,
        adjuster: &CorrelationAdjuster,
        projector: &FinancialProjector,
    ) -> Result<StockProjection> {
        let snapshot = self
            .store
            .financials(stock)?
            .snapshot(self.config.statement, &self.config.target_date)?;

        let correlations = match self.store.correlations().row(stock) {
            Ok(row) => Some(adjuster.adjust(row)),
            Err(e) if e.is_not_found() && projector.policy() == ProjectionPolicy::RatioScaling => {
                tracing::debug!(stock, error = %e, "projecting without correlation results");
                None
            }
            Err(e) => return Err(e),
        };
        let statement = projector.project(&snapshot, adjuster.ratio(), correlations.as_ref())?;

        let interpretations = correlations
            .iter()
            .flat_map(|row| row.entries.iter())
            .filter_map(|entry| {
                match self.interpretations.lookup(&entry.metric, entry.bucket) {
                    Ok(text) => Some(Interpretation {
                        metric: entry.metric.clone(),
                        bucket: entry.bucket,
                        text: text.to_string(),
                    }),
                    Err(e) => {
                        tracing::debug!(metric = %entry.metric, error = %e, "no interpretation");
                        None
                    }
                }
            })
            .collect();

        let latest_price = self
            .store
            .prices(stock)
            .ok()
            .and_then(|history| history.latest(PRICE_COLUMN).ok().flatten());

        Ok(StockProjection {
            correlations,
            interpretations,
            statement,
            latest_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use iipcast_data::{
        CorrelationTable, FinancialStatements, IndustryIndex, PriceHistory, StockCorrelationRow,
    };
    use polars::prelude::*;

    const FOOD: &str = "Manufacture of Food Products";

    fn leading() -> Vec<String> {
        vec![
            "Consumer Spending Trends".to_string(),
            "Agricultural Output".to_string(),
            "Retail Sales Data".to_string(),
        ]
    }

    fn store(periods: usize) -> DataStore {
        let labels: Vec<Period> = (0..periods).map(|i| format!("P{i:02}")).collect();
        let index_values: Vec<Option<f64>> = (0..periods)
            .map(|i| Some(110.0 + i as f64 + (i as f64 * 0.9).sin()))
            .collect();
        let mut series = BTreeMap::new();
        series.insert(FOOD.to_string(), index_values);
        let index = IndustryIndex::from_series(labels.clone(), series).unwrap();

        let mut columns = BTreeMap::new();
        for (k, name) in leading().into_iter().enumerate() {
            let values = (0..periods)
                .map(|i| Some(100.0 + (i * (k + 1)) as f64 + (i as f64 * 0.4 + k as f64).cos()))
                .collect();
            columns.insert(name, values);
        }
        let indicators = IndicatorTable::from_columns(labels, columns).unwrap();

        let correlations = CorrelationTable::from_rows(vec![
            StockCorrelationRow::new(
                "Britannia",
                vec![
                    ("Total Revenue/Income".to_string(), 0.85),
                    ("Net Profit".to_string(), 0.4),
                    ("Unlisted Metric".to_string(), 0.1),
                ],
            )
            .unwrap(),
            StockCorrelationRow::new("Nestle", vec![("Net Profit".to_string(), -0.5)]).unwrap(),
        ]);

        let statements = FinancialStatements::new("Britannia")
            .with_sheet(
                StatementKind::IncomeStatement,
                df!(
                    "Date" => &["Mar 2024", "Jun 2024"],
                    "Total Revenue/Income" => &[900.0, 1000.0],
                    "Net Profit" => &[90.0, 100.0]
                )
                .unwrap(),
            )
            .unwrap();
        let prices = PriceHistory::new(
            "Britannia",
            df!("Date" => &["2024-06-27", "2024-06-28"], "Close" => &[5100.0, 5120.5]).unwrap(),
        );

        DataStore::new(index, correlations)
            .with_indicators(FOOD, indicators)
            .with_financials(statements)
            .with_prices(prices)
    }

    fn manual_values() -> IndicatorInput {
        IndicatorInput::Manual(leading().into_iter().map(|n| (n, 100.0)).collect())
    }

    #[test]
    fn test_manual_end_to_end() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let pipeline = Pipeline::new(&store, &catalog, &lookup, PipelineConfig::default());

        let output = pipeline
            .run(&PipelineRequest {
                industry: FOOD.to_string(),
                input: manual_values(),
                stocks: vec!["Britannia".to_string()],
            })
            .unwrap();

        let report = &output.forecast.report;
        assert!(report.get(ModelKind::Arima).unwrap().is_err());
        for kind in [ModelKind::Linear, ModelKind::Forest] {
            let Some(Ok(model)) = report.get(kind) else {
                panic!("{kind} should succeed on one row");
            };
            assert_relative_eq!(model.rmse, 0.0);
        }

        let propagation = output.propagation.unwrap();
        assert_relative_eq!(propagation.ratio, 1.0);
        let StockOutcome::Projected(projection) = &propagation.stocks[0].1 else {
            panic!("Britannia should be projected");
        };
        let revenue = projection
            .correlations
            .as_ref()
            .and_then(|row| row.get("Total Revenue/Income"))
            .unwrap();
        assert_relative_eq!(revenue.adjusted, 0.85);
        assert_eq!(revenue.bucket, CorrelationBucket::StrongPositive);
        assert_relative_eq!(
            projection.statement.line("Total Revenue/Income").unwrap().predicted,
            1000.0
        );
        assert_eq!(projection.latest_price, Some(5120.5));
        // "Unlisted Metric" has no interpretation text and is omitted
        assert_eq!(projection.interpretations.len(), 2);
    }

    #[test]
    fn test_stored_history_runs_all_models() {
        let store = store(24);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let config = PipelineConfig {
            selection: ForecastSelection::Linear,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&store, &catalog, &lookup, config);

        let outcome = pipeline.forecast(FOOD, &IndicatorInput::Stored).unwrap();
        assert_eq!(outcome.training.len(), 23);
        assert_eq!(outcome.report.successes().count(), 3);

        let propagation = pipeline
            .propagate(&outcome, &["Britannia".to_string()])
            .unwrap();
        let linear = outcome.report.select(ForecastSelection::Linear).unwrap();
        assert_relative_eq!(propagation.predicted, linear);
        assert_relative_eq!(
            propagation.ratio,
            linear / outcome.training.historical_mean(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_snapshot_skips_only_that_stock() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let pipeline = Pipeline::new(&store, &catalog, &lookup, PipelineConfig::default());

        let output = pipeline
            .run(&PipelineRequest {
                industry: FOOD.to_string(),
                input: manual_values(),
                stocks: vec![
                    "Nestle".to_string(),
                    "Britannia".to_string(),
                    "Unknown".to_string(),
                ],
            })
            .unwrap();
        let stocks = output.propagation.unwrap().stocks;

        assert!(matches!(
            &stocks[0].1,
            StockOutcome::Skipped(IipcastError::NotFound(_))
        ));
        assert!(matches!(&stocks[1].1, StockOutcome::Projected(_)));
        assert!(matches!(
            &stocks[2].1,
            StockOutcome::Skipped(IipcastError::NotFound(_))
        ));
    }

    fn store_with_uncorrelated_stock() -> DataStore {
        let statements = FinancialStatements::new("Dabur")
            .with_sheet(
                StatementKind::IncomeStatement,
                df!(
                    "Date" => &["Jun 2024"],
                    "Total Revenue/Income" => &[500.0],
                    "Net Profit" => &[50.0]
                )
                .unwrap(),
            )
            .unwrap();
        store(4).with_financials(statements)
    }

    #[test]
    fn test_ratio_scaling_without_correlation_row() {
        let store = store_with_uncorrelated_stock();
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let config = PipelineConfig {
            manual_target: 80.0,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&store, &catalog, &lookup, config);

        let output = pipeline
            .run(&PipelineRequest {
                industry: FOOD.to_string(),
                input: manual_values(),
                stocks: vec!["Dabur".to_string()],
            })
            .unwrap();
        let propagation = output.propagation.unwrap();
        assert_eq!(pipeline.config().policy, ProjectionPolicy::RatioScaling);

        let StockOutcome::Projected(projection) = &propagation.stocks[0].1 else {
            panic!("Dabur should be projected without correlation results");
        };
        assert!(projection.correlations.is_none());
        assert!(projection.interpretations.is_empty());
        assert_relative_eq!(
            projection.statement.line("Net Profit").unwrap().predicted,
            50.0 * propagation.ratio,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_correlation_growth_without_correlation_row_skips() {
        let store = store_with_uncorrelated_stock();
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let config = PipelineConfig {
            policy: ProjectionPolicy::CorrelationGrowth,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&store, &catalog, &lookup, config);

        let outcome = pipeline.forecast(FOOD, &manual_values()).unwrap();
        let propagation = pipeline
            .propagate(&outcome, &["Dabur".to_string(), "Britannia".to_string()])
            .unwrap();
        assert!(matches!(
            &propagation.stocks[0].1,
            StockOutcome::Skipped(IipcastError::NotFound(_))
        ));
        assert!(matches!(&propagation.stocks[1].1, StockOutcome::Projected(_)));
    }

    #[test]
    fn test_performance_view_aligns_models() {
        let store = store(24);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let pipeline = Pipeline::new(&store, &catalog, &lookup, PipelineConfig::default());

        let outcome = pipeline.forecast(FOOD, &IndicatorInput::Stored).unwrap();
        let rows = outcome.performance();
        assert_eq!(rows.len(), outcome.training.len());
        assert_eq!(rows[0].period, outcome.training.periods[0]);
        assert_relative_eq!(rows[0].actual, outcome.training.y[0]);

        // ARIMA starts one period later than the indicator models
        assert!(rows[0].prediction(ModelKind::Arima).is_none());
        assert!(rows[0].prediction(ModelKind::Linear).is_some());
        assert!(rows[0].prediction(ModelKind::Forest).is_some());

        let Some(Ok(arima)) = outcome.report.get(ModelKind::Arima) else {
            panic!("arima should succeed on 23 rows");
        };
        let last = rows.len() - 1;
        assert_eq!(rows[1].prediction(ModelKind::Arima), Some(arima.in_sample[0]));
        assert_eq!(
            rows[last].prediction(ModelKind::Arima),
            arima.in_sample.last().copied()
        );
    }

    #[test]
    fn test_performance_view_manual_row() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let pipeline = Pipeline::new(&store, &catalog, &lookup, PipelineConfig::default());

        let outcome = pipeline.forecast(FOOD, &manual_values()).unwrap();
        let rows = outcome.performance();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].predictions.len(), 3);
        assert_eq!(rows[0].prediction(ModelKind::Linear), Some(100.0));
        assert_eq!(rows[0].prediction(ModelKind::Arima), None);
    }

    #[test]
    fn test_missing_target_date_is_not_found() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let config = PipelineConfig {
            target_date: "Dec 2030".to_string(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(&store, &catalog, &lookup, config);

        let outcome = pipeline.forecast(FOOD, &manual_values()).unwrap();
        let propagation = pipeline
            .propagate(&outcome, &["Britannia".to_string()])
            .unwrap();
        assert!(matches!(
            &propagation.stocks[0].1,
            StockOutcome::Skipped(e) if e.is_not_found()
        ));
    }

    #[test]
    fn test_zero_mean_fails_propagation_only() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let config = PipelineConfig {
            manual_target: 0.0,
            ..Default::default()
        };
        let pipeline = Pipeline::new(&store, &catalog, &lookup, config);

        let output = pipeline
            .run(&PipelineRequest {
                industry: FOOD.to_string(),
                input: manual_values(),
                stocks: vec!["Britannia".to_string()],
            })
            .unwrap();
        assert_eq!(output.forecast.report.successes().count(), 2);
        assert!(matches!(
            output.propagation,
            Err(IipcastError::DivideByZero(_))
        ));
    }

    #[test]
    fn test_unknown_industry() {
        let store = store(4);
        let catalog = IndicatorCatalog::builtin().unwrap();
        let lookup = InterpretationLookup::builtin().unwrap();
        let pipeline = Pipeline::new(&store, &catalog, &lookup, PipelineConfig::default());
        assert!(pipeline.forecast("Manufacture of Widgets", &manual_values()).is_err());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "policy": "correlation-growth" }"#).unwrap();
        assert_eq!(config.policy, ProjectionPolicy::CorrelationGrowth);
        assert_eq!(config.target_date, DEFAULT_TARGET_DATE);
        assert_eq!(config.selection, ForecastSelection::Linear);
        assert_eq!(config.engine.forest.n_trees, 100);
    }
}
