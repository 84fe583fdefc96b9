//! Forecast engine.
//!
//! Fits every configured estimator on the same training set, scores each by
//! in-sample RMSE and forecasts the next period from the future indicator
//! row. Estimators are independent: one failing never prevents the others
//! from running.

use std::fmt;
use std::str::FromStr;

use iipcast_traits::{stats, FeatureMatrix, IipcastError, Regressor, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::arima::{Arima, ArimaConfig};
use crate::forest::{RandomForest, RandomForestConfig};
use crate::linear::{LinearRegression, LinearRegressionConfig};

/// The estimators the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Ordinary least squares.
    Linear,
    /// ARIMA(5, 1, 0) on the target.
    Arima,
    /// Random forest regression.
    Forest,
}

impl ModelKind {
    /// Every estimator in run order.
    pub const ALL: [Self; 3] = [Self::Linear, Self::Arima, Self::Forest];

    /// Short identifier.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Arima => "arima",
            Self::Forest => "forest",
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear Regression",
            Self::Arima => "ARIMA",
            Self::Forest => "Random Forest",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which forecast feeds the propagation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSelection {
    /// Linear regression forecast.
    #[default]
    Linear,
    /// ARIMA forecast.
    Arima,
    /// Random forest forecast.
    Forest,
    /// Mean of every successful forecast.
    Consensus,
}

impl ForecastSelection {
    /// The single model selected, if any.
    pub const fn model(&self) -> Option<ModelKind> {
        match self {
            Self::Linear => Some(ModelKind::Linear),
            Self::Arima => Some(ModelKind::Arima),
            Self::Forest => Some(ModelKind::Forest),
            Self::Consensus => None,
        }
    }
}

impl fmt::Display for ForecastSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model() {
            Some(kind) => f.write_str(kind.name()),
            None => f.write_str("consensus"),
        }
    }
}

impl FromStr for ForecastSelection {
    type Err = IipcastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "ols" => Ok(Self::Linear),
            "arima" => Ok(Self::Arima),
            "forest" | "rf" | "random-forest" => Ok(Self::Forest),
            "consensus" | "mean" => Ok(Self::Consensus),
            other => Err(IipcastError::NotFound(format!(
                "unknown forecast selection '{other}' (expected linear, arima, forest or consensus)"
            ))),
        }
    }
}

/// Estimator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Linear regression settings.
    #[serde(default)]
    pub linear: LinearRegressionConfig,
    /// ARIMA settings.
    #[serde(default)]
    pub arima: ArimaConfig,
    /// Random forest settings.
    #[serde(default)]
    pub forest: RandomForestConfig,
}

/// Output of one successful estimator.
#[derive(Debug, Clone)]
pub struct ModelForecast {
    /// Which estimator produced it.
    pub kind: ModelKind,
    /// In-sample predictions, starting at `offset`.
    pub in_sample: Array1<f64>,
    /// First training row covered by `in_sample`.
    pub offset: usize,
    /// RMSE between the covered targets and `in_sample`.
    pub rmse: f64,
    /// One-step-ahead forecast.
    pub forecast: f64,
    /// Named fitted parameters, empty for models without any.
    pub parameters: Vec<(String, f64)>,
}

impl ModelForecast {
    /// In-sample prediction for training row `row`, `None` before `offset`.
    pub fn prediction_at(&self, row: usize) -> Option<f64> {
        row.checked_sub(self.offset)
            .and_then(|i| self.in_sample.get(i).copied())
    }
}

/// Result of one estimator, success or failure.
#[derive(Debug)]
pub struct ModelOutcome {
    /// Which estimator ran.
    pub kind: ModelKind,
    /// Its forecast or why it failed.
    pub result: Result<ModelForecast>,
}

/// Forecasts of every estimator for one training set.
#[derive(Debug)]
pub struct ForecastReport {
    /// Target values the models were fitted on.
    pub actual: Array1<f64>,
    /// One outcome per estimator, in run order.
    pub outcomes: Vec<ModelOutcome>,
}

impl ForecastReport {
    /// Outcome of one estimator.
    pub fn get(&self, kind: ModelKind) -> Option<&Result<ModelForecast>> {
        self.outcomes
            .iter()
            .find(|o| o.kind == kind)
            .map(|o| &o.result)
    }

    /// Every successful forecast.
    pub fn successes(&self) -> impl Iterator<Item = &ModelForecast> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Every failure with its estimator.
    pub fn failures(&self) -> impl Iterator<Item = (ModelKind, &IipcastError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.kind, e)))
    }

    /// Mean of every successful forecast.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::InsufficientData`] when every estimator failed.
    pub fn consensus(&self) -> Result<f64> {
        let forecasts: Vec<f64> = self.successes().map(|m| m.forecast).collect();
        if forecasts.is_empty() {
            return Err(IipcastError::InsufficientData(
                "no estimator produced a forecast".into(),
            ));
        }
        Ok(stats::mean(&forecasts))
    }

    /// The forecast chosen by `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`IipcastError::ModelFit`] when the selected estimator failed,
    /// or the [`ForecastReport::consensus`] error.
    pub fn select(&self, selection: ForecastSelection) -> Result<f64> {
        let Some(kind) = selection.model() else {
            return self.consensus();
        };
        match self.get(kind) {
            Some(Ok(model)) => Ok(model.forecast),
            Some(Err(err)) => Err(IipcastError::model_fit(
                kind.name(),
                format!("no forecast available ({err})"),
            )),
            None => Err(IipcastError::NotFound(format!(
                "{kind} was not run"
            ))),
        }
    }
}

/// Runs the three estimators over one training set.
pub struct ForecastEngine {
    models: Vec<(ModelKind, Box<dyn Regressor>)>,
}

impl fmt::Debug for ForecastEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastEngine")
            .field(
                "models",
                &self.models.iter().map(|(k, _)| k.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ForecastEngine {
    /// Creates an engine with linear, ARIMA and random forest estimators.
    pub fn new(config: EngineConfig) -> Self {
        let models: Vec<(ModelKind, Box<dyn Regressor>)> = vec![
            (
                ModelKind::Linear,
                Box::new(LinearRegression::new(config.linear)),
            ),
            (ModelKind::Arima, Box::new(Arima::new(config.arima))),
            (ModelKind::Forest, Box::new(RandomForest::new(config.forest))),
        ];
        Self { models }
    }

    /// Fits every estimator and forecasts from `future_row`.
    pub fn run(&self, x: &FeatureMatrix, y: &Array1<f64>, future_row: &[f64]) -> ForecastReport {
        let outcomes = self
            .models
            .iter()
            .map(|(kind, model)| {
                let result = evaluate(*kind, model.as_ref(), x, y, future_row);
                match &result {
                    Ok(m) => tracing::info!(
                        model = kind.name(),
                        rmse = m.rmse,
                        forecast = m.forecast,
                        "model forecast"
                    ),
                    Err(e) => tracing::warn!(model = kind.name(), error = %e, "model failed"),
                }
                ModelOutcome {
                    kind: *kind,
                    result,
                }
            })
            .collect();

        ForecastReport {
            actual: y.clone(),
            outcomes,
        }
    }
}

fn evaluate(
    kind: ModelKind,
    model: &dyn Regressor,
    x: &FeatureMatrix,
    y: &Array1<f64>,
    future_row: &[f64],
) -> Result<ModelForecast> {
    let fitted = model.fit(x, y)?;
    let in_sample = fitted.predict_in_sample();
    let offset = fitted.in_sample_offset();

    let covered: Vec<f64> = y.iter().skip(offset).copied().collect();
    if covered.len() != in_sample.len() {
        return Err(IipcastError::model_fit(
            kind.name(),
            format!(
                "{} in-sample predictions for {} targets",
                in_sample.len(),
                covered.len()
            ),
        ));
    }
    if in_sample.iter().any(|v| !v.is_finite()) {
        return Err(IipcastError::model_fit(
            kind.name(),
            "non-finite in-sample prediction",
        ));
    }
    let rmse = stats::rmse(&covered, &in_sample.to_vec());

    let forecast = fitted.predict_one(future_row)?;
    if !forecast.is_finite() {
        return Err(IipcastError::model_fit(kind.name(), "non-finite forecast"));
    }

    Ok(ModelForecast {
        kind,
        in_sample,
        offset,
        rmse,
        forecast,
        parameters: fitted.parameters(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn names() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    fn training(n: usize) -> (FeatureMatrix, Array1<f64>) {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let t = i as f64;
                vec![100.0 + t, 90.0 + 2.0 * t + (t * 1.3).cos(), 80.0 + (t * 0.7).sin()]
            })
            .collect();
        let y: Array1<f64> = rows.iter().map(|r| 0.5 * r[0] + 0.2 * r[1] + 10.0).collect();
        (FeatureMatrix::from_rows(names(), &rows).unwrap(), y)
    }

    fn engine() -> ForecastEngine {
        ForecastEngine::new(EngineConfig {
            forest: RandomForestConfig {
                n_trees: 20,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_short_history_fails_arima_only() {
        let (x, y) = training(5);
        let report = engine().run(&x, &y, &[105.0, 100.0, 80.0]);

        assert!(matches!(
            report.get(ModelKind::Arima),
            Some(Err(IipcastError::InsufficientData(_)))
        ));
        assert!(matches!(report.get(ModelKind::Linear), Some(Ok(_))));
        assert!(matches!(report.get(ModelKind::Forest), Some(Ok(_))));
        assert_eq!(report.successes().count(), 2);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_single_manual_row() {
        let x = FeatureMatrix::from_rows(names(), &[vec![100.0, 100.0, 100.0]]).unwrap();
        let y = Array1::from_vec(vec![100.0]);
        let report = engine().run(&x, &y, &[100.0, 100.0, 100.0]);

        for kind in [ModelKind::Linear, ModelKind::Forest] {
            let Some(Ok(model)) = report.get(kind) else {
                panic!("{kind} should succeed");
            };
            assert_relative_eq!(model.rmse, 0.0);
            assert_relative_eq!(model.forecast, 100.0);
        }
        assert!(report.get(ModelKind::Arima).unwrap().is_err());
        assert_relative_eq!(report.consensus().unwrap(), 100.0);
    }

    #[test]
    fn test_full_history_runs_all_models() {
        let (x, y) = training(24);
        let report = engine().run(&x, &y, &[124.0, 138.0, 80.5]);

        assert_eq!(report.successes().count(), 3);
        let Some(Ok(linear)) = report.get(ModelKind::Linear) else {
            panic!("linear should succeed");
        };
        assert_relative_eq!(linear.rmse, 0.0, epsilon = 1e-8);
        assert_relative_eq!(linear.forecast, 0.5 * 124.0 + 0.2 * 138.0 + 10.0, epsilon = 1e-8);

        let Some(Ok(arima)) = report.get(ModelKind::Arima) else {
            panic!("arima should succeed");
        };
        assert_eq!(arima.offset, 1);
        assert_eq!(arima.in_sample.len(), 23);
        assert!(arima.rmse.is_finite());
        assert_eq!(arima.parameters.len(), 5);
        assert_eq!(arima.prediction_at(0), None);
        assert_eq!(arima.prediction_at(1), Some(arima.in_sample[0]));
        assert_eq!(arima.prediction_at(23), Some(arima.in_sample[22]));
        assert_eq!(arima.prediction_at(24), None);

        assert_eq!(linear.prediction_at(0), Some(linear.in_sample[0]));
        assert_eq!(linear.parameters[0].0, "intercept");
        assert_eq!(linear.parameters.len(), 4);
    }

    #[test]
    fn test_selection() {
        let (x, y) = training(5);
        let report = engine().run(&x, &y, &[105.0, 100.0, 80.0]);

        let linear = report.select(ForecastSelection::Linear).unwrap();
        let forest = report.select(ForecastSelection::Forest).unwrap();
        assert_relative_eq!(
            report.select(ForecastSelection::Consensus).unwrap(),
            (linear + forest) / 2.0
        );
        assert!(matches!(
            report.select(ForecastSelection::Arima),
            Err(IipcastError::ModelFit { .. })
        ));
    }

    #[test]
    fn test_consensus_without_successes() {
        let (x, y) = training(3);
        // wrong row width breaks linear and forest, three rows is too short for ARIMA
        let report = engine().run(&x, &y, &[1.0]);
        assert_eq!(report.successes().count(), 0);
        assert!(matches!(
            report.consensus(),
            Err(IipcastError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(
            "Linear".parse::<ForecastSelection>().unwrap(),
            ForecastSelection::Linear
        );
        assert_eq!(
            "consensus".parse::<ForecastSelection>().unwrap(),
            ForecastSelection::Consensus
        );
        assert!("lstm".parse::<ForecastSelection>().is_err());
        assert_eq!(ForecastSelection::default(), ForecastSelection::Linear);
        assert_eq!(ForecastSelection::Forest.to_string(), "forest");
    }
}
