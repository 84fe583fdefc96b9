//! Random forest regression backed by smartcore.

use iipcast_traits::{FeatureMatrix, FittedModel, IipcastError, Regressor, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Configuration for [`RandomForest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestConfig {
    /// Number of trees.
    pub n_trees: u16,
    /// Seed for bootstrap sampling and feature selection.
    pub seed: u64,
    /// Maximum tree depth, unlimited when `None`.
    pub max_depth: Option<u16>,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// Minimum samples in a leaf.
    pub min_samples_leaf: usize,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Bagged regression trees with a fixed seed.
#[derive(Debug, Clone, Default)]
pub struct RandomForest {
    config: RandomForestConfig,
}

impl RandomForest {
    /// Creates the estimator.
    pub const fn new(config: RandomForestConfig) -> Self {
        Self { config }
    }

    fn parameters(&self) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters {
            n_trees: self.config.n_trees.into(),
            seed: self.config.seed,
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            ..Default::default()
        }
    }
}

impl Regressor for RandomForest {
    fn name(&self) -> &str {
        "forest"
    }

    fn min_observations(&self) -> usize {
        1
    }

    fn fit(&self, x: &FeatureMatrix, y: &Array1<f64>) -> Result<Box<dyn FittedModel>> {
        if x.nrows() != y.len() || y.len() < self.min_observations() {
            return Err(IipcastError::InsufficientData(format!(
                "random forest got {} feature rows for {} targets",
                x.nrows(),
                y.len()
            )));
        }

        let train = DenseMatrix::from_2d_vec(&x.to_rows());
        let forest = Forest::fit(&train, &y.to_vec(), self.parameters())
            .map_err(|e| IipcastError::model_fit(self.name(), e.to_string()))?;
        let fitted = forest
            .predict(&train)
            .map_err(|e| IipcastError::model_fit(self.name(), e.to_string()))?;

        tracing::debug!(trees = self.config.n_trees, rows = y.len(), "random forest fitted");
        Ok(Box::new(ForestFit {
            forest,
            width: x.ncols(),
            fitted: Array1::from(fitted),
        }))
    }
}

/// A fitted [`RandomForest`].
#[derive(Debug)]
pub struct ForestFit {
    forest: Forest,
    width: usize,
    fitted: Array1<f64>,
}

impl FittedModel for ForestFit {
    fn predict_in_sample(&self) -> Array1<f64> {
        self.fitted.clone()
    }

    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.width {
            return Err(IipcastError::InvalidData(format!(
                "forecast row has {} values, model expects {}",
                row.len(),
                self.width
            )));
        }
        let input = DenseMatrix::from_2d_vec(&vec![row.to_vec()]);
        let prediction = self
            .forest
            .predict(&input)
            .map_err(|e| IipcastError::model_fit("forest", e.to_string()))?;
        prediction
            .first()
            .copied()
            .ok_or_else(|| IipcastError::model_fit("forest", "empty prediction"))
    }
}
