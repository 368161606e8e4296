//! Shared model traits and bookkeeping types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::sparse::SparseMatrix;

/// Trait for classifiers over sparse feature rows.
pub trait Classifier: Send + Sync {
    /// Fit the model on feature rows `x` with integer labels `y`.
    fn fit(&mut self, x: &SparseMatrix, y: &[usize]) -> Result<()>;

    /// Predict one label per row of `x`.
    fn predict(&self, x: &SparseMatrix) -> Result<Vec<usize>>;

    /// Check if the model is trained.
    fn is_trained(&self) -> bool;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Model metadata for tracking model information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Crate version that produced the model.
    pub version: String,
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
}

impl ModelMetadata {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            version: crate::VERSION.to_string(),
            trained_at: chrono::Utc::now(),
            training_examples: 0,
            hyperparameters: HashMap::new(),
        }
    }
}

/// Training statistics for a fitted model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Objective value after each iteration.
    pub training_losses: Vec<f64>,
    /// Number of optimizer iterations completed.
    pub iterations: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Final objective value.
    pub final_training_loss: f64,
    /// Whether the gradient tolerance was reached before the iteration cap.
    pub converged: bool,
}
