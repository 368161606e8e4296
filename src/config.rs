//! Pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PantryError, Result};

/// Dataset used when no other path is given.
pub const DEFAULT_DATASET_PATH: &str = "../public/food_data.csv";

/// Configuration for a training run and for locating artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CSV file with `name` and `Food Group` columns.
    pub dataset_path: PathBuf,
    /// Directory holding the model and vectorizer artifacts.
    pub artifact_dir: PathBuf,
    /// Fraction of rows held out for evaluation.
    pub test_size: f64,
    /// Seed for the train/test shuffle.
    pub random_state: u64,
    /// Optimizer iteration cap.
    pub max_iter: usize,
    /// Inverse L2 regularization strength.
    pub c: f64,
    /// Gradient tolerance for convergence.
    pub tol: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            artifact_dir: PathBuf::from("."),
            test_size: 0.2,
            random_state: 42,
            max_iter: 1000,
            c: 1.0,
            tol: 1e-4,
        }
    }
}

impl PipelineConfig {
    /// Default configuration reading `dataset_path` and writing to `artifact_dir`.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(dataset_path: P, artifact_dir: Q) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            artifact_dir: artifact_dir.into(),
            ..Self::default()
        }
    }

    /// Check value ranges before a run.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PantryError::invalid_config(format!(
                "test_size must be between 0 and 1, got {}",
                self.test_size
            )));
        }
        if self.max_iter == 0 {
            return Err(PantryError::invalid_config("max_iter must be positive"));
        }
        if self.c <= 0.0 {
            return Err(PantryError::invalid_config(format!(
                "c must be positive, got {}",
                self.c
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("../public/food_data.csv"));
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.max_iter, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_test_size() {
        let config = PipelineConfig {
            test_size: 1.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
