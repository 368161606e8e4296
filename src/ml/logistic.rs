//! Multinomial logistic regression over sparse features.
//!
//! The model keeps one weight row and one intercept per class seen during
//! fitting. It minimizes the softmax cross-entropy averaged over samples plus
//! an L2 penalty on the weights (intercepts are not penalized):
//!
//! ```text
//! J(W, b) = (1/n) Σ_i CE(softmax(W x_i + b), y_i) + ||W||² / (2 C n)
//! ```
//!
//! Optimization is full-batch gradient descent with a backtracking line search.
//! Fitting stops once the largest gradient component drops below `tol` or after
//! `max_iter` iterations.

use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::MLError;
use crate::ml::models::{Classifier, ModelMetadata, TrainingStats};
use crate::ml::sparse::{SparseMatrix, SparseRow};

/// Halvings tried per iteration before the line search gives up.
const MAX_BACKTRACKS: usize = 60;
/// Sufficient-decrease constant of the Armijo condition.
const ARMIJO: f64 = 0.5;
const MAX_STEP: f64 = 1e4;

/// Multinomial logistic regression classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Sorted distinct labels seen during fitting; row `k` of the weights belongs to `classes[k]`.
    classes: Vec<usize>,
    /// Row-major `classes.len() × n_features` weights.
    coefficients: Vec<f64>,
    intercepts: Vec<f64>,
    n_features: usize,
    /// Inverse regularization strength.
    c: f64,
    max_iter: usize,
    tol: f64,
    training_stats: Option<TrainingStats>,
    metadata: ModelMetadata,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    /// Unfitted model with `C = 1.0`, `max_iter = 1000`, `tol = 1e-4`.
    pub fn new() -> Self {
        Self::with_params(1.0, 1000, 1e-4)
    }

    pub fn with_params(c: f64, max_iter: usize, tol: f64) -> Self {
        let mut metadata = ModelMetadata::new("multinomial_logistic_regression");
        metadata.hyperparameters.insert("C".to_string(), c);
        metadata
            .hyperparameters
            .insert("max_iter".to_string(), max_iter as f64);
        metadata.hyperparameters.insert("tol".to_string(), tol);

        Self {
            classes: Vec::new(),
            coefficients: Vec::new(),
            intercepts: Vec::new(),
            n_features: 0,
            c,
            max_iter,
            tol,
            training_stats: None,
            metadata,
        }
    }

    /// Labels the model can predict, in weight-row order.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn training_stats(&self) -> Option<&TrainingStats> {
        self.training_stats.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Class probabilities per row, columns ordered like [`classes`](Self::classes).
    pub fn predict_proba(&self, x: &SparseMatrix) -> Result<Vec<Vec<f64>>> {
        self.check_input(x)?;
        let n_classes = self.classes.len();
        let mut probabilities = Vec::with_capacity(x.n_rows());
        let mut scores = vec![0.0; n_classes];

        for row in x.rows() {
            Self::scores(
                &self.coefficients,
                &self.intercepts,
                self.n_features,
                row,
                &mut scores,
            );
            let lse = log_sum_exp(&scores);
            probabilities.push(scores.iter().map(|s| (s - lse).exp()).collect());
        }

        Ok(probabilities)
    }

    fn check_input(&self, x: &SparseMatrix) -> Result<()> {
        if !self.is_trained() {
            return Err(MLError::ModelNotTrained {
                message: "call fit before predicting".to_string(),
            }
            .into());
        }
        if x.n_cols() != self.n_features {
            return Err(MLError::InvalidFeatureVector {
                message: format!(
                    "model expects {} features, got {}",
                    self.n_features,
                    x.n_cols()
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Raw class scores `W x + b` for one row.
    fn scores(
        weights: &[f64],
        intercepts: &[f64],
        n_features: usize,
        row: SparseRow<'_>,
        out: &mut [f64],
    ) {
        for (k, score) in out.iter_mut().enumerate() {
            let w = &weights[k * n_features..(k + 1) * n_features];
            *score = intercepts[k] + row.dot(w);
        }
    }
}

/// Objective evaluation bound to one training set.
struct Objective<'a> {
    x: &'a SparseMatrix,
    targets: &'a [usize],
    n_classes: usize,
    n_features: usize,
    /// `1 / (C n)`
    penalty: f64,
}

impl Objective<'_> {
    fn n_weights(&self) -> usize {
        self.n_classes * self.n_features
    }

    /// Objective value at `params` (weights followed by intercepts).
    fn loss(&self, params: &[f64]) -> f64 {
        let (weights, intercepts) = params.split_at(self.n_weights());
        let mut scores = vec![0.0; self.n_classes];
        let mut total = 0.0;

        for (row, &target) in self.x.rows().zip(self.targets) {
            LogisticRegression::scores(weights, intercepts, self.n_features, row, &mut scores);
            total += log_sum_exp(&scores) - scores[target];
        }

        let n = self.targets.len() as f64;
        total / n + 0.5 * self.penalty * weights.iter().map(|w| w * w).sum::<f64>()
    }

    /// Objective value and gradient at `params`.
    fn loss_and_gradient(&self, params: &[f64], gradient: &mut [f64]) -> f64 {
        let n_weights = self.n_weights();
        let (weights, intercepts) = params.split_at(n_weights);
        gradient.iter_mut().for_each(|g| *g = 0.0);

        let mut scores = vec![0.0; self.n_classes];
        let mut total = 0.0;

        for (row, &target) in self.x.rows().zip(self.targets) {
            LogisticRegression::scores(weights, intercepts, self.n_features, row, &mut scores);
            let lse = log_sum_exp(&scores);
            total += lse - scores[target];

            for (k, &score) in scores.iter().enumerate() {
                let mut residual = (score - lse).exp();
                if k == target {
                    residual -= 1.0;
                }
                gradient[n_weights + k] += residual;
                let offset = k * self.n_features;
                for (&col, &value) in row.indices.iter().zip(row.values) {
                    gradient[offset + col] += residual * value;
                }
            }
        }

        let n = self.targets.len() as f64;
        gradient.iter_mut().for_each(|g| *g /= n);
        for (g, w) in gradient[..n_weights].iter_mut().zip(weights) {
            *g += self.penalty * w;
        }

        total / n + 0.5 * self.penalty * weights.iter().map(|w| w * w).sum::<f64>()
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &SparseMatrix, y: &[usize]) -> Result<()> {
        let n_samples = x.n_rows();
        if n_samples == 0 {
            return Err(MLError::InsufficientTrainingData {
                min_samples: 1,
                actual: 0,
            }
            .into());
        }
        if n_samples != y.len() {
            return Err(MLError::InvalidFeatureVector {
                message: format!("{n_samples} feature rows but {} labels", y.len()),
            }
            .into());
        }

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(MLError::InsufficientClasses {
                actual: classes.len(),
            }
            .into());
        }

        // Every label is in `classes`, so the search always succeeds.
        let targets: Vec<usize> = y
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let objective = Objective {
            x,
            targets: &targets,
            n_classes: classes.len(),
            n_features: x.n_cols(),
            penalty: 1.0 / (self.c * n_samples as f64),
        };

        let start_time = Instant::now();
        let n_params = objective.n_weights() + classes.len();
        let mut params = vec![0.0; n_params];
        let mut gradient = vec![0.0; n_params];
        let mut candidate = vec![0.0; n_params];
        let mut step = 1.0;
        let mut losses = Vec::new();
        let mut converged = false;
        let mut iterations = 0;

        let mut loss = objective.loss_and_gradient(&params, &mut gradient);
        while iterations < self.max_iter {
            let max_gradient = gradient.iter().fold(0.0f64, |m, g| m.max(g.abs()));
            if max_gradient < self.tol {
                converged = true;
                break;
            }
            let gradient_sq: f64 = gradient.iter().map(|g| g * g).sum();

            let mut accepted = false;
            for _ in 0..MAX_BACKTRACKS {
                for ((c, p), g) in candidate.iter_mut().zip(&params).zip(&gradient) {
                    *c = p - step * g;
                }
                if objective.loss(&candidate) <= loss - ARMIJO * step * gradient_sq {
                    accepted = true;
                    break;
                }
                step *= 0.5;
            }
            if !accepted {
                debug!("line search stalled at iteration {iterations}");
                break;
            }

            std::mem::swap(&mut params, &mut candidate);
            loss = objective.loss_and_gradient(&params, &mut gradient);
            losses.push(loss);
            iterations += 1;
            step = (step * 2.0).min(MAX_STEP);
        }

        if converged {
            info!("logistic regression converged after {iterations} iterations (loss {loss:.6})");
        } else {
            warn!(
                "logistic regression stopped after {iterations} iterations without reaching tol={} (loss {loss:.6})",
                self.tol
            );
        }

        let n_weights = objective.n_weights();
        self.intercepts = params.split_off(n_weights);
        self.coefficients = params;
        self.n_features = x.n_cols();
        self.classes = classes;

        self.training_stats = Some(TrainingStats {
            training_losses: losses,
            iterations,
            training_time_ms: start_time.elapsed().as_millis() as u64,
            final_training_loss: loss,
            converged,
        });
        self.metadata.trained_at = chrono::Utc::now();
        self.metadata.training_examples = n_samples;

        Ok(())
    }

    fn predict(&self, x: &SparseMatrix) -> Result<Vec<usize>> {
        self.check_input(x)?;
        let mut scores = vec![0.0; self.classes.len()];

        Ok(x.rows()
            .map(|row| {
                Self::scores(
                    &self.coefficients,
                    &self.intercepts,
                    self.n_features,
                    row,
                    &mut scores,
                );
                let best = scores
                    .iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (k, &s)| {
                        if s > best.1 { (k, s) } else { best }
                    })
                    .0;
                self.classes[best]
            })
            .collect())
    }

    fn is_trained(&self) -> bool {
        !self.classes.is_empty()
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
