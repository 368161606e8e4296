//! Learning components: feature extraction, model fitting and evaluation.
//!
//! - [`TfIdfVectorizer`]: item names to sparse TF-IDF rows
//! - [`LogisticRegression`]: multinomial classifier over those rows
//! - [`train_test_split`]: seeded hold-out partitioning
//! - [`ClassificationReport`]: per-class precision/recall/F1

pub mod logistic;
pub mod metrics;
pub mod models;
pub mod sparse;
pub mod split;
pub mod tfidf;

pub use logistic::LogisticRegression;
pub use metrics::{ClassMetrics, ClassificationReport};
pub use models::{Classifier, ModelMetadata, TrainingStats};
pub use sparse::{SparseMatrix, SparseRow};
pub use split::{SplitIndices, train_test_split};
pub use tfidf::TfIdfVectorizer;

/// Machine learning error types.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("Model not trained: {message}")]
    ModelNotTrained { message: String },

    #[error("Invalid feature vector: {message}")]
    InvalidFeatureVector { message: String },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Training data needs at least 2 classes, got {actual}")]
    InsufficientClasses { actual: usize },

    #[error("Empty vocabulary: documents contain only stop words or no words at all")]
    EmptyVocabulary,

    #[error("Invalid split: {message}")]
    InvalidSplit { message: String },
}
