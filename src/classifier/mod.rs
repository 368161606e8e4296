//! End-to-end food-group classification: training, persistence and prediction.
//!
//! A [`ArtifactStore`] names the directory holding the fitted model and
//! vectorizer. [`train_and_save_model`] fills it from a dataset and
//! [`FoodClassifier`] reads it back to label new item names.

pub mod artifacts;
pub mod predictor;
pub mod trainer;

pub use artifacts::{ArtifactStore, MODEL_FILE, VECTORIZER_FILE};
pub use predictor::{FoodClassifier, predict_food_groups};
pub use trainer::{TrainingOutcome, extract_features, train_and_save_model};
