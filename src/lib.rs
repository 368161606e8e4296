//! # Pantry
//!
//! Food-group classification of short food item labels such as
//! "Chocolate Milk" or "Pork Chips".
//!
//! ## Pipeline
//!
//! - Load a labeled CSV and drop rows without a usable name or food group
//! - Turn names into TF-IDF vectors with an English analysis chain
//! - Fit a multinomial logistic regression on a seeded hold-out split
//! - Persist the model and vectorizer, then label new names with them
//!
//! ```no_run
//! use pantry::classifier::{ArtifactStore, predict_food_groups, train_and_save_model};
//! use pantry::config::PipelineConfig;
//!
//! let config = PipelineConfig::new("food_data.csv", "models");
//! let outcome = train_and_save_model(&config)?;
//! println!("{}", outcome.report);
//!
//! let codes = predict_food_groups(&ArtifactStore::new("models"), &["Apple"])?;
//! # Ok::<(), pantry::error::PantryError>(())
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod ml;

pub mod prelude {
    pub use crate::classifier::{
        ArtifactStore, FoodClassifier, TrainingOutcome, predict_food_groups, train_and_save_model,
    };
    pub use crate::config::PipelineConfig;
    pub use crate::dataset::{FoodItem, FoodTable, load_data, preprocess_data};
    pub use crate::error::{PantryError, Result};
    pub use crate::labels::LABEL_MAPPING;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
