//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_DATASET_PATH, PipelineConfig};

/// Pantry - classify food items into food groups
#[derive(Parser, Debug, Clone)]
#[command(name = "pantry")]
#[command(about = "Train a food-group classifier if needed, then label sample items")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PantryArgs {
    /// Labeled food dataset used when no model has been saved yet
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Directory holding food_model.bin and vectorizer.bin
    #[arg(long, default_value = ".")]
    pub artifact_dir: PathBuf,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl PantryArgs {
    /// Effective verbosity: 0 errors only, 1 warnings (default), 2 info, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(&self.dataset, &self.artifact_dir)
    }
}
