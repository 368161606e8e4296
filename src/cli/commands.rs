//! Entry behavior of the pantry binary.

use std::io::Write;

use anyhow::{Context, Result};
use log::info;

use crate::classifier::{ArtifactStore, FoodClassifier, train_and_save_model};
use crate::cli::args::PantryArgs;
use crate::cli::output::{SKIP_TRAINING_MESSAGE, write_prediction, write_report};

/// Items labeled on every run.
pub const DEMO_ITEMS: [&str; 5] = [
    "Apple",
    "Chicken Salad",
    "Pork Chips",
    "Milk Cake",
    "Chocolate Milk",
];

/// Run the binary against stdout.
pub fn execute_command(args: PantryArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

/// Train when no model is saved, then print a category for each demo item.
pub fn run<W: Write>(args: &PantryArgs, out: &mut W) -> Result<()> {
    let config = args.pipeline_config();
    let store = ArtifactStore::new(&config.artifact_dir);

    if store.model_exists() {
        writeln!(out, "{SKIP_TRAINING_MESSAGE}")?;
    } else {
        info!("no model in {}, training", store.dir().display());
        let outcome = train_and_save_model(&config)
            .with_context(|| format!("failed to train from {}", config.dataset_path.display()))?;
        write_report(out, &outcome.report)?;
    }

    let classifier = FoodClassifier::load(&store).with_context(|| {
        format!("failed to load artifacts from {}", store.dir().display())
    })?;
    let categories = classifier
        .predict_categories(&DEMO_ITEMS)
        .context("failed to classify demo items")?;

    for (item, category) in DEMO_ITEMS.iter().zip(categories) {
        write_prediction(out, item, category)?;
    }
    Ok(())
}
