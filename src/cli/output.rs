//! Text written to stdout by the CLI.

use std::io::{self, Write};

use crate::ml::ClassificationReport;

pub const SKIP_TRAINING_MESSAGE: &str = "Model already exists. Skipping training.";

pub fn write_report<W: Write>(out: &mut W, report: &ClassificationReport) -> io::Result<()> {
    writeln!(out, "Classification Report:")?;
    writeln!(out, "{report}")
}

pub fn write_prediction<W: Write>(out: &mut W, item: &str, category: &str) -> io::Result<()> {
    writeln!(out, "'{item}' belongs to category: {category}")
}
