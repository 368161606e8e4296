//! Classification metrics for evaluating the classifier on held-out data.
//!
//! [`ClassificationReport`] computes precision, recall, F1 and support per
//! label, plus accuracy and the macro and support-weighted averages. Its
//! `Display` output is the usual fixed-width text table.

use std::fmt;

use crate::error::{PantryError, Result};

/// Scores for a single label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: usize,
    /// Display name used in the rendered table.
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of this label.
    pub support: usize,
}

/// Per-label and averaged scores for one set of predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    /// Build a report from true and predicted labels.
    ///
    /// Labels are the sorted union of `y_true` and `y_pred`; `name_of` turns
    /// each one into the text shown in the table.
    pub fn new<F>(y_true: &[usize], y_pred: &[usize], name_of: F) -> Result<Self>
    where
        F: Fn(usize) -> String,
    {
        if y_true.len() != y_pred.len() {
            return Err(PantryError::invalid_argument(format!(
                "{} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }
        if y_true.is_empty() {
            return Err(PantryError::invalid_argument(
                "cannot evaluate an empty prediction set",
            ));
        }

        let mut labels: Vec<usize> = y_true.iter().chain(y_pred).copied().collect();
        labels.sort_unstable();
        labels.dedup();

        let classes: Vec<ClassMetrics> = labels
            .iter()
            .map(|&label| {
                let (mut tp, mut fp, mut fn_count) = (0usize, 0usize, 0usize);
                for (&t, &p) in y_true.iter().zip(y_pred) {
                    match (t == label, p == label) {
                        (true, true) => tp += 1,
                        (false, true) => fp += 1,
                        (true, false) => fn_count += 1,
                        (false, false) => {}
                    }
                }
                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_count);
                ClassMetrics {
                    label,
                    name: name_of(label),
                    precision,
                    recall,
                    f1: f1_from(precision, recall),
                    support: tp + fn_count,
                }
            })
            .collect();

        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        let total = y_true.len();
        let n_labels = classes.len() as f64;

        let mean = |field: fn(&ClassMetrics) -> f64| -> f64 {
            classes.iter().map(field).sum::<f64>() / n_labels
        };
        let weighted = |field: fn(&ClassMetrics) -> f64| -> f64 {
            classes
                .iter()
                .map(|m| field(m) * m.support as f64)
                .sum::<f64>()
                / total as f64
        };

        let macro_avg = ClassMetrics {
            label: usize::MAX,
            name: "macro avg".to_string(),
            precision: mean(|m| m.precision),
            recall: mean(|m| m.recall),
            f1: mean(|m| m.f1),
            support: total,
        };
        let weighted_avg = ClassMetrics {
            label: usize::MAX,
            name: "weighted avg".to_string(),
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1: weighted(|m| m.f1),
            support: total,
        };

        Ok(Self {
            classes,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
        })
    }

    /// Metrics for one label, if it appeared in the evaluated data.
    pub fn class(&self, label: usize) -> Option<&ClassMetrics> {
        self.classes.iter().find(|m| m.label == label)
    }

    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|m| m.name.chars().count())
            .chain(std::iter::once(self.weighted_avg.name.len()))
            .max()
            .unwrap_or_default();

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for metrics in &self.classes {
            write_row(f, metrics, width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "",
            "",
            "accuracy",
            self.accuracy,
            self.support()
        )?;
        write_row(f, &self.macro_avg, width)?;
        write_row(f, &self.weighted_avg, width)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, m: &ClassMetrics, width: usize) -> fmt::Result {
    writeln!(
        f,
        "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
        m.name, m.precision, m.recall, m.f1, m.support
    )
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1_from(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}
