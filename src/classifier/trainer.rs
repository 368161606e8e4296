//! Training run: load, clean, vectorize, split, fit, persist, evaluate.

use log::info;

use crate::classifier::artifacts::ArtifactStore;
use crate::config::PipelineConfig;
use crate::dataset::{FoodItem, load_data, preprocess_data};
use crate::error::Result;
use crate::labels::LABEL_MAPPING;
use crate::ml::{
    ClassificationReport, Classifier, LogisticRegression, ModelMetadata, SparseMatrix,
    TfIdfVectorizer, TrainingStats, train_test_split,
};

/// Result of [`train_and_save_model`].
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Scores on the held-out rows.
    pub report: ClassificationReport,
    /// Positions of the training rows among the cleaned items.
    pub train_indices: Vec<usize>,
    /// Positions of the held-out rows among the cleaned items.
    pub test_indices: Vec<usize>,
    pub metadata: ModelMetadata,
    pub stats: Option<TrainingStats>,
}

/// Fit a vectorizer on item names and return their TF-IDF rows and labels.
pub fn extract_features(
    items: &[FoodItem],
) -> Result<(SparseMatrix, Vec<usize>, TfIdfVectorizer)> {
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    let labels = items.iter().map(|item| item.food_group).collect();

    let mut vectorizer = TfIdfVectorizer::new()?;
    let features = vectorizer.fit_transform(&names)?;
    info!(
        "vectorized {} items into {} features",
        features.n_rows(),
        features.n_cols()
    );

    Ok((features, labels, vectorizer))
}

/// Train a classifier from `config.dataset_path` and save it to `config.artifact_dir`.
///
/// The vectorizer is fitted on every cleaned item before the hold-out split;
/// the model only sees the training partition.
pub fn train_and_save_model(config: &PipelineConfig) -> Result<TrainingOutcome> {
    config.validate()?;

    let table = load_data(&config.dataset_path)?;
    let items = preprocess_data(&table)?;
    let (features, labels, vectorizer) = extract_features(&items)?;

    let split = train_test_split(items.len(), config.test_size, config.random_state)?;
    info!(
        "split {} items into {} training and {} test rows",
        items.len(),
        split.train.len(),
        split.test.len()
    );

    let x_train = features.select_rows(&split.train);
    let y_train: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();
    let x_test = features.select_rows(&split.test);
    let y_test: Vec<usize> = split.test.iter().map(|&i| labels[i]).collect();

    let mut model = LogisticRegression::with_params(config.c, config.max_iter, config.tol);
    model.fit(&x_train, &y_train)?;

    let store = ArtifactStore::new(&config.artifact_dir);
    store.save_model(&model)?;
    store.save_vectorizer(&vectorizer)?;

    let y_pred = model.predict(&x_test)?;
    let report = ClassificationReport::new(&y_test, &y_pred, category_name)?;
    info!("test accuracy {:.4}", report.accuracy);

    Ok(TrainingOutcome {
        report,
        train_indices: split.train,
        test_indices: split.test,
        metadata: model.metadata().clone(),
        stats: model.training_stats().cloned(),
    })
}

fn category_name(code: usize) -> String {
    LABEL_MAPPING
        .name_for(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PantryError;
    use crate::ml::MLError;

    #[test]
    fn test_extract_features() {
        let items = vec![
            FoodItem::new("apple pie", 0),
            FoodItem::new("apple", 15),
            FoodItem::new("the", 15),
        ];
        let (features, labels, vectorizer) = extract_features(&items).unwrap();

        assert_eq!(features.shape(), (3, 2));
        assert_eq!(labels, vec![0, 15, 15]);
        assert!(vectorizer.column_of("apple").is_some());
        assert!(vectorizer.column_of("the").is_none());
        assert_eq!(features.row(2).nnz(), 0);
    }

    #[test]
    fn test_extract_features_stop_words_only() {
        let items = vec![FoodItem::new("the", 1), FoodItem::new("and a", 2)];
        assert!(matches!(
            extract_features(&items),
            Err(PantryError::Ml(MLError::EmptyVocabulary))
        ));
    }

    #[test]
    fn test_category_name() {
        assert_eq!(category_name(15), "Fruits");
        assert_eq!(category_name(99), "99");
    }
}
