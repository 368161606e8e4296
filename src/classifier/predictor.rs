//! Labeling new item names with a saved model.

use log::debug;

use crate::classifier::artifacts::ArtifactStore;
use crate::error::{PantryError, Result};
use crate::labels::LABEL_MAPPING;
use crate::ml::{Classifier, LogisticRegression, TfIdfVectorizer};

/// A fitted vectorizer paired with the model trained on its output.
#[derive(Debug, Clone)]
pub struct FoodClassifier {
    model: LogisticRegression,
    vectorizer: TfIdfVectorizer,
}

impl FoodClassifier {
    pub fn new(model: LogisticRegression, vectorizer: TfIdfVectorizer) -> Self {
        FoodClassifier { model, vectorizer }
    }

    /// Load both artifacts from `store`.
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let vectorizer = store.load_vectorizer()?;
        let model = store.load_model()?;
        debug!(
            "loaded {} over {} features",
            model.name(),
            vectorizer.vocabulary_size()
        );
        Ok(Self::new(model, vectorizer))
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Food-group codes for `items`, in input order.
    ///
    /// Names with no known words still get a code. An empty slice is an error.
    pub fn predict<S: AsRef<str>>(&self, items: &[S]) -> Result<Vec<usize>> {
        if items.is_empty() {
            return Err(PantryError::invalid_argument(
                "at least one food item is required",
            ));
        }
        let features = self.vectorizer.transform(items)?;
        self.model.predict(&features)
    }

    /// Category names for `items`, in input order.
    pub fn predict_categories<S: AsRef<str>>(&self, items: &[S]) -> Result<Vec<&'static str>> {
        self.predict(items)?
            .into_iter()
            .map(|code| {
                LABEL_MAPPING
                    .name_for(code)
                    .ok_or_else(|| PantryError::other(format!("unknown food group code {code}")))
            })
            .collect()
    }
}

/// Load the artifacts in `store` and classify `items`.
pub fn predict_food_groups<S: AsRef<str>>(
    store: &ArtifactStore,
    items: &[S],
) -> Result<Vec<usize>> {
    FoodClassifier::load(store)?.predict(items)
}
