//! TF-IDF vectorizer for text feature extraction.
//!
//! Term weights are raw counts scaled by smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized. The
//! vocabulary is fixed by [`TfIdfVectorizer::fit`]; later text is projected
//! into that column space and unknown terms are dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use crate::error::{PantryError, Result};
use crate::ml::MLError;
use crate::ml::sparse::SparseMatrix;

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "VectorizerState", into = "VectorizerState")]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index, assigned in sorted term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: EnglishAnalyzer,
}

/// Persisted form; the analyzer is rebuilt from the stop-word flag.
#[derive(Serialize, Deserialize)]
struct VectorizerState {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    n_documents: usize,
    stop_words: bool,
}

impl From<TfIdfVectorizer> for VectorizerState {
    fn from(vectorizer: TfIdfVectorizer) -> Self {
        VectorizerState {
            vocabulary: vectorizer.vocabulary.into_iter().collect(),
            idf: vectorizer.idf,
            n_documents: vectorizer.n_documents,
            stop_words: vectorizer.analyzer.removes_stop_words(),
        }
    }
}

impl TryFrom<VectorizerState> for TfIdfVectorizer {
    type Error = PantryError;

    fn try_from(state: VectorizerState) -> Result<Self> {
        if state.vocabulary.len() != state.idf.len() {
            return Err(PantryError::other(format!(
                "vectorizer has {} terms but {} idf weights",
                state.vocabulary.len(),
                state.idf.len()
            )));
        }
        let analyzer = if state.stop_words {
            EnglishAnalyzer::new()?
        } else {
            EnglishAnalyzer::without_stop_words()?
        };

        Ok(TfIdfVectorizer {
            vocabulary: state.vocabulary.into_iter().collect(),
            idf: state.idf,
            n_documents: state.n_documents,
            analyzer,
        })
    }
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("stop_words", &self.analyzer.removes_stop_words())
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::with_analyzer(EnglishAnalyzer::default())
    }
}

impl TfIdfVectorizer {
    /// Unfitted vectorizer with English stop-word removal.
    pub fn new() -> Result<Self> {
        Ok(Self::with_analyzer(EnglishAnalyzer::new()?))
    }

    /// Unfitted vectorizer that keeps stop words.
    pub fn without_stop_words() -> Result<Self> {
        Ok(Self::with_analyzer(EnglishAnalyzer::without_stop_words()?))
    }

    fn with_analyzer(analyzer: EnglishAnalyzer) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Fit the vectorizer on training documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_terms: HashSet<String> =
                self.analyzer.terms(doc.as_ref())?.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(MLError::EmptyVocabulary.into());
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());

        // BTreeMap iteration is sorted, so columns follow term order.
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        debug!(
            "fitted tf-idf vocabulary of {} terms over {} documents",
            vocabulary.len(),
            documents.len()
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform documents into TF-IDF rows in the fitted column space.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<SparseMatrix> {
        if !self.is_fitted() {
            return Err(MLError::ModelNotTrained {
                message: "vectorizer must be fitted before transform".to_string(),
            }
            .into());
        }

        let mut matrix = SparseMatrix::new(self.vocabulary_size());
        for doc in documents {
            matrix.push_row(self.transform_one(doc.as_ref())?);
        }
        Ok(matrix)
    }

    /// Fit on the documents and transform them.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<SparseMatrix> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// One document as sorted `(column, weight)` pairs.
    fn transform_one(&self, document: &str) -> Result<Vec<(usize, f64)>> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyzer.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= norm;
            }
        }

        Ok(weights)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf_of(&self, term: &str) -> Option<f64> {
        self.column_of(term).map(|idx| self.idf[idx])
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }
}
