//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Vectorizer
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 .. Filter N
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::analysis::analyzer::{Analyzer, EnglishAnalyzer};
    ///
    /// let analyzer = EnglishAnalyzer::new().unwrap();
    /// let tokens: Vec<_> = analyzer.analyze("Salad with Chicken").unwrap().collect();
    ///
    /// assert_eq!(tokens.len(), 2);
    /// assert_eq!(tokens[0].text, "salad");
    /// ```
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Collect the text of every token produced for `text`.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
