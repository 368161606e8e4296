//! Text analysis for item names.
//!
//! An analyzer runs a tokenizer followed by a chain of token filters. The
//! vectorizer uses [`EnglishAnalyzer`]: word tokens of two or more characters,
//! lowercased, with English stop words removed.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
