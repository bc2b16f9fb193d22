//! In-memory full-text search over a fixed corpus.
//!
//! Terms live in a prefix tree ([`TermIndex`]) that maps each term to a slot in an
//! append-only occurrence store; per-document counts sit in a separate frequency table.
//! Everything is built once by [`SearchEngine::build_index`] and is read-only afterwards,
//! so a built engine can be shared across threads without locking.

pub mod engine;
pub mod query;
pub mod rank;
pub mod tokenizer;
pub mod trie;

use serde::{Deserialize, Serialize};

pub use engine::SearchEngine;
pub use query::{parse_single, parse_terms, QueryError};
pub use rank::RankedResult;
pub use tokenizer::{StopWords, Tokenizer};
pub use trie::TermIndex;

/// Index of a slot in the occurrence store.
pub type SlotId = u32;

/// A document as handed to the build phase: an identifier plus its finished token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new<S: Into<String>>(id: S, tokens: Vec<String>) -> Self {
        Self { id: id.into(), tokens }
    }

    /// Tokenize `text` and wrap the result.
    pub fn from_text<S: Into<String>>(id: S, text: &str, tokenizer: &Tokenizer) -> Self {
        Self { id: id.into(), tokens: tokenizer.tokenize(text) }
    }
}
