//! Getting document text into the search core: links files, HTTP fetch with an on-disk page
//! cache, HTML paragraph extraction and local JSON/JSONL corpora.

pub mod cache;
pub mod corpus;
pub mod extract;
pub mod fetch;
pub mod links;
pub mod source;

use searchcore::{Document, Tokenizer};

pub use cache::PageCache;
pub use corpus::load_corpus;
pub use extract::extract_paragraph_text;
pub use fetch::{FetchConfig, Fetcher};
pub use links::load_links;
pub use source::{build_engine, IndexConfig, Source};

/// Raw text of one document, keyed by its identifier (a URL or a corpus id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub text: String,
}

/// Tokenize pages into documents ready for the build phase.
pub fn documents(pages: Vec<Page>, tokenizer: &Tokenizer) -> Vec<Document> {
    pages
        .into_iter()
        .map(|p| Document::from_text(p.id, &p.text, tokenizer))
        .collect()
}
