use crate::{documents, load_corpus, load_links, FetchConfig, Fetcher, Page};
use anyhow::Result;
use searchcore::{SearchEngine, StopWords, Tokenizer};
use std::path::PathBuf;

/// Where document text comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A file of URLs to fetch.
    Links(PathBuf),
    /// A local JSON/JSONL corpus file or directory.
    Corpus(PathBuf),
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub source: Source,
    pub fetch: FetchConfig,
    /// Stop-word file; the built-in English list when `None`.
    pub stopwords: Option<PathBuf>,
    pub stem: bool,
    pub parallel: bool,
}

impl IndexConfig {
    pub fn new(source: Source) -> Self {
        Self { source, fetch: FetchConfig::default(), stopwords: None, stem: false, parallel: false }
    }

    /// An unreadable stop-word file falls back to an empty set.
    pub fn tokenizer(&self) -> Tokenizer {
        let stopwords = match &self.stopwords {
            Some(path) => StopWords::from_file(path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stop words unavailable, indexing every word");
                StopWords::empty()
            }),
            None => StopWords::english(),
        };
        Tokenizer::new(stopwords).with_stemming(self.stem)
    }

    pub async fn load_pages(&self) -> Result<Vec<Page>> {
        match &self.source {
            Source::Links(path) => {
                let urls = load_links(path)?;
                Ok(Fetcher::new(&self.fetch)?.fetch_all(&urls).await)
            }
            Source::Corpus(path) => load_corpus(path),
        }
    }
}

/// Load, tokenize and index every document named by `config`.
pub async fn build_engine(config: &IndexConfig) -> Result<SearchEngine> {
    let pages = config.load_pages().await?;
    let tokenizer = config.tokenizer();
    tracing::info!(pages = pages.len(), stopwords = tokenizer.stopwords().len(), "tokenizing");
    let docs = documents(pages, &tokenizer);
    let engine = if config.parallel {
        SearchEngine::build_index_parallel(&docs)
    } else {
        SearchEngine::build_index(docs)
    };
    Ok(engine)
}
