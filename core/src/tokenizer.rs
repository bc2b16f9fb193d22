use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r#"[!@#$%^&*(),.?":;'\-_/]"#).expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

const ENGLISH: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","cannot","could",
    "did","do","does","doing","down","during",
    "each","few","for","from","further",
    "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
    "i","if","in","into","is","it","its","itself",
    "me","more","most","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","should","so","some","such",
    "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
    "under","until","up","very",
    "was","we","were","what","when","where","which","while","who","whom","why","with","would",
    "you","your","yours","yourself","yourselves",
];

/// Words dropped from token streams. Built once and handed to a [`Tokenizer`].
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn empty() -> Self { Self::default() }

    pub fn english() -> Self { Self::from_words(ENGLISH.iter().copied()) }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; blank lines are ignored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading stop words from {}", path.display()))?;
        Ok(Self::from_words(text.lines()))
    }

    pub fn contains(&self, token: &str) -> bool { self.words.contains(token) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// Text to index terms: NFKC normalization, lowercase, punctuation stripping, stop-word removal
/// and optional English stemming.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: StopWords,
    stem: bool,
}

impl Default for Tokenizer {
    fn default() -> Self { Self::new(StopWords::english()) }
}

impl Tokenizer {
    pub fn new(stopwords: StopWords) -> Self { Self { stopwords, stem: false } }

    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    pub fn stopwords(&self) -> &StopWords { &self.stopwords }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let cleaned = PUNCT.replace_all(&normalized, " ");
        cleaned
            .split_whitespace()
            .filter(|t| !self.stopwords.contains(t))
            .map(|t| if self.stem { STEMMER.stem(t).into_owned() } else { t.to_string() })
            .collect()
    }
}
