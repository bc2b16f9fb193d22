//! Parsing of user-entered queries into engine terms.
//!
//! The engine treats an empty term list as "no results". Front ends go through these functions
//! so that a blank or malformed query can be reported as such instead of as an empty match.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query is empty")]
    Empty,
    #[error("expected a single keyword, got {0}")]
    TooManyTerms(usize),
}

/// Whitespace-separated, lower-cased terms.
pub fn parse_terms(input: &str) -> Result<Vec<String>, QueryError> {
    let terms: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Err(QueryError::Empty);
    }
    Ok(terms)
}

/// Exactly one lower-cased keyword.
pub fn parse_single(input: &str) -> Result<String, QueryError> {
    let mut terms = parse_terms(input)?;
    if terms.len() > 1 {
        return Err(QueryError::TooManyTerms(terms.len()));
    }
    Ok(terms.remove(0))
}
