use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// One document matched by a ranked query, with the terms it matched and their summed counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub doc_id: String,
    /// In the order the query visited them.
    pub matched_terms: Vec<String>,
    pub total_occurrences: u64,
}

impl RankedResult {
    pub fn new<S: Into<String>>(doc_id: S) -> Self {
        Self { doc_id: doc_id.into(), matched_terms: Vec::new(), total_occurrences: 0 }
    }

    pub fn insert_term(&mut self, term: &str, count: u32) {
        self.matched_terms.push(term.to_string());
        self.total_occurrences += u64::from(count);
    }

    /// `(matched term count, total occurrences)`, compared lexicographically.
    pub fn score(&self) -> (usize, u64) {
        (self.matched_terms.len(), self.total_occurrences)
    }

    /// Result order: higher score first, then higher document id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score()
            .cmp(&self.score())
            .then_with(|| other.doc_id.cmp(&self.doc_id))
    }
}

/// Sort results best-first.
pub fn sort_ranked(results: &mut [RankedResult]) {
    results.sort_by(RankedResult::rank_cmp);
}

impl fmt::Display for RankedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, total) = self.score();
        writeln!(f, "{}", self.doc_id)?;
        writeln!(f, "  Matched Words: {:?}", self.matched_terms)?;
        writeln!(f, "  Total Occurrences: {}", self.total_occurrences)?;
        write!(f, "  Score: ({n}, {total})")
    }
}
