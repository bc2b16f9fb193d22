use crate::rank::{sort_ranked, RankedResult};
use crate::trie::TermIndex;
use crate::{Document, SlotId};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Per-term document sets and per-(term, document) counts gathered before slot assignment.
#[derive(Default)]
struct Accumulator {
    occurrences: BTreeMap<String, BTreeSet<String>>,
    frequencies: HashMap<String, HashMap<String, u32>>,
    num_documents: usize,
}

impl Accumulator {
    fn add(&mut self, doc: &Document) {
        self.num_documents += 1;
        for token in &doc.tokens {
            let term = token.to_lowercase();
            if term.is_empty() { continue; }
            self.occurrences.entry(term.clone()).or_default().insert(doc.id.clone());
            *self.frequencies.entry(term).or_default().entry(doc.id.clone()).or_insert(0) += 1;
        }
    }

    fn merge(mut self, other: Accumulator) -> Accumulator {
        self.num_documents += other.num_documents;
        for (term, docs) in other.occurrences {
            self.occurrences.entry(term).or_default().extend(docs);
        }
        for (term, counts) in other.frequencies {
            let mine = self.frequencies.entry(term).or_default();
            for (doc, n) in counts {
                *mine.entry(doc).or_insert(0) += n;
            }
        }
        self
    }

    /// Assign one dense slot per distinct term, in term order.
    fn finish(self) -> SearchEngine {
        let mut terms = TermIndex::new();
        let mut occurrences = Vec::with_capacity(self.occurrences.len());
        for (term, docs) in self.occurrences {
            let slot = occurrences.len() as SlotId;
            occurrences.push(docs.into_iter().collect::<Vec<_>>());
            terms.insert(&term, slot);
        }
        tracing::info!(num_docs = self.num_documents, num_terms = terms.len(), "index built");
        SearchEngine { terms, occurrences, frequencies: self.frequencies, num_documents: self.num_documents }
    }
}

/// Inverted index over a fixed corpus plus the four query operations.
///
/// Built once; every query takes `&self`, so a built engine can be shared freely across threads.
#[derive(Debug, Default)]
pub struct SearchEngine {
    terms: TermIndex,
    /// Slot -> sorted document ids.
    occurrences: Vec<Vec<String>>,
    /// Term -> document id -> count.
    frequencies: HashMap<String, HashMap<String, u32>>,
    num_documents: usize,
}

impl SearchEngine {
    /// Build the index in a single sequential pass.
    pub fn build_index<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let mut acc = Accumulator::default();
        for doc in documents {
            acc.add(&doc);
        }
        acc.finish()
    }

    /// Build the index with per-worker partial maps that are merged before any slot is assigned.
    /// The result is identical to [`SearchEngine::build_index`].
    pub fn build_index_parallel(documents: &[Document]) -> Self {
        documents
            .par_iter()
            .fold(Accumulator::default, |mut acc, doc| {
                acc.add(doc);
                acc
            })
            .reduce(Accumulator::default, Accumulator::merge)
            .finish()
    }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    /// Number of documents supplied to the build, duplicates included.
    pub fn num_documents(&self) -> usize { self.num_documents }

    /// Occurrences of `term` in `doc_id`; 0 when either is unknown.
    pub fn frequency(&self, term: &str, doc_id: &str) -> u32 {
        self.count(&term.to_lowercase(), doc_id)
    }

    /// `frequency` for an already lower-cased term.
    fn count(&self, term: &str, doc_id: &str) -> u32 {
        self.frequencies
            .get(term)
            .and_then(|m| m.get(doc_id))
            .copied()
            .unwrap_or(0)
    }

    /// Indexed terms starting with `prefix`, sorted.
    pub fn terms_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.terms
            .terms_with_prefix(&prefix.to_lowercase())
            .into_iter()
            .map(|(term, _)| term)
            .collect()
    }

    fn docs_for(&self, term: &str) -> Option<&[String]> {
        self.terms
            .lookup(term)
            .map(|slot| self.occurrences[slot as usize].as_slice())
    }

    /// Sorted ids of the documents containing `term`.
    pub fn search_single(&self, term: &str) -> Vec<String> {
        let term = term.to_lowercase();
        let hits = self.docs_for(&term).map(<[String]>::to_vec).unwrap_or_default();
        tracing::debug!(%term, hits = hits.len(), "single search");
        hits
    }

    /// Documents containing `term` with their counts, most occurrences first.
    pub fn term_occurrences(&self, term: &str) -> Vec<(String, u32)> {
        let term = term.to_lowercase();
        let mut out: Vec<(String, u32)> = match self.docs_for(&term) {
            Some(docs) => docs.iter().map(|d| (d.clone(), self.count(&term, d))).collect(),
            None => return Vec::new(),
        };
        // stable: equal counts keep ascending id order
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// Ids of the documents containing every term, sorted ascending.
    pub fn search_multiple<S: AsRef<str>>(&self, terms: &[S]) -> Vec<String> {
        let terms: Vec<String> = terms.iter().map(|t| t.as_ref().to_lowercase()).collect();
        let hits = match self.posting_lists(&terms) {
            Some(lists) => intersect(&lists),
            None => Vec::new(),
        };
        tracing::debug!(?terms, hits = hits.len(), "multi search");
        hits
    }

    /// OR query: every document matching at least one term, best first.
    pub fn ranked_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<RankedResult> {
        let terms = distinct_lowercase(terms);
        let mut pages: HashMap<&str, RankedResult> = HashMap::new();
        for term in &terms {
            let Some(docs) = self.docs_for(term) else { continue };
            for doc in docs {
                pages
                    .entry(doc.as_str())
                    .or_insert_with(|| RankedResult::new(doc.as_str()))
                    .insert_term(term, self.count(term, doc));
            }
        }
        let mut ranked: Vec<RankedResult> = pages.into_values().collect();
        sort_ranked(&mut ranked);
        tracing::debug!(?terms, hits = ranked.len(), "ranked search");
        ranked
    }

    /// AND query: only documents matching every term, best first.
    pub fn strict_ranked_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<RankedResult> {
        let terms = distinct_lowercase(terms);
        let common = match self.posting_lists(&terms) {
            Some(lists) => intersect(&lists),
            None => return Vec::new(),
        };
        let mut ranked: Vec<RankedResult> = common
            .into_iter()
            .map(|doc| {
                let mut page = RankedResult::new(doc.as_str());
                for term in &terms {
                    page.insert_term(term, self.count(term, &doc));
                }
                page
            })
            .collect();
        sort_ranked(&mut ranked);
        tracing::debug!(?terms, hits = ranked.len(), "strict ranked search");
        ranked
    }

    /// One list per term; `None` if any term is missing or `terms` is empty.
    fn posting_lists(&self, terms: &[String]) -> Option<Vec<&[String]>> {
        if terms.is_empty() {
            return None;
        }
        terms.iter().map(|t| self.docs_for(t)).collect()
    }
}

fn distinct_lowercase<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Intersection of sorted lists, walking the shortest one.
fn intersect(lists: &[&[String]]) -> Vec<String> {
    let Some(shortest) = lists.iter().min_by_key(|l| l.len()) else { return Vec::new() };
    shortest
        .iter()
        .filter(|doc| lists.iter().all(|l| l.binary_search(*doc).is_ok()))
        .cloned()
        .collect()
}
