use crate::SlotId;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    /// Child node indices into the arena.
    children: HashMap<char, u32>,
    /// Set only on nodes where a complete term ends.
    slot: Option<SlotId>,
}

/// Prefix tree mapping each term to its occurrence-store slot.
///
/// Nodes live in a flat arena (index 0 is the root), so no operation recurses per character
/// and dropping a tree with very long terms is a single `Vec` drop.
/// Insert and lookup cost O(term length) regardless of how many terms are stored.
#[derive(Debug)]
pub struct TermIndex {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for TermIndex {
    fn default() -> Self {
        Self { nodes: vec![TrieNode::default()], len: 0 }
    }
}

impl TermIndex {
    pub fn new() -> Self { Self::default() }

    /// Register `term` under `slot`. Inserting an existing term again overwrites its slot.
    pub fn insert(&mut self, term: &str, slot: SlotId) {
        let mut at = 0usize;
        for ch in term.chars() {
            at = match self.nodes[at].children.get(&ch) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[at].children.insert(ch, child as u32);
                    child
                }
            };
        }
        if self.nodes[at].slot.replace(slot).is_none() {
            self.len += 1;
        }
    }

    /// Slot of `term`, or `None` when the path is missing or ends on an interior node.
    pub fn lookup(&self, term: &str) -> Option<SlotId> {
        self.node(term).and_then(|at| self.nodes[at].slot)
    }

    pub fn contains(&self, term: &str) -> bool { self.lookup(term).is_some() }

    /// Number of distinct terms stored.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Every stored term starting with `prefix`, sorted, with its slot.
    pub fn terms_with_prefix(&self, prefix: &str) -> Vec<(String, SlotId)> {
        let mut out = Vec::new();
        let Some(start) = self.node(prefix) else { return out };
        let mut term = prefix.to_string();
        // (node, length of `term` above this node, edge char into it)
        let mut stack: Vec<(usize, usize, Option<char>)> = vec![(start, term.len(), None)];
        while let Some((at, base, edge)) = stack.pop() {
            term.truncate(base);
            if let Some(ch) = edge {
                term.push(ch);
            }
            let node = &self.nodes[at];
            if let Some(slot) = node.slot {
                out.push((term.clone(), slot));
            }
            for (&ch, &child) in &node.children {
                stack.push((child as usize, term.len(), Some(ch)));
            }
        }
        out.sort();
        out
    }

    fn node(&self, path: &str) -> Option<usize> {
        let mut at = 0usize;
        for ch in path.chars() {
            at = *self.nodes[at].children.get(&ch)? as usize;
        }
        Some(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup() {
        let mut t = TermIndex::new();
        t.insert("cat", 0);
        t.insert("car", 1);
        t.insert("dog", 2);
        assert_eq!(t.lookup("cat"), Some(0));
        assert_eq!(t.lookup("car"), Some(1));
        assert_eq!(t.lookup("dog"), Some(2));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn prefix_is_not_a_term() {
        let mut t = TermIndex::new();
        t.insert("cats", 4);
        assert_eq!(t.lookup("cat"), None);
        assert_eq!(t.lookup("catsup"), None);
        assert_eq!(t.lookup(""), None);
        assert!(t.contains("cats"));
    }

    #[test]
    fn reinsert_overwrites_slot() {
        let mut t = TermIndex::new();
        t.insert("fast", 1);
        t.insert("fast", 7);
        assert_eq!(t.lookup("fast"), Some(7));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn non_ascii_terms() {
        let mut t = TermIndex::new();
        t.insert("café", 0);
        t.insert("cafe", 1);
        assert_eq!(t.lookup("café"), Some(0));
        assert_eq!(t.lookup("cafe"), Some(1));
    }

    #[test]
    fn prefix_enumeration() {
        let mut t = TermIndex::new();
        for (i, w) in ["ran", "rank", "ranked", "rat", "dog"].iter().enumerate() {
            t.insert(w, i as SlotId);
        }
        let found: Vec<String> = t.terms_with_prefix("ran").into_iter().map(|(w, _)| w).collect();
        assert_eq!(found, vec!["ran", "rank", "ranked"]);
        assert!(t.terms_with_prefix("x").is_empty());
        assert_eq!(t.terms_with_prefix("").len(), 5);
    }

    #[test]
    fn very_long_term_round_trips_and_drops() {
        let long = "a".repeat(200_000);
        let mut t = TermIndex::new();
        t.insert(&long, 0);
        t.insert("cat", 1);
        assert_eq!(t.lookup(&long), Some(0));
        assert_eq!(t.lookup(&long[..199_999]), None);
        let found = t.terms_with_prefix("aaaa");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.len(), 200_000);
        drop(t);
    }
}
