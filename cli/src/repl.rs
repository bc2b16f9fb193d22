use anyhow::Result;
use searchcore::{parse_single, parse_terms, QueryError, SearchEngine};
use std::io::{BufRead, Write};

/// Read one line after printing `prompt`; `None` on end of input or `exit`.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim().to_lowercase();
    if line == "exit" {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Single-keyword loop: pages containing the word, most occurrences first.
pub fn run_single<R: BufRead, W: Write>(engine: &SearchEngine, mut input: R, mut out: W) -> Result<()> {
    while let Some(line) = prompt(&mut input, &mut out, "Enter a single keyword: ")? {
        let word = match parse_single(&line) {
            Ok(w) => w,
            Err(QueryError::Empty) => {
                writeln!(out, "Please enter a keyword.\n")?;
                continue;
            }
            Err(QueryError::TooManyTerms(_)) => {
                writeln!(out, "Please enter only one word.\n")?;
                continue;
            }
        };
        let hits = engine.term_occurrences(&word);
        if hits.is_empty() {
            writeln!(out, "No pages contain the word '{word}'.\n")?;
            continue;
        }
        writeln!(out, "\nThe word '{word}' appears in {} page(s):", hits.len())?;
        for (i, (doc, freq)) in hits.iter().enumerate() {
            writeln!(out, "{}. {doc} (occurrences: {freq})", i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Multi-keyword loop: pages containing every keyword, ranked.
pub fn run_multi<R: BufRead, W: Write>(engine: &SearchEngine, mut input: R, mut out: W) -> Result<()> {
    while let Some(line) = prompt(&mut input, &mut out, "Enter keywords (space-separated): ")? {
        let words = match parse_terms(&line) {
            Ok(w) => w,
            Err(_) => {
                writeln!(out, "Please enter at least one keyword.\n")?;
                continue;
            }
        };
        let results = engine.strict_ranked_search(&words);
        if results.is_empty() {
            writeln!(out, "No pages contain all of the given keywords.\n")?;
            continue;
        }
        writeln!(out, "\nTop {} matching pages (ranked):", results.len())?;
        for (i, page) in results.iter().enumerate() {
            writeln!(out, "\nRank #{}", i + 1)?;
            writeln!(out, "{page}")?;
        }
        writeln!(out, "\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchcore::Document;

    fn engine() -> SearchEngine {
        SearchEngine::build_index(vec![
            Document::new("http://a", vec!["cat".into(), "cat".into(), "dog".into()]),
            Document::new("http://b", vec!["cat".into()]),
        ])
    }

    fn run<F>(f: F, input: &str) -> String
    where
        F: Fn(&SearchEngine, &[u8], &mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&engine(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn single_lists_by_count() {
        let out = run(|e, i, o| run_single(e, i, o), "CAT\nexit\nignored\n");
        assert!(out.contains("The word 'cat' appears in 2 page(s):"));
        assert!(out.contains("1. http://a (occurrences: 2)\n2. http://b (occurrences: 1)"));
        assert!(!out.contains("ignored"));
    }

    #[test]
    fn single_validates_input() {
        let out = run(|e, i, o| run_single(e, i, o), "\ncat dog\nzebra\n");
        assert!(out.contains("Please enter a keyword."));
        assert!(out.contains("Please enter only one word."));
        assert!(out.contains("No pages contain the word 'zebra'."));
    }

    #[test]
    fn multi_prints_ranked_pages() {
        let out = run(|e, i, o| run_multi(e, i, o), "cat\n   \ncat fish\n");
        assert!(out.contains("Top 2 matching pages (ranked):"));
        let a = out.find("Rank #1\nhttp://a").unwrap();
        assert!(out[a..].contains("Rank #2\nhttp://b"));
        assert!(out.contains("Please enter at least one keyword."));
        assert!(out.contains("No pages contain all of the given keywords."));
    }
}
