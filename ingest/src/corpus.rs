use crate::Page;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    body: String,
}

impl From<InputDoc> for Page {
    fn from(d: InputDoc) -> Self { Page { id: d.id, text: d.body } }
}

/// Load `{ "id", "body" }` records from a `.json`/`.jsonl` file or a directory of them.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Page>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut pages = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut pages)?;
        } else {
            load_json(&file, &mut pages)?;
        }
    }
    tracing::info!(docs = pages.len(), path = %path.display(), "corpus loaded");
    Ok(pages)
}

fn load_jsonl(file: &Path, pages: &mut Vec<Page>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), n + 1))?;
        pages.push(doc.into());
    }
    Ok(())
}

fn load_json(file: &Path, pages: &mut Vec<Page>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                pages.push(doc.into());
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            pages.push(doc.into());
        }
        _ => tracing::warn!(file = %file.display(), "expected a JSON object or array, skipping"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_json_and_jsonl_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jsonl"), "{\"id\":\"d1\",\"body\":\"cat sat\"}\n\n{\"id\":\"d2\",\"body\":\"cat ran\",\"url\":\"x\"}\n").unwrap();
        fs::write(dir.path().join("b.json"), "[{\"id\":\"d3\",\"body\":\"dog\"}]").unwrap();
        fs::write(dir.path().join("c.json"), "{\"id\":\"d4\",\"body\":\"fish\"}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let ids: Vec<String> = load_corpus(dir.path()).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn malformed_line_reports_location() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.jsonl");
        fs::write(&p, "{\"id\":\"d1\",\"body\":\"ok\"}\n{\"body\":\"no id\"}\n").unwrap();
        let err = load_corpus(&p).unwrap_err();
        assert!(format!("{err:#}").contains("bad.jsonl:2"));
    }
}
