use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use url::Url;

/// Read URLs from a file, one per line. Blank lines and `#` comments are skipped; a line
/// without `://` is read as `https://`, and only http(s) links are kept.
pub fn load_links<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening links file {}", path.display()))?;
    let mut links = Vec::new();
    for line in BufReader::new(f).lines() {
        let line = line?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') { continue; }
        let parsed = if s.contains("://") { Url::parse(s) } else { Url::parse(&format!("https://{s}")) };
        match parsed {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {
                links.push(if s.contains("://") { s.to_string() } else { u.to_string() })
            }
            Ok(u) => tracing::warn!(line = s, scheme = u.scheme(), "skipping non-http link"),
            Err(e) => tracing::warn!(line = s, error = %e, "skipping invalid link"),
        }
    }
    tracing::info!(count = links.len(), path = %path.display(), "links loaded");
    Ok(links)
}
