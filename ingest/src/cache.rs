use anyhow::{Context, Result};
use sha1::{Digest, Sha1};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Extracted page text stored as `<dir>/<sha1(url)>.txt`.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, url: &str) -> PathBuf {
        let mut hasher = Sha1::new();
        hasher.update(url.as_bytes());
        self.dir.join(format!("{:x}.txt", hasher.finalize()))
    }

    /// Cached text for `url`, or `None` on a miss.
    pub fn get(&self, url: &str) -> Result<Option<String>> {
        let path = self.path_for(url);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading cache entry {}", path.display())),
        }
    }

    pub fn put(&self, url: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(url);
        fs::write(&path, text).with_context(|| format!("writing cache entry {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path().join("pages"));
        assert_eq!(cache.get("https://example.com").unwrap(), None);
        cache.put("https://example.com", "hello world").unwrap();
        assert_eq!(cache.get("https://example.com").unwrap().as_deref(), Some("hello world"));
        assert_eq!(cache.get("https://example.org").unwrap(), None);
    }

    #[test]
    fn key_is_sha1_of_url() {
        let cache = PageCache::new("/tmp/c");
        let p = cache.path_for("abc");
        assert_eq!(p, PathBuf::from("/tmp/c/a9993e364706816aba3e25717850c26c9cd0d89d.txt"));
    }
}
