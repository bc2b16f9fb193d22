use crate::cache::PageCache;
use crate::extract::extract_paragraph_text;
use crate::Page;
use anyhow::{bail, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Maximum requests in flight.
    pub concurrency: usize,
    pub user_agent: String,
    /// `None` disables the page cache.
    pub cache_dir: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            concurrency: 8,
            user_agent: "trie-search/0.1".to_string(),
            cache_dir: Some(PathBuf::from("cached_pages")),
            accept_invalid_certs: false,
        }
    }
}

pub struct Fetcher {
    client: Client,
    cache: Option<PageCache>,
    concurrency: usize,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            cache: config.cache_dir.as_ref().map(PageCache::new),
            concurrency: config.concurrency.max(1),
        })
    }

    /// Paragraph text of `url`, served from the cache when present.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(text) = cache.get(url)? {
                tracing::debug!(url, "cache hit");
                return Ok(text);
            }
        }
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("{url}: HTTP {status}");
        }
        let body = resp.text().await?;
        let text = extract_paragraph_text(&body);
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &text) {
                tracing::warn!(url, error = %e, "could not cache page");
            }
        }
        Ok(text)
    }

    /// Fetch every URL, keeping input order. Failures are logged and skipped.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<Page> {
        let pages: Vec<Page> = stream::iter(urls)
            .map(|url| async move { (url, self.fetch_text(url).await) })
            .buffered(self.concurrency)
            .filter_map(|(url, res)| async move {
                match res {
                    Ok(text) => Some(Page { id: url.clone(), text }),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "failed to fetch, skipping");
                        None
                    }
                }
            })
            .collect()
            .await;
        tracing::info!(fetched = pages.len(), requested = urls.len(), "fetch complete");
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path) -> FetchConfig {
        FetchConfig { timeout_secs: 5, cache_dir: Some(dir.to_path_buf()), ..FetchConfig::default() }
    }

    #[tokio::test]
    async fn cached_pages_skip_network() {
        let dir = tempfile::tempdir().unwrap();
        let url = "http://127.0.0.1:1/cached";
        PageCache::new(dir.path()).put(url, "from cache").unwrap();
        let fetcher = Fetcher::new(&config(dir.path())).unwrap();
        assert_eq!(fetcher.fetch_text(url).await.unwrap(), "from cache");
    }

    #[tokio::test]
    async fn unreachable_urls_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let cached = "http://127.0.0.1:1/a".to_string();
        let missing = "http://127.0.0.1:1/b".to_string();
        PageCache::new(dir.path()).put(&cached, "alpha").unwrap();
        let fetcher = Fetcher::new(&config(dir.path())).unwrap();
        let pages = fetcher.fetch_all(&[missing, cached.clone()]).await;
        assert_eq!(pages, vec![Page { id: cached, text: "alpha".into() }]);
    }
}
