use anyhow::Result;
use clap::Parser;
use ingest::{build_engine, FetchConfig, IndexConfig, Source};
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// File with one URL per line
    #[arg(long, conflicts_with = "corpus", required_unless_present = "corpus")]
    links: Option<PathBuf>,
    /// JSON/JSONL corpus file or directory
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Directory for cached page text
    #[arg(long, default_value = "cached_pages")]
    cache_dir: PathBuf,
    /// Stop-word file, one word per line
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Apply English stemming to indexed words
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Build the index on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let source = match (args.links, args.corpus) {
        (Some(links), _) => Source::Links(links),
        (None, Some(corpus)) => Source::Corpus(corpus),
        (None, None) => unreachable!("clap requires --links or --corpus"),
    };
    let config = IndexConfig {
        source,
        fetch: FetchConfig { cache_dir: Some(args.cache_dir), ..FetchConfig::default() },
        stopwords: args.stopwords,
        stem: args.stem,
        parallel: args.parallel,
    };
    let engine = Arc::new(build_engine(&config).await?);
    let app = build_app(engine);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
