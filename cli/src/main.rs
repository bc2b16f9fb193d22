mod repl;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ingest::{build_engine, FetchConfig, IndexConfig, Source};
use searchcore::{parse_single, parse_terms, SearchEngine};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Keyword search over a fixed set of pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one keyword at a time, listing pages by occurrence count
    Single {
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Search several keywords at once; pages must contain all of them
    Multi {
        #[command(flatten)]
        index: IndexArgs,
    },
    /// Run a single query and exit
    Query {
        #[arg(long, value_enum, default_value_t = Mode::Ranked)]
        mode: Mode,
        /// Query keywords
        #[arg(required = true)]
        terms: Vec<String>,
        #[command(flatten)]
        index: IndexArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Pages containing one keyword
    Single,
    /// Pages containing every keyword
    All,
    /// Pages containing any keyword, ranked
    Ranked,
    /// Pages containing every keyword, ranked
    Strict,
}

#[derive(Args)]
struct IndexArgs {
    /// File with one URL per line
    #[arg(long, conflicts_with = "corpus", required_unless_present = "corpus")]
    links: Option<PathBuf>,
    /// JSON/JSONL corpus file or directory of `{ "id", "body" }` records
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Directory for cached page text
    #[arg(long, default_value = "cached_pages")]
    cache_dir: PathBuf,
    /// Always fetch pages from the network
    #[arg(long, default_value_t = false)]
    no_cache: bool,
    /// Stop-word file, one word per line (built-in English list otherwise)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Apply English stemming to indexed words
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Request timeout seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
    /// Concurrent page fetches
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
    /// Skip TLS certificate verification
    #[arg(long, default_value_t = false)]
    insecure: bool,
    /// Build the index on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl IndexArgs {
    fn into_config(self) -> IndexConfig {
        let source = match (self.links, self.corpus) {
            (Some(links), _) => Source::Links(links),
            (None, Some(corpus)) => Source::Corpus(corpus),
            (None, None) => unreachable!("clap requires --links or --corpus"),
        };
        IndexConfig {
            source,
            fetch: FetchConfig {
                timeout_secs: self.timeout_secs,
                concurrency: self.concurrency,
                cache_dir: (!self.no_cache).then_some(self.cache_dir),
                accept_invalid_certs: self.insecure,
                ..FetchConfig::default()
            },
            stopwords: self.stopwords,
            stem: self.stem,
            parallel: self.parallel,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Single { index } => {
            let engine = load(index).await?;
            println!("Indexing complete. You can now enter a single keyword.");
            println!("Type 'exit' to quit.\n");
            repl::run_single(&engine, io::stdin().lock(), io::stdout().lock())
        }
        Commands::Multi { index } => {
            let engine = load(index).await?;
            println!("Indexing complete. You can now enter multiple keywords.");
            println!("Type 'exit' to quit.\n");
            repl::run_multi(&engine, io::stdin().lock(), io::stdout().lock())
        }
        Commands::Query { mode, terms, index } => {
            let engine = load(index).await?;
            run_query(&engine, mode, &terms.join(" "), &mut io::stdout().lock())
        }
    }
}

async fn load(index: IndexArgs) -> Result<SearchEngine> {
    tracing::info!("initializing search engine");
    build_engine(&index.into_config()).await
}

fn run_query<W: Write>(engine: &SearchEngine, mode: Mode, input: &str, out: &mut W) -> Result<()> {
    match mode {
        Mode::Single => {
            let term = parse_single(input)?;
            for (doc, count) in engine.term_occurrences(&term) {
                writeln!(out, "{doc}\t{count}")?;
            }
        }
        Mode::All => {
            for doc in engine.search_multiple(&parse_terms(input)?) {
                writeln!(out, "{doc}")?;
            }
        }
        Mode::Ranked | Mode::Strict => {
            let terms = parse_terms(input)?;
            let results = match mode {
                Mode::Ranked => engine.ranked_search(&terms),
                _ => engine.strict_ranked_search(&terms),
            };
            for (i, page) in results.iter().enumerate() {
                writeln!(out, "Rank #{}\n{page}\n", i + 1)?;
            }
        }
    }
    Ok(())
}
