use axum::{extract::{Query, State}, http::StatusCode, routing::get, Json, Router};
use searchcore::{parse_single, parse_terms, QueryError, RankedResult, SearchEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Documents containing one term.
    Single,
    /// Documents containing every term.
    All,
    /// Documents containing any term, ranked.
    #[default]
    Ranked,
    /// Documents containing every term, ranked.
    Strict,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
#[serde(untagged)]
pub enum Hits {
    Documents(Vec<String>),
    Ranked(Vec<RankedResult>),
}

impl Hits {
    fn len(&self) -> usize {
        match self {
            Hits::Documents(d) => d.len(),
            Hits::Ranked(r) => r.len(),
        }
    }

    fn truncate(&mut self, k: usize) {
        match self {
            Hits::Documents(d) => d.truncate(k),
            Hits::Ranked(r) => r.truncate(k),
        }
    }
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: SearchMode,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Hits,
}

/// The engine is immutable once built, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

pub fn build_app(engine: Arc<SearchEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();
    let engine = &state.engine;
    let mut results = match params.mode {
        SearchMode::Single => Hits::Documents(engine.search_single(&parse_single(&params.q).map_err(bad_request)?)),
        SearchMode::All => Hits::Documents(engine.search_multiple(&parse_terms(&params.q).map_err(bad_request)?)),
        SearchMode::Ranked => Hits::Ranked(engine.ranked_search(&parse_terms(&params.q).map_err(bad_request)?)),
        SearchMode::Strict => Hits::Ranked(engine.strict_ranked_search(&parse_terms(&params.q).map_err(bad_request)?)),
    };
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));

    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(q = %params.q, mode = ?params.mode, total_hits, took_s, "search");
    Ok(Json(SearchResponse { query: params.q, mode: params.mode, took_s, total_hits, results }))
}

#[derive(Serialize)]
pub struct Stats {
    pub num_documents: usize,
    pub num_terms: usize,
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<Stats> {
    Json(Stats { num_documents: state.engine.num_documents(), num_terms: state.engine.num_terms() })
}

fn bad_request(e: QueryError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}
