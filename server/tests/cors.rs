use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use searchcore::{Document, SearchEngine};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let engine = SearchEngine::build_index(vec![Document::new("d1", vec!["cat".to_string()])]);
    server::build_app(Arc::new(engine))
}

async fn allow_origin(app: Router, origin: &str) -> Option<String> {
    let req = Request::get("/search?q=cat")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

// One test so the environment changes stay ordered.
#[tokio::test]
async fn allow_origin_follows_env() {
    std::env::remove_var("CORS_ALLOW_ORIGIN");
    assert_eq!(allow_origin(app(), "https://anywhere.example").await.as_deref(), Some("*"));

    std::env::set_var("CORS_ALLOW_ORIGIN", "https://app.example, https://admin.example");
    assert_eq!(
        allow_origin(app(), "https://admin.example").await.as_deref(),
        Some("https://admin.example")
    );
    assert_eq!(allow_origin(app(), "https://evil.example").await, None);

    std::env::set_var("CORS_ALLOW_ORIGIN", " , ");
    assert_eq!(allow_origin(app(), "https://anywhere.example").await.as_deref(), Some("*"));
    std::env::remove_var("CORS_ALLOW_ORIGIN");
}
