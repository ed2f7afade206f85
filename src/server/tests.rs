//! Router tests: drive the axum app in-process with `tower::ServiceExt::oneshot`

use super::*;
use crate::controller::{FormData, HttpBackend, SearchController, SubmitEvent};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

const TEXT: &str = "Shall I compare thee to a summer's day? \
Thou art more lovely and more temperate: \
Rough winds do shake the darling buds of May, \
And summer's lease hath all too short a date";

fn app() -> Router {
    router(AppState::new(Corpus::from_text(TEXT), HighlightMode::Pattern))
}

async fn get_path(path: &str) -> (StatusCode, Option<String>, String) {
    let response = app()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_search_returns_json_windows() {
    let (status, content_type, body) = get_path("/search?q=summer").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    // the corpus is shorter than a window, so both hits return the whole text
    assert_eq!(results, vec![TEXT.to_string(), TEXT.to_string()]);
}

#[tokio::test]
async fn test_search_case_sensitive_flag() {
    let (_, _, body) = get_path("/search?q=thou&caseSensitive=on").await;
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results, vec![handlers::NO_RESULTS.to_string()]);

    let (_, _, body) = get_path("/search?q=Thou&caseSensitive=on").await;
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_missing_query_is_bad_request() {
    let (status, _, body) = get_path("/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, handlers::MISSING_QUERY);

    let (status, _, _) = get_path("/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_invalid_max_results() {
    let (status, _, body) = get_path("/search?q=May&maxResults=many").await;
    assert_eq!(status, StatusCode::OK);
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results, vec![handlers::INVALID_MAX_RESULTS.to_string()]);
}

#[tokio::test]
async fn test_search_repeated_keys_use_first_value() {
    let (status, _, body) = get_path("/search?q=summer&q=winds").await;
    assert_eq!(status, StatusCode::OK);
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results, vec![TEXT.to_string(), TEXT.to_string()]);

    let (status, _, body) = get_path("/search?q=summer&maxResults=1&maxResults=x").await;
    assert_eq!(status, StatusCode::OK);
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);

    let (status, _, body) = get_path("/search?q=thou&caseSensitive=on&caseSensitive=on").await;
    assert_eq!(status, StatusCode::OK);
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results, vec![handlers::NO_RESULTS.to_string()]);
}

#[tokio::test]
async fn test_search_decodes_query_string() {
    let (_, _, body) = get_path("/search?q=summer%27s%20day").await;
    let results: Vec<String> = serde_json::from_str(&body).unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_index_without_query() {
    let (status, _, body) = get_path("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form id=\"form\""));
    assert!(body.contains("<div id=\"results\"></div>"));
}

#[tokio::test]
async fn test_index_renders_highlighted_results() {
    let (status, _, body) = get_path("/?query=darling").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<pre>"));
    assert!(body.contains("the <mark>darling</mark> buds"));
    assert!(body.contains("value=\"darling\""));
}

#[tokio::test]
async fn test_index_reports_invalid_pattern_but_keeps_results() {
    // no hit, so the no-results message is rendered; "(" does not compile
    let (status, _, body) = get_path("/?query=lovely%20(").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<pre>Your search did not match any results</pre>"));
    assert!(body.contains("<p class=\"notice\">Invalid highlight pattern"));
}

#[tokio::test]
async fn test_index_reports_empty_query() {
    let (status, _, body) = get_path("/?query=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(handlers::MISSING_QUERY));
}

#[tokio::test]
async fn test_http_backend_against_live_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    let endpoint = url::Url::parse(&format!("http://{}", addr)).unwrap();
    let client =
        crate::http::client_for_endpoint(&endpoint, std::time::Duration::from_secs(5)).unwrap();
    let controller = SearchController::new(HttpBackend::new(client, endpoint), HighlightMode::Pattern);

    let mut event = SubmitEvent::new(FormData::new().with("query", "rough winds"));
    controller.handle_submit(&mut event).await.unwrap();

    let view = controller.view().unwrap();
    assert_eq!(view.blocks().count(), 1);
    assert!(view.to_text().contains("**Rough winds**"));

    let mut event = SubmitEvent::new(FormData::new().with("query", ""));
    let err = controller.handle_submit(&mut event).await.unwrap_err();
    assert!(matches!(err, crate::error::AppError::BadStatus { status: 400, .. }));

    server.abort();
}
