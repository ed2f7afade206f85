use super::corpus::Corpus;
use super::page;
use super::AppState;
use crate::controller::form::{CASE_SENSITIVE_FIELD, MAX_RESULTS_FIELD, QUERY_FIELD};
use crate::controller::{CycleOutcome, FormData, HighlightStatus, SearchController, SubmitEvent};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

pub const MISSING_QUERY: &str = "missing search query in URL params";
pub const INVALID_MAX_RESULTS: &str = "Invalid value for max number of results";
pub const NO_RESULTS: &str = "Your search did not match any results";

/// Query parameters of `GET /search`
#[derive(Debug, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub case_sensitive: Option<String>,
    pub max_results: Option<String>,
}

impl SearchParams {
    /// Collect parameters from raw query pairs; the first value of a repeated key wins
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                CASE_SENSITIVE_FIELD => &mut params.case_sensitive,
                MAX_RESULTS_FIELD => &mut params.max_results,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Outcome of a `/search` request, independent of the transport
#[derive(Debug, PartialEq)]
pub enum SearchReply {
    /// 400 with a plain-text reason
    Rejected(String),
    /// 200 with a JSON array of strings
    Results(Vec<String>),
}

/// Answer a search request against the corpus
pub fn answer(corpus: &Corpus, params: &SearchParams) -> SearchReply {
    let query = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return SearchReply::Rejected(MISSING_QUERY.to_string()),
    };

    let max_results = match parse_max_results(params.max_results.as_deref()) {
        Ok(max_results) => max_results,
        Err(()) => return SearchReply::Results(vec![INVALID_MAX_RESULTS.to_string()]),
    };

    // Presence alone selects case-sensitive search
    let case_sensitive = params.case_sensitive.is_some();

    let results = corpus.search(query, case_sensitive, max_results);
    debug!(
        "Search {:?} (case sensitive: {}) matched {} windows",
        query,
        case_sensitive,
        results.len()
    );
    if results.is_empty() {
        return SearchReply::Results(vec![NO_RESULTS.to_string()]);
    }
    SearchReply::Results(results)
}

/// Absent, empty or negative means unlimited
fn parse_max_results(value: Option<&str>) -> Result<Option<usize>, ()> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => {
            let parsed: i64 = raw.parse().map_err(|_| ())?;
            Ok(usize::try_from(parsed).ok())
        }
    }
}

/// `GET /search`
pub async fn handle_search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    match answer(&state.corpus, &SearchParams::from_pairs(pairs)) {
        SearchReply::Rejected(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
        SearchReply::Results(results) => Json(results).into_response(),
    }
}

/// `GET /`: the search page, with results when a query was submitted
pub async fn handle_index(
    State(state): State<AppState>,
    Query(fields): Query<Vec<(String, String)>>,
) -> Response {
    let data = FormData::from(fields);
    let Some(query) = data.get(QUERY_FIELD).map(str::to_string) else {
        return page_response(&page::PageState::default());
    };
    let case_sensitive = data.get(CASE_SENSITIVE_FIELD).is_some();

    let controller = SearchController::new(state.backend(), state.highlight_mode);
    let mut event = SubmitEvent::new(data);

    let mut notice = None;
    match controller.handle_submit(&mut event).await {
        Ok(CycleOutcome::Completed(report)) => {
            if let HighlightStatus::Failed { error } = report.highlight {
                notice = Some(error);
            }
        }
        Ok(CycleOutcome::Superseded { generation }) => {
            debug!("Page cycle {} superseded", generation);
        }
        Err(e) => {
            warn!("Page search failed ({}): {}", e.error_code(), e);
            notice = Some(e.to_string());
        }
    }

    let results_html = match controller.view() {
        Ok(view) => view.to_html(),
        Err(e) => {
            notice = Some(e.to_string());
            String::new()
        }
    };

    page_response(&page::PageState {
        query,
        case_sensitive,
        results_html,
        notice,
    })
}

fn page_response(state: &page::PageState) -> Response {
    match page::render_page(state) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!("Search page failed to render: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
