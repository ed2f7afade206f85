//! In-process search backend
//!
//! Lets the page handler run controller cycles straight against the loaded
//! corpus, with the same answers the HTTP endpoint would give.

use super::corpus::Corpus;
use super::handlers::{answer, SearchParams, SearchReply};
use crate::controller::{Query, ResultSet, SearchBackend};
use crate::error::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct LocalBackend {
    corpus: Arc<Corpus>,
}

impl LocalBackend {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }
}

impl SearchBackend for LocalBackend {
    async fn search(&self, query: &Query) -> Result<ResultSet, AppError> {
        let params = SearchParams {
            q: Some(query.text.clone()),
            case_sensitive: query.case_sensitive.clone(),
            max_results: query.max_results.clone(),
        };
        match answer(&self.corpus, &params) {
            SearchReply::Results(results) => Ok(ResultSet(results)),
            SearchReply::Rejected(reason) => Err(AppError::BadStatus {
                status: 400,
                body: reason,
            }),
        }
    }
}
