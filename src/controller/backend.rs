//! Search backends the controller can submit queries to

use super::form::Query;
use super::render::ResultSet;
use crate::error::AppError;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Something that answers `/search` requests with a result set
pub trait SearchBackend {
    fn search(&self, query: &Query) -> impl Future<Output = Result<ResultSet, AppError>> + Send;
}

impl<T: SearchBackend + Send + Sync> SearchBackend for Arc<T> {
    fn search(&self, query: &Query) -> impl Future<Output = Result<ResultSet, AppError>> + Send {
        (**self).search(query)
    }
}

/// Backend talking to a remote search endpoint over HTTP
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Full request URL for a query
    pub fn request_url(&self, query: &Query) -> Result<Url, AppError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let url = format!("{}{}", base, query.request_path());
        Url::parse(&url).map_err(|e| AppError::InvalidInput(format!("Invalid request URL {}: {}", url, e)))
    }
}

impl SearchBackend for HttpBackend {
    async fn search(&self, query: &Query) -> Result<ResultSet, AppError> {
        let url = self.request_url(query)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BadStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body = response.text().await?;
        let results: ResultSet = serde_json::from_str(&body)?;
        debug!("Received {} results", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn backend(endpoint: &str) -> HttpBackend {
        let endpoint = Url::parse(endpoint).unwrap();
        let client = crate::http::client_for_endpoint(&endpoint, Duration::from_secs(5)).unwrap();
        HttpBackend::new(client, endpoint)
    }

    #[test]
    fn test_request_url_joins_endpoint_and_path() {
        let backend = backend("http://localhost:3001");
        let url = backend.request_url(&Query::new("foo")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/search?q=foo");
    }

    #[test]
    fn test_request_url_keeps_endpoint_prefix() {
        let backend = backend("http://example.com/shakes/");
        let mut query = Query::new("foo");
        query.case_sensitive = Some("on".to_string());
        let url = backend.request_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/shakes/search?q=foo&caseSensitive=on"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_fetch_error() {
        // Bind and drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let backend = backend(&format!("http://127.0.0.1:{}", port));
        let err = backend.search(&Query::new("foo")).await.unwrap_err();
        assert!(
            matches!(err, AppError::FetchFailed(_) | AppError::Timeout(_)),
            "unexpected error: {:?}",
            err
        );
    }
}
