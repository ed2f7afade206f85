//! Form submissions and the queries extracted from them

/// Field holding the search text
pub const QUERY_FIELD: &str = "query";
/// Optional field switching highlighting and search to case-sensitive mode
pub const CASE_SENSITIVE_FIELD: &str = "caseSensitive";
/// Optional field limiting the number of results the endpoint returns
pub const MAX_RESULTS_FIELD: &str = "maxResults";

/// Path of the search endpoint
pub const SEARCH_PATH: &str = "/search";

/// Ordered form field values, as a browser would serialize them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Value of the last field with this name; later entries win
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Vec<(String, String)>> for FormData {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }
}

/// A form submission signal
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    data: FormData,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(data: FormData) -> Self {
        Self {
            data,
            default_prevented: false,
        }
    }

    /// Suppress the native form navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[allow(dead_code)]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }
}

/// Search text plus its options, captured at submission time
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    /// Present means case-sensitive, whatever the value; forwarded verbatim
    pub case_sensitive: Option<String>,
    /// Forwarded verbatim; the endpoint validates it
    pub max_results: Option<String>,
}

impl Query {
    #[allow(dead_code)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_sensitive: None,
            max_results: None,
        }
    }

    /// Extract a query from submitted form values. Empty text is kept as-is.
    pub fn from_form(data: &FormData) -> Self {
        Self {
            text: data.get(QUERY_FIELD).unwrap_or_default().to_string(),
            case_sensitive: data.get(CASE_SENSITIVE_FIELD).map(str::to_string),
            max_results: data.get(MAX_RESULTS_FIELD).map(str::to_string),
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive.is_some()
    }

    /// Path and query string of the search request, e.g. `/search?q=foo&caseSensitive=on`
    pub fn request_path(&self) -> String {
        let mut path = format!("{}?q={}", SEARCH_PATH, urlencoding::encode(&self.text));
        if let Some(value) = &self.case_sensitive {
            path.push_str(&format!("&caseSensitive={}", urlencoding::encode(value)));
        }
        if let Some(value) = &self.max_results {
            path.push_str(&format!("&maxResults={}", urlencoding::encode(value)));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_without_case_sensitivity() {
        let data = FormData::new().with("query", "foo");
        let query = Query::from_form(&data);
        assert_eq!(query.request_path(), "/search?q=foo");
        assert!(!query.is_case_sensitive());
    }

    #[test]
    fn test_request_path_with_case_sensitivity() {
        let data = FormData::new().with("query", "foo").with("caseSensitive", "on");
        let query = Query::from_form(&data);
        assert_eq!(query.request_path(), "/search?q=foo&caseSensitive=on");
        assert!(query.is_case_sensitive());
    }

    #[test]
    fn test_request_path_encodes_text() {
        let query = Query::new("to be & not?");
        assert_eq!(query.request_path(), "/search?q=to%20be%20%26%20not%3F");
    }

    #[test]
    fn test_request_path_does_not_regex_escape() {
        // The raw text travels to the endpoint; only URL encoding is applied
        let query = Query::new("a.c");
        assert_eq!(query.request_path(), "/search?q=a.c");
    }

    #[test]
    fn test_request_path_with_max_results() {
        let data = FormData::new().with("query", "Hamlet").with("maxResults", "20");
        let query = Query::from_form(&data);
        assert_eq!(query.request_path(), "/search?q=Hamlet&maxResults=20");
    }

    #[test]
    fn test_empty_query_forwarded() {
        let query = Query::from_form(&FormData::new());
        assert_eq!(query.text, "");
        assert_eq!(query.request_path(), "/search?q=");
    }

    #[test]
    fn test_case_sensitive_presence_counts_even_when_empty() {
        let data = FormData::new().with("query", "x").with("caseSensitive", "");
        let query = Query::from_form(&data);
        assert!(query.is_case_sensitive());
        assert_eq!(query.request_path(), "/search?q=x&caseSensitive=");
    }

    #[test]
    fn test_later_field_wins() {
        let data = FormData::new().with("query", "first").with("query", "second");
        assert_eq!(data.get("query"), Some("second"));
    }

    #[test]
    fn test_prevent_default() {
        let mut event = SubmitEvent::new(FormData::new());
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
