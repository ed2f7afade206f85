//! The search page
//!
//! Form `#form` with fields `query` and `caseSensitive`, results container
//! `#results`. Submitting the form reloads `/` with the fields in the URL and
//! the page comes back with the results rendered and highlighted.

use crate::controller::dom::ResultsContainer;
use askama::Template;

#[derive(Debug, Default)]
pub struct PageState {
    pub query: String,
    pub case_sensitive: bool,
    /// Serialized results container; empty renders an empty container
    pub results_html: String,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ShakeSearch</title>
<style>
body { font-family: Georgia, serif; margin: 2rem auto; max-width: 60rem; }
form { display: flex; gap: 0.5rem; align-items: center; }
input[name=query] { flex: 1; font-size: 1.1rem; padding: 0.3rem; }
pre { white-space: pre-wrap; }
mark { background: #ffe066; }
.notice { color: #a00; }
</style>
</head>
<body>
<h1>ShakeSearch</h1>
<form id="form" method="get" action="/">
<input type="text" name="query" value="{{ query }}" autofocus>
<label><input type="checkbox" name="caseSensitive"{% if case_sensitive %} checked{% endif %}> Case sensitive</label>
<button type="submit">Search</button>
</form>
{% if notice.is_some() %}<p class="notice">{{ notice.unwrap() }}</p>
{% endif %}{{ results|safe }}
</body>
</html>
"#,
    ext = "html"
)]
struct PageTemplate<'a> {
    query: &'a str,
    case_sensitive: bool,
    notice: Option<&'a str>,
    results: String,
}

pub fn render_page(state: &PageState) -> Result<String, askama::Error> {
    let results = if state.results_html.is_empty() {
        ResultsContainer::new().to_html()
    } else {
        state.results_html.clone()
    };

    PageTemplate {
        query: &state.query,
        case_sensitive: state.case_sensitive,
        notice: state.notice.as_deref(),
        results,
    }
    .render()
}
