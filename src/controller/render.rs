//! Rendering a result set into the results container

use super::dom::{Node, ResultsContainer, Tag};
use serde::{Deserialize, Serialize};

/// Ordered result strings returned by the search endpoint for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(pub Vec<String>);

impl ResultSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for ResultSet {
    fn from(results: Vec<String>) -> Self {
        Self(results)
    }
}

/// Replace the container's content with one `pre` block and one `hr` per result
///
/// Returns the number of blocks rendered.
pub fn render_results(container: &mut ResultsContainer, results: &ResultSet) -> usize {
    container.clear();
    for result in results.iter() {
        container.append(Node::element(Tag::Pre, vec![Node::text(result.as_str())]));
        container.append(Node::element(Tag::Hr, vec![]));
    }
    results.len()
}
