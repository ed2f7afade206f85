//! The searchable corpus: text plus a case-sensitive and a case-insensitive index

use super::error::CorpusError;
use super::suffix::SuffixIndex;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Bytes of context kept on each side of a match
pub const CONTEXT_RADIUS: usize = 250;

pub struct Corpus {
    text: String,
    case_sensitive: SuffixIndex,
    case_insensitive: FoldedIndex,
}

/// Index over the lowercased text, with the source offset of every folded byte
struct FoldedIndex {
    index: SuffixIndex,
    origins: Vec<usize>,
}

impl FoldedIndex {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());
        for (offset, ch) in text.char_indices() {
            folded.extend(ch.to_lowercase());
            origins.resize(folded.len(), offset);
        }
        Self {
            index: SuffixIndex::new(folded.into_bytes()),
            origins,
        }
    }

    fn lookup(&self, query: &str, limit: Option<usize>) -> Vec<usize> {
        let folded = fold_case(query);
        let mut offsets: Vec<usize> = self
            .index
            .lookup(folded.as_bytes(), None)
            .into_iter()
            .map(|offset| self.origins[offset])
            .collect();
        // A match may start inside a character whose lowercase form is longer
        offsets.dedup();
        if let Some(limit) = limit {
            offsets.truncate(limit);
        }
        offsets
    }
}

fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

impl Corpus {
    /// Read a UTF-8 text file and index it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8(bytes)?;

        let started = Instant::now();
        let corpus = Self::from_text(text);
        info!(
            "Indexed {} ({} bytes) in {:?}",
            path.display(),
            corpus.len(),
            started.elapsed()
        );
        Ok(corpus)
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let case_sensitive = SuffixIndex::new(text.as_bytes().to_vec());
        let case_insensitive = FoldedIndex::new(&text);
        Self {
            text,
            case_sensitive,
            case_insensitive,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Context windows around each occurrence of `query`, in text order
    pub fn search(&self, query: &str, case_sensitive: bool, max_results: Option<usize>) -> Vec<String> {
        let offsets = if case_sensitive {
            self.case_sensitive.lookup(query.as_bytes(), max_results)
        } else {
            self.case_insensitive.lookup(query, max_results)
        };

        offsets
            .into_iter()
            .map(|offset| self.window(offset).to_string())
            .collect()
    }

    fn window(&self, offset: usize) -> &str {
        let mut start = offset.saturating_sub(CONTEXT_RADIUS);
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (offset + CONTEXT_RADIUS).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end += 1;
        }
        &self.text[start..end]
    }
}
