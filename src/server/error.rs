use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Corpus is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
