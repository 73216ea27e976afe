use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file {} contains invalid UTF-8", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("document index {index} out of range for collection of {len}")]
    DocumentOutOfRange { index: usize, len: usize },

    #[error("completion failed: {0}")]
    Completion(String),
}
