use std::path::PathBuf;

/// Errors produced by the spectral format handlers.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// File could not be opened, read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Document parsed but has the wrong shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// No registered handler claims the extension
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// Nothing to write
    #[error("dataset has no spectral data to write")]
    EmptyDataset,

    /// Handler can read but not write
    #[error("{0} files cannot be written")]
    ReadOnlyFormat(&'static str),
}

impl SpecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpecError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;
