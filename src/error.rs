use std::path::PathBuf;
use thiserror::Error;

/// Every failure the uploader can surface. `Display` is the exact text shown
/// in the status banner.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Only .onnx files are accepted")]
    UnsupportedExtension,

    #[error("Please select a file")]
    NoFileSelected,

    #[error("No processed file available for download")]
    NoGeneratedId,

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Upload Aborted")]
    Aborted,

    /// Non-2xx response, carrying the reason phrase.
    #[error("{0}")]
    Server(String),

    #[error("No ID received from server")]
    MissingId,

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("Save cancelled")]
    SaveCancelled,

    #[error("{0}")]
    Save(String),
}

impl CodegenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for CodegenError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Aborted
        } else {
            Self::Network(e.to_string())
        }
    }
}
