use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load {url}: HTTP {status}")]
    Status { status: u16, url: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
