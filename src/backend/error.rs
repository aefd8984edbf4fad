use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend is not configured (set {0})")]
    NotConfigured(&'static str),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}
