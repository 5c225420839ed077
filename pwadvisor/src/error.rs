#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Range(#[from] pwned_range::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
