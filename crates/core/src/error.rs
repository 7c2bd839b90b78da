use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("vector dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {provider}: {details}")]
    ProviderResponse { provider: String, details: String },
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {provider}: {details}")]
    ProviderResponse { provider: String, details: String },

    #[error("no completion backend configured: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("index write failed: {0}")]
    Index(#[from] IndexError),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("index search failed: {0}")]
    Index(#[from] IndexError),

    #[error("answer synthesis failed: {0}")]
    Completion(#[from] CompletionError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
