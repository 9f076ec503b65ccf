use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The category source returned no live categories
    #[error("No live categories available")]
    NotReady,

    #[error("Vectorizer fit produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Category source error: {0}")]
    Source(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid keyword pattern: {0}")]
    InvalidKeyword(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Recoverable errors leave the categorizer able to retry on the next call
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotReady | Error::Source(_) | Error::Io(_))
    }
}
