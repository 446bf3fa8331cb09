use thiserror::Error;

/// Failure taxonomy shared by the engine and its data sources.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Unsupported data source, missing dataset fields or missing credentials.
    #[error("configuration error: {0}")]
    Config(String),

    /// API misuse, e.g. projecting text before the vector space was fitted.
    #[error("state error: {0}")]
    State(String),

    /// A source produced nothing usable, or a remote call failed.
    #[error("data error: {0}")]
    Data(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
