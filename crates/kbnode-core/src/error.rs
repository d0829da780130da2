use thiserror::Error;

/// Core error type shared across kbnode crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A string does not follow the node identifier layout.
    #[error("invalid node id: {0}")]
    InvalidIdentifier(String),
    /// A document does not start with the node front matter block.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    /// A destination field cannot be placed in a URL path.
    #[error("invalid destination: {0}")]
    InvalidDestination(String),
}

/// Convenience alias for results returned by kbnode crates.
pub type Result<T> = std::result::Result<T, Error>;
