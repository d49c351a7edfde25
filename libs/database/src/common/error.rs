/// Error type for connection management and index setup
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Server did not answer the initial ping
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
