/// Error type for connection management.
///
/// Request-time query errors stay with the driver type; this enum covers
/// establishing the connection.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level MongoDB errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_message() {
        let err = DatabaseError::ConnectionFailed("server selection timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: server selection timeout");
    }
}
