use thiserror::Error;

/// Error type for dbadmin operations
#[derive(Debug, Error)]
pub enum DbAdminError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation '{operation}' expects {expected} argument(s), got {actual}")]
    InvalidArguments {
        operation: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("No built-in driver for dialect '{0}'")]
    UnsupportedDialect(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The server reported that the target database does not exist.
    /// Drivers map their engine-specific "unknown database" codes to this.
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Existence check failed: {0}")]
    ExistsCheckFailed(String),

    #[error("Failed to create database '{database}': {message}")]
    CreateFailed { database: String, message: String },

    #[error("Failed to drop database '{database}': {message}")]
    DropFailed { database: String, message: String },

    /// A native procedure was resolved but the driver no longer offers it.
    #[error("Driver no longer provides native operation '{operation}'")]
    NativeOperationUnavailable { operation: &'static str },

    #[error("Operation '{operation}' returned an unexpected outcome: {outcome}")]
    UnexpectedOutcome {
        operation: &'static str,
        outcome: String,
    },
}

/// Result type alias for dbadmin operations
pub type Result<T> = std::result::Result<T, DbAdminError>;
