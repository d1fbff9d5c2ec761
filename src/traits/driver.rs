use async_trait::async_trait;

use crate::database_url::DatabaseUrl;
use crate::error::Result;
use crate::traits::AdminOperations;
use crate::types::{RawQueryResult, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening sessions against a URL
/// - Converting SqlValue parameters to native types
/// - Classifying engine errors (an unknown database must surface as
///   `DbAdminError::DatabaseNotFound`, an unreachable server as
///   `DbAdminError::ConnectionFailed`)
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Open a new session against `url`.
    async fn connect(&self, url: &DatabaseUrl) -> Result<Box<dyn Session>>;

    /// Native administrative operations, if this driver implements any.
    /// Operations the capability supports take precedence over the
    /// built-in strategies.
    fn admin_operations(&self) -> Option<&dyn AdminOperations> {
        None
    }
}

/// A live session opened by a [`DatabaseDriver`].
#[async_trait]
pub trait Session: Send {
    /// Execute a statement with the given parameters.
    /// Placeholders follow the dialect (`$1` for PostgreSQL, `?` elsewhere).
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Names of the databases/schemas visible through this session, in the
    /// order the server reports them.
    async fn schema_names(&mut self) -> Result<Vec<String>>;

    /// Close the session. Further calls on a closed session fail.
    async fn close(&mut self) -> Result<()>;
}
