//! Public entry points for administrative operations.

use tracing::info;

use crate::client::Connection;
use crate::dispatcher::resolve;
use crate::error::Result;
use crate::operation::{Operation, Outcome};

/// Run `operation` against `connection` with positional `args`.
///
/// | operation | args | outcome |
/// |---|---|---|
/// | exists | optional database name | `Outcome::Exists` |
/// | create | database name | `Outcome::Created` |
/// | drop | database name | `Outcome::Dropped` |
/// | list-all | none | `Outcome::Databases` |
///
/// # Example
/// ```ignore
/// let connection = Connection::open("postgresql://postgres@localhost/postgres")?;
/// let op: Operation = "create".parse()?;
/// database_operation(&connection, op, &["demo"]).await?;
/// ```
pub async fn database_operation(
    connection: &Connection,
    operation: Operation,
    args: &[&str],
) -> Result<Outcome> {
    let database = operation.bind_args(args)?;
    let procedure = resolve(connection, operation);
    info!(
        operation = operation.name(),
        dialect = %connection.dialect(),
        database = database.unwrap_or(""),
        "running database operation"
    );
    procedure.invoke(connection, database).await
}

/// Whether `database` exists on the connection's server.
pub async fn database_exists(connection: &Connection, database: &str) -> Result<bool> {
    database_operation(connection, Operation::Exists, &[database])
        .await?
        .into_exists()
}

/// Create `database`.
pub async fn create_database(connection: &Connection, database: &str) -> Result<()> {
    match database_operation(connection, Operation::Create, &[database]).await? {
        Outcome::Created => Ok(()),
        other => Err(other.unexpected(Operation::Create)),
    }
}

/// Drop `database`.
pub async fn drop_database(connection: &Connection, database: &str) -> Result<()> {
    match database_operation(connection, Operation::Drop, &[database]).await? {
        Outcome::Dropped => Ok(()),
        other => Err(other.unexpected(Operation::Drop)),
    }
}

/// Every database or schema visible through the connection.
pub async fn list_databases(connection: &Connection) -> Result<Vec<String>> {
    database_operation(connection, Operation::ListAll, &[])
        .await?
        .into_databases()
}
