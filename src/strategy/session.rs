use tracing::{debug, info, warn};

use crate::client::Connection;
use crate::database_url::DatabaseUrl;
use crate::error::Result;
use crate::traits::Session;

/// Opens a session on `url` through the connection's driver.
pub(super) async fn open(
    connection: &Connection,
    url: &DatabaseUrl,
) -> Result<Box<dyn Session>> {
    connection.session(url).await
}

/// Closes `session` and hands back `outcome`.
///
/// The session is closed whether or not `outcome` is an error. When both the
/// work and the close fail, the work's error wins and the close error is logged.
pub(super) async fn finish<T>(
    mut session: Box<dyn Session>,
    outcome: Result<T>,
) -> Result<T> {
    let closed = session.close().await;
    debug!(ok = closed.is_ok(), "session closed");
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "failed to close session after error");
            Err(err)
        }
    }
}

/// Runs a database-level DDL statement outside any transaction.
///
/// Sessions may start with an implicit transaction open and most servers
/// refuse `CREATE DATABASE` / `DROP DATABASE` inside one, so a `COMMIT` is
/// always issued first.
pub(super) async fn autocommit_ddl(connection: &Connection, statement: &str) -> Result<()> {
    let mut session = open(connection, connection.url()).await?;
    let outcome = commit_then(session.as_mut(), statement).await;
    finish(session, outcome).await
}

async fn commit_then(session: &mut dyn Session, statement: &str) -> Result<()> {
    session.execute("COMMIT", &[]).await?;
    info!(statement, "executing ddl");
    session.execute(statement, &[]).await?;
    Ok(())
}
