use super::session;
use crate::client::Connection;
use crate::error::{DbAdminError, Result};

pub(super) async fn ddl(connection: &Connection, database: &str) -> Result<()> {
    let statement = format!(
        "CREATE DATABASE {}",
        connection.dialect().quote_identifier(database)?
    );
    session::autocommit_ddl(connection, &statement)
        .await
        .map_err(|e| match e {
            DbAdminError::ConnectionFailed(_) => e,
            other => DbAdminError::CreateFailed {
                database: database.to_string(),
                message: other.to_string(),
            },
        })
}
