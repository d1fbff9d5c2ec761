use std::path::Path;

use tracing::debug;

use super::session;
use crate::client::Connection;
use crate::database_url::DatabaseUrl;
use crate::dialect::Dialect;
use crate::error::{DbAdminError, Result};
use crate::types::SqlValue;

/// Database that is always present on a PostgreSQL server.
const POSTGRES_ADMIN_DATABASE: &str = "template1";

const MEMORY_DATABASE: &str = ":memory:";

/// URL used for catalog lookups: PostgreSQL-family URLs are repointed at
/// `template1`, every other URL loses its database component.
pub(super) fn admin_url(url: &DatabaseUrl) -> DatabaseUrl {
    match url.dialect() {
        Dialect::Postgresql => url.with_database(Some(POSTGRES_ADMIN_DATABASE)),
        _ => url.with_database(None),
    }
}

pub(super) async fn postgres(connection: &Connection, database: &str) -> Result<bool> {
    let sql = format!(
        "SELECT 1 FROM pg_database WHERE datname = {}",
        Dialect::Postgresql.placeholder(1)
    );
    catalog_lookup(connection, &sql, database).await
}

pub(super) async fn mysql(connection: &Connection, database: &str) -> Result<bool> {
    let sql = format!(
        "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA WHERE SCHEMA_NAME = {}",
        Dialect::Mysql.placeholder(1)
    );
    catalog_lookup(connection, &sql, database).await
}

async fn catalog_lookup(connection: &Connection, sql: &str, database: &str) -> Result<bool> {
    let url = admin_url(connection.url());
    let mut session = session::open(connection, &url).await?;
    let outcome = session
        .execute(sql, &[SqlValue::from(database)])
        .await
        .map(|rows| !rows.is_empty());
    session::finish(session, outcome).await.map_err(|e| match e {
        DbAdminError::QueryFailed(message) => DbAdminError::ExistsCheckFailed(message),
        other => other,
    })
}

/// An unnamed database is the in-memory default and always exists.
pub(super) fn file(database: Option<&str>) -> bool {
    match database {
        None | Some("") | Some(MEMORY_DATABASE) => true,
        Some(path) => Path::new(path).exists(),
    }
}

/// Connects to `database` itself and runs a probe query.
///
/// Only `DatabaseNotFound` counts as "does not exist"; refused connections,
/// authentication failures and anything else unclassified propagate.
pub(super) async fn probe(connection: &Connection, database: &str) -> Result<bool> {
    let url = connection.url().with_database(Some(database));
    let mut session = match session::open(connection, &url).await {
        Ok(session) => session,
        Err(DbAdminError::DatabaseNotFound(message)) => {
            debug!(database, %message, "probe connect reported missing database");
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    let outcome = session.execute("SELECT 1", &[]).await.map(|_| ());
    match session::finish(session, outcome).await {
        Ok(()) => Ok(true),
        Err(DbAdminError::DatabaseNotFound(message)) => {
            debug!(database, %message, "probe query reported missing database");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
