use std::path::Path;

use super::session;
use crate::client::Connection;
use crate::error::Result;

/// The connection's own database file, if it exists.
pub(super) fn file(connection: &Connection) -> Vec<String> {
    match connection.url().database() {
        Some(path) if Path::new(path).is_file() => vec![path.to_string()],
        _ => Vec::new(),
    }
}

/// Schema names as reported by the server; order is preserved.
pub(super) async fn schemas(connection: &Connection) -> Result<Vec<String>> {
    let mut session = session::open(connection, connection.url()).await?;
    let outcome = session.schema_names().await;
    session::finish(session, outcome).await
}
