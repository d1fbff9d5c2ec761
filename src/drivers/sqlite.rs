use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};

use crate::database_url::DatabaseUrl;
use crate::error::{DbAdminError, Result};
use crate::traits::{DatabaseDriver, Session};
use crate::types::{RawQueryResult, SqlValue};

const MEMORY_DATABASE: &str = ":memory:";

/// SQLite driver implementation using rusqlite.
///
/// The URL's database component is the file path; no database (or
/// `:memory:`) opens a private in-memory database.
#[derive(Debug, Default, Clone)]
pub struct SqliteDriver;

impl SqliteDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseDriver for SqliteDriver {
    async fn connect(&self, url: &DatabaseUrl) -> Result<Box<dyn Session>> {
        let conn = match url.database() {
            None | Some(MEMORY_DATABASE) => Connection::open_in_memory().map_err(|e| {
                DbAdminError::ConnectionFailed(format!("Failed to create in-memory database: {}", e))
            })?,
            Some(path) => Connection::open(path).map_err(|e| {
                DbAdminError::ConnectionFailed(format!("Failed to open database at '{}': {}", path, e))
            })?,
        };
        Ok(Box::new(SqliteSession { conn: Some(conn) }))
    }
}

/// A rusqlite connection. Statements run synchronously on the calling task.
pub struct SqliteSession {
    conn: Option<Connection>,
}

impl SqliteSession {
    fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| DbAdminError::ConnectionFailed("session is closed".to_string()))
    }
}

#[async_trait]
impl Session for SqliteSession {
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let conn = self.conn()?;
        let query_err = |e: rusqlite::Error| DbAdminError::QueryFailed(e.to_string());

        let mut stmt = conn.prepare(sql).map_err(query_err)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt
            .query(params_from_iter(params.iter().map(SqlValue::as_text)))
            .map_err(query_err)?;
        let mut result_rows = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut values = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                values.push(value_to_string(row.get_ref(index).map_err(query_err)?));
            }
            result_rows.push(values);
        }

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn schema_names(&mut self) -> Result<Vec<String>> {
        let result = self.execute("PRAGMA database_list", &[]).await?;
        Ok(result.column("name").unwrap_or_default())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .map_err(|(_, e)| DbAdminError::ConnectionFailed(e.to_string()))?;
        }
        Ok(())
    }
}

fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_session_round_trip() {
        let url = DatabaseUrl::parse("sqlite://").unwrap();
        let mut session = SqliteDriver::new().connect(&url).await.unwrap();

        session
            .execute("CREATE TABLE t (id INTEGER, name TEXT)", &[])
            .await
            .unwrap();
        session
            .execute(
                "INSERT INTO t VALUES (1, ?), (2, ?)",
                &[SqlValue::from("alice"), SqlValue::Null],
            )
            .await
            .unwrap();

        let result = session
            .execute("SELECT id FROM t WHERE name = ?", &[SqlValue::from("alice")])
            .await
            .unwrap();
        assert_eq!(result.scalar(), Some("1"));

        let result = session
            .execute("SELECT id FROM t WHERE name IS ?", &[SqlValue::Null])
            .await
            .unwrap();
        assert_eq!(result.scalar(), Some("2"));

        assert_eq!(session.schema_names().await.unwrap(), vec!["main".to_string()]);
        session.close().await.unwrap();
        assert!(session.execute("SELECT 1", &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_open_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("created.db");
        let url = DatabaseUrl::parse(&format!("sqlite:///{}", path.display())).unwrap();

        let mut session = SqliteDriver::new().connect(&url).await.unwrap();
        session
            .execute("CREATE TABLE t (id INTEGER)", &[])
            .await
            .unwrap();
        session.close().await.unwrap();
        assert!(path.is_file());
    }
}
