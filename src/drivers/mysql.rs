use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{Column, ConnectOptions, Connection, Row};

use crate::database_url::DatabaseUrl;
use crate::error::{DbAdminError, Result};
use crate::traits::{DatabaseDriver, Session};
use crate::types::{RawQueryResult, SqlValue};

const DEFAULT_HOST: &str = "localhost";

/// MySQL `ER_BAD_DB_ERROR`: unknown database.
const ER_BAD_DB_ERROR: u16 = 1049;

const LIST_DATABASES: &str = "SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA";

/// MySQL / MariaDB driver implementation using sqlx.
#[derive(Debug, Default, Clone)]
pub struct MySqlDriver;

impl MySqlDriver {
    pub fn new() -> Self {
        Self
    }

    fn options(url: &DatabaseUrl) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new().host(url.host().unwrap_or(DEFAULT_HOST));
        if let Some(port) = url.port() {
            options = options.port(port);
        }
        if let Some(user) = url.username() {
            options = options.username(user);
        }
        if let Some(password) = url.password() {
            options = options.password(password);
        }
        if let Some(database) = url.database() {
            options = options.database(database);
        }
        options
    }
}

#[async_trait]
impl DatabaseDriver for MySqlDriver {
    async fn connect(&self, url: &DatabaseUrl) -> Result<Box<dyn Session>> {
        let options = Self::options(url);
        let connecting = options.connect();

        let conn = match url.connect_timeout()? {
            Some(timeout) => tokio::time::timeout(timeout, connecting)
                .await
                .map_err(|_| {
                    DbAdminError::ConnectionFailed(format!(
                        "timed out after {}s connecting to {}",
                        timeout.as_secs(),
                        url
                    ))
                })?,
            None => connecting.await,
        }
        .map_err(|e| classify(e, DbAdminError::ConnectionFailed))?;

        Ok(Box::new(MySqlSession { conn: Some(conn) }))
    }
}

/// A single sqlx MySQL connection.
pub struct MySqlSession {
    conn: Option<MySqlConnection>,
}

#[async_trait]
impl Session for MySqlSession {
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| DbAdminError::ConnectionFailed("session is closed".to_string()))?;

        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.as_text().map(str::to_owned));
        }

        let rows: Vec<MySqlRow> = query
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| classify(e, DbAdminError::QueryFailed))?;

        let columns: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };
        let result_rows = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| row_value_to_string(row, i)).collect())
            .collect();

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn schema_names(&mut self) -> Result<Vec<String>> {
        Ok(self.execute(LIST_DATABASES, &[]).await?.into_first_column())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| DbAdminError::ConnectionFailed(e.to_string()))?;
        }
        Ok(())
    }
}

fn is_unknown_database(number: Option<u16>) -> bool {
    number == Some(ER_BAD_DB_ERROR)
}

/// Maps an unknown-database error to `DatabaseNotFound`, everything else to `fallback`.
fn classify(err: sqlx::Error, fallback: fn(String) -> DbAdminError) -> DbAdminError {
    let number = err
        .as_database_error()
        .and_then(|db| db.try_downcast_ref::<MySqlDatabaseError>())
        .map(MySqlDatabaseError::number);

    if is_unknown_database(number) {
        DbAdminError::DatabaseNotFound(err.to_string())
    } else {
        fallback(err.to_string())
    }
}

fn row_value_to_string(row: &MySqlRow, index: usize) -> String {
    if let Ok(val) = row.try_get::<Option<String>, _>(index) {
        return val.unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(val) = row.try_get::<Option<i64>, _>(index) {
        return val.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    if let Ok(val) = row.try_get::<Option<f64>, _>(index) {
        return val.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string());
    }
    // information_schema columns come back as binary strings on some servers
    if let Ok(val) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return val
            .map(|v| String::from_utf8_lossy(&v).into_owned())
            .unwrap_or_else(|| "NULL".to_string());
    }
    "UNKNOWN".to_string()
}
