use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::database_url::DatabaseUrl;
use crate::dialect::Dialect;
use crate::drivers::{SqliteDriver, TokioPostgresDriver};
use crate::error::{DbAdminError, Result};
use crate::facade;
use crate::traits::{DatabaseDriver, Session};

/// A configured link to a database server or file.
///
/// Holds the URL and the driver used to open sessions from it. Cloning is
/// cheap; the driver is shared.
#[derive(Clone)]
pub struct Connection {
    url: DatabaseUrl,
    driver: Arc<dyn DatabaseDriver>,
}

impl Connection {
    /// Build a connection for `url` using the built-in driver for its dialect.
    /// No session is opened until an operation needs one.
    ///
    /// # Example
    /// ```ignore
    /// let connection = Connection::open("postgresql://postgres@localhost/app")?;
    /// ```
    pub fn open(url: &str) -> Result<Self> {
        let url = DatabaseUrl::parse(url)?;
        let driver = builtin_driver(&url)?;
        Ok(Self { url, driver })
    }

    /// Create a connection with a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn with_driver(url: DatabaseUrl, driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { url, driver }
    }

    pub fn url(&self) -> &DatabaseUrl {
        &self.url
    }

    pub fn dialect(&self) -> Dialect {
        self.url.dialect()
    }

    pub fn driver(&self) -> &dyn DatabaseDriver {
        self.driver.as_ref()
    }

    /// Open a session against `url` through this connection's driver.
    pub async fn session(&self, url: &DatabaseUrl) -> Result<Box<dyn Session>> {
        debug!(url = %url, "opening session");
        self.driver.connect(url).await
    }

    /// Whether `database` exists. See [`facade::database_exists`].
    pub async fn database_exists(&self, database: &str) -> Result<bool> {
        facade::database_exists(self, database).await
    }

    /// Create `database`. See [`facade::create_database`].
    pub async fn create_database(&self, database: &str) -> Result<()> {
        facade::create_database(self, database).await
    }

    /// Drop `database`. See [`facade::drop_database`].
    pub async fn drop_database(&self, database: &str) -> Result<()> {
        facade::drop_database(self, database).await
    }

    /// All databases visible on the server. See [`facade::list_databases`].
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        facade::list_databases(self).await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("url", &self.url.to_string())
            .field("dialect", &self.dialect())
            .finish()
    }
}

fn builtin_driver(url: &DatabaseUrl) -> Result<Arc<dyn DatabaseDriver>> {
    match url.dialect() {
        Dialect::Postgresql => Ok(Arc::new(TokioPostgresDriver::new())),
        Dialect::Sqlite => Ok(Arc::new(SqliteDriver::new())),
        #[cfg(feature = "mysql")]
        Dialect::Mysql => Ok(Arc::new(crate::drivers::MySqlDriver::new())),
        #[cfg(not(feature = "mysql"))]
        Dialect::Mysql => Err(DbAdminError::UnsupportedDialect(format!(
            "{} (enable the 'mysql' feature)",
            url.backend()
        ))),
        Dialect::Other => Err(DbAdminError::UnsupportedDialect(url.backend().to_string())),
    }
}
