mod in_memory_test;
#[cfg(feature = "mysql")]
mod mysql;
mod sqlite;
mod tokio_postgres;

pub use self::in_memory_test::{
    InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedQuery, SessionEvent,
};
#[cfg(feature = "mysql")]
pub use self::mysql::{MySqlDriver, MySqlSession};
pub use self::sqlite::{SqliteDriver, SqliteSession};
pub use self::tokio_postgres::{PostgresSession, TokioPostgresDriver};
