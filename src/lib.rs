//! dbadmin - Cross-dialect database administration
//!
//! Checks whether a database exists, creates it, drops it, or lists every
//! database on a server, choosing the right routine for the connection's
//! dialect (file-based SQLite, PostgreSQL, MySQL, or anything else).
//!
//! # Example
//! ```ignore
//! use dbadmin::{database_operation, Connection, Operation, Outcome};
//!
//! let connection = Connection::open("postgresql://postgres@localhost/postgres")?;
//!
//! if !connection.database_exists("demo").await? {
//!     connection.create_database("demo").await?;
//! }
//!
//! let outcome = database_operation(&connection, "list-all".parse()?, &[]).await?;
//! if let Outcome::Databases(names) = outcome {
//!     println!("{}", names.join("\n"));
//! }
//! ```

pub mod database_url;
pub mod dialect;
pub mod dispatcher;
pub mod drivers;
pub mod error;
pub mod facade;
pub mod operation;
pub mod strategy;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use client::Connection;
pub use database_url::DatabaseUrl;
pub use dialect::Dialect;
pub use dispatcher::{resolve, Procedure};
pub use error::{DbAdminError, Result};
pub use facade::{
    create_database, database_exists, database_operation, drop_database, list_databases,
};
pub use operation::{Operation, Outcome};
pub use strategy::{strategy_set, Routine, StrategySet};
pub use traits::{AdminOperations, DatabaseDriver, Session};
pub use types::{RawQueryResult, SqlValue};
