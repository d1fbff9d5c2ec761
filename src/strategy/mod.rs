//! Per-operation strategy sets.
//!
//! Each administrative operation has one [`StrategySet`]: a small table of
//! dialect-specific routines plus a default routine that serves every other
//! dialect, including ones added later. The sets are immutable statics.

mod create;
mod drop;
mod exists;
mod list_all;
mod session;

use crate::client::Connection;
use crate::dialect::Dialect;
use crate::error::{DbAdminError, Result};
use crate::operation::{Operation, Outcome};

/// A built-in administrative routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// `pg_database` lookup over the `template1` database.
    ExistsPostgres,
    /// `INFORMATION_SCHEMA.SCHEMATA` lookup.
    ExistsMysql,
    /// Filesystem check; `:memory:` and the unnamed default always exist.
    ExistsFile,
    /// Connect to the database itself and run `SELECT 1`.
    ExistsProbe,
    /// File-based engines create the file on first write.
    CreateNoop,
    /// `COMMIT` then `CREATE DATABASE`.
    CreateDdl,
    /// Remove the database file; a missing file is not an error.
    DropFile,
    /// `COMMIT` then `DROP DATABASE`.
    DropDdl,
    /// The connection's own database file, if present.
    ListFile,
    /// Ask the server for its schema names.
    ListSchemas,
}

impl Routine {
    pub(crate) async fn run(
        self,
        connection: &Connection,
        database: Option<&str>,
    ) -> Result<Outcome> {
        match self {
            Routine::ExistsPostgres => {
                let name = required(Operation::Exists, database)?;
                exists::postgres(connection, name).await.map(Outcome::Exists)
            }
            Routine::ExistsMysql => {
                let name = required(Operation::Exists, database)?;
                exists::mysql(connection, name).await.map(Outcome::Exists)
            }
            Routine::ExistsFile => Ok(Outcome::Exists(exists::file(database))),
            Routine::ExistsProbe => {
                let name = required(Operation::Exists, database)?;
                exists::probe(connection, name).await.map(Outcome::Exists)
            }
            Routine::CreateNoop => {
                required(Operation::Create, database)?;
                Ok(Outcome::Created)
            }
            Routine::CreateDdl => {
                let name = required(Operation::Create, database)?;
                create::ddl(connection, name).await?;
                Ok(Outcome::Created)
            }
            Routine::DropFile => {
                drop::file(required(Operation::Drop, database)?)?;
                Ok(Outcome::Dropped)
            }
            Routine::DropDdl => {
                let name = required(Operation::Drop, database)?;
                drop::ddl(connection, name).await?;
                Ok(Outcome::Dropped)
            }
            Routine::ListFile => Ok(Outcome::Databases(list_all::file(connection))),
            Routine::ListSchemas => list_all::schemas(connection).await.map(Outcome::Databases),
        }
    }
}

fn required(operation: Operation, database: Option<&str>) -> Result<&str> {
    database.ok_or(DbAdminError::InvalidArguments {
        operation: operation.name(),
        expected: "1",
        actual: 0,
    })
}

/// Dialect-specific routines for one operation, with a default fallback.
#[derive(Debug)]
pub struct StrategySet {
    operation: Operation,
    overrides: &'static [(Dialect, Routine)],
    default: Routine,
}

impl StrategySet {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The routine for `dialect`. Never fails: dialects without an override
    /// get the default.
    pub fn lookup(&self, dialect: Dialect) -> Routine {
        self.overrides
            .iter()
            .find(|(d, _)| *d == dialect)
            .map(|(_, routine)| *routine)
            .unwrap_or(self.default)
    }

    pub fn default_routine(&self) -> Routine {
        self.default
    }
}

pub static EXISTS: StrategySet = StrategySet {
    operation: Operation::Exists,
    overrides: &[
        (Dialect::Postgresql, Routine::ExistsPostgres),
        (Dialect::Mysql, Routine::ExistsMysql),
        (Dialect::Sqlite, Routine::ExistsFile),
    ],
    default: Routine::ExistsProbe,
};

pub static CREATE: StrategySet = StrategySet {
    operation: Operation::Create,
    overrides: &[(Dialect::Sqlite, Routine::CreateNoop)],
    default: Routine::CreateDdl,
};

pub static DROP: StrategySet = StrategySet {
    operation: Operation::Drop,
    overrides: &[(Dialect::Sqlite, Routine::DropFile)],
    default: Routine::DropDdl,
};

pub static LIST_ALL: StrategySet = StrategySet {
    operation: Operation::ListAll,
    overrides: &[(Dialect::Sqlite, Routine::ListFile)],
    default: Routine::ListSchemas,
};

/// The strategy set serving `operation`.
pub fn strategy_set(operation: Operation) -> &'static StrategySet {
    match operation {
        Operation::Exists => &EXISTS,
        Operation::Create => &CREATE,
        Operation::Drop => &DROP,
        Operation::ListAll => &LIST_ALL,
    }
}
