use std::fs;
use std::io::ErrorKind;

use tracing::debug;

use super::session;
use crate::client::Connection;
use crate::error::{DbAdminError, Result};

/// Removes the database file. A file that is already gone counts as dropped.
pub(super) fn file(database: &str) -> Result<()> {
    match fs::remove_file(database) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(database, "database file already absent");
            Ok(())
        }
        Err(e) => Err(DbAdminError::DropFailed {
            database: database.to_string(),
            message: e.to_string(),
        }),
    }
}

pub(super) async fn ddl(connection: &Connection, database: &str) -> Result<()> {
    let statement = format!(
        "DROP DATABASE {}",
        connection.dialect().quote_identifier(database)?
    );
    session::autocommit_ddl(connection, &statement)
        .await
        .map_err(|e| match e {
            DbAdminError::ConnectionFailed(_) => e,
            other => DbAdminError::DropFailed {
                database: database.to_string(),
                message: other.to_string(),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_drop_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.db");
        std::fs::write(&path, b"data").unwrap();

        let path = path.to_str().unwrap();
        file(path).unwrap();
        assert!(!std::path::Path::new(path).exists());
        file(path).unwrap();
    }

    #[test]
    fn test_file_drop_reports_other_errors() {
        // Removing a directory with remove_file fails with something other
        // than NotFound.
        let dir = tempfile::tempdir().unwrap();
        let err = file(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, DbAdminError::DropFailed { .. }));
    }
}
