use std::fmt;

use crate::error::{DbAdminError, Result};

/// Database engine family a connection targets.
///
/// The set is closed: anything that is not one of the known families is
/// `Other` and is served by the default strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// File-based engine; the "database" is a path on disk or `:memory:`.
    Sqlite,
    Postgresql,
    Mysql,
    Other,
}

impl Dialect {
    /// Every dialect, in declaration order.
    pub const ALL: [Dialect; 4] = [
        Dialect::Sqlite,
        Dialect::Postgresql,
        Dialect::Mysql,
        Dialect::Other,
    ];

    /// Maps a URL backend name (the part of the scheme before any `+driver`)
    /// to a dialect.
    pub fn from_backend(backend: &str) -> Self {
        match backend.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            "postgresql" | "postgres" | "pgsql" => Dialect::Postgresql,
            "mysql" | "mariadb" => Dialect::Mysql,
            _ => Dialect::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Other => "other",
        }
    }

    /// Bind placeholder for the 1-based parameter `index`.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgresql => format!("${}", index),
            _ => "?".to_string(),
        }
    }

    /// Quotes a database name for use in DDL.
    ///
    /// `CREATE DATABASE` / `DROP DATABASE` cannot take bind parameters, so the
    /// name is validated and wrapped in the dialect's identifier quotes with
    /// embedded quote characters doubled.
    pub fn quote_identifier(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(DbAdminError::InvalidIdentifier(
                "database name cannot be empty".to_string(),
            ));
        }
        if name.contains('\0') {
            return Err(DbAdminError::InvalidIdentifier(format!(
                "database name contains a NUL byte: {:?}",
                name
            )));
        }

        let quote = match self {
            Dialect::Mysql => '`',
            _ => '"',
        };
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        Ok(quoted)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
