use std::fmt;
use std::str::FromStr;

use crate::error::{DbAdminError, Result};

/// An administrative operation the facade can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Exists,
    Create,
    Drop,
    ListAll,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Exists,
        Operation::Create,
        Operation::Drop,
        Operation::ListAll,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Exists => "exists",
            Operation::Create => "create",
            Operation::Drop => "drop",
            Operation::ListAll => "list-all",
        }
    }

    /// Name a driver uses for its native implementation of this operation.
    pub fn method_name(&self) -> &'static str {
        match self {
            Operation::Exists => "database_exists",
            Operation::Create => "database_create",
            Operation::Drop => "database_drop",
            Operation::ListAll => "database_all",
        }
    }

    /// Checks the positional arguments and returns the database name, if any.
    ///
    /// `exists` takes zero or one name (none means the engine default),
    /// `create` and `drop` exactly one, `list-all` none.
    pub(crate) fn bind_args<'a>(&self, args: &[&'a str]) -> Result<Option<&'a str>> {
        let (ok, expected) = match self {
            Operation::Exists => (args.len() <= 1, "0 or 1"),
            Operation::Create | Operation::Drop => (args.len() == 1, "1"),
            Operation::ListAll => (args.is_empty(), "0"),
        };
        if !ok {
            return Err(DbAdminError::InvalidArguments {
                operation: self.name(),
                expected,
                actual: args.len(),
            });
        }
        Ok(args.first().copied())
    }
}

impl FromStr for Operation {
    type Err = DbAdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exists" => Ok(Operation::Exists),
            "create" => Ok(Operation::Create),
            "drop" => Ok(Operation::Drop),
            "list-all" | "all" => Ok(Operation::ListAll),
            other => Err(DbAdminError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exists(bool),
    Created,
    Dropped,
    Databases(Vec<String>),
}

impl Outcome {
    /// Whether this outcome is the shape `operation` produces.
    pub fn matches(&self, operation: Operation) -> bool {
        matches!(
            (operation, self),
            (Operation::Exists, Outcome::Exists(_))
                | (Operation::Create, Outcome::Created)
                | (Operation::Drop, Outcome::Dropped)
                | (Operation::ListAll, Outcome::Databases(_))
        )
    }

    pub fn into_exists(self) -> Result<bool> {
        match self {
            Outcome::Exists(found) => Ok(found),
            other => Err(other.unexpected(Operation::Exists)),
        }
    }

    pub fn into_databases(self) -> Result<Vec<String>> {
        match self {
            Outcome::Databases(names) => Ok(names),
            other => Err(other.unexpected(Operation::ListAll)),
        }
    }

    pub(crate) fn unexpected(self, operation: Operation) -> DbAdminError {
        DbAdminError::UnexpectedOutcome {
            operation: operation.name(),
            outcome: format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_operations() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert_eq!("all".parse::<Operation>().unwrap(), Operation::ListAll);
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = "truncate".parse::<Operation>().unwrap_err();
        match err {
            DbAdminError::UnknownOperation(name) => assert_eq!(name, "truncate"),
            _ => panic!("Expected UnknownOperation error"),
        }
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Operation::Create.method_name(), "database_create");
        assert_eq!(Operation::ListAll.method_name(), "database_all");
    }

    #[test]
    fn test_bind_args() {
        assert_eq!(Operation::Exists.bind_args(&[]).unwrap(), None);
        assert_eq!(Operation::Exists.bind_args(&["demo"]).unwrap(), Some("demo"));
        assert_eq!(Operation::Create.bind_args(&["demo"]).unwrap(), Some("demo"));
        assert_eq!(Operation::ListAll.bind_args(&[]).unwrap(), None);

        assert!(matches!(
            Operation::Drop.bind_args(&[]),
            Err(DbAdminError::InvalidArguments { actual: 0, .. })
        ));
        assert!(matches!(
            Operation::ListAll.bind_args(&["demo"]),
            Err(DbAdminError::InvalidArguments { actual: 1, .. })
        ));
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(Outcome::Exists(true).into_exists().unwrap());
        assert!(matches!(
            Outcome::Created.into_exists(),
            Err(DbAdminError::UnexpectedOutcome { operation: "exists", .. })
        ));
        assert!(Outcome::Dropped.matches(Operation::Drop));
        assert!(!Outcome::Dropped.matches(Operation::Create));
    }
}
