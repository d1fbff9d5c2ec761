use tracing::debug;

use crate::client::Connection;
use crate::error::{DbAdminError, Result};
use crate::operation::{Operation, Outcome};
use crate::strategy::{strategy_set, Routine};

/// The unit of work chosen for an operation on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    /// The driver's own implementation, through its `AdminOperations` capability.
    Native(Operation),
    /// A built-in strategy routine.
    Builtin(Routine),
}

impl Procedure {
    /// Run the procedure against `connection`.
    pub async fn invoke(
        self,
        connection: &Connection,
        database: Option<&str>,
    ) -> Result<Outcome> {
        match self {
            Procedure::Native(operation) => {
                let native = connection.driver().admin_operations().ok_or(
                    DbAdminError::NativeOperationUnavailable {
                        operation: operation.method_name(),
                    },
                )?;
                let outcome = native.run(connection, operation, database).await?;
                if outcome.matches(operation) {
                    Ok(outcome)
                } else {
                    Err(outcome.unexpected(operation))
                }
            }
            Procedure::Builtin(routine) => routine.run(connection, database).await,
        }
    }
}

/// Picks the procedure for `operation` on `connection`.
///
/// A driver that natively supports the operation wins; otherwise the
/// operation's strategy set is consulted for the connection's dialect, falling
/// back to its default. Resolution has no side effects and cannot fail.
pub fn resolve(connection: &Connection, operation: Operation) -> Procedure {
    let dialect = connection.dialect();

    if let Some(native) = connection.driver().admin_operations() {
        if native.supports(operation) {
            debug!(method = operation.method_name(), %dialect, "using native driver operation");
            return Procedure::Native(operation);
        }
    }

    let routine = strategy_set(operation).lookup(dialect);
    debug!(method = operation.method_name(), %dialect, ?routine, "resolved strategy");
    Procedure::Builtin(routine)
}
