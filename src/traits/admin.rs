use async_trait::async_trait;

use crate::client::Connection;
use crate::error::Result;
use crate::operation::{Operation, Outcome};

/// Capability for drivers that implement administrative operations natively.
///
/// A driver returning this from [`DatabaseDriver::admin_operations`] overrides
/// the built-in strategy for every operation where `supports` is true.
///
/// [`DatabaseDriver::admin_operations`]: crate::traits::DatabaseDriver::admin_operations
#[async_trait]
pub trait AdminOperations: Send + Sync {
    fn supports(&self, operation: Operation) -> bool;

    /// Run `operation`. `database` is the bound name argument, if the
    /// operation takes one. The returned outcome must match the operation.
    async fn run(
        &self,
        connection: &Connection,
        operation: Operation,
        database: Option<&str>,
    ) -> Result<Outcome>;
}
