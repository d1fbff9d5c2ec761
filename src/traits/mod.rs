mod admin;
mod driver;

pub use admin::AdminOperations;
pub use driver::{DatabaseDriver, Session};
