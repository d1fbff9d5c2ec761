mod query_result;
mod sql_value;

pub use query_result::RawQueryResult;
pub use sql_value::SqlValue;
