use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::database_url::DatabaseUrl;
use crate::error::{DbAdminError, Result};
use crate::traits::{DatabaseDriver, Session};
use crate::types::{RawQueryResult, SqlValue};

/// A recorded statement execution for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Everything a session did, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A session was opened; `database` is the URL's database component.
    Connect { database: Option<String> },
    Execute(RecordedQuery),
    SchemaNames,
    Close,
}

#[derive(Default)]
struct Shared {
    responses: Mutex<VecDeque<Result<RawQueryResult>>>,
    connect_errors: Mutex<VecDeque<DbAdminError>>,
    schema_names: Mutex<Vec<String>>,
    events: Mutex<Vec<SessionEvent>>,
}

/// An in-memory database driver for testing.
///
/// Statements receive queued responses (or queued errors) in FIFO order and
/// an empty result once the queue is drained. Every connect, statement and
/// close is recorded so tests can check ordering and cleanup.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use dbadmin::drivers::{InMemoryTestDriver, InMemoryTestResponseBuilder};
///
/// let driver = Arc::new(
///     InMemoryTestDriver::new().with_response(
///         InMemoryTestResponseBuilder::new()
///             .columns(&["?column?"])
///             .row(&["1"])
///             .build(),
///     ),
/// );
/// ```
#[derive(Clone, Default)]
pub struct InMemoryTestDriver {
    shared: Arc<Shared>,
}

impl InMemoryTestDriver {
    /// Create a new in-memory test driver with no pre-configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to be returned by the next statement.
    pub fn with_response(self, response: RawQueryResult) -> Self {
        self.shared.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Add multiple responses to be returned by subsequent statements.
    pub fn with_responses(self, responses: impl IntoIterator<Item = RawQueryResult>) -> Self {
        let mut queue = self.shared.responses.lock().unwrap();
        for response in responses {
            queue.push_back(Ok(response));
        }
        drop(queue);
        self
    }

    /// Make the next statement fail with `error`.
    pub fn with_error(self, error: DbAdminError) -> Self {
        self.shared.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Make the next connect attempt fail with `error`.
    pub fn with_connect_error(self, error: DbAdminError) -> Self {
        self.shared.connect_errors.lock().unwrap().push_back(error);
        self
    }

    /// Names returned by `Session::schema_names`.
    pub fn with_schema_names(self, names: &[&str]) -> Self {
        *self.shared.schema_names.lock().unwrap() = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Get all recorded session events.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.shared.events.lock().unwrap().clone()
    }

    /// Get all recorded statements that have been executed.
    pub fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SessionEvent::Execute(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    /// Just the SQL text of every executed statement, in order.
    pub fn recorded_sql(&self) -> Vec<String> {
        self.recorded_queries().into_iter().map(|q| q.sql).collect()
    }

    /// Get the last recorded statement, if any.
    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.recorded_queries().pop()
    }

    /// Assert that the last statement matches the expected SQL and parameters.
    pub fn assert_last_query(&self, expected_sql: &str, expected_params: &[SqlValue]) {
        let last = self.last_query().expect("No queries were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }

    /// Assert that exactly n statements were executed.
    pub fn assert_query_count(&self, expected: usize) {
        let actual = self.recorded_queries().len();
        assert_eq!(
            actual, expected,
            "Query count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }

    /// Assert that every opened session was closed.
    pub fn assert_sessions_closed(&self) {
        let events = self.events();
        let opened = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Connect { .. }))
            .count();
        let closed = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Close))
            .count();
        assert_eq!(
            opened, closed,
            "Session leak. Opened: {}, Closed: {}\nEvents: {:?}",
            opened, closed, events
        );
    }

    fn record(&self, event: SessionEvent) {
        self.shared.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl DatabaseDriver for InMemoryTestDriver {
    async fn connect(&self, url: &DatabaseUrl) -> Result<Box<dyn Session>> {
        if let Some(error) = self.shared.connect_errors.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.record(SessionEvent::Connect {
            database: url.database().map(str::to_string),
        });
        Ok(Box::new(InMemoryTestSession {
            driver: self.clone(),
            closed: false,
        }))
    }
}

struct InMemoryTestSession {
    driver: InMemoryTestDriver,
    closed: bool,
}

impl InMemoryTestSession {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(DbAdminError::ConnectionFailed("session is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for InMemoryTestSession {
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        self.ensure_open()?;
        self.driver.record(SessionEvent::Execute(RecordedQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        }));

        // Return next queued response or an empty result
        self.driver
            .shared
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawQueryResult::empty()))
    }

    async fn schema_names(&mut self) -> Result<Vec<String>> {
        self.ensure_open()?;
        self.driver.record(SessionEvent::SchemaNames);
        Ok(self.driver.shared.schema_names.lock().unwrap().clone())
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.driver.record(SessionEvent::Close);
        }
        Ok(())
    }
}

/// Builder for creating test responses easily.
pub struct InMemoryTestResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InMemoryTestResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set the column names for the response.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of string values.
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Build the RawQueryResult.
    pub fn build(self) -> RawQueryResult {
        RawQueryResult::new(self.columns, self.rows)
    }
}

impl Default for InMemoryTestResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
