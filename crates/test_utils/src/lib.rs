use async_trait::async_trait;
use parking_lot::Mutex;
use shared_clients::{DatabaseAdapter, DatabaseAdapterError, Row, Value};
use std::collections::VecDeque;
use std::sync::Arc;

/// Installs the workspace subscriber so `RUST_LOG=debug cargo test` shows the
/// emitted SQL.
pub fn init_test_logging() {
    logging::init_logger();
}

enum Response {
    Rows(Vec<Row>),
    Error(DatabaseAdapterError),
    Hang,
}

#[derive(Default)]
struct State {
    statements: Vec<String>,
    responses: VecDeque<Response>,
}

/// In-memory transport. Records every statement it receives and replays
/// queued responses in order; with nothing queued, `execute` succeeds and
/// `query` returns no rows.
#[derive(Clone, Default)]
pub struct MockAdapter {
    state: Arc<Mutex<State>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the rows returned by the next call.
    pub fn push_rows(&self, rows: Vec<Row>) -> &Self {
        self.state.lock().responses.push_back(Response::Rows(rows));
        self
    }

    /// Queues a transport failure for the next call.
    pub fn push_error(&self, err: DatabaseAdapterError) -> &Self {
        self.state.lock().responses.push_back(Response::Error(err));
        self
    }

    /// Makes the next call wait forever, for cancellation tests.
    pub fn push_hang(&self) -> &Self {
        self.state.lock().responses.push_back(Response::Hang);
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().statements.clone()
    }

    pub fn last_statement(&self) -> Option<String> {
        self.state.lock().statements.last().cloned()
    }

    pub fn shared(&self) -> Arc<dyn DatabaseAdapter> {
        Arc::new(self.clone())
    }

    async fn respond(&self, sql: &str) -> Result<Vec<Row>, DatabaseAdapterError> {
        let next = {
            let mut state = self.state.lock();
            state.statements.push(sql.to_string());
            state.responses.pop_front()
        };
        match next {
            None => Ok(Vec::new()),
            Some(Response::Rows(rows)) => Ok(rows),
            Some(Response::Error(err)) => Err(err),
            Some(Response::Hang) => std::future::pending().await,
        }
    }
}

#[async_trait]
impl DatabaseAdapter for MockAdapter {
    async fn execute(&self, sql: &str) -> Result<(), DatabaseAdapterError> {
        self.respond(sql).await.map(|_| ())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, DatabaseAdapterError> {
        self.respond(sql).await
    }
}

/// Builds a row of text cells; `None` becomes `NULL`.
pub fn text_row(cells: &[(&str, Option<&str>)]) -> Row {
    cells
        .iter()
        .map(|(name, value)| {
            let value = match value {
                Some(text) => Value::Text(text.to_string()),
                None => Value::Null,
            };
            (name.to_string(), value)
        })
        .collect()
}

/// Same as [`text_row`] with every column `NULL`.
pub fn null_row(columns: &[&str]) -> Row {
    columns
        .iter()
        .map(|name| (name.to_string(), Value::Null))
        .collect()
}
