use crate::{DatabaseAdapter, DatabaseAdapterError, Row, Value};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::config::{TokenType, WarehouseConnectionDetails};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

const STATEMENTS_PATH: &str = "/api/v2/statements";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
    #[serde(default)]
    statement_handle: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetMetaData {
    #[serde(default)]
    row_type: Vec<ColumnType>,
    #[serde(default)]
    partition_info: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ColumnType {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    scale: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PartitionResponse {
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    sql_state: Option<String>,
}

impl ErrorBody {
    fn describe(&self, status: StatusCode) -> String {
        let mut text = self
            .message
            .clone()
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        if let Some(code) = &self.code {
            text.push_str(&format!(" (code {code}"));
            if let Some(state) = &self.sql_state {
                text.push_str(&format!(", sql state {state}"));
            }
            text.push(')');
        }
        text
    }
}

impl From<reqwest::Error> for DatabaseAdapterError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            DatabaseAdapterError::invalid_connection(format!(
                "could not reach the SQL API: {err}"
            ))
        } else if err.is_decode() {
            DatabaseAdapterError::unexpected(format!("malformed SQL API response: {err}"))
        } else {
            DatabaseAdapterError::unexpected(format!(
                "Unexpected error trying to send SQL API request: {err}"
            ))
        }
    }
}

/// Runs statements through the warehouse SQL REST API
/// (`POST /api/v2/statements`).
#[derive(Debug, Clone)]
pub struct SqlApiAdapter {
    http: Client,
    base_url: String,
    token: String,
    token_type: TokenType,
    warehouse: Option<String>,
    database: Option<String>,
    schema: Option<String>,
    role: Option<String>,
    poll_interval: Duration,
}

impl SqlApiAdapter {
    pub fn new(account_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: account_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            token_type: TokenType::default(),
            warehouse: None,
            database: None,
            schema: None,
            role: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn from_details(details: &WarehouseConnectionDetails) -> Result<Self, DatabaseAdapterError> {
        if details.account_url.trim().is_empty() {
            return Err(DatabaseAdapterError::config("account_url must not be empty"));
        }
        if details.token.is_empty() {
            return Err(DatabaseAdapterError::config("token must not be empty"));
        }
        let mut adapter = Self::new(details.account_url.clone(), details.token.clone())
            .with_token_type(details.token_type);
        adapter.warehouse = details.warehouse.clone();
        adapter.database = details.database.clone();
        adapter.schema = details.schema.clone();
        adapter.role = details.role.clone();
        Ok(adapter)
    }

    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(
                "X-Snowflake-Authorization-Token-Type",
                self.token_type.as_header_value(),
            )
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn run(&self, sql: &str) -> Result<Vec<Row>, DatabaseAdapterError> {
        let request_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url, STATEMENTS_PATH);
        let body = StatementRequest {
            statement: sql,
            warehouse: self.warehouse.as_deref(),
            database: self.database.as_deref(),
            schema: self.schema.as_deref(),
            role: self.role.as_deref(),
        };
        debug!(%request_id, "submitting statement");

        let resp = self
            .authorize(self.http.post(&url))
            .query(&[("requestId", request_id.to_string())])
            .json(&body)
            .send()
            .await?;

        let mut progress = self.read_response(resp).await?;
        let response = loop {
            match progress {
                Complete(response) => break response,
                Pending(handle) => {
                    tokio::time::sleep(self.poll_interval).await;
                    debug!(%handle, "polling statement status");
                    let resp = self
                        .authorize(self.http.get(format!("{url}/{handle}")))
                        .send()
                        .await?;
                    progress = self.read_response(resp).await?;
                }
            }
        };

        let meta = response.result_set_meta_data.unwrap_or(ResultSetMetaData {
            row_type: Vec::new(),
            partition_info: Vec::new(),
        });
        let mut raw_rows = response.data;

        if meta.partition_info.len() > 1 {
            let handle = response.statement_handle.ok_or_else(|| {
                DatabaseAdapterError::unexpected("partitioned result without a statement handle")
            })?;
            for partition in 1..meta.partition_info.len() {
                let resp = self
                    .authorize(self.http.get(format!("{url}/{handle}")))
                    .query(&[("partition", partition.to_string())])
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(status_error(status, resp.json().await.unwrap_or_default()));
                }
                let page: PartitionResponse = resp.json().await?;
                raw_rows.extend(page.data);
            }
        }

        raw_rows
            .into_iter()
            .map(|cells| decode_row(&meta.row_type, cells))
            .collect()
    }

    async fn read_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<Progress, DatabaseAdapterError> {
        let status = resp.status();
        match status {
            StatusCode::OK => Ok(Complete(resp.json().await?)),
            StatusCode::ACCEPTED => {
                let pending: StatementResponse = resp.json().await?;
                let handle = pending.statement_handle.ok_or_else(|| {
                    DatabaseAdapterError::unexpected(format!(
                        "statement accepted without a handle: {}",
                        pending.message.unwrap_or_default()
                    ))
                })?;
                Ok(Pending(handle))
            }
            _ => {
                let body: ErrorBody = resp.json().await.unwrap_or_default();
                let err = status_error(status, body);
                warn!(status = status.as_u16(), "SQL API request failed: {err}");
                Err(err)
            }
        }
    }
}

enum Progress {
    Pending(String),
    Complete(StatementResponse),
}

use Progress::{Complete, Pending};

#[track_caller]
fn status_error(status: StatusCode, body: ErrorBody) -> DatabaseAdapterError {
    let message = body.describe(status);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DatabaseAdapterError::invalid_connection(message)
        }
        StatusCode::UNPROCESSABLE_ENTITY => DatabaseAdapterError::syntax(message),
        _ => DatabaseAdapterError::unexpected(format!(
            "{message} - status code {}",
            status.as_u16()
        )),
    }
}

fn decode_row(
    columns: &[ColumnType],
    cells: Vec<Option<String>>,
) -> Result<Row, DatabaseAdapterError> {
    if !columns.is_empty() && cells.len() != columns.len() {
        return Err(DatabaseAdapterError::unexpected(format!(
            "row has {} cells but the result set declares {} columns",
            cells.len(),
            columns.len()
        )));
    }
    columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| Ok((column.name.clone(), decode_cell(column, cell)?)))
        .collect()
}

fn decode_cell(column: &ColumnType, cell: Option<String>) -> Result<Value, DatabaseAdapterError> {
    let Some(raw) = cell else {
        return Ok(Value::Null);
    };
    let kind = column.kind.to_ascii_lowercase();
    let value = match kind.as_str() {
        "fixed" if column.scale.unwrap_or(0) == 0 => match raw.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(raw),
        },
        "boolean" => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => Value::Text(raw),
        },
        k if k.starts_with("timestamp") => match parse_epoch(&raw) {
            Some(ts) => Value::Time(ts),
            None => {
                return Err(DatabaseAdapterError::unexpected(format!(
                    "column {} holds an unreadable timestamp `{raw}`",
                    column.name
                )))
            }
        },
        _ => Value::Text(raw),
    };
    Ok(value)
}

/// Parses `"<seconds>[.<fraction>][ <tz offset minutes>]"`, the wire form of
/// timestamp columns. The offset only annotates the value; the epoch is UTC.
pub fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let epoch = raw.split_whitespace().next()?;
    let (secs, fraction) = match epoch.split_once('.') {
        Some((secs, fraction)) => (secs, fraction),
        None => (epoch, ""),
    };
    let negative = secs.starts_with('-');
    let secs: i64 = secs.parse().ok()?;
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        let digits: String = fraction.chars().take(9).collect();
        let scale = 10u32.pow(9 - digits.len() as u32);
        digits.parse::<u32>().ok()? * scale
    };
    // negative epochs carry the fraction towards zero
    let (secs, nanos) = if negative && nanos > 0 {
        (secs - 1, 1_000_000_000 - nanos)
    } else {
        (secs, nanos)
    };
    DateTime::from_timestamp(secs, nanos)
}

#[async_trait]
impl DatabaseAdapter for SqlApiAdapter {
    async fn execute(&self, sql: &str) -> Result<(), DatabaseAdapterError> {
        self.run(sql).await.map(|_| ())
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, DatabaseAdapterError> {
        self.run(sql).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> SqlApiAdapter {
        SqlApiAdapter::new(server.uri(), "tkn")
            .with_token_type(TokenType::KeypairJwt)
            .with_warehouse("COMPUTE_WH")
            .with_poll_interval(Duration::from_millis(5))
    }

    fn show_stages_body() -> serde_json::Value {
        json!({
            "resultSetMetaData": {
                "numRows": 1,
                "format": "jsonv2",
                "rowType": [
                    {"name": "created_on", "type": "timestamp_ltz", "scale": 3},
                    {"name": "name", "type": "text"},
                    {"name": "has_credentials", "type": "text"},
                    {"name": "rows", "type": "fixed", "scale": 0},
                    {"name": "enabled", "type": "boolean"},
                    {"name": "comment", "type": "text"}
                ],
                "partitionInfo": [{"rowCount": 1}]
            },
            "data": [["1700000000.500", "MY_STAGE", "N", "42", "true", null]],
            "code": "090001",
            "statementHandle": "01b0-handle"
        })
    }

    #[tokio::test]
    async fn query_decodes_typed_cells() -> Result<(), DatabaseAdapterError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .and(header("authorization", "Bearer tkn"))
            .and(header("X-Snowflake-Authorization-Token-Type", "KEYPAIR_JWT"))
            .and(body_partial_json(
                json!({"statement": "SHOW STAGES", "warehouse": "COMPUTE_WH"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_stages_body()))
            .expect(1)
            .mount(&server)
            .await;

        let rows = adapter(&server).query("SHOW STAGES").await?;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(
            row.get("created_on"),
            Some(&Value::Time(
                DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap()
            ))
        );
        assert_eq!(row.get("name"), Some(&Value::Text("MY_STAGE".into())));
        assert_eq!(row.get("rows"), Some(&Value::Int(42)));
        assert_eq!(row.get("enabled"), Some(&Value::Bool(true)));
        assert_eq!(row.get("comment"), Some(&Value::Null));
        Ok(())
    }

    #[tokio::test]
    async fn polls_accepted_statements_until_complete() -> Result<(), DatabaseAdapterError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "code": "333334",
                "message": "Asynchronous execution in progress.",
                "statementHandle": "abc-123"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/statements/abc-123"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "statementHandle": "abc-123"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/statements/abc-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(show_stages_body()))
            .mount(&server)
            .await;

        let rows = adapter(&server).query("SHOW STAGES").await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn fetches_every_partition() -> Result<(), DatabaseAdapterError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/statements"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultSetMetaData": {
                    "rowType": [{"name": "name", "type": "text"}],
                    "partitionInfo": [{"rowCount": 1}, {"rowCount": 2}]
                },
                "data": [["A"]],
                "statementHandle": "h1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/statements/h1"))
            .and(query_param("partition", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [["B"], ["C"]]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rows = adapter(&server).query("SHOW STAGES").await?;
        let names: Vec<_> = rows
            .iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        Ok(())
    }

    #[tokio::test]
    async fn maps_http_status_to_error_kind() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"statement": "SELEC 1"})))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "001003",
                "message": "SQL compilation error: syntax error line 1 at position 0 unexpected 'SELEC'.",
                "sqlState": "42000"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"statement": "SELECT 1"})))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "390303",
                "message": "Invalid OAuth access token."
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"statement": "SELECT 2"})))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let adapter = adapter(&server);
        let err = adapter.execute("SELEC 1").await.unwrap_err();
        assert!(matches!(err, DatabaseAdapterError::SyntaxError { .. }));
        assert!(err.to_string().contains("42000"));

        let err = adapter.execute("SELECT 1").await.unwrap_err();
        assert!(matches!(err, DatabaseAdapterError::InvalidConnectionError { .. }));

        let err = adapter.execute("SELECT 2").await.unwrap_err();
        assert!(matches!(err, DatabaseAdapterError::UnexpectedError { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn from_details_rejects_empty_url() {
        let details = WarehouseConnectionDetails::new("", "t");
        assert!(matches!(
            SqlApiAdapter::from_details(&details),
            Err(DatabaseAdapterError::ConfigError { .. })
        ));
        let details = WarehouseConnectionDetails::new("https://acme.example.com/", "t");
        let adapter = SqlApiAdapter::from_details(&details).unwrap();
        assert_eq!(adapter.base_url, "https://acme.example.com");
    }

    #[test]
    fn parses_epoch_strings() {
        assert_eq!(
            parse_epoch("1700000000"),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
        assert_eq!(
            parse_epoch("1700000000.123456789 1440"),
            DateTime::from_timestamp(1_700_000_000, 123_456_789)
        );
        assert_eq!(parse_epoch("not a time"), None);
    }

    #[test]
    fn negative_epochs_keep_their_sign_below_one_second() {
        assert_eq!(
            parse_epoch("-0.5"),
            DateTime::from_timestamp(-1, 500_000_000)
        );
        assert_eq!(
            parse_epoch("-1.5"),
            DateTime::from_timestamp(-2, 500_000_000)
        );
        assert_eq!(parse_epoch("-2"), DateTime::from_timestamp(-2, 0));
        assert_eq!(parse_epoch("1.+5"), None);
    }
}
