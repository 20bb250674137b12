//! Decoding of result rows into typed records.
//!
//! Every resource declares a `*Row` shape mirroring the columns the warehouse
//! returns (built through [`FromRow`]) and converts it into its public record
//! with `TryFrom`, which is where boolean conventions and empty-as-absent
//! columns are applied.

use chrono::{DateTime, NaiveDateTime, Utc};
use common::error::DiagnosticMessage;
use shared_clients::sql_api::parse_epoch;
use shared_clients::{Row, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("schema mismatch on column `{column}`: {context}")]
    SchemaMismatch {
        column: String,
        context: DiagnosticMessage,
    },
    #[error("unparseable value in column `{column}`: {context}")]
    UnparseableValue {
        column: String,
        context: DiagnosticMessage,
    },
}

impl DecodeError {
    #[track_caller]
    pub fn schema_mismatch(column: &str, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            column: column.to_string(),
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn unparseable(column: &str, message: impl Into<String>) -> Self {
        Self::UnparseableValue {
            column: column.to_string(),
            context: DiagnosticMessage::new(message.into()),
        }
    }

    /// Prefixes the context with `scope`, e.g. the row position.
    pub fn scoped(self, scope: &str) -> Self {
        match self {
            DecodeError::SchemaMismatch { column, context } => DecodeError::SchemaMismatch {
                column,
                context: context.scoped(scope),
            },
            DecodeError::UnparseableValue { column, context } => DecodeError::UnparseableValue {
                column,
                context: context.scoped(scope),
            },
        }
    }

    pub fn column(&self) -> &str {
        match self {
            DecodeError::SchemaMismatch { column, .. }
            | DecodeError::UnparseableValue { column, .. } => column,
        }
    }
}

/// Builds a row shape from a raw result row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, DecodeError>;
}

/// How a boolean-ish text column spells its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolConvention {
    /// `Y` / `N` (also `YES` / `NO`).
    YesNo,
    TrueFalse,
    OnOff,
}

impl BoolConvention {
    pub fn parse(&self, column: &str, raw: &str) -> Result<bool, DecodeError> {
        let raw = raw.trim();
        let (truthy, falsy): (&[&str], &[&str]) = match self {
            BoolConvention::YesNo => (&["Y", "YES"], &["N", "NO"]),
            BoolConvention::TrueFalse => (&["TRUE"], &["FALSE"]),
            BoolConvention::OnOff => (&["ON"], &["OFF"]),
        };
        if truthy.iter().any(|t| t.eq_ignore_ascii_case(raw)) {
            Ok(true)
        } else if falsy.iter().any(|f| f.eq_ignore_ascii_case(raw)) {
            Ok(false)
        } else {
            Err(DecodeError::unparseable(
                column,
                format!("`{raw}` is not a {self:?} boolean"),
            ))
        }
    }

    pub fn parse_opt(&self, column: &str, raw: Option<&str>) -> Result<Option<bool>, DecodeError> {
        raw.map(|raw| self.parse(column, raw)).transpose()
    }
}

/// Empty strings are how the warehouse spells "no value" in some columns.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Column accessor over one raw row.
pub struct RowReader<'r> {
    row: &'r Row,
}

impl<'r> RowReader<'r> {
    pub fn new(row: &'r Row) -> Self {
        Self { row }
    }

    fn cell(&self, column: &str) -> Result<&'r Value, DecodeError> {
        self.row.get(column).ok_or_else(|| {
            DecodeError::schema_mismatch(column, "column is missing from the result set")
        })
    }

    fn required<T>(&self, column: &str, value: Option<T>) -> Result<T, DecodeError> {
        value.ok_or_else(|| DecodeError::unparseable(column, "required column is NULL"))
    }

    /// A non-null column rendered as text.
    pub fn text(&self, column: &str) -> Result<String, DecodeError> {
        let value = text_of(self.cell(column)?);
        self.required(column, value)
    }

    /// A nullable column; a missing column decodes as absent.
    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DecodeError> {
        Ok(self.row.get(column).and_then(text_of))
    }

    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, DecodeError> {
        let value = decode_timestamp(column, self.cell(column)?)?;
        self.required(column, value)
    }

    pub fn opt_timestamp(&self, column: &str) -> Result<Option<DateTime<Utc>>, DecodeError> {
        match self.row.get(column) {
            Some(value) => decode_timestamp(column, value),
            None => Ok(None),
        }
    }

    pub fn opt_int(&self, column: &str) -> Result<Option<i64>, DecodeError> {
        match self.row.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(Value::Text(text)) if text.is_empty() => Ok(None),
            Some(Value::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
                DecodeError::unparseable(column, format!("`{text}` is not an integer"))
            }),
            Some(other) => Err(DecodeError::unparseable(
                column,
                format!("expected an integer, found {other:?}"),
            )),
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Text(text) => Some(text.clone()),
        Value::Int(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Time(t) => Some(t.to_rfc3339()),
    }
}

/// Accepts native timestamps, epoch seconds (as integers or
/// `"secs[.fraction][ offset]"` text) and RFC 3339 or
/// `YYYY-MM-DD HH:MM:SS[.f] [+zzzz]` text. `NULL` decodes as `None`.
pub fn decode_timestamp(column: &str, value: &Value) -> Result<Option<DateTime<Utc>>, DecodeError> {
    let unparseable =
        |shown: &dyn std::fmt::Debug| DecodeError::unparseable(column, format!("{shown:?} is not a timestamp"));
    match value {
        Value::Null => Ok(None),
        Value::Time(t) => Ok(Some(*t)),
        Value::Int(secs) => DateTime::from_timestamp(*secs, 0)
            .map(Some)
            .ok_or_else(|| unparseable(secs)),
        Value::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            if let Some(ts) = parse_epoch(text) {
                return Ok(Some(ts));
            }
            if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
                return Ok(Some(ts.with_timezone(&Utc)));
            }
            if let Ok(ts) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %z") {
                return Ok(Some(ts.with_timezone(&Utc)));
            }
            if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
                return Ok(Some(ts.and_utc()));
            }
            Err(unparseable(&text))
        }
        Value::Bool(_) => Err(unparseable(value)),
    }
}

/// Decodes every raw row into `R` and then into the public record `T`.
pub fn decode_all<R, T>(rows: &[Row]) -> Result<Vec<T>, DecodeError>
where
    R: FromRow,
    T: TryFrom<R, Error = DecodeError>,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            R::from_row(row)
                .and_then(T::try_from)
                .map_err(|err| err.scoped(&format!("row {index}")))
        })
        .collect()
}
