use crate::rows::DecodeError;
use common::error::{truncate_for_display, DiagnosticMessage};
use ddl_builder::BuildError;
use shared_clients::DatabaseAdapterError;
use thiserror::Error;

/// Statements are cut to this many characters inside transport errors.
pub const MAX_STATEMENT_IN_ERROR: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Emission,
    Transport,
    Decode,
    NotFound,
    Cancelled,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("validation error: {source}")]
    Validation {
        #[source]
        source: BuildError,
    },
    #[error("emission error: {source}")]
    Emission {
        #[source]
        source: BuildError,
    },
    #[error("{operation} failed while running `{statement}`: {source}")]
    Transport {
        operation: &'static str,
        statement: String,
        #[source]
        source: DatabaseAdapterError,
    },
    #[error("{operation} returned an undecodable row: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: DecodeError,
    },
    #[error("not found: {context}")]
    NotFound { context: DiagnosticMessage },
    #[error("{operation} was cancelled")]
    Cancelled { operation: &'static str },
}

impl SdkError {
    pub fn transport(operation: &'static str, statement: &str, source: DatabaseAdapterError) -> Self {
        Self::Transport {
            operation,
            statement: truncate_for_display(statement, MAX_STATEMENT_IN_ERROR),
            source,
        }
    }

    pub fn decode(operation: &'static str, source: DecodeError) -> Self {
        Self::Decode { operation, source }
    }

    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    pub fn cancelled(operation: &'static str) -> Self {
        Self::Cancelled { operation }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::Validation { .. } => ErrorKind::Validation,
            SdkError::Emission { .. } => ErrorKind::Emission,
            SdkError::Transport { .. } => ErrorKind::Transport,
            SdkError::Decode { .. } => ErrorKind::Decode,
            SdkError::NotFound { .. } => ErrorKind::NotFound,
            SdkError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    /// The builder error behind a `Validation` or `Emission` failure.
    pub fn build_error(&self) -> Option<&BuildError> {
        match self {
            SdkError::Validation { source } | SdkError::Emission { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BuildError> for SdkError {
    fn from(source: BuildError) -> Self {
        if source.is_validation() {
            SdkError::Validation { source }
        } else {
            SdkError::Emission { source }
        }
    }
}
