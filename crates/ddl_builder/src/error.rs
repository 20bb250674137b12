use common::error::DiagnosticMessage;
use thiserror::Error;

/// Failure while validating or emitting an option struct.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("validation failed: {context}")]
    Validation {
        struct_name: &'static str,
        fields: Vec<&'static str>,
        context: DiagnosticMessage,
    },
    #[error("missing required field: {context}")]
    MissingRequiredField {
        struct_name: &'static str,
        field: &'static str,
        context: DiagnosticMessage,
    },
    #[error("conflicting directives: {context}")]
    ConflictingDirectives {
        struct_name: &'static str,
        field: &'static str,
        context: DiagnosticMessage,
    },
    #[error("malformed value: {context}")]
    MalformedValue {
        struct_name: &'static str,
        field: &'static str,
        context: DiagnosticMessage,
    },
}

impl BuildError {
    #[track_caller]
    pub fn validation(
        struct_name: &'static str,
        fields: Vec<&'static str>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            struct_name,
            fields,
            context: DiagnosticMessage::new(format!("{struct_name}: {}", message.into())),
        }
    }

    #[track_caller]
    pub fn missing_required_field(struct_name: &'static str, field: &'static str) -> Self {
        Self::MissingRequiredField {
            struct_name,
            field,
            context: DiagnosticMessage::new(format!(
                "{struct_name}.{field} is required but has no value"
            )),
        }
    }

    #[track_caller]
    pub fn conflicting_directives(
        struct_name: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::ConflictingDirectives {
            struct_name,
            field,
            context: DiagnosticMessage::new(format!("{struct_name}.{field}: {}", message.into())),
        }
    }

    #[track_caller]
    pub fn malformed_value(
        struct_name: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            struct_name,
            field,
            context: DiagnosticMessage::new(format!("{struct_name}.{field}: {}", message.into())),
        }
    }

    /// Name of the option struct the failure was raised for.
    pub fn struct_name(&self) -> &'static str {
        match self {
            BuildError::Validation { struct_name, .. }
            | BuildError::MissingRequiredField { struct_name, .. }
            | BuildError::ConflictingDirectives { struct_name, .. }
            | BuildError::MalformedValue { struct_name, .. } => *struct_name,
        }
    }

    /// Fields involved in the failure.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            BuildError::Validation { fields, .. } => fields.clone(),
            BuildError::MissingRequiredField { field, .. }
            | BuildError::ConflictingDirectives { field, .. }
            | BuildError::MalformedValue { field, .. } => vec![*field],
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BuildError::Validation { .. })
    }
}
