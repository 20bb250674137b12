use crate::directive::{FieldSpec, Modifiers, Primary};
use crate::error::BuildError;
use crate::options::{Field, SqlOptions};
use crate::value::SqlValue;
use tracing::trace;

/// Wraps text in single quotes, doubling embedded quotes and backslashes.
pub fn single_quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "''"))
}

/// Renders an option struct to one SQL statement (or fragment, for nested
/// groups). Tokens are trimmed and joined with a single space; unset fields
/// contribute nothing.
pub fn emit(options: &dyn SqlOptions) -> Result<String, BuildError> {
    Ok(emit_tokens(options)?.join(" "))
}

fn emit_tokens(options: &dyn SqlOptions) -> Result<Vec<String>, BuildError> {
    let struct_name = options.struct_name();
    let mut tokens = Vec::new();
    for field in options.fields() {
        let spec = FieldSpec::resolve(struct_name, field.name, field.directives)?;
        if spec.modifiers.required && !matches!(spec.primary, Primary::Static(_)) {
            check_required(struct_name, &field)?;
        }
        if let Some(token) = FieldEmitter::new(struct_name, &field, spec).emit()? {
            let token = token.trim();
            if !token.is_empty() {
                trace!(struct_name, field = field.name, token, "emitted token");
                tokens.push(token.to_string());
            }
        }
    }
    Ok(tokens)
}

fn check_required(struct_name: &'static str, field: &Field<'_>) -> Result<(), BuildError> {
    let missing = match &field.value {
        SqlValue::Absent => true,
        SqlValue::Text(text) => text.is_empty(),
        SqlValue::List(items) => items.is_empty(),
        _ => false,
    };
    if missing {
        Err(BuildError::missing_required_field(struct_name, field.name))
    } else {
        Ok(())
    }
}

struct FieldEmitter<'f, 'a> {
    struct_name: &'static str,
    field: &'f Field<'a>,
    primary: Primary,
    modifiers: Modifiers,
}

impl<'f, 'a> FieldEmitter<'f, 'a> {
    fn new(struct_name: &'static str, field: &'f Field<'a>, spec: FieldSpec) -> Self {
        Self {
            struct_name,
            field,
            primary: spec.primary,
            modifiers: spec.modifiers,
        }
    }

    fn malformed(&self, message: impl Into<String>) -> BuildError {
        BuildError::malformed_value(self.struct_name, self.field.name, message)
    }

    fn emit(&self) -> Result<Option<String>, BuildError> {
        match self.primary {
            Primary::Static(text) => Ok(Some(text.to_string())),
            Primary::Keyword(literal) => self.keyword(literal),
            Primary::Parameter(name) => self.parameter(name),
            Primary::Identifier(prefix) => self.identifier(prefix),
            Primary::List(prefix) => self.list(prefix),
        }
    }

    fn keyword(&self, literal: Option<&'static str>) -> Result<Option<String>, BuildError> {
        let value = &self.field.value;
        match (value, literal) {
            (SqlValue::Absent | SqlValue::Bool(false), _) => Ok(None),
            (SqlValue::Bool(true), Some(literal)) => Ok(Some(literal.to_string())),
            (SqlValue::Bool(true), None) => {
                Err(self.malformed("boolean keyword needs a literal in its tag"))
            }
            (SqlValue::Nested(child), literal) => {
                let group = self.group(*child)?;
                Ok(Some(join_non_empty([
                    literal.map(str::to_string),
                    group,
                ])))
            }
            (SqlValue::List(_), _) => Err(self.malformed("keyword fields cannot hold a list")),
            (SqlValue::Text(_) | SqlValue::Identifier(_), Some(literal)) => {
                Ok(Some(literal.to_string()))
            }
            (SqlValue::Text(_) | SqlValue::Identifier(_), None) => self.scalar(value),
        }
    }

    fn parameter(&self, name: Option<&'static str>) -> Result<Option<String>, BuildError> {
        let rendered = match &self.field.value {
            SqlValue::Absent => return Ok(None),
            SqlValue::List(items) if items.is_empty() => return Ok(None),
            SqlValue::List(items) => Some(self.items(items, self.modifiers.parentheses)?),
            SqlValue::Nested(child) => self.group(*child)?,
            other => self.scalar(other)?,
        };
        let Some(rendered) = rendered else {
            return Ok(None);
        };
        let separator = if self.modifiers.no_equals { " " } else { " = " };
        Ok(Some(match name {
            Some(name) => format!("{name}{separator}{rendered}"),
            None if self.modifiers.no_equals => rendered,
            None => format!("= {rendered}"),
        }))
    }

    fn identifier(&self, prefix: Option<&'static str>) -> Result<Option<String>, BuildError> {
        if self.modifiers.single_quotes {
            return Err(self.malformed("identifiers cannot be single-quoted"));
        }
        match &self.field.value {
            SqlValue::Absent => Ok(None),
            SqlValue::Identifier(id) => Ok(Some(join_non_empty([
                prefix.map(str::to_string),
                Some(id.fully_qualified_name()),
            ]))),
            other => Err(self.malformed(format!(
                "identifier fields must hold an identifier, found {}",
                other.kind()
            ))),
        }
    }

    fn list(&self, prefix: Option<&'static str>) -> Result<Option<String>, BuildError> {
        match &self.field.value {
            SqlValue::Absent => Ok(None),
            SqlValue::List(items) if items.is_empty() => Ok(None),
            SqlValue::List(items) => {
                let body = self.items(items, !self.modifiers.no_parentheses)?;
                Ok(Some(join_non_empty([prefix.map(str::to_string), Some(body)])))
            }
            other => Err(self.malformed(format!(
                "list fields must hold a sequence, found {}",
                other.kind()
            ))),
        }
    }

    fn items(&self, items: &[SqlValue<'_>], parenthesize: bool) -> Result<String, BuildError> {
        let mut rendered = Vec::with_capacity(items.len());
        for item in items {
            let token = match item {
                SqlValue::Nested(child) => emit_tokens(*child)?.join(" "),
                SqlValue::List(_) => return Err(self.malformed("nested lists are not supported")),
                other => match self.scalar(other)? {
                    Some(token) => token,
                    None => continue,
                },
            };
            rendered.push(token);
        }
        let separator = if self.modifiers.no_comma { " " } else { ", " };
        let body = rendered.join(separator);
        Ok(if parenthesize {
            format!("({body})")
        } else {
            body
        })
    }

    /// Renders a nested option struct; `None` when it produced no tokens.
    fn group(&self, child: &dyn SqlOptions) -> Result<Option<String>, BuildError> {
        let tokens = emit_tokens(child)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        let body = tokens.join(" ");
        Ok(Some(if self.modifiers.parentheses {
            format!("({body})")
        } else {
            body
        }))
    }

    fn scalar(&self, value: &SqlValue<'_>) -> Result<Option<String>, BuildError> {
        Ok(match value {
            SqlValue::Absent => None,
            SqlValue::Bool(true) => Some("TRUE".to_string()),
            SqlValue::Bool(false) => Some("FALSE".to_string()),
            SqlValue::Text(text) if self.modifiers.single_quotes => Some(single_quote(text)),
            SqlValue::Text(text) => Some(text.to_string()),
            SqlValue::Identifier(id) => Some(id.fully_qualified_name()),
            SqlValue::Nested(child) => self.group(*child)?,
            SqlValue::List(_) => return Err(self.malformed("unexpected list value")),
        })
    }
}

fn join_non_empty<const N: usize>(parts: [Option<String>; N]) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
