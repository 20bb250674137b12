//! Quoted, scope-aware object names.
//!
//! Components are stored raw (unescaped). Rendering wraps every component in
//! double quotes and doubles embedded quotes, so escaping happens exactly once.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_COMPONENT_LENGTH: usize = 255;

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").expect("static regex compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier component `{component}` must not be empty")]
    EmptyComponent { component: &'static str },
    #[error("expected {expected} identifier parts but found {found} in `{input}`")]
    WrongPartCount {
        expected: usize,
        found: usize,
        input: String,
    },
    #[error("cannot parse identifier `{input}`: {reason}")]
    Unparseable { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierScope {
    AccountObject,
    DatabaseObject,
    SchemaObject,
}

impl IdentifierScope {
    pub fn depth(&self) -> usize {
        match self {
            IdentifierScope::AccountObject => 1,
            IdentifierScope::DatabaseObject => 2,
            IdentifierScope::SchemaObject => 3,
        }
    }
}

/// Behaviour shared by every identifier scope.
pub trait ObjectIdentifier: fmt::Debug + Send + Sync {
    fn scope(&self) -> IdentifierScope;

    /// Raw components, outermost first.
    fn parts(&self) -> Vec<&str>;

    /// The leaf component.
    fn name(&self) -> &str;

    fn fully_qualified_name(&self) -> String {
        self.parts()
            .into_iter()
            .map(quote_identifier)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Wraps one component in double quotes, doubling embedded quotes.
pub fn quote_identifier(part: &str) -> String {
    format!("\"{}\"", part.replace('"', "\"\""))
}

/// Checks the structural well-formedness of an identifier, returning a
/// human-readable reason when it is not.
pub fn check_well_formed(id: &dyn ObjectIdentifier) -> Result<(), String> {
    let parts = id.parts();
    if parts.len() != id.scope().depth() {
        return Err(format!(
            "{:?} identifier must have {} parts, found {}",
            id.scope(),
            id.scope().depth(),
            parts.len()
        ));
    }
    for part in parts {
        if part.is_empty() {
            return Err("identifier components must not be empty".to_string());
        }
        if part.chars().count() > MAX_COMPONENT_LENGTH {
            return Err(format!(
                "identifier component exceeds {MAX_COMPONENT_LENGTH} characters"
            ));
        }
        if CONTROL_CHARS.is_match(part) {
            return Err(format!(
                "identifier component {} contains control characters",
                quote_identifier(part)
            ));
        }
    }
    Ok(())
}

fn non_empty(value: String, component: &'static str) -> Result<String, IdentifierError> {
    if value.is_empty() {
        Err(IdentifierError::EmptyComponent { component })
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        Ok(Self {
            name: non_empty(name.into(), "name")?,
        })
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn scope(&self) -> IdentifierScope {
        IdentifierScope::AccountObject
    }

    fn parts(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseObjectIdentifier {
    database_name: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        Ok(Self {
            database_name: non_empty(database_name.into(), "database_name")?,
            name: non_empty(name.into(), "name")?,
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// The enclosing database.
    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier {
            name: self.database_name.clone(),
        }
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn scope(&self) -> IdentifierScope {
        IdentifierScope::DatabaseObject
    }

    fn parts(&self) -> Vec<&str> {
        vec![&self.database_name, &self.name]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifier {
    database_name: String,
    schema_name: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        Ok(Self {
            database_name: non_empty(database_name.into(), "database_name")?,
            schema_name: non_empty(schema_name.into(), "schema_name")?,
            name: non_empty(name.into(), "name")?,
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The enclosing schema, i.e. this identifier without its leaf.
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier {
            database_name: self.database_name.clone(),
            name: self.schema_name.clone(),
        }
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier {
            name: self.database_name.clone(),
        }
    }

    /// Same schema, different leaf.
    pub fn with_name(&self, name: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::new(self.database_name.clone(), self.schema_name.clone(), name)
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn scope(&self) -> IdentifierScope {
        IdentifierScope::SchemaObject
    }

    fn parts(&self) -> Vec<&str> {
        vec![&self.database_name, &self.schema_name, &self.name]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A column name inside a statement, e.g. a view column or a policy
/// argument. Stored raw and quoted once when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIdentifier(String);

impl ColumnIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        quote_identifier(&self.0)
    }
}

impl From<&str> for ColumnIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ColumnIdentifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.quoted())
    }
}

macro_rules! impl_display_and_parse {
    ($ty:ty, $depth:expr, |$parts:ident| $build:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.fully_qualified_name())
            }
        }

        impl FromStr for $ty {
            type Err = IdentifierError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let $parts = split_parts(input)?;
                if $parts.len() != $depth {
                    return Err(IdentifierError::WrongPartCount {
                        expected: $depth,
                        found: $parts.len(),
                        input: input.to_string(),
                    });
                }
                $build
            }
        }
    };
}

impl_display_and_parse!(AccountObjectIdentifier, 1, |parts| {
    let [name]: [String; 1] = into_array(parts)?;
    AccountObjectIdentifier::new(name)
});
impl_display_and_parse!(DatabaseObjectIdentifier, 2, |parts| {
    let [database, name]: [String; 2] = into_array(parts)?;
    DatabaseObjectIdentifier::new(database, name)
});
impl_display_and_parse!(SchemaObjectIdentifier, 3, |parts| {
    let [database, schema, name]: [String; 3] = into_array(parts)?;
    SchemaObjectIdentifier::new(database, schema, name)
});

fn into_array<const N: usize>(parts: Vec<String>) -> Result<[String; N], IdentifierError> {
    let found = parts.len();
    parts
        .try_into()
        .map_err(|_| IdentifierError::WrongPartCount {
            expected: N,
            found,
            input: String::new(),
        })
}

/// Splits `"DB"."SCH".NAME` into raw components, honouring quoted parts and
/// doubled quotes inside them.
fn split_parts(input: &str) -> Result<Vec<String>, IdentifierError> {
    let unparseable = |reason: &str| IdentifierError::Unparseable {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = Vec::new();
    let mut chars = input.trim().chars().peekable();
    loop {
        let mut part = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        part.push('"');
                    }
                    Some('"') => break,
                    Some(c) => part.push(c),
                    None => return Err(unparseable("unterminated quoted component")),
                }
            }
            match chars.peek() {
                None | Some('.') => {}
                Some(_) => return Err(unparseable("unexpected character after closing quote")),
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                if c == '"' {
                    return Err(unparseable("quote inside unquoted component"));
                }
                part.push(c);
                chars.next();
            }
        }
        parts.push(part);
        match chars.next() {
            Some('.') => continue,
            None => break,
            Some(_) => return Err(unparseable("unexpected character")),
        }
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_quoted_dot_separated() {
        let id = SchemaObjectIdentifier::new("DB", "SCH", "MY_STAGE").unwrap();
        assert_eq!(id.fully_qualified_name(), r#""DB"."SCH"."MY_STAGE""#);
        assert_eq!(id.to_string(), r#""DB"."SCH"."MY_STAGE""#);
    }

    #[test]
    fn embedded_quotes_are_doubled_once() {
        let id = AccountObjectIdentifier::new(r#"we"ird"#).unwrap();
        assert_eq!(id.fully_qualified_name(), r#""we""ird""#);
    }

    #[test]
    fn construction_rejects_empty_components() {
        assert_eq!(
            SchemaObjectIdentifier::new("DB", "", "X").unwrap_err(),
            IdentifierError::EmptyComponent {
                component: "schema_name"
            }
        );
        assert!(AccountObjectIdentifier::new("").is_err());
        assert!(DatabaseObjectIdentifier::new("", "S").is_err());
    }

    #[test]
    fn projections_drop_the_leaf() {
        let id = SchemaObjectIdentifier::new("DB", "SCH", "MV").unwrap();
        assert_eq!(
            id.schema_id(),
            DatabaseObjectIdentifier::new("DB", "SCH").unwrap()
        );
        assert_eq!(
            id.schema_id().database_id(),
            AccountObjectIdentifier::new("DB").unwrap()
        );
        assert_eq!(id.database_id(), id.schema_id().database_id());
    }

    #[test]
    fn equality_is_case_sensitive() {
        let a = SchemaObjectIdentifier::new("db", "sch", "x").unwrap();
        let b = SchemaObjectIdentifier::new("DB", "sch", "x").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn parses_rendered_and_bare_forms() {
        let quoted: SchemaObjectIdentifier = r#""DB"."my.schema"."a""b""#.parse().unwrap();
        assert_eq!(quoted.schema_name(), "my.schema");
        assert_eq!(quoted.name(), r#"a"b"#);

        let bare: SchemaObjectIdentifier = "DB.SCH.S".parse().unwrap();
        assert_eq!(bare, SchemaObjectIdentifier::new("DB", "SCH", "S").unwrap());

        let round_trip: SchemaObjectIdentifier = quoted.to_string().parse().unwrap();
        assert_eq!(round_trip, quoted);
    }

    #[test]
    fn parse_rejects_wrong_shapes() {
        assert!(matches!(
            "DB.S".parse::<SchemaObjectIdentifier>(),
            Err(IdentifierError::WrongPartCount { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            r#""DB"x.S"#.parse::<DatabaseObjectIdentifier>(),
            Err(IdentifierError::Unparseable { .. })
        ));
        assert!(matches!(
            r#""open"#.parse::<AccountObjectIdentifier>(),
            Err(IdentifierError::Unparseable { .. })
        ));
        assert!(matches!(
            "DB..X".parse::<SchemaObjectIdentifier>(),
            Err(IdentifierError::EmptyComponent { .. })
        ));
    }

    #[test]
    fn well_formedness_checks() {
        let ok = SchemaObjectIdentifier::new("DB", "SCH", "S").unwrap();
        assert!(check_well_formed(&ok).is_ok());

        let long = AccountObjectIdentifier::new("x".repeat(MAX_COMPONENT_LENGTH + 1)).unwrap();
        assert!(check_well_formed(&long).is_err());

        let control = AccountObjectIdentifier::new("line\nbreak").unwrap();
        assert!(check_well_formed(&control)
            .unwrap_err()
            .contains("control characters"));
    }

    #[test]
    fn column_identifiers_quote_once() {
        assert_eq!(ColumnIdentifier::new("my col").to_string(), r#""my col""#);
        assert_eq!(ColumnIdentifier::from("a\"b").quoted(), r#""a""b""#);
        assert_eq!(ColumnIdentifier::new("lower").name(), "lower");
    }
}
