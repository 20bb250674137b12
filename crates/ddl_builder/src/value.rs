use crate::identifier::{
    AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier, ObjectIdentifier,
    SchemaObjectIdentifier,
};
use crate::options::SqlOptions;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Marker field type for `#[ddl(static = "...")]` fields: carries no data,
/// the tag supplies the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Static;

/// A field value as seen by the emitter and validator.
#[derive(Clone)]
pub enum SqlValue<'a> {
    Absent,
    Bool(bool),
    Text(Cow<'a, str>),
    Identifier(&'a dyn ObjectIdentifier),
    List(Vec<SqlValue<'a>>),
    Nested(&'a dyn SqlOptions),
}

impl SqlValue<'_> {
    /// Whether the value counts as set for validation rules: absent values,
    /// `false`, empty text and empty lists do not.
    pub fn is_set(&self) -> bool {
        match self {
            SqlValue::Absent => false,
            SqlValue::Bool(b) => *b,
            SqlValue::Text(t) => !t.is_empty(),
            SqlValue::List(items) => !items.is_empty(),
            SqlValue::Identifier(_) | SqlValue::Nested(_) => true,
        }
    }

    /// Like [`SqlValue::is_set`], except that empty text is present.
    pub fn is_present(&self) -> bool {
        match self {
            SqlValue::Text(_) => true,
            other => other.is_set(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Absent => "absent",
            SqlValue::Bool(_) => "bool",
            SqlValue::Text(_) => "text",
            SqlValue::Identifier(_) => "identifier",
            SqlValue::List(_) => "list",
            SqlValue::Nested(_) => "nested options",
        }
    }
}

impl fmt::Debug for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Absent => f.write_str("Absent"),
            SqlValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            SqlValue::Text(t) => f.debug_tuple("Text").field(t).finish(),
            SqlValue::Identifier(id) => f
                .debug_tuple("Identifier")
                .field(&id.fully_qualified_name())
                .finish(),
            SqlValue::List(items) => f.debug_tuple("List").field(items).finish(),
            SqlValue::Nested(opts) => f.debug_tuple("Nested").field(&opts.struct_name()).finish(),
        }
    }
}

/// Conversion of a field into its [`SqlValue`].
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue<'_>;
}

impl ToSqlValue for Static {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Absent
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Bool(*self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl ToSqlValue for str {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(self))
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Borrowed(*self))
    }
}

macro_rules! impl_to_sql_value_for_number {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(&self) -> SqlValue<'_> {
                    SqlValue::Text(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

impl_to_sql_value_for_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f64);

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(&self) -> SqlValue<'_> {
        match self {
            Some(inner) => inner.to_sql_value(),
            None => SqlValue::Absent,
        }
    }
}

impl<T: ToSqlValue> ToSqlValue for Vec<T> {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::List(self.iter().map(ToSqlValue::to_sql_value).collect())
    }
}

impl<T: ToSqlValue + ?Sized> ToSqlValue for Box<T> {
    fn to_sql_value(&self) -> SqlValue<'_> {
        (**self).to_sql_value()
    }
}

macro_rules! impl_to_sql_value_for_identifier {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(&self) -> SqlValue<'_> {
                    SqlValue::Identifier(self)
                }
            }
        )*
    };
}

impl_to_sql_value_for_identifier!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier
);

impl ToSqlValue for ColumnIdentifier {
    fn to_sql_value(&self) -> SqlValue<'_> {
        SqlValue::Text(Cow::Owned(self.quoted()))
    }
}

/// Returned by the `FromStr` impl generated for `#[derive(SqlEnum)]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` is not a valid {type_name}; expected one of {expected:?}")]
pub struct ParseSqlEnumError {
    pub type_name: &'static str,
    pub input: String,
    pub expected: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_semantics() {
        assert!(!SqlValue::Absent.is_set());
        assert!(!false.to_sql_value().is_set());
        assert!(!Some(false).to_sql_value().is_set());
        assert!(true.to_sql_value().is_set());
        assert!(!Vec::<String>::new().to_sql_value().is_set());
        assert!(vec!["a".to_string()].to_sql_value().is_set());
        assert!(!String::new().to_sql_value().is_set());
        assert!(!None::<String>.to_sql_value().is_set());
        assert!(!Static.to_sql_value().is_set());
    }

    #[test]
    fn empty_text_is_present_but_not_set() {
        let empty = Some(String::new());
        assert!(empty.to_sql_value().is_present());
        assert!(!empty.to_sql_value().is_set());
        assert!(!None::<String>.to_sql_value().is_present());
        assert!(!Some(false).to_sql_value().is_present());
    }

    #[test]
    fn numbers_render_as_text() {
        match 42u32.to_sql_value() {
            SqlValue::Text(t) => assert_eq!(t, "42"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
