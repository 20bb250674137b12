//! Declarative SQL DDL construction.
//!
//! Statements are described as plain structs whose fields carry `#[ddl(...)]`
//! tags; [`build`] validates the declared rules and renders the fields in
//! declaration order.
//!
//! ```ignore
//! #[derive(SqlOptions)]
//! #[validate(valid_identifier(name))]
//! struct DropStageOptions {
//!     #[ddl(static = "DROP")]
//!     drop: Static,
//!     #[ddl(static = "STAGE")]
//!     stage: Static,
//!     #[ddl(keyword = "IF EXISTS")]
//!     if_exists: bool,
//!     #[ddl(identifier)]
//!     name: SchemaObjectIdentifier,
//! }
//! ```

extern crate self as ddl_builder;

pub mod directive;
pub mod emit;
pub mod error;
pub mod identifier;
pub mod options;
pub mod validate;
pub mod value;

pub use ddl_builder_derive::{SqlEnum, SqlOptions};
pub use directive::{Directive, FieldSpec, Rule};
pub use emit::{emit, single_quote};
pub use error::BuildError;
pub use identifier::{
    AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier, IdentifierError,
    IdentifierScope, ObjectIdentifier, SchemaObjectIdentifier,
};
pub use options::{Field, SqlOptions};
pub use validate::validate;
pub use value::{ParseSqlEnumError, SqlValue, Static, ToSqlValue};

use tracing::debug;

/// Validates `options` and renders it to a single SQL statement.
///
/// Validation always runs first, so a struct that violates its rules never
/// reaches the emitter.
pub fn build(options: &dyn SqlOptions) -> Result<String, BuildError> {
    validate(options)?;
    let sql = emit(options)?;
    debug!(struct_name = options.struct_name(), %sql, "built statement");
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
    enum Encryption {
        SnowflakeFull,
        #[ddl(sql = "SNOWFLAKE_SSE")]
        Sse,
    }

    #[derive(SqlOptions)]
    struct EncryptionOptions {
        #[ddl(parameter = "TYPE", single_quotes)]
        kind: Option<Encryption>,
    }

    #[derive(SqlOptions)]
    #[validate(valid_identifier(name))]
    #[validate(conflicting_fields(or_replace, if_not_exists))]
    struct CreateThing {
        #[ddl(static = "CREATE")]
        create: Static,
        #[ddl(keyword = "OR REPLACE")]
        or_replace: bool,
        #[ddl(static = "THING")]
        thing: Static,
        #[ddl(keyword = "IF NOT EXISTS")]
        if_not_exists: bool,
        #[ddl(identifier)]
        name: SchemaObjectIdentifier,
        #[ddl(parameter = "ENCRYPTION", parentheses)]
        encryption: Option<EncryptionOptions>,
        #[ddl(parameter = "COMMENT", single_quotes)]
        comment: Option<String>,
        #[ddl(skip)]
        #[allow(dead_code)]
        note: String,
    }

    fn thing() -> CreateThing {
        CreateThing {
            create: Static,
            or_replace: false,
            thing: Static,
            if_not_exists: false,
            name: SchemaObjectIdentifier::new("DB", "SCH", "S").unwrap(),
            encryption: None,
            comment: None,
            note: "not rendered".into(),
        }
    }

    #[test]
    fn derived_struct_builds() {
        let mut opts = thing();
        opts.encryption = Some(EncryptionOptions {
            kind: Some(Encryption::SnowflakeFull),
        });
        opts.comment = Some("hello".into());
        assert_eq!(
            build(&opts).unwrap(),
            r#"CREATE THING "DB"."SCH"."S" ENCRYPTION = (TYPE = 'SNOWFLAKE_FULL') COMMENT = 'hello'"#
        );
    }

    #[test]
    fn empty_nested_group_is_suppressed() {
        let mut opts = thing();
        opts.encryption = Some(EncryptionOptions { kind: None });
        assert_eq!(build(&opts).unwrap(), r#"CREATE THING "DB"."SCH"."S""#);
    }

    #[test]
    fn building_is_deterministic() {
        let opts = thing();
        assert_eq!(build(&opts).unwrap(), build(&opts).unwrap());
    }

    #[test]
    fn conflicting_flags_fail_validation() {
        let mut opts = thing();
        opts.or_replace = true;
        opts.if_not_exists = true;
        let err = build(&opts).unwrap_err();
        assert_eq!(err.struct_name(), "CreateThing");
        assert_eq!(err.fields(), vec!["or_replace", "if_not_exists"]);
    }

    #[test]
    fn derived_enum_round_trips_through_text() {
        assert_eq!(Encryption::Sse.as_sql(), "SNOWFLAKE_SSE");
        assert_eq!(Encryption::SnowflakeFull.to_string(), "SNOWFLAKE_FULL");
        assert_eq!(
            "snowflake_full".parse::<Encryption>().unwrap(),
            Encryption::SnowflakeFull
        );
        assert_eq!(Encryption::ALL.len(), 2);
        let err = "nope".parse::<Encryption>().unwrap_err();
        assert_eq!(err.type_name, "Encryption");
    }
}
