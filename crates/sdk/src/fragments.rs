//! SQL fragments shared by every resource: `LIKE`, `IN <scope>` and tags.

use ddl_builder::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier, SqlOptions, Static,
};

/// `LIKE '<pattern>'` filter for `SHOW` requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// Scope filter for `SHOW` requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum In {
    Account,
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
}

impl In {
    pub(crate) fn to_opts(&self) -> InOptions {
        let mut opts = InOptions {
            in_: Static,
            account: false,
            database: None,
            schema: None,
        };
        match self {
            In::Account => opts.account = true,
            In::Database(id) => opts.database = Some(id.clone()),
            In::Schema(id) => opts.schema = Some(id.clone()),
        }
        opts
    }
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(exactly_one_value_set(account, database, schema))]
#[validate(valid_identifier_if_set(database))]
#[validate(valid_identifier_if_set(schema))]
pub(crate) struct InOptions {
    #[ddl(static = "IN")]
    pub in_: Static,
    #[ddl(keyword = "ACCOUNT")]
    pub account: bool,
    #[ddl(identifier = "DATABASE")]
    pub database: Option<AccountObjectIdentifier>,
    #[ddl(identifier = "SCHEMA")]
    pub schema: Option<DatabaseObjectIdentifier>,
}

/// `<tag> = '<value>'`, used in `TAG (...)` and `SET TAG ...`.
#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
#[validate(valid_identifier(name))]
pub struct TagAssociation {
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter, single_quotes)]
    pub value: String,
}

impl TagAssociation {
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn in_scopes_render() {
        let db = AccountObjectIdentifier::new("DB").unwrap();
        let schema = DatabaseObjectIdentifier::new("DB", "SCH").unwrap();
        assert_eq!(ddl_builder::build(&In::Account.to_opts()).unwrap(), "IN ACCOUNT");
        assert_eq!(
            ddl_builder::build(&In::Database(db).to_opts()).unwrap(),
            r#"IN DATABASE "DB""#
        );
        assert_eq!(
            ddl_builder::build(&In::Schema(schema).to_opts()).unwrap(),
            r#"IN SCHEMA "DB"."SCH""#
        );
    }

    #[test]
    fn tag_association_renders_assignment() {
        let tag = TagAssociation::new(
            SchemaObjectIdentifier::new("DB", "SCH", "COST_CENTER").unwrap(),
            "it's finance",
        );
        assert_eq!(
            ddl_builder::build(&tag).unwrap(),
            r#""DB"."SCH"."COST_CENTER" = 'it''s finance'"#
        );
    }
}
