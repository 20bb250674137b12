use crate::directive::Rule;
use crate::error::BuildError;
use crate::identifier::check_well_formed;
use crate::options::{Field, SqlOptions};
use crate::value::SqlValue;

/// Runs every declared rule of `options`, then recurses into nested option
/// structs. Identifier rules are checked before structural ones.
pub fn validate(options: &dyn SqlOptions) -> Result<(), BuildError> {
    let struct_name = options.struct_name();
    let fields = options.fields();
    let rules = options.rules();

    let (identifier_rules, structural_rules): (Vec<&Rule>, Vec<&Rule>) = rules
        .iter()
        .partition(|r| matches!(r, Rule::ValidIdentifier(_) | Rule::ValidIdentifierIfSet(_)));

    for rule in identifier_rules.into_iter().chain(structural_rules) {
        check_rule(struct_name, &fields, rule)?;
    }

    for field in &fields {
        validate_nested(&field.value)?;
    }
    Ok(())
}

fn validate_nested(value: &SqlValue<'_>) -> Result<(), BuildError> {
    match value {
        SqlValue::Nested(child) => validate(*child),
        SqlValue::List(items) => items.iter().try_for_each(validate_nested),
        _ => Ok(()),
    }
}

fn lookup<'f, 'a>(
    struct_name: &'static str,
    fields: &'f [Field<'a>],
    name: &'static str,
) -> Result<&'f Field<'a>, BuildError> {
    fields.iter().find(|f| f.name == name).ok_or_else(|| {
        BuildError::validation(
            struct_name,
            vec![name],
            format!("rule refers to unknown field `{name}`"),
        )
    })
}

fn check_rule(
    struct_name: &'static str,
    fields: &[Field<'_>],
    rule: &Rule,
) -> Result<(), BuildError> {
    match rule {
        Rule::ValidIdentifier(name) | Rule::ValidIdentifierIfSet(name) => {
            let field = lookup(struct_name, fields, *name)?;
            match &field.value {
                SqlValue::Absent if matches!(rule, Rule::ValidIdentifierIfSet(_)) => Ok(()),
                SqlValue::Identifier(id) => check_well_formed(*id).map_err(|reason| {
                    BuildError::validation(
                        struct_name,
                        vec![*name],
                        format!("invalid object identifier in `{name}`: {reason}"),
                    )
                }),
                _ => Err(BuildError::validation(
                    struct_name,
                    vec![*name],
                    format!("invalid object identifier in `{name}`"),
                )),
            }
        }
        Rule::ConflictingFields(names) => {
            let set = set_fields(struct_name, fields, names)?;
            if set.len() > 1 {
                return Err(BuildError::validation(
                    struct_name,
                    set.clone(),
                    format!("fields {set:?} are mutually exclusive"),
                ));
            }
            Ok(())
        }
        Rule::AtLeastOneValueSet(names) => {
            for name in names.iter() {
                if lookup(struct_name, fields, *name)?.value.is_present() {
                    return Ok(());
                }
            }
            Err(BuildError::validation(
                struct_name,
                names.to_vec(),
                format!("at least one of {names:?} must be set"),
            ))
        }
        Rule::ExactlyOneValueSet(names) => {
            let set = set_fields(struct_name, fields, names)?;
            if set.len() != 1 {
                return Err(BuildError::validation(
                    struct_name,
                    names.to_vec(),
                    format!(
                        "exactly one of {names:?} must be set, found {}",
                        set.len()
                    ),
                ));
            }
            Ok(())
        }
    }
}

fn set_fields(
    struct_name: &'static str,
    fields: &[Field<'_>],
    names: &'static [&'static str],
) -> Result<Vec<&'static str>, BuildError> {
    let mut set = Vec::new();
    for name in names {
        if lookup(struct_name, fields, *name)?.value.is_set() {
            set.push(*name);
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Directive;
    use crate::identifier::AccountObjectIdentifier;
    use crate::value::ToSqlValue;

    struct Switches {
        name: Option<AccountObjectIdentifier>,
        a: bool,
        b: Option<bool>,
        c: Vec<String>,
        rules: &'static [Rule],
    }

    impl SqlOptions for Switches {
        fn struct_name(&self) -> &'static str {
            "Switches"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field {
                    name: "name",
                    directives: &[Directive::Identifier(None)],
                    value: self.name.to_sql_value(),
                },
                Field {
                    name: "a",
                    directives: &[Directive::Keyword(Some("A"))],
                    value: self.a.to_sql_value(),
                },
                Field {
                    name: "b",
                    directives: &[Directive::Parameter(Some("B"))],
                    value: self.b.to_sql_value(),
                },
                Field {
                    name: "c",
                    directives: &[Directive::List(Some("C"))],
                    value: self.c.to_sql_value(),
                },
            ]
        }

        fn rules(&self) -> &'static [Rule] {
            self.rules
        }
    }

    fn switches(rules: &'static [Rule]) -> Switches {
        Switches {
            name: AccountObjectIdentifier::new("X").ok(),
            a: false,
            b: None,
            c: vec![],
            rules,
        }
    }

    #[test]
    fn conflicting_fields_names_the_set_ones() {
        const RULES: &[Rule] = &[Rule::ConflictingFields(&["a", "b", "c"])];
        let mut opts = switches(RULES);
        assert!(validate(&opts).is_ok());

        opts.a = true;
        opts.b = Some(false);
        assert!(validate(&opts).is_ok(), "Some(false) counts as unset");

        opts.c = vec!["x".into()];
        let err = validate(&opts).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.fields(), vec!["a", "c"]);
    }

    #[test]
    fn exactly_one_value_set() {
        const RULES: &[Rule] = &[Rule::ExactlyOneValueSet(&["a", "b"])];
        let mut opts = switches(RULES);
        let err = validate(&opts).unwrap_err();
        assert!(err.to_string().contains("found 0"));

        opts.b = Some(true);
        assert!(validate(&opts).is_ok());

        opts.a = true;
        assert!(validate(&opts).unwrap_err().to_string().contains("found 2"));
    }

    #[test]
    fn at_least_one_value_set() {
        const RULES: &[Rule] = &[Rule::AtLeastOneValueSet(&["a", "b", "c"])];
        let mut opts = switches(RULES);
        let err = validate(&opts).unwrap_err();
        assert_eq!(err.fields(), vec!["a", "b", "c"]);
        assert!(err.to_string().contains("at least one of"));

        opts.b = Some(true);
        opts.c = vec!["x".into()];
        assert!(validate(&opts).is_ok(), "several fields may be set together");
    }

    #[test]
    fn identifier_rules_run_first() {
        const RULES: &[Rule] = &[
            Rule::ConflictingFields(&["a", "b"]),
            Rule::ValidIdentifier("name"),
        ];
        let mut opts = switches(RULES);
        opts.name = None;
        opts.a = true;
        opts.b = Some(true);
        let err = validate(&opts).unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
        assert!(err.to_string().contains("invalid object identifier"));
    }

    #[test]
    fn identifier_if_set_allows_absent() {
        const RULES: &[Rule] = &[Rule::ValidIdentifierIfSet("name")];
        let mut opts = switches(RULES);
        opts.name = None;
        assert!(validate(&opts).is_ok());

        opts.name = AccountObjectIdentifier::new("bad\u{7}").ok();
        assert!(validate(&opts).is_err());
    }

    #[test]
    fn unknown_rule_field_is_reported() {
        const RULES: &[Rule] = &[Rule::ValidIdentifier("missing")];
        let err = validate(&switches(RULES)).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
