use crate::error::BuildError;

/// One entry of a field's `#[ddl(...)]` tag.
///
/// Exactly one *primary* directive decides how a field is rendered; the rest
/// are modifiers on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Literal SQL text, regardless of the field value.
    Static(&'static str),
    /// Literal (or the value itself when no literal is given) when set.
    Keyword(Option<&'static str>),
    /// `NAME = value`.
    Parameter(Option<&'static str>),
    /// Optional prefix then a quoted identifier.
    Identifier(Option<&'static str>),
    /// Optional prefix then a parenthesized list.
    List(Option<&'static str>),
    SingleQuotes,
    Parentheses,
    NoParentheses,
    NoComma,
    NoEquals,
    Required,
}

impl Directive {
    fn is_primary(&self) -> bool {
        matches!(
            self,
            Directive::Static(_)
                | Directive::Keyword(_)
                | Directive::Parameter(_)
                | Directive::Identifier(_)
                | Directive::List(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primary {
    Static(&'static str),
    Keyword(Option<&'static str>),
    Parameter(Option<&'static str>),
    Identifier(Option<&'static str>),
    List(Option<&'static str>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub single_quotes: bool,
    pub parentheses: bool,
    pub no_parentheses: bool,
    pub no_comma: bool,
    pub no_equals: bool,
    pub required: bool,
}

/// The resolved rendering instructions for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub primary: Primary,
    pub modifiers: Modifiers,
}

impl FieldSpec {
    pub fn resolve(
        struct_name: &'static str,
        field: &'static str,
        directives: &[Directive],
    ) -> Result<Self, BuildError> {
        let primaries: Vec<&Directive> = directives.iter().filter(|d| d.is_primary()).collect();
        let primary = match primaries.as_slice() {
            [only] => match only {
                Directive::Static(text) => Primary::Static(*text),
                Directive::Keyword(text) => Primary::Keyword(*text),
                Directive::Parameter(name) => Primary::Parameter(*name),
                Directive::Identifier(prefix) => Primary::Identifier(*prefix),
                Directive::List(prefix) => Primary::List(*prefix),
                _ => unreachable!("filtered to primary directives"),
            },
            [] => {
                return Err(BuildError::conflicting_directives(
                    struct_name,
                    field,
                    "field has no primary directive",
                ))
            }
            many => {
                return Err(BuildError::conflicting_directives(
                    struct_name,
                    field,
                    format!("field has {} primary directives", many.len()),
                ))
            }
        };

        let mut modifiers = Modifiers::default();
        for directive in directives {
            match directive {
                Directive::SingleQuotes => modifiers.single_quotes = true,
                Directive::Parentheses => modifiers.parentheses = true,
                Directive::NoParentheses => modifiers.no_parentheses = true,
                Directive::NoComma => modifiers.no_comma = true,
                Directive::NoEquals => modifiers.no_equals = true,
                Directive::Required => modifiers.required = true,
                _ => {}
            }
        }

        if modifiers.parentheses && modifiers.no_parentheses {
            return Err(BuildError::conflicting_directives(
                struct_name,
                field,
                "`parentheses` and `no_parentheses` are mutually exclusive",
            ));
        }

        Ok(Self { primary, modifiers })
    }
}

/// Struct-level validation rule, declared with `#[validate(...)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ValidIdentifier(&'static str),
    ValidIdentifierIfSet(&'static str),
    ConflictingFields(&'static [&'static str]),
    ExactlyOneValueSet(&'static [&'static str]),
    /// At least one field is present. Unlike the other rules an empty string
    /// counts, so `COMMENT = ''` can be set on its own.
    AtLeastOneValueSet(&'static [&'static str]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_primary_and_modifiers() {
        let spec = FieldSpec::resolve(
            "Opts",
            "comment",
            &[Directive::Parameter(Some("COMMENT")), Directive::SingleQuotes],
        )
        .unwrap();
        assert_eq!(spec.primary, Primary::Parameter(Some("COMMENT")));
        assert!(spec.modifiers.single_quotes);
        assert!(!spec.modifiers.parentheses);
    }

    #[test]
    fn rejects_two_primaries() {
        let err = FieldSpec::resolve(
            "Opts",
            "x",
            &[Directive::Keyword(None), Directive::Parameter(Some("X"))],
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::ConflictingDirectives { field: "x", .. }));
    }

    #[test]
    fn rejects_missing_primary() {
        let err = FieldSpec::resolve("Opts", "x", &[Directive::SingleQuotes]).unwrap_err();
        assert!(matches!(err, BuildError::ConflictingDirectives { .. }));
    }

    #[test]
    fn rejects_parentheses_with_no_parentheses() {
        let err = FieldSpec::resolve(
            "Opts",
            "x",
            &[
                Directive::List(None),
                Directive::Parentheses,
                Directive::NoParentheses,
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }
}
