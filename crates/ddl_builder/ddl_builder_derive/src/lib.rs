use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Token};

enum DirectiveTag {
    Static(LitStr),
    Keyword(Option<LitStr>),
    Parameter(Option<LitStr>),
    Identifier(Option<LitStr>),
    List(Option<LitStr>),
    SingleQuotes,
    Parentheses,
    NoParentheses,
    NoComma,
    NoEquals,
    Required,
}

impl DirectiveTag {
    fn to_tokens(&self) -> TokenStream2 {
        fn opt(lit: &Option<LitStr>) -> TokenStream2 {
            match lit {
                Some(lit) => quote!(::core::option::Option::Some(#lit)),
                None => quote!(::core::option::Option::None),
            }
        }
        match self {
            DirectiveTag::Static(lit) => quote!(::ddl_builder::Directive::Static(#lit)),
            DirectiveTag::Keyword(lit) => {
                let lit = opt(lit);
                quote!(::ddl_builder::Directive::Keyword(#lit))
            }
            DirectiveTag::Parameter(lit) => {
                let lit = opt(lit);
                quote!(::ddl_builder::Directive::Parameter(#lit))
            }
            DirectiveTag::Identifier(lit) => {
                let lit = opt(lit);
                quote!(::ddl_builder::Directive::Identifier(#lit))
            }
            DirectiveTag::List(lit) => {
                let lit = opt(lit);
                quote!(::ddl_builder::Directive::List(#lit))
            }
            DirectiveTag::SingleQuotes => quote!(::ddl_builder::Directive::SingleQuotes),
            DirectiveTag::Parentheses => quote!(::ddl_builder::Directive::Parentheses),
            DirectiveTag::NoParentheses => quote!(::ddl_builder::Directive::NoParentheses),
            DirectiveTag::NoComma => quote!(::ddl_builder::Directive::NoComma),
            DirectiveTag::NoEquals => quote!(::ddl_builder::Directive::NoEquals),
            DirectiveTag::Required => quote!(::ddl_builder::Directive::Required),
        }
    }
}

struct FieldMeta {
    ident: Ident,
    directives: Vec<DirectiveTag>,
}

enum RuleTag {
    ValidIdentifier(Ident),
    ValidIdentifierIfSet(Ident),
    ConflictingFields(Vec<Ident>),
    ExactlyOneValueSet(Vec<Ident>),
    AtLeastOneValueSet(Vec<Ident>),
}

impl RuleTag {
    fn fields(&self) -> Vec<&Ident> {
        match self {
            RuleTag::ValidIdentifier(f) | RuleTag::ValidIdentifierIfSet(f) => vec![f],
            RuleTag::ConflictingFields(fs)
            | RuleTag::ExactlyOneValueSet(fs)
            | RuleTag::AtLeastOneValueSet(fs) => fs.iter().collect(),
        }
    }

    fn to_tokens(&self) -> TokenStream2 {
        let name_lits = |fields: &[Ident]| {
            let lits = fields
                .iter()
                .map(|f| LitStr::new(&f.to_string(), f.span()));
            quote!(&[ #( #lits ),* ])
        };
        match self {
            RuleTag::ValidIdentifier(f) => {
                let lit = LitStr::new(&f.to_string(), f.span());
                quote!(::ddl_builder::Rule::ValidIdentifier(#lit))
            }
            RuleTag::ValidIdentifierIfSet(f) => {
                let lit = LitStr::new(&f.to_string(), f.span());
                quote!(::ddl_builder::Rule::ValidIdentifierIfSet(#lit))
            }
            RuleTag::ConflictingFields(fs) => {
                let names = name_lits(fs);
                quote!(::ddl_builder::Rule::ConflictingFields(#names))
            }
            RuleTag::ExactlyOneValueSet(fs) => {
                let names = name_lits(fs);
                quote!(::ddl_builder::Rule::ExactlyOneValueSet(#names))
            }
            RuleTag::AtLeastOneValueSet(fs) => {
                let names = name_lits(fs);
                quote!(::ddl_builder::Rule::AtLeastOneValueSet(#names))
            }
        }
    }
}

/// Derives `ddl_builder::SqlOptions` from `#[ddl(...)]` field tags and
/// `#[validate(...)]` struct rules.
#[proc_macro_derive(SqlOptions, attributes(ddl, validate))]
pub fn derive_sql_options(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident;
    let generics = input.generics;

    let Data::Struct(ds) = input.data else {
        return syn::Error::new_spanned(&ident, "SqlOptions only supports structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(named) = ds.fields else {
        return syn::Error::new_spanned(&ident, "SqlOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut field_meta: Vec<FieldMeta> = Vec::new();
    for field in named.named {
        let span = field.span();
        let Some(field_ident) = field.ident else {
            return syn::Error::new(span, "SqlOptions requires named fields")
                .to_compile_error()
                .into();
        };
        match parse_field_tags(&field.attrs) {
            Ok(Some(directives)) => field_meta.push(FieldMeta {
                ident: field_ident,
                directives,
            }),
            Ok(None) => continue,
            Err(err) => return err.to_compile_error().into(),
        }
    }

    let rules = match parse_rules(&input.attrs) {
        Ok(rules) => rules,
        Err(err) => return err.to_compile_error().into(),
    };
    for rule in &rules {
        for referenced in rule.fields() {
            if !field_meta.iter().any(|meta| meta.ident == *referenced) {
                return syn::Error::new(
                    referenced.span(),
                    format!("validate rule refers to unknown or skipped field `{referenced}`"),
                )
                .to_compile_error()
                .into();
            }
        }
    }

    let struct_name = LitStr::new(&ident.to_string(), Span::call_site());
    let field_entries = field_meta.iter().map(|meta| {
        let field_ident = &meta.ident;
        let name = LitStr::new(&field_ident.to_string(), field_ident.span());
        let directives = meta.directives.iter().map(DirectiveTag::to_tokens);
        quote! {
            ::ddl_builder::Field {
                name: #name,
                directives: &[ #( #directives ),* ],
                value: ::ddl_builder::ToSqlValue::to_sql_value(&self.#field_ident),
            }
        }
    });
    let rule_entries = rules.iter().map(RuleTag::to_tokens);

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::ddl_builder::SqlOptions for #ident #ty_generics #where_clause {
            fn struct_name(&self) -> &'static str {
                #struct_name
            }

            fn fields(&self) -> ::std::vec::Vec<::ddl_builder::Field<'_>> {
                ::std::vec![ #( #field_entries ),* ]
            }

            fn rules(&self) -> &'static [::ddl_builder::Rule] {
                &[ #( #rule_entries ),* ]
            }
        }

        impl #impl_generics ::ddl_builder::ToSqlValue for #ident #ty_generics #where_clause {
            fn to_sql_value(&self) -> ::ddl_builder::SqlValue<'_> {
                ::ddl_builder::SqlValue::Nested(self)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derives SQL keyword rendering and case-insensitive parsing for unit enums.
#[proc_macro_derive(SqlEnum, attributes(ddl))]
pub fn derive_sql_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident;

    let Data::Enum(de) = input.data else {
        return syn::Error::new_spanned(&ident, "SqlEnum only supports enums")
            .to_compile_error()
            .into();
    };

    let mut variants: Vec<(Ident, LitStr)> = Vec::new();
    for variant in de.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(&variant, "SqlEnum variants must be unit variants")
                .to_compile_error()
                .into();
        }
        let sql = match parse_variant_sql(&variant.attrs) {
            Ok(Some(lit)) => lit,
            Ok(None) => LitStr::new(
                &screaming_snake_case(&variant.ident.to_string()),
                variant.ident.span(),
            ),
            Err(err) => return err.to_compile_error().into(),
        };
        variants.push((variant.ident, sql));
    }

    let type_name = LitStr::new(&ident.to_string(), Span::call_site());
    let as_sql_arms = variants
        .iter()
        .map(|(variant, sql)| quote!(Self::#variant => #sql));
    let parse_arms = variants.iter().map(|(variant, sql)| {
        quote! {
            if __input.eq_ignore_ascii_case(#sql) {
                return ::core::result::Result::Ok(Self::#variant);
            }
        }
    });
    let all_variants = variants.iter().map(|(variant, _)| quote!(Self::#variant));
    let expected = variants.iter().map(|(_, sql)| sql);

    let expanded = quote! {
        impl #ident {
            pub const ALL: &'static [Self] = &[ #( #all_variants ),* ];

            pub fn as_sql(&self) -> &'static str {
                match self {
                    #( #as_sql_arms ),*
                }
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_sql())
            }
        }

        impl ::core::str::FromStr for #ident {
            type Err = ::ddl_builder::ParseSqlEnumError;

            fn from_str(__raw: &str) -> ::core::result::Result<Self, Self::Err> {
                let __input = __raw.trim();
                #( #parse_arms )*
                ::core::result::Result::Err(::ddl_builder::ParseSqlEnumError {
                    type_name: #type_name,
                    input: __raw.to_string(),
                    expected: &[ #( #expected ),* ],
                })
            }
        }

        impl ::ddl_builder::ToSqlValue for #ident {
            fn to_sql_value(&self) -> ::ddl_builder::SqlValue<'_> {
                ::ddl_builder::SqlValue::Text(::std::borrow::Cow::Borrowed(self.as_sql()))
            }
        }
    };

    TokenStream::from(expanded)
}

fn optional_lit(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        Ok(Some(meta.value()?.parse()?))
    } else {
        Ok(None)
    }
}

/// `Ok(None)` means the field is skipped.
fn parse_field_tags(attrs: &[Attribute]) -> syn::Result<Option<Vec<DirectiveTag>>> {
    let mut directives = Vec::new();
    let mut skip = false;
    let mut seen_attr = None;

    for attr in attrs {
        if !attr.path().is_ident("ddl") {
            continue;
        }
        seen_attr = Some(attr.span());

        attr.parse_nested_meta(|meta| {
            let tag = if meta.path.is_ident("static") {
                DirectiveTag::Static(meta.value()?.parse()?)
            } else if meta.path.is_ident("keyword") {
                DirectiveTag::Keyword(optional_lit(&meta)?)
            } else if meta.path.is_ident("parameter") {
                DirectiveTag::Parameter(optional_lit(&meta)?)
            } else if meta.path.is_ident("identifier") {
                DirectiveTag::Identifier(optional_lit(&meta)?)
            } else if meta.path.is_ident("list") {
                DirectiveTag::List(optional_lit(&meta)?)
            } else if meta.path.is_ident("single_quotes") {
                DirectiveTag::SingleQuotes
            } else if meta.path.is_ident("parentheses") {
                DirectiveTag::Parentheses
            } else if meta.path.is_ident("no_parentheses") {
                DirectiveTag::NoParentheses
            } else if meta.path.is_ident("no_comma") {
                DirectiveTag::NoComma
            } else if meta.path.is_ident("no_equals") {
                DirectiveTag::NoEquals
            } else if meta.path.is_ident("required") {
                DirectiveTag::Required
            } else if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            } else {
                return Err(meta.error(
                    "unknown ddl key; expected `static`, `keyword`, `parameter`, `identifier`, \
                     `list`, `single_quotes`, `parentheses`, `no_parentheses`, `no_comma`, \
                     `no_equals`, `required` or `skip`",
                ));
            };
            directives.push(tag);
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }
    match seen_attr {
        Some(_) => Ok(Some(directives)),
        None => Err(syn::Error::new(
            attrs
                .first()
                .map(Spanned::span)
                .unwrap_or_else(Span::call_site),
            "every SqlOptions field needs a #[ddl(...)] tag or #[ddl(skip)]",
        )),
    }
}

fn parse_field_list(meta: &ParseNestedMeta) -> syn::Result<Vec<Ident>> {
    let mut fields = Vec::new();
    meta.parse_nested_meta(|inner| {
        let ident = inner
            .path
            .get_ident()
            .cloned()
            .ok_or_else(|| inner.error("expected a field name"))?;
        fields.push(ident);
        Ok(())
    })?;
    Ok(fields)
}

fn parse_rules(attrs: &[Attribute]) -> syn::Result<Vec<RuleTag>> {
    let mut rules = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let single = |meta: &ParseNestedMeta| -> syn::Result<Ident> {
                let mut fields = parse_field_list(meta)?;
                if fields.len() != 1 {
                    return Err(meta.error("expected exactly one field name"));
                }
                Ok(fields.remove(0))
            };

            if meta.path.is_ident("valid_identifier") {
                rules.push(RuleTag::ValidIdentifier(single(&meta)?));
            } else if meta.path.is_ident("valid_identifier_if_set") {
                rules.push(RuleTag::ValidIdentifierIfSet(single(&meta)?));
            } else if meta.path.is_ident("conflicting_fields") {
                let fields = parse_field_list(&meta)?;
                if fields.len() < 2 {
                    return Err(meta.error("conflicting_fields needs at least two fields"));
                }
                rules.push(RuleTag::ConflictingFields(fields));
            } else if meta.path.is_ident("exactly_one_value_set") {
                let fields = parse_field_list(&meta)?;
                if fields.len() < 2 {
                    return Err(meta.error("exactly_one_value_set needs at least two fields"));
                }
                rules.push(RuleTag::ExactlyOneValueSet(fields));
            } else if meta.path.is_ident("at_least_one_value_set") {
                let fields = parse_field_list(&meta)?;
                if fields.len() < 2 {
                    return Err(meta.error("at_least_one_value_set needs at least two fields"));
                }
                rules.push(RuleTag::AtLeastOneValueSet(fields));
            } else {
                return Err(meta.error(
                    "unknown validate rule; expected `valid_identifier`, \
                     `valid_identifier_if_set`, `conflicting_fields`, `exactly_one_value_set` \
                     or `at_least_one_value_set`",
                ));
            }
            Ok(())
        })?;
    }
    Ok(rules)
}

fn parse_variant_sql(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut sql = None;
    for attr in attrs {
        if !attr.path().is_ident("ddl") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("sql") {
                sql = Some(meta.value()?.parse()?);
                return Ok(());
            }
            Err(meta.error("unknown ddl key on enum variant; expected `sql`"))
        })?;
    }
    Ok(sql)
}

fn screaming_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if let Some(p) = prev {
            if c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::screaming_snake_case;

    #[test]
    fn converts_variant_names() {
        assert_eq!(screaming_snake_case("SnowflakeFull"), "SNOWFLAKE_FULL");
        assert_eq!(screaming_snake_case("AwsSseS3"), "AWS_SSE_S3");
        assert_eq!(screaming_snake_case("Csv"), "CSV");
        assert_eq!(screaming_snake_case("Gzip"), "GZIP");
    }
}
