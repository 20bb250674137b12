use crate::directive::{Directive, Rule};
use crate::value::SqlValue;

/// One tagged field of an option struct, in declaration order.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub name: &'static str,
    pub directives: &'static [Directive],
    pub value: SqlValue<'a>,
}

/// A tagged option struct. Normally implemented with `#[derive(SqlOptions)]`.
pub trait SqlOptions: Send + Sync {
    fn struct_name(&self) -> &'static str;

    /// Fields in declaration order, which is also emission order.
    fn fields(&self) -> Vec<Field<'_>>;

    fn rules(&self) -> &'static [Rule] {
        &[]
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields().into_iter().find(|f| f.name == name)
    }
}
