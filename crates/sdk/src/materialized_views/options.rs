use crate::fragments::{InOptions, TagAssociation};
use ddl_builder::{ColumnIdentifier, SchemaObjectIdentifier, SqlOptions, Static};

/// `<column> [COMMENT '<comment>']` in the view's column list.
#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct ViewColumn {
    #[ddl(keyword)]
    pub name: ColumnIdentifier,
    #[ddl(parameter = "COMMENT", no_equals, single_quotes)]
    pub comment: Option<String>,
}

impl ViewColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: ColumnIdentifier::new(name),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
#[validate(valid_identifier(policy))]
pub struct MaterializedViewRowAccessPolicy {
    #[ddl(identifier = "WITH ROW ACCESS POLICY")]
    pub policy: SchemaObjectIdentifier,
    #[ddl(list = "ON", required)]
    pub on: Vec<ColumnIdentifier>,
}

impl MaterializedViewRowAccessPolicy {
    pub fn new<I, C>(policy: SchemaObjectIdentifier, on: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnIdentifier>,
    {
        Self {
            policy,
            on: on.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(or_replace, if_not_exists))]
pub(crate) struct CreateMaterializedViewOptions {
    #[ddl(static = "CREATE")]
    pub create: Static,
    #[ddl(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword = "SECURE")]
    pub secure: bool,
    #[ddl(static = "MATERIALIZED VIEW")]
    pub materialized_view: Static,
    #[ddl(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(keyword = "COPY GRANTS")]
    pub copy_grants: bool,
    #[ddl(list)]
    pub columns: Vec<ViewColumn>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[ddl(keyword)]
    pub row_access_policy: Option<MaterializedViewRowAccessPolicy>,
    #[ddl(list = "TAG")]
    pub tag: Vec<TagAssociation>,
    #[ddl(list = "CLUSTER BY")]
    pub cluster_by: Vec<String>,
    #[ddl(parameter = "AS", no_equals, required)]
    pub sql: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct MaterializedViewSet {
    #[ddl(keyword = "SECURE")]
    pub secure: Option<bool>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl MaterializedViewSet {
    pub fn is_empty(&self) -> bool {
        !self.secure.unwrap_or_default() && self.comment.is_none()
    }
}

/// Clears one property.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[validate(exactly_one_value_set(secure, comment))]
pub struct MaterializedViewUnset {
    #[ddl(keyword = "SECURE")]
    pub secure: Option<bool>,
    #[ddl(keyword = "COMMENT")]
    pub comment: Option<bool>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(valid_identifier_if_set(rename_to))]
#[validate(exactly_one_value_set(
    rename_to,
    cluster_by,
    drop_clustering_key,
    suspend_recluster,
    resume_recluster,
    suspend,
    resume,
    set,
    unset
))]
pub(crate) struct AlterMaterializedViewOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "MATERIALIZED VIEW")]
    pub materialized_view: Static,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier = "RENAME TO")]
    pub rename_to: Option<SchemaObjectIdentifier>,
    #[ddl(list = "CLUSTER BY")]
    pub cluster_by: Vec<String>,
    #[ddl(keyword = "DROP CLUSTERING KEY")]
    pub drop_clustering_key: bool,
    #[ddl(keyword = "SUSPEND RECLUSTER")]
    pub suspend_recluster: bool,
    #[ddl(keyword = "RESUME RECLUSTER")]
    pub resume_recluster: bool,
    #[ddl(keyword = "SUSPEND")]
    pub suspend: bool,
    #[ddl(keyword = "RESUME")]
    pub resume: bool,
    #[ddl(keyword = "SET")]
    pub set: Option<MaterializedViewSet>,
    #[ddl(keyword = "UNSET")]
    pub unset: Option<MaterializedViewUnset>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DropMaterializedViewOptions {
    #[ddl(static = "DROP")]
    pub drop: Static,
    #[ddl(static = "MATERIALIZED VIEW")]
    pub materialized_view: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DescribeMaterializedViewOptions {
    #[ddl(static = "DESCRIBE")]
    pub describe: Static,
    #[ddl(static = "MATERIALIZED VIEW")]
    pub materialized_view: Static,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
pub(crate) struct ShowMaterializedViewOptions {
    #[ddl(static = "SHOW")]
    pub show: Static,
    #[ddl(static = "MATERIALIZED VIEWS")]
    pub materialized_views: Static,
    #[ddl(parameter = "LIKE", no_equals, single_quotes)]
    pub like: Option<String>,
    #[ddl(keyword)]
    pub in_: Option<InOptions>,
}
