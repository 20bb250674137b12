use super::options::*;
use crate::fragments::{In, Like, TagAssociation};
use ddl_builder::{SchemaObjectIdentifier, Static};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMaterializedViewRequest {
    pub name: SchemaObjectIdentifier,
    pub sql: String,
    pub or_replace: Option<bool>,
    pub secure: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub copy_grants: Option<bool>,
    pub columns: Vec<ViewColumn>,
    pub comment: Option<String>,
    pub row_access_policy: Option<MaterializedViewRowAccessPolicy>,
    pub tags: Vec<TagAssociation>,
    pub cluster_by: Vec<String>,
}

impl CreateMaterializedViewRequest {
    pub fn new(name: SchemaObjectIdentifier, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            or_replace: None,
            secure: None,
            if_not_exists: None,
            copy_grants: None,
            columns: Vec::new(),
            comment: None,
            row_access_policy: None,
            tags: Vec::new(),
            cluster_by: Vec::new(),
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = Some(copy_grants);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ViewColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_row_access_policy(mut self, policy: MaterializedViewRowAccessPolicy) -> Self {
        self.row_access_policy = Some(policy);
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_cluster_by(mut self, expressions: Vec<String>) -> Self {
        self.cluster_by = expressions;
        self
    }

    pub(crate) fn to_opts(&self) -> CreateMaterializedViewOptions {
        CreateMaterializedViewOptions {
            create: Static,
            or_replace: self.or_replace.unwrap_or_default(),
            secure: self.secure.unwrap_or_default(),
            materialized_view: Static,
            if_not_exists: self.if_not_exists.unwrap_or_default(),
            name: self.name.clone(),
            copy_grants: self.copy_grants.unwrap_or_default(),
            columns: self.columns.clone(),
            comment: self.comment.clone(),
            row_access_policy: self.row_access_policy.clone(),
            tag: self.tags.clone(),
            cluster_by: self.cluster_by.clone(),
            sql: self.sql.clone(),
        }
    }
}

/// Exactly one action per statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterMaterializedViewRequest {
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub cluster_by: Vec<String>,
    pub drop_clustering_key: Option<bool>,
    pub suspend_recluster: Option<bool>,
    pub resume_recluster: Option<bool>,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
    pub set: Option<MaterializedViewSet>,
    pub unset: Option<MaterializedViewUnset>,
}

impl AlterMaterializedViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            rename_to: None,
            cluster_by: Vec::new(),
            drop_clustering_key: None,
            suspend_recluster: None,
            resume_recluster: None,
            suspend: None,
            resume: None,
            set: None,
            unset: None,
        }
    }

    pub fn with_rename_to(mut self, new_name: SchemaObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn with_cluster_by(mut self, expressions: Vec<String>) -> Self {
        self.cluster_by = expressions;
        self
    }

    pub fn with_drop_clustering_key(mut self, drop: bool) -> Self {
        self.drop_clustering_key = Some(drop);
        self
    }

    pub fn with_suspend_recluster(mut self, suspend: bool) -> Self {
        self.suspend_recluster = Some(suspend);
        self
    }

    pub fn with_resume_recluster(mut self, resume: bool) -> Self {
        self.resume_recluster = Some(resume);
        self
    }

    pub fn with_suspend(mut self, suspend: bool) -> Self {
        self.suspend = Some(suspend);
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = Some(resume);
        self
    }

    pub fn with_set(mut self, set: MaterializedViewSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: MaterializedViewUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    /// An empty `set` group is dropped so it counts as not given.
    pub(crate) fn to_opts(&self) -> AlterMaterializedViewOptions {
        AlterMaterializedViewOptions {
            alter: Static,
            materialized_view: Static,
            name: self.name.clone(),
            rename_to: self.rename_to.clone(),
            cluster_by: self.cluster_by.clone(),
            drop_clustering_key: self.drop_clustering_key.unwrap_or_default(),
            suspend_recluster: self.suspend_recluster.unwrap_or_default(),
            resume_recluster: self.resume_recluster.unwrap_or_default(),
            suspend: self.suspend.unwrap_or_default(),
            resume: self.resume.unwrap_or_default(),
            set: self.set.clone().filter(|set| !set.is_empty()),
            unset: self.unset.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropMaterializedViewRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
}

impl DropMaterializedViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub(crate) fn to_opts(&self) -> DropMaterializedViewOptions {
        DropMaterializedViewOptions {
            drop: Static,
            materialized_view: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowMaterializedViewRequest {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

impl ShowMaterializedViewRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_in(mut self, in_: In) -> Self {
        self.in_ = Some(in_);
        self
    }

    pub(crate) fn to_opts(&self) -> ShowMaterializedViewOptions {
        ShowMaterializedViewOptions {
            show: Static,
            materialized_views: Static,
            like: self.like.as_ref().map(|like| like.pattern.clone()),
            in_: self.in_.as_ref().map(In::to_opts),
        }
    }
}

pub(crate) fn describe_opts(name: &SchemaObjectIdentifier) -> DescribeMaterializedViewOptions {
    DescribeMaterializedViewOptions {
        describe: Static,
        materialized_view: Static,
        name: name.clone(),
    }
}
