use super::options::*;
use crate::fragments::{Like, TagAssociation};
use ddl_builder::{AccountObjectIdentifier, SchemaObjectIdentifier, Static};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStorageIntegrationRequest {
    pub name: AccountObjectIdentifier,
    pub enabled: bool,
    pub storage_allowed_locations: Vec<String>,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub s3_params: Option<S3StorageParams>,
    pub gcs_params: Option<GcsStorageParams>,
    pub azure_params: Option<AzureStorageParams>,
    pub storage_blocked_locations: Vec<String>,
    pub comment: Option<String>,
}

impl CreateStorageIntegrationRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        enabled: bool,
        storage_allowed_locations: Vec<String>,
    ) -> Self {
        Self {
            name,
            enabled,
            storage_allowed_locations,
            or_replace: None,
            if_not_exists: None,
            s3_params: None,
            gcs_params: None,
            azure_params: None,
            storage_blocked_locations: Vec::new(),
            comment: None,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_s3_params(mut self, params: S3StorageParams) -> Self {
        self.s3_params = Some(params);
        self
    }

    pub fn with_gcs_params(mut self, params: GcsStorageParams) -> Self {
        self.gcs_params = Some(params);
        self
    }

    pub fn with_azure_params(mut self, params: AzureStorageParams) -> Self {
        self.azure_params = Some(params);
        self
    }

    pub fn with_storage_blocked_locations(mut self, locations: Vec<String>) -> Self {
        self.storage_blocked_locations = locations;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub(crate) fn to_opts(&self) -> CreateStorageIntegrationOptions {
        CreateStorageIntegrationOptions {
            create: Static,
            or_replace: self.or_replace.unwrap_or_default(),
            storage_integration: Static,
            if_not_exists: self.if_not_exists.unwrap_or_default(),
            name: self.name.clone(),
            external_stage_type: Static,
            s3: self.s3_params.clone(),
            gcs: self.gcs_params.clone(),
            azure: self.azure_params.clone(),
            enabled: self.enabled,
            storage_allowed_locations: self.storage_allowed_locations.clone(),
            storage_blocked_locations: self.storage_blocked_locations.clone(),
            comment: self.comment.clone(),
        }
    }
}

/// Properties to clear with `ALTER STORAGE INTEGRATION ... UNSET`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageIntegrationUnset {
    pub storage_aws_external_id: Option<bool>,
    pub storage_aws_object_acl: Option<bool>,
    pub enabled: Option<bool>,
    pub storage_blocked_locations: Option<bool>,
    pub comment: Option<bool>,
}

impl StorageIntegrationUnset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_aws_external_id(mut self, unset: bool) -> Self {
        self.storage_aws_external_id = Some(unset);
        self
    }

    pub fn with_storage_aws_object_acl(mut self, unset: bool) -> Self {
        self.storage_aws_object_acl = Some(unset);
        self
    }

    pub fn with_enabled(mut self, unset: bool) -> Self {
        self.enabled = Some(unset);
        self
    }

    pub fn with_storage_blocked_locations(mut self, unset: bool) -> Self {
        self.storage_blocked_locations = Some(unset);
        self
    }

    pub fn with_comment(mut self, unset: bool) -> Self {
        self.comment = Some(unset);
        self
    }

    /// The flagged properties, in statement order.
    fn properties(&self) -> Vec<UnsetProperty> {
        [
            (self.storage_aws_external_id, UnsetProperty::StorageAwsExternalId),
            (self.storage_aws_object_acl, UnsetProperty::StorageAwsObjectAcl),
            (self.enabled, UnsetProperty::Enabled),
            (self.storage_blocked_locations, UnsetProperty::StorageBlockedLocations),
            (self.comment, UnsetProperty::Comment),
        ]
        .into_iter()
        .filter(|(flag, _)| flag.unwrap_or_default())
        .map(|(_, property)| property)
        .collect()
    }
}

/// Exactly one of `set`, `unset`, `set_tags` and `unset_tags` must be given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterStorageIntegrationRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
    pub set: Option<StorageIntegrationSet>,
    pub unset: Option<StorageIntegrationUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterStorageIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
            set: None,
            unset: None,
            set_tags: Vec::new(),
            unset_tags: Vec::new(),
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_set(mut self, set: StorageIntegrationSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: StorageIntegrationUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn with_set_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.set_tags = tags;
        self
    }

    pub fn with_unset_tags(mut self, tags: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tags = tags;
        self
    }

    /// Empty `set`/`unset` groups are dropped so they count as not given.
    pub(crate) fn to_opts(&self) -> AlterStorageIntegrationOptions {
        AlterStorageIntegrationOptions {
            alter: Static,
            storage_integration: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
            set: self.set.clone().filter(|set| !set.is_empty()),
            unset: self
                .unset
                .as_ref()
                .map(StorageIntegrationUnset::properties)
                .filter(|properties| !properties.is_empty())
                .map(|properties| StorageIntegrationUnsetOptions { properties }),
            set_tags: self.set_tags.clone(),
            unset_tags: self.unset_tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStorageIntegrationRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
}

impl DropStorageIntegrationRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub(crate) fn to_opts(&self) -> DropStorageIntegrationOptions {
        DropStorageIntegrationOptions {
            drop: Static,
            storage_integration: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowStorageIntegrationRequest {
    pub like: Option<Like>,
}

impl ShowStorageIntegrationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub(crate) fn to_opts(&self) -> ShowStorageIntegrationOptions {
        ShowStorageIntegrationOptions {
            show: Static,
            storage_integrations: Static,
            like: self.like.as_ref().map(|like| like.pattern.clone()),
        }
    }
}

pub(crate) fn describe_opts(name: &AccountObjectIdentifier) -> DescribeStorageIntegrationOptions {
    DescribeStorageIntegrationOptions {
        describe: Static,
        storage_integration: Static,
        name: name.clone(),
    }
}
