use crate::fragments::TagAssociation;
use ddl_builder::{AccountObjectIdentifier, SchemaObjectIdentifier, SqlEnum, SqlOptions, Static};

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum S3Protocol {
    S3,
    #[ddl(sql = "S3GOV")]
    S3Gov,
    #[ddl(sql = "S3CHINA")]
    S3China,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct S3StorageParams {
    #[ddl(parameter = "STORAGE_PROVIDER", single_quotes)]
    pub protocol: S3Protocol,
    #[ddl(parameter = "STORAGE_AWS_ROLE_ARN", single_quotes)]
    pub role_arn: String,
    #[ddl(parameter = "STORAGE_AWS_EXTERNAL_ID", single_quotes)]
    pub external_id: Option<String>,
    #[ddl(parameter = "STORAGE_AWS_OBJECT_ACL", single_quotes)]
    pub object_acl: Option<String>,
}

impl S3StorageParams {
    pub fn new(protocol: S3Protocol, role_arn: impl Into<String>) -> Self {
        Self {
            protocol,
            role_arn: role_arn.into(),
            external_id: None,
            object_acl: None,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_object_acl(mut self, object_acl: impl Into<String>) -> Self {
        self.object_acl = Some(object_acl.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct GcsStorageParams {
    #[ddl(static = "STORAGE_PROVIDER = 'GCS'")]
    provider: Static,
}

impl GcsStorageParams {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct AzureStorageParams {
    #[ddl(static = "STORAGE_PROVIDER = 'AZURE'")]
    provider: Static,
    #[ddl(parameter = "AZURE_TENANT_ID", single_quotes)]
    pub tenant_id: String,
}

impl AzureStorageParams {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            provider: Static,
            tenant_id: tenant_id.into(),
        }
    }
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(or_replace, if_not_exists))]
#[validate(exactly_one_value_set(s3, gcs, azure))]
pub(crate) struct CreateStorageIntegrationOptions {
    #[ddl(static = "CREATE")]
    pub create: Static,
    #[ddl(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static = "STORAGE INTEGRATION")]
    pub storage_integration: Static,
    #[ddl(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(static = "TYPE = EXTERNAL_STAGE")]
    pub external_stage_type: Static,
    #[ddl(keyword)]
    pub s3: Option<S3StorageParams>,
    #[ddl(keyword)]
    pub gcs: Option<GcsStorageParams>,
    #[ddl(keyword)]
    pub azure: Option<AzureStorageParams>,
    #[ddl(parameter = "ENABLED")]
    pub enabled: bool,
    #[ddl(parameter = "STORAGE_ALLOWED_LOCATIONS", parentheses, single_quotes, required)]
    pub storage_allowed_locations: Vec<String>,
    #[ddl(parameter = "STORAGE_BLOCKED_LOCATIONS", parentheses, single_quotes)]
    pub storage_blocked_locations: Vec<String>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

/// S3 settings that can be changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct SetS3StorageParams {
    #[ddl(parameter = "STORAGE_AWS_ROLE_ARN", single_quotes)]
    pub role_arn: String,
    #[ddl(parameter = "STORAGE_AWS_EXTERNAL_ID", single_quotes)]
    pub external_id: Option<String>,
    #[ddl(parameter = "STORAGE_AWS_OBJECT_ACL", single_quotes)]
    pub object_acl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct SetAzureStorageParams {
    #[ddl(parameter = "AZURE_TENANT_ID", single_quotes)]
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[validate(conflicting_fields(s3, azure))]
pub struct StorageIntegrationSet {
    #[ddl(keyword)]
    pub s3: Option<SetS3StorageParams>,
    #[ddl(keyword)]
    pub azure: Option<SetAzureStorageParams>,
    #[ddl(parameter = "ENABLED")]
    pub enabled: Option<bool>,
    #[ddl(parameter = "STORAGE_ALLOWED_LOCATIONS", parentheses, single_quotes)]
    pub storage_allowed_locations: Vec<String>,
    #[ddl(parameter = "STORAGE_BLOCKED_LOCATIONS", parentheses, single_quotes)]
    pub storage_blocked_locations: Vec<String>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

impl StorageIntegrationSet {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum UnsetProperty {
    StorageAwsExternalId,
    StorageAwsObjectAcl,
    Enabled,
    StorageBlockedLocations,
    Comment,
}

#[derive(Debug, Clone, SqlOptions)]
pub(crate) struct StorageIntegrationUnsetOptions {
    #[ddl(list, no_parentheses, required)]
    pub properties: Vec<UnsetProperty>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(exactly_one_value_set(set, unset, set_tags, unset_tags))]
pub(crate) struct AlterStorageIntegrationOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "STORAGE INTEGRATION")]
    pub storage_integration: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword = "SET")]
    pub set: Option<StorageIntegrationSet>,
    #[ddl(keyword = "UNSET")]
    pub unset: Option<StorageIntegrationUnsetOptions>,
    #[ddl(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[ddl(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DropStorageIntegrationOptions {
    #[ddl(static = "DROP")]
    pub drop: Static,
    #[ddl(static = "STORAGE INTEGRATION")]
    pub storage_integration: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: AccountObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DescribeStorageIntegrationOptions {
    #[ddl(static = "DESCRIBE")]
    pub describe: Static,
    #[ddl(static = "STORAGE INTEGRATION")]
    pub storage_integration: Static,
    #[ddl(identifier)]
    pub name: AccountObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
pub(crate) struct ShowStorageIntegrationOptions {
    #[ddl(static = "SHOW")]
    pub show: Static,
    #[ddl(static = "STORAGE INTEGRATIONS")]
    pub storage_integrations: Static,
    #[ddl(parameter = "LIKE", no_equals, single_quotes)]
    pub like: Option<String>,
}
