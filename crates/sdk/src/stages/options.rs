use crate::fragments::{InOptions, TagAssociation};
use ddl_builder::{
    AccountObjectIdentifier, SchemaObjectIdentifier, SqlEnum, SqlOptions, Static,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum InternalStageEncryptionType {
    SnowflakeFull,
    SnowflakeSse,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct InternalStageEncryption {
    #[ddl(parameter = "TYPE", single_quotes)]
    pub encryption_type: InternalStageEncryptionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum ExternalStageS3EncryptionType {
    AwsCse,
    #[ddl(sql = "AWS_SSE_S3")]
    AwsSseS3,
    AwsSseKms,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct ExternalStageS3Encryption {
    #[ddl(parameter = "TYPE", single_quotes)]
    pub encryption_type: ExternalStageS3EncryptionType,
    #[ddl(parameter = "MASTER_KEY", single_quotes)]
    pub master_key: Option<String>,
    #[ddl(parameter = "KMS_KEY_ID", single_quotes)]
    pub kms_key_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum ExternalStageGcsEncryptionType {
    GcsSseKms,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct ExternalStageGcsEncryption {
    #[ddl(parameter = "TYPE", single_quotes)]
    pub encryption_type: ExternalStageGcsEncryptionType,
    #[ddl(parameter = "KMS_KEY_ID", single_quotes)]
    pub kms_key_id: Option<String>,
}

/// Either key pair credentials or an IAM role, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[validate(conflicting_fields(aws_key_id, aws_role))]
pub struct ExternalStageS3Credentials {
    #[ddl(parameter = "AWS_KEY_ID", single_quotes)]
    pub aws_key_id: Option<String>,
    #[ddl(parameter = "AWS_SECRET_KEY", single_quotes)]
    pub aws_secret_key: Option<String>,
    #[ddl(parameter = "AWS_TOKEN", single_quotes)]
    pub aws_token: Option<String>,
    #[ddl(parameter = "AWS_ROLE", single_quotes)]
    pub aws_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct InternalDirectoryTableOptions {
    #[ddl(parameter = "ENABLE")]
    pub enable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ExternalS3DirectoryTableOptions {
    #[ddl(parameter = "ENABLE")]
    pub enable: bool,
    #[ddl(parameter = "REFRESH_ON_CREATE")]
    pub refresh_on_create: Option<bool>,
    #[ddl(parameter = "AUTO_REFRESH")]
    pub auto_refresh: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct ExternalGcsDirectoryTableOptions {
    #[ddl(parameter = "ENABLE")]
    pub enable: bool,
    #[ddl(parameter = "REFRESH_ON_CREATE")]
    pub refresh_on_create: Option<bool>,
    #[ddl(parameter = "AUTO_REFRESH")]
    pub auto_refresh: Option<bool>,
    #[ddl(parameter = "NOTIFICATION_INTEGRATION", single_quotes)]
    pub notification_integration: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum FileFormatType {
    Csv,
    Json,
    Avro,
    Orc,
    Parquet,
    Xml,
}

/// A named file format or an inline format type.
#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
#[validate(exactly_one_value_set(format_name, file_format_type))]
pub struct StageFileFormat {
    #[ddl(parameter = "FORMAT_NAME", single_quotes)]
    pub format_name: Option<String>,
    #[ddl(parameter = "TYPE")]
    pub file_format_type: Option<FileFormatType>,
}

impl StageFileFormat {
    pub fn named(format_name: impl Into<String>) -> Self {
        Self {
            format_name: Some(format_name.into()),
            file_format_type: None,
        }
    }

    pub fn of_type(file_format_type: FileFormatType) -> Self {
        Self {
            format_name: None,
            file_format_type: Some(file_format_type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum OnError {
    Continue,
    SkipFile,
    AbortStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlEnum)]
pub enum MatchByColumnName {
    CaseSensitive,
    CaseInsensitive,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct StageCopyOptions {
    #[ddl(parameter = "ON_ERROR")]
    pub on_error: Option<OnError>,
    #[ddl(parameter = "SIZE_LIMIT")]
    pub size_limit: Option<u64>,
    #[ddl(parameter = "PURGE")]
    pub purge: Option<bool>,
    #[ddl(parameter = "RETURN_FAILED_ONLY")]
    pub return_failed_only: Option<bool>,
    #[ddl(parameter = "MATCH_BY_COLUMN_NAME")]
    pub match_by_column_name: Option<MatchByColumnName>,
    #[ddl(parameter = "ENFORCE_LENGTH")]
    pub enforce_length: Option<bool>,
    #[ddl(parameter = "TRUNCATECOLUMNS")]
    pub truncate_columns: Option<bool>,
    #[ddl(parameter = "FORCE")]
    pub force: Option<bool>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(or_replace, if_not_exists))]
pub(crate) struct CreateInternalStageOptions {
    #[ddl(static = "CREATE")]
    pub create: Static,
    #[ddl(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter = "ENCRYPTION", parentheses)]
    pub encryption: Option<InternalStageEncryption>,
    #[ddl(parameter = "DIRECTORY", parentheses)]
    pub directory: Option<InternalDirectoryTableOptions>,
    #[ddl(parameter = "FILE_FORMAT", parentheses)]
    pub file_format: Option<StageFileFormat>,
    #[ddl(parameter = "COPY_OPTIONS", parentheses)]
    pub copy_options: Option<StageCopyOptions>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[ddl(list = "TAG")]
    pub tag: Vec<TagAssociation>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(or_replace, if_not_exists))]
#[validate(conflicting_fields(storage_integration, credentials))]
#[validate(valid_identifier_if_set(storage_integration))]
pub(crate) struct CreateOnS3StageOptions {
    #[ddl(static = "CREATE")]
    pub create: Static,
    #[ddl(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter = "URL", single_quotes, required)]
    pub url: String,
    #[ddl(parameter = "STORAGE_INTEGRATION")]
    pub storage_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter = "CREDENTIALS", parentheses)]
    pub credentials: Option<ExternalStageS3Credentials>,
    #[ddl(parameter = "ENCRYPTION", parentheses)]
    pub encryption: Option<ExternalStageS3Encryption>,
    #[ddl(parameter = "DIRECTORY", parentheses)]
    pub directory: Option<ExternalS3DirectoryTableOptions>,
    #[ddl(parameter = "FILE_FORMAT", parentheses)]
    pub file_format: Option<StageFileFormat>,
    #[ddl(parameter = "COPY_OPTIONS", parentheses)]
    pub copy_options: Option<StageCopyOptions>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[ddl(list = "TAG")]
    pub tag: Vec<TagAssociation>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(or_replace, if_not_exists))]
#[validate(valid_identifier_if_set(storage_integration))]
pub(crate) struct CreateOnGcsStageOptions {
    #[ddl(static = "CREATE")]
    pub create: Static,
    #[ddl(keyword = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(keyword = "TEMPORARY")]
    pub temporary: bool,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter = "URL", single_quotes, required)]
    pub url: String,
    #[ddl(parameter = "STORAGE_INTEGRATION")]
    pub storage_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter = "ENCRYPTION", parentheses)]
    pub encryption: Option<ExternalStageGcsEncryption>,
    #[ddl(parameter = "DIRECTORY", parentheses)]
    pub directory: Option<ExternalGcsDirectoryTableOptions>,
    #[ddl(parameter = "FILE_FORMAT", parentheses)]
    pub file_format: Option<StageFileFormat>,
    #[ddl(parameter = "COPY_OPTIONS", parentheses)]
    pub copy_options: Option<StageCopyOptions>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
    #[ddl(list = "TAG")]
    pub tag: Vec<TagAssociation>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(valid_identifier_if_set(rename_to))]
#[validate(exactly_one_value_set(rename_to, set_tags, unset_tags))]
pub(crate) struct AlterStageOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier = "RENAME TO")]
    pub rename_to: Option<SchemaObjectIdentifier>,
    #[ddl(list = "SET TAG", no_parentheses)]
    pub set_tags: Vec<TagAssociation>,
    #[ddl(list = "UNSET TAG", no_parentheses)]
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(at_least_one_value_set(file_format, copy_options, comment))]
pub(crate) struct AlterInternalStageStageOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(static = "SET")]
    pub set: Static,
    #[ddl(parameter = "FILE_FORMAT", parentheses)]
    pub file_format: Option<StageFileFormat>,
    #[ddl(parameter = "COPY_OPTIONS", parentheses)]
    pub copy_options: Option<StageCopyOptions>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(conflicting_fields(storage_integration, credentials))]
#[validate(valid_identifier_if_set(storage_integration))]
pub(crate) struct AlterExternalS3StageStageOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(static = "SET")]
    pub set: Static,
    #[ddl(parameter = "URL", single_quotes, required)]
    pub url: String,
    #[ddl(parameter = "STORAGE_INTEGRATION")]
    pub storage_integration: Option<AccountObjectIdentifier>,
    #[ddl(parameter = "CREDENTIALS", parentheses)]
    pub credentials: Option<ExternalStageS3Credentials>,
    #[ddl(parameter = "ENCRYPTION", parentheses)]
    pub encryption: Option<ExternalStageS3Encryption>,
    #[ddl(parameter = "FILE_FORMAT", parentheses)]
    pub file_format: Option<StageFileFormat>,
    #[ddl(parameter = "COPY_OPTIONS", parentheses)]
    pub copy_options: Option<StageCopyOptions>,
    #[ddl(parameter = "COMMENT", single_quotes)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, SqlOptions)]
pub struct DirectoryTableSet {
    #[ddl(parameter = "ENABLE")]
    pub enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, SqlOptions)]
pub struct DirectoryTableRefresh {
    #[ddl(parameter = "SUBPATH", single_quotes)]
    pub subpath: Option<String>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
#[validate(exactly_one_value_set(set_directory, refresh))]
pub(crate) struct AlterDirectoryTableOptions {
    #[ddl(static = "ALTER")]
    pub alter: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(parameter = "SET DIRECTORY", parentheses)]
    pub set_directory: Option<DirectoryTableSet>,
    #[ddl(keyword = "REFRESH")]
    pub refresh: Option<DirectoryTableRefresh>,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DropStageOptions {
    #[ddl(static = "DROP")]
    pub drop: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(keyword = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
#[validate(valid_identifier(name))]
pub(crate) struct DescribeStageOptions {
    #[ddl(static = "DESCRIBE")]
    pub describe: Static,
    #[ddl(static = "STAGE")]
    pub stage: Static,
    #[ddl(identifier)]
    pub name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SqlOptions)]
pub(crate) struct ShowStageOptions {
    #[ddl(static = "SHOW")]
    pub show: Static,
    #[ddl(static = "STAGES")]
    pub stages: Static,
    #[ddl(parameter = "LIKE", no_equals, single_quotes)]
    pub like: Option<String>,
    #[ddl(keyword)]
    pub in_: Option<InOptions>,
}
