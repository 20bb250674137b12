use super::options::*;
use crate::fragments::{In, Like, TagAssociation};
use ddl_builder::{AccountObjectIdentifier, SchemaObjectIdentifier, Static};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInternalStageRequest {
    pub name: SchemaObjectIdentifier,
    pub or_replace: Option<bool>,
    pub temporary: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub encryption: Option<InternalStageEncryption>,
    pub directory: Option<InternalDirectoryTableOptions>,
    pub file_format: Option<StageFileFormat>,
    pub copy_options: Option<StageCopyOptions>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateInternalStageRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            or_replace: None,
            temporary: None,
            if_not_exists: None,
            encryption: None,
            directory: None,
            file_format: None,
            copy_options: None,
            comment: None,
            tags: Vec::new(),
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_encryption(mut self, encryption_type: InternalStageEncryptionType) -> Self {
        self.encryption = Some(InternalStageEncryption { encryption_type });
        self
    }

    pub fn with_directory(mut self, enable: bool) -> Self {
        self.directory = Some(InternalDirectoryTableOptions {
            enable: Some(enable),
        });
        self
    }

    pub fn with_file_format(mut self, file_format: StageFileFormat) -> Self {
        self.file_format = Some(file_format);
        self
    }

    pub fn with_copy_options(mut self, copy_options: StageCopyOptions) -> Self {
        self.copy_options = Some(copy_options);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn to_opts(&self) -> CreateInternalStageOptions {
        CreateInternalStageOptions {
            create: Static,
            or_replace: self.or_replace.unwrap_or_default(),
            temporary: self.temporary.unwrap_or_default(),
            stage: Static,
            if_not_exists: self.if_not_exists.unwrap_or_default(),
            name: self.name.clone(),
            encryption: self.encryption.clone(),
            directory: self.directory.clone(),
            file_format: self.file_format.clone(),
            copy_options: self.copy_options.clone(),
            comment: self.comment.clone(),
            tag: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOnS3StageRequest {
    pub name: SchemaObjectIdentifier,
    pub url: String,
    pub or_replace: Option<bool>,
    pub temporary: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub credentials: Option<ExternalStageS3Credentials>,
    pub encryption: Option<ExternalStageS3Encryption>,
    pub directory: Option<ExternalS3DirectoryTableOptions>,
    pub file_format: Option<StageFileFormat>,
    pub copy_options: Option<StageCopyOptions>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateOnS3StageRequest {
    pub fn new(name: SchemaObjectIdentifier, url: impl Into<String>) -> Self {
        Self {
            name,
            url: url.into(),
            or_replace: None,
            temporary: None,
            if_not_exists: None,
            storage_integration: None,
            credentials: None,
            encryption: None,
            directory: None,
            file_format: None,
            copy_options: None,
            comment: None,
            tags: Vec::new(),
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_storage_integration(mut self, integration: AccountObjectIdentifier) -> Self {
        self.storage_integration = Some(integration);
        self
    }

    pub fn with_credentials(mut self, credentials: ExternalStageS3Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_encryption(mut self, encryption: ExternalStageS3Encryption) -> Self {
        self.encryption = Some(encryption);
        self
    }

    pub fn with_directory(mut self, directory: ExternalS3DirectoryTableOptions) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_file_format(mut self, file_format: StageFileFormat) -> Self {
        self.file_format = Some(file_format);
        self
    }

    pub fn with_copy_options(mut self, copy_options: StageCopyOptions) -> Self {
        self.copy_options = Some(copy_options);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn to_opts(&self) -> CreateOnS3StageOptions {
        CreateOnS3StageOptions {
            create: Static,
            or_replace: self.or_replace.unwrap_or_default(),
            temporary: self.temporary.unwrap_or_default(),
            stage: Static,
            if_not_exists: self.if_not_exists.unwrap_or_default(),
            name: self.name.clone(),
            url: self.url.clone(),
            storage_integration: self.storage_integration.clone(),
            credentials: self.credentials.clone(),
            encryption: self.encryption.clone(),
            directory: self.directory.clone(),
            file_format: self.file_format.clone(),
            copy_options: self.copy_options.clone(),
            comment: self.comment.clone(),
            tag: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOnGcsStageRequest {
    pub name: SchemaObjectIdentifier,
    pub url: String,
    pub or_replace: Option<bool>,
    pub temporary: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub encryption: Option<ExternalStageGcsEncryption>,
    pub directory: Option<ExternalGcsDirectoryTableOptions>,
    pub file_format: Option<StageFileFormat>,
    pub copy_options: Option<StageCopyOptions>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateOnGcsStageRequest {
    pub fn new(name: SchemaObjectIdentifier, url: impl Into<String>) -> Self {
        Self {
            name,
            url: url.into(),
            or_replace: None,
            temporary: None,
            if_not_exists: None,
            storage_integration: None,
            encryption: None,
            directory: None,
            file_format: None,
            copy_options: None,
            comment: None,
            tags: Vec::new(),
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_storage_integration(mut self, integration: AccountObjectIdentifier) -> Self {
        self.storage_integration = Some(integration);
        self
    }

    pub fn with_encryption(mut self, encryption: ExternalStageGcsEncryption) -> Self {
        self.encryption = Some(encryption);
        self
    }

    pub fn with_directory(mut self, directory: ExternalGcsDirectoryTableOptions) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_file_format(mut self, file_format: StageFileFormat) -> Self {
        self.file_format = Some(file_format);
        self
    }

    pub fn with_copy_options(mut self, copy_options: StageCopyOptions) -> Self {
        self.copy_options = Some(copy_options);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn to_opts(&self) -> CreateOnGcsStageOptions {
        CreateOnGcsStageOptions {
            create: Static,
            or_replace: self.or_replace.unwrap_or_default(),
            temporary: self.temporary.unwrap_or_default(),
            stage: Static,
            if_not_exists: self.if_not_exists.unwrap_or_default(),
            name: self.name.clone(),
            url: self.url.clone(),
            storage_integration: self.storage_integration.clone(),
            encryption: self.encryption.clone(),
            directory: self.directory.clone(),
            file_format: self.file_format.clone(),
            copy_options: self.copy_options.clone(),
            comment: self.comment.clone(),
            tag: self.tags.clone(),
        }
    }
}

/// Rename or retag a stage. Exactly one action must be given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterStageRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterStageRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
            rename_to: None,
            set_tags: Vec::new(),
            unset_tags: Vec::new(),
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_rename_to(mut self, new_name: SchemaObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
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

    pub(crate) fn to_opts(&self) -> AlterStageOptions {
        AlterStageOptions {
            alter: Static,
            stage: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
            rename_to: self.rename_to.clone(),
            set_tags: self.set_tags.clone(),
            unset_tags: self.unset_tags.clone(),
        }
    }
}

/// `ALTER STAGE ... SET` for an internal stage. Any combination of
/// properties, at least one; `with_comment("")` clears the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterInternalStageRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub file_format: Option<StageFileFormat>,
    pub copy_options: Option<StageCopyOptions>,
    pub comment: Option<String>,
}

impl AlterInternalStageRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
            file_format: None,
            copy_options: None,
            comment: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_file_format(mut self, file_format: StageFileFormat) -> Self {
        self.file_format = Some(file_format);
        self
    }

    pub fn with_copy_options(mut self, copy_options: StageCopyOptions) -> Self {
        self.copy_options = Some(copy_options);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub(crate) fn to_opts(&self) -> AlterInternalStageStageOptions {
        AlterInternalStageStageOptions {
            alter: Static,
            stage: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
            set: Static,
            file_format: self.file_format.clone(),
            copy_options: self
                .copy_options
                .clone()
                .filter(|options| *options != StageCopyOptions::default()),
            comment: self.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterExternalS3StageRequest {
    pub name: SchemaObjectIdentifier,
    pub url: String,
    pub if_exists: Option<bool>,
    pub storage_integration: Option<AccountObjectIdentifier>,
    pub credentials: Option<ExternalStageS3Credentials>,
    pub encryption: Option<ExternalStageS3Encryption>,
    pub file_format: Option<StageFileFormat>,
    pub copy_options: Option<StageCopyOptions>,
    pub comment: Option<String>,
}

impl AlterExternalS3StageRequest {
    pub fn new(name: SchemaObjectIdentifier, url: impl Into<String>) -> Self {
        Self {
            name,
            url: url.into(),
            if_exists: None,
            storage_integration: None,
            credentials: None,
            encryption: None,
            file_format: None,
            copy_options: None,
            comment: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_storage_integration(mut self, integration: AccountObjectIdentifier) -> Self {
        self.storage_integration = Some(integration);
        self
    }

    pub fn with_credentials(mut self, credentials: ExternalStageS3Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_encryption(mut self, encryption: ExternalStageS3Encryption) -> Self {
        self.encryption = Some(encryption);
        self
    }

    pub fn with_file_format(mut self, file_format: StageFileFormat) -> Self {
        self.file_format = Some(file_format);
        self
    }

    pub fn with_copy_options(mut self, copy_options: StageCopyOptions) -> Self {
        self.copy_options = Some(copy_options);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub(crate) fn to_opts(&self) -> AlterExternalS3StageStageOptions {
        AlterExternalS3StageStageOptions {
            alter: Static,
            stage: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
            set: Static,
            url: self.url.clone(),
            storage_integration: self.storage_integration.clone(),
            credentials: self.credentials.clone(),
            encryption: self.encryption.clone(),
            file_format: self.file_format.clone(),
            copy_options: self.copy_options.clone(),
            comment: self.comment.clone(),
        }
    }
}

/// Enable or disable the directory table, or refresh it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterDirectoryTableRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub set_directory: Option<DirectoryTableSet>,
    pub refresh: Option<DirectoryTableRefresh>,
}

impl AlterDirectoryTableRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
            set_directory: None,
            refresh: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_enable(mut self, enable: bool) -> Self {
        self.set_directory = Some(DirectoryTableSet { enable });
        self
    }

    pub fn with_refresh(mut self, subpath: Option<String>) -> Self {
        self.refresh = Some(DirectoryTableRefresh { subpath });
        self
    }

    pub(crate) fn to_opts(&self) -> AlterDirectoryTableOptions {
        AlterDirectoryTableOptions {
            alter: Static,
            stage: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
            set_directory: self.set_directory.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStageRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
}

impl DropStageRequest {
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

    pub(crate) fn to_opts(&self) -> DropStageOptions {
        DropStageOptions {
            drop: Static,
            stage: Static,
            if_exists: self.if_exists.unwrap_or_default(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowStageRequest {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

impl ShowStageRequest {
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

    pub(crate) fn to_opts(&self) -> ShowStageOptions {
        ShowStageOptions {
            show: Static,
            stages: Static,
            like: self.like.as_ref().map(|like| like.pattern.clone()),
            in_: self.in_.as_ref().map(In::to_opts),
        }
    }
}

pub(crate) fn describe_opts(name: &SchemaObjectIdentifier) -> DescribeStageOptions {
    DescribeStageOptions {
        describe: Static,
        stage: Static,
        name: name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddl_builder::{build, BuildError, DatabaseObjectIdentifier};
    use pretty_assertions::assert_eq;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "SCH", "MY_STAGE").unwrap()
    }

    #[test]
    fn internal_stage_full() {
        let request = CreateInternalStageRequest::new(id())
            .with_or_replace(true)
            .with_temporary(true)
            .with_encryption(InternalStageEncryptionType::SnowflakeSse)
            .with_directory(true)
            .with_file_format(StageFileFormat::of_type(FileFormatType::Json))
            .with_copy_options(StageCopyOptions {
                on_error: Some(OnError::SkipFile),
                size_limit: Some(100),
                purge: Some(true),
                ..Default::default()
            })
            .with_comment("landing zone")
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("DB", "SCH", "OWNER").unwrap(),
                "data",
            )]);
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"CREATE OR REPLACE TEMPORARY STAGE "DB"."SCH"."MY_STAGE" ENCRYPTION = (TYPE = 'SNOWFLAKE_SSE') DIRECTORY = (ENABLE = TRUE) FILE_FORMAT = (TYPE = JSON) COPY_OPTIONS = (ON_ERROR = SKIP_FILE SIZE_LIMIT = 100 PURGE = TRUE) COMMENT = 'landing zone' TAG ("DB"."SCH"."OWNER" = 'data')"#
        );
    }

    #[test]
    fn s3_stage_with_credentials_and_encryption() {
        let request = CreateOnS3StageRequest::new(id(), "s3://bucket/path/")
            .with_if_not_exists(true)
            .with_credentials(ExternalStageS3Credentials {
                aws_key_id: Some("AKIA".into()),
                aws_secret_key: Some("secret".into()),
                ..Default::default()
            })
            .with_encryption(ExternalStageS3Encryption {
                encryption_type: ExternalStageS3EncryptionType::AwsSseKms,
                master_key: None,
                kms_key_id: Some("key-1".into()),
            })
            .with_directory(ExternalS3DirectoryTableOptions {
                enable: true,
                refresh_on_create: Some(false),
                auto_refresh: None,
            });
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"CREATE STAGE IF NOT EXISTS "DB"."SCH"."MY_STAGE" URL = 's3://bucket/path/' CREDENTIALS = (AWS_KEY_ID = 'AKIA' AWS_SECRET_KEY = 'secret') ENCRYPTION = (TYPE = 'AWS_SSE_KMS' KMS_KEY_ID = 'key-1') DIRECTORY = (ENABLE = TRUE REFRESH_ON_CREATE = FALSE)"#
        );
    }

    #[test]
    fn s3_stage_rejects_integration_with_credentials() {
        let request = CreateOnS3StageRequest::new(id(), "s3://bucket/")
            .with_storage_integration(AccountObjectIdentifier::new("INT").unwrap())
            .with_credentials(ExternalStageS3Credentials {
                aws_role: Some("arn:aws:iam::1:role/r".into()),
                ..Default::default()
            });
        let err = build(&request.to_opts()).unwrap_err();
        assert_eq!(err.fields(), vec!["storage_integration", "credentials"]);
    }

    #[test]
    fn s3_stage_without_url_is_an_emission_error() {
        let request = CreateOnS3StageRequest::new(id(), "");
        assert!(matches!(
            build(&request.to_opts()),
            Err(BuildError::MissingRequiredField { field: "url", .. })
        ));
    }

    #[test]
    fn gcs_stage_with_notification_integration() {
        let request = CreateOnGcsStageRequest::new(id(), "gcs://bucket/")
            .with_storage_integration(AccountObjectIdentifier::new("GCS_INT").unwrap())
            .with_directory(ExternalGcsDirectoryTableOptions {
                enable: true,
                auto_refresh: Some(true),
                notification_integration: Some("NOTIFY".into()),
                ..Default::default()
            });
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"CREATE STAGE "DB"."SCH"."MY_STAGE" URL = 'gcs://bucket/' STORAGE_INTEGRATION = "GCS_INT" DIRECTORY = (ENABLE = TRUE AUTO_REFRESH = TRUE NOTIFICATION_INTEGRATION = 'NOTIFY')"#
        );
    }

    #[test]
    fn temporary_gcs_stage_with_copy_options_and_tags() {
        let request = CreateOnGcsStageRequest::new(id(), "gcs://bucket/raw/")
            .with_temporary(true)
            .with_copy_options(StageCopyOptions {
                on_error: Some(OnError::Continue),
                force: Some(true),
                ..Default::default()
            })
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("DB", "SCH", "OWNER").unwrap(),
                "data",
            )]);
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"CREATE TEMPORARY STAGE "DB"."SCH"."MY_STAGE" URL = 'gcs://bucket/raw/' COPY_OPTIONS = (ON_ERROR = CONTINUE FORCE = TRUE) TAG ("DB"."SCH"."OWNER" = 'data')"#
        );
    }

    #[test]
    fn alter_actions() {
        let rename = AlterStageRequest::new(id())
            .with_if_exists(true)
            .with_rename_to(SchemaObjectIdentifier::new("DB", "SCH", "NEW").unwrap());
        assert_eq!(
            build(&rename.to_opts()).unwrap(),
            r#"ALTER STAGE IF EXISTS "DB"."SCH"."MY_STAGE" RENAME TO "DB"."SCH"."NEW""#
        );

        let unset = AlterStageRequest::new(id()).with_unset_tags(vec![
            SchemaObjectIdentifier::new("DB", "SCH", "A").unwrap(),
            SchemaObjectIdentifier::new("DB", "SCH", "B").unwrap(),
        ]);
        assert_eq!(
            build(&unset.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" UNSET TAG "DB"."SCH"."A", "DB"."SCH"."B""#
        );

        let nothing = AlterStageRequest::new(id());
        assert!(build(&nothing.to_opts()).unwrap_err().is_validation());
    }

    #[test]
    fn alter_internal_stage_sets_one_property() {
        let request = AlterInternalStageRequest::new(id())
            .with_file_format(StageFileFormat::named("DB.SCH.CSV_FMT"));
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" SET FILE_FORMAT = (FORMAT_NAME = 'DB.SCH.CSV_FMT')"#
        );
    }

    #[test]
    fn alter_internal_stage_sets_several_properties_at_once() {
        let request = AlterInternalStageRequest::new(id())
            .with_copy_options(StageCopyOptions {
                purge: Some(true),
                ..Default::default()
            })
            .with_comment("");
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" SET COPY_OPTIONS = (PURGE = TRUE) COMMENT = ''"#
        );

        let cleared = AlterInternalStageRequest::new(id()).with_comment("");
        assert_eq!(
            build(&cleared.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" SET COMMENT = ''"#
        );
    }

    #[test]
    fn alter_internal_stage_needs_a_property() {
        let empty_copy = AlterInternalStageRequest::new(id())
            .with_copy_options(StageCopyOptions::default());
        let err = build(&empty_copy.to_opts()).unwrap_err();
        assert_eq!(err.fields(), vec!["file_format", "copy_options", "comment"]);
        assert!(build(&AlterInternalStageRequest::new(id()).to_opts()).is_err());
    }

    #[test]
    fn alter_external_stage_sets_url_and_integration() {
        let request = AlterExternalS3StageRequest::new(id(), "s3://moved/")
            .with_storage_integration(AccountObjectIdentifier::new("S3_INT").unwrap())
            .with_comment("moved");
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" SET URL = 's3://moved/' STORAGE_INTEGRATION = "S3_INT" COMMENT = 'moved'"#
        );
    }

    #[test]
    fn directory_table_enable_and_refresh() {
        let enable = AlterDirectoryTableRequest::new(id()).with_enable(false);
        assert_eq!(
            build(&enable.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" SET DIRECTORY = (ENABLE = FALSE)"#
        );
        let refresh = AlterDirectoryTableRequest::new(id()).with_refresh(Some("2024/".into()));
        assert_eq!(
            build(&refresh.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" REFRESH SUBPATH = '2024/'"#
        );
        let bare = AlterDirectoryTableRequest::new(id()).with_refresh(None);
        assert_eq!(
            build(&bare.to_opts()).unwrap(),
            r#"ALTER STAGE "DB"."SCH"."MY_STAGE" REFRESH"#
        );
        let both = AlterDirectoryTableRequest::new(id())
            .with_enable(true)
            .with_refresh(None);
        assert_eq!(
            build(&both.to_opts()).unwrap_err().fields(),
            vec!["set_directory", "refresh"]
        );
    }

    #[test]
    fn show_with_like_and_scope() {
        assert_eq!(build(&ShowStageRequest::new().to_opts()).unwrap(), "SHOW STAGES");
        let request = ShowStageRequest::new()
            .with_like(Like::new("MY_%"))
            .with_in(In::Schema(DatabaseObjectIdentifier::new("DB", "SCH").unwrap()));
        assert_eq!(
            build(&request.to_opts()).unwrap(),
            r#"SHOW STAGES LIKE 'MY_%' IN SCHEMA "DB"."SCH""#
        );
    }

    #[test]
    fn describe_and_drop() {
        assert_eq!(
            build(&describe_opts(&id())).unwrap(),
            r#"DESCRIBE STAGE "DB"."SCH"."MY_STAGE""#
        );
        assert_eq!(
            build(&DropStageRequest::new(id()).with_if_exists(true).to_opts()).unwrap(),
            r#"DROP STAGE IF EXISTS "DB"."SCH"."MY_STAGE""#
        );
    }
}
