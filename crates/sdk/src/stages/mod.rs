//! Internal and external (S3, GCS) stages.

pub mod options;
mod requests;
mod rows;

pub use options::{
    DirectoryTableRefresh, DirectoryTableSet, ExternalGcsDirectoryTableOptions,
    ExternalS3DirectoryTableOptions, ExternalStageGcsEncryption, ExternalStageGcsEncryptionType,
    ExternalStageS3Credentials, ExternalStageS3Encryption, ExternalStageS3EncryptionType,
    FileFormatType, InternalDirectoryTableOptions, InternalStageEncryption,
    InternalStageEncryptionType, MatchByColumnName, OnError, StageCopyOptions, StageFileFormat,
};
pub use requests::{
    AlterDirectoryTableRequest, AlterExternalS3StageRequest, AlterInternalStageRequest,
    AlterStageRequest, CreateInternalStageRequest, CreateOnGcsStageRequest,
    CreateOnS3StageRequest, DropStageRequest, ShowStageRequest,
};
pub use rows::{Stage, StageProperty};

use crate::client::Client;
use crate::error::SdkError;
use crate::fragments::{In, Like};
use async_trait::async_trait;
use ddl_builder::{ObjectIdentifier, SchemaObjectIdentifier};
use rows::{StagePropertyRow, StageRow};
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Stages: Send + Sync {
    async fn create_internal(
        &self,
        cancel: &CancellationToken,
        request: &CreateInternalStageRequest,
    ) -> Result<(), SdkError>;

    async fn create_on_s3(
        &self,
        cancel: &CancellationToken,
        request: &CreateOnS3StageRequest,
    ) -> Result<(), SdkError>;

    async fn create_on_gcs(
        &self,
        cancel: &CancellationToken,
        request: &CreateOnGcsStageRequest,
    ) -> Result<(), SdkError>;

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterStageRequest,
    ) -> Result<(), SdkError>;

    async fn alter_internal_stage(
        &self,
        cancel: &CancellationToken,
        request: &AlterInternalStageRequest,
    ) -> Result<(), SdkError>;

    async fn alter_external_s3_stage(
        &self,
        cancel: &CancellationToken,
        request: &AlterExternalS3StageRequest,
    ) -> Result<(), SdkError>;

    async fn alter_directory_table(
        &self,
        cancel: &CancellationToken,
        request: &AlterDirectoryTableRequest,
    ) -> Result<(), SdkError>;

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropStageRequest,
    ) -> Result<(), SdkError>;

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<StageProperty>, SdkError>;

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowStageRequest,
    ) -> Result<Vec<Stage>, SdkError>;

    /// Finds the stage with exactly this identifier, or `NotFound`.
    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Stage, SdkError>;
}

/// [`Stages`] backed by a [`Client`].
#[derive(Clone)]
pub struct StagesApi {
    client: Client,
}

impl StagesApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Stages for StagesApi {
    async fn create_internal(
        &self,
        cancel: &CancellationToken,
        request: &CreateInternalStageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.create_internal", &request.to_opts())
            .await
    }

    async fn create_on_s3(
        &self,
        cancel: &CancellationToken,
        request: &CreateOnS3StageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.create_on_s3", &request.to_opts())
            .await
    }

    async fn create_on_gcs(
        &self,
        cancel: &CancellationToken,
        request: &CreateOnGcsStageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.create_on_gcs", &request.to_opts())
            .await
    }

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterStageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.alter", &request.to_opts())
            .await
    }

    async fn alter_internal_stage(
        &self,
        cancel: &CancellationToken,
        request: &AlterInternalStageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.alter_internal_stage", &request.to_opts())
            .await
    }

    async fn alter_external_s3_stage(
        &self,
        cancel: &CancellationToken,
        request: &AlterExternalS3StageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.alter_external_s3_stage", &request.to_opts())
            .await
    }

    async fn alter_directory_table(
        &self,
        cancel: &CancellationToken,
        request: &AlterDirectoryTableRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.alter_directory_table", &request.to_opts())
            .await
    }

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropStageRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "stages.drop", &request.to_opts())
            .await
    }

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<StageProperty>, SdkError> {
        self.client
            .query::<StagePropertyRow, StageProperty>(
                cancel,
                "stages.describe",
                &requests::describe_opts(id),
            )
            .await
    }

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowStageRequest,
    ) -> Result<Vec<Stage>, SdkError> {
        self.client
            .query::<StageRow, Stage>(cancel, "stages.show", &request.to_opts())
            .await
    }

    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Stage, SdkError> {
        let request = ShowStageRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::Schema(id.schema_id()));
        let stages = self
            .client
            .query::<StageRow, Stage>(cancel, "stages.show_by_id", &request.to_opts())
            .await?;
        stages
            .into_iter()
            .find(|stage| {
                stage.database_name == id.database_name()
                    && stage.schema_name == id.schema_name()
                    && stage.name == id.name()
            })
            .ok_or_else(|| SdkError::not_found(format!("stage {id} does not exist")))
    }
}
