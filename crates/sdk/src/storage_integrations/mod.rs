//! Storage integrations for external stages on S3, GCS and Azure.

pub mod options;
mod requests;
mod rows;

pub use options::{
    AzureStorageParams, GcsStorageParams, S3Protocol, S3StorageParams, SetAzureStorageParams,
    SetS3StorageParams, StorageIntegrationSet, UnsetProperty,
};
pub use requests::{
    AlterStorageIntegrationRequest, CreateStorageIntegrationRequest,
    DropStorageIntegrationRequest, ShowStorageIntegrationRequest, StorageIntegrationUnset,
};
pub use rows::{StorageIntegration, StorageIntegrationProperty};

use crate::client::Client;
use crate::error::SdkError;
use crate::fragments::Like;
use async_trait::async_trait;
use ddl_builder::{AccountObjectIdentifier, ObjectIdentifier};
use rows::{StorageIntegrationPropertyRow, StorageIntegrationRow};
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait StorageIntegrations: Send + Sync {
    async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateStorageIntegrationRequest,
    ) -> Result<(), SdkError>;

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterStorageIntegrationRequest,
    ) -> Result<(), SdkError>;

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropStorageIntegrationRequest,
    ) -> Result<(), SdkError>;

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowStorageIntegrationRequest,
    ) -> Result<Vec<StorageIntegration>, SdkError>;

    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &AccountObjectIdentifier,
    ) -> Result<StorageIntegration, SdkError>;

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<StorageIntegrationProperty>, SdkError>;
}

#[derive(Clone)]
pub struct StorageIntegrationsApi {
    client: Client,
}

impl StorageIntegrationsApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageIntegrations for StorageIntegrationsApi {
    async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateStorageIntegrationRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "storage_integrations.create", &request.to_opts())
            .await
    }

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterStorageIntegrationRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "storage_integrations.alter", &request.to_opts())
            .await
    }

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropStorageIntegrationRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "storage_integrations.drop", &request.to_opts())
            .await
    }

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowStorageIntegrationRequest,
    ) -> Result<Vec<StorageIntegration>, SdkError> {
        self.client
            .query::<StorageIntegrationRow, StorageIntegration>(
                cancel,
                "storage_integrations.show",
                &request.to_opts(),
            )
            .await
    }

    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &AccountObjectIdentifier,
    ) -> Result<StorageIntegration, SdkError> {
        let request = ShowStorageIntegrationRequest::new().with_like(Like::new(id.name()));
        let integrations = self
            .client
            .query::<StorageIntegrationRow, StorageIntegration>(
                cancel,
                "storage_integrations.show_by_id",
                &request.to_opts(),
            )
            .await?;
        integrations
            .into_iter()
            .find(|integration| integration.name == id.name())
            .ok_or_else(|| SdkError::not_found(format!("storage integration {id} does not exist")))
    }

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<StorageIntegrationProperty>, SdkError> {
        self.client
            .query::<StorageIntegrationPropertyRow, StorageIntegrationProperty>(
                cancel,
                "storage_integrations.describe",
                &requests::describe_opts(id),
            )
            .await
    }
}
