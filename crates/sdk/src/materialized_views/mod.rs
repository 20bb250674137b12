//! Materialized views.

pub mod options;
mod requests;
mod rows;

pub use options::{
    MaterializedViewRowAccessPolicy, MaterializedViewSet, MaterializedViewUnset, ViewColumn,
};
pub use requests::{
    AlterMaterializedViewRequest, CreateMaterializedViewRequest, DropMaterializedViewRequest,
    ShowMaterializedViewRequest,
};
pub use rows::{MaterializedView, MaterializedViewColumn};

use crate::client::Client;
use crate::error::SdkError;
use crate::fragments::{In, Like};
use async_trait::async_trait;
use ddl_builder::{ObjectIdentifier, SchemaObjectIdentifier};
use rows::{MaterializedViewColumnRow, MaterializedViewRow};
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait MaterializedViews: Send + Sync {
    async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateMaterializedViewRequest,
    ) -> Result<(), SdkError>;

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterMaterializedViewRequest,
    ) -> Result<(), SdkError>;

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropMaterializedViewRequest,
    ) -> Result<(), SdkError>;

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowMaterializedViewRequest,
    ) -> Result<Vec<MaterializedView>, SdkError>;

    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<MaterializedView, SdkError>;

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<MaterializedViewColumn>, SdkError>;
}

#[derive(Clone)]
pub struct MaterializedViewsApi {
    client: Client,
}

impl MaterializedViewsApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MaterializedViews for MaterializedViewsApi {
    async fn create(
        &self,
        cancel: &CancellationToken,
        request: &CreateMaterializedViewRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "materialized_views.create", &request.to_opts())
            .await
    }

    async fn alter(
        &self,
        cancel: &CancellationToken,
        request: &AlterMaterializedViewRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "materialized_views.alter", &request.to_opts())
            .await
    }

    async fn drop(
        &self,
        cancel: &CancellationToken,
        request: &DropMaterializedViewRequest,
    ) -> Result<(), SdkError> {
        self.client
            .exec(cancel, "materialized_views.drop", &request.to_opts())
            .await
    }

    async fn show(
        &self,
        cancel: &CancellationToken,
        request: &ShowMaterializedViewRequest,
    ) -> Result<Vec<MaterializedView>, SdkError> {
        self.client
            .query::<MaterializedViewRow, MaterializedView>(
                cancel,
                "materialized_views.show",
                &request.to_opts(),
            )
            .await
    }

    async fn show_by_id(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<MaterializedView, SdkError> {
        let request = ShowMaterializedViewRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::Schema(id.schema_id()));
        let views = self
            .client
            .query::<MaterializedViewRow, MaterializedView>(
                cancel,
                "materialized_views.show_by_id",
                &request.to_opts(),
            )
            .await?;
        views
            .into_iter()
            .find(|view| {
                view.database_name == id.database_name()
                    && view.schema_name == id.schema_name()
                    && view.name == id.name()
            })
            .ok_or_else(|| SdkError::not_found(format!("materialized view {id} does not exist")))
    }

    async fn describe(
        &self,
        cancel: &CancellationToken,
        id: &SchemaObjectIdentifier,
    ) -> Result<Vec<MaterializedViewColumn>, SdkError> {
        self.client
            .query::<MaterializedViewColumnRow, MaterializedViewColumn>(
                cancel,
                "materialized_views.describe",
                &requests::describe_opts(id),
            )
            .await
    }
}
