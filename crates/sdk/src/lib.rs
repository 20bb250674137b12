//! Typed resource API over warehouse DDL.
//!
//! Each resource (stages, storage integrations, materialized views) exposes a
//! trait with the same operation set: create, alter, drop, show, show by id
//! and describe. Requests are lowered into `ddl_builder` option structs,
//! validated, rendered to one statement and sent through a
//! [`shared_clients::DatabaseAdapter`].
//!
//! ```ignore
//! let client = Client::new(adapter);
//! let cancel = CancellationToken::new();
//! let id = SchemaObjectIdentifier::new("DB", "SCH", "LANDING")?;
//! client
//!     .stages()
//!     .create_internal(&cancel, &CreateInternalStageRequest::new(id).with_comment("raw"))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod fragments;
pub mod materialized_views;
pub mod rows;
pub mod stages;
pub mod storage_integrations;

pub use client::Client;
pub use ddl_builder::{
    AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier, IdentifierError,
    ObjectIdentifier, SchemaObjectIdentifier,
};
pub use error::{ErrorKind, SdkError};
pub use fragments::{In, Like, TagAssociation};
pub use materialized_views::{MaterializedViews, MaterializedViewsApi};
pub use stages::{Stages, StagesApi};
pub use storage_integrations::{StorageIntegrations, StorageIntegrationsApi};
pub use tokio_util::sync::CancellationToken;
