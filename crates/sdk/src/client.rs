use crate::error::SdkError;
use crate::materialized_views::MaterializedViewsApi;
use crate::rows::{decode_all, FromRow};
use crate::stages::StagesApi;
use crate::storage_integrations::StorageIntegrationsApi;
use common::config::{read_connections, WarehouseConnectionDetails};
use common::error::truncate_for_display;
use ddl_builder::SqlOptions;
use shared_clients::{DatabaseAdapter, DatabaseAdapterError, Row, SqlApiAdapter};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_STATEMENT_IN_LOG: usize = 512;

/// Entry point of the SDK. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Client {
    adapter: Arc<dyn DatabaseAdapter>,
}

impl Client {
    pub fn new(adapter: Arc<dyn DatabaseAdapter>) -> Self {
        Self { adapter }
    }

    /// Builds a client over the SQL API for one configured connection.
    pub fn from_details(details: &WarehouseConnectionDetails) -> Result<Self, DatabaseAdapterError> {
        let adapter = SqlApiAdapter::from_details(details)?;
        Ok(Self::new(Arc::new(adapter)))
    }

    /// Reads a `connections.yml` file and builds a client for
    /// `profile`/`name` in it.
    pub fn from_connections_file(
        path: impl AsRef<Path>,
        profile: &str,
        name: &str,
    ) -> Result<Self, DatabaseAdapterError> {
        let config = read_connections(path)
            .map_err(|err| DatabaseAdapterError::config(err.to_string()))?;
        let details = config
            .get(profile, name)
            .map_err(|err| DatabaseAdapterError::config(err.to_string()))?;
        Self::from_details(details)
    }

    pub fn stages(&self) -> StagesApi {
        StagesApi::new(self.clone())
    }

    pub fn storage_integrations(&self) -> StorageIntegrationsApi {
        StorageIntegrationsApi::new(self.clone())
    }

    pub fn materialized_views(&self) -> MaterializedViewsApi {
        MaterializedViewsApi::new(self.clone())
    }

    /// Validates and renders `opts`, then executes the statement.
    pub(crate) async fn exec(
        &self,
        cancel: &CancellationToken,
        operation: &'static str,
        opts: &dyn SqlOptions,
    ) -> Result<(), SdkError> {
        let sql = ddl_builder::build(opts)?;
        self.round_trip(cancel, operation, &sql, self.adapter.execute(&sql))
            .await
    }

    /// Validates and renders `opts`, runs the query and decodes every row
    /// through the `R` row shape into `T`.
    pub(crate) async fn query<R, T>(
        &self,
        cancel: &CancellationToken,
        operation: &'static str,
        opts: &dyn SqlOptions,
    ) -> Result<Vec<T>, SdkError>
    where
        R: FromRow,
        T: TryFrom<R, Error = crate::rows::DecodeError>,
    {
        let sql = ddl_builder::build(opts)?;
        let rows: Vec<Row> = self
            .round_trip(cancel, operation, &sql, self.adapter.query(&sql))
            .await?;
        debug!(operation, rows = rows.len(), "decoding rows");
        decode_all::<R, T>(&rows).map_err(|err| SdkError::decode(operation, err))
    }

    async fn round_trip<T>(
        &self,
        cancel: &CancellationToken,
        operation: &'static str,
        sql: &str,
        call: impl Future<Output = Result<T, DatabaseAdapterError>> + Send,
    ) -> Result<T, SdkError> {
        if cancel.is_cancelled() {
            debug!(operation, "cancelled before reaching the transport");
            return Err(SdkError::cancelled(operation));
        }
        info!(
            operation,
            statement = %truncate_for_display(sql, MAX_STATEMENT_IN_LOG),
            "running statement"
        );
        let result = logging::timeit!(operation, {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(SdkError::cancelled(operation)),
                res = call => res.map_err(|err| SdkError::transport(operation, sql, err)),
            }
        });
        if let Err(err) = &result {
            warn!(operation, "{err}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::stages::{DropStageRequest, Stages};
    use ddl_builder::SchemaObjectIdentifier;
    use std::io::Write;
    use test_utils::MockAdapter;

    fn stage_id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "SCH", "S").unwrap()
    }

    #[tokio::test]
    async fn pre_cancelled_token_never_reaches_transport() {
        let mock = MockAdapter::new();
        let client = Client::new(mock.shared());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .stages()
            .drop(&cancel, &DropStageRequest::new(stage_id()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(mock.statements().is_empty());
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_pending_call() {
        let mock = MockAdapter::new();
        mock.push_hang();
        let client = Client::new(mock.shared());
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                cancel.cancel();
            })
        };
        let err = client
            .stages()
            .drop(&cancel, &DropStageRequest::new(stage_id()))
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(err, SdkError::Cancelled { operation: "stages.drop" }));
        assert_eq!(mock.statements(), vec![r#"DROP STAGE "DB"."SCH"."S""#]);
    }

    #[test]
    fn builds_from_a_connections_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "dev:\n  analytics:\n    account_url: https://acme.example.com\n    token: t"
        )
        .unwrap();

        assert!(Client::from_connections_file(file.path(), "dev", "analytics").is_ok());
        let err = Client::from_connections_file(file.path(), "prod", "analytics")
            .err()
            .unwrap();
        assert!(matches!(err, DatabaseAdapterError::ConfigError { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn transport_errors_carry_operation_and_statement() {
        let mock = MockAdapter::new();
        mock.push_error(DatabaseAdapterError::syntax("unexpected 'STAGE'"));
        let client = Client::new(mock.shared());

        let err = client
            .stages()
            .drop(&CancellationToken::new(), &DropStageRequest::new(stage_id()))
            .await
            .unwrap_err();
        match err {
            SdkError::Transport {
                operation,
                statement,
                source: DatabaseAdapterError::SyntaxError { .. },
            } => {
                assert_eq!(operation, "stages.drop");
                assert_eq!(statement, r#"DROP STAGE "DB"."SCH"."S""#);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
