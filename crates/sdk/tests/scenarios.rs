mod common_test_utils;

use common_test_utils::{client, schema_object};
use pretty_assertions::assert_eq;
use snowflake_sdk::stages::{
    CreateInternalStageRequest, DropStageRequest, InternalStageEncryptionType, Stages,
};
use snowflake_sdk::storage_integrations::{AlterStorageIntegrationRequest, StorageIntegrations};
use snowflake_sdk::{AccountObjectIdentifier, CancellationToken, ErrorKind, SdkError};

#[tokio::test]
async fn drop_stage_if_exists() -> anyhow::Result<()> {
    let (mock, client) = client();
    let request =
        DropStageRequest::new(schema_object("DB", "SCH", "MY_STAGE")).with_if_exists(true);

    client.stages().drop(&CancellationToken::new(), &request).await?;

    assert_eq!(
        mock.statements(),
        vec![r#"DROP STAGE IF EXISTS "DB"."SCH"."MY_STAGE""#]
    );
    Ok(())
}

#[tokio::test]
async fn create_internal_stage_minimal() -> anyhow::Result<()> {
    let (mock, client) = client();
    let request = CreateInternalStageRequest::new(schema_object("DB", "SCH", "S"));

    client
        .stages()
        .create_internal(&CancellationToken::new(), &request)
        .await?;

    assert_eq!(mock.last_statement().as_deref(), Some(r#"CREATE STAGE "DB"."SCH"."S""#));
    Ok(())
}

#[tokio::test]
async fn create_internal_stage_with_encryption_and_comment() -> anyhow::Result<()> {
    let (mock, client) = client();
    let request = CreateInternalStageRequest::new(schema_object("DB", "SCH", "S"))
        .with_encryption(InternalStageEncryptionType::SnowflakeFull)
        .with_comment("hello");

    client
        .stages()
        .create_internal(&CancellationToken::new(), &request)
        .await?;

    assert_eq!(
        mock.last_statement().as_deref(),
        Some(r#"CREATE STAGE "DB"."SCH"."S" ENCRYPTION = (TYPE = 'SNOWFLAKE_FULL') COMMENT = 'hello'"#)
    );
    Ok(())
}

#[tokio::test]
async fn conflicting_create_flags_never_reach_the_transport() {
    let (mock, client) = client();
    let request = CreateInternalStageRequest::new(schema_object("DB", "SCH", "S"))
        .with_or_replace(true)
        .with_if_not_exists(true);

    let err = client
        .stages()
        .create_internal(&CancellationToken::new(), &request)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    let build_error = err.build_error().expect("validation carries the builder error");
    assert_eq!(build_error.fields(), vec!["or_replace", "if_not_exists"]);
    assert!(mock.statements().is_empty());
}

#[tokio::test]
async fn alter_storage_integration_without_action() {
    let (mock, client) = client();
    let request = AlterStorageIntegrationRequest::new(AccountObjectIdentifier::new("I").unwrap());

    let err = client
        .storage_integrations()
        .alter(&CancellationToken::new(), &request)
        .await
        .unwrap_err();

    let SdkError::Validation { source } = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(source.struct_name(), "AlterStorageIntegrationOptions");
    assert_eq!(source.fields(), vec!["set", "unset", "set_tags", "unset_tags"]);
    assert!(mock.statements().is_empty());
}

#[tokio::test]
async fn show_stage_by_id_not_found() {
    let (mock, client) = client();
    mock.push_rows(vec![]);

    let err = client
        .stages()
        .show_by_id(&CancellationToken::new(), &schema_object("DB", "SCH", "X"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        mock.statements(),
        vec![r#"SHOW STAGES LIKE 'X' IN SCHEMA "DB"."SCH""#]
    );
}
