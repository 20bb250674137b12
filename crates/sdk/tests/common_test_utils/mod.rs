#![allow(dead_code)]

use shared_clients::{Row, Value};
use snowflake_sdk::{Client, SchemaObjectIdentifier};
use test_utils::MockAdapter;

pub fn client() -> (MockAdapter, Client) {
    test_utils::init_test_logging();
    let mock = MockAdapter::new();
    let client = Client::new(mock.shared());
    (mock, client)
}

pub fn schema_object(db: &str, schema: &str, name: &str) -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new(db, schema, name).unwrap()
}

/// Every combination of null and non-null values for `nullable`, on top of
/// the fixed `required` columns. Yields `2^nullable.len()` rows.
pub fn null_combinations(required: &[(&str, Value)], nullable: &[(&str, Value)]) -> Vec<Row> {
    (0..1usize << nullable.len())
        .map(|mask| null_combination(required, nullable, mask))
        .collect()
}

/// One row where bit `n` of `mask` decides whether `nullable[n]` is present.
pub fn null_combination(required: &[(&str, Value)], nullable: &[(&str, Value)], mask: usize) -> Row {
    let mut row = Row::new();
    for (column, value) in required {
        row.push(*column, value.clone());
    }
    for (bit, (column, value)) in nullable.iter().enumerate() {
        if mask & (1 << bit) == 0 {
            row.push(*column, Value::Null);
        } else {
            row.push(*column, value.clone());
        }
    }
    row
}

pub fn stage_row(database: &str, schema: &str, name: &str) -> Row {
    Row::new()
        .with("created_on", "2024-03-01 10:00:00.000 +0000")
        .with("name", name)
        .with("database_name", database)
        .with("schema_name", schema)
        .with("url", "")
        .with("has_credentials", "N")
        .with("has_encryption_key", "N")
        .with("owner", "SYSADMIN")
        .with("comment", "")
        .with("region", Value::Null)
        .with("type", "INTERNAL")
        .with("cloud", Value::Null)
        .with("notification_channel", Value::Null)
        .with("storage_integration", Value::Null)
        .with("endpoint", Value::Null)
        .with("owner_role_type", "ROLE")
        .with("directory_enabled", "N")
}
