use crate::rows::{non_empty, BoolConvention, DecodeError, FromRow, RowReader};
use chrono::{DateTime, Utc};
use shared_clients::Row;

/// Raw `SHOW STAGES` row.
#[derive(Debug, Clone)]
pub struct StageRow {
    created_on: DateTime<Utc>,
    name: String,
    database_name: String,
    schema_name: String,
    url: Option<String>,
    has_credentials: String,
    has_encryption_key: String,
    owner: Option<String>,
    comment: Option<String>,
    region: Option<String>,
    stage_type: String,
    cloud: Option<String>,
    notification_channel: Option<String>,
    storage_integration: Option<String>,
    endpoint: Option<String>,
    owner_role_type: Option<String>,
    directory_enabled: Option<String>,
}

impl FromRow for StageRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            created_on: r.timestamp("created_on")?,
            name: r.text("name")?,
            database_name: r.text("database_name")?,
            schema_name: r.text("schema_name")?,
            url: r.opt_text("url")?,
            has_credentials: r.text("has_credentials")?,
            has_encryption_key: r.text("has_encryption_key")?,
            owner: r.opt_text("owner")?,
            comment: r.opt_text("comment")?,
            region: r.opt_text("region")?,
            stage_type: r.text("type")?,
            cloud: r.opt_text("cloud")?,
            notification_channel: r.opt_text("notification_channel")?,
            storage_integration: r.opt_text("storage_integration")?,
            endpoint: r.opt_text("endpoint")?,
            owner_role_type: r.opt_text("owner_role_type")?,
            directory_enabled: r.opt_text("directory_enabled")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub created_on: DateTime<Utc>,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub url: Option<String>,
    pub has_credentials: bool,
    pub has_encryption_key: bool,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub region: Option<String>,
    pub stage_type: String,
    pub cloud: Option<String>,
    pub notification_channel: Option<String>,
    pub storage_integration: Option<String>,
    pub endpoint: Option<String>,
    pub owner_role_type: Option<String>,
    pub directory_enabled: bool,
}

impl TryFrom<StageRow> for Stage {
    type Error = DecodeError;

    fn try_from(row: StageRow) -> Result<Self, Self::Error> {
        let yes_no = BoolConvention::YesNo;
        Ok(Self {
            created_on: row.created_on,
            has_credentials: yes_no.parse("has_credentials", &row.has_credentials)?,
            has_encryption_key: yes_no.parse("has_encryption_key", &row.has_encryption_key)?,
            directory_enabled: yes_no
                .parse_opt("directory_enabled", row.directory_enabled.as_deref())?
                .unwrap_or_default(),
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            url: non_empty(row.url),
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            region: non_empty(row.region),
            stage_type: row.stage_type,
            cloud: non_empty(row.cloud),
            notification_channel: non_empty(row.notification_channel),
            storage_integration: non_empty(row.storage_integration),
            endpoint: non_empty(row.endpoint),
            owner_role_type: non_empty(row.owner_role_type),
        })
    }
}

/// Raw `DESCRIBE STAGE` row.
#[derive(Debug, Clone)]
pub struct StagePropertyRow {
    parent_property: String,
    property: String,
    property_type: String,
    property_value: Option<String>,
    property_default: Option<String>,
}

impl FromRow for StagePropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            parent_property: r.text("parent_property")?,
            property: r.text("property")?,
            property_type: r.text("property_type")?,
            property_value: r.opt_text("property_value")?,
            property_default: r.opt_text("property_default")?,
        })
    }
}

/// One property of a stage, grouped under its parent (`STAGE_LOCATION`,
/// `DIRECTORY`, `STAGE_FILE_FORMAT`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProperty {
    pub parent: String,
    pub name: String,
    pub kind: String,
    pub value: Option<String>,
    pub default: Option<String>,
}

impl TryFrom<StagePropertyRow> for StageProperty {
    type Error = DecodeError;

    fn try_from(row: StagePropertyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            parent: row.parent_property,
            name: row.property,
            kind: row.property_type,
            value: row.property_value,
            default: row.property_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::decode_all;
    use shared_clients::Value;

    fn show_row() -> Row {
        show_row_flagged("N")
    }

    fn show_row_flagged(has_credentials: &str) -> Row {
        Row::new()
            .with("created_on", "2024-03-01 10:00:00.000 +0000")
            .with("name", "MY_STAGE")
            .with("database_name", "DB")
            .with("schema_name", "SCH")
            .with("url", "s3://bucket/")
            .with("has_credentials", has_credentials)
            .with("has_encryption_key", "Y")
            .with("owner", "SYSADMIN")
            .with("comment", "")
            .with("region", Value::Null)
            .with("type", "EXTERNAL")
            .with("cloud", "AWS")
            .with("notification_channel", Value::Null)
            .with("storage_integration", "S3_INT")
            .with("endpoint", Value::Null)
            .with("owner_role_type", "ROLE")
            .with("directory_enabled", "Y")
    }

    #[test]
    fn decodes_show_row() {
        let stages = decode_all::<StageRow, Stage>(&[show_row()]).unwrap();
        let stage = &stages[0];
        assert_eq!(stage.name, "MY_STAGE");
        assert!(!stage.has_credentials);
        assert!(stage.has_encryption_key);
        assert!(stage.directory_enabled);
        assert_eq!(stage.comment, None);
        assert_eq!(stage.region, None);
        assert_eq!(stage.storage_integration.as_deref(), Some("S3_INT"));
    }

    #[test]
    fn bad_flag_names_the_column() {
        let row = show_row_flagged("perhaps");
        let err = decode_all::<StageRow, Stage>(&[row]).unwrap_err();
        assert_eq!(err.column(), "has_credentials");
    }
}
