use crate::rows::{non_empty, BoolConvention, DecodeError, FromRow, RowReader};
use chrono::{DateTime, Utc};
use shared_clients::Row;

/// Raw `SHOW STORAGE INTEGRATIONS` row.
#[derive(Debug, Clone)]
pub struct StorageIntegrationRow {
    name: String,
    integration_type: String,
    category: String,
    enabled: String,
    comment: Option<String>,
    created_on: DateTime<Utc>,
}

impl FromRow for StorageIntegrationRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            name: r.text("name")?,
            integration_type: r.text("type")?,
            category: r.text("category")?,
            enabled: r.text("enabled")?,
            comment: r.opt_text("comment")?,
            created_on: r.timestamp("created_on")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageIntegration {
    pub name: String,
    pub integration_type: String,
    pub category: String,
    pub enabled: bool,
    pub comment: Option<String>,
    pub created_on: DateTime<Utc>,
}

impl TryFrom<StorageIntegrationRow> for StorageIntegration {
    type Error = DecodeError;

    fn try_from(row: StorageIntegrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: BoolConvention::TrueFalse.parse("enabled", &row.enabled)?,
            name: row.name,
            integration_type: row.integration_type,
            category: row.category,
            comment: non_empty(row.comment),
            created_on: row.created_on,
        })
    }
}

/// Raw `DESCRIBE STORAGE INTEGRATION` row.
#[derive(Debug, Clone)]
pub struct StorageIntegrationPropertyRow {
    property: String,
    property_type: String,
    property_value: Option<String>,
    property_default: Option<String>,
}

impl FromRow for StorageIntegrationPropertyRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            property: r.text("property")?,
            property_type: r.text("property_type")?,
            property_value: r.opt_text("property_value")?,
            property_default: r.opt_text("property_default")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageIntegrationProperty {
    pub name: String,
    pub kind: String,
    pub value: Option<String>,
    pub default: Option<String>,
}

impl StorageIntegrationProperty {
    /// List-typed properties (allowed and blocked locations) split on commas.
    pub fn values(&self) -> Vec<&str> {
        self.value
            .as_deref()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TryFrom<StorageIntegrationPropertyRow> for StorageIntegrationProperty {
    type Error = DecodeError;

    fn try_from(row: StorageIntegrationPropertyRow) -> Result<Self, Self::Error> {
        Ok(Self {
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

    #[test]
    fn decodes_show_row() {
        let row = Row::new()
            .with("name", "S3_INT")
            .with("type", "EXTERNAL_STAGE")
            .with("category", "STORAGE")
            .with("enabled", "true")
            .with("comment", Value::Null)
            .with("created_on", Value::Int(1_700_000_000));
        let integrations =
            decode_all::<StorageIntegrationRow, StorageIntegration>(&[row]).unwrap();
        assert!(integrations[0].enabled);
        assert_eq!(integrations[0].comment, None);
        assert_eq!(integrations[0].created_on.timestamp(), 1_700_000_000);
    }

    #[test]
    fn list_properties_split() {
        let row = Row::new()
            .with("property", "STORAGE_ALLOWED_LOCATIONS")
            .with("property_type", "List")
            .with("property_value", "s3://a/,s3://b/")
            .with("property_default", "[]");
        let properties =
            decode_all::<StorageIntegrationPropertyRow, StorageIntegrationProperty>(&[row])
                .unwrap();
        assert_eq!(properties[0].values(), vec!["s3://a/", "s3://b/"]);
    }
}
