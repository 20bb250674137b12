use crate::rows::{non_empty, BoolConvention, DecodeError, FromRow, RowReader};
use chrono::{DateTime, Utc};
use shared_clients::Row;

/// Raw `SHOW MATERIALIZED VIEWS` row.
#[derive(Debug, Clone)]
pub struct MaterializedViewRow {
    created_on: DateTime<Utc>,
    name: String,
    reserved: Option<String>,
    database_name: String,
    schema_name: String,
    cluster_by: Option<String>,
    rows: Option<i64>,
    bytes: Option<i64>,
    source_database_name: Option<String>,
    source_schema_name: Option<String>,
    source_table_name: Option<String>,
    refreshed_on: Option<DateTime<Utc>>,
    compacted_on: Option<DateTime<Utc>>,
    owner: Option<String>,
    invalid: String,
    invalid_reason: Option<String>,
    behind_by: Option<String>,
    comment: Option<String>,
    text: Option<String>,
    is_secure: String,
    automatic_clustering: Option<String>,
    owner_role_type: Option<String>,
    budget: Option<String>,
}

impl FromRow for MaterializedViewRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            created_on: r.timestamp("created_on")?,
            name: r.text("name")?,
            reserved: r.opt_text("reserved")?,
            database_name: r.text("database_name")?,
            schema_name: r.text("schema_name")?,
            cluster_by: r.opt_text("cluster_by")?,
            rows: r.opt_int("rows")?,
            bytes: r.opt_int("bytes")?,
            source_database_name: r.opt_text("source_database_name")?,
            source_schema_name: r.opt_text("source_schema_name")?,
            source_table_name: r.opt_text("source_table_name")?,
            refreshed_on: r.opt_timestamp("refreshed_on")?,
            compacted_on: r.opt_timestamp("compacted_on")?,
            owner: r.opt_text("owner")?,
            invalid: r.text("invalid")?,
            invalid_reason: r.opt_text("invalid_reason")?,
            behind_by: r.opt_text("behind_by")?,
            comment: r.opt_text("comment")?,
            text: r.opt_text("text")?,
            is_secure: r.text("is_secure")?,
            automatic_clustering: r.opt_text("automatic_clustering")?,
            owner_role_type: r.opt_text("owner_role_type")?,
            budget: r.opt_text("budget")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedView {
    pub created_on: DateTime<Utc>,
    pub name: String,
    pub reserved: Option<String>,
    pub database_name: String,
    pub schema_name: String,
    pub cluster_by: Option<String>,
    pub rows: Option<i64>,
    pub bytes: Option<i64>,
    pub source_database_name: Option<String>,
    pub source_schema_name: Option<String>,
    pub source_table_name: Option<String>,
    pub refreshed_on: Option<DateTime<Utc>>,
    pub compacted_on: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub invalid: bool,
    pub invalid_reason: Option<String>,
    pub behind_by: Option<String>,
    pub comment: Option<String>,
    pub text: Option<String>,
    pub is_secure: bool,
    pub automatic_clustering: bool,
    pub owner_role_type: Option<String>,
    pub budget: Option<String>,
}

impl TryFrom<MaterializedViewRow> for MaterializedView {
    type Error = DecodeError;

    fn try_from(row: MaterializedViewRow) -> Result<Self, Self::Error> {
        let true_false = BoolConvention::TrueFalse;
        Ok(Self {
            invalid: true_false.parse("invalid", &row.invalid)?,
            is_secure: true_false.parse("is_secure", &row.is_secure)?,
            automatic_clustering: BoolConvention::OnOff
                .parse_opt("automatic_clustering", row.automatic_clustering.as_deref())?
                .unwrap_or_default(),
            created_on: row.created_on,
            name: row.name,
            reserved: non_empty(row.reserved),
            database_name: row.database_name,
            schema_name: row.schema_name,
            cluster_by: non_empty(row.cluster_by),
            rows: row.rows,
            bytes: row.bytes,
            source_database_name: non_empty(row.source_database_name),
            source_schema_name: non_empty(row.source_schema_name),
            source_table_name: non_empty(row.source_table_name),
            refreshed_on: row.refreshed_on,
            compacted_on: row.compacted_on,
            owner: non_empty(row.owner),
            invalid_reason: non_empty(row.invalid_reason),
            behind_by: non_empty(row.behind_by),
            comment: non_empty(row.comment),
            text: non_empty(row.text),
            owner_role_type: non_empty(row.owner_role_type),
            budget: non_empty(row.budget),
        })
    }
}

/// Raw `DESCRIBE MATERIALIZED VIEW` row.
#[derive(Debug, Clone)]
pub struct MaterializedViewColumnRow {
    name: String,
    column_type: String,
    kind: String,
    null: String,
    default: Option<String>,
    primary_key: String,
    unique_key: String,
    check: Option<String>,
    expression: Option<String>,
    comment: Option<String>,
}

impl FromRow for MaterializedViewColumnRow {
    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        let r = RowReader::new(row);
        Ok(Self {
            name: r.text("name")?,
            column_type: r.text("type")?,
            kind: r.text("kind")?,
            null: r.text("null?")?,
            default: r.opt_text("default")?,
            primary_key: r.text("primary key")?,
            unique_key: r.text("unique key")?,
            check: r.opt_text("check")?,
            expression: r.opt_text("expression")?,
            comment: r.opt_text("comment")?,
        })
    }
}

/// One column of a materialized view as reported by `DESCRIBE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedViewColumn {
    pub name: String,
    pub column_type: String,
    pub kind: String,
    pub is_nullable: bool,
    pub default: Option<String>,
    pub is_primary: bool,
    pub is_unique: bool,
    pub check: Option<bool>,
    pub expression: Option<String>,
    pub comment: Option<String>,
}

impl TryFrom<MaterializedViewColumnRow> for MaterializedViewColumn {
    type Error = DecodeError;

    fn try_from(row: MaterializedViewColumnRow) -> Result<Self, Self::Error> {
        let yes_no = BoolConvention::YesNo;
        Ok(Self {
            is_nullable: yes_no.parse("null?", &row.null)?,
            is_primary: yes_no.parse("primary key", &row.primary_key)?,
            is_unique: yes_no.parse("unique key", &row.unique_key)?,
            check: yes_no.parse_opt("check", non_empty(row.check).as_deref())?,
            name: row.name,
            column_type: row.column_type,
            kind: row.kind,
            default: non_empty(row.default),
            expression: non_empty(row.expression),
            comment: non_empty(row.comment),
        })
    }
}
