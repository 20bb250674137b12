use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

///  ---------------- Connections Config ----------------
///
/// Map of connection profiles (e.g. `dev`) to named warehouse connections
/// (e.g. `analytics`).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ConnectionsConfig(pub HashMap<String, HashMap<String, WarehouseConnectionDetails>>);

impl ConnectionsConfig {
    #[track_caller]
    pub fn get(
        &self,
        profile: &str,
        name: &str,
    ) -> Result<&WarehouseConnectionDetails, ConfigError> {
        let connections = self.0.get(profile).ok_or_else(|| {
            ConfigError::not_found(format!("connection profile '{profile}' is not defined"))
        })?;
        connections.get(name).ok_or_else(|| {
            ConfigError::not_found(format!(
                "connection '{name}' is not defined in profile '{profile}'"
            ))
        })
    }
}

/// How the `token` of a connection should be presented to the warehouse.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    #[default]
    Oauth,
    KeypairJwt,
    ProgrammaticAccessToken,
}

impl TokenType {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            TokenType::Oauth => "OAUTH",
            TokenType::KeypairJwt => "KEYPAIR_JWT",
            TokenType::ProgrammaticAccessToken => "PROGRAMMATIC_ACCESS_TOKEN",
        }
    }
}

#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct WarehouseConnectionDetails {
    /// Base URL of the account, e.g. `https://myorg-myaccount.snowflakecomputing.com`.
    pub account_url: String,
    pub token: String,
    #[serde(default)]
    pub token_type: TokenType,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl WarehouseConnectionDetails {
    pub fn new(account_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account_url: account_url.into(),
            token: token.into(),
            token_type: TokenType::default(),
            warehouse: None,
            database: None,
            schema: None,
            role: None,
        }
    }
}

impl fmt::Debug for WarehouseConnectionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseConnectionDetails")
            .field("account_url", &self.account_url)
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let details = WarehouseConnectionDetails::new("https://acme.example.com", "s3cr3t");
        let printed = format!("{details:?}");
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn lookup_reports_missing_profile_and_name() {
        let mut inner = HashMap::new();
        inner.insert(
            "dev".to_string(),
            HashMap::from([(
                "analytics".to_string(),
                WarehouseConnectionDetails::new("https://acme.example.com", "t"),
            )]),
        );
        let config = ConnectionsConfig(inner);

        assert!(config.get("dev", "analytics").is_ok());
        assert!(matches!(
            config.get("prod", "analytics"),
            Err(ConfigError::NotFound { .. })
        ));
        let err = config.get("dev", "reporting").unwrap_err();
        assert!(err.to_string().contains("reporting"));
    }
}
