use crate::config::connections::ConnectionsConfig;
use crate::config::error::ConfigError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads a `connections.yml` file.
///
/// ```yaml
/// dev:
///   analytics:
///     account_url: https://myorg-myaccount.snowflakecomputing.com
///     token: "..."
///     token_type: KEYPAIR_JWT
///     warehouse: COMPUTE_WH
///     role: SYSADMIN
/// ```
pub fn read_connections(path: impl AsRef<Path>) -> Result<ConnectionsConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::incorrect_path(path));
    }
    debug!("loading connections from {}", path.display());
    let file = fs::File::open(path)?;
    let config: ConnectionsConfig = serde_yaml::from_reader(file)?;

    for (profile, connections) in &config.0 {
        for (name, details) in connections {
            if details.account_url.trim().is_empty() {
                return Err(ConfigError::parse_error(format!(
                    "profile {profile}: connection '{name}' has an empty account_url"
                )));
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::connections::TokenType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write yaml");
        file
    }

    #[test]
    fn reads_profiles_and_connections() {
        let file = write_yaml(
            r#"
dev:
  analytics:
    account_url: https://acme.example.com
    token: abc
    token_type: KEYPAIR_JWT
    warehouse: COMPUTE_WH
    role: SYSADMIN
"#,
        );

        let config = read_connections(file.path()).expect("config loads");
        let details = config.get("dev", "analytics").expect("connection exists");
        assert_eq!(details.account_url, "https://acme.example.com");
        assert_eq!(details.token_type, TokenType::KeypairJwt);
        assert_eq!(details.warehouse.as_deref(), Some("COMPUTE_WH"));
        assert_eq!(details.database, None);
    }

    #[test]
    fn token_type_defaults_to_oauth() {
        let file = write_yaml("dev:\n  a:\n    account_url: https://x\n    token: t\n");
        let config = read_connections(file.path()).unwrap();
        assert_eq!(config.get("dev", "a").unwrap().token_type, TokenType::Oauth);
    }

    #[test]
    fn missing_file_is_incorrect_path() {
        let err = read_connections("/definitely/not/here/connections.yml").unwrap_err();
        assert!(matches!(err, ConfigError::IncorrectPath { .. }));
    }

    #[test]
    fn empty_account_url_is_rejected() {
        let file = write_yaml("dev:\n  a:\n    account_url: ''\n    token: t\n");
        let err = read_connections(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let file = write_yaml("dev: [unterminated");
        assert!(matches!(
            read_connections(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
