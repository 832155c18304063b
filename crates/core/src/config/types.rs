use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// Trader API keys (required when method = "api_key").
    #[serde(default)]
    pub traders: Vec<TraderKey>,
}

/// One trader allowed to call the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraderKey {
    pub trader_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    ApiKey,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tradeshelf.db")
}

/// Paging defaults applied at the browse boundary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowseConfig {
    /// Page size used when the caller does not pass one.
    #[serde(default = "default_page_limit")]
    pub default_limit: u32,
    /// Largest page size forwarded to the provider.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_page_limit() -> u32 {
    20
}

fn default_max_limit() -> u32 {
    100
}

/// Upstream admin catalog API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Base URL of the admin API (e.g., "http://admin.internal/api/v1/admin").
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub browse: BrowseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    /// Trader ids with a configured key; the keys themselves are never exposed.
    pub traders: Vec<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::ApiKey => "api_key".to_string(),
                },
                traders: config
                    .auth
                    .traders
                    .iter()
                    .map(|t| t.trader_id.clone())
                    .collect(),
            },
            server: config.server.clone(),
            database: config.database.clone(),
            browse: config.browse.clone(),
            provider: config.provider.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_valid_config_with_none_auth() {
        let toml = r#"
[auth]
method = "none"

[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auth.method, AuthMethod::None);
        assert!(config.auth.traders.is_empty());
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[auth]
method = "none"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "tradeshelf.db");
        assert_eq!(config.browse.default_limit, 20);
        assert_eq!(config.browse.max_limit, 100);
        assert!(config.provider.is_none());
    }

    #[test]
    fn test_deserialize_missing_auth_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_api_key_traders() {
        let toml = r#"
[auth]
method = "api_key"

[[auth.traders]]
trader_id = "trader-1"
api_key = "key-one"

[[auth.traders]]
trader_id = "trader-2"
api_key = "key-two"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auth.method, AuthMethod::ApiKey);
        assert_eq!(config.auth.traders.len(), 2);
        assert_eq!(config.auth.traders[1].trader_id, "trader-2");
    }

    #[test]
    fn test_deserialize_provider_config() {
        let toml = r#"
[auth]
method = "none"

[provider]
base_url = "http://localhost:8000/api/v1/admin"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let provider = config.provider.unwrap();
        assert_eq!(provider.base_url, "http://localhost:8000/api/v1/admin");
        assert_eq!(provider.timeout_secs, 30); // default
    }

    #[test]
    fn test_sanitized_config_hides_keys() {
        let config = Config {
            auth: AuthConfig {
                method: AuthMethod::ApiKey,
                traders: vec![TraderKey {
                    trader_id: "trader-1".to_string(),
                    api_key: "super-secret".to_string(),
                }],
            },
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            browse: BrowseConfig::default(),
            provider: None,
        };

        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.auth.method, "api_key");
        assert_eq!(sanitized.auth.traders, vec!["trader-1".to_string()]);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("\"provider\""));
    }
}
