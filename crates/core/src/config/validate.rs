use std::collections::HashSet;

use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - api_key auth has at least one trader, no empty ids or keys, and no
///   trader id or key used twice
/// - Browse page limits are usable
/// - Provider base URL is not empty and the timeout is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::ApiKey {
        if config.auth.traders.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.traders must not be empty when using api_key auth".to_string(),
            ));
        }
        if let Some(bad) = config
            .auth
            .traders
            .iter()
            .find(|t| t.trader_id.is_empty() || t.api_key.is_empty())
        {
            return Err(ConfigError::ValidationError(format!(
                "auth.traders entry '{}' needs both trader_id and api_key",
                bad.trader_id
            )));
        }

        let mut trader_ids = HashSet::new();
        let mut api_keys = HashSet::new();
        for trader in &config.auth.traders {
            if !trader_ids.insert(trader.trader_id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "auth.traders has trader_id '{}' more than once",
                    trader.trader_id
                )));
            }
            // A shared key would resolve to a single trader
            if !api_keys.insert(trader.api_key.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "auth.traders entry '{}' reuses another trader's api_key",
                    trader.trader_id
                )));
            }
        }
    }

    let browse = &config.browse;
    if browse.default_limit == 0 || browse.default_limit > browse.max_limit {
        return Err(ConfigError::ValidationError(format!(
            "browse.default_limit must be between 1 and browse.max_limit ({})",
            browse.max_limit
        )));
    }

    if let Some(provider) = &config.provider {
        if provider.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.base_url cannot be empty".to_string(),
            ));
        }
        if provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "provider.timeout_secs cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AuthConfig, BrowseConfig, DatabaseConfig, ProviderConfig, ServerConfig, TraderKey,
    };

    fn base_config() -> Config {
        Config {
            auth: AuthConfig {
                method: AuthMethod::None,
                traders: vec![],
            },
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            browse: BrowseConfig::default(),
            provider: None,
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = base_config();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_api_key_without_traders_fails() {
        let mut config = base_config();
        config.auth.method = AuthMethod::ApiKey;
        assert!(validate_config(&config).is_err());

        config.auth.traders.push(TraderKey {
            trader_id: "trader-1".to_string(),
            api_key: "key".to_string(),
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = base_config();
        config.auth.method = AuthMethod::ApiKey;
        config.auth.traders.push(TraderKey {
            trader_id: "trader-1".to_string(),
            api_key: String::new(),
        });
        assert!(validate_config(&config).is_err());
    }

    fn trader(trader_id: &str, api_key: &str) -> TraderKey {
        TraderKey {
            trader_id: trader_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    #[test]
    fn test_validate_shared_api_key_fails() {
        let mut config = base_config();
        config.auth.method = AuthMethod::ApiKey;
        config.auth.traders = vec![trader("alice", "same"), trader("bob", "same")];

        let result = validate_config(&config);
        assert!(
            matches!(result, Err(ConfigError::ValidationError(ref msg)) if msg.contains("bob"))
        );
    }

    #[test]
    fn test_validate_duplicate_trader_id_fails() {
        let mut config = base_config();
        config.auth.method = AuthMethod::ApiKey;
        config.auth.traders = vec![trader("alice", "key-1"), trader("alice", "key-2")];
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        config.auth.traders[1].trader_id = "bob".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_browse_limits() {
        let mut config = base_config();
        config.browse.default_limit = 0;
        assert!(validate_config(&config).is_err());

        config.browse.default_limit = 200;
        config.browse.max_limit = 100;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_provider_url_fails() {
        let mut config = base_config();
        config.provider = Some(ProviderConfig {
            base_url: "  ".to_string(),
            timeout_secs: 30,
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_provider_timeout_fails() {
        let mut config = base_config();
        config.provider = Some(ProviderConfig {
            base_url: "http://admin.local".to_string(),
            timeout_secs: 0,
        });
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        if let Some(provider) = config.provider.as_mut() {
            provider.timeout_secs = 1;
        }
        assert!(validate_config(&config).is_ok());
    }
}
