//! Trader authentication.
//!
//! The HTTP layer turns request headers into an [`AuthRequest`] and asks the
//! configured [`Authenticator`] for an [`Identity`]. The identity's `user_id`
//! is the trader id everything downstream is keyed by.

mod api_key;
mod types;

pub use api_key::*;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{AuthConfig, AuthMethod};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate a request and return the trader identity
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError>;

    /// Name of this authentication method
    fn method_name(&self) -> &'static str;
}

/// Accepts every request as the `anonymous` trader.
///
/// Only used when `auth.method = "none"` is set explicitly.
#[derive(Debug, Default)]
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, _request: &AuthRequest) -> Result<Identity, AuthError> {
        Ok(Identity::anonymous())
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}

/// Factory function to create authenticator from config
pub fn create_authenticator(config: &AuthConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    match config.method {
        AuthMethod::None => Ok(Box::new(NoneAuthenticator::new())),
        AuthMethod::ApiKey => {
            if config.traders.is_empty() {
                return Err(AuthError::ConfigurationError(
                    "at least one trader key must be set when using ApiKey auth method"
                        .to_string(),
                ));
            }
            Ok(Box::new(ApiKeyAuthenticator::new(config.traders.clone())))
        }
    }
}
