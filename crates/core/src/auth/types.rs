use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Request information for authentication
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub headers: HashMap<String, String>,
    pub source_ip: IpAddr,
}

/// Authenticated identity. `user_id` is the trader id used for
/// trader-product links and audit rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub method: String,
    pub claims: HashMap<String, serde_json::Value>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::trader("anonymous", "none")
    }

    pub fn trader(trader_id: &str, method: &str) -> Self {
        Self {
            user_id: trader_id.to_string(),
            method: method.to_string(),
            claims: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        let identity = Identity::anonymous();
        assert_eq!(identity.user_id, "anonymous");
        assert_eq!(identity.method, "none");
        assert!(identity.claims.is_empty());
    }

    #[test]
    fn test_trader_identity_roundtrips_through_json() {
        let identity = Identity::trader("trader-7", "api_key");

        let json = serde_json::to_string(&identity).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.user_id, "trader-7");
        assert_eq!(parsed.method, "api_key");
    }
}
