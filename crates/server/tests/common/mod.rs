//! Common test utilities for end-to-end testing with a mock provider.
//!
//! [`TestFixture`] builds the real router over file-backed SQLite stores in a
//! temp dir, with [`MockCatalogProvider`] standing in for the admin API.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use tradeshelf_core::{
    config::{AuthConfig, BrowseConfig, DatabaseConfig, ProviderConfig, ServerConfig, TraderKey},
    create_authenticator,
    testing::MockCatalogProvider,
    AuditStore, AuthMethod, Authenticator, BrowseFacade, CatalogProvider, Config, SelectionStore,
    SqliteAuditStore, SqliteSelectionStore,
};
use tradeshelf_server::state::AppState;

/// Re-export fixtures for test convenience
pub use tradeshelf_core::testing::fixtures;

/// API key of the default trader in api_key fixtures.
pub const TRADER_KEY: &str = "key-trader-1";

/// Test fixture for end-to-end testing.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock provider - configure products and failures
    pub provider: Arc<MockCatalogProvider>,
    /// Shared state, for inspecting stores directly
    pub state: Arc<AppState>,
    /// Sent as `Authorization: Bearer` on every request when set
    api_key: Option<String>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Wire the mock provider into the browse façade
    pub with_provider: bool,
    /// Use api_key auth with two traders instead of none
    pub api_key_auth: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            with_provider: true,
            api_key_auth: false,
        }
    }
}

impl TestConfig {
    pub fn without_provider() -> Self {
        Self {
            with_provider: false,
            ..Default::default()
        }
    }

    pub fn with_api_keys() -> Self {
        Self {
            api_key_auth: true,
            ..Default::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with the mock provider wired in.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let provider = Arc::new(MockCatalogProvider::new());

        let auth = if test_config.api_key_auth {
            AuthConfig {
                method: AuthMethod::ApiKey,
                traders: vec![
                    TraderKey {
                        trader_id: "trader-1".to_string(),
                        api_key: TRADER_KEY.to_string(),
                    },
                    TraderKey {
                        trader_id: "trader-2".to_string(),
                        api_key: "key-trader-2".to_string(),
                    },
                ],
            }
        } else {
            AuthConfig {
                method: AuthMethod::None,
                traders: Vec::new(),
            }
        };

        let config = Config {
            auth,
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            browse: BrowseConfig::default(),
            provider: test_config.with_provider.then(|| ProviderConfig {
                base_url: "http://mock.invalid".to_string(),
                timeout_secs: 5,
            }),
        };

        let authenticator: Arc<dyn Authenticator> = Arc::from(
            create_authenticator(&config.auth).expect("Failed to create authenticator"),
        );
        let selection_store: Arc<dyn SelectionStore> = Arc::new(
            SqliteSelectionStore::new(&db_path).expect("Failed to create selection store"),
        );
        let audit_store: Arc<dyn AuditStore> = Arc::new(
            SqliteAuditStore::new(&db_path).expect("Failed to create audit store"),
        );

        let browse = test_config.with_provider.then(|| {
            BrowseFacade::new(
                Arc::clone(&provider) as Arc<dyn CatalogProvider>,
                config.browse.clone(),
            )
        });

        let state = Arc::new(AppState::new(
            config,
            authenticator,
            browse,
            selection_store,
            audit_store,
        ));

        let router = tradeshelf_server::api::create_router(Arc::clone(&state));

        Self {
            router,
            provider,
            state,
            api_key: test_config.api_key_auth.then(|| TRADER_KEY.to_string()),
            temp_dir,
        }
    }

    /// Seed the provider with products and put upstream credentials in the
    /// default session.
    pub async fn with_catalog(self, products: Vec<tradeshelf_core::ProductRecord>) -> Self {
        self.provider.set_products(products).await;
        let response = self
            .put(
                "/api/v1/session/upstream",
                json!({"accessToken": "upstream-token", "apiKey": "upstream-key"}),
            )
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        self
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, &[]).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[]).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None, &[]).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body), &[]).await
    }

    /// Send a PATCH request with JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        self.request("PATCH", path, Some(body), &[]).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, &[]).await
    }

    /// Send a request with extra headers.
    ///
    /// An `authorization` entry replaces the fixture's default key; an empty
    /// value sends no authorization at all.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let overrides_auth = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("authorization"));
        if let (Some(key), false) = (&self.api_key, overrides_auth) {
            request_builder = request_builder.header("Authorization", format!("Bearer {}", key));
        }
        for (name, value) in headers {
            if !value.is_empty() {
                request_builder = request_builder.header(*name, *value);
            }
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
