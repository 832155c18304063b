pub mod audit;
pub mod auth;
pub mod browse;
pub mod config;
pub mod metrics;
pub mod provider;
pub mod selection;
pub mod session;
pub mod testing;

pub use audit::{AuditAction, AuditError, AuditFilter, AuditRecord, AuditStore, SqliteAuditStore};
pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, Identity, NoneAuthenticator,
};
pub use browse::{BrowseError, BrowseFacade, BrowseParams, BrowseResult};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    SanitizedConfig,
};
pub use provider::{
    AdminApiClient, AdminApiConfig, CatalogProvider, CategoryRef, ProductRecord, ProviderError,
    UpstreamCredentials,
};
pub use selection::{
    save_cart, SaveSummary, SelectionError, SelectionStats, SelectionStore, SqliteSelectionStore,
    TraderProductUpdate, TraderProductView,
};
pub use session::{SessionData, SessionStore};
