use std::sync::Arc;
use tradeshelf_core::{
    AuditStore, Authenticator, BrowseFacade, Config, SanitizedConfig, SelectionStore,
    SessionStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    sessions: SessionStore,
    /// None when no catalog provider is configured
    browse: Option<BrowseFacade>,
    selection_store: Arc<dyn SelectionStore>,
    audit_store: Arc<dyn AuditStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        browse: Option<BrowseFacade>,
        selection_store: Arc<dyn SelectionStore>,
        audit_store: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            config,
            authenticator,
            sessions: SessionStore::new(),
            browse,
            selection_store,
            audit_store,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn browse(&self) -> Option<&BrowseFacade> {
        self.browse.as_ref()
    }

    pub fn selection_store(&self) -> &dyn SelectionStore {
        self.selection_store.as_ref()
    }

    pub fn audit_store(&self) -> &dyn AuditStore {
        self.audit_store.as_ref()
    }
}
