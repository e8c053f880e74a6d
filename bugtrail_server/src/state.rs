//! Shared application state injected into every handler.

use std::sync::Arc;

use bugtrail_config::ServerConfig;
use bugtrail_conversation::{ExtractionService, RoleplayService};

/// Immutable after startup; handlers only read it.
pub struct AppState {
    pub config: ServerConfig,
    pub roleplay: RoleplayService,
    pub extraction: ExtractionService,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        roleplay: RoleplayService,
        extraction: ExtractionService,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            roleplay,
            extraction,
        })
    }

    /// Offline-only state with default server settings.
    #[must_use]
    pub fn offline() -> Arc<Self> {
        Self::new(
            ServerConfig::default(),
            RoleplayService::new(None),
            ExtractionService::new(None),
        )
    }
}
