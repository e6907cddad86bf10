//! Common test setup functions.

use api::{router, state::AppState, GateConfig};
use axum::Router;
use std::sync::Arc;
use store::MemoryStore;

/// Test context exercising the production code paths:
/// the real axum router, the real admission gate, and the in-memory store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestContext {
    /// Context with production gate defaults (15 min window, 5 requests).
    pub fn new() -> Self {
        Self::with_gate(GateConfig::default())
    }

    /// Context with a custom gate config; rate limit tests use tiny windows.
    pub fn with_gate(gate: GateConfig) -> Self {
        Self::build(gate, None)
    }

    /// Context with an admin token configured.
    pub fn with_admin_token(token: &str) -> Self {
        Self::build(GateConfig::default(), Some(token.to_string()))
    }

    fn build(gate: GateConfig, admin_token: Option<String>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_gate(store.clone(), store.clone(), gate)
            .with_admin_token(admin_token);

        Self {
            store,
            router: router(state),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
