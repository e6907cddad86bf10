//! Application state shared across handlers.

use crate::gate::{AdmissionGate, GateConfig, SharedGate};
use std::sync::Arc;
use std::time::Duration;
use store::{ContactStore, PortfolioStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Contact submission storage.
    pub contacts: Arc<dyn ContactStore>,
    /// Portfolio storage.
    pub portfolio: Arc<dyn PortfolioStore>,
    /// Admission gate for write endpoints.
    pub gate: SharedGate,
    /// Bearer token required on admin routes; open when unset.
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(contacts: Arc<dyn ContactStore>, portfolio: Arc<dyn PortfolioStore>) -> Self {
        Self::with_gate(contacts, portfolio, GateConfig::default())
    }

    /// Create with a custom gate config (tests use small windows).
    pub fn with_gate(
        contacts: Arc<dyn ContactStore>,
        portfolio: Arc<dyn PortfolioStore>,
        gate_config: GateConfig,
    ) -> Self {
        Self {
            contacts,
            portfolio,
            gate: Arc::new(AdmissionGate::new(gate_config)),
            admin_token: None,
        }
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token;
        self
    }

    /// Start the periodic gate sweep that evicts stale windows.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_gate_sweep(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let gate = self.gate.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                gate.sweep();
            }
        })
    }
}
