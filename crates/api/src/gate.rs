//! Admission gate: fixed-window rate limiting for write requests.
//!
//! One counter per client identity, reset at fixed window boundaries. This
//! is not a sliding window or token bucket: a burst straddling a boundary
//! can be admitted up to `2 * max_requests - 1` times. Intentional: the
//! gate protects the intake pipeline from sustained abuse, not from a
//! single boundary burst.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Fixed-window gate over per-identity counters.
///
/// Owned by the app state, one instance per process; constructible per test.
pub struct AdmissionGate {
    windows: Mutex<HashMap<String, ClientWindow>>,
    config: GateConfig,
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Window duration in milliseconds.
    pub window_ms: i64,
    /// Admitted requests per identity per window.
    pub max_requests: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            window_ms: intake_core::limits::RATE_LIMIT_WINDOW_MS,
            max_requests: intake_core::limits::RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

/// Per-identity window state. `count` stays >= 1 once the entry exists;
/// a request after `window_reset_at` resets it to 1.
struct ClientWindow {
    count: u32,
    /// Absolute expiry, epoch milliseconds.
    window_reset_at: i64,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected { retry_after_secs: u64 },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

impl AdmissionGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Decide whether a request from `identity` may proceed, using the
    /// current wall clock.
    pub fn admit(&self, identity: &str) -> Admission {
        self.admit_at(identity, Utc::now().timestamp_millis())
    }

    /// Admission check at an explicit timestamp (epoch ms).
    ///
    /// The whole decision happens under one lock, so two concurrent
    /// requests cannot both take the last slot in a window.
    pub fn admit_at(&self, identity: &str, now_ms: i64) -> Admission {
        let mut windows = self.windows.lock();

        let Some(window) = windows.get_mut(identity) else {
            windows.insert(
                identity.to_string(),
                ClientWindow {
                    count: 1,
                    window_reset_at: now_ms + self.config.window_ms,
                },
            );
            return Admission::Admitted;
        };

        if now_ms > window.window_reset_at {
            window.count = 1;
            window.window_reset_at = now_ms + self.config.window_ms;
            return Admission::Admitted;
        }

        if window.count >= self.config.max_requests {
            let remaining_ms = (window.window_reset_at - now_ms).max(0) as u64;
            let retry_after_secs = remaining_ms.div_ceil(1000);
            return Admission::Rejected { retry_after_secs };
        }

        window.count += 1;
        Admission::Admitted
    }

    /// Drop entries whose window expired more than one window ago.
    ///
    /// The map would otherwise grow without bound under traffic from many
    /// distinct identities; the binary runs this on a periodic task.
    pub fn sweep(&self) {
        self.sweep_at(Utc::now().timestamp_millis());
    }

    pub fn sweep_at(&self, now_ms: i64) {
        let mut windows = self.windows.lock();
        let before = windows.len();
        let grace = self.config.window_ms;
        windows.retain(|_, w| now_ms <= w.window_reset_at + grace);

        let evicted = before - windows.len();
        if evicted > 0 {
            debug!(evicted, remaining = windows.len(), "Swept stale rate limit windows");
        }
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.windows.lock().len()
    }
}

/// Shared gate handle.
pub type SharedGate = Arc<AdmissionGate>;
