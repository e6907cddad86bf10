//! Internal telemetry for the agency intake service.
//!
//! In-process counters and health state only; no external metrics systems.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
