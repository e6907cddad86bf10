//! HTTP API layer for the intake service.

pub mod extractors;
pub mod gate;
pub mod response;
pub mod routes;
pub mod state;

pub use gate::{Admission, AdmissionGate, GateConfig};
pub use routes::router;
pub use state::AppState;
