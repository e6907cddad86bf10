//! Core types, validation, and spam classification for the agency intake service.

pub mod classify;
pub mod error;
pub mod limits;
pub mod portfolio;
pub mod submission;

pub use classify::*;
pub use error::{Error, Result};
pub use portfolio::*;
pub use submission::*;
