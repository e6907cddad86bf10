//! Storage contracts for the intake service, plus the in-memory document
//! store this deployment runs on.
//!
//! The API layer only ever sees the traits; durability, uniqueness
//! enforcement, and indexing live behind them.

pub mod contact;
pub mod memory;
pub mod portfolio;
pub mod query;

pub use contact::{ContactStatistics, ContactStore};
pub use memory::MemoryStore;
pub use portfolio::{PortfolioFilters, PortfolioListing, PortfolioStore};
pub use query::*;
