//! Reduction and memoization engine

mod config;
mod canonicalizer;
mod reducer;
mod orchestrator;

pub use config::{PopulateConfig, MIN_STORED_ORDER};
pub use canonicalizer::{base_case, Canonicalizer};
pub use reducer::{Reducer, Reduction};
pub use orchestrator::{Orchestrator, OrderReport};
