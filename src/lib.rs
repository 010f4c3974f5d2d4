//! # indpoly: memoized independence polynomials of trees
//!
//! Computes the independence polynomial of every non-isomorphic tree up to a
//! bounded order. Each tree is reduced through the recurrence
//!
//! ```text
//! I(T, x) = I(T - v, x) + x * I(T - N[v], x)
//! ```
//!
//! and every sub-tree produced by the reduction is mapped onto its canonical
//! representative so its polynomial can be looked up in a store instead of
//! being recomputed.
//!
//! ## Layout
//!
//! - **Algebra**: trees, forests, dense polynomials, tree enumeration
//! - **Graph**: petgraph conversion and the isomorphism oracle
//! - **Core**: canonicalizer, reducer, order-by-order orchestrator
//! - **Store**: in-memory and JSON-file polynomial stores

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Trees, forests, polynomials and tree enumeration
pub mod algebra;

/// Graph conversion and isomorphism testing
pub mod graph;

/// Reduction and memoization engine
pub mod core;

/// Persistent polynomial stores
pub mod store;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use algebra::{
    Forest, GraftingEnumerator, Polynomial, PolynomialAlgebra, Tree, TreeEnumerator,
};
pub use crate::core::{Canonicalizer, Orchestrator, OrderReport, PopulateConfig, Reducer};
pub use graph::{IsomorphismOracle, Vf2Oracle};
pub use store::{CachedPolynomialRecord, JsonFileStore, MemoryStore, PolynomialStore};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum IndPolyError {
    /// Invalid tree or forest structure
    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    /// Polynomial arithmetic or parsing error
    #[error("Algebra error: {0}")]
    AlgebraError(String),

    /// A canonical sub-tree of order >= 3 has no stored polynomial
    #[error("No stored polynomial for order-{order} tree {edge_set}; was a smaller order skipped?")]
    MissingBaseCase {
        /// Order of the sub-tree
        order: usize,
        /// Canonical edge set that was looked up
        edge_set: String,
    },

    /// No enumerated tree matched a reduction component
    #[error("No enumerated tree of order {order} is isomorphic to {edge_set}")]
    CanonicalizationFailure {
        /// Order of the component
        order: usize,
        /// Edge set of the unmatched component
        edge_set: String,
    },

    /// A record with the same canonical edge set already exists
    #[error("Duplicate edge set {edge_set}")]
    UniqueConstraintViolation {
        /// The rejected edge set
        edge_set: String,
    },

    /// A stored record could not be decoded
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord {
        /// Record id
        id: u64,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, IndPolyError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        algebra::{
            Forest, GraftingEnumerator, Orientation, Polynomial, PolynomialAlgebra, Tree,
            TreeBuilder, TreeEnumerator,
        },
        core::{Canonicalizer, Orchestrator, OrderReport, PopulateConfig, Reducer, Reduction},
        graph::{IsomorphismOracle, Vf2Oracle},
        store::{CachedPolynomialRecord, JsonFileStore, MemoryStore, PolynomialStore},
        IndPolyError, Result,
    };
}
