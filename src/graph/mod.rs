//! Graph representations of trees and the isomorphism oracle

mod conversion;
mod isomorphism;

pub use conversion::{forest_to_graph, graph_to_tree, tree_to_graph, TreeGraph};
pub use isomorphism::{CanonicalCodeOracle, IsomorphismOracle, Vf2Oracle};
