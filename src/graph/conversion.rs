//! Convert trees and forests to petgraph graphs and back

use crate::algebra::{Forest, Tree};
use crate::Result;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Undirected petgraph graph with unit weights; node `i` is vertex `i`
pub type TreeGraph = UnGraph<(), ()>;

/// Convert a tree to a petgraph graph
pub fn tree_to_graph(tree: &Tree) -> TreeGraph {
    forest_to_graph(tree.as_forest())
}

/// Convert a forest to a petgraph graph, keeping isolated vertices
pub fn forest_to_graph(forest: &Forest) -> TreeGraph {
    let n = forest.order();
    let mut graph = TreeGraph::with_capacity(n, forest.edges().len());
    for _ in 0..n {
        graph.add_node(());
    }
    for &(u, v) in forest.edges() {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }
    graph
}

/// Read a petgraph graph back as a tree, validating its shape
pub fn graph_to_tree(graph: &TreeGraph) -> Result<Tree> {
    let edges = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()));
    Tree::from_edges(graph.node_count(), edges)
}
