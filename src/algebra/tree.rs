//! Unrooted labeled tree and the pure deletions used by the recurrence

use super::{Forest, Polynomial};
use crate::{IndPolyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A tree on vertices `0..order`
///
/// - Always connected with at least one vertex
/// - Edges are `(min, max)` pairs in ascending order, which makes the edge
///   list itself a stable key for trees produced by the enumerator
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Forest", into = "Forest")]
pub struct Tree {
    forest: Forest,
}

impl TryFrom<Forest> for Tree {
    type Error = IndPolyError;

    fn try_from(forest: Forest) -> Result<Self> {
        if forest.is_empty() {
            return Err(IndPolyError::InvalidTree("Tree needs at least one vertex".to_string()));
        }
        // Acyclic with order - 1 edges means connected
        if forest.edges().len() + 1 != forest.order() {
            return Err(IndPolyError::InvalidTree("Tree is not connected".to_string()));
        }
        Ok(Tree { forest })
    }
}

impl Tree {
    /// Create the single-vertex tree
    pub fn single() -> Self {
        Tree {
            forest: Forest::from_normalized(1, Vec::new()),
        }
    }

    /// Create a tree from an edge list over `0..n_vertices`
    pub fn from_edges<I>(n_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Tree::try_from(Forest::from_edges(n_vertices, edges)?)
    }

    /// Wrap a forest already known to be a single component
    pub(crate) fn from_connected(forest: Forest) -> Self {
        debug_assert_eq!(forest.edges().len() + 1, forest.order());
        Tree { forest }
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.forest.order()
    }

    /// Normalized edge list
    pub fn edges(&self) -> &[(usize, usize)] {
        self.forest.edges()
    }

    /// Neighbors of a vertex, ascending
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.forest.neighbors(vertex)
    }

    /// Number of edges at a vertex
    pub fn degree_of(&self, vertex: usize) -> usize {
        self.forest.degree_of(vertex)
    }

    /// Vertex degrees sorted in descending order
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.forest.degree_sequence()
    }

    /// The highest vertex label, used as the distinguished vertex of the recurrence
    pub fn max_vertex(&self) -> usize {
        self.order() - 1
    }

    /// Borrow as a forest
    pub fn as_forest(&self) -> &Forest {
        &self.forest
    }

    /// Convert into a forest
    pub fn into_forest(self) -> Forest {
        self.forest
    }

    /// Serialized edge list, e.g. `[[0,1],[1,2]]`
    ///
    /// Matches the JSON encoding of `Vec<(usize, usize)>`.
    pub fn edge_set_key(&self) -> String {
        let pairs: Vec<String> = self
            .edges()
            .iter()
            .map(|(u, v)| format!("[{},{}]", u, v))
            .collect();
        format!("[{}]", pairs.join(","))
    }

    /// Natural growth: attach a new leaf, labeled `order`, at each vertex in turn
    pub fn graft_all_leaves(&self) -> Vec<Tree> {
        let n = self.order();
        (0..n)
            .map(|attach| {
                let mut edges = self.edges().to_vec();
                edges.push((attach, n));
                Tree::from_connected(Forest::from_normalized(n + 1, edges))
            })
            .collect()
    }

    /// `T - v`
    pub fn delete_vertex(&self, vertex: usize) -> Result<Forest> {
        self.check_vertex(vertex)?;
        let mut removed = vec![false; self.order()];
        removed[vertex] = true;
        Ok(self.forest.without_vertices(&removed))
    }

    /// `T - N[v]`: the vertex together with all of its neighbors
    pub fn delete_closed_neighborhood(&self, vertex: usize) -> Result<Forest> {
        self.check_vertex(vertex)?;
        let mut removed = vec![false; self.order()];
        removed[vertex] = true;
        for &neighbor in self.neighbors(vertex) {
            removed[neighbor] = true;
        }
        Ok(self.forest.without_vertices(&removed))
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.order() {
            return Err(IndPolyError::InvalidTree(format!(
                "Vertex {} out of bounds for order {}",
                vertex,
                self.order()
            )));
        }
        Ok(())
    }

    /// Independence polynomial by subset enumeration (small trees only)
    pub fn independence_polynomial_brute_force(&self) -> Result<Polynomial> {
        self.forest.independence_polynomial_brute_force()
    }

    /// One or two central vertices, found by repeatedly stripping leaves
    pub fn centers(&self) -> Vec<usize> {
        let n = self.order();
        if n <= 2 {
            return (0..n).collect();
        }

        let mut degree: Vec<usize> = (0..n).map(|v| self.degree_of(v)).collect();
        let mut layer: Vec<usize> = (0..n).filter(|&v| degree[v] == 1).collect();
        let mut remaining = n;

        while remaining > 2 {
            remaining -= layer.len();
            let mut next = Vec::new();
            for &leaf in &layer {
                for &neighbor in self.neighbors(leaf) {
                    degree[neighbor] -= 1;
                    if degree[neighbor] == 1 {
                        next.push(neighbor);
                    }
                }
            }
            layer = next;
        }

        layer.sort_unstable();
        layer
    }

    /// Unrooted canonical code: equal exactly when two trees are isomorphic
    ///
    /// AHU parenthesis encoding rooted at the center; for bicentral trees the
    /// smaller of the two encodings.
    pub fn canonical_code(&self) -> String {
        self.best_rooting().1
    }

    /// The isomorphic copy labeled breadth-first from the center
    ///
    /// Children are visited in canonical-code order, so isomorphic inputs yield
    /// identical edge lists, and the highest label is always a deepest leaf.
    pub fn canonical_relabel(&self) -> Tree {
        let (root, _) = self.best_rooting();
        let (parent, codes) = self.rooted_codes(root);

        let n = self.order();
        let mut label = vec![usize::MAX; n];
        let mut queue = VecDeque::new();
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        let mut next = 1;
        label[root] = 0;
        queue.push_back(root);

        while let Some(vertex) = queue.pop_front() {
            let mut children: Vec<usize> = self
                .neighbors(vertex)
                .iter()
                .copied()
                .filter(|&c| parent[c] == Some(vertex))
                .collect();
            children.sort_by(|&a, &b| codes[a].cmp(&codes[b]));
            for child in children {
                label[child] = next;
                next += 1;
                edges.push((label[vertex], label[child]));
                queue.push_back(child);
            }
        }

        Tree::from_connected(Forest::from_normalized(n, edges))
    }

    fn best_rooting(&self) -> (usize, String) {
        self.centers()
            .into_iter()
            .map(|c| {
                let (_, codes) = self.rooted_codes(c);
                (c, codes[c].clone())
            })
            .min_by(|a, b| a.1.cmp(&b.1))
            .unwrap_or_else(|| (0, "()".to_string()))
    }

    /// Parent links and per-vertex subtree codes for a rooting
    fn rooted_codes(&self, root: usize) -> (Vec<Option<usize>>, Vec<String>) {
        let n = self.order();
        let mut parent = vec![None; n];
        let mut seen = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::new();
        seen[root] = true;
        queue.push_back(root);

        while let Some(vertex) = queue.pop_front() {
            order.push(vertex);
            for &next in self.neighbors(vertex) {
                if !seen[next] {
                    seen[next] = true;
                    parent[next] = Some(vertex);
                    queue.push_back(next);
                }
            }
        }

        let mut codes = vec![String::new(); n];
        for &vertex in order.iter().rev() {
            let mut child_codes: Vec<&str> = self
                .neighbors(vertex)
                .iter()
                .filter(|&&c| parent[c] == Some(vertex))
                .map(|&c| codes[c].as_str())
                .collect();
            child_codes.sort_unstable();
            let code = format!("({})", child_codes.concat());
            codes[vertex] = code;
        }

        (parent, codes)
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tree(order={}, edges={})", self.order(), self.edge_set_key())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::single()
    }
}

/// Builder for constructing trees edge by edge
pub struct TreeBuilder {
    n_vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl TreeBuilder {
    /// Create a new builder starting with a single vertex `0`
    pub fn new() -> Self {
        TreeBuilder {
            n_vertices: 1,
            edges: Vec::new(),
        }
    }

    /// Join two vertices, growing the vertex range as needed
    pub fn add_edge(&mut self, u: usize, v: usize) -> &mut Self {
        self.n_vertices = self.n_vertices.max(u + 1).max(v + 1);
        self.edges.push((u, v));
        self
    }

    /// Build the tree
    pub fn build(&self) -> Result<Tree> {
        Tree::from_edges(self.n_vertices, self.edges.iter().copied())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
