//! Forest: a vertex-labeled acyclic graph, possibly disconnected or empty

use super::{Polynomial, Tree};
use crate::{IndPolyError, Result};
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Largest order accepted by the subset-enumeration cross-check
const BRUTE_FORCE_MAX_ORDER: usize = 20;

/// An undirected acyclic graph on vertices `0..order`
///
/// - Edges are stored as `(min, max)` pairs in ascending order
/// - Values are never mutated; deletions return a new forest
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "ForestRepr", into = "ForestRepr")]
pub struct Forest {
    n_vertices: usize,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

#[derive(Clone, Serialize, Deserialize)]
struct ForestRepr {
    order: usize,
    edges: Vec<(usize, usize)>,
}

impl TryFrom<ForestRepr> for Forest {
    type Error = IndPolyError;

    fn try_from(repr: ForestRepr) -> Result<Self> {
        Forest::from_edges(repr.order, repr.edges)
    }
}

impl From<Forest> for ForestRepr {
    fn from(forest: Forest) -> Self {
        ForestRepr {
            order: forest.n_vertices,
            edges: forest.edges,
        }
    }
}

impl Forest {
    /// The forest with no vertices
    pub fn empty() -> Self {
        Forest {
            n_vertices: 0,
            edges: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    /// Build a forest from an edge list, rejecting anything that is not acyclic
    pub fn from_edges<I>(n_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut normalized = Vec::new();
        let mut sets = UnionFind::<usize>::new(n_vertices);

        for (u, v) in edges {
            if u >= n_vertices || v >= n_vertices {
                return Err(IndPolyError::InvalidTree(format!(
                    "Edge ({}, {}) out of bounds for {} vertices",
                    u, v, n_vertices
                )));
            }
            if u == v {
                return Err(IndPolyError::InvalidTree(format!(
                    "Self-loop at vertex {}",
                    u
                )));
            }
            // A repeated edge also closes a cycle, so one check covers both
            if !sets.union(u, v) {
                return Err(IndPolyError::InvalidTree(format!(
                    "Edge ({}, {}) closes a cycle",
                    u, v
                )));
            }
            normalized.push((u.min(v), u.max(v)));
        }

        Ok(Self::from_normalized(n_vertices, normalized))
    }

    /// Build from edges already known to be in range and acyclic
    pub(crate) fn from_normalized(n_vertices: usize, mut edges: Vec<(usize, usize)>) -> Self {
        edges.sort_unstable();
        let mut adjacency = vec![Vec::new(); n_vertices];
        for &(u, v) in &edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        Forest {
            n_vertices,
            edges,
            adjacency,
        }
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.n_vertices
    }

    /// Check if the forest has no vertices
    pub fn is_empty(&self) -> bool {
        self.n_vertices == 0
    }

    /// Normalized edge list
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Neighbors of a vertex, ascending
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Number of edges at a vertex
    pub fn degree_of(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Vertex degrees sorted in descending order
    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = self.adjacency.iter().map(Vec::len).collect();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        degrees
    }

    /// Remove the marked vertices, relabeling the rest compactly in their original order
    pub fn without_vertices(&self, removed: &[bool]) -> Forest {
        let mut new_label = vec![usize::MAX; self.n_vertices];
        let mut next = 0;
        for vertex in 0..self.n_vertices {
            if !removed.get(vertex).copied().unwrap_or(false) {
                new_label[vertex] = next;
                next += 1;
            }
        }

        let edges = self
            .edges
            .iter()
            .filter(|&&(u, v)| new_label[u] != usize::MAX && new_label[v] != usize::MAX)
            .map(|&(u, v)| (new_label[u], new_label[v]))
            .collect();

        Forest::from_normalized(next, edges)
    }

    /// Split into connected components
    ///
    /// Components are ordered by their smallest original label, and each one
    /// is relabeled `0..k` preserving the relative order of its vertices.
    pub fn components(&self) -> Vec<Tree> {
        let mut component_of = vec![usize::MAX; self.n_vertices];
        let mut members: Vec<Vec<usize>> = Vec::new();

        for start in 0..self.n_vertices {
            if component_of[start] != usize::MAX {
                continue;
            }
            let id = members.len();
            let mut queue = VecDeque::new();
            let mut vertices = Vec::new();
            component_of[start] = id;
            queue.push_back(start);

            while let Some(vertex) = queue.pop_front() {
                vertices.push(vertex);
                for &next in &self.adjacency[vertex] {
                    if component_of[next] == usize::MAX {
                        component_of[next] = id;
                        queue.push_back(next);
                    }
                }
            }

            vertices.sort_unstable();
            members.push(vertices);
        }

        members
            .into_iter()
            .map(|vertices| {
                let mut local = vec![usize::MAX; self.n_vertices];
                for (i, &vertex) in vertices.iter().enumerate() {
                    local[vertex] = i;
                }
                let edges = self
                    .edges
                    .iter()
                    .filter(|&&(u, _)| local[u] != usize::MAX)
                    .map(|&(u, v)| (local[u], local[v]))
                    .collect();
                Tree::from_connected(Forest::from_normalized(vertices.len(), edges))
            })
            .collect()
    }

    /// Count independent sets of every size by enumerating vertex subsets
    ///
    /// Only meant for small graphs; used to cross-check the recurrence.
    pub fn independence_polynomial_brute_force(&self) -> Result<Polynomial> {
        if self.n_vertices > BRUTE_FORCE_MAX_ORDER {
            return Err(IndPolyError::AlgebraError(format!(
                "Brute force limited to {} vertices, got {}",
                BRUTE_FORCE_MAX_ORDER, self.n_vertices
            )));
        }

        let masks: Vec<u32> = self
            .adjacency
            .iter()
            .map(|list| list.iter().fold(0u32, |mask, &v| mask | (1 << v)))
            .collect();

        let mut counts = vec![0u64; self.n_vertices + 1];
        for subset in 0u32..(1u32 << self.n_vertices) {
            let independent = (0..self.n_vertices)
                .filter(|&v| subset & (1 << v) != 0)
                .all(|v| subset & masks[v] == 0);
            if independent {
                counts[subset.count_ones() as usize] += 1;
            }
        }

        Ok(Polynomial::from_ascending(counts))
    }
}

impl fmt::Debug for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.n_vertices == 0 {
            write!(f, "∅")
        } else {
            write!(f, "Forest(order={}, edges={:?})", self.n_vertices, self.edges)
        }
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Tree> for Forest {
    fn from(tree: Tree) -> Self {
        tree.into_forest()
    }
}
