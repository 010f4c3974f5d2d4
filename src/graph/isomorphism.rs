//! Structural equivalence of trees

use super::tree_to_graph;
use crate::algebra::Tree;

/// Decides whether two trees are isomorphic
pub trait IsomorphismOracle: Sync {
    /// True when the trees have the same structure
    fn is_isomorphic(&self, a: &Tree, b: &Tree) -> bool;
}

/// VF2 matching through petgraph, guarded by cheap invariants
#[derive(Clone, Copy, Debug, Default)]
pub struct Vf2Oracle;

impl IsomorphismOracle for Vf2Oracle {
    fn is_isomorphic(&self, a: &Tree, b: &Tree) -> bool {
        if a.order() != b.order() || a.degree_sequence() != b.degree_sequence() {
            return false;
        }
        petgraph::algo::is_isomorphic(&tree_to_graph(a), &tree_to_graph(b))
    }
}

/// Compares center-rooted canonical codes
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalCodeOracle;

impl IsomorphismOracle for CanonicalCodeOracle {
    fn is_isomorphic(&self, a: &Tree, b: &Tree) -> bool {
        a.order() == b.order() && a.canonical_code() == b.canonical_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::nonisomorphic_trees;

    #[test]
    fn test_relabeled_path_is_isomorphic() {
        let a = Tree::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let b = Tree::from_edges(4, vec![(3, 1), (1, 0), (0, 2)]).unwrap();
        let star = Tree::from_edges(4, vec![(0, 1), (0, 2), (0, 3)]).unwrap();

        assert!(Vf2Oracle.is_isomorphic(&a, &b));
        assert!(!Vf2Oracle.is_isomorphic(&a, &star));
        assert!(CanonicalCodeOracle.is_isomorphic(&a, &b));
        assert!(!CanonicalCodeOracle.is_isomorphic(&a, &star));
    }

    #[test]
    fn test_same_degree_sequence_different_shape() {
        // Both have degrees [3, 2, 2, 2, 1, 1, 1] but the branch point differs
        let a = Tree::from_edges(7, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (1, 6)]).unwrap();
        let b = Tree::from_edges(7, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (2, 6)]).unwrap();
        assert_eq!(a.degree_sequence(), b.degree_sequence());
        assert!(!Vf2Oracle.is_isomorphic(&a, &b));
        assert!(!CanonicalCodeOracle.is_isomorphic(&a, &b));
    }

    #[test]
    fn test_oracles_agree_on_enumeration() {
        let trees = nonisomorphic_trees(7);
        for (i, a) in trees.iter().enumerate() {
            for (j, b) in trees.iter().enumerate() {
                assert_eq!(Vf2Oracle.is_isomorphic(a, b), i == j);
                assert_eq!(CanonicalCodeOracle.is_isomorphic(a, b), i == j);
            }
        }
    }
}
