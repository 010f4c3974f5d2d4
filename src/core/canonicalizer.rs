//! Map arbitrary labeled trees onto enumerated representatives

use crate::algebra::{GraftingEnumerator, Polynomial, Tree, TreeEnumerator};
use crate::graph::{IsomorphismOracle, Vf2Oracle};
use crate::{IndPolyError, Result};
use std::borrow::Cow;
use std::collections::HashMap;

use super::config::MIN_STORED_ORDER;

/// Polynomials of the definitional orders, never looked up
///
/// A single vertex gives `x + 1`, a single edge `2x + 1`.
pub fn base_case(order: usize) -> Option<Polynomial> {
    match order {
        1 => Some(Polynomial::from_ascending(vec![1, 1])),
        2 => Some(Polynomial::from_ascending(vec![1, 2])),
        _ => None,
    }
}

/// Finds the enumerated tree isomorphic to a given one
///
/// Enumerations are cached per order once [`prepare`](Self::prepare) has
/// seen them; uncached orders are enumerated on demand.
pub struct Canonicalizer<E = GraftingEnumerator, O = Vf2Oracle> {
    enumerator: E,
    oracle: O,
    cache: HashMap<usize, Vec<Tree>>,
}

impl Canonicalizer {
    /// Canonicalizer over the grafting enumerator and VF2 matching
    pub fn new() -> Self {
        Self::with_parts(GraftingEnumerator, Vf2Oracle)
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TreeEnumerator, O: IsomorphismOracle> Canonicalizer<E, O> {
    /// Canonicalizer over custom collaborators
    pub fn with_parts(enumerator: E, oracle: O) -> Self {
        Canonicalizer {
            enumerator,
            oracle,
            cache: HashMap::new(),
        }
    }

    /// Enumerate and cache every stored order up to `max_order`
    pub fn prepare(&mut self, max_order: usize) -> Result<()> {
        for order in MIN_STORED_ORDER..=max_order {
            if !self.cache.contains_key(&order) {
                let trees = self.enumerator.trees(order)?;
                self.cache.insert(order, trees);
            }
        }
        Ok(())
    }

    /// The enumerated trees of an order
    pub fn trees_of(&self, order: usize) -> Result<Cow<'_, [Tree]>> {
        match self.cache.get(&order) {
            Some(trees) => Ok(Cow::Borrowed(trees.as_slice())),
            None => Ok(Cow::Owned(self.enumerator.trees(order)?)),
        }
    }

    /// The enumerated representative of the tree's isomorphism class
    ///
    /// Orders 1 and 2 have a single class each and are returned unchanged.
    pub fn canonicalize(&self, tree: &Tree) -> Result<Tree> {
        let order = tree.order();
        if order < MIN_STORED_ORDER {
            return Ok(tree.clone());
        }

        self.trees_of(order)?
            .iter()
            .find(|candidate| self.oracle.is_isomorphic(candidate, tree))
            .cloned()
            .ok_or_else(|| IndPolyError::CanonicalizationFailure {
                order,
                edge_set: tree.edge_set_key(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::shuffle_labels;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Returns a fixed list regardless of order
    struct FixedEnumerator(Vec<Tree>);

    impl TreeEnumerator for FixedEnumerator {
        fn trees(&self, _order: usize) -> Result<Vec<Tree>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_base_cases() {
        assert_eq!(base_case(1).unwrap().coefficients_descending(), vec![1, 1]);
        assert_eq!(base_case(2).unwrap().coefficients_descending(), vec![2, 1]);
        assert!(base_case(3).is_none());
        assert!(base_case(0).is_none());
    }

    #[test]
    fn test_canonicalize_relabeled_trees() {
        let mut canon = Canonicalizer::new();
        canon.prepare(8).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for order in 3..=8 {
            let reps = canon.trees_of(order).unwrap().into_owned();
            for rep in &reps {
                let shuffled = shuffle_labels(rep, &mut rng).unwrap();
                assert_eq!(&canon.canonicalize(&shuffled).unwrap(), rep);
            }
        }
    }

    #[test]
    fn test_small_orders_pass_through() {
        let canon = Canonicalizer::new();
        let edge = Tree::from_edges(2, vec![(1, 0)]).unwrap();
        assert_eq!(canon.canonicalize(&edge).unwrap(), edge);
    }

    #[test]
    fn test_unprepared_order_enumerates_on_demand() {
        let canon = Canonicalizer::new();
        let path = Tree::from_edges(5, vec![(4, 3), (3, 2), (2, 1), (1, 0)]).unwrap();
        let rep = canon.canonicalize(&path).unwrap();
        assert_eq!(rep.canonical_code(), path.canonical_code());
    }

    #[test]
    fn test_no_match_is_failure() {
        let star = Tree::from_edges(4, vec![(0, 1), (0, 2), (0, 3)]).unwrap();
        let path = Tree::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let canon = Canonicalizer::with_parts(FixedEnumerator(vec![star]), Vf2Oracle);

        let err = canon.canonicalize(&path).unwrap_err();
        assert!(matches!(err, IndPolyError::CanonicalizationFailure { order: 4, .. }));
    }
}
