//! The two-branch independence polynomial recurrence
//!
//! For a tree `T` and its highest-labeled vertex `v`:
//!
//! ```text
//! I(T, x) = I(T - v, x) + x * I(T - N[v], x)
//! ```
//!
//! Both branches are forests of strictly smaller trees, each resolved either
//! as a base case or through the store under its canonical edge set.

use super::canonicalizer::{base_case, Canonicalizer};
use crate::algebra::{
    AlignedBranches, Forest, Orientation, Polynomial, PolynomialAlgebra, Tree, TreeEnumerator,
};
use crate::graph::IsomorphismOracle;
use crate::store::PolynomialStore;
use crate::{IndPolyError, Result};

/// Polynomial of one tree with its descending coefficient list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The independence polynomial
    pub polynomial: Polynomial,
    /// Coefficients from highest degree to the constant term
    pub coefficients: Vec<u64>,
}

/// Applies the recurrence against a read-only view of committed orders
pub struct Reducer<'a, S: ?Sized, E, O> {
    canonicalizer: &'a Canonicalizer<E, O>,
    store: &'a S,
    algebra: &'a PolynomialAlgebra,
}

impl<'a, S, E, O> Reducer<'a, S, E, O>
where
    S: PolynomialStore + ?Sized,
    E: TreeEnumerator,
    O: IsomorphismOracle,
{
    /// Create a reducer over shared collaborators
    pub fn new(
        canonicalizer: &'a Canonicalizer<E, O>,
        store: &'a S,
        algebra: &'a PolynomialAlgebra,
    ) -> Self {
        Reducer {
            canonicalizer,
            store,
            algebra,
        }
    }

    /// Polynomial of any tree: base case, or canonicalize and look up
    pub fn resolve(&self, tree: &Tree) -> Result<Polynomial> {
        if let Some(poly) = base_case(tree.order()) {
            return Ok(poly);
        }

        let canonical = self.canonicalizer.canonicalize(tree)?;
        let key = canonical.edge_set_key();
        let record = self
            .store
            .get(&key, canonical.order())?
            .ok_or(IndPolyError::MissingBaseCase {
                order: canonical.order(),
                edge_set: key,
            })?;

        record.decode(self.algebra)
    }

    /// Product of the component polynomials; the empty forest gives `1`
    pub fn resolve_forest(&self, forest: &Forest) -> Result<Polynomial> {
        let components = forest.components();
        if components.is_empty() {
            return Ok(Polynomial::one());
        }

        let polys = components
            .iter()
            .map(|tree| self.resolve(tree))
            .collect::<Result<Vec<_>>>()?;
        self.algebra.multiply(&polys)
    }

    /// Reduce a tree to its independence polynomial
    pub fn reduce(&self, tree: &Tree) -> Result<Reduction> {
        self.reduce_with_branches(tree).map(|(reduction, _)| reduction)
    }

    /// Reduce a tree and also return the aligned branch lists that were summed
    pub fn reduce_with_branches(&self, tree: &Tree) -> Result<(Reduction, AlignedBranches)> {
        let v = tree.max_vertex();

        let vertex_deleted = self.resolve_forest(&tree.delete_vertex(v)?)?;
        let neighborhood_deleted = self.resolve_forest(&tree.delete_closed_neighborhood(v)?)?;

        let aligned = self.algebra.align_branches(
            &self.algebra.coefficients_desc(&vertex_deleted),
            &self.algebra.coefficients_desc(&neighborhood_deleted),
        );
        let summed = self.algebra.sum_aligned(&aligned)?;

        let polynomial = self.algebra.rebuild_from_coefficients(&summed, Orientation::Descending);
        let coefficients = self.algebra.coefficients_desc(&polynomial);
        debug_assert_eq!(polynomial.constant_term(), 1);

        Ok((
            Reduction {
                polynomial,
                coefficients,
            },
            aligned,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NewRecord};
    use crate::utils::random_tree;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Store holding every tree up to `max_order`, filled by brute force
    fn seeded_store(canon: &Canonicalizer, max_order: usize) -> MemoryStore {
        let alg = PolynomialAlgebra::default();
        let mut store = MemoryStore::new();
        for order in 3..=max_order {
            for tree in canon.trees_of(order).unwrap().iter() {
                let poly = tree.independence_polynomial_brute_force().unwrap();
                store.put(NewRecord::new(tree, &poly, &alg).unwrap()).unwrap();
            }
        }
        store.commit_batch().unwrap();
        store
    }

    #[test]
    fn test_path_on_four_vertices() {
        let canon = Canonicalizer::new();
        let store = seeded_store(&canon, 3);
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);

        let path = Tree::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let (reduction, branches) = reducer.reduce_with_branches(&path).unwrap();

        assert_eq!(reduction.coefficients, vec![3, 4, 1]);
        assert_eq!(alg.render(&reduction.polynomial), "3*x**2 + 4*x + 1");
        assert_eq!(branches.vertex_deleted, vec![0, 1, 3, 1]);
        assert_eq!(branches.neighborhood_deleted, vec![0, 2, 1, 0]);
    }

    #[test]
    fn test_star_on_four_vertices() {
        let canon = Canonicalizer::new();
        let store = seeded_store(&canon, 3);
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);

        let star = Tree::from_edges(4, vec![(0, 1), (0, 2), (0, 3)]).unwrap();
        let reduction = reducer.reduce(&star).unwrap();

        assert_eq!(reduction.coefficients, vec![1, 3, 4, 1]);
        assert_eq!(alg.render(&reduction.polynomial), "x**3 + 3*x**2 + 4*x + 1");
    }

    #[test]
    fn test_definitional_orders_reduce() {
        let canon = Canonicalizer::new();
        let store = MemoryStore::new();
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);

        let single = reducer.reduce(&Tree::single()).unwrap();
        assert_eq!(single.coefficients, vec![1, 1]);
        assert_eq!(alg.render(&single.polynomial), "x + 1");

        let edge = reducer.reduce(&Tree::from_edges(2, vec![(0, 1)]).unwrap()).unwrap();
        assert_eq!(edge.coefficients, vec![2, 1]);
        assert_eq!(alg.render(&edge.polynomial), "2*x + 1");
    }

    #[test]
    fn test_closed_neighborhood_covers_tree() {
        // Removing the center of a star leaves nothing: I = I(3 isolated) + x * 1
        let canon = Canonicalizer::new();
        let store = MemoryStore::new();
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);

        let star = Tree::from_edges(4, vec![(1, 3), (2, 3), (0, 3)]).unwrap();
        let reduction = reducer.reduce(&star).unwrap();
        assert_eq!(reduction.coefficients, vec![1, 3, 4, 1]);
    }

    #[test]
    fn test_missing_smaller_order() {
        let canon = Canonicalizer::new();
        let store = MemoryStore::new();
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);

        let path = Tree::from_edges(5, vec![(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let err = reducer.reduce(&path).unwrap_err();
        assert!(matches!(err, IndPolyError::MissingBaseCase { order: 4, .. }));
    }

    #[test]
    fn test_uncommitted_records_are_not_used() {
        let canon = Canonicalizer::new();
        let alg = PolynomialAlgebra::default();
        let mut store = MemoryStore::new();
        for tree in canon.trees_of(3).unwrap().iter() {
            let poly = tree.independence_polynomial_brute_force().unwrap();
            store.put(NewRecord::new(tree, &poly, &alg).unwrap()).unwrap();
        }

        let reducer = Reducer::new(&canon, &store, &alg);
        let path = Tree::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let err = reducer.reduce(&path).unwrap_err();
        assert!(matches!(err, IndPolyError::MissingBaseCase { order: 3, .. }));
    }

    #[test]
    fn test_agrees_with_brute_force() {
        let mut canon = Canonicalizer::new();
        canon.prepare(9).unwrap();
        let store = seeded_store(&canon, 9);
        let alg = PolynomialAlgebra::default();
        let reducer = Reducer::new(&canon, &store, &alg);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..40 {
            let order = rng.gen_range(1..=10);
            let tree = random_tree(order, &mut rng).unwrap();
            let reduction = reducer.reduce(&tree).unwrap();
            assert_eq!(reduction.polynomial, tree.independence_polynomial_brute_force().unwrap());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_invariants_on_random_trees(order in 1usize..=8, seed in any::<u64>()) {
            let canon = Canonicalizer::new();
            let store = seeded_store(&canon, 7);
            let alg = PolynomialAlgebra::default();
            let reducer = Reducer::new(&canon, &store, &alg);

            let tree = random_tree(order, &mut StdRng::seed_from_u64(seed)).unwrap();
            let (reduction, branches) = reducer.reduce_with_branches(&tree).unwrap();

            prop_assert_eq!(reduction.polynomial.constant_term(), 1);
            prop_assert!(reduction.polynomial.degree() >= 1);
            prop_assert!(reduction.polynomial.degree() <= order);
            prop_assert_eq!(reduction.coefficients.len(), reduction.polynomial.degree() + 1);
            prop_assert_eq!(branches.vertex_deleted.len(), branches.neighborhood_deleted.len());
            // The linear coefficient counts single vertices
            prop_assert_eq!(reduction.polynomial.coefficient(1), order as u64);
        }
    }
}
