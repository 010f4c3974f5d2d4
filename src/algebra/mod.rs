//! Trees, forests, polynomials and tree enumeration

mod tree;
mod forest;
mod polynomial;
mod enumerate;

pub use tree::{Tree, TreeBuilder};
pub use forest::Forest;
pub use polynomial::{AlignedBranches, Orientation, Polynomial, PolynomialAlgebra};
pub use enumerate::{nonisomorphic_trees, GraftingEnumerator, TreeEnumerator};
