//! Enumeration of non-isomorphic unrooted trees

use super::Tree;
use crate::Result;
use std::collections::BTreeMap;

/// Source of one representative per isomorphism class of trees of an order
pub trait TreeEnumerator: Sync {
    /// All non-isomorphic trees of the given order, in a deterministic order
    ///
    /// Order 0 yields nothing.
    fn trees(&self, order: usize) -> Result<Vec<Tree>>;
}

/// Enumerates trees by grafting a leaf onto every vertex of the previous order
///
/// Duplicates are collapsed by canonical code and each class is represented by
/// its canonical relabeling, so output is sorted by canonical code.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraftingEnumerator;

impl TreeEnumerator for GraftingEnumerator {
    fn trees(&self, order: usize) -> Result<Vec<Tree>> {
        Ok(nonisomorphic_trees(order))
    }
}

/// All non-isomorphic trees with `order` vertices
pub fn nonisomorphic_trees(order: usize) -> Vec<Tree> {
    if order == 0 {
        return vec![];
    }

    let mut level = vec![Tree::single()];
    for _ in 2..=order {
        let mut classes: BTreeMap<String, Tree> = BTreeMap::new();
        for tree in &level {
            for grafted in tree.graft_all_leaves() {
                classes
                    .entry(grafted.canonical_code())
                    .or_insert_with(|| grafted.canonical_relabel());
            }
        }
        level = classes.into_values().collect();
    }

    level
}
