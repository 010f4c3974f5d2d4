//! In-memory store, one isolated instance per owner

use super::table::RecordTable;
use super::{CachedPolynomialRecord, NewRecord, PolynomialStore};
use crate::Result;

/// Store that lives only as long as the value; commits are instantaneous
#[derive(Debug)]
pub struct MemoryStore {
    table: RecordTable,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            table: RecordTable::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PolynomialStore for MemoryStore {
    fn get(&self, edge_set: &str, order: usize) -> Result<Option<CachedPolynomialRecord>> {
        Ok(self.table.get(edge_set, order).cloned())
    }

    fn put(&mut self, record: NewRecord) -> Result<u64> {
        self.table.put(record)
    }

    fn commit_batch(&mut self) -> Result<usize> {
        Ok(self.table.commit())
    }

    fn rollback(&mut self) -> usize {
        self.table.rollback()
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn pending(&self) -> usize {
        self.table.pending()
    }

    fn records(&self) -> Vec<CachedPolynomialRecord> {
        self.table.committed().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Polynomial, PolynomialAlgebra, Tree};
    use crate::IndPolyError;

    fn record(tree: &Tree) -> NewRecord {
        let poly = tree.independence_polynomial_brute_force().unwrap();
        NewRecord::new(tree, &poly, &PolynomialAlgebra::default()).unwrap()
    }

    fn path(n: usize) -> Tree {
        Tree::from_edges(n, (1..n).map(|v| (v - 1, v))).unwrap()
    }

    #[test]
    fn test_put_invisible_until_commit() {
        let mut store = MemoryStore::new();
        let tree = path(3);
        let key = tree.edge_set_key();

        let id = store.put(record(&tree)).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.pending(), 1);
        assert!(store.get(&key, 3).unwrap().is_none());

        assert_eq!(store.commit_batch().unwrap(), 1);
        let found = store.get(&key, 3).unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(
            found.decode(&PolynomialAlgebra::default()).unwrap(),
            Polynomial::from_descending(&[1, 3, 1])
        );
    }

    #[test]
    fn test_get_filters_by_order() {
        let mut store = MemoryStore::new();
        let tree = path(3);
        store.put(record(&tree)).unwrap();
        store.commit_batch().unwrap();
        assert!(store.get(&tree.edge_set_key(), 4).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_rejected_pending_and_committed() {
        let mut store = MemoryStore::new();
        let tree = path(4);

        store.put(record(&tree)).unwrap();
        let err = store.put(record(&tree)).unwrap_err();
        assert!(matches!(err, IndPolyError::UniqueConstraintViolation { .. }));

        store.commit_batch().unwrap();
        assert!(store.put(record(&tree)).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rollback_discards_batch() {
        let mut store = MemoryStore::new();
        store.put(record(&path(3))).unwrap();
        store.commit_batch().unwrap();

        store.put(record(&path(4))).unwrap();
        store.put(record(&path(5))).unwrap();
        assert_eq!(store.rollback(), 2);
        assert_eq!(store.pending(), 0);
        assert_eq!(store.len(), 1);

        // Ids continue after the last committed record
        assert_eq!(store.put(record(&path(4))).unwrap(), 2);
    }
}
