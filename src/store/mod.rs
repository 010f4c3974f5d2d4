//! Persistent mapping from canonical edge sets to independence polynomials
//!
//! Stores stage inserts in a pending batch. Nothing in the batch is visible
//! to [`PolynomialStore::get`] until [`PolynomialStore::commit_batch`], which
//! is what lets the orchestrator treat each order as a barrier.

mod record;
mod table;
mod memory;
mod json_file;

pub use record::{CachedPolynomialRecord, NewRecord};
pub use memory::MemoryStore;
pub use json_file::JsonFileStore;

use crate::Result;

/// Uniquely-keyed polynomial store with batch commits
pub trait PolynomialStore: Sync {
    /// Committed record with this edge set and tree order, if any
    fn get(&self, edge_set: &str, order: usize) -> Result<Option<CachedPolynomialRecord>>;

    /// Stage a new record, returning its id
    ///
    /// Fails with `UniqueConstraintViolation` if the edge set is already
    /// committed or staged; nothing is overwritten.
    fn put(&mut self, record: NewRecord) -> Result<u64>;

    /// Make every staged record durable and visible, returning how many were published
    fn commit_batch(&mut self) -> Result<usize>;

    /// Discard every staged record, returning how many were dropped
    fn rollback(&mut self) -> usize;

    /// Number of committed records
    fn len(&self) -> usize;

    /// Check for an empty store
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of staged records
    fn pending(&self) -> usize;

    /// All committed records in id order
    fn records(&self) -> Vec<CachedPolynomialRecord>;
}
