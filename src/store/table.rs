//! Committed records plus a pending batch, shared by the store engines

use super::{CachedPolynomialRecord, NewRecord};
use crate::{IndPolyError, Result};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub(crate) struct RecordTable {
    committed: Vec<CachedPolynomialRecord>,
    index: HashMap<String, usize>,
    pending: Vec<CachedPolynomialRecord>,
    pending_keys: HashSet<String>,
    next_id: u64,
}

impl RecordTable {
    pub(crate) fn new() -> Self {
        RecordTable {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Rebuild from previously committed records, enforcing key uniqueness
    pub(crate) fn from_committed(records: Vec<CachedPolynomialRecord>) -> Result<Self> {
        let mut table = RecordTable::new();
        for record in records {
            if table.index.contains_key(&record.edge_set) {
                return Err(IndPolyError::MalformedRecord {
                    id: record.id,
                    reason: format!("duplicate edge set {}", record.edge_set),
                });
            }
            table.next_id = table.next_id.max(record.id + 1);
            table.index.insert(record.edge_set.clone(), table.committed.len());
            table.committed.push(record);
        }
        Ok(table)
    }

    pub(crate) fn get(&self, edge_set: &str, order: usize) -> Option<&CachedPolynomialRecord> {
        self.index
            .get(edge_set)
            .map(|&i| &self.committed[i])
            .filter(|record| record.order == order)
    }

    pub(crate) fn put(&mut self, record: NewRecord) -> Result<u64> {
        if self.index.contains_key(&record.edge_set)
            || self.pending_keys.contains(&record.edge_set)
        {
            return Err(IndPolyError::UniqueConstraintViolation {
                edge_set: record.edge_set,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pending_keys.insert(record.edge_set.clone());
        self.pending.push(record.with_id(id));
        Ok(id)
    }

    /// Committed records followed by the pending batch
    pub(crate) fn staged(&self) -> Vec<CachedPolynomialRecord> {
        self.committed.iter().chain(&self.pending).cloned().collect()
    }

    pub(crate) fn commit(&mut self) -> usize {
        let published = self.pending.len();
        for record in self.pending.drain(..) {
            self.index.insert(record.edge_set.clone(), self.committed.len());
            self.committed.push(record);
        }
        self.pending_keys.clear();
        published
    }

    pub(crate) fn rollback(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.pending_keys.clear();
        self.next_id = self.committed.iter().map(|r| r.id + 1).max().unwrap_or(1);
        dropped
    }

    pub(crate) fn len(&self) -> usize {
        self.committed.len()
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn committed(&self) -> &[CachedPolynomialRecord] {
        &self.committed
    }
}
