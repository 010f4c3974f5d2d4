//! Durable store kept as a single JSON document on disk

use super::table::RecordTable;
use super::{CachedPolynomialRecord, NewRecord, PolynomialStore};
use crate::algebra::PolynomialAlgebra;
use crate::utils::{load_json, save_json};
use crate::{IndPolyError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    indeterminate: String,
    checksum: String,
    records: Vec<CachedPolynomialRecord>,
}

/// Store persisted to a JSON file
///
/// Only committed records reach the file; each commit rewrites it atomically,
/// so an interrupted batch leaves the previous orders intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    algebra: PolynomialAlgebra,
    table: RecordTable,
}

impl JsonFileStore {
    /// Open an existing store file, or start an empty one if the file is absent
    ///
    /// Every record is validated on open: checksum, unique edge sets, and
    /// decodable coefficient lists.
    pub fn open(path: impl AsRef<Path>, algebra: PolynomialAlgebra) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(JsonFileStore {
                path,
                algebra,
                table: RecordTable::new(),
            });
        }

        let document: StoreDocument = load_json(&path)?;
        if document.version != FORMAT_VERSION {
            return Err(IndPolyError::MalformedRecord {
                id: 0,
                reason: format!("unsupported store version {}", document.version),
            });
        }
        if document.indeterminate != algebra.indeterminate() {
            return Err(IndPolyError::MalformedRecord {
                id: 0,
                reason: format!(
                    "store uses indeterminate '{}', expected '{}'",
                    document.indeterminate,
                    algebra.indeterminate()
                ),
            });
        }
        let actual = checksum(&document.records)?;
        if actual != document.checksum {
            return Err(IndPolyError::MalformedRecord {
                id: 0,
                reason: format!(
                    "checksum mismatch: file says {}, content is {}",
                    document.checksum, actual
                ),
            });
        }

        for record in &document.records {
            record.decode(&algebra)?;
            record.edge_pairs()?;
        }

        Ok(JsonFileStore {
            path,
            algebra,
            table: RecordTable::from_committed(document.records)?,
        })
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: Vec<CachedPolynomialRecord>) -> Result<()> {
        let document = StoreDocument {
            version: FORMAT_VERSION,
            indeterminate: self.algebra.indeterminate().to_string(),
            checksum: checksum(&records)?,
            records,
        };
        save_json(&document, &self.path)
    }
}

fn checksum(records: &[CachedPolynomialRecord]) -> Result<String> {
    let bytes = serde_json::to_vec(records)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

impl PolynomialStore for JsonFileStore {
    fn get(&self, edge_set: &str, order: usize) -> Result<Option<CachedPolynomialRecord>> {
        Ok(self.table.get(edge_set, order).cloned())
    }

    fn put(&mut self, record: NewRecord) -> Result<u64> {
        self.table.put(record)
    }

    fn commit_batch(&mut self) -> Result<usize> {
        // Publish in memory only once the file holds the batch
        self.persist(self.table.staged())?;
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
