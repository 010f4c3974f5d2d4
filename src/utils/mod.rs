//! Utility functions for indpoly

use crate::algebra::Tree;
use crate::{IndPolyError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Save object to a JSON file
///
/// Writes a sibling temporary file first and renames it over the target, so
/// readers see either the old or the new content.
pub fn save_json<T: Serialize>(obj: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(obj)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let mut file = File::create(tmp)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Load object from a JSON file
pub fn load_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let obj = serde_json::from_str(&contents)?;
    Ok(obj)
}

/// Uniformly random labeled tree on `size` vertices, from a random Prüfer sequence
pub fn random_tree<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Tree> {
    if size <= 1 {
        return Ok(Tree::single());
    }
    let sequence: Vec<usize> = (0..size - 2).map(|_| rng.gen_range(0..size)).collect();
    tree_from_prufer(size, &sequence)
}

fn tree_from_prufer(size: usize, sequence: &[usize]) -> Result<Tree> {
    if sequence.len() + 2 != size || sequence.iter().any(|&v| v >= size) {
        return Err(IndPolyError::InvalidTree(format!(
            "{:?} is not a Prüfer sequence for {} vertices",
            sequence, size
        )));
    }

    let mut degree = vec![1usize; size];
    for &v in sequence {
        degree[v] += 1;
    }

    let mut edges = Vec::with_capacity(size - 1);
    for &v in sequence {
        if let Some(leaf) = (0..size).find(|&u| degree[u] == 1) {
            edges.push((leaf, v));
            degree[leaf] -= 1;
            degree[v] -= 1;
        }
    }
    let last: Vec<usize> = (0..size).filter(|&u| degree[u] == 1).collect();
    if let [u, v] = last[..] {
        edges.push((u, v));
    }

    Tree::from_edges(size, edges)
}

/// The same tree under a random permutation of its vertex labels
pub fn shuffle_labels<R: Rng + ?Sized>(tree: &Tree, rng: &mut R) -> Result<Tree> {
    let mut permutation: Vec<usize> = (0..tree.order()).collect();
    permutation.shuffle(rng);
    let edges = tree
        .edges()
        .iter()
        .map(|&(u, v)| (permutation[u], permutation[v]));
    Tree::from_edges(tree.order(), edges)
}

/// Timing utilities
pub mod timing {
    use std::time::{Duration, Instant};

    /// Simple timer
    pub struct Timer {
        start: Instant,
        name: String,
    }

    impl Timer {
        /// Start new timer
        pub fn new(name: &str) -> Self {
            Timer {
                start: Instant::now(),
                name: name.to_string(),
            }
        }

        /// Get elapsed time
        pub fn elapsed(&self) -> Duration {
            self.start.elapsed()
        }

        /// Print elapsed time
        pub fn print(&self) {
            println!("{}: {:.3}s", self.name, self.elapsed().as_secs_f32());
        }
    }
}
