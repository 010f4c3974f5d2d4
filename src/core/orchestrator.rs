//! Order-by-order population of the polynomial store
//!
//! Every order is a barrier: all of its trees are reduced against the orders
//! already committed, then inserted and committed together. A failure rolls
//! the pending batch back, so only whole orders ever become visible.

use super::canonicalizer::Canonicalizer;
use super::config::{PopulateConfig, MIN_STORED_ORDER};
use super::reducer::{Reducer, Reduction};
use crate::algebra::{GraftingEnumerator, PolynomialAlgebra, Tree, TreeEnumerator};
use crate::graph::{IsomorphismOracle, Vf2Oracle};
use crate::store::{NewRecord, PolynomialStore};
use crate::utils::timing::Timer;
use crate::{IndPolyError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// Outcome of populating one order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderReport {
    /// Tree order
    pub order: usize,
    /// Number of non-isomorphic trees reduced and committed
    pub trees: usize,
    /// Largest independence number seen in this order
    pub max_degree: usize,
    /// Wall time for the order
    pub elapsed: Duration,
}

/// Drives the reducer across ascending orders against an injected store
pub struct Orchestrator<'s, S: ?Sized, E = GraftingEnumerator, O = Vf2Oracle> {
    store: &'s mut S,
    canonicalizer: Canonicalizer<E, O>,
    algebra: PolynomialAlgebra,
    config: PopulateConfig,
}

impl<'s, S: PolynomialStore + ?Sized> Orchestrator<'s, S> {
    /// Orchestrator with the default enumerator, oracle and indeterminate `x`
    pub fn new(store: &'s mut S, config: PopulateConfig) -> Self {
        Self::with_parts(store, Canonicalizer::new(), PolynomialAlgebra::default(), config)
    }
}

impl<'s, S, E, O> Orchestrator<'s, S, E, O>
where
    S: PolynomialStore + ?Sized,
    E: TreeEnumerator,
    O: IsomorphismOracle,
{
    /// Orchestrator over custom collaborators
    pub fn with_parts(
        store: &'s mut S,
        canonicalizer: Canonicalizer<E, O>,
        algebra: PolynomialAlgebra,
        config: PopulateConfig,
    ) -> Self {
        Orchestrator {
            store,
            canonicalizer,
            algebra,
            config,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    /// Read access to the store
    pub fn store(&self) -> &S {
        &*self.store
    }

    /// Populate every configured order in ascending order, stopping at the first failure
    pub fn run(&mut self) -> Result<Vec<OrderReport>> {
        self.config.validate()?;
        let timer = Timer::new("populate");

        let mut reports = Vec::new();
        for order in self.config.min_order..=self.config.max_order {
            reports.push(self.populate_order(order)?);
        }

        if self.config.verbose {
            let total: usize = reports.iter().map(|r| r.trees).sum();
            println!(
                "Populated orders {}..={}: {} trees, {} records in store",
                self.config.min_order,
                self.config.max_order,
                total,
                self.store.len()
            );
            timer.print();
        }

        Ok(reports)
    }

    /// Reduce, insert and commit every non-isomorphic tree of one order
    pub fn populate_order(&mut self, order: usize) -> Result<OrderReport> {
        if order < MIN_STORED_ORDER {
            return Err(IndPolyError::InvalidConfig(format!(
                "orders below {} are definitional and never stored, got {}",
                MIN_STORED_ORDER, order
            )));
        }

        let timer = Timer::new(&format!("order {}", order));
        self.canonicalizer.prepare(order)?;

        let result = self.reduce_order(order).and_then(|rows| self.commit_order(rows));
        let (trees, max_degree) = match result {
            Ok(summary) => summary,
            Err(e) => {
                self.store.rollback();
                return Err(e);
            }
        };

        let report = OrderReport {
            order,
            trees,
            max_degree,
            elapsed: timer.elapsed(),
        };
        if self.config.verbose {
            println!(
                "order {:>2}: {:>6} trees, max degree {:>2}, {:.3}s",
                report.order,
                report.trees,
                report.max_degree,
                report.elapsed.as_secs_f32()
            );
        }
        Ok(report)
    }

    /// Reduce all trees of an order; only committed orders are read
    fn reduce_order(&self, order: usize) -> Result<Vec<(Tree, Reduction)>> {
        let trees = self.canonicalizer.trees_of(order)?;
        let trees: &[Tree] = &trees;
        let reducer = Reducer::new(&self.canonicalizer, &*self.store, &self.algebra);
        let reduce = |tree: &Tree| reducer.reduce(tree).map(|r| (tree.clone(), r));

        if self.config.parallel {
            trees.par_iter().map(reduce).collect()
        } else {
            trees.iter().map(reduce).collect()
        }
    }

    /// Insert in enumeration order, then publish the batch
    fn commit_order(&mut self, rows: Vec<(Tree, Reduction)>) -> Result<(usize, usize)> {
        let mut max_degree = 0;
        for (tree, reduction) in &rows {
            max_degree = max_degree.max(reduction.polynomial.degree());
            self.store.put(NewRecord::new(tree, &reduction.polynomial, &self.algebra)?)?;
        }
        self.store.commit_batch()?;
        Ok((rows.len(), max_degree))
    }
}
