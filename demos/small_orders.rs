//! Independence polynomials of every tree on 3 to 6 vertices

use indpoly::prelude::*;
use indpoly::utils::timing::Timer;

fn main() -> Result<()> {
    println!("=== Independence Polynomials of Small Trees ===\n");

    let timer = Timer::new("orders 3..=6");
    let mut store = MemoryStore::new();
    let reports = Orchestrator::new(&mut store, PopulateConfig::full(6).quiet()).run()?;
    timer.print();

    let algebra = PolynomialAlgebra::default();
    for report in &reports {
        println!("\nOrder {} ({} trees):", report.order, report.trees);
        for record in store.records().iter().filter(|r| r.order == report.order) {
            let poly = record.decode(&algebra)?;
            println!("  {:<40} {}", record.edge_set, algebra.render(&poly));
        }
    }

    // Any labeling resolves through the store
    let caterpillar = TreeBuilder::new()
        .add_edge(0, 1)
        .add_edge(1, 2)
        .add_edge(2, 3)
        .add_edge(1, 4)
        .add_edge(2, 5)
        .add_edge(3, 6)
        .build()?;

    let mut canonicalizer = Canonicalizer::new();
    canonicalizer.prepare(7)?;
    let reducer = Reducer::new(&canonicalizer, &store, &algebra);
    let reduction = reducer.reduce(&caterpillar)?;

    println!("\nOrder-7 caterpillar {}", caterpillar.edge_set_key());
    println!("  I(T, x) = {}", algebra.render(&reduction.polynomial));
    if let Some(count) = reduction.polynomial.evaluate(1) {
        println!("  I(T, 1) = {} independent sets", count);
    }

    Ok(())
}
