//! Benchmarks for the spin hot path: pool draws, payout evaluation and a
//! full simulated batch.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lucky_frogs::simulate::{SimulationConfig, run_simulation};
use lucky_frogs::{Pool, SymbolTable, evaluate};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_pool_draw(c: &mut Criterion) {
    let table = SymbolTable::defaults();
    let pool = Pool::build(&table);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("pool_draw", |b| {
        b.iter(|| black_box(pool.draw(&mut rng)));
    });

    c.bench_function("pool_build", |b| {
        b.iter(|| black_box(Pool::build(black_box(&table))));
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let table = SymbolTable::defaults();
    let get = |id: &str| table.get(id).map_or_else(|| panic!("missing {id}"), |s| s);
    let cases = [
        ("evaluate_three_cherries", [get("cherry"), get("cherry"), get("cherry")]),
        ("evaluate_wild_mix", [get("frog"), get("wild"), get("bell")]),
        ("evaluate_skulls", [get("skull"), get("wild"), get("skull")]),
        ("evaluate_no_win", [get("cherry"), get("lemon"), get("grape")]),
    ];

    for (name, centers) in cases {
        c.bench_function(name, |b| {
            b.iter(|| black_box(evaluate(&table, black_box(centers), black_box(10))));
        });
    }
}

fn bench_simulation(c: &mut Criterion) {
    let table = SymbolTable::defaults();
    let config = SimulationConfig {
        spins: 100_000,
        ..SimulationConfig::default()
    };

    c.bench_function("simulate_100k", |b| {
        b.iter(|| black_box(run_simulation(&table, black_box(&config), |_| {})));
    });
}

criterion_group!(benches, bench_pool_draw, bench_evaluate, bench_simulation);
criterion_main!(benches);
