use criterion::{criterion_group, criterion_main, Criterion};
use sabre::{
    cnf::CnfFormula,
    config::{Config, DecideKind, StoreKind, StrategyKind},
    solver::Solver,
};

/// pigeonhole principle: `pigeons` into `pigeons - 1` holes, UNSAT
fn pigeonhole(pigeons: i32) -> Vec<Vec<i32>> {
    let holes = pigeons - 1;
    let var = |p: i32, h: i32| (p - 1) * holes + h;
    let mut clauses = Vec::new();
    for p in 1..=pigeons {
        clauses.push((1..=holes).map(|h| var(p, h)).collect());
    }
    for h in 1..=holes {
        for p1 in 1..=pigeons {
            for p2 in (p1 + 1)..=pigeons {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    clauses
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole-5");
    group.sample_size(10);
    let clauses = pigeonhole(5);

    let run = |config: &Config| {
        let cnf = CnfFormula::from_vec_i32(clauses.clone()).unwrap();
        let mut solver = Solver::build(config, &cnf).expect("build failed");
        solver.solve().expect("solve failed")
    };

    group.bench_function("dpll-adjacency", |b| {
        let config = Config {
            strategy: StrategyKind::Dpll,
            store: StoreKind::AdjacencyList,
            decide: DecideKind::JeroslowWang,
            ..Config::default()
        };
        b.iter(|| run(&config))
    });
    group.bench_function("cdcl-watched", |b| {
        let config = Config {
            strategy: StrategyKind::Cdcl,
            store: StoreKind::Watched,
            decide: DecideKind::Vsids,
            ..Config::default()
        };
        b.iter(|| run(&config))
    });
    group.bench_function("cdcl-watched-short", |b| {
        let config = Config {
            strategy: StrategyKind::Cdcl,
            store: StoreKind::Watched,
            short_clauses: true,
            decide: DecideKind::Vsids,
            ..Config::default()
        };
        b.iter(|| run(&config))
    });
    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
