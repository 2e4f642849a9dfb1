use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use halo_dfs::{DfsStrategy, GhostToken, GraphSnapshot, TraversalOptions};

const STRATEGIES: [(&str, DfsStrategy); 2] = [
    ("explicit_stack", DfsStrategy::ExplicitStack),
    ("recursive", DfsStrategy::Recursive),
];

fn chain(size: usize) -> GraphSnapshot<i64> {
    let data = (0..size as i64).collect();
    let adjacency = (0..size)
        .map(|i| if i + 1 < size { vec![i + 1] } else { Vec::new() })
        .collect();
    GraphSnapshot::from_adjacency(data, adjacency)
}

fn dense(size: usize) -> GraphSnapshot<i64> {
    // Fixed pseudo-random fan-out of 16 with back edges, so cycles abound.
    let data = (0..size as i64).map(|i| (i * 7919) % 1000).collect();
    let adjacency = (0..size)
        .map(|i| (1..=16).map(|j| (i * 31 + j * 97) % size).collect())
        .collect();
    GraphSnapshot::from_adjacency(data, adjacency)
}

fn bench_reachable(c: &mut Criterion) {
    let mut group = c.benchmark_group("dfs_reachable");
    for (shape, snapshot) in [("chain", chain(10_000)), ("dense", dense(10_000))] {
        group.throughput(Throughput::Elements(snapshot.vertices.len() as u64));
        for (name, strategy) in STRATEGIES {
            group.bench_with_input(BenchmarkId::new(name, shape), &snapshot, |b, snapshot| {
                GhostToken::new(|token| {
                    let arena = snapshot.clone().into_arena().expect("valid snapshot");
                    let root = arena.ids().next();
                    let q = arena.queries_with(&token, TraversalOptions::with_strategy(strategy));
                    b.iter(|| black_box(q.reachable(root).len()));
                });
            });
        }
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let snapshot = dense(10_000);
    GhostToken::new(|token| {
        let arena = snapshot.into_arena().expect("valid snapshot");
        let ids: Vec<_> = arena.ids().collect();
        let (first, last) = (ids.first().copied(), ids.last().copied());

        for (name, strategy) in STRATEGIES {
            let q = arena.queries_with(&token, TraversalOptions::with_strategy(strategy));
            c.bench_function(&format!("dfs_max_{name}"), |b| {
                b.iter(|| black_box(q.max(first)));
            });
            c.bench_function(&format!("dfs_leaves_{name}"), |b| {
                b.iter(|| black_box(q.leaves(first).len()));
            });
            c.bench_function(&format!("dfs_increasing_path_{name}"), |b| {
                b.iter(|| black_box(q.has_strictly_increasing_path(first, last)));
            });
        }
    });
}

criterion_group!(benches, bench_reachable, bench_queries);
criterion_main!(benches);
