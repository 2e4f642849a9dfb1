use std::collections::HashSet;

use halo_dfs::{DfsStrategy, GhostToken, GraphSnapshot, TraversalOptions, VertexId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs as PetDfs;
use proptest::prelude::*;

/// Random graphs of up to 24 vertices with small (possibly negative) values.
fn graphs() -> impl Strategy<Value = GraphSnapshot<i32>> {
    (1usize..24).prop_flat_map(|n| {
        (
            proptest::collection::vec(-50i32..50, n),
            proptest::collection::vec(proptest::collection::vec(0..n, 0..4), n),
        )
            .prop_map(|(data, adjacency)| GraphSnapshot::from_adjacency(data, adjacency))
    })
}

fn to_petgraph(snapshot: &GraphSnapshot<i32>) -> DiGraph<i32, ()> {
    let mut g = DiGraph::new();
    let nodes: Vec<NodeIndex> = snapshot.vertices.iter().map(|v| g.add_node(v.data)).collect();
    for (u, v) in snapshot.vertices.iter().enumerate() {
        for &n in v.neighbors.iter().flatten() {
            g.add_edge(nodes[u], nodes[n], ());
        }
    }
    g
}

/// Reference check: a BFS over edges `u -> v` with `data[v] > data[u]`.
fn increasing_reference(snapshot: &GraphSnapshot<i32>, start: usize, end: usize) -> bool {
    let mut seen = vec![false; snapshot.vertices.len()];
    let mut queue = std::collections::VecDeque::from([start]);
    seen[start] = true;
    while let Some(u) = queue.pop_front() {
        if u == end {
            return true;
        }
        for &v in snapshot.vertices[u].neighbors.iter().flatten() {
            if !seen[v] && snapshot.vertices[v].data > snapshot.vertices[u].data {
                seen[v] = true;
                queue.push_back(v);
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn reachable_matches_petgraph(snapshot in graphs(), root in any::<prop::sample::Index>()) {
        let pet = to_petgraph(&snapshot);
        let start = root.index(snapshot.vertices.len());

        let mut expected = HashSet::new();
        let mut dfs = PetDfs::new(&pet, NodeIndex::new(start));
        while let Some(n) = dfs.next(&pet) {
            expected.insert(n.index());
        }

        GhostToken::new(|token| {
            let arena = snapshot.clone().into_arena().unwrap();
            let ids: Vec<VertexId<'_>> = arena.ids().collect();

            for strategy in [DfsStrategy::ExplicitStack, DfsStrategy::Recursive] {
                let q = arena.queries_with(&token, TraversalOptions::with_strategy(strategy));
                let reached: HashSet<usize> =
                    q.reachable(Some(ids[start])).into_iter().map(VertexId::index).collect();
                assert_eq!(&reached, &expected);
                assert!(reached.contains(&start));
                for &v in &reached {
                    for n in arena.neighbors(&token, ids[v]) {
                        assert!(reached.contains(&n.index()), "not closed under one hop");
                    }
                }
            }

            let order: Vec<usize> = arena.queries(&token).dfs(Some(ids[start])).map(VertexId::index).collect();
            assert_eq!(order.len(), expected.len());
            assert_eq!(order[0], start);
        });
    }

    #[test]
    fn derived_queries_agree_with_reachable(snapshot in graphs(), root in any::<prop::sample::Index>()) {
        let start = root.index(snapshot.vertices.len());

        GhostToken::new(|token| {
            let arena = snapshot.clone().into_arena().unwrap();
            let ids: Vec<VertexId<'_>> = arena.ids().collect();

            let stack = arena.queries_with(&token, TraversalOptions::with_strategy(DfsStrategy::ExplicitStack));
            let recursive = arena.queries_with(&token, TraversalOptions::with_strategy(DfsStrategy::Recursive));
            let reached = stack.reachable(Some(ids[start]));

            let leaves: HashSet<_> = reached
                .iter()
                .copied()
                .filter(|&v| arena.neighbors(&token, v).is_empty())
                .collect();
            assert_eq!(stack.leaves(Some(ids[start])), leaves.clone());
            assert_eq!(recursive.leaves(Some(ids[start])), leaves);

            let max = reached.iter().map(|&v| arena[v]).max().unwrap();
            assert_eq!(stack.max(Some(ids[start])), max);
            assert_eq!(recursive.max(Some(ids[start])), max);

            let all_odd = reached.iter().all(|&v| arena[v] % 2 != 0);
            assert_eq!(stack.all_odd(Some(ids[start])), all_odd);
            assert_eq!(recursive.all_odd(Some(ids[start])), all_odd);
        });
    }

    #[test]
    fn increasing_path_matches_reference(
        snapshot in graphs(),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        let n = snapshot.vertices.len();
        let (start, end) = (from.index(n), to.index(n));
        let expected = increasing_reference(&snapshot, start, end);

        GhostToken::new(|token| {
            let arena = snapshot.clone().into_arena().unwrap();
            let ids: Vec<VertexId<'_>> = arena.ids().collect();
            for strategy in [DfsStrategy::ExplicitStack, DfsStrategy::Recursive] {
                let q = arena.queries_with(&token, TraversalOptions::with_strategy(strategy));
                let found = q.has_strictly_increasing_path(Some(ids[start]), Some(ids[end])).unwrap();
                assert_eq!(found, expected, "strategy {strategy:?}, {start} -> {end}");
            }
        });
    }
}
