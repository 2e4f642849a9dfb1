//! Depth-first traversal over a [`VertexArena`].
//!
//! Two interchangeable strategies are provided:
//! - [`DfsStrategy::ExplicitStack`]: a heap-allocated stack, safe on arbitrarily deep graphs
//! - [`DfsStrategy::Recursive`]: call-stack recursion, bounded by the thread's stack size
//!
//! Both visit vertices in the same pre-order (first neighbor first) and mark
//! each vertex at most once, so cycles always terminate.

use core::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::access::visited::VisitedSet;
use crate::graph::vertex::{VertexArena, VertexId};
use crate::GhostToken;

/// How a query walks the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DfsStrategy {
    /// Iterative DFS driven by an explicit `Vec` stack.
    #[default]
    ExplicitStack,
    /// Classical recursive DFS.
    Recursive,
}

/// Options shared by every query of a [`GraphQueries`](crate::GraphQueries) handle.
///
/// Deserializes from JSON such as `{"strategy": "recursive"}`; missing fields
/// take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalOptions {
    /// Traversal strategy.
    pub strategy: DfsStrategy,
}

impl TraversalOptions {
    /// Options using `strategy`.
    pub const fn with_strategy(strategy: DfsStrategy) -> Self {
        Self { strategy }
    }

    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An iterator for Depth-First Search (DFS).
///
/// Yields vertex ids in DFS pre-order. Neighbors are pushed in reverse so the
/// first listed neighbor is explored first, matching the recursive order.
pub struct Dfs<'a, 'brand, T> {
    arena: &'a VertexArena<'brand, T>,
    token: &'a GhostToken<'brand>,
    visited: VisitedSet<'brand>,
    stack: Vec<VertexId<'brand>>,
}

impl<'a, 'brand, T> Dfs<'a, 'brand, T> {
    /// Creates a DFS iterator rooted at `start`; `None` yields nothing.
    pub fn new(
        arena: &'a VertexArena<'brand, T>,
        token: &'a GhostToken<'brand>,
        start: Option<VertexId<'brand>>,
    ) -> Self {
        let visited = VisitedSet::new(arena.len());
        debug_assert_eq!(visited.capacity(), arena.len());
        Self {
            arena,
            token,
            visited,
            stack: start.into_iter().collect(),
        }
    }

    /// Number of vertices yielded so far.
    pub fn visited_count(&self) -> usize {
        self.visited.count()
    }
}

impl<'a, 'brand, T> Iterator for Dfs<'a, 'brand, T> {
    type Item = VertexId<'brand>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let u = self.stack.pop()?;
            if !self.visited.try_visit(u) {
                continue;
            }
            for &v in self.arena.neighbors(self.token, u).iter().rev() {
                if !self.visited.is_visited(v) {
                    self.stack.push(v);
                }
            }
            return Some(u);
        }
    }
}

/// Walks every vertex reachable from `start`, calling `visit` once per vertex
/// until it breaks.
pub(crate) fn walk<'brand, T, B>(
    arena: &VertexArena<'brand, T>,
    token: &GhostToken<'brand>,
    start: VertexId<'brand>,
    strategy: DfsStrategy,
    visit: impl FnMut(VertexId<'brand>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    walk_guarded(arena, token, start, strategy, |_, _| true, visit)
}

/// Like [`walk`], but only follows an edge `u -> v` when `admit(u, v)` holds.
///
/// A vertex is entered at most once even if several admitted edges reach it.
pub(crate) fn walk_guarded<'brand, T, B>(
    arena: &VertexArena<'brand, T>,
    token: &GhostToken<'brand>,
    start: VertexId<'brand>,
    strategy: DfsStrategy,
    mut admit: impl FnMut(VertexId<'brand>, VertexId<'brand>) -> bool,
    mut visit: impl FnMut(VertexId<'brand>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let mut visited = VisitedSet::new(arena.len());
    match strategy {
        DfsStrategy::ExplicitStack => {
            let mut stack = vec![start];
            while let Some(u) = stack.pop() {
                if !visited.try_visit(u) {
                    continue;
                }
                if let ControlFlow::Break(b) = visit(u) {
                    return ControlFlow::Break(b);
                }
                for &v in arena.neighbors(token, u).iter().rev() {
                    if !visited.is_visited(v) && admit(u, v) {
                        stack.push(v);
                    }
                }
            }
            ControlFlow::Continue(())
        }
        DfsStrategy::Recursive => {
            recurse(arena, token, start, &mut visited, &mut admit, &mut visit)
        }
    }
}

fn recurse<'brand, T, B>(
    arena: &VertexArena<'brand, T>,
    token: &GhostToken<'brand>,
    u: VertexId<'brand>,
    visited: &mut VisitedSet<'brand>,
    admit: &mut impl FnMut(VertexId<'brand>, VertexId<'brand>) -> bool,
    visit: &mut impl FnMut(VertexId<'brand>) -> ControlFlow<B>,
) -> ControlFlow<B> {
    if !visited.try_visit(u) {
        return ControlFlow::Continue(());
    }
    if let ControlFlow::Break(b) = visit(u) {
        return ControlFlow::Break(b);
    }
    for &v in arena.neighbors(token, u) {
        if !visited.is_visited(v) && admit(u, v) {
            if let ControlFlow::Break(b) = recurse(arena, token, v, visited, admit, visit) {
                return ControlFlow::Break(b);
            }
        }
    }
    ControlFlow::Continue(())
}
