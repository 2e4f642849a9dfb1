//! Reachability-based queries over a branded vertex arena.
//!
//! Every query is a depth-first walk from a root that may be absent
//! (`Option<VertexId>`). An absent root degrades gracefully: empty sets,
//! a vacuous `true`, or the integer minimum for [`GraphQueries::max`].
//! [`GraphQueries::has_strictly_increasing_path`] is the exception: it needs
//! both endpoints and rejects a missing one with [`GraphError::MissingVertex`].
//!
//! Queries hold only shared borrows of the arena and `&GhostToken`, so the
//! graph cannot change while they run.

use core::fmt::Display;
use core::ops::ControlFlow;
use std::collections::HashSet;
use std::io::{self, Write};

use num_traits::PrimInt;

use crate::error::{GraphError, Result};
use crate::graph::traversal::{walk, walk_guarded, Dfs, TraversalOptions};
use crate::graph::vertex::{VertexArena, VertexId};
use crate::GhostToken;

/// A read-only query handle over one arena.
///
/// Obtained from [`VertexArena::queries`] or [`VertexArena::queries_with`].
pub struct GraphQueries<'a, 'brand, T> {
    arena: &'a VertexArena<'brand, T>,
    token: &'a GhostToken<'brand>,
    options: TraversalOptions,
}

impl<'a, 'brand, T> Clone for GraphQueries<'a, 'brand, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, 'brand, T> Copy for GraphQueries<'a, 'brand, T> {}

impl<'a, 'brand, T> GraphQueries<'a, 'brand, T> {
    pub(crate) fn new(
        arena: &'a VertexArena<'brand, T>,
        token: &'a GhostToken<'brand>,
        options: TraversalOptions,
    ) -> Self {
        Self {
            arena,
            token,
            options,
        }
    }

    /// Returns the traversal options in effect.
    pub fn options(&self) -> TraversalOptions {
        self.options
    }

    /// Returns the arena being queried.
    pub fn arena(&self) -> &'a VertexArena<'brand, T> {
        self.arena
    }

    /// Lazily iterates the vertices reachable from `start` in DFS pre-order.
    ///
    /// Always uses the explicit stack, whatever the configured strategy.
    pub fn dfs(&self, start: Option<VertexId<'brand>>) -> Dfs<'a, 'brand, T> {
        Dfs::new(self.arena, self.token, start)
    }

    /// Calls `visit` for each vertex reachable from `start` until it breaks.
    fn for_each_reachable<B>(
        &self,
        start: Option<VertexId<'brand>>,
        visit: impl FnMut(VertexId<'brand>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        match start {
            Some(start) => walk(self.arena, self.token, start, self.options.strategy, visit),
            None => ControlFlow::Continue(()),
        }
    }

    /// Returns every vertex reachable from `start`, `start` included.
    ///
    /// `None` yields an empty set. Cycles terminate and each vertex appears once.
    ///
    /// # Panics
    /// Panics if `start` does not belong to the arena.
    pub fn reachable(&self, start: Option<VertexId<'brand>>) -> HashSet<VertexId<'brand>> {
        let mut reached = HashSet::new();
        let _ = self.for_each_reachable(start, |v| {
            reached.insert(v);
            ControlFlow::<()>::Continue(())
        });
        trace_event!(
            strategy = ?self.options.strategy,
            reached = reached.len(),
            "reachable"
        );
        reached
    }

    /// Counts the vertices reachable from `start` without materializing them.
    pub fn reachable_count(&self, start: Option<VertexId<'brand>>) -> usize {
        let mut count = 0usize;
        let _ = self.for_each_reachable(start, |_| {
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        count
    }

    /// Returns the reachable vertices that have no outgoing edges.
    ///
    /// `start` itself is included when it is a leaf. `None` yields an empty set.
    pub fn leaves(&self, start: Option<VertexId<'brand>>) -> HashSet<VertexId<'brand>> {
        let mut leaves = HashSet::new();
        let _ = self.for_each_reachable(start, |v| {
            if self.arena.is_leaf(self.token, v) {
                leaves.insert(v);
            }
            ControlFlow::<()>::Continue(())
        });
        trace_event!(
            strategy = ?self.options.strategy,
            leaves = leaves.len(),
            "leaves"
        );
        leaves
    }
}

impl<'a, 'brand, T: Display> GraphQueries<'a, 'brand, T> {
    /// Writes the value of every vertex reachable from `start`, one per line.
    ///
    /// Each value is written once; the order is the traversal order. `None`
    /// writes nothing.
    pub fn print_vertex_vals<W: Write + ?Sized>(
        &self,
        start: Option<VertexId<'brand>>,
        out: &mut W,
    ) -> Result<()> {
        let flow = self.for_each_reachable(start, |v| match writeln!(out, "{}", self.arena[v]) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => ControlFlow::Break(err),
        });
        match flow {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(err) => Err(GraphError::Io(err)),
        }
    }

    /// [`print_vertex_vals`](Self::print_vertex_vals) to standard output.
    pub fn print_vertex_vals_stdout(&self, start: Option<VertexId<'brand>>) -> Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.print_vertex_vals(start, &mut lock)?;
        lock.flush()?;
        Ok(())
    }
}

impl<'a, 'brand, T: PrimInt> GraphQueries<'a, 'brand, T> {
    /// Returns the largest value reachable from `start`.
    ///
    /// `None` returns `T::min_value()` (`i32::MIN` for `i32` graphs). The
    /// sentinel is indistinguishable from a graph whose maximum really is the
    /// minimum; callers that care should check `start` first.
    pub fn max(&self, start: Option<VertexId<'brand>>) -> T {
        let mut max = T::min_value();
        let _ = self.for_each_reachable(start, |v| {
            max = max.max(self.arena[v]);
            ControlFlow::<()>::Continue(())
        });
        max
    }

    /// Returns `true` iff every vertex reachable from `start` holds an odd value.
    ///
    /// Stops at the first even value. `None` is vacuously `true`.
    pub fn all_odd(&self, start: Option<VertexId<'brand>>) -> bool {
        let two = T::one() + T::one();
        let flow = self.for_each_reachable(start, |v| {
            if self.arena[v] % two == T::zero() {
                ControlFlow::Break(v)
            } else {
                ControlFlow::Continue(())
            }
        });
        match flow {
            ControlFlow::Continue(()) => true,
            ControlFlow::Break(_even) => {
                trace_event!(vertex = _even.index(), "all_odd: even value found");
                false
            }
        }
    }
}

impl<'a, 'brand, T: PartialOrd> GraphQueries<'a, 'brand, T> {
    /// Returns whether a directed path from `start` to `end` exists along which
    /// every next vertex holds a strictly greater value than the previous one.
    ///
    /// `start == end` is the zero-length path and always succeeds. `end` is
    /// matched by identity, not by value.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `start` or `end` is `None`
    /// (`start` is checked first).
    pub fn has_strictly_increasing_path(
        &self,
        start: Option<VertexId<'brand>>,
        end: Option<VertexId<'brand>>,
    ) -> Result<bool> {
        let start = start.ok_or_else(|| missing("start"))?;
        let end = end.ok_or_else(|| missing("end"))?;

        let arena = self.arena;
        let flow = walk_guarded(
            arena,
            self.token,
            start,
            self.options.strategy,
            |u, v| arena[v] > arena[u],
            |v| {
                if v == end {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        let found = flow.is_break();
        trace_event!(
            start = start.index(),
            end = end.index(),
            found,
            "has_strictly_increasing_path"
        );
        Ok(found)
    }
}

fn missing(argument: &'static str) -> GraphError {
    debug_event!(argument, "rejecting missing vertex argument");
    GraphError::MissingVertex { argument }
}
