//! `GhostToken` - the capability that gates every branded graph.
//!
//! A token is a zero-sized value branded with a fresh, invariant lifetime.
//! Arenas, cells and vertex ids created inside one `GhostToken::new` scope
//! share that brand and cannot be mixed with those of another scope.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is **not** `Copy`/`Clone`. Wiring edges requires
//! `&mut GhostToken<'brand>`, every query requires only `&GhostToken<'brand>`,
//! so no traversal can observe a graph that is being mutated.

/// Invariant lifetime definitions for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token that controls access to branded graph state.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// The closure is generic over the brand, so nothing branded can escape
    /// the scope or be confused with another scope's data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use halo_dfs::{GhostToken, VertexArena};
    ///
    /// let count = GhostToken::new(|mut token| {
    ///     let mut arena = VertexArena::new();
    ///     let a = arena.add_vertex(1);
    ///     let b = arena.add_vertex(2);
    ///     arena.add_edge(&mut token, a, b);
    ///     arena.queries(&token).reachable(Some(a)).len()
    /// });
    /// assert_eq!(count, 2);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Returns a reference to the token (useful for capturing in closures).
    #[inline(always)]
    pub const fn as_ref(&self) -> &Self {
        self
    }
}

// SAFETY: the token carries no data. Sharing `&GhostToken<'brand>` only
// enables token-gated reads, which the cells bound on `T: Sync`.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
