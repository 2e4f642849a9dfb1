//! # `halo_dfs` - Branded depth-first graph queries
//!
//! Depth-first queries over a directed graph of labeled vertices, built on
//! halo's ghost-token discipline:
//!
//! - reachability (`reachable`, `reachable_count`, a lazy `Dfs` iterator)
//! - printing every reachable value
//! - maximum reachable value
//! - reachable leaves
//! - "every reachable value is odd"
//! - existence of a strictly increasing path between two vertices
//!
//! ## Architecture
//!
//! A graph is a [`VertexArena<'brand, T>`](VertexArena). Vertices are
//! addressed by branded [`VertexId`]s, so identity is the arena slot and never
//! the payload, and shared or cyclic references need no owning pointers.
//! Neighbor lists live in [`GhostCell`]s: rewiring requires
//! `&mut GhostToken<'brand>` while every query takes `&GhostToken<'brand>`,
//! so a traversal can never observe a graph being mutated.
//!
//! A root that may be absent is an `Option<VertexId>`. Queries over an absent
//! root degrade to empty/vacuous results; only the increasing-path query,
//! which needs both endpoints, rejects one with [`GraphError::MissingVertex`].
//!
//! ## Example
//!
//! ```rust
//! use halo_dfs::{GhostToken, VertexArena};
//!
//! GhostToken::new(|mut token| {
//!     let mut arena = VertexArena::new();
//!     let a = arena.add_vertex(1);
//!     let b = arena.add_vertex(3);
//!     let c = arena.add_vertex(5);
//!     arena.add_edge(&mut token, a, b);
//!     arena.add_edge(&mut token, b, c);
//!     arena.add_edge(&mut token, c, a);
//!
//!     let q = arena.queries(&token);
//!     assert_eq!(q.reachable(Some(b)).len(), 3);
//!     assert_eq!(q.max(Some(a)), 5);
//!     assert!(q.all_odd(Some(a)));
//!     assert!(q.leaves(Some(a)).is_empty());
//!     assert!(q.has_strictly_increasing_path(Some(a), Some(c)).unwrap());
//!     assert!(!q.has_strictly_increasing_path(Some(c), Some(b)).unwrap());
//! });
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod cell;
pub mod error;
pub mod graph;
pub mod token;

pub use cell::GhostCell;
pub use error::{GraphError, Result};
pub use graph::{
    Dfs, DfsStrategy, GraphQueries, GraphSnapshot, TraversalOptions, Vertex, VertexArena, VertexId,
    VertexSnapshot,
};
pub use token::GhostToken;

const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // `Option<VertexId>` is the "maybe a vertex" argument of every query.
    assert!(mem::size_of::<Option<VertexId<'static>>>() == mem::size_of::<usize>());

    // `GhostCell` adds nothing over the `UnsafeCell` it wraps.
    assert!(
        mem::size_of::<GhostCell<'static, Option<Vec<usize>>>>() == mem::size_of::<Option<Vec<usize>>>()
    );
};
