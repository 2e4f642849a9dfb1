//! Errors raised by graph construction and queries.
//!
//! Most queries never fail: a missing start vertex degrades to an empty set,
//! a vacuous `true`, or the integer minimum. Only the operations that cannot
//! produce a meaningful answer without their inputs return a [`GraphError`].

use thiserror::Error;

/// Errors produced by `halo_dfs`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A required vertex argument was absent.
    #[error("required vertex argument `{argument}` is missing")]
    MissingVertex {
        /// Name of the missing argument (`"start"` or `"end"`).
        argument: &'static str,
    },

    /// A snapshot names a neighbor index outside the vertex table.
    #[error("vertex {vertex} lists neighbor {neighbor}, but the graph has only {len} vertices")]
    NeighborOutOfBounds {
        /// Index of the vertex whose neighbor list is invalid.
        vertex: usize,
        /// The offending neighbor index.
        neighbor: usize,
        /// Number of vertices in the snapshot.
        len: usize,
    },

    /// Writing vertex values failed.
    #[error("failed to write vertex values")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded as JSON.
    #[error("invalid graph snapshot JSON")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = core::result::Result<T, E>;
