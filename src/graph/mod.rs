//! Branded vertex graphs and the depth-first queries over them.
//!
//! - `vertex`: the arena, its vertices and branded ids
//! - `traversal`: DFS strategies, options and the `Dfs` iterator
//! - `queries`: reachability, leaves, extrema and monotone-path queries
//! - `snapshot`: serializable graph descriptions

pub(crate) mod access;
pub mod queries;
pub mod snapshot;
pub mod traversal;
pub mod vertex;

pub use queries::GraphQueries;
pub use snapshot::{GraphSnapshot, VertexSnapshot};
pub use traversal::{Dfs, DfsStrategy, TraversalOptions};
pub use vertex::{Vertex, VertexArena, VertexId};
