//! Plain, serializable description of a graph.
//!
//! A [`GraphSnapshot`] names vertices by position; building an arena from it
//! validates every neighbor index. The JSON shape is
//!
//! ```json
//! { "vertices": [ { "data": 1, "neighbors": [1] }, { "data": 3, "neighbors": null } ] }
//! ```
//!
//! where `neighbors` may be omitted or `null` for an absent list.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::vertex::{VertexArena, VertexId};
use crate::GhostToken;

/// One vertex of a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSnapshot<T> {
    /// Vertex payload.
    pub data: T,
    /// Outgoing edges as positions in [`GraphSnapshot::vertices`].
    #[serde(default)]
    pub neighbors: Option<Vec<usize>>,
}

/// A position-indexed graph description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot<T> {
    /// Vertices in slot order.
    pub vertices: Vec<VertexSnapshot<T>>,
}

impl<T> GraphSnapshot<T> {
    /// Builds a snapshot from payloads and adjacency lists of equal length.
    ///
    /// # Panics
    /// Panics if the two sequences differ in length.
    pub fn from_adjacency(data: Vec<T>, adjacency: Vec<Vec<usize>>) -> Self {
        assert_eq!(
            data.len(),
            adjacency.len(),
            "payload count does not match adjacency list count"
        );
        let vertices = data
            .into_iter()
            .zip(adjacency)
            .map(|(data, neighbors)| VertexSnapshot {
                data,
                neighbors: Some(neighbors),
            })
            .collect();
        Self { vertices }
    }

    /// Checks that every neighbor index names a vertex.
    pub fn validate(&self) -> Result<()> {
        let len = self.vertices.len();
        for (vertex, v) in self.vertices.iter().enumerate() {
            if let Some(&neighbor) = v.neighbors.iter().flatten().find(|&&n| n >= len) {
                return Err(GraphError::NeighborOutOfBounds {
                    vertex,
                    neighbor,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Builds a branded arena; vertex `i` of the snapshot gets slot `i`.
    pub fn into_arena<'brand>(self) -> Result<VertexArena<'brand, T>> {
        self.validate()?;
        let mut arena = VertexArena::with_capacity(self.vertices.len());
        for v in self.vertices {
            let neighbors = v
                .neighbors
                .map(|list| list.into_iter().map(VertexId::from_index).collect());
            arena.push(v.data, neighbors);
        }
        Ok(arena)
    }
}

impl<T: Serialize> GraphSnapshot<T> {
    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: for<'de> Deserialize<'de>> GraphSnapshot<T> {
    /// Decodes a snapshot from JSON. Neighbor indices are checked later, by
    /// [`validate`](Self::validate) or [`into_arena`](Self::into_arena).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<'brand, T: Clone> VertexArena<'brand, T> {
    /// Captures the current vertices and edges.
    pub fn snapshot(&self, token: &GhostToken<'brand>) -> GraphSnapshot<T> {
        let vertices = self
            .ids()
            .map(|id| {
                let vertex = self.vertex(id);
                VertexSnapshot {
                    data: vertex.data().clone(),
                    neighbors: vertex
                        .neighbor_list(token)
                        .map(|list| list.iter().map(|n| n.index()).collect()),
                }
            })
            .collect();
        GraphSnapshot { vertices }
    }
}

impl<'brand, T> VertexArena<'brand, T> {
    /// Builds an arena from a snapshot.
    pub fn from_snapshot(snapshot: GraphSnapshot<T>) -> Result<Self> {
        snapshot.into_arena()
    }
}
