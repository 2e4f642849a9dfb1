//! Vertices and the arena that owns them.
//!
//! A graph is a `VertexArena<'brand, T>`: every vertex lives in one slot and is
//! addressed by a branded [`VertexId`]. Neighbor lists store ids, so a vertex
//! can be shared by any number of predecessors and cycles need no owning
//! back-pointers.
//!
//! Neighbor lists sit in `GhostCell`s:
//! - rewiring edges requires `&mut GhostToken<'brand>`
//! - reading them (and therefore every query) requires only `&GhostToken<'brand>`
//!
//! Vertex identity is the slot, never the payload: two vertices holding equal
//! data are distinct.

use core::num::NonZeroUsize;
use core::ops::Index;

use crate::cell::GhostCell;
use crate::graph::queries::GraphQueries;
use crate::graph::traversal::TraversalOptions;
use crate::token::InvariantLifetime;
use crate::GhostToken;

/// Identity of a vertex inside a branded arena.
///
/// Stored 1-based in a `NonZeroUsize`, so `Option<VertexId>` (the "maybe a
/// vertex" argument every query takes) costs no more than a `usize`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VertexId<'brand> {
    idx: NonZeroUsize,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand> VertexId<'brand> {
    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self {
            idx: NonZeroUsize::MIN.saturating_add(index),
            _brand: InvariantLifetime::new(),
        }
    }

    /// Returns the 0-based arena slot of this vertex.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.idx.get() - 1
    }
}

impl core::fmt::Debug for VertexId<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VertexId({})", self.index())
    }
}

/// A graph node: an immutable payload plus an ordered list of outgoing edges.
///
/// The edge list is either absent (`None`) or present and possibly empty;
/// both mean the vertex has no outgoing edges.
pub struct Vertex<'brand, T> {
    data: T,
    neighbors: GhostCell<'brand, Option<Vec<VertexId<'brand>>>>,
}

impl<'brand, T> Vertex<'brand, T> {
    fn new(data: T, neighbors: Option<Vec<VertexId<'brand>>>) -> Self {
        Self {
            data,
            neighbors: GhostCell::new(neighbors),
        }
    }

    /// Returns the vertex payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the raw neighbor list, `None` when it is absent.
    #[inline]
    pub fn neighbor_list<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a [VertexId<'brand>]> {
        self.neighbors.borrow(token).as_deref()
    }

    /// Returns the outgoing edges in insertion order (empty when absent).
    #[inline]
    pub fn neighbors<'a>(&'a self, token: &'a GhostToken<'brand>) -> &'a [VertexId<'brand>] {
        self.neighbor_list(token).unwrap_or(&[])
    }

    /// A leaf has no outgoing edges: its list is absent or empty.
    #[inline]
    pub fn is_leaf(&self, token: &GhostToken<'brand>) -> bool {
        self.neighbors(token).is_empty()
    }
}

/// Arena owning every vertex of one branded graph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(1)\) amortized | Appends a slot |
/// | `add_edge` | \(O(1)\) amortized | Appends to the source's list |
/// | `set_neighbors` | \(O(d)\) | Replaces the whole list |
/// | `out_degree` | \(O(1)\) | `Vec::len` |
/// | `edge_count` | \(O(n)\) | Sums list lengths |
pub struct VertexArena<'brand, T> {
    vertices: Vec<Vertex<'brand, T>>,
}

impl<'brand, T> VertexArena<'brand, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Creates an empty arena with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Adds a vertex with an absent neighbor list and returns its id.
    pub fn add_vertex(&mut self, data: T) -> VertexId<'brand> {
        self.push(data, None)
    }

    pub(crate) fn push(
        &mut self,
        data: T,
        neighbors: Option<Vec<VertexId<'brand>>>,
    ) -> VertexId<'brand> {
        let id = VertexId::from_index(self.vertices.len());
        self.vertices.push(Vertex::new(data, neighbors));
        id
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// Parallel edges and self loops are kept as given.
    ///
    /// # Panics
    /// Panics if `from` or `to` does not belong to this arena.
    pub fn add_edge(&self, token: &mut GhostToken<'brand>, from: VertexId<'brand>, to: VertexId<'brand>) {
        self.check(to);
        self.vertex(from)
            .neighbors
            .borrow_mut(token)
            .get_or_insert_with(Vec::new)
            .push(to);
    }

    /// Replaces the neighbor list of `vertex`, returning the previous one.
    ///
    /// Passing `None` makes the list absent again.
    ///
    /// # Panics
    /// Panics if `vertex` or any neighbor does not belong to this arena.
    pub fn set_neighbors(
        &self,
        token: &mut GhostToken<'brand>,
        vertex: VertexId<'brand>,
        neighbors: Option<Vec<VertexId<'brand>>>,
    ) -> Option<Vec<VertexId<'brand>>> {
        for &n in neighbors.iter().flatten() {
            self.check(n);
        }
        self.vertex(vertex).neighbors.replace(token, neighbors)
    }

    /// Removes every outgoing edge of `vertex`, leaving an empty (present) list.
    ///
    /// # Panics
    /// Panics if `vertex` does not belong to this arena.
    pub fn clear_neighbors(&self, token: &mut GhostToken<'brand>, vertex: VertexId<'brand>) {
        self.vertex(vertex)
            .neighbors
            .borrow_mut(token)
            .get_or_insert_with(Vec::new)
            .clear();
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the arena holds no vertex.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of directed edges, parallel edges counted separately.
    pub fn edge_count(&self, token: &GhostToken<'brand>) -> usize {
        self.vertices.iter().map(|v| v.neighbors(token).len()).sum()
    }

    /// Iterates over every vertex id in slot order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = VertexId<'brand>> + '_ {
        (0..self.vertices.len()).map(VertexId::from_index)
    }

    /// Returns the vertex behind `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    pub fn vertex(&self, id: VertexId<'brand>) -> &Vertex<'brand, T> {
        self.check(id);
        &self.vertices[id.index()]
    }

    /// Returns the vertex behind `id`, or `None` for a foreign id.
    #[inline]
    pub fn get(&self, id: VertexId<'brand>) -> Option<&Vertex<'brand, T>> {
        self.vertices.get(id.index())
    }

    /// Returns the payload of `id`.
    #[inline]
    pub fn data(&self, id: VertexId<'brand>) -> &T {
        self.vertex(id).data()
    }

    /// Returns the outgoing edges of `id` (empty when absent).
    #[inline]
    pub fn neighbors<'a>(&'a self, token: &'a GhostToken<'brand>, id: VertexId<'brand>) -> &'a [VertexId<'brand>] {
        self.vertex(id).neighbors(token)
    }

    /// Returns the out-degree of `id`.
    #[inline]
    pub fn out_degree(&self, token: &GhostToken<'brand>, id: VertexId<'brand>) -> usize {
        self.neighbors(token, id).len()
    }

    /// Returns `true` if `id` has no outgoing edges.
    #[inline]
    pub fn is_leaf(&self, token: &GhostToken<'brand>, id: VertexId<'brand>) -> bool {
        self.vertex(id).is_leaf(token)
    }

    /// Returns a query handle using the default [`TraversalOptions`].
    pub fn queries<'a>(&'a self, token: &'a GhostToken<'brand>) -> GraphQueries<'a, 'brand, T> {
        GraphQueries::new(self, token, TraversalOptions::default())
    }

    /// Returns a query handle using explicit traversal options.
    pub fn queries_with<'a>(
        &'a self,
        token: &'a GhostToken<'brand>,
        options: TraversalOptions,
    ) -> GraphQueries<'a, 'brand, T> {
        GraphQueries::new(self, token, options)
    }

    #[inline(always)]
    fn check(&self, id: VertexId<'brand>) {
        assert!(
            id.index() < self.vertices.len(),
            "vertex {} out of bounds for arena of {} vertices",
            id.index(),
            self.vertices.len()
        );
    }
}

impl<'brand, T> Default for VertexArena<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, T> Index<VertexId<'brand>> for VertexArena<'brand, T> {
    type Output = T;

    fn index(&self, id: VertexId<'brand>) -> &T {
        self.data(id)
    }
}
