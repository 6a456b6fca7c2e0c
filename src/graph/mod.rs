//! Graph capability traits.
//!
//! Any directed graph can take part by implementing [`Graph`]: a finite vertex
//! set and a successor relation. Predecessors and vertex counts are optional
//! capabilities; [`GraphWrapper`] supplies them for graphs that lack them.
//! Mutation lives in the separate [`GraphMut`] trait.
//!
//! The [`Blueprint`](crate::engine::Blueprint) of a state machine is itself a
//! graph with state names as vertices.

mod digraph;
mod error;
mod traversal;
mod wrapper;

pub use digraph::DiGraph;
pub use error::GraphError;
pub use traversal::{breadth_first, is_tree};
pub use wrapper::GraphWrapper;

use std::fmt::Debug;
use std::hash::Hash;

/// Lazy, finite iterator over vertices. Calling the producing method again
/// restarts the iteration.
pub type Vertices<'a, V> = Box<dyn Iterator<Item = V> + 'a>;

/// Read access to a directed graph.
pub trait Graph {
    /// Vertex representation.
    type Vertex: Clone + Eq + Hash + Debug;

    /// All vertices, each exactly once.
    fn vertices(&self) -> Vertices<'_, Self::Vertex>;

    /// Vertices reachable from `vertex` along one edge.
    ///
    /// Fails with [`GraphError::NotFound`] if `vertex` is absent.
    fn successors(&self, vertex: &Self::Vertex) -> Result<Vertices<'_, Self::Vertex>, GraphError>;

    /// Vertices with an edge into `vertex`, if the graph tracks them.
    ///
    /// `None` means the capability is absent. When present, `b` is a
    /// predecessor of `a` exactly when `a` is a successor of `b`.
    fn predecessors(
        &self,
        _vertex: &Self::Vertex,
    ) -> Option<Result<Vertices<'_, Self::Vertex>, GraphError>> {
        None
    }

    /// Number of vertices, if known without a scan.
    fn vertex_count(&self) -> Option<usize> {
        None
    }

    fn contains(&self, vertex: &Self::Vertex) -> bool {
        self.vertices().any(|v| &v == vertex)
    }
}

/// Structural mutation of a graph.
pub trait GraphMut: Graph {
    /// Add `vertex`. Adding a vertex that is already present keeps its edges.
    fn add_vertex(&mut self, vertex: Self::Vertex);

    /// Remove `vertex` along with every edge touching it.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> Result<(), GraphError>;

    /// Add an edge so that `to` becomes a successor of `from`.
    fn connect(&mut self, from: &Self::Vertex, to: &Self::Vertex) -> Result<(), GraphError>;

    /// Remove the edge from `from` to `to`.
    fn disconnect(&mut self, from: &Self::Vertex, to: &Self::Vertex) -> Result<(), GraphError>;

    /// Remove every vertex.
    fn clear(&mut self) {
        let all: Vec<Self::Vertex> = self.vertices().collect();
        for vertex in &all {
            // Listed by vertices(), so present.
            let _ = self.remove_vertex(vertex);
        }
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    type Vertex = G::Vertex;

    fn vertices(&self) -> Vertices<'_, Self::Vertex> {
        (**self).vertices()
    }

    fn successors(&self, vertex: &Self::Vertex) -> Result<Vertices<'_, Self::Vertex>, GraphError> {
        (**self).successors(vertex)
    }

    fn predecessors(
        &self,
        vertex: &Self::Vertex,
    ) -> Option<Result<Vertices<'_, Self::Vertex>, GraphError>> {
        (**self).predecessors(vertex)
    }

    fn vertex_count(&self) -> Option<usize> {
        (**self).vertex_count()
    }

    fn contains(&self, vertex: &Self::Vertex) -> bool {
        (**self).contains(vertex)
    }
}
