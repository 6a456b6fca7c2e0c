//! Adapter that completes the optional graph capabilities.

use crate::graph::{Graph, GraphError, GraphMut, Vertices};
use std::cell::OnceCell;
use std::collections::HashMap;

/// Wraps any [`Graph`] so that predecessors, vertex counts and degrees are
/// always available.
///
/// Members the wrapped graph provides are used directly. Missing ones are
/// derived on first use with a single scan of `successors()` and cached until
/// the graph is mutated through the wrapper.
///
/// # Example
///
/// ```rust
/// use statecraft::graph::{DiGraph, GraphMut, GraphWrapper};
///
/// let mut graph = DiGraph::new();
/// graph.add_vertex("a");
/// graph.add_vertex("b");
/// graph.connect(&"a", &"b").unwrap();
///
/// let wrapper = GraphWrapper::new(graph);
/// assert_eq!(wrapper.in_degree(&"b").unwrap(), 1);
/// assert_eq!(wrapper.vertex_count(), 2);
/// ```
pub struct GraphWrapper<G: Graph> {
    graph: G,
    inverse: OnceCell<HashMap<G::Vertex, Vec<G::Vertex>>>,
    count: OnceCell<usize>,
}

impl<G: Graph> GraphWrapper<G> {
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            inverse: OnceCell::new(),
            count: OnceCell::new(),
        }
    }

    pub fn inner(&self) -> &G {
        &self.graph
    }

    pub fn into_inner(self) -> G {
        self.graph
    }

    pub fn vertices(&self) -> Vertices<'_, G::Vertex> {
        self.graph.vertices()
    }

    pub fn successors(&self, vertex: &G::Vertex) -> Result<Vertices<'_, G::Vertex>, GraphError> {
        self.graph.successors(vertex)
    }

    pub fn contains(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains(vertex)
    }

    /// Vertices with an edge into `vertex`.
    ///
    /// Derived predecessors are listed in vertex iteration order.
    pub fn predecessors(&self, vertex: &G::Vertex) -> Result<Vertices<'_, G::Vertex>, GraphError> {
        if let Some(native) = self.graph.predecessors(vertex) {
            return native;
        }

        let preds = self
            .inverse()?
            .get(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))?;
        Ok(Box::new(preds.iter().cloned()))
    }

    pub fn vertex_count(&self) -> usize {
        if let Some(count) = self.graph.vertex_count() {
            return count;
        }
        *self.count.get_or_init(|| self.graph.vertices().count())
    }

    pub fn in_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        Ok(self.predecessors(vertex)?.count())
    }

    pub fn out_degree(&self, vertex: &G::Vertex) -> Result<usize, GraphError> {
        Ok(self.graph.successors(vertex)?.count())
    }

    fn inverse(&self) -> Result<&HashMap<G::Vertex, Vec<G::Vertex>>, GraphError> {
        if let Some(inverse) = self.inverse.get() {
            return Ok(inverse);
        }

        let mut inverse: HashMap<G::Vertex, Vec<G::Vertex>> =
            self.graph.vertices().map(|v| (v, Vec::new())).collect();
        for vertex in self.graph.vertices() {
            for succ in self.graph.successors(&vertex)? {
                inverse.entry(succ).or_default().push(vertex.clone());
            }
        }

        Ok(self.inverse.get_or_init(|| inverse))
    }

    fn invalidate(&mut self) {
        self.inverse.take();
        self.count.take();
    }
}

impl<G: GraphMut> GraphWrapper<G> {
    pub fn add_vertex(&mut self, vertex: G::Vertex) {
        self.invalidate();
        self.graph.add_vertex(vertex);
    }

    pub fn remove_vertex(&mut self, vertex: &G::Vertex) -> Result<(), GraphError> {
        self.invalidate();
        self.graph.remove_vertex(vertex)
    }

    pub fn connect(&mut self, from: &G::Vertex, to: &G::Vertex) -> Result<(), GraphError> {
        self.invalidate();
        self.graph.connect(from, to)
    }

    pub fn disconnect(&mut self, from: &G::Vertex, to: &G::Vertex) -> Result<(), GraphError> {
        self.invalidate();
        self.graph.disconnect(from, to)
    }

    pub fn clear(&mut self) {
        self.invalidate();
        self.graph.clear();
    }
}
