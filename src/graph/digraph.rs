//! In-memory directed graph.

use crate::graph::{Graph, GraphError, GraphMut, Vertices};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Directed graph with native predecessor tracking.
///
/// Vertices iterate in insertion order; successors and predecessors in the
/// order their edges were connected. Parallel edges are not kept.
#[derive(Debug, Clone)]
pub struct DiGraph<V> {
    order: Vec<V>,
    succ: HashMap<V, Vec<V>>,
    pred: HashMap<V, Vec<V>>,
}

impl<V: Clone + Eq + Hash + Debug> DiGraph<V> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            succ: HashMap::new(),
            pred: HashMap::new(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.order.len()
    }

    /// Number of edges coming into `vertex`.
    pub fn in_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.pred
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::not_found(vertex))
    }

    /// Number of edges leaving `vertex`.
    pub fn out_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        self.succ
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::not_found(vertex))
    }

    fn require(&self, vertex: &V) -> Result<(), GraphError> {
        if self.succ.contains_key(vertex) {
            Ok(())
        } else {
            Err(GraphError::not_found(vertex))
        }
    }
}

impl<V: Clone + Eq + Hash + Debug> Default for DiGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash + Debug> Graph for DiGraph<V> {
    type Vertex = V;

    fn vertices(&self) -> Vertices<'_, V> {
        Box::new(self.order.iter().cloned())
    }

    fn successors(&self, vertex: &V) -> Result<Vertices<'_, V>, GraphError> {
        let succ = self
            .succ
            .get(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))?;
        Ok(Box::new(succ.iter().cloned()))
    }

    fn predecessors(&self, vertex: &V) -> Option<Result<Vertices<'_, V>, GraphError>> {
        let pred = match self.pred.get(vertex) {
            Some(pred) => pred,
            None => return Some(Err(GraphError::not_found(vertex))),
        };
        Some(Ok(Box::new(pred.iter().cloned())))
    }

    fn vertex_count(&self) -> Option<usize> {
        Some(self.order.len())
    }

    fn contains(&self, vertex: &V) -> bool {
        self.succ.contains_key(vertex)
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphMut for DiGraph<V> {
    fn add_vertex(&mut self, vertex: V) {
        if self.succ.contains_key(&vertex) {
            return;
        }
        self.succ.insert(vertex.clone(), Vec::new());
        self.pred.insert(vertex.clone(), Vec::new());
        self.order.push(vertex);
    }

    fn remove_vertex(&mut self, vertex: &V) -> Result<(), GraphError> {
        let outgoing = self
            .succ
            .remove(vertex)
            .ok_or_else(|| GraphError::not_found(vertex))?;
        let incoming = self.pred.remove(vertex).unwrap_or_default();

        for s in &outgoing {
            if let Some(pred) = self.pred.get_mut(s) {
                pred.retain(|p| p != vertex);
            }
        }
        for p in &incoming {
            if let Some(succ) = self.succ.get_mut(p) {
                succ.retain(|s| s != vertex);
            }
        }
        self.order.retain(|v| v != vertex);
        Ok(())
    }

    fn connect(&mut self, from: &V, to: &V) -> Result<(), GraphError> {
        self.require(from)?;
        self.require(to)?;

        if let Some(succ) = self.succ.get_mut(from) {
            if succ.contains(to) {
                return Ok(());
            }
            succ.push(to.clone());
        }
        if let Some(pred) = self.pred.get_mut(to) {
            pred.push(from.clone());
        }
        Ok(())
    }

    fn disconnect(&mut self, from: &V, to: &V) -> Result<(), GraphError> {
        self.require(from)?;
        self.require(to)?;

        let succ = self
            .succ
            .get_mut(from)
            .ok_or_else(|| GraphError::not_found(from))?;
        let position = succ
            .iter()
            .position(|s| s == to)
            .ok_or_else(|| GraphError::missing_edge(from, to))?;
        succ.remove(position);

        if let Some(pred) = self.pred.get_mut(to) {
            pred.retain(|p| p != from);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.order.clear();
        self.succ.clear();
        self.pred.clear();
    }
}
