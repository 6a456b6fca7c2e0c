//! Traversals over any [`Graph`].

use crate::graph::{Graph, GraphError, GraphWrapper};
use std::collections::{HashSet, VecDeque};

/// Vertices reachable from `start`, in breadth-first order.
///
/// Neighbours are visited in the order `successors()` yields them.
pub fn breadth_first<G: Graph + ?Sized>(
    graph: &G,
    start: &G::Vertex,
) -> Result<Vec<G::Vertex>, GraphError> {
    if !graph.contains(start) {
        return Err(GraphError::not_found(start));
    }

    let mut seen: HashSet<G::Vertex> = HashSet::new();
    let mut queue: VecDeque<G::Vertex> = VecDeque::new();
    let mut order = Vec::new();

    seen.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(vertex) = queue.pop_front() {
        for succ in graph.successors(&vertex)? {
            if seen.insert(succ.clone()) {
                queue.push_back(succ);
            }
        }
        order.push(vertex);
    }

    Ok(order)
}

/// Root of the graph if it is a rooted tree, `None` otherwise.
///
/// A rooted tree has exactly one vertex without predecessors, every other
/// vertex has exactly one, and every vertex is reachable from the root.
pub fn is_tree<G: Graph + ?Sized>(graph: &G) -> Option<G::Vertex> {
    let wrapper = GraphWrapper::new(graph);
    let mut root = None;

    for vertex in wrapper.vertices() {
        match wrapper.in_degree(&vertex).ok()? {
            0 if root.is_none() => root = Some(vertex),
            1 => {}
            _ => return None,
        }
    }

    let root = root?;
    let reached = breadth_first(graph, &root).ok()?;
    (reached.len() == wrapper.vertex_count()).then_some(root)
}
