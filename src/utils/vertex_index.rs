use fxhash::FxHashMap;

use crate::{ops::GraphOrder, VertexId};

/// Dense indexing `0..n` of the vertices of a graph, in the graph's iteration order.
///
/// Vertex identifiers are opaque and possibly sparse (e.g. after deleting a vertex); algorithms
/// that want to keep per-vertex data in a `Vec` map through this structure.
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    vertices: Vec<VertexId>,
    index: FxHashMap<VertexId, usize>,
}

impl VertexIndex {
    /// Indexes all vertices of `graph`
    pub fn new<G: GraphOrder>(graph: &G) -> Self {
        let vertices: Vec<VertexId> = graph.vertices().collect();
        let index = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        Self { vertices, index }
    }

    /// Returns the dense index of `v`.
    /// ** Panics if `v` was not indexed **
    pub fn index_of(&self, v: VertexId) -> usize {
        self.get(v)
            .unwrap_or_else(|| panic!("vertex {v} is not part of the graph"))
    }

    /// Returns the dense index of `v` if it was indexed
    pub fn get(&self, v: VertexId) -> Option<usize> {
        self.index.get(&v).copied()
    }

    /// Returns the vertex with dense index `i`
    pub fn vertex(&self, i: usize) -> VertexId {
        self.vertices[i]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
