/*!
# Graph Representation

A [`Graph`] is an immutable **value**: a set of vertices and a set of weighted edges together with
an incidence index. All operations that "change" a graph return a new value instead, which is what
validators need when they ask "if I removed/added this edge, would property P still hold?"
without committing to the change.

All storage lives behind [`Arc`], so cloning a graph is `O(1)` and snapshots can be handed around
freely. Derived graphs ([`Graph::without_vertex`], [`Graph::edge_subgraph`], ...) keep the
identifiers of the graph they were derived from.

For purely hypothetical checks that only differ from an existing graph by a handful of edges,
[`Tentative`] provides an overlay view that implements the same read traits without copying
anything.

Graphs are constructed with a [`GraphBuilder`] which allocates the identifiers:

```
use graphcheck::prelude::*;

let mut builder = GraphBuilder::new();
let [a, b, c] = builder.add_vertices_array();
builder.add_edge(a, b, 1.0);
builder.add_edge(b, c, 2.0);
let ab2 = builder.add_edge(a, b, 5.0); // parallel edge

let graph = builder.build();
assert_eq!(graph.number_of_edges(), 3);
assert_eq!(graph.degree_of(a), 2);

let without = graph.without_edge(ab2);
assert_eq!(without.degree_of(a), 1);
assert_eq!(graph.degree_of(a), 2);
```
*/

use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{ids::RawId, ops::*, *};

mod tentative;

pub use tentative::*;

/// Errors raised by the fallible (`try_*`) construction and copy operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An endpoint or vertex argument does not belong to the graph
    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),
    /// An edge argument does not belong to the graph
    #[error("edge {0} is not part of the graph")]
    UnknownEdge(EdgeId),
}

type Incidence = SmallVec<[u32; 4]>;

/// Immutable weighted multigraph snapshot
#[derive(Clone, Default)]
pub struct Graph {
    vertices: Arc<Vec<VertexId>>,
    edges: Arc<Vec<Edge>>,
    incidence: Arc<FxHashMap<VertexId, Incidence>>,
    edge_index: Arc<FxHashMap<EdgeId, u32>>,
    next_vertex: RawId,
    next_edge: RawId,
}

impl Graph {
    /// Creates an empty builder
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Creates a graph with vertices `v0..v{n-1}` and one edge per `(u, v, weight)` triple, where
    /// `u` and `v` are indices into the vertex list. Edge ids are assigned in input order.
    /// ** Panics if an index is out of range **
    pub fn from_edges<I>(n: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Weight)>,
    {
        let mut builder = GraphBuilder::new();
        let vertices = builder.add_vertices(n);
        for (u, v, w) in edges {
            builder.add_edge(vertices[u], vertices[v], w);
        }
        builder.build()
    }

    fn from_parts(
        vertices: Vec<VertexId>,
        edges: Vec<Edge>,
        next_vertex: RawId,
        next_edge: RawId,
    ) -> Self {
        let mut incidence: FxHashMap<VertexId, Incidence> = vertices
            .iter()
            .map(|&v| (v, Incidence::new()))
            .collect();
        let mut edge_index = FxHashMap::default();

        for (i, e) in edges.iter().enumerate() {
            let i = i as u32;
            let previous = edge_index.insert(e.id, i);
            assert!(previous.is_none(), "duplicate edge id {}", e.id);

            for v in [e.start, e.end].into_iter().take(if e.is_loop() { 1 } else { 2 }) {
                incidence
                    .get_mut(&v)
                    .unwrap_or_else(|| panic!("endpoint {v} of {e} is not part of the graph"))
                    .push(i);
            }
        }

        Self {
            vertices: Arc::new(vertices),
            edges: Arc::new(edges),
            incidence: Arc::new(incidence),
            edge_index: Arc::new(edge_index),
            next_vertex,
            next_edge,
        }
    }

    /// Returns the `i`-th vertex in insertion order.
    /// ** Panics if `i >= n` **
    pub fn vertex_at(&self, i: usize) -> VertexId {
        self.vertices[i]
    }

    /// Returns all vertices as a slice
    pub fn vertex_slice(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns all edges as a slice
    pub fn edge_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns a builder pre-populated with this graph that allocates fresh identifiers
    /// which do not collide with the existing ones
    pub fn to_builder(&self) -> GraphBuilder {
        GraphBuilder {
            vertex_set: self.vertices.iter().copied().collect(),
            vertices: self.vertices.as_ref().clone(),
            edges: self.edges.as_ref().clone(),
            next_vertex: self.next_vertex,
            next_edge: self.next_edge,
        }
    }

    /// Returns a copy with an additional isolated vertex
    pub fn with_vertex(&self) -> (Self, VertexId) {
        let mut builder = self.to_builder();
        let v = builder.add_vertex();
        (builder.build(), v)
    }

    /// Returns a copy with an additional edge and the id of the new edge.
    /// ** Panics if `u` or `v` is not a vertex of the graph **
    pub fn with_edge(&self, u: VertexId, v: VertexId, weight: Weight) -> (Self, EdgeId) {
        let mut builder = self.to_builder();
        let id = builder.add_edge(u, v, weight);
        (builder.build(), id)
    }

    /// Returns a copy with an additional edge and the id of the new edge or an error if an
    /// endpoint is not part of the graph
    pub fn try_with_edge(
        &self,
        u: VertexId,
        v: VertexId,
        weight: Weight,
    ) -> Result<(Self, EdgeId), GraphError> {
        let mut builder = self.to_builder();
        let id = builder.try_add_edge(u, v, weight)?;
        Ok((builder.build(), id))
    }

    /// Returns a copy that additionally contains `edge` (keeping its id).
    /// Used to grow a sub-graph with edges of the graph it was derived from.
    /// ** Panics if an endpoint is missing or an edge with the same id already exists **
    pub fn with_copied_edge(&self, edge: &Edge) -> Self {
        assert!(!self.has_edge_id(edge.id), "edge {} already present", edge.id);
        let mut edges = self.edges.as_ref().clone();
        edges.push(*edge);
        Self::from_parts(
            self.vertices.as_ref().clone(),
            edges,
            self.next_vertex,
            self.next_edge.max(edge.id.raw() + 1),
        )
    }

    /// Returns a copy without the given edge.
    /// ** Panics if the edge does not exist **
    pub fn without_edge(&self, id: EdgeId) -> Self {
        self.try_without_edge(id)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Returns a copy without the given edge or an error if it does not exist
    pub fn try_without_edge(&self, id: EdgeId) -> Result<Self, GraphError> {
        if !self.has_edge_id(id) {
            return Err(GraphError::UnknownEdge(id));
        }
        Ok(self.edge_subgraph(self.edges.iter().map(|e| e.id).filter(|&e| e != id)))
    }

    /// Returns a copy without `v` and all its incident edges.
    /// ** Panics if `v` is not a vertex of the graph **
    pub fn without_vertex(&self, v: VertexId) -> Self {
        self.try_without_vertex(v)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Returns a copy without `v` and all its incident edges or an error if `v` does not exist
    pub fn try_without_vertex(&self, v: VertexId) -> Result<Self, GraphError> {
        if !self.has_vertex(v) {
            return Err(GraphError::UnknownVertex(v));
        }

        Ok(Self::from_parts(
            self.vertices.iter().copied().filter(|&u| u != v).collect(),
            self.edges.iter().filter(|e| !e.touches(v)).copied().collect(),
            self.next_vertex,
            self.next_edge,
        ))
    }

    /// Returns a graph on the same vertex set containing only the given edges.
    /// Unknown ids are ignored, duplicates are only taken once.
    pub fn edge_subgraph<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = EdgeId>,
    {
        let keep: FxHashSet<EdgeId> = ids.into_iter().collect();
        Self::from_parts(
            self.vertices.as_ref().clone(),
            self.edges
                .iter()
                .filter(|e| keep.contains(&e.id))
                .copied()
                .collect(),
            self.next_vertex,
            self.next_edge,
        )
    }

    /// Returns a graph on the same vertex set without any edges
    pub fn spanning_empty(&self) -> Self {
        self.edge_subgraph(std::iter::empty())
    }

    /// Returns an overlay view on this graph for hypothetical edits
    pub fn tentative(&self) -> Tentative<'_> {
        Tentative::new(self)
    }
}

impl GraphOrder for Graph {
    fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + Clone + '_ {
        self.vertices.iter().copied()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    fn has_vertex(&self, v: VertexId) -> bool {
        self.incidence.contains_key(&v)
    }

    fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_index
            .get(&id)
            .map(|&i| &self.edges[i as usize])
    }
}

impl IncidenceList for Graph {
    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.incidence
            .get(&v)
            .unwrap_or_else(|| panic!("vertex {v} is not part of the graph"))
            .iter()
            .map(move |&i| &self.edges[i as usize])
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .finish()
    }
}

/// Allocates identifiers and collects vertices and edges for a [`Graph`]
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    vertices: Vec<VertexId>,
    vertex_set: FxHashSet<VertexId>,
    edges: Vec<Edge>,
    next_vertex: RawId,
    next_edge: RawId,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new isolated vertex and returns its id
    pub fn add_vertex(&mut self) -> VertexId {
        let v = VertexId::new(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.push(v);
        self.vertex_set.insert(v);
        v
    }

    /// Adds `n` new vertices and returns their ids in order
    pub fn add_vertices(&mut self, n: usize) -> Vec<VertexId> {
        (0..n).map(|_| self.add_vertex()).collect()
    }

    /// Adds `N` new vertices and returns their ids as an array
    pub fn add_vertices_array<const N: usize>(&mut self) -> [VertexId; N] {
        std::array::from_fn(|_| self.add_vertex())
    }

    /// Adds an edge between `u` and `v` and returns its id.
    /// ** Panics if `u` or `v` have not been added before **
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> EdgeId {
        self.try_add_edge(u, v, weight)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Adds an edge between `u` and `v` and returns its id or an error if an endpoint is unknown
    pub fn try_add_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        weight: Weight,
    ) -> Result<EdgeId, GraphError> {
        for x in [u, v] {
            if !self.vertex_set.contains(&x) {
                return Err(GraphError::UnknownVertex(x));
            }
        }

        let id = EdgeId::new(self.next_edge);
        self.next_edge += 1;
        self.edges.push(Edge::new(id, u, v, weight));
        Ok(id)
    }

    /// Adds multiple edges given as `(u, v, weight)` and returns their ids
    pub fn add_edges<I>(&mut self, edges: I) -> Vec<EdgeId>
    where
        I: IntoIterator<Item = (VertexId, VertexId, Weight)>,
    {
        edges
            .into_iter()
            .map(|(u, v, w)| self.add_edge(u, v, w))
            .collect()
    }

    /// Finalizes the graph
    pub fn build(self) -> Graph {
        Graph::from_parts(self.vertices, self.edges, self.next_vertex, self.next_edge)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn graph_new() {
        for n in 0..10 {
            let graph = Graph::from_edges(n, []);
            assert_eq!(graph.number_of_vertices(), n);
            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(graph.vertices().count(), n);
            assert!(graph.vertices().all(|v| graph.degree_of(v) == 0));
        }
    }

    #[test]
    fn degrees_with_loops_and_parallel_edges() {
        let graph = Graph::from_edges(3, [(0, 1, 1.0), (0, 1, 2.0), (1, 1, 3.0), (1, 2, 1.0)]);
        let [a, b, c] = [0, 1, 2].map(|i| graph.vertex_at(i));

        assert_eq!(graph.degree_of(a), 2);
        assert_eq!(graph.degree_of(b), 5);
        assert_eq!(graph.degree_of(c), 1);
        assert_eq!(graph.edges_of(b).count(), 4);
        assert_eq!(graph.edges_between(a, b).count(), 2);
        assert_eq!(graph.lightest_edge_between(b, a).unwrap().weight, 1.0);
        assert!(!graph.has_edge_between(a, c));
        assert_eq!(graph.max_degree(), 5);
        assert_eq!(graph.total_weight(), 7.0);
    }

    #[test]
    fn copies_do_not_alias() {
        let graph = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]);
        let e0 = graph.edge_slice()[0].id;
        let [a, b, c] = [0, 1, 2].map(|i| graph.vertex_at(i));

        let smaller = graph.without_edge(e0);
        assert_eq!(smaller.number_of_edges(), 1);
        assert_eq!(graph.number_of_edges(), 2);
        assert!(!smaller.has_edge_id(e0));

        let (larger, id) = graph.with_edge(a, c, 4.0);
        assert_eq!(larger.number_of_edges(), 3);
        assert!(!graph.has_edge_id(id));
        assert_ne!(id, e0);

        let removed = graph.without_vertex(b);
        assert_eq!(removed.number_of_vertices(), 2);
        assert_eq!(removed.number_of_edges(), 0);
        assert!(!removed.has_vertex(b));

        let (with_v, v) = graph.with_vertex();
        assert!(with_v.has_vertex(v));
        assert!(!graph.has_vertex(v));
    }

    #[test]
    fn sub_graphs_keep_ids() {
        let graph = Graph::from_edges(4, [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        let ids = graph.edges().map(|e| e.id).collect_vec();

        let sub = graph.edge_subgraph([ids[0], ids[2]]);
        assert_eq!(sub.number_of_vertices(), 4);
        assert_eq!(sub.edges().map(|e| e.id).collect_vec(), vec![ids[0], ids[2]]);

        let grown = graph.spanning_empty().with_copied_edge(graph.edge(ids[1]));
        assert_eq!(grown.edge(ids[1]).weight, 1.0);
        assert_eq!(grown.number_of_edges(), 1);

        // fresh ids never collide with copied ones
        let (_, fresh) = grown.with_edge(graph.vertex_at(0), graph.vertex_at(3), 1.0);
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn fallible_operations() {
        let graph = Graph::from_edges(2, [(0, 1, 1.0)]);
        let foreign = VertexId::new(42);

        assert_eq!(
            graph.try_with_edge(graph.vertex_at(0), foreign, 1.0).err(),
            Some(GraphError::UnknownVertex(foreign))
        );
        assert_eq!(
            graph.try_without_edge(EdgeId::new(7)).err(),
            Some(GraphError::UnknownEdge(EdgeId::new(7)))
        );
        assert!(graph.try_without_vertex(foreign).is_err());

        let mut builder = GraphBuilder::new();
        assert!(builder.try_add_edge(foreign, foreign, 1.0).is_err());
    }

    #[test]
    #[should_panic]
    fn unknown_vertex_panics() {
        let graph = Graph::from_edges(2, [(0, 1, 1.0)]);
        graph.degree_of(VertexId::new(5));
    }
}
