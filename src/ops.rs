use itertools::Itertools;

use crate::*;

/// Provides getters pertaining to the vertices and edges of a graph
pub trait GraphOrder {
    /// Returns the number of vertices of the graph
    fn number_of_vertices(&self) -> usize;

    /// Returns the number of edges of the graph (parallel edges and loops count individually)
    fn number_of_edges(&self) -> usize;

    /// Returns an iterator over V in insertion order
    fn vertices(&self) -> impl Iterator<Item = VertexId> + Clone + '_;

    /// Returns an iterator over E in insertion order
    fn edges(&self) -> impl Iterator<Item = &Edge> + '_;

    /// Returns *true* if `v` is a vertex of this graph
    fn has_vertex(&self, v: VertexId) -> bool;

    /// Returns the edge with the given id if it exists in this graph
    fn edge_by_id(&self, id: EdgeId) -> Option<&Edge>;

    /// Returns the edge with the given id.
    /// ** Panics if the edge does not exist **
    fn edge(&self, id: EdgeId) -> &Edge {
        self.edge_by_id(id)
            .unwrap_or_else(|| panic!("edge {id} is not part of the graph"))
    }

    /// Returns *true* if an edge with the given id exists in this graph
    fn has_edge_id(&self, id: EdgeId) -> bool {
        self.edge_by_id(id).is_some()
    }

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_vertices() == 0
    }

    /// Returns *true* if the graph has no edges
    fn is_edgeless(&self) -> bool {
        self.number_of_edges() == 0
    }

    /// Sum of all edge weights
    fn total_weight(&self) -> Weight {
        sum_weights(self.edges())
    }

    /// Returns all edges sorted increasingly by weight; ties are broken by id
    fn edges_by_weight(&self) -> Vec<&Edge> {
        self.edges()
            .sorted_by(|a, b| weight_cmp(a.weight, b.weight).then(a.id.cmp(&b.id)))
            .collect_vec()
    }
}

/// Traits pertaining getters for incident edges & neighborhoods
pub trait IncidenceList: GraphOrder + Sized {
    /// Returns an iterator over all edges with an endpoint equal to `v` (connectedEdges).
    /// A self-loop is returned once.
    /// ** Panics if `v` is not a vertex of the graph **
    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = &Edge> + '_;

    /// Returns the number of edge endpoints equal to `v`; a self-loop contributes `2`.
    /// ** Panics if `v` is not a vertex of the graph **
    fn degree_of(&self, v: VertexId) -> usize {
        self.edges_of(v).map(|e| if e.is_loop() { 2 } else { 1 }).sum()
    }

    /// Returns an iterator over the neighbors of `v`.
    /// Neighbors reached via parallel edges are returned multiple times.
    /// ** Panics if `v` is not a vertex of the graph **
    fn neighbors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges_of(v).map(move |e| e.other(v))
    }

    /// Returns an iterator over all edges joining `u` and `v`
    /// ** Panics if `u` is not a vertex of the graph **
    fn edges_between(&self, u: VertexId, v: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_of(u).filter(move |e| e.joins(u, v))
    }

    /// Returns *true* if at least one edge joins `u` and `v`
    fn has_edge_between(&self, u: VertexId, v: VertexId) -> bool {
        self.edges_between(u, v).next().is_some()
    }

    /// Returns the lightest edge joining `u` and `v` if one exists
    fn lightest_edge_between(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        self.edges_between(u, v)
            .min_by(|a, b| weight_cmp(a.weight, b.weight).then(a.id.cmp(&b.id)))
    }

    /// Returns an iterator over all `(vertex, degree)` pairs
    fn degrees(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.vertices().map(move |v| (v, self.degree_of(v)))
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> usize {
        self.degrees().map(|(_, d)| d).max().unwrap_or(0)
    }
}
