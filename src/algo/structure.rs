/*!
# Structural Predicates

Exact predicates on undirected multigraphs: cycle detection, cycle/complete-graph recognition and
degree parity.

Self-loops and parallel edges are regular edges here: a self-loop is a cycle of length one and two
parallel edges form a cycle of length two.
*/

use itertools::Itertools;

use super::*;
use crate::utils::DisjointSets;

/// Structural predicates as methods on graphs
pub trait Structure: IncidenceList + Connectivity {
    /// Returns *true* iff the graph contains a cycle, i.e. iff there is an edge whose endpoints
    /// stay connected after removing it (equivalently: not every edge is a bridge).
    /// A graph without edges never has a cycle.
    fn has_cycle(&self) -> bool {
        let mut sets = DisjointSets::with_elements(self.vertices());
        self.edges().any(|e| !sets.union(e.start, e.end))
    }

    /// Returns *true* iff the graph is a single cycle: every vertex has degree exactly `2` and the
    /// edges form one connected loop. The empty graph is no cycle.
    fn is_cycle(&self) -> bool {
        !self.is_empty()
            && self.vertices().all(|v| self.degree_of(v) == 2)
            && self.is_connected()
    }

    /// Returns *true* iff every distinct pair of vertices is joined by at least one edge
    fn is_complete(&self) -> bool {
        self.vertices()
            .tuple_combinations()
            .all(|(u, v)| self.has_edge_between(u, v))
    }

    /// Returns *true* iff the graph is connected and has no cycle
    fn is_tree(&self) -> bool {
        self.is_connected() && !self.has_cycle()
    }

    /// Returns all vertices of odd degree in vertex order.
    /// By the handshake lemma this list always has even length.
    fn odd_vertices(&self) -> Vec<VertexId> {
        self.degrees()
            .filter_map(|(v, d)| (d % 2 == 1).then_some(v))
            .collect_vec()
    }

    /// Returns *true* iff the graph is connected and has no odd vertices, i.e. iff it has an
    /// Eulerian circuit
    fn is_eulerian(&self) -> bool {
        self.is_connected() && self.degrees().all(|(_, d)| d % 2 == 0)
    }

    /// Returns *true* if adding `edge` (an edge not visible in this graph yet) would close a cycle
    fn closes_cycle(&self, edge: &Edge) -> bool {
        edge.is_loop() || self.are_connected(edge.start, edge.end)
    }
}

impl<G: IncidenceList> Structure for G {}
