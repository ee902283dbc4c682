/*!
# Connectivity

Reachability-based connectivity predicates for undirected multigraphs.

All predicates are computed by a single BFS per query, i.e. in linear time. Parallel edges and
self-loops do not influence connectivity.
*/

use itertools::Itertools;

use super::*;

/// Connectivity queries on undirected graphs
pub trait Connectivity: IncidenceList + Traversal {
    /// Returns *true* iff a path of edges exists between `a` and `b`.
    /// Every vertex is connected to itself.
    /// ** Panics if `a` is not a vertex of the graph **
    fn are_connected(&self, a: VertexId, b: VertexId) -> bool {
        self.bfs(a).is_vertex_reachable(b)
    }

    /// Returns *true* iff every pair of vertices is connected.
    /// Graphs with `0` or `1` vertices are connected.
    fn is_connected(&self) -> bool {
        match self.vertices().next() {
            None => true,
            Some(start) => self.bfs(start).count() == self.number_of_vertices(),
        }
    }

    /// Returns the connected components of the graph; each component lists its vertices in BFS
    /// order and components are ordered by their first vertex in the graph's vertex order.
    fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let mut components = Vec::new();
        let Some(start) = self.vertices().next() else {
            return components;
        };

        let mut search = self.bfs(start);
        loop {
            components.push(search.by_ref().collect_vec());
            if !search.try_restart_at_unvisited() {
                break;
            }
        }
        components
    }

    /// Returns the number of connected components
    fn number_of_components(&self) -> usize {
        self.connected_components().len()
    }
}

impl<G: IncidenceList> Connectivity for G {}
