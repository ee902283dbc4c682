/*!
# Travelling Salesman Bounds

Reference computations of the two classic TSP bounds taught alongside each other:

- [`TourBounds::nearest_neighbor_tour`]: greedy tour that always walks to the closest unvisited
  vertex and finally returns to the start (an **upper bound** on the optimal tour),
- [`TourBounds::deletion_lower_bound`]: delete a vertex, take a minimum spanning tree of the rest
  and add back the two lightest deleted edges (a **lower bound**).

Both assume a complete graph; on other graphs they may return `None`.
*/

use fxhash::FxHashSet;

use super::*;

/// A closed tour given by the sequence of visited vertices and the edges between them
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Vertices in visiting order, starting (but not ending) with the start vertex
    pub vertices: Vec<VertexId>,
    /// `vertices.len()` edges; the last one returns to the start
    pub edges: Vec<EdgeId>,
    pub weight: Weight,
}

/// Returns the lightest edge (ties broken by id) among `edges`
pub(crate) fn lightest<'a, I>(edges: I) -> Option<&'a Edge>
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges
        .into_iter()
        .min_by(|a, b| weight_cmp(a.weight, b.weight).then(a.id.cmp(&b.id)))
}

/// TSP bound computations as methods on graphs
pub trait TourBounds: IncidenceList {
    /// Computes the nearest neighbor tour from `start`.
    /// Returns `None` if the walk gets stuck before visiting every vertex or cannot return.
    /// A single vertex yields the empty tour.
    /// ** Panics if `start` is not a vertex of the graph **
    fn nearest_neighbor_tour(&self, start: VertexId) -> Option<Tour> {
        assert!(self.has_vertex(start), "vertex {start} is not part of the graph");

        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut tour = Tour {
            vertices: vec![start],
            edges: Vec::new(),
            weight: 0.0,
        };

        let mut current = start;
        while visited.len() < self.number_of_vertices() {
            let next = lightest(
                self.edges_of(current)
                    .filter(|e| !visited.contains(&e.other(current))),
            )?;

            current = next.other(current);
            visited.insert(current);
            tour.vertices.push(current);
            tour.edges.push(next.id);
            tour.weight += next.weight;
        }

        if current != start {
            let back = lightest(self.edges_between(current, start))?;
            tour.edges.push(back.id);
            tour.weight += back.weight;
        }

        Some(tour)
    }

    /// Computes the deletion lower bound for vertex `v`: the weight of a minimum spanning tree
    /// of the graph without `v` plus the two lightest (non-loop) edges incident to `v`.
    /// Returns `None` if the remaining graph is disconnected or `v` has fewer than two
    /// incident edges while other vertices exist.
    /// ** Panics if `v` is not a vertex of the graph **
    fn deletion_lower_bound(&self, v: VertexId) -> Option<Weight> {
        assert!(self.has_vertex(v), "vertex {v} is not part of the graph");

        let mut sets = DisjointSets::with_elements(self.vertices().filter(|&u| u != v));
        let mut tree_edges = 0;
        let mut tree = 0.0;
        for e in self.edges_by_weight() {
            if !e.touches(v) && sets.union(e.start, e.end) {
                tree_edges += 1;
                tree += e.weight;
            }
        }

        let others = self.number_of_vertices() - 1;
        if tree_edges < others.saturating_sub(1) {
            return None;
        }

        let mut deleted = self
            .edges_of(v)
            .filter(|e| !e.is_loop())
            .map(|e| e.weight)
            .collect::<Vec<_>>();
        deleted.sort_by(|&a, &b| weight_cmp(a, b));

        let needed = others.min(2);
        (deleted.len() >= needed).then(|| tree + deleted[..needed].iter().sum::<Weight>())
    }
}

impl<G: IncidenceList> TourBounds for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::gens::*;

    /// `AB=3, AC=4, AD=2, AE=7, BC=4, BD=6, BE=3, CD=5, CE=8, DE=6`
    fn example() -> Graph {
        const WEIGHTS: [[u8; 5]; 5] = [
            [0, 3, 4, 2, 7],
            [3, 0, 4, 6, 3],
            [4, 4, 0, 5, 8],
            [2, 6, 5, 0, 6],
            [7, 3, 8, 6, 0],
        ];
        complete_graph(5, |i, j| WEIGHTS[i][j] as Weight)
    }

    #[test]
    fn nearest_neighbor() {
        let graph = example();
        let v = |i| graph.vertex_at(i);

        // A -2- D -5- C -4- B -3- E -7- A
        let tour = graph.nearest_neighbor_tour(v(0)).unwrap();
        assert_eq!(tour.vertices, vec![v(0), v(3), v(2), v(1), v(4)]);
        assert_eq!(tour.weight, 21.0);
        assert_eq!(tour.edges.len(), 5);

        let single = Graph::from_edges(1, []);
        assert_eq!(single.nearest_neighbor_tour(single.vertex_at(0)).unwrap().weight, 0.0);

        let stuck = path_graph(3, |_| 1.0);
        assert!(stuck.nearest_neighbor_tour(stuck.vertex_at(1)).is_none());
    }

    #[test]
    fn deletion_bound() {
        let graph = example();

        // without A: BE 3 + BC 4 + CD 5 = 12, plus AD 2 + AB 3
        assert_eq!(graph.deletion_lower_bound(graph.vertex_at(0)), Some(17.0));
    }

    #[test]
    fn lower_below_upper() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        for n in 3..9 {
            let graph = EuclideanComplete::new().nodes(n).generate(rng).into_graph();
            for (u, v) in graph.vertices().tuple_combinations() {
                let upper = graph.nearest_neighbor_tour(u).unwrap().weight;
                let lower = graph.deletion_lower_bound(v).unwrap();
                assert!(lower <= upper + WEIGHT_EPSILON);
            }
        }
    }
}
