/*!
# Minimum Spanning Trees

Reference computations of minimum spanning trees (forests on disconnected graphs).
[`SpanningTrees::minimum_spanning_tree`] runs Kruskal's algorithm with a union-find structure,
[`SpanningTrees::prim_spanning_tree`] grows a tree from a root with a binary heap.

Ties are broken by edge id, so both are deterministic; the interactive validators in
[`crate::verify`] accept every tie-breaking order and only need these for reference weights.
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use fxhash::FxHashSet;

use super::*;

/// Edges of a spanning tree (or forest) in the order they were added
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    pub edges: Vec<EdgeId>,
    pub weight: Weight,
}

impl SpanningTree {
    /// Number of edges in the tree
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Heap entry ordered by (weight, id), lightest first
#[derive(Clone, Copy)]
struct LightestFirst<'a>(&'a Edge);

impl PartialEq for LightestFirst<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LightestFirst<'_> {}

impl PartialOrd for LightestFirst<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LightestFirst<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        weight_cmp(other.0.weight, self.0.weight).then(other.0.id.cmp(&self.0.id))
    }
}

/// Spanning tree computations as methods on graphs
pub trait SpanningTrees: IncidenceList {
    /// Computes a minimum spanning forest with Kruskal's algorithm.
    /// The result is a spanning tree iff the graph is connected.
    fn minimum_spanning_tree(&self) -> SpanningTree {
        let mut sets = DisjointSets::with_elements(self.vertices());
        let mut tree = SpanningTree {
            edges: Vec::new(),
            weight: 0.0,
        };

        for e in self.edges_by_weight() {
            if sets.union(e.start, e.end) {
                tree.edges.push(e.id);
                tree.weight += e.weight;
            }
        }

        tree
    }

    /// Computes a minimum spanning tree of the component of `root` with Prim's algorithm.
    /// ** Panics if `root` is not a vertex of the graph **
    fn prim_spanning_tree(&self, root: VertexId) -> SpanningTree {
        assert!(self.has_vertex(root), "vertex {root} is not part of the graph");

        let mut visited = FxHashSet::default();
        let mut heap = BinaryHeap::new();
        let mut tree = SpanningTree {
            edges: Vec::new(),
            weight: 0.0,
        };

        visited.insert(root);
        heap.extend(self.edges_of(root).map(LightestFirst));

        while let Some(LightestFirst(e)) = heap.pop() {
            let new = match (visited.contains(&e.start), visited.contains(&e.end)) {
                (true, false) => e.end,
                (false, true) => e.start,
                _ => continue,
            };

            visited.insert(new);
            tree.edges.push(e.id);
            tree.weight += e.weight;

            heap.extend(
                self.edges_of(new)
                    .filter(|f| !visited.contains(&f.other(new)))
                    .map(LightestFirst),
            );
        }

        tree
    }

    /// Weight of a minimum spanning tree or `None` if the graph is not connected
    fn minimum_spanning_weight(&self) -> Option<Weight> {
        let tree = self.minimum_spanning_tree();
        (tree.len() + 1 >= self.number_of_vertices()).then_some(tree.weight)
    }
}

impl<G: IncidenceList> SpanningTrees for G {}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::*, testing::random_multigraph};

    #[test]
    fn kruskal_on_example() {
        let graph = Graph::from_edges(
            4,
            [
                (0, 1, 8.0),
                (0, 2, 7.0),
                (0, 3, 5.0),
                (1, 2, 8.0),
                (1, 3, 7.0),
                (2, 3, 6.0),
            ],
        );
        let tree = graph.minimum_spanning_tree();
        assert_eq!(tree.weight, 18.0);
        assert_eq!(tree.len(), 3);
        assert!(graph.edge_subgraph(tree.edges.iter().copied()).is_tree());

        assert_eq!(graph.prim_spanning_tree(graph.vertex_at(1)).weight, 18.0);
        assert_eq!(graph.minimum_spanning_weight(), Some(18.0));
    }

    #[test]
    fn forests() {
        let graph = Graph::from_edges(4, [(0, 1, 1.0), (2, 3, 2.0), (2, 2, 0.0)]);
        assert_eq!(graph.minimum_spanning_tree().weight, 3.0);
        assert_eq!(graph.prim_spanning_tree(graph.vertex_at(2)).weight, 2.0);
        assert_eq!(graph.minimum_spanning_weight(), None);

        assert_eq!(Graph::default().minimum_spanning_weight(), Some(0.0));
        assert!(Graph::from_edges(1, []).minimum_spanning_tree().is_empty());
    }

    #[test]
    fn kruskal_and_prim_agree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for _ in 0..100 {
            let n = rng.random_range(1..12);
            let graph = WeightedGnp::new().nodes(n).prob(0.6).generate(rng);
            let kruskal = graph.minimum_spanning_tree();

            if graph.is_connected() {
                let prim = graph.prim_spanning_tree(graph.vertex_at(0));
                assert!(weight_eq(kruskal.weight, prim.weight));
                assert_eq!(prim.len(), n - 1);
            }

            assert!(!graph.edge_subgraph(kruskal.edges.iter().copied()).has_cycle());
        }

        for _ in 0..50 {
            let graph = random_multigraph(rng, 6, 12);
            let tree = graph.minimum_spanning_tree();
            assert_eq!(tree.len() + graph.number_of_components(), 6);
        }
    }
}
