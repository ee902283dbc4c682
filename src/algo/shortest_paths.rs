/*!
# Shortest Paths & Trails

Weighted shortest-path queries on undirected multigraphs with non-negative weights.

- [`PathOracle::shortest_distance`] runs Dijkstra's algorithm,
- [`PathOracle::shortest_trails`] enumerates **all** minimum-weight simple trails between two
  vertices, not just one canonical trail. Callers that need to recognise *any* shortest trail
  (e.g. when validating duplicated traversals of a Chinese Postman tour) rely on this.

Trails are enumerated backwards from the target over *tight* edges, i.e. edges `{x, y}` with
`dist(x) + w = dist(y)` measured from the source. Every prefix of a shortest trail is itself
shortest, so this enumerates exactly the shortest simple trails and never runs into a dead end.
Parallel edges of equal weight yield distinct trails.

# Example
```
use graphcheck::{prelude::*, algo::*};

// 0 --1-- 1 --1-- 3
//  \             /
//   --1-- 2 --1--
let graph = Graph::from_edges(4, [(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)]);
let (a, b) = (graph.vertex_at(0), graph.vertex_at(3));

assert_eq!(graph.shortest_distance(a, b), Some(2.0));
assert_eq!(graph.shortest_trails(a, b).len(), 2);
```
*/

use std::{cmp::Ordering, collections::BinaryHeap};

use fxhash::FxHashSet;
use itertools::Itertools;

use super::*;
use crate::utils::VertexIndex;

/// A trail from `start` to `end` given as its sequence of edges
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub start: VertexId,
    pub end: VertexId,
    pub edges: Vec<EdgeId>,
    pub weight: Weight,
}

impl Trail {
    /// Returns *true* if the trail walks along the edge `id`
    pub fn contains(&self, id: EdgeId) -> bool {
        self.edges.contains(&id)
    }

    /// Number of edges on the trail
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* for the empty trail from a vertex to itself
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Single-source distance table computed by Dijkstra's algorithm
#[derive(Debug, Clone)]
pub struct ShortestDistances {
    source: VertexId,
    index: VertexIndex,
    dist: Vec<Option<Weight>>,
}

impl ShortestDistances {
    /// The source vertex all distances are measured from
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the distance from the source to `v` or `None` if `v` is unreachable.
    /// ** Panics if `v` is not a vertex of the graph **
    pub fn distance_to(&self, v: VertexId) -> Option<Weight> {
        self.dist[self.index.index_of(v)]
    }

    /// Returns *true* if `v` is reachable from the source
    pub fn reaches(&self, v: VertexId) -> bool {
        self.distance_to(v).is_some()
    }
}

#[derive(Clone, Copy)]
struct HeapEntry {
    dist: Weight,
    idx: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        weight_cmp(other.dist, self.dist).then(other.idx.cmp(&self.idx))
    }
}

/// Configurable enumeration of shortest trails.
///
/// By default all shortest trails are returned; as the number of shortest trails can grow
/// exponentially on pathological inputs, the enumeration can be capped with
/// [`TrailSearch::max_trails`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailSearch {
    max_trails: Option<usize>,
}

impl TrailSearch {
    /// Creates a new search without a cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of returned trails
    pub fn set_max_trails(&mut self, max_trails: usize) {
        self.max_trails = Some(max_trails);
    }

    /// Builder-style variant of [`TrailSearch::set_max_trails`]
    pub fn max_trails(mut self, max_trails: usize) -> Self {
        self.set_max_trails(max_trails);
        self
    }

    /// Returns all (up to the cap) minimum-weight simple trails from `a` to `b`.
    /// Returns an empty list if `b` is unreachable and a single empty trail if `a == b`.
    /// ** Panics if `a` or `b` is not a vertex of the graph **
    pub fn search<G>(&self, graph: &G, a: VertexId, b: VertexId) -> Vec<Trail>
    where
        G: IncidenceList,
    {
        let distances = graph.shortest_distances_from(a);
        let Some(total) = distances.distance_to(b) else {
            return Vec::new();
        };

        let mut enumerator = TrailEnumerator {
            graph,
            distances: &distances,
            limit: self.max_trails.unwrap_or(usize::MAX),
            on_trail: FxHashSet::default(),
            stack: Vec::new(),
            trails: Vec::new(),
        };
        enumerator.on_trail.insert(b);
        enumerator.walk_back(b);

        enumerator
            .trails
            .into_iter()
            .map(|edges| Trail {
                start: a,
                end: b,
                edges,
                weight: total,
            })
            .collect_vec()
    }
}

struct TrailEnumerator<'a, G>
where
    G: IncidenceList,
{
    graph: &'a G,
    distances: &'a ShortestDistances,
    limit: usize,
    on_trail: FxHashSet<VertexId>,
    stack: Vec<EdgeId>,
    trails: Vec<Vec<EdgeId>>,
}

impl<G> TrailEnumerator<'_, G>
where
    G: IncidenceList,
{
    fn walk_back(&mut self, x: VertexId) {
        if self.trails.len() >= self.limit {
            return;
        }

        if x == self.distances.source() {
            self.trails.push(self.stack.iter().rev().copied().collect());
            return;
        }

        // `x` is reachable, otherwise we would not have walked here
        let Some(dist_x) = self.distances.distance_to(x) else {
            return;
        };

        let graph = self.graph;
        for e in graph.edges_of(x) {
            if e.is_loop() {
                continue;
            }

            let y = e.other(x);
            let tight = self
                .distances
                .distance_to(y)
                .is_some_and(|dist_y| weight_eq(dist_y + e.weight, dist_x));

            if !tight || !self.on_trail.insert(y) {
                continue;
            }

            self.stack.push(e.id);
            self.walk_back(y);
            self.stack.pop();
            self.on_trail.remove(&y);
        }
    }
}

/// Shortest-path queries as methods on graphs
pub trait PathOracle: IncidenceList {
    /// Runs Dijkstra's algorithm from `a`.
    /// ** Panics if `a` is not a vertex of the graph **
    fn shortest_distances_from(&self, a: VertexId) -> ShortestDistances {
        let index = VertexIndex::new(self);
        let mut dist: Vec<Option<Weight>> = vec![None; index.len()];
        let mut settled = vec![false; index.len()];
        let mut heap = BinaryHeap::new();

        let source = index.index_of(a);
        dist[source] = Some(0.0);
        heap.push(HeapEntry {
            dist: 0.0,
            idx: source,
        });

        while let Some(HeapEntry { dist: d, idx }) = heap.pop() {
            if settled[idx] {
                continue;
            }
            settled[idx] = true;

            let u = index.vertex(idx);
            for e in self.edges_of(u) {
                let v = index.index_of(e.other(u));
                let candidate = d + e.weight;
                if dist[v].is_none_or(|old| weight_cmp(candidate, old) == Ordering::Less) {
                    dist[v] = Some(candidate);
                    heap.push(HeapEntry {
                        dist: candidate,
                        idx: v,
                    });
                }
            }
        }

        ShortestDistances {
            source: a,
            index,
            dist,
        }
    }

    /// Minimum total edge weight along any walk from `a` to `b` or `None` if unreachable.
    /// ** Panics if `a` or `b` is not a vertex of the graph **
    fn shortest_distance(&self, a: VertexId, b: VertexId) -> Option<Weight> {
        self.shortest_distances_from(a).distance_to(b)
    }

    /// All minimum-weight simple trails from `a` to `b`; see [`TrailSearch::search`]
    fn shortest_trails(&self, a: VertexId, b: VertexId) -> Vec<Trail> {
        TrailSearch::new().search(self, a, b)
    }
}

impl<G: IncidenceList> PathOracle for G {}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::*;

    #[test]
    fn dijkstra_on_example() {
        let (graph, [a, b, c, d, e]) = postman_example();

        assert_eq!(graph.shortest_distance(a, b), Some(8.0));
        assert_eq!(graph.shortest_distance(a, c), Some(7.0));
        assert_eq!(graph.shortest_distance(a, d), Some(5.0));
        assert_eq!(graph.shortest_distance(b, c), Some(8.0));
        assert_eq!(graph.shortest_distance(b, d), Some(7.0));
        assert_eq!(graph.shortest_distance(c, d), Some(6.0));
        assert_eq!(graph.shortest_distance(e, e), Some(0.0));
    }

    #[test]
    fn unreachable() {
        let graph = Graph::from_edges(3, [(0, 1, 1.0)]);
        let (a, c) = (graph.vertex_at(0), graph.vertex_at(2));

        assert_eq!(graph.shortest_distance(a, c), None);
        assert!(graph.shortest_trails(a, c).is_empty());
        assert!(!graph.shortest_distances_from(a).reaches(c));
    }

    #[test]
    fn trivial_trail() {
        let graph = Graph::from_edges(2, [(0, 1, 1.0), (0, 0, 0.0)]);
        let a = graph.vertex_at(0);

        let trails = graph.shortest_trails(a, a);
        assert_eq!(trails.len(), 1);
        assert!(trails[0].is_empty());
        assert_eq!(trails[0].weight, 0.0);
    }

    #[test]
    fn all_trails_are_found() {
        let (graph, [a, _, _, d, _]) = postman_example();
        let trails = graph.shortest_trails(a, d);
        assert_eq!(trails.len(), 1);
        assert_eq!(
            trails[0].edges,
            vec![edge_id(&graph, "AE"), edge_id(&graph, "DE")]
        );

        // 3x3 grid with unit weights: C(4, 2) = 6 monotone shortest paths between corners
        let grid = grid_graph(3, 3);
        let trails = grid.shortest_trails(grid.vertex_at(0), grid.vertex_at(8));
        assert_eq!(trails.len(), 6);
        assert!(trails.iter().all(|t| t.len() == 4 && t.weight == 4.0));
        assert_eq!(trails.iter().map(|t| t.edges.clone()).unique().count(), 6);
    }

    #[test]
    fn parallel_and_zero_weight_edges() {
        // two parallel edges of equal weight plus a detour over a zero-weight edge
        let graph = Graph::from_edges(3, [(0, 1, 2.0), (0, 1, 2.0), (0, 2, 2.0), (2, 1, 0.0)]);
        let trails = graph.shortest_trails(graph.vertex_at(0), graph.vertex_at(1));
        assert_eq!(trails.len(), 3);

        let capped = TrailSearch::new()
            .max_trails(2)
            .search(&graph, graph.vertex_at(0), graph.vertex_at(1));
        assert_eq!(capped.len(), 2);
    }

    #[test]
    fn trails_are_shortest_and_simple() {
        let rng = &mut Pcg64Mcg::seed_from_u64(99);

        for _ in 0..100 {
            let n = rng.random_range(2..9);
            let m = rng.random_range(n..3 * n);
            let graph = random_multigraph(rng, n, m);
            let a = graph.vertex_at(rng.random_range(0..n));
            let b = graph.vertex_at(rng.random_range(0..n));

            let dist = graph.shortest_distance(a, b);
            let trails = graph.shortest_trails(a, b);
            assert_eq!(dist.is_some(), !trails.is_empty());

            for trail in trails {
                let weight = trail.edges.iter().map(|&e| graph.edge(e).weight).sum::<Weight>();
                assert!(weight_eq(weight, dist.unwrap()));

                // walk it and check it is connected and simple
                let mut at = a;
                let mut seen = vec![a];
                for &e in &trail.edges {
                    at = graph.edge(e).other(at);
                    assert!(!seen.contains(&at));
                    seen.push(at);
                }
                assert_eq!(at, b);
            }
        }
    }
}
