/*!
# Perfect Matchings

Exhaustive enumeration of all perfect matchings of a small graph.

The search always matches the *lowest* unmatched vertex (in the graph's vertex order) next and
branches over its partners. This canonical order produces every matching exactly once, so no
deduplication is needed, and the recursion is a pure function from "vertices still unmatched" to
"all ways of matching them".

The complete graph on `k` vertices (`k` even) has exactly `(k - 1)!!` perfect matchings; the
default [`MatchingSearch`] stops as soon as this many have been found.

# Example
```
use graphcheck::{prelude::*, algo::*, gens::complete_graph};

let graph = complete_graph(6, |i, j| (i + j) as Weight);
assert_eq!(graph.perfect_matchings().len(), 15);
assert_eq!(expected_perfect_matchings(6), 15);
```
*/

use itertools::Itertools;
use log::debug;

use super::*;

/// A set of edges covering every vertex exactly once.
///
/// Edge ids are kept sorted; two matchings are equal iff they consist of the same edges.
#[derive(Debug, Clone)]
pub struct Matching {
    edges: Vec<EdgeId>,
    weight: Weight,
}

impl Matching {
    /// Creates a matching from its edges and total weight
    pub fn new(mut edges: Vec<EdgeId>, weight: Weight) -> Self {
        edges.sort_unstable();
        Self { edges, weight }
    }

    /// Edges of the matching in ascending id order
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Sum of the edge weights
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Number of edges in the matching
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns *true* for the empty matching of the empty graph
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns *true* if `id` is part of the matching
    pub fn contains(&self, id: EdgeId) -> bool {
        self.edges.binary_search(&id).is_ok()
    }
}

impl PartialEq for Matching {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl Eq for Matching {}

/// Returns the number of perfect matchings of the complete graph on `k` vertices:
/// `0` for odd `k`, `1` for `k = 0` and `(k - 1)!!` otherwise
pub fn expected_perfect_matchings(k: usize) -> u64 {
    match k {
        0 => 1,
        k if k % 2 == 1 => 0,
        k => double_factorial(k as u64 - 1),
    }
}

/// Configurable enumeration of perfect matchings.
///
/// Without an explicit limit the search stops after `(n - 1)!!` matchings which is the exact
/// count for simple graphs on `n` vertices. Multigraphs with parallel edges can have more
/// perfect matchings; use [`MatchingSearch::limit`] to raise the cap in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingSearch {
    limit: Option<usize>,
}

impl MatchingSearch {
    /// Creates a search with the default limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of matchings to enumerate
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    /// Builder-style variant of [`MatchingSearch::set_limit`]
    pub fn limit(mut self, limit: usize) -> Self {
        self.set_limit(limit);
        self
    }

    /// Enumerates the perfect matchings of `graph` in canonical order.
    /// Self-loops are ignored.
    pub fn search<G>(&self, graph: &G) -> Vec<Matching>
    where
        G: IncidenceList,
    {
        let n = graph.number_of_vertices();
        let limit = self.limit.unwrap_or_else(|| {
            usize::try_from(expected_perfect_matchings(n)).unwrap_or(usize::MAX)
        });

        let unmatched = graph.vertices().collect_vec();
        let matchings = if n % 2 == 1 || limit == 0 {
            Vec::new()
        } else {
            extend_matchings(graph, &unmatched, limit)
        };

        debug!(
            "enumerated {} perfect matchings on {n} vertices (limit {limit})",
            matchings.len()
        );

        matchings
            .into_iter()
            .map(|edges| {
                let weight = edges.iter().map(|&id| graph.edge(id).weight).sum();
                Matching::new(edges, weight)
            })
            .collect()
    }
}

/// All ways (up to `limit`) to perfectly match the vertices in `unmatched`; each result lists its
/// edges in reverse order of choice.
fn extend_matchings<G>(graph: &G, unmatched: &[VertexId], limit: usize) -> Vec<Vec<EdgeId>>
where
    G: IncidenceList,
{
    let Some((&u, rest)) = unmatched.split_first() else {
        return vec![Vec::new()];
    };

    let mut result = Vec::new();
    for e in graph.edges_of(u) {
        if e.is_loop() {
            continue;
        }

        let Some(pos) = rest.iter().position(|&x| x == e.other(u)) else {
            continue;
        };

        let remaining = rest[..pos]
            .iter()
            .chain(&rest[pos + 1..])
            .copied()
            .collect_vec();

        for mut tail in extend_matchings(graph, &remaining, limit - result.len()) {
            tail.push(e.id);
            result.push(tail);
        }

        if result.len() >= limit {
            break;
        }
    }

    result
}

/// Returns all matchings of minimum total weight (ties within [`WEIGHT_EPSILON`] are kept)
pub fn minimum_weight_matchings(matchings: &[Matching]) -> Vec<Matching> {
    let Some(min) = matchings
        .iter()
        .map(Matching::weight)
        .min_by(|&a, &b| weight_cmp(a, b))
    else {
        return Vec::new();
    };

    matchings
        .iter()
        .filter(|m| weight_eq(m.weight, min))
        .cloned()
        .collect()
}

/// Perfect matching queries as methods on graphs
pub trait PerfectMatchings: IncidenceList {
    /// Enumerates all perfect matchings with the default [`MatchingSearch`]
    fn perfect_matchings(&self) -> Vec<Matching> {
        MatchingSearch::new().search(self)
    }

    /// Returns all perfect matchings of minimum total weight
    fn minimum_weight_perfect_matchings(&self) -> Vec<Matching> {
        minimum_weight_matchings(&self.perfect_matchings())
    }
}

impl<G: IncidenceList> PerfectMatchings for G {}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;

    use super::*;
    use crate::gens::*;

    fn assert_perfect(graph: &Graph, matching: &Matching) {
        let covered = matching
            .edges()
            .iter()
            .flat_map(|&id| {
                let e = graph.edge(id);
                [e.start, e.end]
            })
            .collect_vec();
        assert_eq!(covered.len(), graph.number_of_vertices());
        assert_eq!(
            covered.iter().collect::<FxHashSet<_>>().len(),
            graph.number_of_vertices()
        );
    }

    #[test]
    fn double_factorial_counts() {
        for (k, count) in [(0, 1), (2, 1), (4, 3), (6, 15), (8, 105), (10, 945)] {
            assert_eq!(expected_perfect_matchings(k), count);

            let graph = complete_graph(k, |_, _| 1.0);
            let matchings = graph.perfect_matchings();
            assert_eq!(matchings.len() as u64, count);

            for m in &matchings {
                assert_perfect(&graph, m);
            }
            assert!(matchings.iter().map(|m| m.edges().to_vec()).all_unique());
        }
    }

    #[test]
    fn odd_vertex_count() {
        assert_eq!(expected_perfect_matchings(5), 0);
        assert!(complete_graph(5, |_, _| 1.0).perfect_matchings().is_empty());
    }

    #[test]
    fn sparse_graphs() {
        let path = path_graph(4, |_| 1.0);
        let matchings = path.perfect_matchings();
        assert_eq!(matchings.len(), 1);
        assert_eq!(matchings[0].len(), 2);

        // a star has no perfect matching
        let star = Graph::from_edges(4, [(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)]);
        assert!(star.perfect_matchings().is_empty());
    }

    #[test]
    fn limit() {
        let graph = complete_graph(8, |_, _| 1.0);
        assert_eq!(MatchingSearch::new().limit(10).search(&graph).len(), 10);
        assert!(MatchingSearch::new().limit(0).search(&graph).is_empty());

        // parallel edges double the count beyond the simple-graph cap
        let multi = Graph::from_edges(2, [(0, 1, 1.0), (0, 1, 2.0)]);
        assert_eq!(multi.perfect_matchings().len(), 1);
        assert_eq!(MatchingSearch::new().limit(5).search(&multi).len(), 2);
    }

    #[test]
    fn minimum_weight() {
        // all three matchings of a unit K4 tie
        assert_eq!(
            complete_graph(4, |_, _| 1.0)
                .minimum_weight_perfect_matchings()
                .len(),
            3
        );

        // {0,1} + {2,3} is the unique lightest matching
        let graph = complete_graph(4, |i, j| match (i, j) {
            (0, 1) | (2, 3) => 1.0,
            _ => 5.0,
        });
        let best = graph.minimum_weight_perfect_matchings();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].weight(), 2.0);
        assert!(best[0].contains(graph.edge_slice()[0].id));

        assert!(minimum_weight_matchings(&[]).is_empty());
    }

    #[test]
    fn equality_ignores_order() {
        let a = Matching::new(vec![EdgeId::new(3), EdgeId::new(1)], 2.0);
        let b = Matching::new(vec![EdgeId::new(1), EdgeId::new(3)], 2.0);
        assert_eq!(a, b);
        assert_ne!(a, Matching::new(vec![EdgeId::new(1)], 2.0));
    }
}
