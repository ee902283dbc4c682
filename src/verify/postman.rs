/*!
# Chinese Postman

A closed walk traversing every edge at least once is shortest if the edges traversed twice form a
minimum **T-join**: a set of shortest trails pairing up the odd vertices of the graph. The session
precomputes all candidates:

1. the odd vertices `T` of the graph,
2. the *T-join graph*, a complete graph on `T` whose edge `{u, v}` is weighted by the shortest
   distance between `u` and `v`,
3. all perfect matchings of the T-join graph, of which those with minimum weight are kept
   (ties included),
4. for every matched pair, *all* shortest trails between its vertices.

The user then walks the graph edge by edge. Every edge may be traversed once; a second traversal
is only legal for edges on a shortest trail of some matched pair, and a third is never legal. The
walk is finished once its edge multiplicities match one candidate T-join with one choice of
shortest trail per pair.
*/

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use log::debug;

use super::*;
use crate::{algo::*, gens::GeneratorSubstructures, utils::VertexIndex};

/// Phases of a [`ChinesePostman`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostmanPhase {
    /// Waiting for the start vertex of the walk
    ChooseStart,
    Walking,
    Finished,
}

/// Two matched odd vertices together with all shortest trails between them
#[derive(Debug, Clone)]
pub struct TJoinPair {
    pub u: VertexId,
    pub v: VertexId,
    pub distance: Weight,
    pub trails: Vec<Trail>,
}

/// A minimum-weight perfect matching of the T-join graph, resolved to trails in the input graph
#[derive(Debug, Clone)]
pub struct TJoin {
    matching: Matching,
    pairs: Vec<TJoinPair>,
}

impl TJoin {
    /// The matching as edges of the T-join graph
    pub fn matching(&self) -> &Matching {
        &self.matching
    }

    pub fn pairs(&self) -> &[TJoinPair] {
        &self.pairs
    }

    /// Total weight of the duplicated trails
    pub fn weight(&self) -> Weight {
        self.matching.weight()
    }

    /// Returns *true* if `id` lies on a shortest trail of one of the pairs
    pub fn may_duplicate(&self, id: EdgeId) -> bool {
        self.pairs
            .iter()
            .any(|pair| pair.trails.iter().any(|trail| trail.contains(id)))
    }
}

/// Validates a Chinese Postman walk, see the [module documentation](self)
#[derive(Debug, Clone)]
pub struct ChinesePostman {
    graph: Graph,
    odd: Vec<VertexId>,
    t_join_graph: Graph,
    candidates: Vec<TJoin>,
    duplicable: FxHashSet<EdgeId>,

    phase: PostmanPhase,
    start: Option<VertexId>,
    position: Option<VertexId>,
    walk: Vec<EdgeId>,
    traversals: FxHashMap<EdgeId, u8>,
    errors: ErrorSlot,
}

impl ChinesePostman {
    /// Precomputes all minimum T-joins with the default (unbounded) [`TrailSearch`].
    /// Returns [`Infeasible::NotConnected`] if the graph is not connected.
    pub fn new(graph: Graph) -> Result<Self, Infeasible> {
        Self::with_trail_search(graph, TrailSearch::new())
    }

    /// Same as [`ChinesePostman::new`] but enumerates shortest trails with `trails`
    pub fn with_trail_search(graph: Graph, trails: TrailSearch) -> Result<Self, Infeasible> {
        if !graph.is_connected() {
            debug!("postman: graph is not connected");
            return Err(Infeasible::NotConnected);
        }

        let odd = graph.odd_vertices();
        let distances = odd
            .iter()
            .map(|&u| graph.shortest_distances_from(u))
            .collect_vec();

        let mut builder = GraphBuilder::new();
        let t_vertices = builder.add_vertices(odd.len());
        builder.connect_clique(&t_vertices, |i, j| {
            distances[i].distance_to(odd[j]).unwrap_or(0.0)
        });
        let t_join_graph = builder.build();
        let t_index = VertexIndex::new(&t_join_graph);

        let matchings = t_join_graph.perfect_matchings();
        let minimum = minimum_weight_matchings(&matchings);

        let mut resolved: FxHashMap<EdgeId, TJoinPair> = FxHashMap::default();
        let candidates = minimum
            .into_iter()
            .map(|matching| {
                let pairs = matching
                    .edges()
                    .iter()
                    .map(|&id| {
                        resolved
                            .entry(id)
                            .or_insert_with(|| {
                                let te = t_join_graph.edge(id);
                                let u = odd[t_index.index_of(te.start)];
                                let v = odd[t_index.index_of(te.end)];
                                TJoinPair {
                                    u,
                                    v,
                                    distance: te.weight,
                                    trails: trails.search(&graph, u, v),
                                }
                            })
                            .clone()
                    })
                    .collect_vec();
                TJoin { matching, pairs }
            })
            .collect_vec();

        let duplicable = candidates
            .iter()
            .flat_map(|t| &t.pairs)
            .flat_map(|pair| &pair.trails)
            .flat_map(|trail| trail.edges.iter().copied())
            .collect();

        debug!(
            "postman: {} odd vertices, {} perfect matchings, {} of minimum weight",
            odd.len(),
            matchings.len(),
            candidates.len()
        );

        Ok(Self {
            graph,
            odd,
            t_join_graph,
            candidates,
            duplicable,
            phase: PostmanPhase::ChooseStart,
            start: None,
            position: None,
            walk: Vec::new(),
            traversals: FxHashMap::default(),
            errors: ErrorSlot::default(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Vertices of odd degree in the input graph
    pub fn odd_vertices(&self) -> &[VertexId] {
        &self.odd
    }

    /// Complete graph on the odd vertices weighted by shortest distance; its `i`-th vertex
    /// stands for the `i`-th odd vertex
    pub fn t_join_graph(&self) -> &Graph {
        &self.t_join_graph
    }

    /// All minimum-weight T-joins. An Eulerian graph has exactly one, the empty T-join.
    pub fn candidate_tjoins(&self) -> &[TJoin] {
        &self.candidates
    }

    /// Weight of the optimal closed walk: all edge weights plus the minimum T-join weight
    pub fn minimum_weight(&self) -> Weight {
        self.graph.total_weight() + self.candidates.first().map_or(0.0, TJoin::weight)
    }

    /// Returns *true* if `id` may be traversed a second time
    pub fn may_traverse_twice(&self, id: EdgeId) -> bool {
        self.duplicable.contains(&id)
    }

    pub fn phase(&self) -> PostmanPhase {
        self.phase
    }

    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    /// Current end of the walk
    pub fn position(&self) -> Option<VertexId> {
        self.position
    }

    /// Edges of the walk in order
    pub fn walk(&self) -> &[EdgeId] {
        &self.walk
    }

    /// Number of times `id` has been traversed
    pub fn traversals_of(&self, id: EdgeId) -> u8 {
        self.traversals.get(&id).copied().unwrap_or(0)
    }

    /// Shorthand for validating [`Candidate::Vertex`]
    pub fn choose_vertex(&mut self, v: VertexId) -> Verdict {
        self.validate(Candidate::Vertex(v))
    }

    /// Shorthand for validating [`Candidate::Edge`]
    pub fn select_edge(&mut self, id: EdgeId) -> Verdict {
        self.validate(Candidate::Edge(id))
    }

    fn try_choose(&mut self, v: VertexId) -> Result<(), Rejection> {
        assert_vertex(&self.graph, v);
        match self.phase {
            PostmanPhase::ChooseStart => {}
            PostmanPhase::Walking => return Err(Rejection::ExpectedEdge),
            PostmanPhase::Finished => return Err(Rejection::Finished),
        }

        self.start = Some(v);
        self.position = Some(v);
        self.phase = PostmanPhase::Walking;
        debug!("postman: walk starts at {v}");
        self.check_finished();
        Ok(())
    }

    fn try_select(&mut self, id: EdgeId) -> Result<(), Rejection> {
        let edge = edge_of(&self.graph, id);
        let position = match (self.phase, self.position) {
            (PostmanPhase::Walking, Some(position)) => position,
            (PostmanPhase::Finished, _) => return Err(Rejection::Finished),
            _ => return Err(Rejection::ExpectedVertex),
        };

        if !edge.touches(position) {
            return Err(Rejection::NotAdjacentEdge);
        }
        match self.traversals_of(id) {
            0 => {}
            1 if self.may_traverse_twice(id) => {}
            1 => return Err(Rejection::NonTJoinDuplicate),
            _ => return Err(Rejection::TJoinEdgeRepeat),
        }

        *self.traversals.entry(id).or_insert(0) += 1;
        self.walk.push(id);
        self.position = Some(edge.other(position));
        debug!("postman: traversed {edge} ({} edges walked)", self.walk.len());
        self.check_finished();
        Ok(())
    }

    fn check_finished(&mut self) {
        if self.walk_matches_tjoin() {
            self.phase = PostmanPhase::Finished;
            debug!("postman: walk finished with weight {}", self.current_weight());
        }
    }

    /// Returns *true* if there is a candidate T-join and a choice of one shortest trail per pair
    /// such that every edge was traversed once plus the number of chosen trails containing it
    fn walk_matches_tjoin(&self) -> bool {
        let mut extra = FxHashMap::default();
        for e in self.graph.edges() {
            match self.traversals_of(e.id) {
                0 => return false,
                1 => {}
                c => {
                    extra.insert(e.id, c - 1);
                }
            }
        }

        self.candidates
            .iter()
            .any(|t| covers_exactly(&t.pairs, &mut extra.clone()))
    }
}

/// Picks one trail per pair such that the trails use every edge exactly as often as `extra` says
fn covers_exactly(pairs: &[TJoinPair], extra: &mut FxHashMap<EdgeId, u8>) -> bool {
    let Some((pair, rest)) = pairs.split_first() else {
        return extra.values().all(|&c| c == 0);
    };

    for trail in &pair.trails {
        if !trail
            .edges
            .iter()
            .all(|e| extra.get(e).is_some_and(|&c| c > 0))
        {
            continue;
        }

        for e in &trail.edges {
            *extra.entry(*e).or_default() -= 1;
        }
        let found = covers_exactly(rest, extra);
        for e in &trail.edges {
            *extra.entry(*e).or_default() += 1;
        }

        if found {
            return true;
        }
    }

    false
}

impl Session for ChinesePostman {
    fn validate(&mut self, candidate: Candidate) -> Verdict {
        if self.errors.clears(candidate) {
            return Verdict::ErrorCleared;
        }

        let outcome = match candidate {
            Candidate::Vertex(v) => self.try_choose(v),
            Candidate::Edge(id) => self.try_select(id),
        };
        self.errors.record(candidate, outcome)
    }

    fn is_complete(&self) -> bool {
        self.phase == PostmanPhase::Finished
    }

    fn current_weight(&self) -> Weight {
        self.walk.iter().map(|&id| self.graph.edge(id).weight).sum()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.errors.rejection()
    }

    fn reset(&mut self) {
        self.phase = PostmanPhase::ChooseStart;
        self.start = None;
        self.position = None;
        self.walk.clear();
        self.traversals.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, seq::IndexedRandom};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::*, testing::*};

    #[test]
    fn example_precomputation() {
        let (graph, [a, b, c, d, _]) = postman_example();
        let postman = ChinesePostman::new(graph.clone()).unwrap();

        assert_eq!(postman.odd_vertices(), &[a, b, c, d]);
        assert_eq!(postman.t_join_graph().number_of_edges(), 6);
        assert_eq!(postman.candidate_tjoins().len(), 1);

        // {AD, BC} = 5 + 8 beats {AB, CD} = 8 + 6 and {AC, BD} = 7 + 7
        let tjoin = &postman.candidate_tjoins()[0];
        assert_eq!(tjoin.weight(), 13.0);
        assert_eq!(postman.minimum_weight(), 44.0 + 13.0);

        let pairs = tjoin
            .pairs()
            .iter()
            .map(|p| (p.u, p.v, p.distance))
            .sorted_by_key(|p| p.0)
            .collect_vec();
        assert_eq!(pairs, vec![(a, d, 5.0), (b, c, 8.0)]);

        let duplicable = graph
            .edges()
            .filter(|e| postman.may_traverse_twice(e.id))
            .map(|e| e.id)
            .sorted()
            .collect_vec();
        let expected = ["AE", "BC", "DE"]
            .map(|name| edge_id(&graph, name))
            .into_iter()
            .sorted()
            .collect_vec();
        assert_eq!(duplicable, expected);
    }

    #[test]
    fn example_walk() {
        let (graph, [a, ..]) = postman_example();
        let mut postman = ChinesePostman::new(graph.clone()).unwrap();

        assert_eq!(
            postman.select_edge(edge_id(&graph, "AB")),
            Verdict::Rejected(Rejection::ExpectedVertex)
        );
        assert!(postman.choose_vertex(a).is_accepted());
        assert_eq!(
            postman.select_edge(edge_id(&graph, "BC")),
            Verdict::Rejected(Rejection::NotAdjacentEdge)
        );

        let walk = ["AB", "BC", "BC", "BE", "AE", "AE", "CE", "CD", "DE", "DE", "AD"];
        for (i, name) in walk.into_iter().enumerate() {
            assert!(!postman.is_complete());
            assert_eq!(
                postman.select_edge(edge_id(&graph, name)),
                Verdict::Accepted,
                "step {i}: {name}"
            );
        }

        assert!(postman.is_complete());
        assert_eq!(postman.position(), Some(a));
        assert_eq!(postman.current_weight(), 57.0);
        assert_eq!(postman.current_weight(), postman.minimum_weight());
        assert_eq!(postman.traversals_of(edge_id(&graph, "DE")), 2);
        assert_eq!(
            postman.select_edge(edge_id(&graph, "AB")),
            Verdict::Rejected(Rejection::Finished)
        );

        postman.reset();
        assert_eq!(postman.phase(), PostmanPhase::ChooseStart);
        assert!(postman.walk().is_empty());
    }

    #[test]
    fn duplicate_rejections() {
        let (graph, [a, _, _, _, e]) = postman_example();
        let mut postman = ChinesePostman::new(graph.clone()).unwrap();
        let ab = edge_id(&graph, "AB");
        let ae = edge_id(&graph, "AE");

        assert!(postman.choose_vertex(a).is_accepted());
        assert!(postman.select_edge(ab).is_accepted());
        assert_eq!(
            postman.select_edge(ab),
            Verdict::Rejected(Rejection::NonTJoinDuplicate)
        );
        assert_eq!(postman.select_edge(ab), Verdict::ErrorCleared);
        assert_eq!(postman.traversals_of(ab), 1);

        postman.reset();
        assert!(postman.choose_vertex(e).is_accepted());
        assert!(postman.select_edge(ae).is_accepted());
        assert!(postman.select_edge(ae).is_accepted());
        assert_eq!(
            postman.select_edge(ae),
            Verdict::Rejected(Rejection::TJoinEdgeRepeat)
        );
        assert_eq!(postman.error_state(), Some(Rejection::TJoinEdgeRepeat));
        assert_eq!(postman.walk().len(), 2);
    }

    #[test]
    fn infeasible() {
        let graph = Graph::from_edges(4, [(0, 1, 1.0), (2, 3, 1.0)]);
        assert_eq!(
            ChinesePostman::new(graph).unwrap_err(),
            Infeasible::NotConnected
        );
    }

    #[test]
    fn eulerian_graph() {
        let graph = cycle_graph(4, |i| (i + 1) as Weight);
        let mut postman = ChinesePostman::new(graph.clone()).unwrap();

        assert!(postman.odd_vertices().is_empty());
        assert_eq!(postman.candidate_tjoins().len(), 1);
        assert!(postman.candidate_tjoins()[0].matching().is_empty());
        assert_eq!(postman.minimum_weight(), 10.0);

        let ids = graph.edge_slice().iter().map(|e| e.id).collect_vec();
        assert!(postman.choose_vertex(graph.vertex_at(0)).is_accepted());
        assert!(postman.select_edge(ids[0]).is_accepted());
        assert_eq!(
            postman.select_edge(ids[0]),
            Verdict::Rejected(Rejection::NonTJoinDuplicate)
        );
        for &id in &ids[1..] {
            assert!(postman.select_edge(id).is_accepted());
        }
        assert!(postman.is_complete());
        assert_eq!(postman.current_weight(), 10.0);

        let single = Graph::from_edges(1, []);
        let mut postman = ChinesePostman::new(single.clone()).unwrap();
        assert!(postman.choose_vertex(single.vertex_at(0)).is_accepted());
        assert!(postman.is_complete());
    }

    #[test]
    fn tied_tjoins() {
        // unit K4: all three matchings tie, every edge may be duplicated
        let graph = complete_graph(4, |_, _| 1.0);
        let ids = graph.edge_slice().iter().map(|e| e.id).collect_vec();
        let postman = ChinesePostman::new(graph.clone()).unwrap();

        assert_eq!(postman.candidate_tjoins().len(), 3);
        assert!(ids.iter().all(|&id| postman.may_traverse_twice(id)));
        assert_eq!(postman.minimum_weight(), 8.0);

        // 01 01 02 23 23 21 13 30 duplicates {01, 23}; 02 20 01 13 31 12 23 30 duplicates {02, 13}
        for walk in [[0, 0, 1, 5, 5, 3, 4, 2], [1, 1, 0, 4, 4, 3, 5, 2]] {
            let mut postman = postman.clone();
            assert!(postman.choose_vertex(graph.vertex_at(0)).is_accepted());
            for i in walk {
                assert!(postman.select_edge(ids[i]).is_accepted());
            }
            assert!(postman.is_complete());
            assert_eq!(postman.current_weight(), 8.0);
        }
    }

    #[test]
    fn second_traversal_only_on_shortest_trails() {
        let rng = &mut Pcg64Mcg::seed_from_u64(37);

        for _ in 0..60 {
            let n = rng.random_range(2..8);
            let graph = random_multigraph(rng, n, 2 * n);
            let Ok(mut postman) = ChinesePostman::new(graph.clone()) else {
                assert!(!graph.is_connected());
                continue;
            };

            let on_trail = |id| {
                postman
                    .candidate_tjoins()
                    .iter()
                    .any(|t: &TJoin| t.may_duplicate(id))
            };
            let duplicable = graph
                .edges()
                .filter(|e| on_trail(e.id))
                .map(|e| e.id)
                .collect::<FxHashSet<_>>();

            assert!(postman.choose_vertex(graph.vertex_at(0)).is_accepted());
            for _ in 0..40 {
                if postman.is_complete() {
                    break;
                }

                let position = postman.position().unwrap();
                let incident = graph.edges_of(position).map(|e| e.id).collect_vec();
                let Some(&id) = incident.choose(rng) else {
                    break;
                };

                let before = postman.traversals_of(id);
                let verdict = postman.select_edge(id);
                match before {
                    0 => assert_eq!(verdict, Verdict::Accepted),
                    1 if duplicable.contains(&id) => assert_eq!(verdict, Verdict::Accepted),
                    1 => {
                        assert_eq!(verdict, Verdict::Rejected(Rejection::NonTJoinDuplicate));
                        assert_eq!(postman.select_edge(id), Verdict::ErrorCleared);
                    }
                    _ => {
                        assert_eq!(verdict, Verdict::Rejected(Rejection::TJoinEdgeRepeat));
                        assert_eq!(postman.select_edge(id), Verdict::ErrorCleared);
                    }
                }
                assert_eq!(
                    postman.traversals_of(id),
                    before + u8::from(verdict.is_accepted())
                );
            }
        }
    }
}
