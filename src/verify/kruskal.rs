use itertools::Itertools;
use log::debug;

use super::*;
use crate::algo::*;

/// Validates Kruskal's algorithm: edges have to be chosen in ascending weight order, skipping edges
/// that would close a cycle.
///
/// The *legal edges* are all edges that are not accepted yet and do not close a cycle with the
/// accepted ones. Every legal edge of minimum weight is a correct next move. The session is
/// complete once `|V| - 1` edges have been accepted (immediately for graphs with at most one
/// vertex); disconnected graphs never complete.
#[derive(Debug, Clone)]
pub struct Kruskal {
    graph: Graph,
    sub_graph: Graph,
    accepted: Vec<EdgeId>,
    legal: Vec<EdgeId>,
    errors: ErrorSlot,
}

impl Kruskal {
    pub fn new(graph: Graph) -> Self {
        let sub_graph = graph.spanning_empty();
        let mut session = Self {
            graph,
            sub_graph,
            accepted: Vec::new(),
            legal: Vec::new(),
            errors: ErrorSlot::default(),
        };
        session.reset();
        session
    }

    /// The graph the spanning tree is built on
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The accepted edges as a graph on all vertices
    pub fn sub_graph(&self) -> &Graph {
        &self.sub_graph
    }

    /// Accepted edges in the order they were chosen
    pub fn accepted(&self) -> &[EdgeId] {
        &self.accepted
    }

    /// Legal edges in ascending (weight, id) order; the first ones are the hint for the next move
    pub fn legal_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.legal.iter().map(|&id| self.graph.edge(id))
    }

    /// Weight of the lightest legal edge or `None` if no legal edge remains
    pub fn lowest_legal_weight(&self) -> Option<Weight> {
        self.legal.first().map(|&id| self.graph.edge(id).weight)
    }

    /// Shorthand for validating [`Candidate::Edge`]
    pub fn select_edge(&mut self, id: EdgeId) -> Verdict {
        self.validate(Candidate::Edge(id))
    }

    /// Checks and applies the edge without touching the pending error.
    /// ** Panics if the edge is not part of the graph **
    pub(crate) fn try_select(&mut self, id: EdgeId) -> Result<(), Rejection> {
        let edge = edge_of(&self.graph, id);

        if self.is_complete() {
            return Err(Rejection::Finished);
        }
        if self.sub_graph.has_edge_id(id) {
            return Err(Rejection::AlreadyChosen);
        }
        if self.sub_graph.tentative().adding(edge).has_cycle() {
            return Err(Rejection::Cycle);
        }
        if self
            .lowest_legal_weight()
            .is_some_and(|min| weight_lt(min, edge.weight))
        {
            return Err(Rejection::NotLowestWeight);
        }

        self.sub_graph = self.sub_graph.with_copied_edge(&edge);
        self.accepted.push(id);

        let sub_graph = &self.sub_graph;
        let graph = &self.graph;
        self.legal
            .retain(|&f| f != id && !sub_graph.closes_cycle(graph.edge(f)));

        debug!(
            "kruskal: accepted {edge}, {}/{} tree edges",
            self.accepted.len(),
            self.required_edges()
        );
        Ok(())
    }

    fn required_edges(&self) -> usize {
        self.graph.number_of_vertices().saturating_sub(1)
    }
}

impl Session for Kruskal {
    fn validate(&mut self, candidate: Candidate) -> Verdict {
        if self.errors.clears(candidate) {
            return Verdict::ErrorCleared;
        }

        let outcome = match candidate {
            Candidate::Edge(id) => self.try_select(id),
            Candidate::Vertex(v) => {
                assert_vertex(&self.graph, v);
                Err(if self.is_complete() {
                    Rejection::Finished
                } else {
                    Rejection::ExpectedEdge
                })
            }
        };
        self.errors.record(candidate, outcome)
    }

    fn is_complete(&self) -> bool {
        self.accepted.len() == self.required_edges()
    }

    fn current_weight(&self) -> Weight {
        self.sub_graph.total_weight()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.errors.rejection()
    }

    fn reset(&mut self) {
        self.sub_graph = self.graph.spanning_empty();
        self.accepted.clear();
        self.errors.clear();
        self.legal = self
            .graph
            .edges_by_weight()
            .into_iter()
            .filter(|e| !e.is_loop())
            .map(|e| e.id)
            .collect_vec();
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, seq::IndexedRandom};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::*, testing::*};

    #[test]
    fn example_run() {
        let (graph, _) = postman_example();
        let id = |name| edge_id(&graph, name);
        let mut kruskal = Kruskal::new(graph.clone());

        assert_eq!(
            kruskal.select_edge(id("AE")),
            Verdict::Rejected(Rejection::NotLowestWeight)
        );
        assert_eq!(kruskal.error_state(), Some(Rejection::NotLowestWeight));
        assert_eq!(kruskal.select_edge(id("AE")), Verdict::ErrorCleared);
        assert_eq!(kruskal.error_state(), None);

        assert!(kruskal.select_edge(id("DE")).is_accepted());
        assert!(kruskal.select_edge(id("AE")).is_accepted());
        assert!(kruskal.select_edge(id("CE")).is_accepted());
        assert_eq!(
            kruskal.select_edge(id("DE")),
            Verdict::Rejected(Rejection::AlreadyChosen)
        );

        // BE = 5 is next; AD = 6 closes a cycle
        assert_eq!(
            kruskal.select_edge(id("AD")),
            Verdict::Rejected(Rejection::Cycle)
        );
        assert_eq!(
            kruskal.select_edge(id("BC")),
            Verdict::Rejected(Rejection::NotLowestWeight)
        );
        assert!(kruskal.select_edge(id("BE")).is_accepted());

        assert!(kruskal.is_complete());
        assert_eq!(kruskal.current_weight(), 14.0);
        assert_eq!(kruskal.legal_edges().count(), 0);
        assert_eq!(kruskal.select_edge(id("AB")), Verdict::Rejected(Rejection::Finished));
        assert_eq!(
            kruskal.validate(graph.vertex_at(0).into()),
            Verdict::Rejected(Rejection::Finished)
        );
    }

    #[test]
    fn rejection_is_idempotent() {
        let rng = &mut Pcg64Mcg::seed_from_u64(17);

        for _ in 0..50 {
            let graph = WeightedGnp::new().nodes(8).prob(0.5).generate(rng);
            let mut kruskal = Kruskal::new(graph.clone());

            while !kruskal.is_complete() && kruskal.lowest_legal_weight().is_some() {
                let e = *graph.edge_slice().choose(rng).unwrap();
                let before = kruskal.sub_graph().clone();

                match kruskal.select_edge(e.id) {
                    Verdict::Rejected(_) => {
                        assert_eq!(kruskal.select_edge(e.id), Verdict::ErrorCleared);
                        assert_eq!(kruskal.sub_graph().edge_slice(), before.edge_slice());
                        assert_eq!(kruskal.error_state(), None);
                    }
                    Verdict::Accepted => assert_eq!(
                        kruskal.sub_graph().number_of_edges(),
                        before.number_of_edges() + 1
                    ),
                    Verdict::ErrorCleared => unreachable!(),
                }
            }
        }
    }

    #[test]
    fn random_legal_runs_find_minimum_weight() {
        let rng = &mut Pcg64Mcg::seed_from_u64(23);

        for _ in 0..100 {
            let n = rng.random_range(1..10);
            let graph = WeightedGnp::new()
                .nodes(n)
                .prob(0.7)
                .weights(1.0, 4.0)
                .generate(rng);
            if !graph.is_connected() {
                continue;
            }

            let mut kruskal = Kruskal::new(graph.clone());
            while !kruskal.is_complete() {
                let min = kruskal.lowest_legal_weight().unwrap();
                let choices = kruskal
                    .legal_edges()
                    .filter(|e| weight_eq(e.weight, min))
                    .map(|e| e.id)
                    .collect_vec();
                assert!(kruskal.select_edge(*choices.choose(rng).unwrap()).is_accepted());
            }

            assert!(kruskal.sub_graph().is_tree());
            assert!(weight_eq(
                kruskal.current_weight(),
                graph.minimum_spanning_tree().weight
            ));
        }
    }

    #[test]
    fn degenerate_graphs() {
        assert!(Kruskal::new(Graph::default()).is_complete());
        assert!(Kruskal::new(Graph::from_edges(1, [(0, 0, 1.0)])).is_complete());

        let disconnected = Graph::from_edges(3, [(0, 1, 1.0)]);
        let mut kruskal = Kruskal::new(disconnected.clone());
        assert!(kruskal.select_edge(disconnected.edge_slice()[0].id).is_accepted());
        assert!(!kruskal.is_complete());
        assert_eq!(kruskal.lowest_legal_weight(), None);
    }

    #[test]
    fn reset() {
        let graph = cycle_graph(4, |i| i as Weight);
        let mut kruskal = Kruskal::new(graph.clone());
        assert!(kruskal.select_edge(graph.edge_slice()[0].id).is_accepted());
        kruskal.reset();

        assert_eq!(kruskal.current_weight(), 0.0);
        assert_eq!(kruskal.legal_edges().count(), 4);
        assert!(kruskal.accepted().is_empty());
    }
}
