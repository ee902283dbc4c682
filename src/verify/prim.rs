use fxhash::FxHashSet;
use log::debug;

use super::*;
use crate::algo::*;

/// Phases of a [`Prim`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimPhase {
    /// Waiting for the root vertex
    ChooseVertex,
    /// Growing the tree edge by edge
    SelectingEdges,
    Complete,
}

/// Validates Prim's algorithm: after choosing a root, the tree grows by the lightest edge leaving
/// the set of visited vertices.
///
/// A proposed edge is checked in this order: it must touch a visited vertex
/// ([`Rejection::NotConnectedEdge`]), must not close a cycle ([`Rejection::Cycle`]) and must be of
/// minimum weight among the candidate edges ([`Rejection::NotLowestWeight`]), i.e. the edges with
/// exactly one visited endpoint.
#[derive(Debug, Clone)]
pub struct Prim {
    graph: Graph,
    phase: PrimPhase,
    root: Option<VertexId>,
    visited: FxHashSet<VertexId>,
    sub_graph: Graph,
    accepted: Vec<EdgeId>,
    candidates: Vec<EdgeId>,
    errors: ErrorSlot,
}

impl Prim {
    pub fn new(graph: Graph) -> Self {
        let sub_graph = graph.spanning_empty();
        Self {
            graph,
            phase: PrimPhase::ChooseVertex,
            root: None,
            visited: FxHashSet::default(),
            sub_graph,
            accepted: Vec::new(),
            candidates: Vec::new(),
            errors: ErrorSlot::default(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn phase(&self) -> PrimPhase {
        self.phase
    }

    /// The chosen root vertex
    pub fn root(&self) -> Option<VertexId> {
        self.root
    }

    /// Returns *true* if `v` is part of the tree
    pub fn is_visited(&self, v: VertexId) -> bool {
        self.visited.contains(&v)
    }

    /// The accepted edges as a graph on all vertices
    pub fn sub_graph(&self) -> &Graph {
        &self.sub_graph
    }

    /// Accepted edges in the order they were chosen
    pub fn accepted(&self) -> &[EdgeId] {
        &self.accepted
    }

    /// Edges with exactly one visited endpoint; the lightest ones are legal next moves
    pub fn legal_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.candidates.iter().map(|&id| self.graph.edge(id))
    }

    /// Weight of the lightest candidate edge
    pub fn lowest_legal_weight(&self) -> Option<Weight> {
        self.legal_edges()
            .map(|e| e.weight)
            .min_by(|&a, &b| weight_cmp(a, b))
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
            PrimPhase::ChooseVertex => {}
            PrimPhase::SelectingEdges => return Err(Rejection::ExpectedEdge),
            PrimPhase::Complete => return Err(Rejection::Finished),
        }

        self.root = Some(v);
        self.phase = PrimPhase::SelectingEdges;
        self.visit(v);
        debug!("prim: started at {v}");
        Ok(())
    }

    fn try_select(&mut self, id: EdgeId) -> Result<(), Rejection> {
        let edge = edge_of(&self.graph, id);
        match self.phase {
            PrimPhase::ChooseVertex => return Err(Rejection::ExpectedVertex),
            PrimPhase::SelectingEdges => {}
            PrimPhase::Complete => return Err(Rejection::Finished),
        }

        if self.sub_graph.has_edge_id(id) {
            return Err(Rejection::AlreadyChosen);
        }
        if !self.is_visited(edge.start) && !self.is_visited(edge.end) {
            return Err(Rejection::NotConnectedEdge);
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

        let new = if self.is_visited(edge.start) {
            edge.end
        } else {
            edge.start
        };

        self.sub_graph = self.sub_graph.with_copied_edge(&edge);
        self.accepted.push(id);
        self.visit(new);
        debug!("prim: accepted {edge}, reached {new}");
        Ok(())
    }

    /// Marks `v` visited and updates the candidate pool and phase
    fn visit(&mut self, v: VertexId) {
        self.visited.insert(v);

        let visited = &self.visited;
        let graph = &self.graph;
        self.candidates.retain(|&id| !graph.edge(id).touches(v));
        self.candidates.extend(
            graph
                .edges_of(v)
                .filter(|e| !visited.contains(&e.other(v)))
                .map(|e| e.id),
        );

        if self.accepted.len() == self.graph.number_of_vertices().saturating_sub(1) {
            self.phase = PrimPhase::Complete;
            debug!("prim: spanning tree complete");
        }
    }
}

impl Session for Prim {
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
        self.phase == PrimPhase::Complete
    }

    fn current_weight(&self) -> Weight {
        self.sub_graph.total_weight()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.errors.rejection()
    }

    fn reset(&mut self) {
        *self = Self::new(self.graph.clone());
    }
}
