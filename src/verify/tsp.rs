/*!
# TSP Bounds

Two independent exercises on a complete Euclidean graph:

- [`NearestNeighborTour`] validates the nearest neighbor heuristic, an **upper bound** on the
  length of an optimal tour,
- [`DeletionBound`] validates the vertex deletion bound, a **lower bound**: delete a vertex, find
  a minimum spanning tree of the rest (validated by an inner [`Kruskal`] session) and add back the
  two lightest edges of the deleted vertex.

[`TspBoundEngine`] checks the precondition once and runs both exercises in sequence.
*/

use fxhash::FxHashSet;
use log::debug;

use super::*;
use crate::algo::*;

/// Phases of a [`NearestNeighborTour`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    ChooseStart,
    Touring,
    Complete,
}

/// Validates the nearest neighbor heuristic.
///
/// From the current vertex only the lightest edges to unvisited vertices are legal; once every
/// vertex has been visited only the lightest edge back to the start is.
#[derive(Debug, Clone)]
pub struct NearestNeighborTour {
    graph: Graph,
    phase: TourPhase,
    start: Option<VertexId>,
    position: Option<VertexId>,
    visited: FxHashSet<VertexId>,
    tour: Vec<EdgeId>,
    errors: ErrorSlot,
}

impl NearestNeighborTour {
    /// Creates a session on `graph` which is assumed to be complete
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            phase: TourPhase::ChooseStart,
            start: None,
            position: None,
            visited: FxHashSet::default(),
            tour: Vec::new(),
            errors: ErrorSlot::default(),
        }
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    pub fn position(&self) -> Option<VertexId> {
        self.position
    }

    /// Accepted tour edges in order
    pub fn tour(&self) -> &[EdgeId] {
        &self.tour
    }

    pub fn is_visited(&self, v: VertexId) -> bool {
        self.visited.contains(&v)
    }

    /// Length of the completed tour
    pub fn upper_bound(&self) -> Option<Weight> {
        self.is_complete().then(|| self.current_weight())
    }

    /// Legal next edges (all of the same, minimal weight)
    pub fn legal_edges(&self) -> Vec<EdgeId> {
        let Some(position) = self.position.filter(|_| self.phase == TourPhase::Touring) else {
            return Vec::new();
        };

        let pool = self.pool(position);
        let Some(min) = pool
            .iter()
            .map(|e| e.weight)
            .min_by(|&a, &b| weight_cmp(a, b))
        else {
            return Vec::new();
        };
        pool.into_iter()
            .filter(|e| weight_eq(e.weight, min))
            .map(|e| e.id)
            .collect()
    }

    /// Shorthand for validating [`Candidate::Vertex`]
    pub fn choose_vertex(&mut self, v: VertexId) -> Verdict {
        self.validate(Candidate::Vertex(v))
    }

    /// Shorthand for validating [`Candidate::Edge`]
    pub fn select_edge(&mut self, id: EdgeId) -> Verdict {
        self.validate(Candidate::Edge(id))
    }

    fn all_visited(&self) -> bool {
        self.visited.len() == self.graph.number_of_vertices()
    }

    /// Edges from `position` a correct move has to be chosen among
    fn pool(&self, position: VertexId) -> Vec<&Edge> {
        let all_visited = self.all_visited();
        self.graph
            .edges_of(position)
            .filter(|e| {
                let target = e.other(position);
                if all_visited {
                    !e.is_loop() && Some(target) == self.start
                } else {
                    !self.is_visited(target)
                }
            })
            .collect()
    }

    fn try_choose(&mut self, v: VertexId) -> Result<(), Rejection> {
        assert_vertex(&self.graph, v);
        match self.phase {
            TourPhase::ChooseStart => {}
            TourPhase::Touring => return Err(Rejection::ExpectedEdge),
            TourPhase::Complete => return Err(Rejection::Finished),
        }

        self.start = Some(v);
        self.position = Some(v);
        self.visited.insert(v);
        self.phase = if self.graph.number_of_vertices() == 1 {
            TourPhase::Complete
        } else {
            TourPhase::Touring
        };
        debug!("nearest neighbor: tour starts at {v}");
        Ok(())
    }

    fn try_select(&mut self, id: EdgeId) -> Result<(), Rejection> {
        let edge = edge_of(&self.graph, id);
        let position = match (self.phase, self.position) {
            (TourPhase::Touring, Some(position)) => position,
            (TourPhase::Complete, _) => return Err(Rejection::Finished),
            _ => return Err(Rejection::ExpectedVertex),
        };

        if !edge.touches(position) {
            return Err(Rejection::NotAdjacentEdge);
        }

        let pool = self.pool(position);
        if !pool.iter().any(|e| e.id == id) {
            return Err(Rejection::AlreadyVisited);
        }
        if pool.iter().any(|e| weight_lt(e.weight, edge.weight)) {
            return Err(Rejection::NotLowestWeight);
        }

        let target = edge.other(position);
        self.tour.push(id);
        self.position = Some(target);

        if self.all_visited() {
            self.phase = TourPhase::Complete;
            debug!(
                "nearest neighbor: tour complete, upper bound {}",
                self.current_weight()
            );
        } else {
            self.visited.insert(target);
            debug!("nearest neighbor: accepted {edge}, reached {target}");
        }
        Ok(())
    }
}

impl Session for NearestNeighborTour {
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
        self.phase == TourPhase::Complete
    }

    fn current_weight(&self) -> Weight {
        self.tour.iter().map(|&id| self.graph.edge(id).weight).sum()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.errors.rejection()
    }

    fn reset(&mut self) {
        *self = Self::new(self.graph.clone());
    }
}

/// Phases of a [`DeletionBound`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionPhase {
    /// Waiting for the vertex to delete
    ChooseVertex,
    /// Building a minimum spanning tree of the remaining graph
    SpanningTree,
    /// Adding back the two lightest deleted edges
    AddBack,
    Complete,
}

/// Validates the vertex deletion lower bound
#[derive(Debug, Clone)]
pub struct DeletionBound {
    graph: Graph,
    phase: DeletionPhase,
    deleted: Option<VertexId>,
    deleted_edges: Vec<EdgeId>,
    tree: Option<Kruskal>,
    added: Vec<EdgeId>,
    errors: ErrorSlot,
}

impl DeletionBound {
    /// Creates a session on `graph` which is assumed to be complete
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            phase: DeletionPhase::ChooseVertex,
            deleted: None,
            deleted_edges: Vec::new(),
            tree: None,
            added: Vec::new(),
            errors: ErrorSlot::default(),
        }
    }

    pub fn phase(&self) -> DeletionPhase {
        self.phase
    }

    pub fn deleted_vertex(&self) -> Option<VertexId> {
        self.deleted
    }

    /// Non-loop edges of the deleted vertex
    pub fn deleted_edges(&self) -> &[EdgeId] {
        &self.deleted_edges
    }

    /// The inner spanning tree session on the graph without the deleted vertex
    pub fn spanning_tree(&self) -> Option<&Kruskal> {
        self.tree.as_ref()
    }

    /// Deleted edges added back so far
    pub fn added_edges(&self) -> &[EdgeId] {
        &self.added
    }

    /// Spanning tree weight plus the two added edges once complete
    pub fn lower_bound(&self) -> Option<Weight> {
        self.is_complete().then(|| self.current_weight())
    }

    /// Shorthand for validating [`Candidate::Vertex`]
    pub fn choose_vertex(&mut self, v: VertexId) -> Verdict {
        self.validate(Candidate::Vertex(v))
    }

    /// Shorthand for validating [`Candidate::Edge`]
    pub fn select_edge(&mut self, id: EdgeId) -> Verdict {
        self.validate(Candidate::Edge(id))
    }

    fn required_add_backs(&self) -> usize {
        self.deleted_edges.len().min(2)
    }

    fn try_choose(&mut self, v: VertexId) -> Result<(), Rejection> {
        assert_vertex(&self.graph, v);
        match self.phase {
            DeletionPhase::ChooseVertex => {}
            DeletionPhase::Complete => return Err(Rejection::Finished),
            _ => return Err(Rejection::ExpectedEdge),
        }

        self.deleted = Some(v);
        self.deleted_edges = self
            .graph
            .edges_of(v)
            .filter(|e| !e.is_loop())
            .map(|e| e.id)
            .collect();
        self.tree = Some(Kruskal::new(self.graph.without_vertex(v)));
        self.phase = DeletionPhase::SpanningTree;
        debug!(
            "deletion bound: deleted {v} with {} edges",
            self.deleted_edges.len()
        );

        self.advance();
        Ok(())
    }

    fn try_select(&mut self, id: EdgeId) -> Result<(), Rejection> {
        let edge = edge_of(&self.graph, id);
        match self.phase {
            DeletionPhase::ChooseVertex => Err(Rejection::ExpectedVertex),
            DeletionPhase::Complete => Err(Rejection::Finished),
            DeletionPhase::SpanningTree => {
                if self.deleted.is_some_and(|v| edge.touches(v)) {
                    return Err(Rejection::DeletedEdge);
                }
                let Some(tree) = self.tree.as_mut() else {
                    panic!("deletion bound: spanning tree phase without a spanning tree session");
                };
                tree.try_select(id)?;
                self.advance();
                Ok(())
            }
            DeletionPhase::AddBack => {
                if self.added.contains(&id) {
                    return Err(Rejection::AlreadyChosen);
                }
                if !self.deleted_edges.contains(&id) {
                    return Err(Rejection::NotDeletedEdge);
                }

                let lighter = self
                    .deleted_edges
                    .iter()
                    .filter(|&&f| {
                        !self.added.contains(&f)
                            && weight_lt(self.graph.edge(f).weight, edge.weight)
                    })
                    .count();
                if lighter >= self.required_add_backs() - self.added.len() {
                    return Err(Rejection::NotLowestWeight);
                }

                self.added.push(id);
                debug!("deletion bound: added back {edge}");
                self.advance();
                Ok(())
            }
        }
    }

    /// Moves on to the next phase once the current one is done
    fn advance(&mut self) {
        if self.phase == DeletionPhase::SpanningTree
            && self.tree.as_ref().is_some_and(Kruskal::is_complete)
        {
            debug!("deletion bound: spanning tree complete");
            self.phase = DeletionPhase::AddBack;
        }

        if self.phase == DeletionPhase::AddBack && self.added.len() == self.required_add_backs() {
            debug!("deletion bound: lower bound {}", self.current_weight());
            self.phase = DeletionPhase::Complete;
        }
    }
}

impl Session for DeletionBound {
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
        self.phase == DeletionPhase::Complete
    }

    fn current_weight(&self) -> Weight {
        let tree = self.tree.as_ref().map_or(0.0, Kruskal::current_weight);
        tree + self
            .added
            .iter()
            .map(|&id| self.graph.edge(id).weight)
            .sum::<Weight>()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.errors.rejection()
    }

    fn reset(&mut self) {
        *self = Self::new(self.graph.clone());
    }
}

/// Both TSP bound exercises on a complete Euclidean graph.
///
/// As a [`Session`], candidates are validated by the nearest neighbor tour until it is complete
/// and by the deletion bound afterwards.
#[derive(Debug, Clone)]
pub struct TspBoundEngine {
    upper: NearestNeighborTour,
    lower: DeletionBound,
}

impl TspBoundEngine {
    /// Creates both sessions. `complete_and_euclidean` is the externally computed precondition;
    /// completeness is double-checked.
    pub fn new(graph: Graph, complete_and_euclidean: bool) -> Result<Self, Infeasible> {
        if !complete_and_euclidean || !graph.is_complete() {
            debug!("tsp: graph is not complete and Euclidean");
            return Err(Infeasible::NotCompleteEuclidean);
        }

        Ok(Self {
            upper: NearestNeighborTour::new(graph.clone()),
            lower: DeletionBound::new(graph),
        })
    }

    pub fn upper(&self) -> &NearestNeighborTour {
        &self.upper
    }

    pub fn upper_mut(&mut self) -> &mut NearestNeighborTour {
        &mut self.upper
    }

    pub fn lower(&self) -> &DeletionBound {
        &self.lower
    }

    pub fn lower_mut(&mut self) -> &mut DeletionBound {
        &mut self.lower
    }

    pub fn upper_bound(&self) -> Option<Weight> {
        self.upper.upper_bound()
    }

    pub fn lower_bound(&self) -> Option<Weight> {
        self.lower.lower_bound()
    }

    fn active(&self) -> &dyn Session {
        if self.upper.is_complete() {
            &self.lower
        } else {
            &self.upper
        }
    }
}

impl Session for TspBoundEngine {
    fn validate(&mut self, candidate: Candidate) -> Verdict {
        if self.upper.is_complete() {
            self.lower.validate(candidate)
        } else {
            self.upper.validate(candidate)
        }
    }

    fn is_complete(&self) -> bool {
        self.upper.is_complete() && self.lower.is_complete()
    }

    fn current_weight(&self) -> Weight {
        self.active().current_weight()
    }

    fn error_state(&self) -> Option<Rejection> {
        self.active().error_state()
    }

    fn reset(&mut self) {
        self.upper.reset();
        self.lower.reset();
    }
}
