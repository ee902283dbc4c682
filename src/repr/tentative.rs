use smallvec::SmallVec;

use super::*;

/// An overlay view on a [`Graph`] that adds and/or hides a few edges without copying the graph.
///
/// All read traits are implemented, so every predicate in [`crate::algo`] can be evaluated on
/// the hypothetical graph directly:
///
/// ```
/// use graphcheck::{prelude::*, algo::*};
///
/// let graph = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]);
/// let tree = graph.edge_subgraph(graph.edges().take(2).map(|e| e.id));
/// let closing = graph.edge_slice()[2];
///
/// assert!(!tree.has_cycle());
/// assert!(tree.tentative().adding(closing).has_cycle());
/// ```
#[derive(Clone)]
pub struct Tentative<'a> {
    base: &'a Graph,
    added: SmallVec<[Edge; 2]>,
    removed: SmallVec<[EdgeId; 2]>,
}

impl<'a> Tentative<'a> {
    /// Creates an overlay that does not differ from `base`
    pub fn new(base: &'a Graph) -> Self {
        Self {
            base,
            added: SmallVec::new(),
            removed: SmallVec::new(),
        }
    }

    /// Pretends that `edge` is part of the graph.
    /// ** Panics if an endpoint is missing or the id is already visible **
    pub fn add_edge(&mut self, edge: Edge) {
        assert!(
            self.base.has_vertex(edge.start) && self.base.has_vertex(edge.end),
            "endpoints of {edge} are not part of the graph"
        );
        assert!(!self.has_edge_id(edge.id), "edge {} already present", edge.id);
        self.added.push(edge);
    }

    /// Builder-style variant of [`Tentative::add_edge`]
    pub fn adding(mut self, edge: Edge) -> Self {
        self.add_edge(edge);
        self
    }

    /// Pretends that the edge with id `id` does not exist.
    /// Hiding an id that is not visible is a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) {
        if let Some(pos) = self.added.iter().position(|e| e.id == id) {
            self.added.remove(pos);
        } else if self.base.has_edge_id(id) && !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }

    /// Builder-style variant of [`Tentative::remove_edge`]
    pub fn removing(mut self, id: EdgeId) -> Self {
        self.remove_edge(id);
        self
    }

    /// Materializes the overlay into a new [`Graph`] value
    pub fn commit(&self) -> Graph {
        let mut graph = self
            .base
            .edge_subgraph(self.base.edges().map(|e| e.id).filter(|id| !self.removed.contains(id)));
        for e in &self.added {
            graph = graph.with_copied_edge(e);
        }
        graph
    }

    fn is_hidden(&self, id: EdgeId) -> bool {
        self.removed.contains(&id)
    }
}

impl GraphOrder for Tentative<'_> {
    fn number_of_vertices(&self) -> usize {
        self.base.number_of_vertices()
    }

    fn number_of_edges(&self) -> usize {
        self.base.number_of_edges() - self.removed.len() + self.added.len()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + Clone + '_ {
        self.base.vertices()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.base
            .edges()
            .filter(move |e| !self.is_hidden(e.id))
            .chain(self.added.iter())
    }

    fn has_vertex(&self, v: VertexId) -> bool {
        self.base.has_vertex(v)
    }

    fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.added.iter().find(|e| e.id == id).or_else(|| {
            if self.is_hidden(id) {
                None
            } else {
                self.base.edge_by_id(id)
            }
        })
    }
}

impl IncidenceList for Tentative<'_> {
    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.base
            .edges_of(v)
            .filter(move |e| !self.is_hidden(e.id))
            .chain(self.added.iter().filter(move |e| e.touches(v)))
    }
}
