/*!
Graph traversal algorithms.

This module provides generic traversal iterators (BFS and DFS) over any [`IncidenceList`] and a
[`Traversal`] trait exposing them as methods on graphs. The traversal order is determined by the
frontier data structure ([`NodeSequencer`]): a queue yields BFS, a stack yields DFS.

Traversals are lazy; e.g. reachability stops as soon as the target is discovered.
*/

use std::collections::VecDeque;

use fxhash::FxHashSet;

use super::*;

/// Abstraction for the traversal frontier data structure.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single item.
    fn init(u: T) -> Self;

    /// Pushes an item into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next item from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn init(u: T) -> Self {
        vec![u]
    }
    fn push(&mut self, u: T) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator supporting BFS and DFS variants.
///
/// Yields every vertex reachable from the start vertex exactly once (the start vertex first).
pub struct TraversalSearch<'a, G, S>
where
    G: IncidenceList,
    S: NodeSequencer<VertexId>,
{
    graph: &'a G,
    visited: FxHashSet<VertexId>,
    sequencer: S,
    stop_at: Option<VertexId>,
}

/// A BFS traversal iterator visiting vertices in breadth-first order.
pub type Bfs<'a, G> = TraversalSearch<'a, G, VecDeque<VertexId>>;

/// A DFS traversal iterator visiting vertices in depth-first order.
pub type Dfs<'a, G> = TraversalSearch<'a, G, Vec<VertexId>>;

impl<'a, G, S> TraversalSearch<'a, G, S>
where
    G: IncidenceList,
    S: NodeSequencer<VertexId>,
{
    /// Creates a new traversal iterator starting from `start`.
    /// ** Panics if `start` is not a vertex of the graph **
    pub fn new(graph: &'a G, start: VertexId) -> Self {
        assert!(graph.has_vertex(start), "vertex {start} is not part of the graph");

        let mut visited = FxHashSet::default();
        visited.insert(start);
        Self {
            graph,
            visited,
            sequencer: S::init(start),
            stop_at: None,
        }
    }

    /// Sets a stopper vertex. If it is reached, the iterator returns it and afterwards only `None`.
    pub fn set_stop_at(&mut self, stopper: VertexId) {
        self.stop_at = Some(stopper);
    }

    /// Builder-style variant of [`TraversalSearch::set_stop_at`].
    pub fn stop_at(mut self, stopper: VertexId) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Returns *true* if `v` was discovered so far
    pub fn did_visit(&self, v: VertexId) -> bool {
        self.visited.contains(&v)
    }

    /// Tries to restart the search at a yet unvisited vertex and returns *true* iff successful.
    /// Requires that the search came to a halt earlier, i.e. `self.next()` returned `None`.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        assert_eq!(self.sequencer.cardinality(), 0);
        match self.graph.vertices().find(|u| !self.visited.contains(u)) {
            None => false,
            Some(x) => {
                self.visited.insert(x);
                self.sequencer.push(x);
                true
            }
        }
    }

    /// Consumes the search and returns *true* iff `target` is reachable from the start vertex.
    pub fn is_vertex_reachable(self, target: VertexId) -> bool {
        let mut search = self.stop_at(target);
        search.any(|v| v == target)
    }
}

impl<G, S> Iterator for TraversalSearch<'_, G, S>
where
    G: IncidenceList,
    S: NodeSequencer<VertexId>,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.sequencer.pop()?;

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if self.visited.insert(v) {
                    self.sequencer.push(v);
                }
            }
        }

        Some(u)
    }
}

/// Traversal algorithms as methods on graphs
pub trait Traversal: IncidenceList {
    /// Returns an iterator that traverses vertices reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use graphcheck::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]);
    /// let order: Vec<_> = g.bfs(g.vertex_at(1)).collect();
    /// assert_eq!(order.len(), 3);
    /// assert_eq!(order[0], g.vertex_at(1));
    /// ```
    fn bfs(&self, start: VertexId) -> Bfs<'_, Self> {
        Bfs::new(self, start)
    }

    /// Returns an iterator that traverses vertices reachable from `start`
    /// in **depth-first search (DFS) order**.
    fn dfs(&self, start: VertexId) -> Dfs<'_, Self> {
        Dfs::new(self, start)
    }
}

impl<G: IncidenceList> Traversal for G {}
