/*!
# Step-by-Step Validators

Stateful sessions that check a user's choices, one [`Candidate`] at a time, against the reference
algorithms in [`crate::algo`] and classify every deviation.

| Session                  | Algorithm                                   |
|--------------------------|---------------------------------------------|
| [`Kruskal`]              | minimum spanning tree, edges by weight      |
| [`Prim`]                 | minimum spanning tree grown from a vertex   |
| [`ChinesePostman`]       | Eulerian walk with duplicated T-join trails |
| [`NearestNeighborTour`]  | TSP upper bound                             |
| [`DeletionBound`]        | TSP lower bound                             |
| [`TspBoundEngine`]       | both TSP bounds in sequence                 |

Every session implements [`Session`]. User mistakes are never errors in the Rust sense: a
rejected move returns [`Verdict::Rejected`], leaves the session unchanged and is remembered as
the pending [`Session::error_state`]. Proposing the *same* candidate again acknowledges the
mistake: the pending error is cleared ([`Verdict::ErrorCleared`]) and nothing else happens.
Proposing a different candidate is validated normally.

Structural preconditions (a disconnected graph for the Chinese Postman, a graph that is not
complete and Euclidean for the TSP bounds) are reported once by the constructor as
[`Infeasible`]. Passing an identifier that is not part of the session's graph is a contract
violation and panics.

# Example
```
use graphcheck::{prelude::*, verify::*};

let graph = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]);
let ids = graph.edge_slice().iter().map(|e| e.id).collect::<Vec<_>>();
let mut kruskal = Kruskal::new(graph);

assert_eq!(kruskal.select_edge(ids[1]), Verdict::Rejected(Rejection::NotLowestWeight));
assert_eq!(kruskal.select_edge(ids[1]), Verdict::ErrorCleared);
assert_eq!(kruskal.select_edge(ids[0]), Verdict::Accepted);
assert_eq!(kruskal.select_edge(ids[1]), Verdict::Accepted);

assert!(kruskal.is_complete());
assert_eq!(kruskal.current_weight(), 3.0);
```
*/

use log::trace;
use thiserror::Error;

use crate::prelude::*;

mod kruskal;
mod postman;
mod prim;
mod tsp;

pub use kruskal::*;
pub use postman::*;
pub use prim::*;
pub use tsp::*;

/// Classification of a rejected move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("the edge would close a cycle")]
    Cycle,
    #[error("a lighter edge is still available")]
    NotLowestWeight,
    #[error("the edge is not connected to the tree")]
    NotConnectedEdge,
    #[error("the edge may only be traversed twice if it lies on a shortest trail of the T-join")]
    NonTJoinDuplicate,
    #[error("no edge may be traversed more than twice")]
    TJoinEdgeRepeat,
    #[error("the edge does not start at the current vertex")]
    NotAdjacentEdge,
    #[error("the edge leads to a vertex that was already visited")]
    AlreadyVisited,
    #[error("only edges of the deleted vertex can be added back")]
    NotDeletedEdge,
    #[error("the edge was removed together with the deleted vertex")]
    DeletedEdge,
    #[error("the edge has already been chosen")]
    AlreadyChosen,
    #[error("a vertex has to be chosen first")]
    ExpectedVertex,
    #[error("an edge has to be chosen")]
    ExpectedEdge,
    #[error("the algorithm is already finished")]
    Finished,
}

/// Structural precondition failures reported by session constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Infeasible {
    #[error("the graph is not connected, no solution exists")]
    NotConnected,
    #[error("the graph is not complete and Euclidean")]
    NotCompleteEuclidean,
}

/// Outcome of validating a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The move was legal and has been applied
    Accepted,
    /// The candidate repeated the pending error which is now cleared
    ErrorCleared,
    /// The move was illegal; the session is unchanged
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected(_))
    }

    /// Returns the rejection if the move was rejected
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Verdict::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

/// Interface shared by all validators
pub trait Session {
    /// Validates (and on success applies) the user's next choice
    fn validate(&mut self, candidate: Candidate) -> Verdict;

    /// Returns *true* once the algorithm has been carried out completely
    fn is_complete(&self) -> bool;

    /// Total weight of everything accepted so far
    fn current_weight(&self) -> Weight;

    /// The pending error, i.e. the rejection of the most recent move if it has not been cleared
    fn error_state(&self) -> Option<Rejection>;

    /// Returns the session to its initial state
    fn reset(&mut self);
}

/// Pending error of a session together with the candidate that caused it
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ErrorSlot {
    pending: Option<(Candidate, Rejection)>,
}

impl ErrorSlot {
    /// Clears the pending error if `candidate` caused it and returns *true* in that case
    pub fn clears(&mut self, candidate: Candidate) -> bool {
        if self.pending.is_some_and(|(c, _)| c == candidate) {
            trace!("cleared error of {candidate}");
            self.pending = None;
            return true;
        }
        false
    }

    /// Turns the outcome of a move into a verdict, remembering rejections
    pub fn record(&mut self, candidate: Candidate, outcome: Result<(), Rejection>) -> Verdict {
        match outcome {
            Ok(()) => {
                self.pending = None;
                Verdict::Accepted
            }
            Err(rejection) => {
                trace!("rejected {candidate}: {rejection}");
                self.pending = Some((candidate, rejection));
                Verdict::Rejected(rejection)
            }
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.pending.map(|(_, rejection)| rejection)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Looks up `id` in `graph`.
/// ** Panics if the edge is not part of the graph **
pub(crate) fn edge_of(graph: &Graph, id: EdgeId) -> Edge {
    *graph
        .edge_by_id(id)
        .unwrap_or_else(|| panic!("edge {id} is not part of the graph"))
}

/// Asserts that `v` is part of `graph`
pub(crate) fn assert_vertex(graph: &Graph, v: VertexId) {
    assert!(graph.has_vertex(v), "vertex {v} is not part of the graph");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_slot_toggles() {
        let mut slot = ErrorSlot::default();
        let e = Candidate::Edge(EdgeId::new(1));
        let f = Candidate::Edge(EdgeId::new(2));

        assert!(!slot.clears(e));
        assert_eq!(slot.record(e, Err(Rejection::Cycle)), Verdict::Rejected(Rejection::Cycle));
        assert_eq!(slot.rejection(), Some(Rejection::Cycle));

        // a different candidate does not clear
        assert!(!slot.clears(f));
        assert!(slot.clears(e));
        assert_eq!(slot.rejection(), None);
        assert!(!slot.clears(e));

        slot.record(e, Err(Rejection::Cycle));
        assert!(slot.record(f, Ok(())).is_accepted());
        assert_eq!(slot.rejection(), None);
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(Rejection::Cycle.to_string(), "the edge would close a cycle");
        assert_eq!(
            Infeasible::NotConnected.to_string(),
            "the graph is not connected, no solution exists"
        );
        assert_eq!(
            Verdict::Rejected(Rejection::Finished).rejection(),
            Some(Rejection::Finished)
        );
        assert!(Verdict::ErrorCleared.rejection().is_none());
    }
}
