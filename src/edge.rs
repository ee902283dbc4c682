use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
};

use crate::{EdgeId, VertexId};

/// Edge weights are real numbers; all algorithms assume them to be non-negative
pub type Weight = f64;

/// Absolute tolerance used whenever two weights are compared
pub const WEIGHT_EPSILON: Weight = 1e-9;

/// Returns *true* if both weights are equal up to [`WEIGHT_EPSILON`]
pub fn weight_eq(a: Weight, b: Weight) -> bool {
    (a - b).abs() <= WEIGHT_EPSILON
}

/// Returns *true* if `a` is strictly lighter than `b` (beyond [`WEIGHT_EPSILON`])
pub fn weight_lt(a: Weight, b: Weight) -> bool {
    a < b - WEIGHT_EPSILON
}

/// Total order on weights for sorting; `NaN` is treated as equal to everything
pub fn weight_cmp(a: Weight, b: Weight) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// A weighted, undirected edge between `start` and `end`.
///
/// Edges are identified **only** by their id: two parallel edges between the same pair of
/// vertices are different edges, even if they share the same weight.
#[derive(Copy, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(id: EdgeId, start: VertexId, end: VertexId, weight: Weight) -> Self {
        Self {
            id,
            start,
            end,
            weight,
        }
    }

    /// Returns both endpoints as a tuple
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.start, self.end)
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `v` is one of the endpoints
    pub fn touches(&self, v: VertexId) -> bool {
        self.start == v || self.end == v
    }

    /// Returns true if both edges share at least one endpoint
    pub fn is_adjacent_to(&self, other: &Edge) -> bool {
        self.touches(other.start) || self.touches(other.end)
    }

    /// Returns true if the edge joins `u` and `v` (in either orientation)
    pub fn joins(&self, u: VertexId, v: VertexId) -> bool {
        (self.start == u && self.end == v) || (self.start == v && self.end == u)
    }

    /// Returns the endpoint opposite to `v`.
    /// ** Panics if `v` is not an endpoint **
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.start == v {
            self.end
        } else {
            assert_eq!(self.end, v, "{v} is not an endpoint of {self}");
            self.start
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({},{};{})", self.id, self.start, self.end, self.weight)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

/// Sums up the weights of the given edges
pub fn sum_weights<'a, I>(edges: I) -> Weight
where
    I: IntoIterator<Item = &'a Edge>,
{
    edges.into_iter().map(|e| e.weight).sum()
}
