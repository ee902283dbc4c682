/*!
# Vertex & Edge Identifiers

Vertices and edges are identified by opaque tagged identifiers.
Both wrap a `u32` as graphs edited by hand rarely exceed a few dozen vertices, but the two types
are distinct so that a vertex can never be passed where an edge is expected.

Identifiers are allocated by [`GraphBuilder`](crate::repr::GraphBuilder) and stay stable for the
lifetime of a snapshot and every graph value derived from it (subgraphs, copies with a deleted
vertex, ...). Edges are *always* compared by their identifier, never by their endpoints, which is
what makes parallel edges and self-loops first-class citizens.
*/

use std::fmt::{Debug, Display};

/// Raw representation of both identifier types
pub type RawId = u32;

macro_rules! tagged_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(RawId);

        impl $name {
            /// Wraps a raw identifier
            pub const fn new(raw: RawId) -> Self {
                Self(raw)
            }

            /// Returns the raw identifier
            pub const fn raw(&self) -> RawId {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                <Self as Display>::fmt(self, f)
            }
        }

        impl From<$name> for RawId {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

tagged_id!(VertexId, "v");
tagged_id!(EdgeId, "e");

/// Either a vertex or an edge; the unit of user input handed to a validator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// The user picked a vertex (e.g. a start vertex)
    Vertex(VertexId),
    /// The user picked an edge
    Edge(EdgeId),
}

impl Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidate::Vertex(v) => write!(f, "{v}"),
            Candidate::Edge(e) => write!(f, "{e}"),
        }
    }
}

impl From<VertexId> for Candidate {
    fn from(value: VertexId) -> Self {
        Candidate::Vertex(value)
    }
}

impl From<EdgeId> for Candidate {
    fn from(value: EdgeId) -> Self {
        Candidate::Edge(value)
    }
}
