/*!
`graphcheck` is the verification engine of a graph theory teaching tool. It provides
- exact **predicates** on small weighted multigraphs (connectivity, cycles, completeness, parity),
- **reference algorithms** (Dijkstra with enumeration of *all* shortest trails, perfect matchings,
  Kruskal, Prim, nearest neighbor tours, the vertex deletion bound),
- **validators** that check a user's step-by-step choices against those references and classify
  every deviation.

# Representation

**Vertices** and **edges** are identified by tagged `u32` identifiers ([`VertexId`], [`EdgeId`]).
Edges carry a non-negative real [`Weight`] and are always compared by their identifier, so
self-loops and parallel edges are distinct, first-class edges.

A [`Graph`](crate::repr::Graph) is an immutable value. Algorithms that ask "what if I added or
removed this edge?" derive new values (cheaply, as all storage is shared) or use a
[`Tentative`](crate::repr::Tentative) overlay instead of mutating anything.

# Design

Configurable algorithms are provided as structs that one can alter using the *Builder* / *Setter*
pattern before running them on a graph ([`algo::TrailSearch`], [`algo::MatchingSearch`], the
generators in [`gens`]). The commonly used functionality is implemented via traits on the graph
itself, making it usable without configuring anything.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes identifiers, edges, the basic graph operation traits and the graph
  representation,
- [`algo`] includes algorithm traits implemented on graphs such as `graph.is_connected()`,
  `graph.shortest_trails(a, b)` or `graph.perfect_matchings()`,
- [`gens`] includes random graph generators and deterministic substructures,
- [`verify`] includes the interactive sessions ([`verify::Kruskal`], [`verify::Prim`],
  [`verify::ChinesePostman`], [`verify::TspBoundEngine`]).

In most use-cases, `use graphcheck::{prelude::*, algo::*, verify::*};` suffices for your needs.

```
use graphcheck::{prelude::*, verify::*};

let graph = Graph::from_edges(4, [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 3.0)]);
let mut postman = ChinesePostman::new(graph.clone()).unwrap();

// vertices 0 and 2 have odd degree; both detours of weight 2 beat the direct edge
assert_eq!(postman.odd_vertices(), &[graph.vertex_at(0), graph.vertex_at(2)]);
assert_eq!(postman.minimum_weight(), 7.0 + 2.0);
assert!(postman.choose_vertex(graph.vertex_at(0)).is_accepted());
```

# Logging

Sessions report accepted moves and phase changes on the `debug` level and rejections on the
`trace` level of the [`log`] facade. No logger is installed by this crate.
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod ids;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;
pub mod verify;

pub use edge::*;
pub use ids::*;

/// `graphcheck::prelude` includes identifiers and edges, all basic graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, ids::*, ops::*, repr::*};
}
