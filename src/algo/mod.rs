/*!
# Graph Algorithms

This module provides the **graph predicates and reference algorithms** the validators in
[`crate::verify`] are built on. All algorithms are re-exported at the top level of this module,
so you can simply do:
```rust
use graphcheck::algo::*;
```
and gain access to traversal, connectivity, cycle detection, shortest trails, perfect matchings,
spanning trees and TSP bounds.

Most functionality is implemented as traits on every [`IncidenceList`], i.e. on both
[`Graph`](crate::repr::Graph) and the overlay view [`Tentative`](crate::repr::Tentative).
*/

mod bridges;
mod connectivity;
mod matching;
mod mst;
mod shortest_paths;
mod structure;
mod traversal;
mod tsp;

use crate::{prelude::*, utils::*};

pub use bridges::*;
pub use connectivity::*;
pub use matching::*;
pub use mst::*;
pub use shortest_paths::*;
pub use structure::*;
pub use traversal::*;
pub use tsp::*;
