/*!
# Graph Generators

Builders for deterministic and random weighted graphs, mainly used to produce inputs for tests,
demos and exercises.

The typical usage workflow is the same for all random generators:

1. Create a generator instance (e.g., `WeightedGnp::new()`).
2. Set parameters using builder methods (e.g., `.nodes(n).prob(p)`).
3. Generate a graph via `generate(rng)`.

Supported models include:
- `G(n,p)` with uniformly random integral or real weights ([`WeightedGnp`]),
- complete Euclidean graphs on random points in a square ([`EuclideanComplete`]), the kind of
  instance the TSP bounds are defined for,
- deterministic paths, cycles and cliques ([`path_graph`], [`cycle_graph`], [`complete_graph`] and
  the [`GeneratorSubstructures`] trait on [`GraphBuilder`]).

# Example
```
use graphcheck::{prelude::*, gens::*, algo::*};

let mut rng = rand::rng();
let instance = EuclideanComplete::new().nodes(6).side(10.0).generate(&mut rng);

assert!(instance.graph().is_complete());
assert_eq!(instance.graph().number_of_edges(), 15);
```
*/

use rand::Rng;

use crate::prelude::*;

mod euclidean;
mod gnp;
mod substructures;

pub use euclidean::*;
pub use gnp::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the graph generator.
    fn set_nodes(&mut self, n: usize);

    /// Builder-style variant of [`NumNodesGen::set_nodes`].
    fn nodes(mut self, n: usize) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for random graph generators
pub trait GraphGenerator {
    /// Output of the generator
    type Output;

    /// Generates a random instance
    fn generate<R>(&self, rng: &mut R) -> Self::Output
    where
        R: Rng;
}
