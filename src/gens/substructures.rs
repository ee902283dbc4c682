/*!
# Substructure Generators

Utility methods to add common motifs (paths, cycles, cliques) with weights given by a closure,
either to a [`GraphBuilder`] or as standalone graphs.

# Example

```rust
use graphcheck::{prelude::*, gens::*};

let mut builder = GraphBuilder::new();
let vs = builder.add_vertices(4);
builder.connect_path(vs[..3].iter().copied(), |_| 1.0);
builder.connect_clique(&vs[1..], |_, _| 2.0);

let graph = builder.build();
assert_eq!(graph.number_of_edges(), 2 + 3);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques) while building a graph.
pub trait GeneratorSubstructures {
    /// Connects the given vertices in order with a **simple path**; the `i`-th edge gets weight
    /// `weight(i)`.
    fn connect_path<P, F>(&mut self, vertices_on_path: P, weight: F) -> Vec<EdgeId>
    where
        P: IntoIterator<Item = VertexId>,
        F: FnMut(usize) -> Weight;

    /// Connects the given vertices with a **cycle**: consecutive vertices are joined and the last
    /// vertex is connected back to the first. The `i`-th edge gets weight `weight(i)`.
    fn connect_cycle<C, F>(&mut self, vertices_in_cycle: C, weight: F) -> Vec<EdgeId>
    where
        C: IntoIterator<Item = VertexId>,
        F: FnMut(usize) -> Weight;

    /// Connects every pair `i < j` of the given vertices by an edge of weight `weight(i, j)`
    /// (indices into `vertices`).
    fn connect_clique<F>(&mut self, vertices: &[VertexId], weight: F) -> Vec<EdgeId>
    where
        F: FnMut(usize, usize) -> Weight;
}

impl GeneratorSubstructures for GraphBuilder {
    fn connect_path<P, F>(&mut self, vertices_on_path: P, mut weight: F) -> Vec<EdgeId>
    where
        P: IntoIterator<Item = VertexId>,
        F: FnMut(usize) -> Weight,
    {
        vertices_on_path
            .into_iter()
            .tuple_windows()
            .enumerate()
            .map(|(i, (u, v))| self.add_edge(u, v, weight(i)))
            .collect_vec()
    }

    fn connect_cycle<C, F>(&mut self, vertices_in_cycle: C, mut weight: F) -> Vec<EdgeId>
    where
        C: IntoIterator<Item = VertexId>,
        F: FnMut(usize) -> Weight,
    {
        let mut iter = vertices_in_cycle.into_iter();
        let mut edges = Vec::new();

        // we use a rather tedious implementation to avoid needing to clone the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                edges.push(self.add_edge(prev, cur, weight(edges.len())));
                prev = cur;
            }

            edges.push(self.add_edge(prev, first, weight(edges.len())));
        }

        edges
    }

    fn connect_clique<F>(&mut self, vertices: &[VertexId], mut weight: F) -> Vec<EdgeId>
    where
        F: FnMut(usize, usize) -> Weight,
    {
        (0..vertices.len())
            .tuple_combinations()
            .map(|(i, j)| self.add_edge(vertices[i], vertices[j], weight(i, j)))
            .collect_vec()
    }
}

/// Creates a path `v0 - v1 - ... - v{n-1}` where edge `(i, i + 1)` has weight `weight(i)`
pub fn path_graph<F>(n: usize, weight: F) -> Graph
where
    F: FnMut(usize) -> Weight,
{
    let mut builder = GraphBuilder::new();
    let vertices = builder.add_vertices(n);
    builder.connect_path(vertices, weight);
    builder.build()
}

/// Creates a cycle on `n` vertices where edge `(i, i + 1 mod n)` has weight `weight(i)`.
/// For `n = 1` this is a single self-loop, for `n = 2` two parallel edges.
pub fn cycle_graph<F>(n: usize, weight: F) -> Graph
where
    F: FnMut(usize) -> Weight,
{
    let mut builder = GraphBuilder::new();
    let vertices = builder.add_vertices(n);
    builder.connect_cycle(vertices, weight);
    builder.build()
}

/// Creates the complete graph on `n` vertices where edge `{i, j}` has weight `weight(i, j)`
pub fn complete_graph<F>(n: usize, weight: F) -> Graph
where
    F: FnMut(usize, usize) -> Weight,
{
    let mut builder = GraphBuilder::new();
    let vertices = builder.add_vertices(n);
    builder.connect_clique(&vertices, weight);
    builder.build()
}
