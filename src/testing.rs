//! Shared fixtures for unit tests

use rand::Rng;

use crate::prelude::*;

/// Creates a random multigraph on `n` vertices with `m` edges; loops and parallel edges may occur.
/// Weights are small integers so that sums are exact.
pub fn random_multigraph<R: Rng>(rng: &mut R, n: usize, m: usize) -> Graph {
    Graph::from_edges(
        n,
        (0..m)
            .map(|_| {
                (
                    rng.random_range(0..n),
                    rng.random_range(0..n),
                    rng.random_range(1..10) as Weight,
                )
            })
            .collect::<Vec<_>>(),
    )
}

/// The five-vertex Chinese Postman example `A..E` with edges
/// `AB=9, AD=6, AE=3, BC=8, BE=5, CD=7, CE=4, DE=2`
pub fn postman_example() -> (Graph, [VertexId; 5]) {
    let graph = Graph::from_edges(
        5,
        [
            (0, 1, 9.0),
            (0, 3, 6.0),
            (0, 4, 3.0),
            (1, 2, 8.0),
            (1, 4, 5.0),
            (2, 3, 7.0),
            (2, 4, 4.0),
            (3, 4, 2.0),
        ],
    );
    let vertices = std::array::from_fn(|i| graph.vertex_at(i));
    (graph, vertices)
}

/// Looks up the lightest edge between two vertices named by letters (`A` is the first vertex)
pub fn edge_id(graph: &Graph, name: &str) -> EdgeId {
    let [u, v]: [usize; 2] = name
        .bytes()
        .map(|b| (b - b'A') as usize)
        .collect::<Vec<_>>()
        .try_into()
        .expect("edge names consist of two letters");

    graph
        .lightest_edge_between(graph.vertex_at(u), graph.vertex_at(v))
        .unwrap_or_else(|| panic!("no edge {name}"))
        .id
}

/// Creates a `width x height` grid with unit weights; vertex `(r, c)` has index `r * width + c`
pub fn grid_graph(width: usize, height: usize) -> Graph {
    let mut edges = Vec::new();
    for r in 0..height {
        for c in 0..width {
            let u = r * width + c;
            if c + 1 < width {
                edges.push((u, u + 1, 1.0));
            }
            if r + 1 < height {
                edges.push((u, u + width, 1.0));
            }
        }
    }
    Graph::from_edges(width * height, edges)
}
