use rand_distr::{Distribution, Uniform};

use super::*;

/// Random points in a square `[0, side)^2`, joined by a complete graph whose edge weights are the
/// Euclidean distances between the points.
///
/// Such graphs satisfy the triangle inequality, which is the precondition of the TSP bound
/// exercises ([`crate::verify::TspBoundEngine`]).
#[derive(Debug, Copy, Clone)]
pub struct EuclideanComplete {
    n: usize,
    side: f64,
    decimals: Option<u32>,
}

impl Default for EuclideanComplete {
    fn default() -> Self {
        Self {
            n: 0,
            side: 100.0,
            decimals: None,
        }
    }
}

impl EuclideanComplete {
    /// Creates a new generator on the square `[0, 100)^2`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the side length of the square.
    /// ** Panics if `side` is not positive **
    pub fn side(mut self, side: f64) -> Self {
        assert!(side > 0.0 && side.is_finite(), "invalid side length {side}");
        self.side = side;
        self
    }

    /// Rounds the distances to the given number of decimals (as displayed to students)
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

impl NumNodesGen for EuclideanComplete {
    fn set_nodes(&mut self, n: usize) {
        self.n = n;
    }
}

/// A complete graph together with the positions of its vertices
#[derive(Debug, Clone)]
pub struct EuclideanInstance {
    graph: Graph,
    positions: Vec<(f64, f64)>,
}

impl EuclideanInstance {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Position of the `i`-th vertex
    pub fn position(&self, i: usize) -> (f64, f64) {
        self.positions[i]
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl GraphGenerator for EuclideanComplete {
    type Output = EuclideanInstance;

    fn generate<R>(&self, rng: &mut R) -> EuclideanInstance
    where
        R: Rng,
    {
        let coord = Uniform::new(0.0, self.side).expect("side length is positive");
        let positions: Vec<(f64, f64)> = (0..self.n)
            .map(|_| (coord.sample(rng), coord.sample(rng)))
            .collect();

        let scale = self.decimals.map(|d| 10f64.powi(d as i32));
        let graph = complete_graph(self.n, |i, j| {
            let (xi, yi) = positions[i];
            let (xj, yj) = positions[j];
            let dist = (xi - xj).hypot(yi - yj);
            match scale {
                Some(scale) => (dist * scale).round() / scale,
                None => dist,
            }
        });

        EuclideanInstance { graph, positions }
    }
}
