use super::*;

/// `G(n,p)` graphs contain every possible edge `{u, v}` with `u < v` with probability `p`
/// independent from each other. Weights are drawn uniformly from `[min_weight, max_weight]`,
/// rounded to integers if [`WeightedGnp::integral`] is set.
#[derive(Debug, Copy, Clone)]
pub struct WeightedGnp {
    n: usize,
    p: f64,
    min_weight: Weight,
    max_weight: Weight,
    integral: bool,
}

impl Default for WeightedGnp {
    fn default() -> Self {
        Self {
            n: 0,
            p: 0.5,
            min_weight: 1.0,
            max_weight: 10.0,
            integral: true,
        }
    }
}

impl WeightedGnp {
    /// Creates a new generator with `p = 0.5` and integral weights in `[1, 10]`
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly.
    /// ** Panics if `p` is not a probability **
    pub fn prob(mut self, p: f64) -> Self {
        assert!((0.0..=1.0).contains(&p), "invalid probability {p}");
        self.p = p;
        self
    }

    /// Updates the weight range.
    /// ** Panics if the range is empty or negative **
    pub fn weights(mut self, min_weight: Weight, max_weight: Weight) -> Self {
        assert!(0.0 <= min_weight && min_weight <= max_weight);
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        self
    }

    /// Rounds weights to integers if set
    pub fn integral(mut self, integral: bool) -> Self {
        self.integral = integral;
        self
    }
}

impl NumNodesGen for WeightedGnp {
    fn set_nodes(&mut self, n: usize) {
        self.n = n;
    }
}

impl GraphGenerator for WeightedGnp {
    type Output = Graph;

    fn generate<R>(&self, rng: &mut R) -> Graph
    where
        R: Rng,
    {
        let mut builder = GraphBuilder::new();
        let vertices = builder.add_vertices(self.n);

        for (i, &u) in vertices.iter().enumerate() {
            for &v in &vertices[i + 1..] {
                if !rng.random_bool(self.p) {
                    continue;
                }

                let w = rng.random_range(self.min_weight..=self.max_weight);
                builder.add_edge(u, v, if self.integral { w.round() } else { w });
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::algo::*;

    #[test]
    fn extreme_probabilities() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        let empty = WeightedGnp::new().nodes(10).prob(0.0).generate(rng);
        assert_eq!(empty.number_of_vertices(), 10);
        assert_eq!(empty.number_of_edges(), 0);

        let full = WeightedGnp::new().nodes(10).prob(1.0).generate(rng);
        assert!(full.is_complete());
        assert_eq!(full.number_of_edges(), 45);
    }

    #[test]
    fn weights_in_range() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        let graph = WeightedGnp::new()
            .nodes(20)
            .weights(2.0, 5.0)
            .generate(rng);
        assert!(graph.edges().all(|e| (2.0..=5.0).contains(&e.weight)));
        assert!(graph.edges().all(|e| e.weight.fract() == 0.0));

        let real = WeightedGnp::new()
            .nodes(20)
            .weights(0.0, 1.0)
            .integral(false)
            .generate(rng);
        assert!(real.edges().any(|e| e.weight.fract() != 0.0));
    }
}
