/*!
# Utilities

Helper structures shared by the algorithms:
- [`DisjointSets`]: union-find over vertex identifiers (cycle checks, Kruskal),
- [`VertexIndex`]: dense `0..n` indexing of the (sparse) vertex identifiers of a graph,
- [`double_factorial`]: counting helper for perfect matchings.

You probably do not need to interact with this module directly.
*/

mod union_find;
mod vertex_index;

pub use union_find::*;
pub use vertex_index::*;

/// Returns `n!! = n * (n - 2) * (n - 4) * ...`, with `0!! = 1!! = 1`.
/// Saturates at `u64::MAX` instead of overflowing.
pub fn double_factorial(n: u64) -> u64 {
    (1..=n)
        .rev()
        .step_by(2)
        .fold(1u64, |acc, x| acc.saturating_mul(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_factorials() {
        assert_eq!(double_factorial(0), 1);
        assert_eq!(double_factorial(1), 1);
        assert_eq!(double_factorial(3), 3);
        assert_eq!(double_factorial(5), 15);
        assert_eq!(double_factorial(6), 48);
        assert_eq!(double_factorial(7), 105);
        assert_eq!(double_factorial(200), u64::MAX);
    }
}
