use std::hash::Hash;

use fxhash::FxHashMap;

/// Union-find with path compression and union by rank.
///
/// Elements are added lazily: every element that has not been seen before forms its own
/// singleton class.
///
/// # Example
/// ```
/// use graphcheck::utils::DisjointSets;
///
/// let mut sets = DisjointSets::new();
/// assert!(sets.union(1, 2));
/// assert!(sets.union(2, 3));
/// assert!(!sets.union(1, 3)); // already joined
/// assert!(sets.same_class(3, 1));
/// assert!(!sets.same_class(1, 4));
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSets<T>
where
    T: Copy + Eq + Hash,
{
    index: FxHashMap<T, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_unions: usize,
}

impl<T> Default for DisjointSets<T>
where
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            parent: Vec::new(),
            rank: Vec::new(),
            num_unions: 0,
        }
    }
}

impl<T> DisjointSets<T>
where
    T: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structure where each of the given elements forms a singleton class
    pub fn with_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut sets = Self::new();
        for x in elements {
            sets.slot(x);
        }
        sets
    }

    fn slot(&mut self, x: T) -> usize {
        let next = self.parent.len();
        let idx = *self.index.entry(x).or_insert(next);
        if idx == next {
            self.parent.push(idx);
            self.rank.push(0);
        }
        idx
    }

    fn root(&mut self, mut idx: usize) -> usize {
        let mut root = idx;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[idx] != root {
            let next = self.parent[idx];
            self.parent[idx] = root;
            idx = next;
        }

        root
    }

    /// Merges the classes of `a` and `b`.
    /// Returns *true* if they were in different classes before.
    pub fn union(&mut self, a: T, b: T) -> bool {
        let (ia, ib) = (self.slot(a), self.slot(b));
        let (ra, rb) = (self.root(ia), self.root(ib));
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }

        self.num_unions += 1;
        true
    }

    /// Returns *true* if `a` and `b` belong to the same class
    pub fn same_class(&mut self, a: T, b: T) -> bool {
        if a == b {
            return true;
        }

        match (self.index.get(&a).copied(), self.index.get(&b).copied()) {
            (Some(ia), Some(ib)) => self.root(ia) == self.root(ib),
            _ => false,
        }
    }

    /// Number of classes among all elements seen so far
    pub fn number_of_classes(&self) -> usize {
        self.parent.len() - self.num_unions
    }
}
