//! Neighbor sets as sorted index lists.

use crate::graph::Graph;

/// A node's neighbor set: strictly ascending local indices, never containing the node itself.
///
/// This is the sparse indicator vector of the neighborhood; its length is the degree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighborhood {
    indices: Vec<usize>,
}

impl Neighborhood {
    /// Extract and normalize the neighborhood of `node`.
    pub fn of<G: Graph + ?Sized>(graph: &G, node: usize) -> Self {
        let mut indices = Vec::new();
        load(graph, node, &mut indices);
        Self { indices }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn degree(&self) -> usize {
        self.indices.len()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.indices.binary_search(&node).is_ok()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Neighborhood of `node` as an ascending index list.
pub fn neighbors<G: Graph + ?Sized>(graph: &G, node: usize) -> Vec<usize> {
    Neighborhood::of(graph, node).into_vec()
}

/// Fill `buf` with the normalized neighborhood of `node`, reusing its allocation.
pub(crate) fn load<G: Graph + ?Sized>(graph: &G, node: usize, buf: &mut Vec<usize>) {
    graph.neighbors_into(node, buf);
    if !buf.windows(2).all(|w| w[0] < w[1]) {
        buf.sort_unstable();
        buf.dedup();
    }
    if let Ok(pos) = buf.binary_search(&node) {
        buf.remove(pos);
    }
}

/// Size of the intersection of two ascending index lists.
///
/// Linear merge: `O(|a| + |b|)`.
pub fn intersection_size(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut count) = (0usize, 0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}
