//! Sparse binary adjacency, stored once per edge.
//!
//! Undirected graphs keep only the upper triangle: an edge between `a` and `b` is the single
//! entry `(min(a, b), max(a, b))`. Directed graphs keep arcs as given.
//!
//! Entries are held twice, as compressed rows and compressed columns, so the full
//! neighborhood of a node is two contiguous slices:
//! - column `i`, rows `< i` (edges where `i` is the larger endpoint)
//! - row `i`, columns `> i` (edges where `i` is the smaller endpoint)
//!
//! Extraction cost is proportional to the entries touched, never `O(n)`.

use sprs::{CsMat, TriMat};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseAdjacency {
    undirected: bool,
    /// Row-compressed view: row `i` lists columns.
    csr: CsMat<u8>,
    /// Column-compressed view of the same entries: column `i` lists rows.
    csc: CsMat<u8>,
}

impl SparseAdjacency {
    /// Build an `n x n` relation from `(row, col)` entries.
    ///
    /// In undirected mode each entry is folded into the upper triangle first. Duplicate
    /// entries collapse. Entries with an endpoint `>= n` are ignored.
    pub fn from_entries(n: usize, undirected: bool, mut entries: Vec<(usize, usize)>) -> Self {
        entries.retain(|&(r, c)| r < n && c < n);
        if undirected {
            for e in entries.iter_mut() {
                if e.0 > e.1 {
                    *e = (e.1, e.0);
                }
            }
        }
        // TriMat sums duplicate triplets; dedup first so every stored value is 1
        entries.sort_unstable();
        entries.dedup();

        let mut triplets: TriMat<u8> = TriMat::with_capacity((n, n), entries.len());
        for &(r, c) in &entries {
            triplets.add_triplet(r, c, 1);
        }
        Self { undirected, csr: triplets.to_csr(), csc: triplets.to_csc() }
    }

    /// Dimension of the (square) relation.
    pub fn dim(&self) -> usize {
        self.csr.rows()
    }

    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    /// Number of stored entries (each undirected edge counts once).
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Stored entry lookup. In undirected mode `(a, b)` and `(b, a)` are the same edge.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        let (r, c) = if self.undirected && a > b { (b, a) } else { (a, b) };
        r < self.dim() && c < self.dim() && self.csr.get(r, c).is_some()
    }

    /// All stored entries in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.csr.iter().map(|(_, (r, c))| (r, c))
    }

    /// True when no entry lies below the diagonal.
    pub fn is_upper_triangular(&self) -> bool {
        self.entries().all(|(r, c)| r <= c)
    }

    /// Write the ascending neighbor list of `node` into `out`.
    ///
    /// Undirected: the symmetric neighborhood rebuilt from the upper triangle.
    /// Directed: the out-links of `node`. A self-loop is never reported.
    pub fn neighbors_into(&self, node: usize, out: &mut Vec<usize>) {
        out.clear();
        if self.undirected {
            if let Some(col) = self.csc.outer_view(node) {
                out.extend(col.indices().iter().copied().filter(|&r| r < node));
            }
            if let Some(row) = self.csr.outer_view(node) {
                out.extend(row.indices().iter().copied().filter(|&c| c > node));
            }
        } else if let Some(row) = self.csr.outer_view(node) {
            out.extend(row.indices().iter().copied().filter(|&c| c != node));
        }
    }

    /// Neighbor count of `node`, without materializing the list.
    pub fn degree(&self, node: usize) -> usize {
        let stored = |m: &CsMat<u8>| m.outer_view(node).map_or(0, |v| v.nnz());
        let self_loop = usize::from(self.csr.get(node, node).is_some());
        if self.undirected {
            stored(&self.csc) + stored(&self.csr) - 2 * self_loop
        } else {
            stored(&self.csr) - self_loop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nbrs(adj: &SparseAdjacency, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        adj.neighbors_into(node, &mut out);
        out
    }

    #[test]
    fn undirected_entries_fold_into_upper_triangle() {
        // 2 -> 0 and 0 -> 2 are the same undirected edge
        let adj = SparseAdjacency::from_entries(3, true, vec![(2, 0), (0, 2), (1, 2)]);
        assert_eq!(adj.nnz(), 2);
        assert!(adj.is_upper_triangular());
        assert_eq!(adj.entries().collect::<Vec<_>>(), vec![(0, 2), (1, 2)]);
        assert!(adj.contains(2, 0));
        assert!(adj.contains(0, 2));
        assert!(!adj.contains(0, 1));
    }

    #[test]
    fn neighbors_combine_column_and_row() {
        // 0--1, 0--2, 1--2, 2--3
        let adj = SparseAdjacency::from_entries(4, true, vec![(0, 1), (0, 2), (1, 2), (2, 3)]);
        assert_eq!(nbrs(&adj, 0), vec![1, 2]);
        assert_eq!(nbrs(&adj, 1), vec![0, 2]);
        assert_eq!(nbrs(&adj, 2), vec![0, 1, 3]);
        assert_eq!(nbrs(&adj, 3), vec![2]);
        for i in 0..4 {
            assert_eq!(adj.degree(i), nbrs(&adj, i).len());
        }
    }

    #[test]
    fn self_loop_is_stored_but_not_a_neighbor() {
        let adj = SparseAdjacency::from_entries(2, true, vec![(1, 1), (0, 1)]);
        assert_eq!(adj.nnz(), 2);
        assert_eq!(nbrs(&adj, 1), vec![0]);
        assert_eq!(adj.degree(1), 1);
    }

    #[test]
    fn directed_mode_keeps_arcs_and_reports_out_links() {
        let adj = SparseAdjacency::from_entries(3, false, vec![(2, 0), (0, 1), (2, 2)]);
        assert!(!adj.is_upper_triangular());
        assert_eq!(nbrs(&adj, 2), vec![0]);
        assert_eq!(nbrs(&adj, 0), vec![1]);
        assert!(nbrs(&adj, 1).is_empty());
        assert!(adj.contains(2, 0));
        assert!(!adj.contains(0, 2));
    }

    #[test]
    fn out_of_range_entries_are_ignored() {
        let adj = SparseAdjacency::from_entries(2, true, vec![(0, 5), (0, 1)]);
        assert_eq!(adj.nnz(), 1);
        assert_eq!(adj.dim(), 2);
    }

    #[test]
    fn row_and_column_views_hold_the_same_entries() {
        let adj = SparseAdjacency::from_entries(5, true, vec![(3, 1), (0, 4), (1, 4), (2, 2), (4, 0)]);
        assert_eq!(adj.csr.rows(), 5);
        assert_eq!(adj.csc.cols(), 5);
        let mut from_cols: Vec<(usize, usize)> = adj.csc.iter().map(|(_, (r, c))| (r, c)).collect();
        from_cols.sort_unstable();
        assert_eq!(adj.entries().collect::<Vec<_>>(), from_cols);
        assert_eq!(from_cols, vec![(0, 4), (1, 3), (1, 4), (2, 2)]);
        assert!(adj.csr.iter().all(|(&v, _)| v == 1));
        // column 4 carries rows 0 and 1; row 1 carries columns 3 and 4
        assert_eq!(adj.csc.outer_view(4).map(|v| v.indices().to_vec()), Some(vec![0, 1]));
        assert_eq!(adj.csr.outer_view(1).map(|v| v.indices().to_vec()), Some(vec![3, 4]));
        assert_eq!(nbrs(&adj, 4), vec![0, 1]);
        assert_eq!(nbrs(&adj, 2), Vec::<usize>::new());
        assert_eq!(adj.degree(2), 0);
    }
}
