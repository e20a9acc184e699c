//! The sampled subgraph: dense local indices, names, and sparse adjacency.

use crate::adjacency::SparseAdjacency;
use crate::graph::Graph;
use crate::{Error, Result};
use std::collections::HashMap;

/// Identifier in the full, unsampled dataset.
pub type RawNodeId = u64;

/// An immutable sampled graph.
///
/// Invariants:
/// - `id_map` is injective and its image is exactly `0..n`
/// - `names[i]` and `raw_ids[i]` exist for every local index `i`
/// - `adjacency.dim() == n`
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subgraph {
    id_map: HashMap<RawNodeId, usize>,
    raw_ids: Vec<RawNodeId>,
    names: Vec<String>,
    adjacency: SparseAdjacency,
}

impl Subgraph {
    pub fn len(&self) -> usize {
        self.raw_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_ids.is_empty()
    }

    pub fn adjacency(&self) -> &SparseAdjacency {
        &self.adjacency
    }

    /// Local index of a raw id, if it was sampled.
    pub fn index_of(&self, raw: RawNodeId) -> Option<usize> {
        self.id_map.get(&raw).copied()
    }

    /// Like [`Subgraph::index_of`], failing with [`Error::Lookup`].
    pub fn local_index(&self, raw: RawNodeId) -> Result<usize> {
        self.index_of(raw).ok_or(Error::Lookup(raw))
    }

    pub fn raw_id(&self, index: usize) -> Option<RawNodeId> {
        self.raw_ids.get(index).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains_raw(&self, raw: RawNodeId) -> bool {
        self.id_map.contains_key(&raw)
    }

    /// `(raw id, local index)` pairs, in local index order.
    pub fn id_map(&self) -> impl Iterator<Item = (RawNodeId, usize)> + '_ {
        self.raw_ids.iter().enumerate().map(|(i, &raw)| (raw, i))
    }
}

impl Graph for Subgraph {
    fn node_count(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.adjacency.neighbors_into(node, &mut out);
        out
    }

    fn neighbors_into(&self, node: usize, out: &mut Vec<usize>) {
        self.adjacency.neighbors_into(node, out);
    }

    fn out_degree(&self, node: usize) -> usize {
        self.adjacency.degree(node)
    }
}

/// Incremental construction of a [`Subgraph`].
///
/// Nodes are assigned local indices in insertion order; edges are accepted only between
/// nodes already added.
#[derive(Debug, Default)]
pub struct SubgraphBuilder {
    id_map: HashMap<RawNodeId, usize>,
    raw_ids: Vec<RawNodeId>,
    names: Vec<String>,
    entries: Vec<(usize, usize)>,
    undirected: bool,
}

impl SubgraphBuilder {
    pub fn new(undirected: bool) -> Self {
        Self { undirected, ..Self::default() }
    }

    /// Add a node, returning its local index.
    ///
    /// The name is trimmed. A raw id that was already added keeps its first index and name.
    pub fn add_node(&mut self, raw: RawNodeId, name: &str) -> usize {
        if let Some(&idx) = self.id_map.get(&raw) {
            return idx;
        }
        let idx = self.raw_ids.len();
        self.id_map.insert(raw, idx);
        self.raw_ids.push(raw);
        self.names.push(name.trim().to_string());
        idx
    }

    pub fn contains(&self, raw: RawNodeId) -> bool {
        self.id_map.contains_key(&raw)
    }

    pub fn node_count(&self) -> usize {
        self.raw_ids.len()
    }

    /// Record an edge between two raw ids. Returns `false` (and records nothing) unless
    /// both endpoints were added.
    pub fn add_edge(&mut self, src: RawNodeId, dst: RawNodeId) -> bool {
        match (self.id_map.get(&src), self.id_map.get(&dst)) {
            (Some(&a), Some(&b)) => {
                self.entries.push((a, b));
                true
            }
            _ => false,
        }
    }

    pub fn build(self) -> Subgraph {
        let n = self.raw_ids.len();
        let adjacency = SparseAdjacency::from_entries(n, self.undirected, self.entries);
        Subgraph { id_map: self.id_map, raw_ids: self.raw_ids, names: self.names, adjacency }
    }
}
