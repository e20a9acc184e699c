//! `linksim`: bounded subgraph sampling + neighborhood set-similarity recommendations.
//!
//! A large link graph (pages and hyperlinks) is sampled down to a bounded subgraph that is
//! guaranteed to contain a caller-chosen set of fixed nodes and their one-hop neighbors. Against
//! that subgraph, a seed set is scored: every other node is ranked by how much its neighborhood
//! overlaps the seeds' neighborhoods, under the Jaccard index and the overlap (Simpson)
//! coefficient.
//!
//! Public invariants (must not drift):
//! - **Node order**: local indices are dense \(0..n-1\), assigned in name-source order.
//! - **Storage**: undirected adjacency is stored upper-triangular only; neighbor sets are
//!   reconstructed, never materialized densely.
//! - **Determinism**: sampling is deterministic given the config seed (or caller RNG); scoring
//!   is deterministic given identical inputs.
//! - **Ties**: ranked output breaks score ties by ascending local index.
//!
//! Swappable (allowed to change without breaking the contract):
//! - internal sparse layout (so long as extraction stays proportional to touched entries)
//! - progress reporting granularity

pub mod adjacency;
pub mod graph;
pub mod neighborhood;
pub mod progress;
pub mod sample;
pub mod session;
pub mod similarity;
pub mod source;
pub mod subgraph;
pub mod topk;

pub use adjacency::SparseAdjacency;
pub use graph::Graph;
pub use neighborhood::{intersection_size, neighbors, Neighborhood};
pub use progress::{LogProgress, NoProgress, Progress};
pub use sample::{sample_subgraph, sample_subgraph_with_rng, SamplerConfig};
pub use session::{Recommendation, Recommendations, RecommendationSession};
pub use similarity::{
    jaccard, mean_scores, overlap, score, score_with_progress, Measure, MeanScores,
    SimilarityRequest, SimilarityResult,
};
pub use source::{EdgeListFile, EdgeSource, NameListFile, NameSource};
pub use subgraph::{RawNodeId, Subgraph, SubgraphBuilder};
pub use topk::top_k_excluding;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sampler configuration cannot be satisfied.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// A raw id that is not part of the sampled subgraph.
    #[error("raw id {0} is not in the sampled subgraph")]
    Lookup(RawNodeId),
    /// A similarity request that cannot be scored (seeds, weights or `k`).
    #[error("invalid request: {0}")]
    Request(String),
    /// Reading an edge or name source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A malformed line in an edge or name file (1-based line number).
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
