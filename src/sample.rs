//! Bounded subgraph sampling around a fixed node set.
//!
//! Passes, in order:
//! 1. edge scan: collect one-hop neighbors of the fixed ids (the fixed set is expanded)
//! 2. draw `target - |fixed|` ids uniformly, with replacement, from `[0, id_space)`
//! 3. name scan: materialize candidates that have a name, assigning local indices in
//!    name-source order
//! 4. edge scan: keep edges with both endpoints materialized
//!
//! Duplicate draws (and draws that hit fixed ids) collapse in the candidate set.

use crate::progress::{NoProgress, Progress};
use crate::source::{EdgeSource, NameSource};
use crate::subgraph::{RawNodeId, Subgraph, SubgraphBuilder};
use crate::{Error, Result};
use log::{debug, info, warn};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashSet};

const PROGRESS_CHUNK: usize = 4096;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Fraction of the id space to sample, in `(0, 1]`.
    pub subgraph_fraction: f64,
    /// Size of the raw id space; draws are taken from `[0, id_space)`.
    pub id_space: u64,
    /// Raw ids that must be present, along with their one-hop neighbors.
    pub fixed: BTreeSet<RawNodeId>,
    pub undirected: bool,
    pub seed: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            subgraph_fraction: 0.05,
            id_space: 1_791_489,
            fixed: BTreeSet::new(),
            undirected: true,
            seed: 42,
        }
    }
}

impl SamplerConfig {
    /// Number of raw ids to select before the name scan: `floor(fraction * id_space)`.
    pub fn target_size(&self) -> usize {
        (self.subgraph_fraction * self.id_space as f64).floor() as usize
    }

    fn validate(&self) -> Result<usize> {
        if !(self.subgraph_fraction > 0.0 && self.subgraph_fraction <= 1.0) {
            return Err(Error::Configuration(format!(
                "subgraph fraction must be in (0, 1], got {}",
                self.subgraph_fraction
            )));
        }
        if self.id_space == 0 {
            return Err(Error::Configuration("id space is empty".to_string()));
        }
        let target = self.target_size();
        if target == 0 {
            return Err(Error::Configuration(format!(
                "target sample size is 0 (fraction {} of {} ids)",
                self.subgraph_fraction, self.id_space
            )));
        }
        if self.fixed.len() > target {
            return Err(fixed_too_large(self.fixed.len(), target));
        }
        Ok(target)
    }
}

fn fixed_too_large(fixed: usize, target: usize) -> Error {
    Error::Configuration(format!(
        "{fixed} fixed nodes (after neighbor expansion) exceed the target sample size {target}"
    ))
}

/// Sample a subgraph using a `ChaCha8Rng` seeded from `config.seed`.
pub fn sample_subgraph<E, N>(edges: &E, names: &N, config: &SamplerConfig) -> Result<Subgraph>
where
    E: EdgeSource + ?Sized,
    N: NameSource + ?Sized,
{
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    sample_subgraph_with_rng(edges, names, config, &mut rng, &mut NoProgress)
}

/// Sample a subgraph with a caller-supplied generator and progress sink.
///
/// `config.seed` is ignored here; determinism follows the state of `rng`.
pub fn sample_subgraph_with_rng<E, N, R>(
    edges: &E,
    names: &N,
    config: &SamplerConfig,
    rng: &mut R,
    progress: &mut dyn Progress,
) -> Result<Subgraph>
where
    E: EdgeSource + ?Sized,
    N: NameSource + ?Sized,
    R: Rng,
{
    let target = config.validate()?;
    info!(
        "Sampling {} of {} ids ({} fixed, undirected={})",
        target,
        config.id_space,
        config.fixed.len(),
        config.undirected
    );

    let fixed = expand_fixed(edges, &config.fixed, progress)?;
    if fixed.len() > target {
        return Err(fixed_too_large(fixed.len(), target));
    }
    debug!("Fixed set expanded from {} to {} ids", config.fixed.len(), fixed.len());

    let draws = target - fixed.len();
    let mut candidates: HashSet<RawNodeId> = fixed.iter().copied().collect();
    candidates.reserve(draws);
    for _ in 0..draws {
        candidates.insert(rng.random_range(0..config.id_space));
    }
    debug!("{} random draws collapsed to {} distinct candidates", draws, candidates.len());

    let mut builder = SubgraphBuilder::new(config.undirected);
    progress.start("article names", names.len_hint());
    let mut seen = 0usize;
    names.for_each_name(|raw, name| {
        if candidates.contains(&raw) {
            builder.add_node(raw, name);
        }
        seen += 1;
        if seen % PROGRESS_CHUNK == 0 {
            progress.advance(PROGRESS_CHUNK);
        }
    })?;
    progress.advance(seen % PROGRESS_CHUNK);
    progress.finish();

    let missing = fixed.iter().filter(|&&raw| !builder.contains(raw)).count();
    if missing > 0 {
        warn!("{} fixed ids have no name entry and were dropped from the sample", missing);
    }
    info!("Graph contains {} vertices", builder.node_count());

    progress.start("links", edges.len_hint());
    let mut seen = 0usize;
    let mut kept = 0usize;
    edges.for_each_edge(|src, dst| {
        if builder.add_edge(src, dst) {
            kept += 1;
        }
        seen += 1;
        if seen % PROGRESS_CHUNK == 0 {
            progress.advance(PROGRESS_CHUNK);
        }
    })?;
    progress.advance(seen % PROGRESS_CHUNK);
    progress.finish();

    let subgraph = builder.build();
    info!(
        "Sampled subgraph: {} nodes, {} stored edges ({} of {} source edges kept)",
        subgraph.len(),
        subgraph.adjacency().nnz(),
        kept,
        seen
    );
    Ok(subgraph)
}

/// The fixed ids plus every raw id sharing an edge with one of them.
fn expand_fixed<E>(
    edges: &E,
    fixed: &BTreeSet<RawNodeId>,
    progress: &mut dyn Progress,
) -> Result<BTreeSet<RawNodeId>>
where
    E: EdgeSource + ?Sized,
{
    let mut expanded = fixed.clone();
    if fixed.is_empty() {
        return Ok(expanded);
    }
    progress.start("constructing neighborhoods", edges.len_hint());
    let mut seen = 0usize;
    edges.for_each_edge(|src, dst| {
        if fixed.contains(&src) {
            expanded.insert(dst);
        }
        if fixed.contains(&dst) {
            expanded.insert(src);
        }
        seen += 1;
        if seen % PROGRESS_CHUNK == 0 {
            progress.advance(PROGRESS_CHUNK);
        }
    })?;
    progress.advance(seen % PROGRESS_CHUNK);
    progress.finish();
    Ok(expanded)
}
