//! Neighborhood set-similarity scoring against a seed set.
//!
//! For each non-seed candidate `i` and each seed `j`, with `N(.)` the neighbor set:
//! - Jaccard: \(|N(i) \cap N(j)| / |N(i) \cup N(j)|\)
//! - overlap (Simpson): \(|N(i) \cap N(j)| / \min(|N(i)|, |N(j)|)\)
//!
//! Both are `0` when the intersection is empty. Per-seed scores are then pruned (a candidate
//! matched by exactly one seed of a multi-seed set scores `0`) and averaged with the seed
//! weights. Seed neighborhoods are extracted once per request; candidate neighborhoods go
//! through a single reused buffer.

use crate::graph::Graph;
use crate::neighborhood::{self, intersection_size, Neighborhood};
use crate::progress::{NoProgress, Progress};
use crate::topk::top_k_excluding;
use crate::{Error, Result};
use log::{debug, info};

const PROGRESS_CHUNK: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Measure {
    Jaccard,
    /// Overlap coefficient.
    Simpson,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Jaccard, Measure::Simpson];

    pub fn similarity(self, intersection: usize, deg_a: usize, deg_b: usize) -> f64 {
        match self {
            Measure::Jaccard => jaccard(intersection, deg_a, deg_b),
            Measure::Simpson => overlap(intersection, deg_a, deg_b),
        }
    }

    /// Human-readable name, as used when rendering recommendations.
    pub fn label(self) -> &'static str {
        match self {
            Measure::Jaccard => "Jaccard similarity",
            Measure::Simpson => "overlap coefficient",
        }
    }
}

/// Jaccard index from an intersection size and the two set sizes.
pub fn jaccard(intersection: usize, deg_a: usize, deg_b: usize) -> f64 {
    let union = (deg_a + deg_b).saturating_sub(intersection);
    if intersection == 0 || union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Overlap (Simpson) coefficient from an intersection size and the two set sizes.
pub fn overlap(intersection: usize, deg_a: usize, deg_b: usize) -> f64 {
    let smaller = deg_a.min(deg_b);
    if intersection == 0 || smaller == 0 {
        return 0.0;
    }
    intersection as f64 / smaller as f64
}

/// One scoring query: seed local indices, optional per-seed weights, and `k`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityRequest {
    pub seeds: Vec<usize>,
    /// One weight per seed; `None` weighs seeds uniformly.
    pub weights: Option<Vec<f64>>,
    pub k: usize,
}

impl SimilarityRequest {
    pub fn new(seeds: Vec<usize>, k: usize) -> Self {
        Self { seeds, weights: None, k }
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Checks everything except `k`.
    fn validate_seeds(&self, n: usize) -> Result<()> {
        if self.seeds.is_empty() {
            return Err(Error::Request("seed set is empty".to_string()));
        }
        let mut sorted = self.seeds.clone();
        sorted.sort_unstable();
        if let Some(&bad) = sorted.iter().find(|&&s| s >= n) {
            return Err(Error::Request(format!("seed {bad} is out of range for {n} nodes")));
        }
        if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::Request(format!("seed {} appears more than once", w[0])));
        }
        if let Some(weights) = &self.weights {
            if weights.len() != self.seeds.len() {
                return Err(Error::Request(format!(
                    "{} weights given for {} seeds",
                    weights.len(),
                    self.seeds.len()
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(Error::Request("weights must be finite and non-negative".to_string()));
            }
            if weights.iter().all(|&w| w == 0.0) {
                return Err(Error::Request("weights sum to zero".to_string()));
            }
        }
        Ok(())
    }

    fn validate(&self, n: usize) -> Result<()> {
        self.validate_seeds(n)?;
        let candidates = n - self.seeds.len();
        if self.k == 0 {
            return Err(Error::Request("k must be at least 1".to_string()));
        }
        if self.k > candidates {
            return Err(Error::Request(format!(
                "k = {} exceeds the {} non-seed candidates",
                self.k, candidates
            )));
        }
        Ok(())
    }

    /// Weights rescaled so the largest is `1.0`; the sum stays finite for any finite input.
    fn weight_vector(&self) -> Vec<f64> {
        match &self.weights {
            Some(w) => {
                let max = w.iter().copied().fold(0.0f64, f64::max);
                w.iter().map(|&x| x / max).collect()
            }
            None => vec![1.0; self.seeds.len()],
        }
    }
}

/// Aggregated (pruned, weighted-mean) score of every node, seeds included at `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanScores {
    pub jaccard: Vec<f64>,
    pub simpson: Vec<f64>,
}

impl MeanScores {
    pub fn get(&self, measure: Measure) -> &[f64] {
        match measure {
            Measure::Jaccard => &self.jaccard,
            Measure::Simpson => &self.simpson,
        }
    }
}

/// Top-k rankings, one per measure: `(local index, score)`, descending, ties by ascending index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityResult {
    pub jaccard: Vec<(usize, f64)>,
    pub simpson: Vec<(usize, f64)>,
}

impl SimilarityResult {
    pub fn ranking(&self, measure: Measure) -> &[(usize, f64)] {
        match measure {
            Measure::Jaccard => &self.jaccard,
            Measure::Simpson => &self.simpson,
        }
    }
}

pub fn score<G: Graph + ?Sized>(graph: &G, request: &SimilarityRequest) -> Result<SimilarityResult> {
    score_with_progress(graph, request, &mut NoProgress)
}

/// Score every candidate and return the top `request.k` per measure.
///
/// The request is validated before any per-node work.
pub fn score_with_progress<G: Graph + ?Sized>(
    graph: &G,
    request: &SimilarityRequest,
    progress: &mut dyn Progress,
) -> Result<SimilarityResult> {
    request.validate(graph.node_count())?;
    let means = mean_scores_unchecked(graph, request, progress);
    let result = SimilarityResult {
        jaccard: top_k_excluding(&means.jaccard, request.k, &request.seeds),
        simpson: top_k_excluding(&means.simpson, request.k, &request.seeds),
    };
    debug!(
        "Top-{}: best jaccard {:?}, best simpson {:?}",
        request.k,
        result.jaccard.first(),
        result.simpson.first()
    );
    Ok(result)
}

/// Aggregated scores for every node, without top-k selection. `request.k` is not checked.
pub fn mean_scores<G: Graph + ?Sized>(
    graph: &G,
    request: &SimilarityRequest,
    progress: &mut dyn Progress,
) -> Result<MeanScores> {
    request.validate_seeds(graph.node_count())?;
    Ok(mean_scores_unchecked(graph, request, progress))
}

fn mean_scores_unchecked<G: Graph + ?Sized>(
    graph: &G,
    request: &SimilarityRequest,
    progress: &mut dyn Progress,
) -> MeanScores {
    let n = graph.node_count();
    let seeds = &request.seeds;
    let weights = request.weight_vector();
    let total_weight: f64 = weights.iter().sum();
    let prune = seeds.len() >= 2;

    let seed_nbrs: Vec<Neighborhood> = seeds.iter().map(|&s| Neighborhood::of(graph, s)).collect();
    let mut sorted_seeds = seeds.clone();
    sorted_seeds.sort_unstable();
    info!("Scoring {} candidates against {} seeds", n - seeds.len(), seeds.len());

    let mut means = MeanScores { jaccard: vec![0.0; n], simpson: vec![0.0; n] };
    let mut buf: Vec<usize> = Vec::new();
    let mut per_seed_jaccard = vec![0.0f64; seeds.len()];
    let mut per_seed_simpson = vec![0.0f64; seeds.len()];

    progress.start("computing node similarities", Some(n));
    for i in 0..n {
        if (i + 1) % PROGRESS_CHUNK == 0 {
            progress.advance(PROGRESS_CHUNK);
        }
        if sorted_seeds.binary_search(&i).is_ok() {
            continue;
        }
        neighborhood::load(graph, i, &mut buf);
        let deg_i = buf.len();
        for (j, seed) in seed_nbrs.iter().enumerate() {
            let common = intersection_size(&buf, seed.as_slice());
            per_seed_jaccard[j] = jaccard(common, deg_i, seed.degree());
            per_seed_simpson[j] = overlap(common, deg_i, seed.degree());
        }
        means.jaccard[i] = pruned_mean(&per_seed_jaccard, &weights, total_weight, prune);
        means.simpson[i] = pruned_mean(&per_seed_simpson, &weights, total_weight, prune);
    }
    progress.advance(n % PROGRESS_CHUNK);
    progress.finish();
    means
}

/// Weighted mean of one candidate's per-seed scores, or `0` when pruning applies and exactly
/// one seed scored nonzero.
fn pruned_mean(scores: &[f64], weights: &[f64], total_weight: f64, prune: bool) -> f64 {
    if prune && scores.iter().filter(|&&s| s != 0.0).count() == 1 {
        return 0.0;
    }
    scores.iter().zip(weights).map(|(s, w)| s * w).sum::<f64>() / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subgraph::SubgraphBuilder;

    fn diamond_tail() -> crate::Subgraph {
        // 0--1, 0--2, 1--2, 2--3
        let mut b = SubgraphBuilder::new(true);
        for i in 0..4 {
            b.add_node(i, &format!("n{i}"));
        }
        for (s, d) in [(0, 1), (0, 2), (1, 2), (2, 3)] {
            b.add_edge(s, d);
        }
        b.build()
    }

    #[test]
    fn measures_on_small_sets() {
        assert_eq!(jaccard(1, 2, 2), 1.0 / 3.0);
        assert_eq!(overlap(1, 2, 2), 0.5);
        assert_eq!(jaccard(0, 5, 5), 0.0);
        assert_eq!(overlap(3, 0, 3), 0.0);
        assert_eq!(Measure::Simpson.similarity(2, 2, 4), 1.0);
    }

    #[test]
    fn single_seed_scores_are_not_pruned() {
        let g = diamond_tail();
        // N(0)={1,2}; N(1)={0,2}, N(2)={0,1,3}, N(3)={2}
        let res = score(&g, &SimilarityRequest::new(vec![0], 3)).unwrap();
        assert_eq!(res.jaccard, vec![(3, 0.5), (1, 1.0 / 3.0), (2, 0.25)]);
        assert_eq!(res.simpson, vec![(3, 1.0), (1, 0.5), (2, 0.5)]);
    }

    #[test]
    fn request_errors_are_reported() {
        let g = diamond_tail();
        let cases = [
            SimilarityRequest::new(vec![], 1),
            SimilarityRequest::new(vec![0, 0], 1),
            SimilarityRequest::new(vec![7], 1),
            SimilarityRequest::new(vec![0], 0),
            SimilarityRequest::new(vec![0], 4),
            SimilarityRequest::new(vec![0, 1], 1).with_weights(vec![1.0]),
            SimilarityRequest::new(vec![0, 1], 1).with_weights(vec![0.0, 0.0]),
            SimilarityRequest::new(vec![0, 1], 1).with_weights(vec![1.0, f64::NAN]),
            SimilarityRequest::new(vec![0, 1], 1).with_weights(vec![-1.0, 2.0]),
        ];
        for req in cases {
            assert!(matches!(score(&g, &req), Err(Error::Request(_))), "{req:?}");
        }
        // k equal to the candidate count is fine
        assert_eq!(score(&g, &SimilarityRequest::new(vec![0], 3)).unwrap().jaccard.len(), 3);
    }

    #[test]
    fn weights_shift_the_mean() {
        let g = diamond_tail();
        // seeds 0 and 3: N(0)={1,2}, N(3)={2}
        // candidate 1, N(1)={0,2}: jaccard 1/3 against seed 0, 1/2 against seed 3
        // candidate 2, N(2)={0,1,3}: overlaps seed 0 only, so it is pruned
        let uniform =
            mean_scores(&g, &SimilarityRequest::new(vec![0, 3], 1), &mut NoProgress).unwrap();
        let weighted = mean_scores(
            &g,
            &SimilarityRequest::new(vec![0, 3], 1).with_weights(vec![3.0, 1.0]),
            &mut NoProgress,
        )
        .unwrap();
        assert!((uniform.jaccard[1] - 5.0 / 12.0).abs() < 1e-12);
        assert!((weighted.jaccard[1] - 0.375).abs() < 1e-12);
        assert_eq!(uniform.jaccard[2], 0.0);
        assert_eq!(uniform.simpson[2], 0.0);
        assert_eq!(uniform.get(Measure::Jaccard)[0], 0.0);
        assert_eq!(uniform.get(Measure::Simpson)[3], 0.0);
    }

    #[test]
    fn huge_equal_weights_match_uniform() {
        let g = diamond_tail();
        let uniform =
            mean_scores(&g, &SimilarityRequest::new(vec![0, 3], 1), &mut NoProgress).unwrap();
        let huge = mean_scores(
            &g,
            &SimilarityRequest::new(vec![0, 3], 1).with_weights(vec![1e308, 1e308]),
            &mut NoProgress,
        )
        .unwrap();
        assert_eq!(uniform, huge);
    }

    #[test]
    fn huge_weights_keep_k_entries() {
        // 0--2, 1--2, 3--2: candidate 3 matches both seeds perfectly
        let mut b = SubgraphBuilder::new(true);
        for i in 0..4 {
            b.add_node(i, &format!("n{i}"));
        }
        for (s, d) in [(0, 2), (1, 2), (3, 2)] {
            b.add_edge(s, d);
        }
        let g = b.build();
        let req = SimilarityRequest::new(vec![0, 1], 2).with_weights(vec![1e308, 1e308]);
        let res = score(&g, &req).unwrap();
        assert_eq!(res.simpson, vec![(3, 1.0), (2, 0.0)]);
        assert_eq!(res.jaccard, vec![(3, 1.0), (2, 0.0)]);
    }
}
