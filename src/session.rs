//! Repeated recommendation queries against one sampled subgraph.

use crate::progress::{NoProgress, Progress};
use crate::sample::{sample_subgraph, SamplerConfig};
use crate::similarity::{score_with_progress, Measure, SimilarityRequest, SimilarityResult};
use crate::source::{EdgeSource, NameSource};
use crate::subgraph::{RawNodeId, Subgraph};
use crate::Result;
use std::fmt;

/// Holds a sampled [`Subgraph`] and answers queries phrased in raw ids.
#[derive(Debug, Clone)]
pub struct RecommendationSession {
    subgraph: Subgraph,
}

/// One ranked entry, resolved back to the dataset's ids and names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub index: usize,
    pub raw_id: RawNodeId,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendations {
    pub jaccard: Vec<Recommendation>,
    pub simpson: Vec<Recommendation>,
}

impl Recommendations {
    pub fn ranking(&self, measure: Measure) -> &[Recommendation] {
        match measure {
            Measure::Jaccard => &self.jaccard,
            Measure::Simpson => &self.simpson,
        }
    }
}

impl fmt::Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for measure in Measure::ALL {
            for rec in self.ranking(measure) {
                writeln!(
                    f,
                    "{} has mean {} {} relative to the given articles.",
                    rec.name,
                    measure.label(),
                    rec.score
                )?;
            }
        }
        Ok(())
    }
}

impl RecommendationSession {
    pub fn new(subgraph: Subgraph) -> Self {
        Self { subgraph }
    }

    /// Sample a subgraph and open a session on it.
    pub fn sample<E, N>(edges: &E, names: &N, config: &SamplerConfig) -> Result<Self>
    where
        E: EdgeSource + ?Sized,
        N: NameSource + ?Sized,
    {
        Ok(Self::new(sample_subgraph(edges, names, config)?))
    }

    pub fn subgraph(&self) -> &Subgraph {
        &self.subgraph
    }

    /// Translate raw seed ids into a [`SimilarityRequest`].
    ///
    /// Fails with [`crate::Error::Lookup`] on the first raw id that was not sampled.
    pub fn request(
        &self,
        raw_seeds: &[RawNodeId],
        weights: Option<Vec<f64>>,
        k: usize,
    ) -> Result<SimilarityRequest> {
        let seeds = raw_seeds
            .iter()
            .map(|&raw| self.subgraph.local_index(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(SimilarityRequest { seeds, weights, k })
    }

    pub fn recommend(
        &self,
        raw_seeds: &[RawNodeId],
        weights: Option<Vec<f64>>,
        k: usize,
    ) -> Result<Recommendations> {
        self.recommend_with_progress(raw_seeds, weights, k, &mut NoProgress)
    }

    pub fn recommend_with_progress(
        &self,
        raw_seeds: &[RawNodeId],
        weights: Option<Vec<f64>>,
        k: usize,
        progress: &mut dyn Progress,
    ) -> Result<Recommendations> {
        let request = self.request(raw_seeds, weights, k)?;
        let result = score_with_progress(&self.subgraph, &request, progress)?;
        Ok(self.resolve(&result))
    }

    /// Attach raw ids and names to a result computed on this session's subgraph.
    pub fn resolve(&self, result: &SimilarityResult) -> Recommendations {
        let lift = |ranking: &[(usize, f64)]| -> Vec<Recommendation> {
            ranking
                .iter()
                .filter_map(|&(index, score)| {
                    Some(Recommendation {
                        index,
                        raw_id: self.subgraph.raw_id(index)?,
                        name: self.subgraph.name(index)?.to_string(),
                        score,
                    })
                })
                .collect()
        };
        Recommendations { jaccard: lift(&result.jaccard), simpson: lift(&result.simpson) }
    }
}
