//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest-scoring indices, skipping those in `exclude`.
///
/// Zero scores are eligible, so the result has `min(k, eligible)` entries. Non-finite scores
/// are never selected. Output is sorted by descending score; equal scores are ordered by
/// ascending index, and the same rule decides which index survives at the cut.
pub fn top_k_excluding(scores: &[f64], k: usize, exclude: &[usize]) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    let mut excluded = exclude.to_vec();
    excluded.sort_unstable();

    // Min-heap on (score, Reverse(index)): the root is the weakest kept entry.
    let mut heap: BinaryHeap<Reverse<(NotNan<f64>, Reverse<usize>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || excluded.binary_search(&i).is_ok() {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        let key = (s, Reverse(i));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(&Reverse(weakest)) = heap.peek() {
            if key > weakest {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }

    let mut ranked: Vec<(NotNan<f64>, Reverse<usize>)> =
        heap.into_iter().map(|Reverse(key)| key).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked.into_iter().map(|(s, Reverse(i))| (i, s.into_inner())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_break_by_ascending_index() {
        let scores = [0.5, 0.5, 0.9, 0.5];
        assert_eq!(top_k_excluding(&scores, 3, &[]), vec![(2, 0.9), (0, 0.5), (1, 0.5)]);
    }

    #[test]
    fn excluded_and_non_finite_are_skipped() {
        let scores = [3.0, f64::NAN, 2.0, f64::INFINITY, 0.0];
        let got = top_k_excluding(&scores, 10, &[0]);
        assert_eq!(got, vec![(2, 2.0), (4, 0.0)]);
    }

    #[test]
    fn zero_scores_fill_the_tail() {
        let scores = [0.0, 0.0, 0.1, 0.0];
        assert_eq!(top_k_excluding(&scores, 2, &[]), vec![(2, 0.1), (0, 0.0)]);
        assert!(top_k_excluding(&scores, 0, &[]).is_empty());
    }
}
