//! Embedding similarity math.
//!
//! Everything here is pure: vectors in, scores out. Gateways produce the
//! embeddings, use cases decide what the scores mean.

use serde::Serialize;

/// Minimum pairwise similarity at or above which a section counts as
/// aligned without consulting a model.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;

/// Default number of matches returned by [`rank_most_similar`].
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Cosine similarity between two embedding vectors.
///
/// Accumulates in f64 to keep long vectors stable, returns f32 like the
/// embeddings themselves. A zero-magnitude vector on either side yields
/// exactly `0.0` rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

/// One candidate scored against a target embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatch {
    pub id: String,
    pub score: f32,
}

/// Ranks `candidates` by cosine similarity to `target`, best first.
///
/// Candidates whose dimensions do not match the target are skipped rather
/// than failing the whole ranking. At most `top_k` matches are returned
/// (default [`DEFAULT_TOP_K`]).
pub fn rank_most_similar(
    target: &[f32],
    candidates: &[(String, Vec<f32>)],
    top_k: Option<usize>,
) -> Vec<SimilarityMatch> {
    let mut matches: Vec<SimilarityMatch> = candidates
        .iter()
        .filter_map(|(id, embedding)| {
            cosine_similarity(target, embedding)
                .ok()
                .map(|score| SimilarityMatch {
                    id: id.clone(),
                    score,
                })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(top_k.unwrap_or(DEFAULT_TOP_K));
    matches
}

/// Minimum cosine similarity over all pairs of embeddings.
///
/// The minimum is the conservative choice: a section is only as aligned as
/// its most divergent pair. Returns `Ok(None)` when fewer than two
/// embeddings exist.
pub fn min_pairwise_similarity(embeddings: &[&[f32]]) -> Result<Option<f32>, SimilarityError> {
    if embeddings.len() < 2 {
        return Ok(None);
    }

    let mut min: Option<f32> = None;
    for i in 0..embeddings.len() {
        for j in (i + 1)..embeddings.len() {
            let score = cosine_similarity(embeddings[i], embeddings[j])?;
            min = Some(match min {
                Some(current) => current.min(score),
                None => score,
            });
        }
    }
    Ok(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vec![0.5, 0.25, -0.3];
        let score = cosine_similarity(&v, &v).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let score = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let score = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_scores_exactly_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[3.0, 4.0], &[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_reports_both_lengths() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        match err {
            SimilarityError::DimensionMismatch { left, right } => {
                assert_eq!(left, 2);
                assert_eq!(right, 3);
            }
        }
    }

    #[test]
    fn test_scale_invariance() {
        let a = vec![1.0, 2.0, 3.0];
        let scaled: Vec<f32> = a.iter().map(|x| x * 100.0).collect();
        let score = cosine_similarity(&a, &scaled).unwrap();
        assert!((score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rank_orders_best_first() {
        let target = vec![1.0, 0.0];
        let candidates = vec![
            ("far".to_string(), vec![0.0, 1.0]),
            ("close".to_string(), vec![0.9, 0.1]),
            ("exact".to_string(), vec![1.0, 0.0]),
        ];
        let matches = rank_most_similar(&target, &candidates, None);
        assert_eq!(matches[0].id, "exact");
        assert_eq!(matches[1].id, "close");
        assert_eq!(matches[2].id, "far");
    }

    #[test]
    fn test_rank_respects_top_k() {
        let target = vec![1.0, 0.0];
        let candidates: Vec<(String, Vec<f32>)> = (0..7)
            .map(|i| (format!("c{i}"), vec![1.0, i as f32 * 0.1]))
            .collect();
        assert_eq!(rank_most_similar(&target, &candidates, Some(2)).len(), 2);
        assert_eq!(rank_most_similar(&target, &candidates, None).len(), 5);
    }

    #[test]
    fn test_rank_skips_mismatched_dimensions() {
        let target = vec![1.0, 0.0];
        let candidates = vec![
            ("good".to_string(), vec![1.0, 0.0]),
            ("bad".to_string(), vec![1.0, 0.0, 0.0]),
        ];
        let matches = rank_most_similar(&target, &candidates, None);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "good");
    }

    #[test]
    fn test_min_pairwise_takes_the_worst_pair() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.1];
        let c = vec![0.0, 1.0];
        let min = min_pairwise_similarity(&[&a, &b, &c]).unwrap().unwrap();
        let worst = cosine_similarity(&a, &c).unwrap();
        assert!((min - worst).abs() < 1e-6);
    }

    #[test]
    fn test_min_pairwise_needs_two() {
        assert_eq!(min_pairwise_similarity(&[]).unwrap(), None);
        let only = vec![1.0, 2.0];
        assert_eq!(min_pairwise_similarity(&[&only]).unwrap(), None);
    }
}
