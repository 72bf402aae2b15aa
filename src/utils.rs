//! Utility functions shared by the learning rules

use rand::{Rng, distr::StandardUniform, prelude::IndexedRandom};

/// Collect every item whose score equals the maximum score.
///
/// Items keep their input order. Scores are compared exactly, so only true
/// ties survive.
///
/// # Examples
///
/// ```
/// use repeated_games::utils::argmax_all;
///
/// let best = argmax_all(vec![("a", 1.0), ("b", 3.0), ("c", 3.0)]);
/// assert_eq!(best, vec!["b", "c"]);
/// ```
pub fn argmax_all<T, I>(scored: I) -> Vec<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let scored: Vec<(T, f64)> = scored.into_iter().collect();
    let max = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);
    scored
        .into_iter()
        .filter(|(_, score)| *score == max)
        .map(|(item, _)| item)
        .collect()
}

/// Pick uniformly at random among the maximizers of `scored`.
///
/// Returns `None` only when `scored` is empty.
pub fn choose_best<R, T, I>(rng: &mut R, scored: I) -> Option<T>
where
    R: Rng + ?Sized,
    T: Clone,
    I: IntoIterator<Item = (T, f64)>,
{
    argmax_all(scored).choose(rng).cloned()
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// # Returns
///
/// - `Some(Vec<f64>)` containing normalized probabilities if total weight is positive
/// - `None` if total weight is zero, negative or not finite
///
/// # Examples
///
/// ```
/// use repeated_games::utils::normalize_weights;
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
///
/// assert_eq!(normalize_weights(vec![0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();
    if weights.is_empty() || !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&w| w / sum).collect())
}

/// Performs weighted random sampling from a collection of items.
///
/// - If all weights are zero or negative, falls back to uniform random selection
/// - The last item is returned if the threshold never crosses zero (rounding)
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use repeated_games::utils::weighted_sample;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let items = vec![("a", 1.0), ("b", 2.0), ("c", 1.0)];
/// let sampled = weighted_sample(&mut rng, &items);
/// assert!(sampled.is_some());
/// ```
pub fn weighted_sample<R, T, W>(rng: &mut R, items: &[(T, W)]) -> Option<T>
where
    R: Rng + ?Sized,
    T: Clone,
    W: Into<f64> + Copy,
{
    if items.is_empty() {
        return None;
    }

    let total: f64 = items.iter().map(|(_, w)| (*w).into()).sum();

    if total <= 0.0 {
        return items.choose(rng).map(|(item, _)| item.clone());
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;

    for (item, weight) in items {
        let w = (*weight).into();
        if threshold < w {
            return Some(item.clone());
        }
        threshold -= w;
    }

    items.last().map(|(item, _)| item.clone())
}
