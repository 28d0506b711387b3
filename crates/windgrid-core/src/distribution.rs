//! Finite, normalized discrete probability distributions.
//!
//! A [`ProbabilityDistribution`] is built once from non-negative weights
//! and afterwards only sampled. Outcomes are kept in insertion order, so
//! a fixed generator seed always maps to the same outcome sequence
//! regardless of how the outcome type hashes.

use crate::error::DistributionError;
use indexmap::IndexMap;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use std::hash::Hash;

/// A normalized distribution over a finite set of outcomes.
///
/// Invariants, established at construction:
/// - every stored probability is strictly positive and finite
/// - probabilities sum to 1.0 (within floating tolerance)
/// - outcomes are unique; duplicate weights are merged additively
///
/// Outcomes whose weight is exactly zero are not stored, so
/// [`support`](Self::support) lists only outcomes that can be drawn.
#[derive(Clone, Debug)]
pub struct ProbabilityDistribution<T: Eq + Hash> {
    probabilities: IndexMap<T, f64>,
    sampler: WeightedIndex<f64>,
}

impl<T: Eq + Hash> ProbabilityDistribution<T> {
    /// Normalize a weight mapping into a distribution.
    ///
    /// Each outcome receives probability `weight / sum(weights)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `weights` is empty ([`DistributionError::Empty`])
    /// - any weight is negative, NaN, or infinite ([`DistributionError::InvalidWeight`])
    /// - every weight is zero ([`DistributionError::NoPositiveWeight`])
    pub fn normalize(weights: IndexMap<T, f64>) -> Result<Self, DistributionError> {
        Self::from_weights(weights)
    }

    /// Build a distribution from `(outcome, weight)` pairs.
    ///
    /// Repeated outcomes have their weights summed before normalization.
    /// Errors are as for [`normalize`](Self::normalize); `InvalidWeight`
    /// reports the index of the pair in iteration order, including a pair
    /// whose merged weight overflows.
    pub fn from_weights<I>(weights: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut merged: IndexMap<T, f64> = IndexMap::new();
        for (index, (outcome, weight)) in weights.into_iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DistributionError::InvalidWeight { index, weight });
            }
            let entry = merged.entry(outcome).or_insert(0.0);
            *entry += weight;
            if !entry.is_finite() {
                return Err(DistributionError::InvalidWeight {
                    index,
                    weight: *entry,
                });
            }
        }
        if merged.is_empty() {
            return Err(DistributionError::Empty);
        }

        merged.retain(|_, w| *w > 0.0);
        let peak = merged.values().copied().fold(0.0, f64::max);
        if merged.is_empty() || peak <= 0.0 {
            return Err(DistributionError::NoPositiveWeight);
        }
        // Scale into (0, 1] first so the sum cannot overflow.
        for w in merged.values_mut() {
            *w /= peak;
        }
        let total: f64 = merged.values().sum();
        for w in merged.values_mut() {
            *w /= total;
        }
        merged.retain(|_, w| *w > 0.0);

        // Weights are validated above; the sampler cannot reject them.
        let sampler = WeightedIndex::new(merged.values().copied())
            .map_err(|_| DistributionError::NoPositiveWeight)?;

        Ok(Self {
            probabilities: merged,
            sampler,
        })
    }

    /// A point mass: `outcome` with probability 1.0.
    pub fn point(outcome: T) -> Self {
        let mut probabilities = IndexMap::with_capacity(1);
        probabilities.insert(outcome, 1.0);
        Self {
            probabilities,
            sampler: WeightedIndex::new([1.0]).expect("single unit weight is valid"),
        }
    }

    /// Uniform distribution over `outcomes` (duplicates collapse).
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::Empty`] if `outcomes` is empty.
    pub fn uniform<I>(outcomes: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut seen: IndexMap<T, f64> = IndexMap::new();
        for outcome in outcomes {
            seen.insert(outcome, 1.0);
        }
        Self::normalize(seen)
    }

    /// Probability of `outcome`; 0.0 if it is not in the support.
    pub fn probability_of(&self, outcome: &T) -> f64 {
        self.probabilities.get(outcome).copied().unwrap_or(0.0)
    }

    /// Draw one outcome with probability proportional to its weight.
    ///
    /// All randomness comes from `rng`, so sampling is reproducible for
    /// a seeded generator.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let index = self.sampler.sample(rng);
        self.probabilities
            .get_index(index)
            .map(|(outcome, _)| outcome)
            .expect("sampler index is within outcome count")
    }

    /// Outcomes with non-zero probability, in insertion order.
    pub fn support(&self) -> impl Iterator<Item = &T> {
        self.probabilities.keys()
    }

    /// `(outcome, probability)` pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.probabilities.iter().map(|(k, p)| (k, *p))
    }

    /// Number of outcomes in the support.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Always returns `false`; construction rejects empty distributions.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether all probability mass sits on one outcome.
    pub fn is_point_mass(&self) -> bool {
        self.probabilities.len() == 1
    }

    /// Sum of stored probabilities (1.0 up to rounding).
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }
}

impl<T: Eq + Hash> PartialEq for ProbabilityDistribution<T> {
    fn eq(&self, other: &Self) -> bool {
        self.probabilities == other.probabilities
    }
}
