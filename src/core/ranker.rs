use crate::models::{FailurePolicy, FilterCriteria, Recommendation, Record, ScoringWarning, UserLocation};
use crate::core::{
    distance::{distance_between, is_valid_coordinate},
    filters::passes_filters,
    scoring::combined_score,
};
use crate::services::model::{ScoringError, ScoringModel};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use thiserror::Error;

/// Number of recommendations returned when the caller does not ask for more
pub const DEFAULT_TOP_N: usize = 5;

/// Shown when nothing survives filtering
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No recommendations found based on the selected filters.";

/// Shown when records passed the filters but none of them could be scored
pub const SCORING_FAILED_MESSAGE: &str =
    "No recommendations found: every record matching the filters failed scoring.";

/// Errors that abort a ranking request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("Invalid user location: ({latitude}, {longitude})")]
    InvalidUserLocation { latitude: f64, longitude: f64 },

    #[error("Error during classification: {0}")]
    Scoring(#[from] ScoringError),
}

/// Result of a ranking request
#[derive(Debug, Clone, Default)]
pub struct RankingOutcome {
    /// Best first
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<ScoringWarning>,
    pub considered: usize,
    pub passed_filters: usize,
}

impl RankingOutcome {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Message for the empty result, which is a valid outcome and not an error
    pub fn message(&self) -> Option<&'static str> {
        if !self.is_empty() {
            return None;
        }
        if self.passed_filters > 0 && self.warnings.len() == self.passed_filters {
            Some(SCORING_FAILED_MESSAGE)
        } else {
            Some(NO_RECOMMENDATIONS_MESSAGE)
        }
    }

    /// One-line summary of skipped records
    pub fn warning_summary(&self) -> Option<String> {
        if self.warnings.is_empty() {
            return None;
        }
        Some(format!(
            "{} of {} filtered records skipped during scoring",
            self.warnings.len(),
            self.passed_filters
        ))
    }
}

/// Heap entry ordered so that "greater" means a better recommendation:
/// higher combined score, then lower id
#[derive(Debug)]
struct Ranked(Recommendation);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .combined_score
            .total_cmp(&other.0.combined_score)
            .then_with(|| other.0.id.cmp(&self.0.id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Keeps the best `capacity` entries seen so far
///
/// Backed by a min-heap so the current worst entry is evicted in O(log n).
struct TopK {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl TopK {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
        }
    }

    fn push(&mut self, recommendation: Recommendation) {
        if self.capacity == 0 {
            return;
        }
        self.heap.push(Reverse(Ranked(recommendation)));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Drain best first
    fn into_sorted(self) -> Vec<Recommendation> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(r))| r)
            .collect()
    }
}

/// Ranks lockers by suitability penalised by distance
///
/// # Pipeline
/// 1. Filter predicate
/// 2. Coordinate sanity check
/// 3. Model scoring
/// 4. Distance penalty and bounded top-N selection
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    policy: FailurePolicy,
}

impl Ranker {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Rank records for a user
    ///
    /// # Arguments
    /// * `records` - Candidate lockers, read only for the duration of the call
    /// * `user_location` - Requester position
    /// * `model` - Suitability model
    /// * `filters` - Constraints applied before scoring
    /// * `top_n` - Maximum number of recommendations to return
    ///
    /// # Returns
    /// Recommendations sorted by combined score descending, ties by ascending id
    pub fn rank<M>(
        &self,
        records: &[Record],
        user_location: &UserLocation,
        model: &M,
        filters: &FilterCriteria,
        top_n: usize,
    ) -> Result<RankingOutcome, RankError>
    where
        M: ScoringModel + ?Sized,
    {
        if !is_valid_coordinate(user_location.latitude, user_location.longitude) {
            return Err(RankError::InvalidUserLocation {
                latitude: user_location.latitude,
                longitude: user_location.longitude,
            });
        }

        let mut top = TopK::new(top_n);
        let mut warnings = Vec::new();
        let mut passed_filters = 0usize;

        for record in records.iter().filter(|r| passes_filters(r, filters)) {
            passed_filters += 1;

            if !is_valid_coordinate(record.latitude, record.longitude) {
                tracing::warn!(
                    "Skipping record {} with invalid coordinates ({}, {})",
                    record.id,
                    record.latitude,
                    record.longitude
                );
                warnings.push(ScoringWarning {
                    record_id: record.id,
                    reason: format!(
                        "invalid coordinates ({}, {})",
                        record.latitude, record.longitude
                    ),
                });
                continue;
            }

            let suitability = match score_record(model, record) {
                Ok(value) => value,
                Err(e) => match self.policy {
                    FailurePolicy::Abort => {
                        tracing::warn!("Aborting ranking on record {}: {}", record.id, e);
                        return Err(RankError::Scoring(e));
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!("Skipping record {}: {}", record.id, e);
                        warnings.push(ScoringWarning {
                            record_id: record.id,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                },
            };

            let distance_km = distance_between(user_location, record);

            top.push(Recommendation {
                id: record.id,
                combined_score: combined_score(suitability, distance_km),
                distance_km,
                locker_type: record.locker_type.clone(),
            });
        }

        let recommendations = top.into_sorted();

        tracing::debug!(
            "Ranked {} records with model {}: {} passed filters, {} skipped, {} returned",
            records.len(),
            model.name(),
            passed_filters,
            warnings.len(),
            recommendations.len()
        );

        Ok(RankingOutcome {
            recommendations,
            warnings,
            considered: records.len(),
            passed_filters,
        })
    }
}

fn score_record<M>(model: &M, record: &Record) -> Result<f64, ScoringError>
where
    M: ScoringModel + ?Sized,
{
    let value = model.score(record)?;
    if !value.is_finite() {
        return Err(ScoringError::NonFinite { id: record.id, value });
    }
    Ok(value)
}
