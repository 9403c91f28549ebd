//! SUIN Recommender - package locker recommendations
//!
//! Ranks candidate lockers by a model-predicted suitability score minus a
//! distance penalty of 0.1 per kilometer, after applying the user's
//! accessibility, parking and locker type filters.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Ranker, RankingOutcome, RankError, distance::haversine_distance, scoring::combined_score};
pub use models::{Record, UserLocation, FilterCriteria, TypeFilter, Recommendation, FailurePolicy};
pub use services::{ScoringModel, ModelRegistry, Recommender, StoredSuitability};
