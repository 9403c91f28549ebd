// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod ranker;
pub mod scoring;

pub use distance::{haversine_distance, distance_between, is_valid_coordinate};
pub use filters::passes_filters;
pub use ranker::{Ranker, RankingOutcome, RankError, DEFAULT_TOP_N, NO_RECOMMENDATIONS_MESSAGE, SCORING_FAILED_MESSAGE};
pub use scoring::{combined_score, DISTANCE_PENALTY_PER_KM};
