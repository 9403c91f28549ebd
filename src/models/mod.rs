// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    EvaluationSummary, FailurePolicy, FilterCriteria, Recommendation, Record, ScoringWarning,
    TypeFilter, UserLocation,
};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse, RecommendResponse};
