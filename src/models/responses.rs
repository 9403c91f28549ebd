use serde::{Deserialize, Serialize};
use crate::models::domain::{EvaluationSummary, Recommendation, ScoringWarning};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub request_id: String,
    pub classifier: String,
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<ScoringWarning>,
    pub total_records: usize,
    pub passed_filters: usize,
    /// Set when nothing survived filtering and scoring
    pub message: Option<String>,
    pub evaluation: Option<EvaluationSummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
