use crate::config::RankingSettings;
use crate::core::{RankError, Ranker};
use crate::models::{RecommendRequest, RecommendResponse, Record, UserLocation};
use crate::services::dataset::{DatasetError, DatasetSource};
use crate::services::model::{ModelError, ModelRegistry};
use thiserror::Error;
use validator::Validate;

/// Errors returned to callers of the recommender
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl RecommendError {
    /// HTTP status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RecommendError::Validation(_)
            | RecommendError::Model(_)
            | RecommendError::Rank(RankError::InvalidUserLocation { .. }) => 400,
            RecommendError::Rank(RankError::Scoring(_)) | RecommendError::Dataset(_) => 422,
        }
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::Validation(_) => "validation_failed",
            RecommendError::Model(ModelError::NoClassifierSelected) => "no_classifier_selected",
            RecommendError::Model(ModelError::UnknownClassifier(_)) => "unknown_classifier",
            RecommendError::Rank(RankError::InvalidUserLocation { .. }) => "invalid_user_location",
            RecommendError::Rank(RankError::Scoring(_)) => "scoring_failure",
            RecommendError::Dataset(_) => "invalid_dataset",
        }
    }
}

/// Handles one recommendation request end to end
///
/// Holds only immutable state, so a single instance is shared by all workers.
#[derive(Debug, Clone)]
pub struct Recommender {
    registry: ModelRegistry,
    ranker: Ranker,
    default_classifier: Option<String>,
    default_location: UserLocation,
    default_top_n: usize,
}

impl Recommender {
    pub fn new(registry: ModelRegistry, settings: &RankingSettings) -> Self {
        Self {
            registry,
            ranker: Ranker::new(settings.failure_policy),
            default_classifier: settings.default_classifier.clone(),
            default_location: settings.user_location,
            default_top_n: settings.top_n,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Rank the records carried in the request
    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        self.run(&request.records, request)
    }

    /// Rank records pulled from a dataset source; records in the request are ignored
    pub fn recommend_from_source(
        &self,
        source: &dyn DatasetSource,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, RecommendError> {
        let records = source.records()?;
        self.run(&records, request)
    }

    fn run(&self, records: &[Record], request: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        request
            .validate()
            .map_err(|e| RecommendError::Validation(e.to_string()))?;

        let user_location = request.user_location.unwrap_or(self.default_location);
        user_location
            .validate()
            .map_err(|e| RecommendError::Validation(e.to_string()))?;

        let classifier = request
            .classifier
            .as_deref()
            .or(self.default_classifier.as_deref());
        let model = self.registry.select(classifier)?;
        let top_n = request.top_n.unwrap_or(self.default_top_n);
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            "Request {}: ranking {} records with classifier {}, top {}",
            request_id,
            records.len(),
            model.name(),
            top_n
        );

        let evaluation = request.evaluate.then(|| {
            let summary = model.evaluate(records);
            tracing::info!(
                "Request {}: evaluated {} ({} scored, {} failed) in {} ms",
                request_id,
                summary.model,
                summary.scored,
                summary.failed,
                summary.elapsed_ms
            );
            summary
        });

        let outcome = self.ranker.rank(
            records,
            &user_location,
            model.as_ref(),
            &request.filters,
            top_n,
        )?;

        if let Some(summary) = outcome.warning_summary() {
            tracing::warn!("Request {}: {}", request_id, summary);
        }

        tracing::info!(
            "Request {}: returning {} recommendations ({} passed filters)",
            request_id,
            outcome.recommendations.len(),
            outcome.passed_filters
        );

        Ok(RecommendResponse {
            request_id,
            classifier: model.name().to_string(),
            message: outcome.message().map(str::to_string),
            recommendations: outcome.recommendations,
            warnings: outcome.warnings,
            total_records: outcome.considered,
            passed_filters: outcome.passed_filters,
            evaluation,
        })
    }
}
