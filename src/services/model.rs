use crate::models::{EvaluationSummary, Record};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Errors raised by a scoring model for a single record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("record {0} has no suitability score")]
    MissingSuitability(u64),

    #[error("record {id} scored a non-finite value ({value})")]
    NonFinite { id: u64, value: f64 },

    #[error("scoring failed for record {id}: {reason}")]
    Failed { id: u64, reason: String },
}

/// Errors that can occur when selecting a model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Please select a classifier.")]
    NoClassifierSelected,

    #[error("Unknown classifier: {0}")]
    UnknownClassifier(String),
}

/// A model that rates how suitable a locker is for the user
///
/// Scores are nominally probabilities in [0, 1] but the ranker does not
/// enforce the range.
pub trait ScoringModel: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, record: &Record) -> Result<f64, ScoringError>;

    /// Score every record and summarise the results
    fn evaluate(&self, records: &[Record]) -> EvaluationSummary {
        let started = Instant::now();
        let mut scored = 0usize;
        let mut failed = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for record in records {
            match self.score(record) {
                Ok(value) if value.is_finite() => {
                    scored += 1;
                    sum += value;
                    min = min.min(value);
                    max = max.max(value);
                }
                _ => failed += 1,
            }
        }

        let has_scores = scored > 0;

        EvaluationSummary {
            model: self.name().to_string(),
            instances: records.len(),
            scored,
            failed,
            mean_score: has_scores.then(|| sum / scored as f64),
            min_score: has_scores.then_some(min),
            max_score: has_scores.then_some(max),
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Uses the suitability precomputed on each record
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSuitability;

impl ScoringModel for StoredSuitability {
    fn name(&self) -> &str {
        "stored"
    }

    fn score(&self, record: &Record) -> Result<f64, ScoringError> {
        match record.suitability {
            Some(value) if value.is_finite() => Ok(value),
            Some(value) => Err(ScoringError::NonFinite { id: record.id, value }),
            None => Err(ScoringError::MissingSuitability(record.id)),
        }
    }
}

/// Adapts a closure into a scoring model
pub struct FnModel<F> {
    name: String,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&Record) -> Result<f64, ScoringError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> ScoringModel for FnModel<F>
where
    F: Fn(&Record) -> Result<f64, ScoringError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, record: &Record) -> Result<f64, ScoringError> {
        (self.f)(record)
    }
}

/// Scoring models available for selection by name
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn ScoringModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `stored` model
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("stored", StoredSuitability);
        registry
    }

    /// Register a model, replacing any existing model with the same name
    pub fn register<M>(&mut self, name: impl Into<String>, model: M) -> &mut Self
    where
        M: ScoringModel + 'static,
    {
        self.models.insert(name.into(), Arc::new(model));
        self
    }

    /// Resolve the selected model
    pub fn select(&self, name: Option<&str>) -> Result<Arc<dyn ScoringModel>, ModelError> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return Err(ModelError::NoClassifierSelected),
        };

        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownClassifier(name.to_string()))
    }

    /// Registered model names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.names())
            .finish()
    }
}
