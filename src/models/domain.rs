use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Candidate package locker with location and accessibility data
///
/// Field aliases accept the attribute names used by the original locker
/// dataset (`Geolokacija_lat`, `Vrsta_paketnika`, ...), so rows exported from
/// it deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(alias = "Geolokacija_lat")]
    pub latitude: f64,
    #[serde(alias = "Geolokacija_lon")]
    pub longitude: f64,
    #[serde(rename = "lockerType", alias = "type", alias = "Vrsta_paketnika")]
    pub locker_type: String,
    #[serde(alias = "Dostopnost_za_invalide", deserialize_with = "yes_no")]
    pub accessible: bool,
    #[serde(alias = "Dostopnost_parkirisca", deserialize_with = "yes_no")]
    pub parking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitability: Option<f64>,
}

/// Parse a "da"/"ne" flag as used in the locker dataset
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.trim() {
        "da" => Some(true),
        "ne" => Some(false),
        _ => None,
    }
}

fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => parse_yes_no(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("expected \"da\" or \"ne\", got {:?}", s))
        }),
    }
}

/// Position of the user requesting recommendations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserLocation {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl UserLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for UserLocation {
    /// Ljubljana city centre
    fn default() -> Self {
        Self::new(46.0569, 14.5058)
    }
}

/// Locker type constraint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    Any,
    Exactly(String),
}

impl From<String> for TypeFilter {
    fn from(value: String) -> Self {
        match value.as_str() {
            "any" | "<Any>" => TypeFilter::Any,
            _ => TypeFilter::Exactly(value),
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(value: &str) -> Self {
        TypeFilter::from(value.to_string())
    }
}

impl From<TypeFilter> for String {
    fn from(value: TypeFilter) -> Self {
        match value {
            TypeFilter::Any => "any".to_string(),
            TypeFilter::Exactly(t) => t,
        }
    }
}

/// User-selected constraints applied before scoring
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub require_accessible: bool,
    pub require_parking: bool,
    pub type_filter: TypeFilter,
}

/// Ranked recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: u64,
    pub combined_score: f64,
    pub distance_km: f64,
    pub locker_type: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Score: {:.2}, Distance: {:.2} km, Type: {}",
            self.id, self.combined_score, self.distance_km, self.locker_type
        )
    }
}

/// A record that was left out of the ranking, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWarning {
    pub record_id: u64,
    pub reason: String,
}

/// What the ranker does when the scoring model fails on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the record, keep going and report a warning
    #[default]
    Skip,
    /// Fail the whole batch on the first scoring error
    Abort,
}

/// Model quality summary over a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub model: String,
    pub instances: usize,
    pub scored: usize,
    pub failed: usize,
    pub mean_score: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub elapsed_ms: u64,
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Total Number of Instances: {}", self.instances)?;
        writeln!(f, "Scored Instances: {}", self.scored)?;
        writeln!(f, "Failed Instances: {}", self.failed)?;
        if let (Some(mean), Some(min), Some(max)) = (self.mean_score, self.min_score, self.max_score) {
            writeln!(f, "Mean score: {:.4} (min {:.4}, max {:.4})", mean, min, max)?;
        }
        write!(f, "Evaluation time: {} ms", self.elapsed_ms)
    }
}
