use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterCriteria, Record, UserLocation};

/// Request to rank a set of lockers
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Name of a registered scoring model
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub filters: FilterCriteria,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub user_location: Option<UserLocation>,
    /// Also run the model over all records and report a summary
    #[serde(default)]
    pub evaluate: bool,
}
