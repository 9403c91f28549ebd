// Service exports
pub mod dataset;
pub mod model;
pub mod recommender;

pub use dataset::{AttributeRows, DatasetError, DatasetSource, InMemoryDataset};
pub use model::{FnModel, ModelError, ModelRegistry, ScoringError, ScoringModel, StoredSuitability};
pub use recommender::{RecommendError, Recommender};
