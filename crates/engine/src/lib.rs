//! GameGuide Recommendation Engine
//!
//! Recommends items to a user from implicit interaction data (user, item,
//! interaction-strength triples) and explains each recommendation in terms of
//! similar items the user already engaged with.
//!
//! The pipeline is batch-oriented and synchronous: raw records are indexed,
//! aggregated into a sparse user-item matrix, and factorized with
//! implicit-feedback alternating least squares. The fitted model then serves
//! any number of read-only recommend and explain requests.

pub mod als;
pub mod explain;
pub mod interactions;
pub mod matrix;
pub mod recommend;
pub mod session;
pub mod types;

// Re-export key types
pub use als::{AlsConfig, AlsModel};
pub use explain::ExplainRecommendation;
pub use interactions::{index_records, IndexedRecord, InteractionSet, RawRecord};
pub use matrix::InteractionMatrix;
pub use recommend::TopKRecommendations;
pub use session::{RecommenderSession, SessionConfig};
pub use types::*;

#[cfg(test)]
mod tests;
