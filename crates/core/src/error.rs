//! Error types for the GameGuide recommender
//!
//! Every failure in the core pipeline is expressed as a [`GameGuideError`]
//! variant. Errors are raised at the point of detection and propagate
//! unmodified to the caller; the display layer decides how to surface them.

use thiserror::Error;

/// Result type alias used throughout the workspace
pub type Result<T> = std::result::Result<T, GameGuideError>;

#[derive(Debug, Error)]
pub enum GameGuideError {
    /// No usable interaction records remained after cleaning
    #[error("dataset contains no usable interaction records after cleaning")]
    EmptyDataset,

    /// A hyperparameter or serving option is out of range
    #[error("invalid configuration for `{field}`: {message}")]
    InvalidConfig { message: String, field: String },

    /// Scoring or recommending was requested before a successful fit
    #[error("model has not been fitted yet")]
    NotFitted,

    /// User index outside the fitted range
    #[error("unknown user index {index} (model covers {num_users} users)")]
    UnknownUser { index: usize, num_users: usize },

    /// Item index outside the fitted range
    #[error("unknown item index {index} (model covers {num_items} items)")]
    UnknownItem { index: usize, num_items: usize },
}

impl GameGuideError {
    /// Build an `InvalidConfig` error for a named configuration field
    pub fn invalid_config(message: impl Into<String>, field: impl Into<String>) -> Self {
        GameGuideError::InvalidConfig {
            message: message.into(),
            field: field.into(),
        }
    }
}
