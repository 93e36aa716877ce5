//! # GameGuide Core
//!
//! Core building blocks shared across the GameGuide recommender workspace.
//!
//! This crate provides the error taxonomy, configuration loading, vector math
//! helpers, and logging setup used by the recommendation engine.
//!
//! ## Modules
//!
//! - `error`: Error types and handling
//! - `config`: Configuration loading and validation
//! - `math`: Mathematical utilities for vector operations
//! - `observability`: Structured logging setup

pub mod config;
pub mod error;
pub mod math;
pub mod observability;

// Re-export commonly used types
pub use config::{load_dotenv, parse_env_var, ConfigLoader};
pub use error::GameGuideError;
pub use math::{cosine_similarity, dot_product, l2_distance, normalize_vector};
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};

/// Result type alias for GameGuide operations
pub type Result<T> = std::result::Result<T, GameGuideError>;
