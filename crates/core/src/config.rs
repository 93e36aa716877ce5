//! Shared configuration loader module for GameGuide
//!
//! Provides a unified configuration loading system with environment variable
//! parsing, validation, and support for .env files. All configuration uses the
//! `GAME_GUIDE_` prefix for environment variables.
//!
//! # Features
//!
//! - Environment variable parsing with typed values
//! - .env file support via dotenvy
//! - Configuration validation with clear error messages
//! - Default values for optional fields
//! - Configuration override hierarchy: defaults < .env < environment
//!
//! # Example
//!
//! ```no_run
//! use game_guide_core::config::{load_dotenv, parse_env_var};
//!
//! # fn example() -> Result<(), game_guide_core::GameGuideError> {
//! // Load .env file (optional)
//! load_dotenv();
//!
//! // Read a typed value with a default
//! let factors: usize = parse_env_var("GAME_GUIDE_ALS_FACTORS", 50)?;
//! # Ok(())
//! # }
//! ```

use crate::error::GameGuideError;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables. Configuration structs across the workspace implement
/// this trait so that callers can choose between programmatic construction and
/// environment-driven loading.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// Reads environment variables with the `GAME_GUIDE_` prefix and constructs
    /// a configuration instance with defaults for missing optional values.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` error if an environment variable value cannot
    /// be parsed.
    fn from_env() -> Result<Self, GameGuideError>;

    /// Validate configuration values
    ///
    /// Performs validation checks on all configuration fields to ensure they
    /// meet requirements (e.g., positive counts, non-negative penalties).
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` error if any validation check fails.
    fn validate(&self) -> Result<(), GameGuideError>;
}

/// Parse an environment variable with a default value
///
/// # Type Parameters
///
/// * `T` - The type to parse into (must implement FromStr)
///
/// # Arguments
///
/// * `key` - The environment variable key
/// * `default` - The default value if the variable is not set
///
/// # Errors
///
/// Returns an `InvalidConfig` error if the value cannot be parsed
pub fn parse_env_var<T>(key: &str, default: T) -> Result<T, GameGuideError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| GameGuideError::InvalidConfig {
                message: format!("Failed to parse {}: {}", key, e),
                field: key.to_string(),
            })
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// Convenience wrapper around dotenvy that does not fail when no .env file
/// exists.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        // Only log if it's not a "file not found" error
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}
