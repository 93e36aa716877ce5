//! Shared types for the recommendation pipeline

use serde::{Deserialize, Serialize};

/// An item index paired with its model score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Dense item index in `[0, num_items)`
    pub item: usize,
    /// Preference score (dot product of user and item factors)
    pub score: f32,
}

/// Attribution of a recommended item to one item from the user's history
///
/// The contributing item is always drawn from the user's own interaction set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplanationEntry {
    /// The recommended item being explained
    pub recommended: usize,
    /// An item the user interacted with that is similar to the recommendation
    pub contributing: usize,
    /// Cosine similarity between the two items in latent space
    pub weight: f32,
}

/// One entry of a user's play history, resolved to its external identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Dense item index
    pub item: usize,
    /// External item identifier (e.g., the game name)
    pub item_id: String,
    /// Total interaction strength (e.g., hours played)
    pub hours: f32,
}

/// A contributing history item resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMatch {
    /// Dense item index
    pub item: usize,
    /// External item identifier
    pub item_id: String,
    /// Cosine similarity to the recommended item
    pub weight: f32,
}

/// A recommendation resolved for display, with its explanation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedRecommendation {
    /// Dense item index
    pub item: usize,
    /// External item identifier
    pub item_id: String,
    /// Preference score
    pub score: f32,
    /// History items this recommendation is attributed to, best match first
    pub based_on: Vec<HistoryMatch>,
}
