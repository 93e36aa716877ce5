//! Per-recommendation explanations
//!
//! Attributes a recommended item to the items from the user's own history that
//! are most similar to it in latent space. Explanations never surface items
//! the user has not interacted with.

use crate::als::AlsModel;
use crate::matrix::InteractionMatrix;
use crate::types::ExplanationEntry;
use game_guide_core::Result;

/// Explain one recommendation in terms of the user's interaction history
///
/// Steps:
/// 1. Restrict candidates to the user's interacted item set
/// 2. Rank by cosine similarity to the recommended item
/// 3. Break ties by ascending item index, return the top `breadth` entries
pub struct ExplainRecommendation;

impl ExplainRecommendation {
    /// A user with no interaction history yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Fails with `NotFitted` before a successful fit, `UnknownUser` for an
    /// out-of-range user index, and `UnknownItem` for an out-of-range
    /// recommended item.
    pub fn execute(
        model: &AlsModel,
        matrix: &InteractionMatrix,
        user: usize,
        recommended: usize,
        breadth: usize,
    ) -> Result<Vec<ExplanationEntry>> {
        // Validate the request even when the history turns out to be empty
        model.score(user, recommended)?;

        let history = matrix.user_row(user).unwrap_or(&[]);

        let mut entries = Vec::with_capacity(history.len());
        for &(contributing, _) in history {
            entries.push(ExplanationEntry {
                recommended,
                contributing,
                weight: model.similarity(recommended, contributing)?,
            });
        }

        entries.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then(a.contributing.cmp(&b.contributing))
        });
        entries.truncate(breadth);

        Ok(entries)
    }
}
