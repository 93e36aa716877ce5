//! Top-K recommendation generation
//!
//! Scores every candidate item for a user, drops items the user has already
//! interacted with, and returns the best K in a deterministic order.

use crate::als::AlsModel;
use crate::matrix::InteractionMatrix;
use crate::types::ScoredItem;
use game_guide_core::Result;

/// Generate top-K recommendations for a user
///
/// Steps:
/// 1. Score every item via the fitted model
/// 2. Filter out items from the user's interaction set
/// 3. Sort by score descending, ties broken by ascending item index
/// 4. Truncate to K
pub struct TopKRecommendations;

impl TopKRecommendations {
    /// Returns at most `k` unseen items; fewer when fewer unseen items exist.
    ///
    /// # Errors
    ///
    /// Fails with `NotFitted` before a successful fit and `UnknownUser` for an
    /// out-of-range user index.
    pub fn execute(
        model: &AlsModel,
        matrix: &InteractionMatrix,
        user: usize,
        k: usize,
    ) -> Result<Vec<ScoredItem>> {
        // score_all performs the fitted and user-range checks
        let mut scored = model.score_all(user)?;

        scored.retain(|candidate| !matrix.has_seen(user, candidate.item));
        scored.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.item.cmp(&b.item)));
        scored.truncate(k);

        Ok(scored)
    }
}
