//! End-to-end recommendation session
//!
//! Batch facade over the pipeline: index raw records, build the interaction
//! matrix, fit the model, then serve repeatable recommend/explain/history
//! requests with identifiers resolved for the display layer.

use crate::als::{AlsConfig, AlsModel};
use crate::explain::ExplainRecommendation;
use crate::interactions::{index_records, InteractionSet, RawRecord};
use crate::matrix::InteractionMatrix;
use crate::recommend::TopKRecommendations;
use crate::types::{
    ExplainedRecommendation, ExplanationEntry, HistoryMatch, PlayRecord, ScoredItem,
};
use game_guide_core::config::{parse_env_var, ConfigLoader};
use game_guide_core::{GameGuideError, Result};
use tracing::info;

/// Serving configuration for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How many items to recommend per request (K)
    pub recommendations: usize,
    /// How many contributing items to surface per explanation (N);
    /// `None` uses the size of the recommendation batch being explained
    pub explanation_breadth: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recommendations: 5,
            explanation_breadth: None,
        }
    }
}

impl ConfigLoader for SessionConfig {
    fn from_env() -> Result<Self> {
        let defaults = SessionConfig::default();
        // Unset or 0 means "match the recommendation batch size"
        let breadth: usize = parse_env_var("GAME_GUIDE_EXPLANATION_BREADTH", 0)?;
        Ok(Self {
            recommendations: parse_env_var(
                "GAME_GUIDE_RECOMMENDATIONS",
                defaults.recommendations,
            )?,
            explanation_breadth: if breadth == 0 { None } else { Some(breadth) },
        })
    }

    fn validate(&self) -> Result<()> {
        if self.recommendations == 0 {
            return Err(GameGuideError::invalid_config(
                "recommendations must be greater than 0",
                "recommendations",
            ));
        }
        if self.explanation_breadth == Some(0) {
            return Err(GameGuideError::invalid_config(
                "explanation_breadth must be greater than 0 when set",
                "explanation_breadth",
            ));
        }
        Ok(())
    }
}

/// A fitted recommendation session
///
/// Owns the indexed interactions, the sparse matrix, and the fitted model.
/// All serving methods are read-only, so a session can be shared across
/// threads once built.
pub struct RecommenderSession {
    interactions: InteractionSet,
    matrix: InteractionMatrix,
    model: AlsModel,
    config: SessionConfig,
}

impl RecommenderSession {
    /// Index, aggregate, and fit in one step
    ///
    /// # Errors
    ///
    /// Propagates `InvalidConfig` from either config, `EmptyDataset` from
    /// indexing, and any fit failure unmodified.
    pub fn fit(
        raw: impl IntoIterator<Item = RawRecord>,
        als_config: AlsConfig,
        config: SessionConfig,
    ) -> Result<Self> {
        config.validate()?;
        als_config.validate()?;

        let interactions = index_records(raw)?;
        let matrix = InteractionMatrix::from_interactions(&interactions);
        info!(
            users = matrix.num_users(),
            items = matrix.num_items(),
            entries = matrix.nnz(),
            "built interaction matrix"
        );

        let mut model = AlsModel::new(als_config);
        model.fit(&matrix)?;

        Ok(Self {
            interactions,
            matrix,
            model,
            config,
        })
    }

    /// Fit with both configs taken from the environment
    pub fn fit_from_env(raw: impl IntoIterator<Item = RawRecord>) -> Result<Self> {
        Self::fit(raw, AlsConfig::from_env()?, SessionConfig::from_env()?)
    }

    pub fn num_users(&self) -> usize {
        self.interactions.num_users()
    }

    pub fn num_items(&self) -> usize {
        self.interactions.num_items()
    }

    /// Index-identifier mapping tables
    pub fn interactions(&self) -> &InteractionSet {
        &self.interactions
    }

    /// Dense index for an external user identifier
    pub fn user_index(&self, id: &str) -> Option<usize> {
        self.interactions.user_index(id)
    }

    /// Dense index for an external item identifier
    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.interactions.item_index(id)
    }

    /// A user's play history with identifiers resolved, sorted by hours
    /// ascending (ties by identifier)
    pub fn play_history(&self, user: usize) -> Result<Vec<PlayRecord>> {
        let row = self
            .matrix
            .user_row(user)
            .ok_or(GameGuideError::UnknownUser {
                index: user,
                num_users: self.num_users(),
            })?;

        let mut history: Vec<PlayRecord> = row
            .iter()
            .map(|&(item, hours)| PlayRecord {
                item,
                item_id: self.item_id_or_empty(item),
                hours,
            })
            .collect();
        history.sort_by(|a, b| a.hours.total_cmp(&b.hours).then(a.item_id.cmp(&b.item_id)));

        Ok(history)
    }

    /// Top-K recommendations by item index
    pub fn recommend(&self, user: usize, k: usize) -> Result<Vec<ScoredItem>> {
        TopKRecommendations::execute(&self.model, &self.matrix, user, k)
    }

    /// Explanation entries for one recommended item
    pub fn explain(
        &self,
        user: usize,
        recommended: usize,
        breadth: usize,
    ) -> Result<Vec<ExplanationEntry>> {
        ExplainRecommendation::execute(&self.model, &self.matrix, user, recommended, breadth)
    }

    /// Recommend K items and explain each one, identifiers resolved
    ///
    /// K comes from the session config; the explanation breadth defaults to
    /// the size of the recommendation batch, mirroring "explain each of the K
    /// suggestions by up to K played games".
    pub fn recommend_with_explanations(&self, user: usize) -> Result<Vec<ExplainedRecommendation>> {
        let recommendations = self.recommend(user, self.config.recommendations)?;
        let breadth = self
            .config
            .explanation_breadth
            .unwrap_or(recommendations.len());

        let mut explained = Vec::with_capacity(recommendations.len());
        for scored in recommendations {
            let based_on = self
                .explain(user, scored.item, breadth)?
                .into_iter()
                .map(|entry| HistoryMatch {
                    item: entry.contributing,
                    item_id: self.item_id_or_empty(entry.contributing),
                    weight: entry.weight,
                })
                .collect();

            explained.push(ExplainedRecommendation {
                item: scored.item,
                item_id: self.item_id_or_empty(scored.item),
                score: scored.score,
                based_on,
            });
        }

        Ok(explained)
    }

    fn item_id_or_empty(&self, item: usize) -> String {
        self.interactions
            .item_id(item)
            .map(String::from)
            .unwrap_or_default()
    }
}
