//! Interaction indexing
//!
//! Converts raw (user, item, strength) records into dense zero-based indices
//! while preserving a stable mapping back to the original identifiers. Dirty
//! records (missing identifiers, missing/NaN/negative strengths) are dropped
//! during cleaning; indexing the same record set yields the same mapping
//! regardless of input order.

use game_guide_core::{GameGuideError, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A raw interaction record as yielded by the record source
///
/// Fields are optional because upstream data may carry gaps; cleaning discards
/// any record that is not fully populated with a usable strength.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// External user identifier
    pub user: Option<String>,
    /// External item identifier
    pub item: Option<String>,
    /// Interaction strength (e.g., hours played)
    pub strength: Option<f32>,
}

impl RawRecord {
    /// A fully populated record
    pub fn new(user: impl Into<String>, item: impl Into<String>, strength: f32) -> Self {
        Self {
            user: Some(user.into()),
            item: Some(item.into()),
            strength: Some(strength),
        }
    }
}

impl<U: Into<String>, I: Into<String>> From<(U, I, f32)> for RawRecord {
    fn from((user, item, strength): (U, I, f32)) -> Self {
        RawRecord::new(user, item, strength)
    }
}

/// A cleaned record carrying dense indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedRecord {
    pub user: usize,
    pub item: usize,
    pub strength: f32,
}

/// The indexed interaction set: cleaned records plus both mapping tables
#[derive(Debug, Clone)]
pub struct InteractionSet {
    records: Vec<IndexedRecord>,
    user_ids: Vec<String>,
    item_ids: Vec<String>,
    user_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
}

impl InteractionSet {
    /// The cleaned, indexed records in input order
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_ids.len()
    }

    /// External identifier for a user index
    pub fn user_id(&self, index: usize) -> Option<&str> {
        self.user_ids.get(index).map(String::as_str)
    }

    /// External identifier for an item index
    pub fn item_id(&self, index: usize) -> Option<&str> {
        self.item_ids.get(index).map(String::as_str)
    }

    /// Dense index for an external user identifier
    pub fn user_index(&self, id: &str) -> Option<usize> {
        self.user_index.get(id).copied()
    }

    /// Dense index for an external item identifier
    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.item_index.get(id).copied()
    }

    /// All user identifiers in index order
    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }

    /// All item identifiers in index order
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }
}

/// Clean and index a raw record stream
///
/// Records with a missing identifier or a missing, NaN, or negative strength
/// are silently discarded (data cleaning, not an error). Unique identifiers
/// are sorted and numbered by position, so the identifier-index mapping is a
/// bijection independent of input order.
///
/// # Errors
///
/// Returns `EmptyDataset` if no records survive cleaning.
pub fn index_records(raw: impl IntoIterator<Item = RawRecord>) -> Result<InteractionSet> {
    let mut cleaned: Vec<(String, String, f32)> = Vec::new();
    let mut dropped = 0usize;

    for record in raw {
        match (record.user, record.item, record.strength) {
            (Some(user), Some(item), Some(strength)) if strength.is_finite() && strength >= 0.0 => {
                cleaned.push((user, item, strength));
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = cleaned.len(), "discarded unusable records");
    }

    if cleaned.is_empty() {
        return Err(GameGuideError::EmptyDataset);
    }

    // Sorted unique identifiers define the index assignment
    let users: BTreeSet<&str> = cleaned.iter().map(|(u, _, _)| u.as_str()).collect();
    let items: BTreeSet<&str> = cleaned.iter().map(|(_, i, _)| i.as_str()).collect();

    let user_ids: Vec<String> = users.into_iter().map(String::from).collect();
    let item_ids: Vec<String> = items.into_iter().map(String::from).collect();

    let user_index: HashMap<String, usize> = user_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect();
    let item_index: HashMap<String, usize> = item_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect();

    let records = cleaned
        .into_iter()
        .map(|(user, item, strength)| IndexedRecord {
            user: user_index[&user],
            item: item_index[&item],
            strength,
        })
        .collect();

    Ok(InteractionSet {
        records,
        user_ids,
        item_ids,
        user_index,
        item_index,
    })
}
