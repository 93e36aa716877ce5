//! Sparse user-item interaction matrix
//!
//! Aggregates indexed records into one entry per (user, item) pair and exposes
//! the nonzero structure row-wise and column-wise for the alternating solves.
//! Mirrors the "total hours per user per game" semantics: duplicate pairs are
//! summed, zero aggregates are absent.

use crate::interactions::InteractionSet;
use std::collections::HashMap;

/// Sparse user-item matrix of accumulated interaction strengths
///
/// Built once from an [`InteractionSet`] and immutable afterwards. Entries are
/// stored as adjacency lists sorted by index, so iterating a single user's or
/// item's nonzero entries is cheap and deterministic.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    num_users: usize,
    num_items: usize,
    nnz: usize,
    /// Per user: (item index, aggregated strength), sorted by item index
    user_items: Vec<Vec<(usize, f32)>>,
    /// Per item: (user index, aggregated strength), sorted by user index
    item_users: Vec<Vec<(usize, f32)>>,
}

impl InteractionMatrix {
    /// Aggregate an indexed interaction set into a sparse matrix
    pub fn from_interactions(interactions: &InteractionSet) -> Self {
        let num_users = interactions.num_users();
        let num_items = interactions.num_items();

        let mut aggregated: HashMap<(usize, usize), f32> = HashMap::new();
        for record in interactions.records() {
            *aggregated.entry((record.user, record.item)).or_insert(0.0) += record.strength;
        }

        let mut user_items: Vec<Vec<(usize, f32)>> = vec![Vec::new(); num_users];
        let mut item_users: Vec<Vec<(usize, f32)>> = vec![Vec::new(); num_items];

        let mut nnz = 0;
        for ((user, item), strength) in aggregated {
            // Zero aggregates are absent, not stored as zero
            if strength > 0.0 {
                user_items[user].push((item, strength));
                item_users[item].push((user, strength));
                nnz += 1;
            }
        }

        for row in &mut user_items {
            row.sort_unstable_by_key(|&(item, _)| item);
        }
        for column in &mut item_users {
            column.sort_unstable_by_key(|&(user, _)| user);
        }

        Self {
            num_users,
            num_items,
            nnz,
            user_items,
            item_users,
        }
    }

    pub fn num_users(&self) -> usize {
        self.num_users
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Number of stored (user, item) entries
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Nonzero entries of one user's row, sorted by item index
    pub fn user_row(&self, user: usize) -> Option<&[(usize, f32)]> {
        self.user_items.get(user).map(Vec::as_slice)
    }

    /// Nonzero entries of one item's column, sorted by user index
    pub fn item_column(&self, item: usize) -> Option<&[(usize, f32)]> {
        self.item_users.get(item).map(Vec::as_slice)
    }

    /// All user rows, indexed by user
    pub(crate) fn user_rows(&self) -> &[Vec<(usize, f32)>] {
        &self.user_items
    }

    /// All item columns, indexed by item
    pub(crate) fn item_columns(&self) -> &[Vec<(usize, f32)>] {
        &self.item_users
    }

    /// Aggregated strength for a (user, item) pair, 0.0 if absent
    pub fn get(&self, user: usize, item: usize) -> f32 {
        self.user_row(user)
            .and_then(|row| {
                row.binary_search_by_key(&item, |&(i, _)| i)
                    .ok()
                    .map(|pos| row[pos].1)
            })
            .unwrap_or(0.0)
    }

    /// Whether the user has interacted with the item
    pub fn has_seen(&self, user: usize, item: usize) -> bool {
        self.user_row(user)
            .map(|row| row.binary_search_by_key(&item, |&(i, _)| i).is_ok())
            .unwrap_or(false)
    }
}
