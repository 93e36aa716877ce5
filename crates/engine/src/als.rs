//! Matrix factorization using alternating least squares (ALS)
//!
//! Implements implicit-feedback ALS over the sparse interaction matrix.
//! Interaction strength is folded into a confidence weight for a binary
//! preference signal; user and item factor rows are solved alternately in
//! closed form until the configured number of passes completes.

use crate::matrix::InteractionMatrix;
use crate::types::ScoredItem;
use game_guide_core::config::{parse_env_var, ConfigLoader};
use game_guide_core::{cosine_similarity, GameGuideError, Result};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

/// ALS configuration parameters
#[derive(Debug, Clone)]
pub struct AlsConfig {
    /// Number of latent factors (embedding dimension)
    pub factors: usize,
    /// L2 regularization penalty (lambda)
    pub regularization: f32,
    /// Number of alternating passes
    pub iterations: usize,
    /// Seed for factor initialization
    pub random_seed: u64,
    /// Confidence scaling for implicit feedback: confidence = 1 + alpha * strength
    pub alpha_scale: f32,
}

impl Default for AlsConfig {
    fn default() -> Self {
        Self {
            factors: 50,
            regularization: 0.01,
            iterations: 20,
            random_seed: 42,
            alpha_scale: 1.0,
        }
    }
}

impl ConfigLoader for AlsConfig {
    fn from_env() -> Result<Self> {
        let defaults = AlsConfig::default();
        Ok(Self {
            factors: parse_env_var("GAME_GUIDE_ALS_FACTORS", defaults.factors)?,
            regularization: parse_env_var("GAME_GUIDE_ALS_REGULARIZATION", defaults.regularization)?,
            iterations: parse_env_var("GAME_GUIDE_ALS_ITERATIONS", defaults.iterations)?,
            random_seed: parse_env_var("GAME_GUIDE_ALS_RANDOM_SEED", defaults.random_seed)?,
            alpha_scale: parse_env_var("GAME_GUIDE_ALS_ALPHA_SCALE", defaults.alpha_scale)?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.factors == 0 {
            return Err(GameGuideError::invalid_config(
                "factors must be greater than 0",
                "factors",
            ));
        }
        if self.iterations == 0 {
            return Err(GameGuideError::invalid_config(
                "iterations must be greater than 0",
                "iterations",
            ));
        }
        if !self.regularization.is_finite() || self.regularization < 0.0 {
            return Err(GameGuideError::invalid_config(
                "regularization must be a non-negative number",
                "regularization",
            ));
        }
        if !self.alpha_scale.is_finite() || self.alpha_scale < 0.0 {
            return Err(GameGuideError::invalid_config(
                "alpha_scale must be a non-negative number",
                "alpha_scale",
            ));
        }
        Ok(())
    }
}

/// ALS-based latent factor model
///
/// Factor matrices exist only after a successful [`fit`](AlsModel::fit);
/// scoring beforehand fails with `NotFitted`. A fitted model is immutable
/// until the next `fit` replaces both matrices wholesale, so it can be shared
/// read-only across concurrent recommend and explain calls.
pub struct AlsModel {
    config: AlsConfig,
    user_factors: Option<Array2<f32>>,
    item_factors: Option<Array2<f32>>,
}

impl AlsModel {
    pub fn new(config: AlsConfig) -> Self {
        Self {
            config,
            user_factors: None,
            item_factors: None,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(AlsConfig::default())
    }

    pub fn config(&self) -> &AlsConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.user_factors.is_some() && self.item_factors.is_some()
    }

    /// Train the model on a sparse interaction matrix
    ///
    /// Runs exactly `iterations` alternating passes; there is no early exit.
    /// Identical matrix, config, and seed reproduce identical factors.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidConfig` before any fitting work if the
    /// hyperparameters are out of range.
    pub fn fit(&mut self, matrix: &InteractionMatrix) -> Result<()> {
        self.config.validate()?;

        let k = self.config.factors;
        let lambda = self.config.regularization as f64;
        let alpha = self.config.alpha_scale;

        // Seeded initialization so identical inputs reproduce identical factors
        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        let mut user_factors = init_factors(&mut rng, matrix.num_users(), k);
        let mut item_factors = init_factors(&mut rng, matrix.num_items(), k);

        for pass in 0..self.config.iterations {
            // Each half-pass reads only the opposite matrix as it stood at the
            // end of the previous half-pass; assembling the replacement matrix
            // from the solved rows is the synchronization barrier.
            user_factors = solve_half(matrix.user_rows(), &user_factors, &item_factors, lambda, alpha);
            item_factors = solve_half(matrix.item_columns(), &item_factors, &user_factors, lambda, alpha);

            if pass % 2 == 0 {
                let loss = reconstruction_loss(matrix, &user_factors, &item_factors);
                debug!(pass, loss, "ALS pass complete");
            }
        }

        info!(
            users = matrix.num_users(),
            items = matrix.num_items(),
            factors = k,
            iterations = self.config.iterations,
            "fitted ALS model"
        );

        self.user_factors = Some(user_factors);
        self.item_factors = Some(item_factors);
        Ok(())
    }

    fn factors(&self) -> Result<(&Array2<f32>, &Array2<f32>)> {
        match (&self.user_factors, &self.item_factors) {
            (Some(users), Some(items)) => Ok((users, items)),
            _ => Err(GameGuideError::NotFitted),
        }
    }

    /// Fitted user factor matrix (`num_users x factors`)
    pub fn user_factors(&self) -> Result<&Array2<f32>> {
        Ok(self.factors()?.0)
    }

    /// Fitted item factor matrix (`num_items x factors`)
    pub fn item_factors(&self) -> Result<&Array2<f32>> {
        Ok(self.factors()?.1)
    }

    /// Number of users covered by the fitted model
    pub fn num_users(&self) -> Result<usize> {
        Ok(self.factors()?.0.nrows())
    }

    /// Number of items covered by the fitted model
    pub fn num_items(&self) -> Result<usize> {
        Ok(self.factors()?.1.nrows())
    }

    /// Preference score: dot product of the user and item factor rows
    pub fn score(&self, user: usize, item: usize) -> Result<f32> {
        let (user_factors, item_factors) = self.factors()?;
        check_index(user, user_factors.nrows(), IndexKind::User)?;
        check_index(item, item_factors.nrows(), IndexKind::Item)?;
        Ok(user_factors.row(user).dot(&item_factors.row(item)))
    }

    /// Preference scores for every item index, in index order
    pub fn score_all(&self, user: usize) -> Result<Vec<ScoredItem>> {
        let (user_factors, item_factors) = self.factors()?;
        check_index(user, user_factors.nrows(), IndexKind::User)?;

        let user_row = user_factors.row(user);
        Ok((0..item_factors.nrows())
            .map(|item| ScoredItem {
                item,
                score: user_row.dot(&item_factors.row(item)),
            })
            .collect())
    }

    /// Cosine similarity between two item factor rows
    pub fn similarity(&self, item_a: usize, item_b: usize) -> Result<f32> {
        let (_, item_factors) = self.factors()?;
        check_index(item_a, item_factors.nrows(), IndexKind::Item)?;
        check_index(item_b, item_factors.nrows(), IndexKind::Item)?;

        let a = item_factors.row(item_a).to_vec();
        let b = item_factors.row(item_b).to_vec();
        Ok(cosine_similarity(&a, &b))
    }
}

enum IndexKind {
    User,
    Item,
}

fn check_index(index: usize, bound: usize, kind: IndexKind) -> Result<()> {
    if index < bound {
        return Ok(());
    }
    Err(match kind {
        IndexKind::User => GameGuideError::UnknownUser {
            index,
            num_users: bound,
        },
        IndexKind::Item => GameGuideError::UnknownItem {
            index,
            num_items: bound,
        },
    })
}

/// Small-magnitude uniform draws from the seeded generator
fn init_factors(rng: &mut StdRng, rows: usize, k: usize) -> Array2<f32> {
    let mut factors = Array2::<f32>::zeros((rows, k));
    for i in 0..rows {
        for j in 0..k {
            factors[[i, j]] = rng.gen_range(-0.1..0.1);
        }
    }
    factors
}

/// Solve every row of one factor matrix against the fixed opposite matrix
///
/// Row solves are independent and run as a rayon parallel-for. Rows with no
/// observed entries keep their previous values, as does the rare singular
/// system (possible only with zero regularization).
fn solve_half(
    rows: &[Vec<(usize, f32)>],
    previous: &Array2<f32>,
    fixed: &Array2<f32>,
    lambda: f64,
    alpha: f32,
) -> Array2<f32> {
    let k = fixed.ncols();

    let solved: Vec<Vec<f32>> = rows
        .par_iter()
        .enumerate()
        .map(|(row_idx, observed)| {
            if observed.is_empty() {
                return previous.row(row_idx).to_vec();
            }
            solve_row(observed, fixed, lambda, alpha)
                .unwrap_or_else(|| previous.row(row_idx).to_vec())
        })
        .collect();

    let mut next = Array2::<f32>::zeros((rows.len(), k));
    for (row_idx, row) in solved.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            next[[row_idx, j]] = value;
        }
    }
    next
}

/// Ridge-regression closed form over the observed entries of one row
///
/// Builds the confidence-weighted normal equations for a binary preference
/// signal: `A += c * v^T v`, `b += c * v` with `c = 1 + alpha * strength`,
/// then `A += lambda * I`. Returns `None` when the system is not positive
/// definite.
fn solve_row(
    observed: &[(usize, f32)],
    fixed: &Array2<f32>,
    lambda: f64,
    alpha: f32,
) -> Option<Vec<f32>> {
    let k = fixed.ncols();
    let mut a = Array2::<f64>::zeros((k, k));
    let mut b = Array1::<f64>::zeros(k);

    for &(other, strength) in observed {
        let v = fixed.row(other);
        let confidence = (1.0 + alpha * strength) as f64;

        for i in 0..k {
            let vi = v[i] as f64;
            b[i] += confidence * vi;
            for j in 0..k {
                a[[i, j]] += confidence * vi * v[j] as f64;
            }
        }
    }

    for i in 0..k {
        a[[i, i]] += lambda;
    }

    let x = cholesky_solve(&a, &b)?;
    Some(x.iter().map(|&value| value as f32).collect())
}

/// Solve `A x = b` for symmetric positive definite `A` via Cholesky decomposition
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();

    // Decompose A = L * L^T
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L * y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T * x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Mean squared error against the binary preference signal, observed entries only
fn reconstruction_loss(
    matrix: &InteractionMatrix,
    user_factors: &Array2<f32>,
    item_factors: &Array2<f32>,
) -> f32 {
    let mut loss = 0.0f32;
    let mut count = 0usize;

    for (user, row) in matrix.user_rows().iter().enumerate() {
        for &(item, _) in row {
            let prediction = user_factors.row(user).dot(&item_factors.row(item));
            loss += (1.0 - prediction) * (1.0 - prediction);
            count += 1;
        }
    }

    if count > 0 {
        loss / count as f32
    } else {
        0.0
    }
}
