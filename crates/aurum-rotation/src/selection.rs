//! Combination selection: rotate categories deterministically, avoid
//! same-day category repeats and recently-used combinations.
//!
//! Pure in-memory logic, no I/O. Constraints hold in priority order:
//!
//! 1. the category must not have been used today — skipped only when every
//!    category has been used today;
//! 2. the combination key must not be in the recent history — when the
//!    eligible categories are history-saturated, the oldest matching
//!    entry is evicted and reused; when the *entire* usable space is in
//!    the history, the history is cleared (full-cycle reset);
//! 3. scanning starts at `last_sequence_number % category_count` so
//!    consecutive posts spread across categories; randomness is limited
//!    to shuffling within the already-eligible set.

use crate::state::RotationState;
use aurum_core::{AppError, Combination};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Catalog view handed to selection: ordered categories with the assets
/// that actually resolved on disk, plus the global variant/effect tables.
#[derive(Debug, Clone)]
pub struct SelectionCatalog {
    pub categories: Vec<SelectionCategory>,
    pub variants: Vec<String>,
    pub effects: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SelectionCategory {
    pub name: String,
    pub assets: Vec<String>,
}

impl SelectionCatalog {
    /// Total number of distinct combinations over usable assets.
    pub fn combination_space(&self) -> usize {
        let assets: usize = self.categories.iter().map(|c| c.assets.len()).sum();
        assets * self.variants.len() * self.effects.len()
    }

    fn has_usable_assets(&self) -> bool {
        !self.categories.is_empty()
            && self.categories.iter().any(|c| !c.assets.is_empty())
            && !self.variants.is_empty()
            && !self.effects.is_empty()
    }
}

/// Pick the next combination to post.
///
/// Mutates `state.used_combination_history` only in the saturation cases
/// described on the module. Fails with [`AppError::EmptyCatalog`] when no
/// category has a usable asset.
pub fn choose_combination(
    state: &mut RotationState,
    catalog: &SelectionCatalog,
    rng: &mut impl Rng,
) -> Result<Combination, AppError> {
    if !catalog.has_usable_assets() {
        return Err(AppError::EmptyCatalog);
    }

    // Deterministic starting point, then wrap around the ordered catalog.
    let total = catalog.categories.len();
    let start = state.last_sequence_number as usize % total;
    let rotated: Vec<usize> = (0..total).map(|i| (start + i) % total).collect();

    let usable: Vec<usize> = rotated
        .iter()
        .copied()
        .filter(|&i| !catalog.categories[i].assets.is_empty())
        .collect();
    let fresh: Vec<usize> = usable
        .iter()
        .copied()
        .filter(|&i| {
            !state
                .used_categories_today
                .contains(&catalog.categories[i].name)
        })
        .collect();

    // Category freshness is skipped only when no fresh category remains.
    let eligible = if fresh.is_empty() { &usable } else { &fresh };

    if let Some(combo) = scan(catalog, eligible, &state.used_combination_history, rng) {
        return Ok(combo);
    }

    // Every combination of the eligible categories sits in the history.
    if space_exhausted(catalog, &usable, &state.used_combination_history) {
        debug!(
            history = state.used_combination_history.len(),
            space = catalog.combination_space(),
            "combination space exhausted, clearing history"
        );
        state.used_combination_history.clear();
        return scan(catalog, eligible, &state.used_combination_history, rng)
            .ok_or(AppError::EmptyCatalog);
    }

    // Partial saturation: reuse the least-recent combination of an eligible
    // category, evicting its history entry.
    let eligible_names: Vec<&str> = eligible
        .iter()
        .map(|&i| catalog.categories[i].name.as_str())
        .collect();
    if let Some(pos) = state
        .used_combination_history
        .iter()
        .position(|key| matches_category(key, &eligible_names))
    {
        let key = state.used_combination_history.remove(pos);
        debug!(key = %key, "eligible categories saturated, reusing oldest combination");
        if let Some(combo) = parse_key(&key) {
            return Ok(combo);
        }
    }

    Err(AppError::EmptyCatalog)
}

/// Scan categories in the given order for a combination whose key is not
/// in `history`. Assets, variants, and effects are shuffled per category
/// so equally-eligible choices tie-break randomly.
fn scan(
    catalog: &SelectionCatalog,
    category_indices: &[usize],
    history: &[String],
    rng: &mut impl Rng,
) -> Option<Combination> {
    for &idx in category_indices {
        let category = &catalog.categories[idx];

        let mut assets = category.assets.clone();
        assets.shuffle(rng);
        let mut variants = catalog.variants.clone();
        variants.shuffle(rng);
        let mut effects = catalog.effects.clone();
        effects.shuffle(rng);

        for asset in &assets {
            for variant in &variants {
                for effect in &effects {
                    let candidate = Combination {
                        category: category.name.clone(),
                        asset: asset.clone(),
                        variant: variant.clone(),
                        effect: effect.clone(),
                    };
                    if !history.contains(&candidate.key()) {
                        return Some(candidate);
                    }
                }
            }
        }
    }
    None
}

/// Whether every combination over the usable categories is in `history`.
fn space_exhausted(
    catalog: &SelectionCatalog,
    usable_indices: &[usize],
    history: &[String],
) -> bool {
    usable_indices.iter().all(|&idx| {
        let category = &catalog.categories[idx];
        category.assets.iter().all(|asset| {
            catalog.variants.iter().all(|variant| {
                catalog.effects.iter().all(|effect| {
                    let key = format!("{}::{}::{}::{}", category.name, asset, variant, effect);
                    history.contains(&key)
                })
            })
        })
    })
}

fn matches_category(key: &str, names: &[&str]) -> bool {
    key.split("::")
        .next()
        .is_some_and(|category| names.contains(&category))
}

fn parse_key(key: &str) -> Option<Combination> {
    let parts: Vec<&str> = key.split("::").collect();
    if parts.len() != 4 {
        return None;
    }
    Some(Combination {
        category: parts[0].to_string(),
        asset: parts[1].to_string(),
        variant: parts[2].to_string(),
        effect: parts[3].to_string(),
    })
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
