//! The loaded ingredient catalog.
//!
//! `Catalog` owns the table and its reverse index, built once at startup,
//! and exposes every query and search over them. It holds no interior
//! mutability, so it can be shared freely between readers.

use std::path::Path;

use crate::data::{EffectMagnitudeDuration, IngredientEffectTable};
use crate::error::AlchemyResult;
use crate::index::{build_index, EffectIndex};
use crate::query;
use crate::search::{self, Candidate, PotionRow, SortState};
use crate::selection::Selection;

/// Ingredient table plus its derived effect index.
#[derive(Debug, Clone)]
pub struct Catalog {
    table: IngredientEffectTable,
    index: EffectIndex,
    fingerprint: String,
}

impl Catalog {
    /// Indexes an already loaded table.
    #[must_use]
    pub fn new(table: IngredientEffectTable) -> Self {
        let index = build_index(&table);
        let fingerprint = table.fingerprint();
        tracing::info!(
            ingredients = table.len(),
            effects = index.len(),
            fingerprint = %fingerprint,
            "ingredient catalog loaded"
        );
        Self {
            table,
            index,
            fingerprint,
        }
    }

    /// Parses a JSON table and indexes it.
    pub fn from_json(s: &str) -> AlchemyResult<Self> {
        Ok(Self::new(IngredientEffectTable::from_json(s)?))
    }

    /// Reads a JSON table from `path` and indexes it.
    pub fn from_path(path: &Path) -> AlchemyResult<Self> {
        tracing::debug!(path = %path.display(), "reading ingredient data");
        let table = IngredientEffectTable::from_path(path).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to load ingredient data");
        })?;
        Ok(Self::new(table))
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &IngredientEffectTable {
        &self.table
    }

    /// The effect → ingredient index.
    #[must_use]
    pub fn index(&self) -> &EffectIndex {
        &self.index
    }

    /// BLAKE3 digest of the loaded table.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// See [`query::ingredient_effects`].
    #[must_use]
    pub fn ingredient_effects(&self, ingredient: &str) -> Vec<EffectMagnitudeDuration> {
        query::ingredient_effects(&self.table, ingredient)
    }

    /// See [`query::ingredients_effects`].
    #[must_use]
    pub fn ingredients_effects<S: AsRef<str>>(&self, ingredients: &[S]) -> Vec<EffectMagnitudeDuration> {
        query::ingredients_effects(&self.table, ingredients)
    }

    /// See [`query::selectable_ingredients`].
    #[must_use]
    pub fn selectable_ingredients<S: AsRef<str>>(
        &self,
        other_ingredients: &[S],
        effect_filter: &str,
    ) -> Vec<String> {
        query::selectable_ingredients(&self.table, other_ingredients, effect_filter)
    }

    /// See [`query::effect_filter_options`].
    #[must_use]
    pub fn effect_filter_options<S: AsRef<str>>(&self, other_ingredients: &[S]) -> Vec<String> {
        query::effect_filter_options(&self.table, &self.index, other_ingredients)
    }

    /// See [`query::remaining_effects`].
    #[must_use]
    pub fn remaining_effects<S: AsRef<str>>(&self, already_selected: &[S]) -> Vec<String> {
        query::remaining_effects(&self.index, already_selected)
    }

    /// See [`query::ingredient_summary`].
    #[must_use]
    pub fn ingredient_summary(&self, ingredient: &str) -> String {
        query::ingredient_summary(&self.table, ingredient)
    }

    /// Ingredient options for one slot of `selection`.
    #[must_use]
    pub fn slot_options(&self, selection: &Selection, slot: usize) -> Vec<String> {
        selection.options(&self.table, slot)
    }

    /// Potion brewed from `selection`, once two slots are filled.
    #[must_use]
    pub fn selection_potion(&self, selection: &Selection) -> Option<Vec<EffectMagnitudeDuration>> {
        selection.potion(&self.table)
    }

    /// Fills a fresh selection with `ingredients`, slot by slot, and brews it.
    ///
    /// Every ingredient must be one the slot offers, so unknown names,
    /// repeats and ingredients sharing no effect are rejected.
    pub fn brew<S: AsRef<str>>(&self, ingredients: &[S]) -> AlchemyResult<Vec<EffectMagnitudeDuration>> {
        let mut selection = Selection::new();
        for (slot, ingredient) in ingredients.iter().enumerate() {
            selection.choose(&self.table, slot, ingredient.as_ref())?;
        }
        Ok(self.selection_potion(&selection).unwrap_or_default())
    }

    /// See [`search::search_candidates`].
    #[must_use]
    pub fn search_candidates<S: AsRef<str>>(&self, desired_effects: &[S]) -> Vec<Candidate> {
        search::search_candidates(&self.index, desired_effects)
    }

    /// See [`search::find_potions`].
    #[must_use]
    pub fn find_potions<S: AsRef<str>>(&self, desired_effects: &[S], sort: &SortState) -> Vec<PotionRow> {
        search::find_potions(&self.table, &self.index, desired_effects, sort)
    }
}
