//! Ingredient selection context.
//!
//! The three ingredient slots a player fills in order. Changing a slot
//! clears every later slot, because later options depend on earlier picks.
//! Front ends own a `Selection` and pass it to the core explicitly.

use serde::{Deserialize, Serialize};

use crate::data::{EffectMagnitudeDuration, IngredientEffectTable};
use crate::error::SelectionError;
use crate::query::{ingredients_effects, selectable_ingredients, STACKING_THRESHOLD};
use crate::search::MAX_INGREDIENTS;

/// Three ordered ingredient slots, each with an optional effect filter.
///
/// Empty strings mean "nothing selected". A slot can only hold an
/// ingredient when every slot before it does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    slots: [String; MAX_INGREDIENTS],
    filters: [String; MAX_INGREDIENTS],
}

fn check_slot(slot: usize) -> Result<(), SelectionError> {
    if slot >= MAX_INGREDIENTS {
        return Err(SelectionError::NoSuchSlot {
            slot,
            max: MAX_INGREDIENTS,
        });
    }
    Ok(())
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `ingredient` into `slot` and clears every later slot.
    ///
    /// An empty `ingredient` is the same as [`Selection::clear`]. An
    /// ingredient already in an earlier slot is rejected.
    pub fn set(&mut self, slot: usize, ingredient: impl Into<String>) -> Result<(), SelectionError> {
        check_slot(slot)?;
        let ingredient = ingredient.into();
        if ingredient.is_empty() {
            return self.clear(slot);
        }
        self.check_placement(slot, &ingredient)?;
        self.slots[slot] = ingredient;
        self.clear_after(slot);
        Ok(())
    }

    /// Like [`Selection::set`], but only accepts an ingredient that
    /// [`Selection::options`] offers for `slot`.
    pub fn choose(
        &mut self,
        table: &IngredientEffectTable,
        slot: usize,
        ingredient: impl Into<String>,
    ) -> Result<(), SelectionError> {
        let ingredient = ingredient.into();
        if ingredient.is_empty() {
            return self.clear(slot);
        }
        check_slot(slot)?;
        if !self.options(table, slot).contains(&ingredient) {
            // Report the more specific reason when there is one.
            self.check_placement(slot, &ingredient)?;
            return Err(SelectionError::NotSelectable { slot, ingredient });
        }
        self.set(slot, ingredient)
    }

    fn check_placement(&self, slot: usize, ingredient: &str) -> Result<(), SelectionError> {
        if let Some(missing) = self.slots[..slot].iter().position(String::is_empty) {
            return Err(SelectionError::SlotOutOfOrder { slot, missing });
        }
        if let Some(existing) = self.slots[..slot].iter().position(|s| s == ingredient) {
            return Err(SelectionError::DuplicateIngredient {
                slot,
                existing,
                ingredient: ingredient.to_string(),
            });
        }
        Ok(())
    }

    /// Empties `slot` and every later slot.
    pub fn clear(&mut self, slot: usize) -> Result<(), SelectionError> {
        check_slot(slot)?;
        self.slots[slot].clear();
        self.clear_after(slot);
        Ok(())
    }

    fn clear_after(&mut self, slot: usize) {
        for later in &mut self.slots[slot + 1..] {
            later.clear();
        }
    }

    /// Sets the effect filter of `slot`. An empty string removes it.
    pub fn set_filter(&mut self, slot: usize, effect: impl Into<String>) -> Result<(), SelectionError> {
        check_slot(slot)?;
        self.filters[slot] = effect.into();
        Ok(())
    }

    /// Ingredient in `slot`, or `""`.
    #[must_use]
    pub fn get(&self, slot: usize) -> &str {
        self.slots.get(slot).map_or("", String::as_str)
    }

    /// Effect filter applied to `slot`'s options.
    ///
    /// A filled slot has no active filter: the filter only narrows what can
    /// be picked.
    #[must_use]
    pub fn filter(&self, slot: usize) -> &str {
        if !self.get(slot).is_empty() {
            return "";
        }
        self.filters.get(slot).map_or("", String::as_str)
    }

    /// Ingredients in the slots before `slot`.
    #[must_use]
    pub fn others(&self, slot: usize) -> &[String] {
        &self.slots[..slot.min(MAX_INGREDIENTS)]
    }

    /// Returns true if every slot before `slot` is filled.
    #[must_use]
    pub fn is_slot_open(&self, slot: usize) -> bool {
        slot < MAX_INGREDIENTS && self.others(slot).iter().all(|s| !s.is_empty())
    }

    /// Filled slots in order.
    pub fn filled(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Ingredients that can go into `slot`, after the empty entry.
    ///
    /// A slot that is not yet open only offers the empty entry.
    #[must_use]
    pub fn options(&self, table: &IngredientEffectTable, slot: usize) -> Vec<String> {
        if !self.is_slot_open(slot) {
            return vec![String::new()];
        }
        selectable_ingredients(table, self.others(slot), self.filter(slot))
    }

    /// Effects of the brewed potion, once enough slots are filled.
    #[must_use]
    pub fn potion(&self, table: &IngredientEffectTable) -> Option<Vec<EffectMagnitudeDuration>> {
        let filled: Vec<&str> = self.filled().collect();
        if filled.len() < STACKING_THRESHOLD {
            return None;
        }
        Some(ingredients_effects(table, &filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IngredientEffectTable {
        IngredientEffectTable::builder()
            .ingredient("Wheat", [("Restore Health", 1.0, 0.0), ("Fortify Health", 4.0, 600.0)])
            .ingredient("Blue Mountain Flower", [("Restore Health", 2.0, 0.0)])
            .ingredient("Giant's Toe", [("Fortify Health", 4.0, 300.0)])
            .ingredient("Deathbell", [("Slow", 50.0, 5.0)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_setting_earlier_slot_clears_later_ones() {
        let mut sel = Selection::new();
        sel.set(0, "Wheat").unwrap();
        sel.set(1, "Blue Mountain Flower").unwrap();
        sel.set(2, "Giant's Toe").unwrap();

        sel.set(1, "Giant's Toe").unwrap();
        assert_eq!(sel.get(1), "Giant's Toe");
        assert_eq!(sel.get(2), "");

        sel.set(0, "Deathbell").unwrap();
        assert_eq!(sel.filled().count(), 1);
    }

    #[test]
    fn test_clear_cascades() {
        let mut sel = Selection::new();
        sel.set(0, "Wheat").unwrap();
        sel.set(1, "Giant's Toe").unwrap();
        sel.clear(0).unwrap();
        assert_eq!(sel, Selection::new());
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut sel = Selection::new();
        let err = sel.set(2, "Wheat").unwrap_err();
        assert_eq!(err, SelectionError::SlotOutOfOrder { slot: 2, missing: 0 });

        let err = sel.set(3, "Wheat").unwrap_err();
        assert_eq!(err, SelectionError::NoSuchSlot { slot: 3, max: 3 });
    }

    #[test]
    fn test_same_ingredient_twice_rejected() {
        let table = table();
        let mut sel = Selection::new();
        sel.set(0, "Wheat").unwrap();

        let err = sel.set(1, "Wheat").unwrap_err();
        assert_eq!(
            err,
            SelectionError::DuplicateIngredient {
                slot: 1,
                existing: 0,
                ingredient: "Wheat".to_string()
            }
        );
        assert_eq!(sel.get(1), "");
        assert!(sel.potion(&table).is_none());
    }

    #[test]
    fn test_choose_only_accepts_offered_ingredients() {
        let table = table();
        let mut sel = Selection::new();
        sel.choose(&table, 0, "Wheat").unwrap();

        // Deathbell shares no effect with Wheat.
        let err = sel.choose(&table, 1, "Deathbell").unwrap_err();
        assert!(matches!(err, SelectionError::NotSelectable { slot: 1, .. }));
        let err = sel.choose(&table, 1, "Nightshade").unwrap_err();
        assert!(matches!(err, SelectionError::NotSelectable { slot: 1, .. }));
        let err = sel.choose(&table, 1, "Wheat").unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateIngredient { existing: 0, .. }));
        let err = sel.choose(&table, 2, "Giant's Toe").unwrap_err();
        assert_eq!(err, SelectionError::SlotOutOfOrder { slot: 2, missing: 1 });

        sel.choose(&table, 1, "Giant's Toe").unwrap();
        assert_eq!(sel.filled().collect::<Vec<_>>(), vec!["Wheat", "Giant's Toe"]);

        sel.choose(&table, 1, "").unwrap();
        assert_eq!(sel.filled().count(), 1);
    }

    #[test]
    fn test_slot_openness() {
        let mut sel = Selection::new();
        assert!(sel.is_slot_open(0));
        assert!(!sel.is_slot_open(1));
        sel.set(0, "Wheat").unwrap();
        assert!(sel.is_slot_open(1));
        assert!(!sel.is_slot_open(2));
        assert!(!sel.is_slot_open(3));
    }

    #[test]
    fn test_options_follow_earlier_slots() {
        let table = table();
        let mut sel = Selection::new();
        assert_eq!(sel.options(&table, 1), vec![""]);

        sel.set(0, "Wheat").unwrap();
        assert_eq!(sel.options(&table, 1), vec!["", "Blue Mountain Flower", "Giant's Toe"]);

        sel.set_filter(1, "Fortify Health").unwrap();
        assert_eq!(sel.options(&table, 1), vec!["", "Giant's Toe"]);
    }

    #[test]
    fn test_filter_ignored_once_slot_is_filled() {
        let mut sel = Selection::new();
        sel.set_filter(0, "Slow").unwrap();
        assert_eq!(sel.filter(0), "Slow");
        sel.set(0, "Wheat").unwrap();
        assert_eq!(sel.filter(0), "");
    }

    #[test]
    fn test_potion_needs_two_ingredients() {
        let table = table();
        let mut sel = Selection::new();
        sel.set(0, "Wheat").unwrap();
        assert!(sel.potion(&table).is_none());

        sel.set(1, "Blue Mountain Flower").unwrap();
        let potion = sel.potion(&table).unwrap();
        assert_eq!(potion.len(), 1);
        assert_eq!(potion[0].effect, "Restore Health");
        assert_eq!(potion[0].magnitude, 2.0);
    }
}
