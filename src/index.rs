//! Effect → ingredient reverse index.
//!
//! Derived once from the [`IngredientEffectTable`] and never mutated.
//! Every effect lists its producers in table order, which is the order the
//! candidate search seeds pairs in.

use std::collections::HashMap;

use crate::data::{IngredientEffectTable, IngredientMagnitudeDuration};

/// Reverse index from effect name to the ingredients that produce it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectIndex {
    /// Effects in first-encounter order.
    order: Vec<String>,
    producers: HashMap<String, Vec<IngredientMagnitudeDuration>>,
}

/// Builds the reverse index of `table`.
///
/// For every ingredient (in table order) and every effect it has, an
/// [`IngredientMagnitudeDuration`] is appended to that effect's list.
#[must_use]
pub fn build_index(table: &IngredientEffectTable) -> EffectIndex {
    let mut index = EffectIndex::default();
    for ingredient in table.ingredients() {
        for (effect, md) in ingredient.effects() {
            if !index.producers.contains_key(effect) {
                index.order.push(effect.to_string());
            }
            index.producers.entry(effect.to_string()).or_default().push(IngredientMagnitudeDuration {
                ingredient: ingredient.name().to_string(),
                magnitude: md.magnitude,
                duration: md.duration,
            });
        }
    }
    index
}

impl EffectIndex {
    /// Ingredients producing `effect`, in table order.
    ///
    /// Unknown effects have no producers.
    #[must_use]
    pub fn ingredients_for(&self, effect: &str) -> &[IngredientMagnitudeDuration] {
        self.producers.get(effect).map_or(&[], Vec::as_slice)
    }

    /// Returns true if at least one ingredient produces `effect`.
    #[must_use]
    pub fn contains(&self, effect: &str) -> bool {
        self.producers.contains_key(effect)
    }

    /// Known effects in the order they were first seen in the table.
    pub fn effects(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Known effects, sorted by name.
    #[must_use]
    pub fn sorted_effects(&self) -> Vec<&str> {
        let mut effects: Vec<&str> = self.effects().collect();
        effects.sort_unstable();
        effects
    }

    /// Number of distinct effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no effects are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IngredientEffectTable {
        IngredientEffectTable::builder()
            .ingredient("Wheat", [("Restore Health", 1.0, 0.0), ("Fortify Health", 4.0, 600.0)])
            .ingredient("Giant's Toe", [("Fortify Health", 4.0, 300.0), ("Damage Stamina", 1.0, 0.0)])
            .ingredient("Blue Mountain Flower", [("Restore Health", 2.0, 0.0)])
            .ingredient("Pebble", Vec::<(&str, f64, f64)>::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_index_lists_producers_in_table_order() {
        let index = build_index(&table());
        let names: Vec<&str> = index
            .ingredients_for("Restore Health")
            .iter()
            .map(|imd| imd.ingredient.as_str())
            .collect();
        assert_eq!(names, vec!["Wheat", "Blue Mountain Flower"]);
    }

    #[test]
    fn test_index_is_inverse_of_table() {
        let table = table();
        let index = build_index(&table);

        for ingredient in table.ingredients() {
            for (effect, md) in ingredient.effects() {
                let hits: Vec<_> = index
                    .ingredients_for(effect)
                    .iter()
                    .filter(|imd| imd.ingredient == ingredient.name())
                    .collect();
                assert_eq!(hits.len(), 1);
                assert_eq!(hits[0].magnitude, md.magnitude);
                assert_eq!(hits[0].duration, md.duration);
            }
        }

        for effect in index.effects() {
            for imd in index.ingredients_for(effect) {
                let md = table.get(&imd.ingredient).and_then(|i| i.effect(effect)).unwrap();
                assert_eq!((md.magnitude, md.duration), (imd.magnitude, imd.duration));
            }
        }
    }

    #[test]
    fn test_effect_order() {
        let index = build_index(&table());
        let first_seen: Vec<&str> = index.effects().collect();
        assert_eq!(first_seen, vec!["Restore Health", "Fortify Health", "Damage Stamina"]);
        assert_eq!(
            index.sorted_effects(),
            vec!["Damage Stamina", "Fortify Health", "Restore Health"]
        );
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_unknown_effect_has_no_producers() {
        let index = build_index(&table());
        assert!(index.ingredients_for("Waterbreathing").is_empty());
        assert!(!index.contains("Waterbreathing"));
    }

    #[test]
    fn test_empty_table_gives_empty_index() {
        let index = build_index(&IngredientEffectTable::new());
        assert!(index.is_empty());
    }
}
