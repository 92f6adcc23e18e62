//! Ingredient queries.
//!
//! Pure functions over the table and its index. Unknown ingredient or
//! effect names are never errors; they simply contribute nothing. Every
//! option list starts with an empty string, the "nothing selected" entry.

use std::collections::{HashMap, HashSet};

use crate::data::{format_amount, EffectMagnitudeDuration, IngredientEffectTable, MagnitudeDuration};
use crate::index::EffectIndex;

/// Number of ingredients that must share an effect for it to appear in a
/// potion.
pub const STACKING_THRESHOLD: usize = 2;

/// Effects of a single ingredient, in table order.
///
/// Returns an empty list for unknown ingredients.
#[must_use]
pub fn ingredient_effects(table: &IngredientEffectTable, ingredient: &str) -> Vec<EffectMagnitudeDuration> {
    table.get(ingredient).map_or_else(Vec::new, |i| {
        i.effects()
            .map(|(effect, md)| EffectMagnitudeDuration {
                effect: effect.to_string(),
                magnitude: md.magnitude,
                duration: md.duration,
            })
            .collect()
    })
}

/// Effects produced when `ingredients` are combined.
///
/// An effect is kept when at least [`STACKING_THRESHOLD`] of the
/// ingredients produce it; its magnitude and duration are the strongest
/// among them. Duplicates in `ingredients` count once per occurrence.
/// Results follow first-encounter order over a left-to-right scan.
#[must_use]
pub fn ingredients_effects<S: AsRef<str>>(
    table: &IngredientEffectTable,
    ingredients: &[S],
) -> Vec<EffectMagnitudeDuration> {
    let mut tally: Vec<(&str, usize, MagnitudeDuration)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for name in ingredients {
        let Some(ingredient) = table.get(name.as_ref()) else {
            continue;
        };
        for (effect, md) in ingredient.effects() {
            match position.get(effect) {
                Some(&at) => {
                    let entry = &mut tally[at];
                    entry.1 += 1;
                    entry.2 = entry.2.strongest(md);
                }
                None => {
                    position.insert(effect, tally.len());
                    tally.push((effect, 1, md));
                }
            }
        }
    }

    tally
        .into_iter()
        .filter(|(_, count, _)| *count >= STACKING_THRESHOLD)
        .map(|(effect, _, md)| EffectMagnitudeDuration {
            effect: effect.to_string(),
            magnitude: md.magnitude,
            duration: md.duration,
        })
        .collect()
}

/// Ingredients that can be picked next, given `other_ingredients` already
/// chosen.
///
/// With nothing chosen, every ingredient with at least one effect is
/// offered. Otherwise an ingredient is offered only if it shares an effect
/// with the chosen ones. A non-empty `effect_filter` further requires that
/// shared (or, for a first pick, owned) effect to be the filter. Already
/// chosen ingredients are never offered again.
#[must_use]
pub fn selectable_ingredients<S: AsRef<str>>(
    table: &IngredientEffectTable,
    other_ingredients: &[S],
    effect_filter: &str,
) -> Vec<String> {
    let chosen: HashSet<&str> = other_ingredients.iter().map(AsRef::as_ref).collect();
    let chosen_effects: HashSet<&str> = other_ingredients
        .iter()
        .filter_map(|name| table.get(name.as_ref()))
        .flat_map(|ingredient| ingredient.effects().map(|(e, _)| e))
        .collect();
    let first_pick = other_ingredients.is_empty();

    let mut options = vec![String::new()];
    for ingredient in table.ingredients() {
        if !first_pick && chosen.contains(ingredient.name()) {
            continue;
        }
        let selectable = ingredient
            .effects()
            .filter(|(effect, _)| effect_filter.is_empty() || *effect == effect_filter)
            .any(|(effect, _)| first_pick || chosen_effects.contains(effect));
        if selectable {
            options.push(ingredient.name().to_string());
        }
    }
    options
}

/// Effect filter choices for an ingredient slot.
///
/// With no other slots, every known effect is offered. Otherwise only the
/// effects that exactly one of `other_ingredients` produces are offered:
/// those are the effects one more ingredient would activate. The result is
/// sorted and starts with the empty "no filter" entry.
#[must_use]
pub fn effect_filter_options<S: AsRef<str>>(
    table: &IngredientEffectTable,
    index: &EffectIndex,
    other_ingredients: &[S],
) -> Vec<String> {
    let mut options: Vec<String> = if other_ingredients.is_empty() {
        index.effects().map(str::to_string).collect()
    } else {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for name in other_ingredients {
            let Some(ingredient) = table.get(name.as_ref()) else {
                continue;
            };
            for (effect, _) in ingredient.effects() {
                match counts.iter_mut().find(|(e, _)| *e == effect) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((effect, 1)),
                }
            }
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n == 1)
            .map(|(e, _)| e.to_string())
            .collect()
    };

    options.sort();
    options.insert(0, String::new());
    options
}

/// Effects still available for the next desired-effect picker: every known
/// effect not already selected, sorted, after the empty entry.
#[must_use]
pub fn remaining_effects<S: AsRef<str>>(index: &EffectIndex, already_selected: &[S]) -> Vec<String> {
    let selected: HashSet<&str> = already_selected.iter().map(AsRef::as_ref).collect();
    let mut options: Vec<String> = index
        .sorted_effects()
        .into_iter()
        .filter(|e| !selected.contains(e))
        .map(str::to_string)
        .collect();
    options.insert(0, String::new());
    options
}

/// One line per effect: `"<effect> (mag: <m>, dur: <d>)"`.
///
/// Used as the hover text of an ingredient option. Unknown ingredients give
/// an empty string.
#[must_use]
pub fn ingredient_summary(table: &IngredientEffectTable, ingredient: &str) -> String {
    ingredient_effects(table, ingredient)
        .iter()
        .map(|e| {
            format!(
                "{} (mag: {}, dur: {})",
                e.effect,
                format_amount(e.magnitude),
                format_amount(e.duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
