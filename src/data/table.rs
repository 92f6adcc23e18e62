use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

use super::validation::validate_ingredient;

/// Strength of one effect on one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeDuration {
    /// Effect magnitude.
    pub magnitude: f64,
    /// Effect duration.
    pub duration: f64,
}

impl MagnitudeDuration {
    /// Creates a new magnitude/duration pair.
    #[must_use]
    pub const fn new(magnitude: f64, duration: f64) -> Self {
        Self {
            magnitude,
            duration,
        }
    }

    /// Keeps the strongest magnitude and the longest duration of both.
    #[must_use]
    pub fn strongest(self, other: Self) -> Self {
        Self {
            magnitude: self.magnitude.max(other.magnitude),
            duration: self.duration.max(other.duration),
        }
    }
}

/// An effect together with its strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectMagnitudeDuration {
    /// Effect name.
    pub effect: String,
    /// Effect magnitude.
    pub magnitude: f64,
    /// Effect duration.
    pub duration: f64,
}

/// An ingredient together with the strength of one of its effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMagnitudeDuration {
    /// Ingredient name.
    pub ingredient: String,
    /// Effect magnitude.
    pub magnitude: f64,
    /// Effect duration.
    pub duration: f64,
}

/// One ingredient row of the table: its name and its effects in
/// document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    name: String,
    effects: Vec<(String, MagnitudeDuration)>,
}

impl Ingredient {
    /// Ingredient name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effects of this ingredient in document order.
    pub fn effects(&self) -> impl Iterator<Item = (&str, MagnitudeDuration)> + '_ {
        self.effects.iter().map(|(e, md)| (e.as_str(), *md))
    }

    /// Strength of `effect` on this ingredient, if it has it.
    #[must_use]
    pub fn effect(&self, effect: &str) -> Option<MagnitudeDuration> {
        self.effects
            .iter()
            .find(|(e, _)| e == effect)
            .map(|(_, md)| *md)
    }

    /// Returns true if this ingredient produces `effect`.
    #[must_use]
    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.iter().any(|(e, _)| e == effect)
    }

    /// Number of effects.
    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub(crate) fn raw_effects(&self) -> &[(String, MagnitudeDuration)] {
        &self.effects
    }
}

/// The ingredient → effect → magnitude/duration table.
///
/// Ingredients and their effects keep the order they were defined in.
/// Lookup by name is constant time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientEffectTable {
    ingredients: Vec<Ingredient>,
    by_name: HashMap<String, usize>,
}

impl IngredientEffectTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a table in code.
    #[must_use]
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Builds a validated table from `(ingredient, effects)` entries.
    pub fn from_entries(
        entries: Vec<(String, Vec<(String, MagnitudeDuration)>)>,
    ) -> Result<Self, DataError> {
        let mut table = Self {
            ingredients: Vec::with_capacity(entries.len()),
            by_name: HashMap::with_capacity(entries.len()),
        };

        for (name, effects) in entries {
            validate_ingredient(&name, &effects)?;
            if table.by_name.contains_key(&name) {
                return Err(DataError::DuplicateIngredient { ingredient: name });
            }
            table.by_name.insert(name.clone(), table.ingredients.len());
            table.ingredients.push(Ingredient { name, effects });
        }

        Ok(table)
    }

    /// Looks up an ingredient by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.by_name.get(name).map(|&i| &self.ingredients[i])
    }

    /// Returns true if the table defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All ingredients in table order.
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Number of ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Returns true if the table has no ingredients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// BLAKE3 digest of the table contents, as lowercase hex.
    ///
    /// Hashes every ingredient name, then each of its effect names with the
    /// magnitude and duration as little-endian `f64` bytes, delimited by
    /// 0x1f/0x1e separators. Two tables with the same ingredients, effects,
    /// values and order have the same fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for ingredient in &self.ingredients {
            hasher.update(ingredient.name.as_bytes());
            hasher.update(&[0x1f]);
            for (effect, md) in &ingredient.effects {
                hasher.update(effect.as_bytes());
                hasher.update(&[0x1f]);
                hasher.update(&md.magnitude.to_le_bytes());
                hasher.update(&md.duration.to_le_bytes());
            }
            hasher.update(&[0x1e]);
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Fluent builder for [`IngredientEffectTable`].
///
/// # Example
/// ```
/// use alchemist::IngredientEffectTable;
///
/// let table = IngredientEffectTable::builder()
///     .ingredient("Wheat", [("Restore Health", 1.0, 0.0), ("Fortify Health", 4.0, 600.0)])
///     .ingredient("Blue Mountain Flower", [("Restore Health", 1.0, 0.0)])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    entries: Vec<(String, Vec<(String, MagnitudeDuration)>)>,
}

impl TableBuilder {
    /// Adds an ingredient with `(effect, magnitude, duration)` triples.
    #[must_use]
    pub fn ingredient<N, E, S>(mut self, name: N, effects: E) -> Self
    where
        N: Into<String>,
        E: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let effects = effects
            .into_iter()
            .map(|(e, magnitude, duration)| (e.into(), MagnitudeDuration::new(magnitude, duration)))
            .collect();
        self.entries.push((name.into(), effects));
        self
    }

    /// Validates and builds the table.
    pub fn build(self) -> Result<IngredientEffectTable, DataError> {
        IngredientEffectTable::from_entries(self.entries)
    }
}
