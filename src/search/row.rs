//! Display rows for search results.

use serde::{Deserialize, Serialize};

use crate::data::IngredientEffectTable;

use super::candidate::Candidate;

/// Strength of one desired effect in a combination, with the ingredient
/// that reached each maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectCell {
    /// Effect name.
    pub effect: String,
    /// Strongest magnitude among the members producing the effect.
    pub magnitude: f64,
    /// Longest duration among the members producing the effect.
    pub duration: f64,

    /// Member that reached `magnitude`; `None` if no member exceeded zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude_from: Option<String>,

    /// Member that reached `duration`; `None` if no member exceeded zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_from: Option<String>,
}

impl EffectCell {
    /// Hover text for the magnitude column, e.g. `"Slow magnitude (Deathbell)"`.
    #[must_use]
    pub fn magnitude_title(&self) -> String {
        format!(
            "{} magnitude ({})",
            self.effect,
            self.magnitude_from.as_deref().unwrap_or_default()
        )
    }

    /// Hover text for the duration column.
    #[must_use]
    pub fn duration_title(&self) -> String {
        format!(
            "{} duration ({})",
            self.effect,
            self.duration_from.as_deref().unwrap_or_default()
        )
    }
}

/// One result row: a combination and the strength of every desired effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotionRow {
    /// Member ingredients in combination order.
    pub ingredients: Vec<String>,
    /// Members joined with `" + "`.
    pub label: String,
    /// One cell per desired effect, in desired order.
    pub effects: Vec<EffectCell>,
}

impl PotionRow {
    /// Cell for `effect`, if it was one of the desired effects.
    #[must_use]
    pub fn cell(&self, effect: &str) -> Option<&EffectCell> {
        self.effects.iter().find(|c| c.effect == effect)
    }
}

fn effect_cell(table: &IngredientEffectTable, candidate: &Candidate, effect: &str) -> EffectCell {
    let mut cell = EffectCell {
        effect: effect.to_string(),
        magnitude: 0.0,
        duration: 0.0,
        magnitude_from: None,
        duration_from: None,
    };

    for name in candidate.ingredients() {
        let Some(md) = table.get(name).and_then(|i| i.effect(effect)) else {
            continue;
        };
        if md.magnitude > cell.magnitude {
            cell.magnitude = md.magnitude;
            cell.magnitude_from = Some(name.to_string());
        }
        if md.duration > cell.duration {
            cell.duration = md.duration;
            cell.duration_from = Some(name.to_string());
        }
    }
    cell
}

/// Shapes candidates into display rows.
///
/// Each cell takes the strongest magnitude and duration among the members
/// that produce the effect, as the game does when the potion is brewed.
#[must_use]
pub fn potion_rows<S: AsRef<str>>(
    table: &IngredientEffectTable,
    candidates: &[Candidate],
    desired_effects: &[S],
) -> Vec<PotionRow> {
    candidates
        .iter()
        .map(|candidate| PotionRow {
            ingredients: candidate.ingredients().map(str::to_string).collect(),
            label: candidate.label(),
            effects: desired_effects
                .iter()
                .map(|effect| effect_cell(table, candidate, effect.as_ref()))
                .collect(),
        })
        .collect()
}
