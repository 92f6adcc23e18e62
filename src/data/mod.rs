//! The static ingredient table.
//!
//! The table is the single source of truth for every derived structure.
//! It is loaded once from a JSON document of the shape
//! `ingredient -> effect -> {magnitude, duration}` and never mutated
//! afterwards. Document order is preserved because option lists and the
//! effect index follow it.

mod serialization;
mod table;
mod validation;

pub use table::{
    EffectMagnitudeDuration, Ingredient, IngredientEffectTable, IngredientMagnitudeDuration,
    MagnitudeDuration, TableBuilder,
};
pub use validation::MAX_NAME_LEN;

/// Formats a magnitude or duration the way the game data presents it.
///
/// Integral values print without a fractional part (`25`, not `25.0`).
#[must_use]
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
