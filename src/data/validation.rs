//! Table validation.
//!
//! Serde checks the document shape; these checks cover what the shape
//! cannot express. They run for every table, whether it came from JSON or
//! from a [`super::TableBuilder`].

use std::collections::HashSet;

use crate::error::DataError;

use super::table::MagnitudeDuration;

/// Upper bound for ingredient and effect names.
pub const MAX_NAME_LEN: usize = 256;

/// Validate a non-empty trimmed name.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<(), DataError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DataError::EmptyName { kind });
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(DataError::NameTooLong {
            kind,
            name: name.to_string(),
            max_length: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn validate_amount(
    ingredient: &str,
    effect: &str,
    field: &'static str,
    value: f64,
) -> Result<(), DataError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(DataError::NonFiniteValue {
        ingredient: ingredient.to_string(),
        effect: effect.to_string(),
        field,
    })
}

/// Validate one ingredient entry: its name, its effect names, and the
/// magnitude/duration of every effect. Duplicate effects are rejected.
pub(crate) fn validate_ingredient(
    name: &str,
    effects: &[(String, MagnitudeDuration)],
) -> Result<(), DataError> {
    validate_name("Ingredient", name)?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(effects.len());
    for (effect, md) in effects {
        validate_name("Effect", effect)?;
        if !seen.insert(effect.as_str()) {
            return Err(DataError::DuplicateEffect {
                ingredient: name.to_string(),
                effect: effect.clone(),
            });
        }
        validate_amount(name, effect, "magnitude", md.magnitude)?;
        validate_amount(name, effect, "duration", md.duration)?;
    }
    Ok(())
}
