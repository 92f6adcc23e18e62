//! Result ordering and the column toggle state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::row::PotionRow;

/// Column a result table can be ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "effect", rename_all = "snake_case")]
pub enum SortKey {
    /// The combination label.
    Ingredients,
    /// Magnitude of a desired effect.
    Magnitude(String),
    /// Duration of a desired effect.
    Duration(String),
}

impl SortKey {
    /// Order applied when this column is first selected.
    #[must_use]
    pub const fn default_order(&self) -> SortOrder {
        match self {
            Self::Ingredients => SortOrder::Ascending,
            Self::Magnitude(_) | Self::Duration(_) => SortOrder::Descending,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingredients => write!(f, "ingredients"),
            Self::Magnitude(effect) => write!(f, "mag:{effect}"),
            Self::Duration(effect) => write!(f, "dur:{effect}"),
        }
    }
}

/// A sort key string that is none of `ingredients`, `mag:<effect>` or
/// `dur:<effect>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key '{input}' (expected ingredients, mag:<effect> or dur:<effect>)")]
pub struct SortKeyError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SortKeyError { input: s.to_string() };
        if s == "ingredients" {
            return Ok(Self::Ingredients);
        }
        match s.split_once(':') {
            Some(("mag", effect)) if !effect.is_empty() => Ok(Self::Magnitude(effect.to_string())),
            Some(("dur", effect)) if !effect.is_empty() => Ok(Self::Duration(effect.to_string())),
            _ => Err(invalid()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Header marker for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortIndicator {
    /// Column is not the active sort.
    Unsorted,
    /// Active, largest first.
    Descending,
    /// Active, smallest first.
    Ascending,
}

impl SortIndicator {
    /// Glyph shown in the column header.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Unsorted => "▽",
            Self::Descending => "▼",
            Self::Ascending => "▲",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Active column.
    pub key: SortKey,
    /// Active direction.
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Ingredients,
            order: SortOrder::Ascending,
        }
    }
}

impl SortState {
    /// Creates a sort state.
    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Handles a header click on `key`: the active column flips direction,
    /// any other column becomes active with its default direction.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.reversed();
        } else {
            self.order = key.default_order();
            self.key = key;
        }
    }

    /// Marker for the header of `key`.
    #[must_use]
    pub fn indicator(&self, key: &SortKey) -> SortIndicator {
        if &self.key != key {
            return SortIndicator::Unsorted;
        }
        match self.order {
            SortOrder::Descending => SortIndicator::Descending,
            SortOrder::Ascending => SortIndicator::Ascending,
        }
    }
}

fn compare(key: &SortKey, a: &PotionRow, b: &PotionRow) -> Ordering {
    match key {
        SortKey::Ingredients => a.label.cmp(&b.label),
        SortKey::Magnitude(effect) => {
            let value = |r: &PotionRow| r.cell(effect).map_or(0.0, |c| c.magnitude);
            value(a).total_cmp(&value(b))
        }
        SortKey::Duration(effect) => {
            let value = |r: &PotionRow| r.cell(effect).map_or(0.0, |c| c.duration);
            value(a).total_cmp(&value(b))
        }
    }
}

/// Orders `rows` in place. The sort is stable: rows that compare equal
/// keep their relative order in either direction. A key naming an effect
/// the rows do not carry leaves them untouched.
pub fn sort_rows(rows: &mut [PotionRow], state: &SortState) {
    if let SortKey::Magnitude(effect) | SortKey::Duration(effect) = &state.key {
        if rows.first().is_some_and(|r| r.cell(effect).is_none()) {
            return;
        }
    }

    match state.order {
        SortOrder::Ascending => rows.sort_by(|a, b| compare(&state.key, a, b)),
        SortOrder::Descending => rows.sort_by(|a, b| compare(&state.key, b, a)),
    }
}
