//! Candidate search: from desired effects to ingredient combinations.
//!
//! [`search_candidates`] produces the combinations, [`potion_rows`] shapes
//! them for display and [`sort_rows`] orders the rows. [`find_potions`]
//! runs all three.

mod candidate;
mod engine;
mod row;
mod sort;

pub use candidate::{Candidate, Member, MAX_INGREDIENTS};
pub use engine::search_candidates;
pub use row::{potion_rows, EffectCell, PotionRow};
pub use sort::{sort_rows, SortIndicator, SortKey, SortKeyError, SortOrder, SortState};

use crate::data::IngredientEffectTable;
use crate::index::EffectIndex;

/// Searches, shapes and sorts in one call.
#[must_use]
pub fn find_potions<S: AsRef<str>>(
    table: &IngredientEffectTable,
    index: &EffectIndex,
    desired_effects: &[S],
    sort: &SortState,
) -> Vec<PotionRow> {
    let candidates = search_candidates(index, desired_effects);
    let mut rows = potion_rows(table, &candidates, desired_effects);
    sort_rows(&mut rows, sort);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;

    #[test]
    fn test_find_potions_sorted_by_magnitude() {
        let table = IngredientEffectTable::builder()
            .ingredient("A", [("X", 1.0, 1.0)])
            .ingredient("B", [("X", 2.0, 1.0)])
            .ingredient("C", [("X", 1.0, 2.0)])
            .build()
            .unwrap();
        let index = build_index(&table);

        let rows = find_potions(
            &table,
            &index,
            &["X"],
            &SortState::new(SortKey::Magnitude("X".into()), SortOrder::Descending),
        );
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A + B", "B + C", "A + C"]);
    }

    #[test]
    fn test_find_potions_without_effects() {
        let table = IngredientEffectTable::new();
        let index = build_index(&table);
        assert!(find_potions::<&str>(&table, &index, &[], &SortState::default()).is_empty());
    }
}
