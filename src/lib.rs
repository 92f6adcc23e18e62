//! # alchemist - Potion planning for crafting games
//!
//! alchemist answers the two questions a player asks at an alchemy table:
//! which effects do these ingredients make together, and which ingredients
//! should be combined to get these effects.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: a named item with effects, each with a magnitude and duration
//! - **Stacking rule**: an effect appears in a potion only if at least two of
//!   the combined ingredients produce it; the strongest magnitude and the
//!   longest duration win
//! - **Candidate**: a combination of 2–3 ingredients under evaluation
//! - **Catalog**: the loaded ingredient table plus its effect index
//!
//! ## Usage
//!
//! ```rust
//! use alchemist::{Catalog, IngredientEffectTable, SortState};
//!
//! let table = IngredientEffectTable::builder()
//!     .ingredient("Deathbell", [("Damage Health", 1.5, 0.0), ("Slow", 50.0, 5.0)])
//!     .ingredient("River Betty", [("Damage Health", 2.0, 0.0), ("Slow", 50.0, 5.0)])
//!     .build()?;
//! let catalog = Catalog::new(table);
//!
//! let potion = catalog.ingredients_effects(&["Deathbell", "River Betty"]);
//! assert_eq!(potion.len(), 2);
//!
//! let rows = catalog.find_potions(&["Slow"], &SortState::default());
//! assert_eq!(rows[0].label, "Deathbell + River Betty");
//! # Ok::<(), alchemist::DataError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod selection;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm_api;

// Re-export primary types at crate root for convenience
pub use catalog::Catalog;
pub use config::{OutputFormat, ToolConfig};
pub use data::{
    EffectMagnitudeDuration, Ingredient, IngredientEffectTable, IngredientMagnitudeDuration,
    MagnitudeDuration, TableBuilder,
};
pub use error::{AlchemyError, AlchemyResult, ConfigError, DataError, SelectionError};
pub use index::{build_index, EffectIndex};
pub use query::{
    effect_filter_options, ingredient_effects, ingredient_summary, ingredients_effects,
    remaining_effects, selectable_ingredients,
};
pub use search::{
    find_potions, potion_rows, search_candidates, sort_rows, Candidate, EffectCell, PotionRow,
    SortIndicator, SortKey, SortOrder, SortState,
};
pub use selection::Selection;
