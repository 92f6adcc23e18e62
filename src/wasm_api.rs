//! WASM-facing API for browser integration.
//!
//! This module wraps a [`Catalog`] so JavaScript can:
//! - load the ingredient table once
//! - ask for option lists and potion effects
//! - run the effects → ingredients search
//!
//! Arguments and results cross the boundary as plain JS values.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::search::SortState;

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("invalid {what}: {e}")))
}

fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("{what} encode failed: {e}")))
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/// Browser-exposed catalog handle.
#[wasm_bindgen]
pub struct WasmCatalog {
    catalog: Catalog,
}

#[wasm_bindgen]
impl WasmCatalog {
    /// Load the catalog from the ingredient table JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(data_json: &str) -> Result<WasmCatalog, JsValue> {
        let catalog = Catalog::from_json(data_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { catalog })
    }

    #[wasm_bindgen(js_name = fingerprint)]
    pub fn fingerprint(&self) -> String {
        self.catalog.fingerprint().to_string()
    }

    #[wasm_bindgen(js_name = ingredientEffects)]
    pub fn ingredient_effects(&self, ingredient: &str) -> Result<JsValue, JsValue> {
        to_js(&self.catalog.ingredient_effects(ingredient), "ingredientEffects")
    }

    #[wasm_bindgen(js_name = potionEffects)]
    pub fn potion_effects(&self, ingredients: JsValue) -> Result<JsValue, JsValue> {
        let ingredients: Vec<String> = from_js(ingredients, "ingredients")?;
        to_js(&self.catalog.ingredients_effects(&ingredients), "potionEffects")
    }

    #[wasm_bindgen(js_name = selectableIngredients)]
    pub fn selectable_ingredients(&self, other_ingredients: JsValue, effect_filter: &str) -> Result<JsValue, JsValue> {
        let others: Vec<String> = from_js(other_ingredients, "other_ingredients")?;
        to_js(
            &self.catalog.selectable_ingredients(&others, effect_filter),
            "selectableIngredients",
        )
    }

    #[wasm_bindgen(js_name = effectFilterOptions)]
    pub fn effect_filter_options(&self, other_ingredients: JsValue) -> Result<JsValue, JsValue> {
        let others: Vec<String> = from_js(other_ingredients, "other_ingredients")?;
        to_js(&self.catalog.effect_filter_options(&others), "effectFilterOptions")
    }

    #[wasm_bindgen(js_name = remainingEffects)]
    pub fn remaining_effects(&self, already_selected: JsValue) -> Result<JsValue, JsValue> {
        let selected: Vec<String> = from_js(already_selected, "already_selected")?;
        to_js(&self.catalog.remaining_effects(&selected), "remainingEffects")
    }

    #[wasm_bindgen(js_name = ingredientSummary)]
    pub fn ingredient_summary(&self, ingredient: &str) -> String {
        self.catalog.ingredient_summary(ingredient)
    }

    /// Search for combinations; `sort` is a `SortState` object or `undefined`.
    #[wasm_bindgen(js_name = findPotions)]
    pub fn find_potions(&self, desired_effects: JsValue, sort: JsValue) -> Result<JsValue, JsValue> {
        let effects: Vec<String> = from_js(desired_effects, "desired_effects")?;
        let sort: SortState = if sort.is_undefined() || sort.is_null() {
            SortState::default()
        } else {
            from_js(sort, "sort")?
        };
        to_js(&self.catalog.find_potions(&effects, &sort), "findPotions")
    }
}
