//! JSON loading and saving for the ingredient table.
//!
//! `serde_json::Map` does not keep document order without extra features,
//! so the table is read through order-preserving map visitors instead.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AlchemyResult, DataError};

use super::table::{IngredientEffectTable, MagnitudeDuration};

/// A JSON object read as key/value pairs in document order.
///
/// Repeated keys are kept here and rejected later by validation.
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V> Deserialize<'de> for OrderedEntries<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for EntriesVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object with string keys")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

type RawTable = OrderedEntries<OrderedEntries<MagnitudeDuration>>;

fn into_entries(raw: RawTable) -> Vec<(String, Vec<(String, MagnitudeDuration)>)> {
    raw.0
        .into_iter()
        .map(|(ingredient, effects)| (ingredient, effects.0))
        .collect()
}

impl<'de> Deserialize<'de> for IngredientEffectTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTable::deserialize(deserializer)?;
        IngredientEffectTable::from_entries(into_entries(raw)).map_err(serde::de::Error::custom)
    }
}

struct EffectsRef<'a>(&'a [(String, MagnitudeDuration)]);

impl Serialize for EffectsRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (effect, md) in self.0 {
            map.serialize_entry(effect, md)?;
        }
        map.end()
    }
}

impl Serialize for IngredientEffectTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for ingredient in self.ingredients() {
            map.serialize_entry(ingredient.name(), &EffectsRef(ingredient.raw_effects()))?;
        }
        map.end()
    }
}

impl IngredientEffectTable {
    /// Parses and validates a table from JSON.
    ///
    /// Shape errors are reported as [`DataError::Parse`]; content errors
    /// (blank names, duplicates, non-finite values) keep their own variant.
    pub fn from_json(s: &str) -> AlchemyResult<Self> {
        let raw: RawTable = serde_json::from_str(s).map_err(|e| DataError::Parse {
            message: e.to_string(),
        })?;
        Ok(Self::from_entries(into_entries(raw))?)
    }

    /// Reads and parses a table from a JSON file.
    pub fn from_path(path: &Path) -> AlchemyResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Serializes the table to pretty JSON, in table order.
    pub fn to_json_pretty(&self) -> AlchemyResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::AlchemyError::internal(format!("serialize table: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlchemyError;

    const DATA: &str = r#"{
        "Wheat": {
            "Restore Health": { "magnitude": 1, "duration": 0 },
            "Fortify Health": { "magnitude": 4, "duration": 600 }
        },
        "Blue Mountain Flower": {
            "Restore Health": { "magnitude": 1, "duration": 0 }
        },
        "Abecean Longfin": {}
    }"#;

    #[test]
    fn test_keeps_document_order() {
        let table = IngredientEffectTable::from_json(DATA).unwrap();
        let names: Vec<&str> = table.ingredients().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Wheat", "Blue Mountain Flower", "Abecean Longfin"]);
    }

    #[test]
    fn test_pretty_json_keeps_order() {
        let table = IngredientEffectTable::from_json(DATA).unwrap();
        let json = table.to_json_pretty().unwrap();
        let wheat = json.find("Wheat").unwrap();
        let flower = json.find("Blue Mountain Flower").unwrap();
        let longfin = json.find("Abecean Longfin").unwrap();
        assert!(wheat < flower && flower < longfin);

        let reparsed = IngredientEffectTable::from_json(&json).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = IngredientEffectTable::from_json("{ \"Wheat\": [1, 2] }").unwrap_err();
        assert!(matches!(err, AlchemyError::Data(DataError::Parse { .. })));

        let err = IngredientEffectTable::from_json("not json").unwrap_err();
        assert!(matches!(err, AlchemyError::Data(DataError::Parse { .. })));
    }

    #[test]
    fn test_missing_leaf_field_is_parse_error() {
        let err =
            IngredientEffectTable::from_json(r#"{ "Wheat": { "Restore Health": { "magnitude": 1 } } }"#)
                .unwrap_err();
        assert!(matches!(err, AlchemyError::Data(DataError::Parse { .. })));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = IngredientEffectTable::from_json(r#"{ "Wheat": {}, "Wheat": {} }"#).unwrap_err();
        assert!(matches!(
            err,
            AlchemyError::Data(DataError::DuplicateIngredient { .. })
        ));

        let err = IngredientEffectTable::from_json(
            r#"{ "Wheat": {
                "Restore Health": { "magnitude": 1, "duration": 0 },
                "Restore Health": { "magnitude": 2, "duration": 0 }
            } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, AlchemyError::Data(DataError::DuplicateEffect { .. })));
    }

    #[test]
    fn test_serde_deserialize_validates() {
        let err = serde_json::from_str::<IngredientEffectTable>(r#"{ "": {} }"#).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = IngredientEffectTable::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AlchemyError::Data(DataError::Io { .. })));
    }
}
