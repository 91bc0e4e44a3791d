use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One row of a module's example table.
///
/// Row shapes differ between modules (`subject`/`verb`/`complement`/`example`,
/// `en`/`tr`, ...), so a row is an ordered list of field name to text pairs.
/// Field order is kept as written so tables render in their authored column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRow {
    fields: Vec<(String, String)>,
}

impl ExampleRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, keeping its position if it already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names, order-insensitive
    pub fn key_set(&self) -> BTreeSet<&str> {
        self.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ExampleRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = ExampleRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for ExampleRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = ExampleRow;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table row object with string fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(access.size_hint().unwrap_or(0));

        while let Some((key, value)) = access.next_entry::<String, String>()? {
            if fields.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate field `{key}` in table row")));
            }
            fields.push((key, value));
        }

        Ok(ExampleRow { fields })
    }
}

impl<'de> Deserialize<'de> for ExampleRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_authored_column_order() {
        let json = r#"{"subject":"I","verb":"am","complement":"a teacher","example":"I am a teacher."}"#;
        let row: ExampleRow = serde_json::from_str(json).unwrap();

        assert_eq!(
            row.keys().collect::<Vec<_>>(),
            vec!["subject", "verb", "complement", "example"]
        );
        assert_eq!(serde_json::to_string(&row).unwrap(), json);
    }

    #[test]
    fn rejects_non_string_values_and_repeated_keys() {
        assert!(serde_json::from_str::<ExampleRow>(r#"{"en":1}"#).is_err());
        assert!(serde_json::from_str::<ExampleRow>(r#"{"en":"a","en":"b"}"#).is_err());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut row = ExampleRow::new().with("en", "price").with("tr", "fiyat");
        assert_eq!(row.insert("en", "cost"), Some("price".to_string()));
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![("en", "cost"), ("tr", "fiyat")]);
    }

    #[test]
    fn key_set_ignores_order() {
        let a = ExampleRow::new().with("en", "x").with("tr", "y");
        let b = ExampleRow::new().with("tr", "y").with("en", "x");
        assert_eq!(a.key_set(), b.key_set());
        assert_ne!(a, b);
    }
}
