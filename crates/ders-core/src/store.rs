use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use ders_types::{LessonModule, Level, ModuleId};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ContentError;

/// Read access to a catalogue of lesson modules
pub trait ContentStore: Send + Sync {
    /// Module by number
    fn get(&self, id: ModuleId) -> Option<&LessonModule>;

    /// All module numbers, ascending
    fn ids(&self) -> Vec<ModuleId>;

    /// Store metadata
    fn metadata(&self) -> StoreMetadata;

    fn contains(&self, id: ModuleId) -> bool {
        self.get(id).is_some()
    }

    fn len(&self) -> usize {
        self.ids().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like `get`, but a miss is an error
    fn require(&self, id: ModuleId) -> Result<&LessonModule, ContentError> {
        self.get(id).ok_or(ContentError::NotFound(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreMetadata {
    pub name: String,
    /// Taught language and explanation language, e.g. "en-tr"
    pub language: String,
    pub module_count: usize,
}

/// In-memory catalogue keyed by module number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonStore {
    name: String,
    language: String,
    modules: BTreeMap<ModuleId, LessonModule>,
}

impl Default for LessonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LessonStore {
    pub fn new() -> Self {
        Self::named("lessons", "en")
    }

    pub fn named(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            modules: BTreeMap::new(),
        }
    }

    /// Parse a catalogue document: a JSON object keyed by module number.
    ///
    /// Keys must be positive integers and may appear only once.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut store = Self::new();
        store.extend_from_json(json)?;
        Ok(store)
    }

    /// Add every module of a catalogue document, failing on any number
    /// already present. Nothing is added unless the whole document is valid.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, ContentError> {
        let CatalogueEntries(entries) = serde_json::from_str(json)?;

        let mut staged = BTreeMap::new();
        for (key, module) in entries {
            let id = document_key(&key)?;
            if self.modules.contains_key(&id) || staged.insert(id, module).is_some() {
                return Err(ContentError::DuplicateModule(id));
            }
        }

        let count = staged.len();
        self.modules.append(&mut staged);
        Ok(count)
    }

    /// Register a new module. Module numbers are unique.
    pub fn insert(&mut self, id: ModuleId, module: LessonModule) -> Result<(), ContentError> {
        match self.modules.entry(id) {
            Entry::Occupied(_) => Err(ContentError::DuplicateModule(id)),
            Entry::Vacant(slot) => {
                slot.insert(module);
                Ok(())
            }
        }
    }

    /// Register or replace a module, returning the replaced one
    pub fn register(&mut self, id: ModuleId, module: LessonModule) -> Option<LessonModule> {
        tracing::debug!("Registering module {}", id);
        self.modules.insert(id, module)
    }

    /// Merge another store into this one.
    /// Modules from `other` with the same number replace existing ones.
    pub fn merge(mut self, other: LessonStore) -> Self {
        for (id, module) in other.modules {
            if self.modules.insert(id, module).is_some() {
                tracing::warn!("Module {} overridden by {}", id, other.name);
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &LessonModule)> {
        self.modules.iter().map(|(id, m)| (*id, m))
    }

    /// Modules whose numbers fall in a level's block, ascending
    pub fn modules_in(&self, level: Level) -> impl Iterator<Item = (ModuleId, &LessonModule)> {
        self.iter().filter(move |(id, _)| level.contains(*id))
    }

    /// New store holding only the modules of one level
    pub fn level_subset(&self, level: Level) -> LessonStore {
        LessonStore {
            name: format!("{} {}", self.name, level),
            language: self.language.clone(),
            modules: self
                .modules_in(level)
                .map(|(id, m)| (id, m.clone()))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ContentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ContentStore for LessonStore {
    fn get(&self, id: ModuleId) -> Option<&LessonModule> {
        self.modules.get(&id)
    }

    fn ids(&self) -> Vec<ModuleId> {
        self.modules.keys().copied().collect()
    }

    fn metadata(&self) -> StoreMetadata {
        StoreMetadata {
            name: self.name.clone(),
            language: self.language.clone(),
            module_count: self.modules.len(),
        }
    }

    fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.modules.len()
    }
}

/// Serializes as a catalogue document, keys in numeric order
impl Serialize for LessonStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.modules.len()))?;
        for (id, module) in &self.modules {
            map.serialize_entry(&id.to_string(), module)?;
        }
        map.end()
    }
}

/// Document keys are bare decimal module numbers
fn document_key(key: &str) -> Result<ModuleId, ContentError> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ContentError::InvalidModuleId(key.to_string()));
    }
    key.parse::<u16>()
        .ok()
        .and_then(ModuleId::new)
        .ok_or_else(|| ContentError::InvalidModuleId(key.to_string()))
}

/// Raw document entries in file order, repeated keys kept so they can be reported
struct CatalogueEntries(Vec<(String, LessonModule)>);

struct CatalogueVisitor;

impl<'de> Visitor<'de> for CatalogueVisitor {
    type Value = CatalogueEntries;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping module numbers to lesson modules")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, LessonModule>()? {
            entries.push(entry);
        }
        Ok(CatalogueEntries(entries))
    }
}

impl<'de> Deserialize<'de> for CatalogueEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use ders_types::QaItem;

    use super::*;

    fn id(n: u16) -> ModuleId {
        ModuleId::new(n).unwrap()
    }

    fn module(title: &str) -> LessonModule {
        let mut m = LessonModule::new(title);
        m.speaking_practice.push(QaItem::new("Are you a teacher?", "Yes, I am a teacher."));
        m
    }

    #[test]
    fn insert_rejects_duplicate_numbers() {
        let mut store = LessonStore::new();
        store.insert(id(1), module("Verb To Be")).unwrap();

        let err = store.insert(id(1), module("Again")).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateModule(n) if n == id(1)));
        assert_eq!(store.get(id(1)).unwrap().title, "Verb To Be");
    }

    #[test]
    fn register_replaces() {
        let mut store = LessonStore::new();
        assert!(store.register(id(3), module("Old")).is_none());
        let old = store.register(id(3), module("New")).unwrap();
        assert_eq!(old.title, "Old");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn require_reports_missing_module() {
        let store = LessonStore::new();
        let err = store.require(id(68)).unwrap_err();
        assert_eq!(err.to_string(), "Module 68 not found");
    }

    #[test]
    fn document_with_repeated_key_is_rejected() {
        let json = r#"{
            "5": { "title": "A", "speakingPractice": [] },
            "5": { "title": "B", "speakingPractice": [] }
        }"#;
        assert!(matches!(
            LessonStore::from_json(json),
            Err(ContentError::DuplicateModule(n)) if n == id(5)
        ));
    }

    #[test]
    fn document_keys_must_be_module_numbers() {
        for key in [
            "zero",
            "0",
            "-1",
            "70000",
            "",
            "MODULE_5_DATA",
            "Module 5",
            " 5",
            "5 ",
            "+5",
        ] {
            let json = format!(r#"{{ "{key}": {{ "title": "A", "speakingPractice": [] }} }}"#);
            assert!(
                matches!(LessonStore::from_json(&json), Err(ContentError::InvalidModuleId(_))),
                "key {key} accepted"
            );
        }
    }

    #[test]
    fn leading_zeros_are_still_a_number() {
        let json = r#"{ "007": { "title": "A", "speakingPractice": [] } }"#;
        let store = LessonStore::from_json(json).unwrap();
        assert_eq!(store.ids(), vec![id(7)]);
    }

    #[test]
    fn failed_extend_leaves_store_untouched() {
        let mut store = LessonStore::new();
        store.insert(id(1), module("Verb To Be")).unwrap();

        // Valid entry before a bad key
        let bad_key = r#"{
            "2": { "title": "Two", "speakingPractice": [] },
            "Module 3": { "title": "Three", "speakingPractice": [] }
        }"#;
        assert!(store.extend_from_json(bad_key).is_err());

        // Valid entry before a number the store already has
        let clash = r#"{
            "4": { "title": "Four", "speakingPractice": [] },
            "1": { "title": "Again", "speakingPractice": [] }
        }"#;
        assert!(matches!(
            store.extend_from_json(clash),
            Err(ContentError::DuplicateModule(n)) if n == id(1)
        ));

        assert_eq!(store.ids(), vec![id(1)]);
        assert_eq!(store.get(id(1)).unwrap().title, "Verb To Be");

        let ok = r#"{ "4": { "title": "Four", "speakingPractice": [] } }"#;
        assert_eq!(store.extend_from_json(ok).unwrap(), 1);
        assert_eq!(store.ids(), vec![id(1), id(4)]);
    }

    #[test]
    fn serializes_in_numeric_order() {
        let mut store = LessonStore::new();
        store.insert(id(10), module("Ten")).unwrap();
        store.insert(id(2), module("Two")).unwrap();

        let json = store.to_json_pretty().unwrap();
        let two = json.find("\"2\"").unwrap();
        let ten = json.find("\"10\"").unwrap();
        assert!(two < ten);
    }

    #[test]
    fn merge_overrides_by_number() {
        let mut base = LessonStore::new();
        base.insert(id(1), module("Base one")).unwrap();
        base.insert(id(2), module("Base two")).unwrap();

        let mut extra = LessonStore::named("extra", "en");
        extra.insert(id(2), module("Extra two")).unwrap();
        extra.insert(id(3), module("Extra three")).unwrap();

        let merged = base.merge(extra);
        assert_eq!(merged.ids(), vec![id(1), id(2), id(3)]);
        assert_eq!(merged.get(id(2)).unwrap().title, "Extra two");
    }

    #[test]
    fn modules_by_level() {
        let mut store = LessonStore::new();
        for n in [1, 50, 51, 88, 151] {
            store.insert(id(n), module("m")).unwrap();
        }

        let a2: Vec<_> = store.modules_in(Level::A2).map(|(id, _)| id.get()).collect();
        assert_eq!(a2, vec![51, 88]);
        assert_eq!(store.level_subset(Level::A1).len(), 2);
        assert!(store.level_subset(Level::C1).is_empty());
    }
}
