use std::path::Path;

use ders_core::loader::JsonCatalogueLoader;
use ders_core::{ContentError, ContentStore, LessonStore};

/// Embedded catalogue documents, one per level
const EMBEDDED: [(&str, &str); 6] = [
    ("a1", include_str!("../data/a1.json")),
    ("a2", include_str!("../data/a2.json")),
    ("b1", include_str!("../data/b1.json")),
    ("b2", include_str!("../data/b2.json")),
    ("c1", include_str!("../data/c1.json")),
    ("c2", include_str!("../data/c2.json")),
];

pub struct EnglishCatalogueLoader;

impl EnglishCatalogueLoader {
    /// Load the embedded English catalogue
    pub fn load_embedded() -> Result<LessonStore, ContentError> {
        tracing::info!("Loading embedded English catalogue...");
        let mut store = LessonStore::named("english", "en-tr");

        for (name, json) in EMBEDDED {
            let count = store.extend_from_json(json)?;
            tracing::debug!("Loaded {} modules from embedded {}", count, name);
        }

        tracing::info!("Loaded {} lesson modules", store.len());
        Ok(store)
    }

    /// The embedded catalogue (or an empty one when `embedded` is false)
    /// with extra files or directories merged over it in order.
    /// Paths that fail to load are skipped with a warning.
    pub fn load(embedded: bool, additional_paths: &[String]) -> LessonStore {
        let mut store = if embedded {
            crate::catalogue().clone()
        } else {
            tracing::info!("Embedded catalogue disabled");
            LessonStore::named("english", "en-tr")
        };

        for path in additional_paths {
            match JsonCatalogueLoader.load_path(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional catalogue from: {}", path);
                    store = store.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load catalogue from {}: {}", path, e);
                }
            }
        }

        store
    }
}
