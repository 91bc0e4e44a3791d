//! The English course catalogue, embedded at build time.

use std::sync::LazyLock;

use ders_core::{ContentStore, LessonStore};
use ders_types::{LessonModule, ModuleId};

pub mod loader;

pub use loader::EnglishCatalogueLoader;

static CATALOGUE: LazyLock<LessonStore> = LazyLock::new(|| {
    EnglishCatalogueLoader::load_embedded().unwrap_or_else(|e| {
        tracing::error!("Failed to load embedded catalogue: {}", e);
        LessonStore::named("english", "en-tr")
    })
});

/// The embedded catalogue, parsed on first access
pub fn catalogue() -> &'static LessonStore {
    &CATALOGUE
}

/// Module by number; `None` for 0 or numbers without content
pub fn module(number: u16) -> Option<&'static LessonModule> {
    ModuleId::new(number).and_then(|id| CATALOGUE.get(id))
}
