use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ders_types::{LessonModule, Level, ModuleId};

use crate::error::ContentError;
use crate::store::{ContentStore, LessonStore};

/// Load catalogues from files
pub trait CatalogueLoader {
    /// Load one catalogue file
    fn load_from_file(&self, path: &Path) -> Result<LessonStore, ContentError>;

    /// Supported file extensions
    fn supported_formats(&self) -> Vec<String>;
}

/// Loader for JSON catalogue documents (`{"<module number>": module, ...}`)
pub struct JsonCatalogueLoader;

impl CatalogueLoader for JsonCatalogueLoader {
    fn load_from_file(&self, path: &Path) -> Result<LessonStore, ContentError> {
        tracing::info!("Loading catalogue from file: {}", path.display());
        let json = fs::read_to_string(path)?;

        let mut store = LessonStore::named(path.display().to_string(), "en");
        store.extend_from_json(&json)?;

        tracing::info!("Loaded {} modules from {}", store.len(), path.display());
        Ok(store)
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["json".to_string()]
    }
}

impl JsonCatalogueLoader {
    /// Load every catalogue file in a directory, in file name order.
    /// Later files override earlier ones on equal module numbers.
    pub fn load_from_dir(&self, dir: &Path) -> Result<LessonStore, ContentError> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && self.is_supported(path))
            .collect();
        files.sort();

        if files.is_empty() {
            tracing::warn!("No catalogue files in {}", dir.display());
        }

        let mut store = LessonStore::named(dir.display().to_string(), "en");
        for file in files {
            let loaded = self.load_from_file(&file)?;
            store = store.merge(loaded);
        }

        Ok(store)
    }

    /// Load a file or a directory
    pub fn load_path(&self, path: &Path) -> Result<LessonStore, ContentError> {
        if path.is_dir() {
            self.load_from_dir(path)
        } else if path.exists() {
            self.load_from_file(path)
        } else {
            Err(ContentError::InvalidFormat(format!(
                "{} is neither a catalogue file nor a directory",
                path.display()
            )))
        }
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.supported_formats()
                    .iter()
                    .any(|f| f.eq_ignore_ascii_case(ext))
            })
    }
}

/// File name a module is exported under
pub fn export_file_name(id: ModuleId) -> String {
    format!("module_{:03}.json", id.get())
}

/// Write one catalogue document per module into `dir`, optionally
/// restricted to one level. Returns the written paths.
pub fn export_to_dir(
    store: &LessonStore,
    dir: &Path,
    level: Option<Level>,
) -> Result<Vec<PathBuf>, ContentError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (id, module) in store.iter() {
        if level.is_some_and(|l| !l.contains(id)) {
            continue;
        }

        let path = dir.join(export_file_name(id));
        fs::write(&path, module_document(id, module)?)?;
        tracing::debug!("Exported module {} to {}", id, path.display());
        written.push(path);
    }

    tracing::info!("Exported {} modules to {}", written.len(), dir.display());
    Ok(written)
}

/// Single-module catalogue document
pub fn module_document(id: ModuleId, module: &LessonModule) -> Result<String, ContentError> {
    let doc: BTreeMap<String, &LessonModule> = BTreeMap::from([(id.to_string(), module)]);
    Ok(serde_json::to_string_pretty(&doc)?)
}
