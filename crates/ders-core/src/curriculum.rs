use std::collections::BTreeMap;

use ders_types::{Level, ModuleId};

use crate::store::ContentStore;

/// Module order per level, derived from what a store actually holds
#[derive(Debug, Clone, Default)]
pub struct Curriculum {
    orders: BTreeMap<Level, Vec<ModuleId>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: Level,
    pub first: u16,
    pub last: u16,
    pub loaded: usize,
}

impl Curriculum {
    pub fn from_store<S: ContentStore + ?Sized>(store: &S) -> Self {
        let mut orders: BTreeMap<Level, Vec<ModuleId>> = BTreeMap::new();

        // ids() is ascending, so every level order is too
        for id in store.ids() {
            match Level::for_module(id) {
                Some(level) => orders.entry(level).or_default().push(id),
                None => tracing::warn!("Module {} is outside every level range", id),
            }
        }

        Self { orders }
    }

    /// Ordered modules of a level, empty if none are loaded
    pub fn order(&self, level: Level) -> &[ModuleId] {
        self.orders.get(&level).map(Vec::as_slice).unwrap_or_default()
    }

    /// Module after `current` in `level`, `None` at the end or when
    /// `current` is not part of that level
    pub fn next_module(&self, level: Level, current: ModuleId) -> Option<ModuleId> {
        let order = self.order(level);
        let idx = order.iter().position(|id| *id == current)?;
        order.get(idx + 1).copied()
    }

    pub fn previous_module(&self, level: Level, current: ModuleId) -> Option<ModuleId> {
        let order = self.order(level);
        let idx = order.iter().position(|id| *id == current)?;
        idx.checked_sub(1).and_then(|prev| order.get(prev).copied())
    }

    /// Next module in whatever level `current` belongs to
    pub fn next_after(&self, current: ModuleId) -> Option<ModuleId> {
        Level::for_module(current).and_then(|level| self.next_module(level, current))
    }

    /// First loaded module of a level
    pub fn first_module(&self, level: Level) -> Option<ModuleId> {
        self.order(level).first().copied()
    }

    /// Every level with its reserved range and loaded module count
    pub fn levels(&self) -> Vec<LevelSummary> {
        Level::ALL
            .into_iter()
            .map(|level| {
                let range = level.module_range();
                LevelSummary {
                    level,
                    first: *range.start(),
                    last: *range.end(),
                    loaded: self.order(level).len(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ders_types::{LessonModule, QaItem};

    use super::*;
    use crate::store::LessonStore;

    fn id(n: u16) -> ModuleId {
        ModuleId::new(n).unwrap()
    }

    fn store_with(numbers: &[u16]) -> LessonStore {
        let mut store = LessonStore::new();
        for &n in numbers {
            let mut m = LessonModule::new(format!("Module {n}"));
            m.speaking_practice.push(QaItem::new("q?", "a."));
            store.insert(id(n), m).unwrap();
        }
        store
    }

    #[test]
    fn next_module_skips_gaps() {
        let curriculum = Curriculum::from_store(&store_with(&[51, 67, 88, 89, 100]));

        assert_eq!(curriculum.next_module(Level::A2, id(67)), Some(id(88)));
        assert_eq!(curriculum.next_module(Level::A2, id(88)), Some(id(89)));
        assert_eq!(curriculum.next_module(Level::A2, id(100)), None);
    }

    #[test]
    fn next_module_requires_membership() {
        let curriculum = Curriculum::from_store(&store_with(&[1, 2, 51]));

        assert_eq!(curriculum.next_module(Level::A2, id(1)), None);
        assert_eq!(curriculum.next_module(Level::A1, id(3)), None);
        assert_eq!(curriculum.next_after(id(1)), Some(id(2)));
        assert_eq!(curriculum.next_after(id(2)), None);
    }

    #[test]
    fn previous_module() {
        let curriculum = Curriculum::from_store(&store_with(&[121, 122, 140]));

        assert_eq!(curriculum.previous_module(Level::B1, id(140)), Some(id(122)));
        assert_eq!(curriculum.previous_module(Level::B1, id(121)), None);
        assert_eq!(curriculum.first_module(Level::B1), Some(id(121)));
    }

    #[test]
    fn level_summaries_count_loaded_modules() {
        let curriculum = Curriculum::from_store(&store_with(&[1, 2, 3, 151]));
        let levels = curriculum.levels();

        assert_eq!(levels.len(), 6);
        assert_eq!(levels[0].loaded, 3);
        assert_eq!((levels[3].first, levels[3].last, levels[3].loaded), (151, 200, 1));
        assert_eq!(levels[5].loaded, 0);
    }
}
