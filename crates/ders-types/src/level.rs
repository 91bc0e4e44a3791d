use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::ModuleId;

/// Modules per level block
const LEVEL_SPAN: u16 = 50;

/// CEFR proficiency level. Each level owns a block of 50 module numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A1, // Beginner, 1-50
    A2, // Elementary, 51-100
    B1, // Intermediate, 101-150
    B2, // Upper intermediate, 151-200
    C1, // Advanced, 201-250
    C2, // Proficiency, 251-300
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::A1,
        Level::A2,
        Level::B1,
        Level::B2,
        Level::C1,
        Level::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }

    /// Display name, e.g. "A1 - Beginner"
    pub fn name(&self) -> &'static str {
        match self {
            Level::A1 => "A1 - Beginner",
            Level::A2 => "A2 - Elementary",
            Level::B1 => "B1 - Intermediate",
            Level::B2 => "B2 - Upper Intermediate",
            Level::C1 => "C1 - Advanced",
            Level::C2 => "C2 - Proficiency",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Level::A1 => "Start your English journey",
            Level::A2 => "Build basic skills",
            Level::B1 => "Expand your knowledge",
            Level::B2 => "Advanced concepts",
            Level::C1 => "Master complex concepts",
            Level::C2 => "Near-native fluency",
        }
    }

    fn index(&self) -> u16 {
        match self {
            Level::A1 => 0,
            Level::A2 => 1,
            Level::B1 => 2,
            Level::B2 => 3,
            Level::C1 => 4,
            Level::C2 => 5,
        }
    }

    /// Module numbers reserved for this level
    pub fn module_range(&self) -> RangeInclusive<u16> {
        let start = self.index() * LEVEL_SPAN + 1;
        start..=start + LEVEL_SPAN - 1
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.module_range().contains(&id.get())
    }

    /// Level owning a module number, `None` past C2
    pub fn for_module(id: ModuleId) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.contains(id))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level {0:?} (expected one of A1, A2, B1, B2, C1, C2)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(Level::A1),
            "A2" => Ok(Level::A2),
            "B1" => Ok(Level::B1),
            "B2" => Ok(Level::B2),
            "C1" => Ok(Level::C1),
            "C2" => Ok(Level::C2),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u16) -> ModuleId {
        ModuleId::new(n).unwrap()
    }

    #[test]
    fn ranges_are_contiguous_blocks_of_fifty() {
        assert_eq!(Level::A1.module_range(), 1..=50);
        assert_eq!(Level::A2.module_range(), 51..=100);
        assert_eq!(Level::B1.module_range(), 101..=150);
        assert_eq!(Level::B2.module_range(), 151..=200);
        assert_eq!(Level::C2.module_range(), 251..=300);
    }

    #[test]
    fn level_for_module() {
        assert_eq!(Level::for_module(id(1)), Some(Level::A1));
        assert_eq!(Level::for_module(id(50)), Some(Level::A1));
        assert_eq!(Level::for_module(id(51)), Some(Level::A2));
        assert_eq!(Level::for_module(id(140)), Some(Level::B1));
        assert_eq!(Level::for_module(id(151)), Some(Level::B2));
        assert_eq!(Level::for_module(id(301)), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("b2".parse::<Level>().unwrap(), Level::B2);
        assert_eq!(" C1 ".parse::<Level>().unwrap(), Level::C1);
        assert!("D1".parse::<Level>().is_err());
    }
}
