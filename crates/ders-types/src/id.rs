use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Module number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ModuleId(u16);

impl ModuleId {
    /// Returns `None` for 0
    pub const fn new(number: u16) -> Option<Self> {
        if number == 0 { None } else { Some(Self(number)) }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Name the lessons app exported this module under (`MODULE_12_DATA`)
    pub fn export_name(self) -> String {
        format!("MODULE_{}_DATA", self.0)
    }

    /// Display label, e.g. "Module 12"
    pub fn label(self) -> String {
        format!("Module {}", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseModuleIdError {
    #[error("module number must be positive")]
    Zero,

    #[error("not a module number: {0:?}")]
    NotANumber(String),
}

impl TryFrom<u16> for ModuleId {
    type Error = ParseModuleIdError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ParseModuleIdError::Zero)
    }
}

impl From<ModuleId> for u16 {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl FromStr for ModuleId {
    type Err = ParseModuleIdError;

    /// Accepts "12", "Module 12" and "MODULE_12_DATA"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("MODULE_")
            .and_then(|rest| rest.strip_suffix("_DATA"))
            .or_else(|| trimmed.strip_prefix("Module "))
            .unwrap_or(trimmed);

        let number: u16 = digits
            .trim()
            .parse()
            .map_err(|_| ParseModuleIdError::NotANumber(s.to_string()))?;

        Self::try_from(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_spellings() {
        let expected = ModuleId::new(42).unwrap();
        assert_eq!("42".parse::<ModuleId>().unwrap(), expected);
        assert_eq!("Module 42".parse::<ModuleId>().unwrap(), expected);
        assert_eq!("MODULE_42_DATA".parse::<ModuleId>().unwrap(), expected);
        assert_eq!(" 42 ".parse::<ModuleId>().unwrap(), expected);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!("0".parse::<ModuleId>(), Err(ParseModuleIdError::Zero));
        assert!(matches!(
            "forty".parse::<ModuleId>(),
            Err(ParseModuleIdError::NotANumber(_))
        ));
        assert!(serde_json::from_str::<ModuleId>("0").is_err());
    }

    #[test]
    fn names() {
        let id = ModuleId::new(7).unwrap();
        assert_eq!(id.export_name(), "MODULE_7_DATA");
        assert_eq!(id.label(), "Module 7");
        assert_eq!(id.to_string(), "7");
    }
}
