//! Structural integrity checks over catalogue data.
//!
//! These never change the data. A violation is a finding to report, not an
//! error; module number uniqueness is enforced earlier by [`LessonStore`].
//!
//! [`LessonStore`]: crate::store::LessonStore

use std::collections::BTreeSet;
use std::fmt;

use ders_types::{LessonModule, ModuleId, Table};

use crate::store::ContentStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    EmptyTitle,
    EmptyPractice,
    BlankQuestion { item: usize },
    BlankAnswer { item: usize },
    TooFewOptions { item: usize, count: usize },
    CorrectOptionCount { item: usize, count: usize },
    InconsistentTableRow {
        table: String,
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
    RoundTripMismatch(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyTitle => write!(f, "title is empty"),
            Violation::EmptyPractice => write!(f, "speakingPractice is empty"),
            Violation::BlankQuestion { item } => {
                write!(f, "speakingPractice[{item}] has a blank question")
            }
            Violation::BlankAnswer { item } => {
                write!(f, "speakingPractice[{item}] has a blank answer")
            }
            Violation::TooFewOptions { item, count } => write!(
                f,
                "speakingPractice[{item}].multipleChoice has {count} option(s), needs at least 2"
            ),
            Violation::CorrectOptionCount { item, count } => write!(
                f,
                "speakingPractice[{item}].multipleChoice marks {count} options correct, expected exactly 1"
            ),
            Violation::InconsistentTableRow {
                table,
                row,
                expected,
                found,
            } => write!(
                f,
                "{table}[{row}] has fields [{}], other rows have [{}]",
                found.join(", "),
                expected.join(", ")
            ),
            Violation::RoundTripMismatch(reason) => write!(f, "JSON round trip failed: {reason}"),
        }
    }
}

/// Data checks on a single module (everything except the round trip)
pub fn check_module(module: &LessonModule) -> Vec<Violation> {
    let mut violations = Vec::new();

    if module.title.trim().is_empty() {
        violations.push(Violation::EmptyTitle);
    }

    if module.speaking_practice.is_empty() {
        violations.push(Violation::EmptyPractice);
    }

    for (item, qa) in module.speaking_practice.iter().enumerate() {
        if qa.question.trim().is_empty() {
            violations.push(Violation::BlankQuestion { item });
        }
        if qa.answer.trim().is_empty() {
            violations.push(Violation::BlankAnswer { item });
        }
    }

    for (item, mc) in module.multiple_choice_items() {
        if mc.options.len() < 2 {
            violations.push(Violation::TooFewOptions {
                item,
                count: mc.options.len(),
            });
        }
        let count = mc.correct_count();
        if count != 1 {
            violations.push(Violation::CorrectOptionCount { item, count });
        }
    }

    for (name, table) in module.tables() {
        violations.extend(check_table(name, table));
    }
    violations
}

/// Every row of a table must have the same field set as the first row
fn check_table(name: &str, table: &Table) -> Vec<Violation> {
    let rows = table.rows();
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let expected = first.key_set();
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.key_set() != expected)
        .map(|(row, found)| Violation::InconsistentTableRow {
            table: name.to_string(),
            row,
            expected: expected.iter().map(|k| k.to_string()).collect(),
            found: found.keys().map(String::from).collect(),
        })
        .collect()
}

/// Serialize to JSON and parse back; the record must come back identical
pub fn check_round_trip(module: &LessonModule) -> Option<Violation> {
    let json = match serde_json::to_string(module) {
        Ok(json) => json,
        Err(e) => return Some(Violation::RoundTripMismatch(format!("serialize: {e}"))),
    };

    match serde_json::from_str::<LessonModule>(&json) {
        Ok(parsed) if parsed == *module => None,
        Ok(_) => Some(Violation::RoundTripMismatch(
            "parsed record differs from the original".to_string(),
        )),
        Err(e) => Some(Violation::RoundTripMismatch(format!("parse: {e}"))),
    }
}

#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub checked: usize,
    pub violations: Vec<(ModuleId, Violation)>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Module numbers with at least one violation
    pub fn failing_modules(&self) -> BTreeSet<ModuleId> {
        self.violations.iter().map(|(id, _)| *id).collect()
    }
}

/// Run every check on every module of a store
pub fn check_store<S: ContentStore + ?Sized>(store: &S) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    for id in store.ids() {
        let Some(module) = store.get(id) else {
            continue;
        };
        report.checked += 1;

        let mut violations = check_module(module);
        violations.extend(check_round_trip(module));

        if !violations.is_empty() {
            tracing::debug!("Module {} has {} violation(s)", id, violations.len());
        }
        report
            .violations
            .extend(violations.into_iter().map(|v| (id, v)));
    }

    report
}
