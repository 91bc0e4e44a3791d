use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::row::ExampleRow;
use crate::table::Table;

/// One self-contained lesson unit: explanation, examples and speaking drills.
///
/// Only `title` and `speaking_practice` are expected to carry content; the text
/// fields default to empty when a catalogue omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonModule {
    /// Display name, free bilingual text
    pub title: String,
    /// One-line summary
    #[serde(default)]
    pub description: String,
    /// Longer explanation, usually Turkish with English examples. May contain
    /// newlines and emoji.
    #[serde(default)]
    pub intro: String,
    /// Short usage hint
    #[serde(default)]
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    /// Sentences read aloud before the speaking phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listening_examples: Option<Vec<String>>,
    pub speaking_practice: Vec<QaItem>,
    /// Further tables keyed `table1`, `table2`, ...
    #[serde(flatten)]
    pub numbered_tables: BTreeMap<String, Table>,
}

impl LessonModule {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            intro: String::new(),
            tip: String::new(),
            table: None,
            listening_examples: None,
            speaking_practice: Vec::new(),
            numbered_tables: BTreeMap::new(),
        }
    }

    /// Rows of the main table, empty when the module has no table
    pub fn table_rows(&self) -> &[ExampleRow] {
        self.table.as_ref().map(Table::rows).unwrap_or_default()
    }

    /// Main table first, then numbered tables in numeric order
    pub fn tables(&self) -> Vec<(&str, &Table)> {
        let mut numbered: Vec<(&str, &Table)> = self
            .numbered_tables
            .iter()
            .map(|(name, table)| (name.as_str(), table))
            .collect();
        numbered.sort_by_key(|(name, _)| (name.len(), *name));

        let mut tables = Vec::with_capacity(numbered.len() + 1);
        if let Some(table) = &self.table {
            tables.push(("table", table));
        }
        tables.extend(numbered);
        tables
    }

    pub fn listening_examples(&self) -> &[String] {
        self.listening_examples.as_deref().unwrap_or_default()
    }

    pub fn multiple_choice_items(&self) -> impl Iterator<Item = (usize, &MultipleChoice)> {
        self.speaking_practice
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| item.multiple_choice.as_ref().map(|mc| (idx, mc)))
    }
}

/// Question and expected spoken answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaItem {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_choice: Option<MultipleChoice>,
}

impl QaItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            multiple_choice: None,
        }
    }

    pub fn with_choice(mut self, choice: MultipleChoice) -> Self {
        self.multiple_choice = Some(choice);
        self
    }
}

/// Fill-in-the-blank variant of a practice item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoice {
    /// Sentence containing the blank, e.g. "I ___ a teacher."
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
}

impl MultipleChoice {
    /// Build from option texts, lettering them A, B, C... in order
    pub fn lettered<I, S>(prompt: impl Into<String>, texts: I, correct: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = texts
            .into_iter()
            .zip('A'..='Z')
            .enumerate()
            .map(|(idx, (text, letter))| ChoiceOption {
                letter,
                text: text.into(),
                correct: idx == correct,
            })
            .collect();

        Self {
            prompt: prompt.into(),
            options,
        }
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }

    /// The correct option, if exactly one is marked
    pub fn correct_option(&self) -> Option<&ChoiceOption> {
        match self.correct_count() {
            1 => self.options.iter().find(|o| o.correct),
            _ => None,
        }
    }

    pub fn option(&self, letter: char) -> Option<&ChoiceOption> {
        let letter = letter.to_ascii_uppercase();
        self.options.iter().find(|o| o.letter == letter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub letter: char,
    pub text: String,
    pub correct: bool,
}
