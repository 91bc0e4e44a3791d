use serde::{Deserialize, Serialize};

use crate::row::ExampleRow;

/// A module table, either bare rows or rows under a heading
/// (`{"title": ..., "data": [...]}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Table {
    Rows(Vec<ExampleRow>),
    Titled { title: String, data: Vec<ExampleRow> },
}

impl Table {
    pub fn rows(&self) -> &[ExampleRow] {
        match self {
            Table::Rows(rows) => rows,
            Table::Titled { data, .. } => data,
        }
    }

    pub fn rows_mut(&mut self) -> &mut Vec<ExampleRow> {
        match self {
            Table::Rows(rows) => rows,
            Table::Titled { data, .. } => data,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Table::Rows(_) => None,
            Table::Titled { title, .. } => Some(title),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

impl From<Vec<ExampleRow>> for Table {
    fn from(rows: Vec<ExampleRow>) -> Self {
        Table::Rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_and_titled_forms() {
        let bare: Table = serde_json::from_value(json!([{ "en": "price", "tr": "fiyat" }])).unwrap();
        assert_eq!(bare.title(), None);
        assert_eq!(bare.rows()[0].get("tr"), Some("fiyat"));

        let titled: Table = serde_json::from_value(json!({
            "title": "Elision",
            "data": [{ "word": "Next day", "naturalForm": "Nex day" }]
        }))
        .unwrap();
        assert_eq!(titled.title(), Some("Elision"));
        assert_eq!(titled.len(), 1);
        assert_eq!(
            serde_json::to_value(&titled).unwrap(),
            json!({ "title": "Elision", "data": [{ "word": "Next day", "naturalForm": "Nex day" }] })
        );
    }

    #[test]
    fn empty_table_stays_empty() {
        let table: Table = serde_json::from_value(json!([])).unwrap();
        assert_eq!(table, Table::Rows(vec![]));
        assert!(table.is_empty());
        assert_eq!(serde_json::to_string(&table).unwrap(), "[]");
    }
}
