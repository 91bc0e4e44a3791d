use ders_config::audit::AuditConfig;
use ders_core::LessonStore;
use ders_types::{ExampleRow, LessonModule, Level, ModuleId, MultipleChoice, QaItem, Table};

use crate::commands;

fn id(n: u16) -> ModuleId {
    ModuleId::new(n).unwrap()
}

fn store() -> LessonStore {
    let mut first = LessonModule::new("Verb To Be - Positive Sentences");
    first.table = Some(
        vec![
            ExampleRow::new().with("subject", "I").with("verb", "am"),
            ExampleRow::new().with("subject", "She").with("verb", "is"),
        ]
        .into(),
    );
    first.numbered_tables.insert(
        "table1".to_string(),
        Table::Titled {
            title: "Short forms".to_string(),
            data: vec![ExampleRow::new().with("long", "I am").with("short", "I'm")],
        },
    );
    first.speaking_practice.push(
        QaItem::new("Are you a teacher?", "Yes, I am a teacher.")
            .with_choice(MultipleChoice::lettered("I ___ a teacher.", ["am", "is", "are"], 0)),
    );

    let mut second = LessonModule::new("Negative Sentences");
    second
        .speaking_practice
        .push(QaItem::new("Are you a doctor?", "No, I am not a doctor."));

    let mut store = LessonStore::new();
    store.insert(id(1), first).unwrap();
    store.insert(id(2), second).unwrap();
    store.insert(id(121), LessonModule::new("Wish / If only")).unwrap();
    store
}

fn run(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<bool>) -> (bool, String) {
    let mut out = Vec::new();
    let ok = f(&mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn list_filters_by_level() {
    let store = store();
    let (_, all) = run(|out| commands::list(&store, None, out));
    assert_eq!(all.lines().count(), 3);

    let (_, b1) = run(|out| commands::list(&store, Some(Level::B1), out));
    assert_eq!(b1.trim(), "121  B1  Wish / If only");
}

#[test]
fn show_renders_text_and_json() {
    let store = store();

    let (_, text) = run(|out| commands::show(&store, id(1), false, out));
    assert!(text.starts_with("Module 1 (A1): Verb To Be - Positive Sentences"));
    assert!(text.contains("Table:\n  subject: I | verb: am"));
    assert!(text.contains("Short forms:\n  long: I am | short: I'm"));
    assert!(text.contains("I ___ a teacher. [A) am*  B) is  C) are]"));

    let (_, json) = run(|out| commands::show(&store, id(1), true, out));
    let reparsed = LessonStore::from_json(&json).unwrap();
    assert_eq!(reparsed.iter().next().map(|(n, _)| n), Some(id(1)));
}

#[test]
fn show_missing_module_is_an_error() {
    let store = store();
    let mut out = Vec::new();
    let err = commands::show(&store, id(68), false, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "Module 68 not found");
}

#[test]
fn next_within_level() {
    let store = store();
    let (_, next) = run(|out| commands::next(&store, id(1), out));
    assert_eq!(next.trim(), "Module 2: Negative Sentences");

    let (_, last) = run(|out| commands::next(&store, id(2), out));
    assert_eq!(last.trim(), "Module 2 is the last loaded module of A1");
}

#[test]
fn levels_lists_every_level() {
    let (_, text) = run(|out| commands::levels(&store(), out));
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains("  2 loaded"));
    assert!(lines[5].contains("251-300"));
}

#[test]
fn check_fails_on_violations() {
    let (ok, text) = run(|out| commands::check(&store(), out));
    assert!(!ok);
    assert!(text.contains("Module 121: speakingPractice is empty"));
    assert!(text.ends_with("3 modules checked, 1 violation(s) in 1 module(s)\n"));
}

#[test]
fn audit_lists_modules_needing_updates() {
    let store = store();
    let config = AuditConfig::default();

    let (ok, text) = run(|out| commands::audit(&store, &config, Some(Level::A1), false, out));
    assert!(ok);
    assert!(text.starts_with("Modules 1-50: 50 total, 0 valid, 50 invalid"));
    assert!(text.contains("Needing updates (50): 1, 2, 3"));
}

#[test]
fn export_writes_level_files() {
    let dir = std::env::temp_dir().join(format!("ders-app-export-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let (_, text) = run(|out| commands::export(&store(), &dir, Some(Level::A1), out));
    assert!(text.starts_with("Exported 2 modules"));
    assert!(dir.join("module_001.json").is_file());
    assert!(!dir.join("module_121.json").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
