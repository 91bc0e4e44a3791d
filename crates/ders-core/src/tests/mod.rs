
use ders_types::{ExampleRow, LessonModule, ModuleId, QaItem};

pub(crate) fn id(n: u16) -> ModuleId {
    ModuleId::new(n).unwrap()
}

/// A module that passes the default audit without findings
pub(crate) fn complete_module() -> LessonModule {
    let mut m = LessonModule::new("Verb To Be - Positive Sentences");
    m.description = "Learn to use am, is, and are in positive sentences".to_string();
    m.intro = "Bu modülde \"to be\" fiilinin olumlu cümlelerde kullanımını öğreneceğiz.".to_string();
    m.tip = "Use 'am' with I, 'is' with he/she/it, and 'are' with we/you/they.".to_string();
    m.table = Some(
        vec![
            ExampleRow::new().with("subject", "I").with("verb", "am"),
            ExampleRow::new().with("subject", "She").with("verb", "is"),
        ]
        .into(),
    );
    m.listening_examples = Some(
        [
            "I am a student.",
            "She is a doctor.",
            "They are my friends.",
            "We are at home now.",
            "It is a sunny day.",
        ]
        .map(String::from)
        .to_vec(),
    );
    m.speaking_practice = (1..=40)
        .map(|n| QaItem::new(format!("Is room {n} open?"), format!("Yes, room {n} is open.")))
        .collect();
    m
}
