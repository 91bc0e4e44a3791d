use std::fmt::{self, Write};

use ders_types::{ExampleRow, LessonModule, Level, ModuleId, MultipleChoice};

/// Plain-text rendering of a module for the terminal
pub fn module_text(id: ModuleId, module: &LessonModule) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail
    write_module(&mut s, id, module).ok();
    s
}

fn write_module(s: &mut String, id: ModuleId, module: &LessonModule) -> fmt::Result {
    let level = Level::for_module(id).map_or("-", |l| l.as_str());
    writeln!(s, "{} ({}): {}", id.label(), level, module.title)?;

    for text in [&module.description, &module.intro] {
        if !text.trim().is_empty() {
            writeln!(s, "\n{}", text.trim())?;
        }
    }
    if !module.tip.trim().is_empty() {
        writeln!(s, "\nTip: {}", module.tip.trim())?;
    }

    for (name, table) in module.tables() {
        if table.is_empty() {
            continue;
        }
        match table.title() {
            Some(title) => writeln!(s, "\n{title}:")?,
            None if name == "table" => writeln!(s, "\nTable:")?,
            None => writeln!(s, "\n{name}:")?,
        }
        for row in table.rows() {
            writeln!(s, "  {}", row_text(row))?;
        }
    }

    let listening = module.listening_examples();
    if !listening.is_empty() {
        writeln!(s, "\nListening:")?;
        for example in listening {
            writeln!(s, "  - {example}")?;
        }
    }

    writeln!(s, "\nSpeaking practice ({}):", module.speaking_practice.len())?;
    for (n, qa) in module.speaking_practice.iter().enumerate() {
        writeln!(s, "{:>4}. {}", n + 1, qa.question)?;
        writeln!(s, "      {}", qa.answer)?;
        if let Some(choice) = &qa.multiple_choice {
            writeln!(s, "      {}", choice_text(choice))?;
        }
    }
    Ok(())
}

fn row_text(row: &ExampleRow) -> String {
    row.iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// `prompt [A) am*  B) is  C) are]`, correct options starred
fn choice_text(choice: &MultipleChoice) -> String {
    let options = choice
        .options
        .iter()
        .map(|o| {
            let mark = if o.correct { "*" } else { "" };
            format!("{}) {}{}", o.letter, o.text, mark)
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{} [{}]", choice.prompt, options)
}
