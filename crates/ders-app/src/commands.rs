//! Subcommand bodies. Each returns `false` when the process should exit non-zero.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use ders_config::audit::AuditConfig;
use ders_core::audit::{AuditReport, Auditor};
use ders_core::curriculum::Curriculum;
use ders_core::loader::{export_to_dir, module_document};
use ders_core::validate::check_store;
use ders_core::{ContentStore, LessonStore};
use ders_types::{Level, ModuleId};

use crate::render;

pub fn list<W: Write>(store: &LessonStore, level: Option<Level>, out: &mut W) -> anyhow::Result<bool> {
    for (id, module) in store.iter() {
        let module_level = Level::for_module(id);
        if level.is_some_and(|l| Some(l) != module_level) {
            continue;
        }
        let level_str = module_level.map_or("-", |l| l.as_str());
        writeln!(out, "{:>3}  {}  {}", id, level_str, module.title)?;
    }
    Ok(true)
}

pub fn show<W: Write>(store: &LessonStore, id: ModuleId, json: bool, out: &mut W) -> anyhow::Result<bool> {
    let module = store.require(id)?;

    if json {
        writeln!(out, "{}", module_document(id, module)?)?;
    } else {
        write!(out, "{}", render::module_text(id, module))?;
    }
    Ok(true)
}

pub fn levels<W: Write>(store: &LessonStore, out: &mut W) -> anyhow::Result<bool> {
    let curriculum = Curriculum::from_store(store);

    for summary in curriculum.levels() {
        writeln!(
            out,
            "{:<20} {:>3}-{:<3}  {:>2} loaded  {}",
            summary.level.name(),
            summary.first,
            summary.last,
            summary.loaded,
            summary.level.description()
        )?;
    }
    Ok(true)
}

pub fn next<W: Write>(store: &LessonStore, id: ModuleId, out: &mut W) -> anyhow::Result<bool> {
    store.require(id)?;
    let curriculum = Curriculum::from_store(store);

    match curriculum.next_after(id) {
        Some(next) => {
            let module = store.require(next)?;
            writeln!(out, "{}: {}", next.label(), module.title)?;
        }
        None => {
            let level = Level::for_module(id).map_or("-", |l| l.as_str());
            writeln!(out, "{} is the last loaded module of {}", id.label(), level)?;
        }
    }
    Ok(true)
}

pub fn check<W: Write>(store: &LessonStore, out: &mut W) -> anyhow::Result<bool> {
    let report = check_store(store);

    for (id, violation) in &report.violations {
        writeln!(out, "{}: {}", id.label(), violation)?;
    }

    if report.is_clean() {
        writeln!(out, "{} modules checked, no violations", report.checked)?;
    } else {
        writeln!(
            out,
            "{} modules checked, {} violation(s) in {} module(s)",
            report.checked,
            report.violations.len(),
            report.failing_modules().len()
        )?;
    }
    Ok(report.is_clean())
}

pub fn audit<W: Write>(
    store: &LessonStore,
    config: &AuditConfig,
    level: Option<Level>,
    verbose: bool,
    out: &mut W,
) -> anyhow::Result<bool> {
    let auditor = Auditor::new(config);

    let report = match level {
        Some(level) => auditor.audit_level(store, level),
        None => {
            let last = store.ids().last().map_or(0, |id| id.get());
            if last == 0 {
                writeln!(out, "No modules loaded")?;
                return Ok(true);
            }
            auditor.audit_range(store, 1..=last)
        }
    };

    write_audit(&report, verbose, out)?;
    Ok(true)
}

fn write_audit<W: Write>(report: &AuditReport, verbose: bool, out: &mut W) -> anyhow::Result<()> {
    if verbose {
        for result in report.results.values().filter(|r| !r.issues.is_empty()) {
            let title = result.title.as_deref().unwrap_or("(missing)");
            writeln!(out, "{}: {}", result.id.label(), title)?;
            for issue in &result.issues {
                writeln!(out, "  {issue}")?;
            }
        }
        writeln!(out)?;
    }

    let s = &report.summary;
    writeln!(
        out,
        "Modules {}-{}: {} total, {} valid, {} invalid",
        report.range.start(),
        report.range.end(),
        report.total,
        report.valid,
        report.invalid
    )?;
    writeln!(out, "  missing fields:   {}", s.missing_fields)?;
    writeln!(out, "  practice count:   {}", s.practice_count)?;
    writeln!(out, "  listening count:  {}", s.listening_count)?;
    writeln!(out, "  empty tables:     {}", s.empty_tables)?;
    writeln!(out, "  generic content:  {}", s.generic_content)?;
    writeln!(out, "  duplicates:       {}", s.duplicates)?;

    let needing = report.needing_updates();
    if !needing.is_empty() {
        let ids = needing.iter().map(ToString::to_string).collect::<Vec<_>>();
        writeln!(out, "Needing updates ({}): {}", needing.len(), ids.join(", "))?;
    }
    Ok(())
}

pub fn export<W: Write>(
    store: &LessonStore,
    dir: &Path,
    level: Option<Level>,
    out: &mut W,
) -> anyhow::Result<bool> {
    let written = export_to_dir(store, dir, level)
        .with_context(|| format!("Failed to export to {}", dir.display()))?;

    writeln!(out, "Exported {} modules to {}", written.len(), dir.display())?;
    Ok(true)
}
