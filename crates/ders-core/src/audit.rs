use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::ops::RangeInclusive;

use ders_config::audit::AuditConfig;
use ders_types::{LessonModule, Level, ModuleId, Table};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::store::ContentStore;

/// Short answers that are fine as they are
const ACCEPTED_SHORT_ANSWERS: [&str; 3] = ["yes", "no", "ok"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    MissingModule,
    MissingField,
    ShortText,
    Placeholder,
    GenericContent,
    MissingTurkish,
    EmptyTable,
    SmallTable,
    ListeningCount,
    PracticeCount,
    InvalidItem,
    ShortAnswer,
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.message)
    }
}

/// Audit result for one module number
#[derive(Debug, Clone)]
pub struct ModuleAudit {
    pub id: ModuleId,
    /// `None` when the module is missing from the store
    pub title: Option<String>,
    pub practice_count: usize,
    pub issues: Vec<Issue>,
}

impl ModuleAudit {
    /// No error-level issues
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// Invalid, or flagged as generic/placeholder content
    pub fn needs_update(&self) -> bool {
        !self.is_valid()
            || self.has_kind(IssueKind::GenericContent)
            || self.has_kind(IssueKind::Placeholder)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub missing_fields: usize,
    pub practice_count: usize,
    pub listening_count: usize,
    pub empty_tables: usize,
    pub generic_content: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct AuditReport {
    pub range: RangeInclusive<u16>,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub results: BTreeMap<ModuleId, ModuleAudit>,
    pub summary: AuditSummary,
}

impl AuditReport {
    /// Sorted module numbers that need content work
    pub fn needing_updates(&self) -> Vec<ModuleId> {
        self.results
            .values()
            .filter(|r| r.needs_update())
            .map(|r| r.id)
            .collect()
    }
}

/// Content-quality audit driven by an [`AuditConfig`]
pub struct Auditor<'a> {
    config: &'a AuditConfig,
    preprocessor: DefaultPreprocessor,
}

impl<'a> Auditor<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self {
            config,
            preprocessor: DefaultPreprocessor,
        }
    }

    /// Audit one module number; `None` means the store has no such module
    pub fn audit_module(&self, id: ModuleId, module: Option<&LessonModule>) -> ModuleAudit {
        let Some(module) = module else {
            return ModuleAudit {
                id,
                title: None,
                practice_count: 0,
                issues: vec![issue(
                    Severity::Error,
                    IssueKind::MissingModule,
                    format!("Module {id}: data is missing"),
                )],
            };
        };

        let mut issues = Vec::new();
        self.check_title(id, module, &mut issues);
        self.check_description(id, module, &mut issues);
        self.check_intro(id, module, &mut issues);
        self.check_tip(id, module, &mut issues);
        self.check_table(id, module, &mut issues);
        self.check_listening(id, module, &mut issues);
        self.check_practice(id, module, &mut issues);

        ModuleAudit {
            id,
            title: Some(module.title.clone()),
            practice_count: module.speaking_practice.len(),
            issues,
        }
    }

    /// Audit every module number in `range`, present or not
    pub fn audit_range<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        range: RangeInclusive<u16>,
    ) -> AuditReport {
        let mut results = BTreeMap::new();
        let mut summary = AuditSummary::default();
        let (mut valid, mut invalid) = (0, 0);

        for id in range.clone().filter_map(ModuleId::new) {
            let result = self.audit_module(id, store.get(id));

            if result.is_valid() {
                valid += 1;
            } else {
                invalid += 1;
            }

            for i in &result.issues {
                match i.kind {
                    IssueKind::MissingField => summary.missing_fields += 1,
                    IssueKind::PracticeCount if i.severity == Severity::Error => {
                        summary.practice_count += 1
                    }
                    IssueKind::ListeningCount if i.severity == Severity::Error => {
                        summary.listening_count += 1
                    }
                    IssueKind::EmptyTable => summary.empty_tables += 1,
                    IssueKind::GenericContent | IssueKind::Placeholder => {
                        summary.generic_content += 1
                    }
                    IssueKind::Duplicate => summary.duplicates += 1,
                    _ => {}
                }
            }

            results.insert(id, result);
        }

        tracing::info!(
            "Audited modules {}-{}: {} valid, {} invalid",
            range.start(),
            range.end(),
            valid,
            invalid
        );

        AuditReport {
            total: results.len(),
            range,
            valid,
            invalid,
            results,
            summary,
        }
    }

    /// Audit a level's reserved block of module numbers
    pub fn audit_level<S: ContentStore + ?Sized>(&self, store: &S, level: Level) -> AuditReport {
        self.audit_range(store, level.module_range())
    }

    /// Audit only the modules the store holds
    pub fn audit_loaded<S: ContentStore + ?Sized>(&self, store: &S) -> Vec<ModuleAudit> {
        store
            .ids()
            .into_iter()
            .map(|id| self.audit_module(id, store.get(id)))
            .collect()
    }

    fn check_title(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let title = module.title.trim();
        let len = title.chars().count();

        if len < self.config.min_title_len {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortText,
                format!("Module {id}: Title is too short ({len} chars)"),
            ));
        }

        let placeholder = format!("module {id}");
        if title.to_lowercase().contains(&placeholder) && title.split_whitespace().count() <= 3 {
            issues.push(issue(
                Severity::Warning,
                IssueKind::Placeholder,
                format!("Module {id}: Title appears to be placeholder: \"{title}\""),
            ));
        }
    }

    fn check_description(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let description = module.description.trim();
        if description.is_empty() {
            issues.push(issue(
                Severity::Warning,
                IssueKind::MissingField,
                format!("Module {id}: Missing description"),
            ));
            return;
        }

        if description.chars().count() < self.config.min_description_len {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortText,
                format!("Module {id}: Description is too short"),
            ));
        }

        let lower = description.to_lowercase();
        if lower.contains("coming soon") {
            issues.push(issue(
                Severity::Warning,
                IssueKind::Placeholder,
                format!("Module {id}: Description contains \"coming soon\""),
            ));
        } else if lower.contains("learn") && description.split_whitespace().count() < 5 {
            issues.push(issue(
                Severity::Warning,
                IssueKind::Placeholder,
                format!("Module {id}: Description may be placeholder"),
            ));
        }
    }

    fn check_intro(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let intro = module.intro.trim();
        if intro.is_empty() {
            issues.push(issue(
                Severity::Warning,
                IssueKind::MissingField,
                format!("Module {id}: Missing intro"),
            ));
            return;
        }

        let len = intro.chars().count();
        if len < self.config.min_intro_len {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortText,
                format!("Module {id}: Intro is too short ({len} chars)"),
            ));
        }

        let lower = intro.to_lowercase();
        if contains_any(&lower, &self.config.generic_intros) {
            issues.push(issue(
                Severity::Warning,
                IssueKind::GenericContent,
                format!("Module {id}: Intro appears to be generic template"),
            ));
        }

        if !contains_any(&lower, &self.config.turkish_indicators) {
            issues.push(issue(
                Severity::Warning,
                IssueKind::MissingTurkish,
                format!("Module {id}: Intro may not contain Turkish explanation"),
            ));
        }
    }

    fn check_tip(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let tip = module.tip.trim();
        if tip.is_empty() {
            issues.push(issue(
                Severity::Warning,
                IssueKind::MissingField,
                format!("Module {id}: Missing tip"),
            ));
            return;
        }

        if tip.chars().count() < self.config.min_tip_len {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortText,
                format!("Module {id}: Tip is too short"),
            ));
        }

        if self.config.generic_tips.iter().any(|g| g.trim() == tip) {
            issues.push(issue(
                Severity::Warning,
                IssueKind::GenericContent,
                format!("Module {id}: Tip is generic placeholder text"),
            ));
        }
    }

    fn check_table(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        match module.table.as_ref().map(Table::rows) {
            Some([]) => issues.push(issue(
                Severity::Warning,
                IssueKind::EmptyTable,
                format!("Module {id}: Table is empty"),
            )),
            Some([_]) => issues.push(issue(
                Severity::Warning,
                IssueKind::SmallTable,
                format!("Module {id}: Table has only 1 row"),
            )),
            _ => {}
        }
    }

    fn check_listening(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let examples = module.listening_examples();
        let expected = self.config.expected_listening_count;

        if examples.len() < expected {
            issues.push(issue(
                Severity::Error,
                IssueKind::ListeningCount,
                format!(
                    "Module {id}: Listening examples must have {expected} sentences (has {})",
                    examples.len()
                ),
            ));
        } else if examples.len() > expected {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ListeningCount,
                format!(
                    "Module {id}: Has {} listening examples (more than standard {expected})",
                    examples.len()
                ),
            ));
        }

        let generic = examples
            .iter()
            .any(|ex| contains_any(&ex.to_lowercase(), &self.config.generic_examples));
        if generic {
            issues.push(issue(
                Severity::Warning,
                IssueKind::GenericContent,
                format!("Module {id}: Listening examples contain generic placeholder text"),
            ));
        }

        let short = examples
            .iter()
            .filter(|ex| ex.trim().chars().count() < self.config.min_listening_example_len)
            .count();
        if short > 0 {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortText,
                format!("Module {id}: {short} listening example(s) are too short"),
            ));
        }
    }

    fn check_practice(&self, id: ModuleId, module: &LessonModule, issues: &mut Vec<Issue>) {
        let items = &module.speaking_practice;
        let expected = self.config.expected_practice_count;

        if items.len() < expected {
            issues.push(issue(
                Severity::Error,
                IssueKind::PracticeCount,
                format!(
                    "Module {id}: Speaking practice must have {expected} questions (has {})",
                    items.len()
                ),
            ));
        } else if items.len() > expected {
            issues.push(issue(
                Severity::Info,
                IssueKind::PracticeCount,
                format!(
                    "Module {id}: Has {} questions (more than standard {expected})",
                    items.len()
                ),
            ));
        }

        let invalid = items
            .iter()
            .filter(|qa| qa.question.trim().is_empty() || qa.answer.trim().is_empty())
            .count();
        if invalid > 0 {
            issues.push(issue(
                Severity::Error,
                IssueKind::InvalidItem,
                format!("Module {id}: {invalid} invalid speaking practice items"),
            ));
        }

        let short = items
            .iter()
            .filter(|qa| self.is_short_answer(&qa.answer))
            .count();
        if short > 0 {
            issues.push(issue(
                Severity::Warning,
                IssueKind::ShortAnswer,
                format!("Module {id}: {short} very short answers"),
            ));
        }

        let questions: Vec<String> = items
            .iter()
            .map(|qa| self.preprocessor.process(&qa.question))
            .collect();
        let distinct: HashSet<&str> = questions.iter().map(String::as_str).collect();
        if distinct.len() < questions.len() {
            issues.push(issue(
                Severity::Warning,
                IssueKind::Duplicate,
                format!(
                    "Module {id}: {} duplicate question(s) found",
                    questions.len() - distinct.len()
                ),
            ));
        }

        let generic = questions
            .iter()
            .filter(|q| contains_any(q, &self.config.generic_questions))
            .count();
        if generic > self.config.max_generic_questions {
            issues.push(issue(
                Severity::Warning,
                IssueKind::GenericContent,
                format!("Module {id}: {generic} generic placeholder questions detected"),
            ));
        }

        self.check_filler_answers(id, module, &questions, issues);
    }

    /// One answer given to many different questions is template filler
    fn check_filler_answers(
        &self,
        id: ModuleId,
        module: &LessonModule,
        questions: &[String],
        issues: &mut Vec<Issue>,
    ) {
        let mut by_answer: HashMap<String, BTreeSet<&str>> = HashMap::new();
        for (qa, question) in module.speaking_practice.iter().zip(questions) {
            let answer = self.preprocessor.process(&qa.answer);
            if !answer.is_empty() {
                by_answer.entry(answer).or_default().insert(question.as_str());
            }
        }

        let mut fillers: Vec<(&String, usize)> = by_answer
            .iter()
            .map(|(answer, qs)| (answer, qs.len()))
            .filter(|(_, n)| *n >= self.config.filler_answer_threshold)
            .collect();
        fillers.sort();

        for (answer, n) in fillers {
            issues.push(issue(
                Severity::Warning,
                IssueKind::GenericContent,
                format!("Module {id}: answer \"{answer}\" is reused for {n} different questions"),
            ));
        }
    }

    fn is_short_answer(&self, answer: &str) -> bool {
        let trimmed = answer.trim();
        if trimmed.is_empty() || trimmed.chars().count() >= self.config.min_answer_len {
            return false;
        }

        let word = trimmed
            .trim_end_matches(['.', '!', '?', ','])
            .to_lowercase();
        !ACCEPTED_SHORT_ANSWERS.contains(&word.as_str())
    }
}

fn issue(severity: Severity, kind: IssueKind, message: String) -> Issue {
    Issue {
        severity,
        kind,
        message,
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(&n.to_lowercase()))
}
