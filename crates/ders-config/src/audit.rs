use serde::{Deserialize, Serialize};

fn default_expected_practice_count() -> usize {
    40
}

fn default_min_title_len() -> usize {
    5
}

fn default_min_description_len() -> usize {
    10
}

fn default_min_intro_len() -> usize {
    20
}

fn default_min_tip_len() -> usize {
    10
}

fn default_min_answer_len() -> usize {
    5
}

fn default_expected_listening_count() -> usize {
    5
}

fn default_min_listening_example_len() -> usize {
    10
}

fn default_max_generic_questions() -> usize {
    10
}

fn default_filler_answer_threshold() -> usize {
    5
}

fn default_turkish_indicators() -> Vec<String> {
    ["bu modülde", "öğreneceğiz", "kullanılır", "cümleler", "örnek"]
        .map(String::from)
        .to_vec()
}

fn default_generic_questions() -> Vec<String> {
    [
        "how often do you practice this grammar",
        "do you find this topic difficult",
        "can you give an example",
        "how does this help your english",
        "what is the most important point",
    ]
    .map(String::from)
    .to_vec()
}

fn default_generic_intros() -> Vec<String> {
    vec!["in this module, you will learn about".to_string()]
}

fn default_generic_examples() -> Vec<String> {
    [
        "this is an example",
        "here's how we use this grammar",
        "practice makes perfect",
    ]
    .map(String::from)
    .to_vec()
}

fn default_generic_tips() -> Vec<String> {
    vec!["Practice this topic regularly to improve your English proficiency.".to_string()]
}

/// Thresholds and phrase lists for the content-quality audit
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AuditConfig {
    /// Speaking practice items every module should have
    #[serde(default = "default_expected_practice_count")]
    pub expected_practice_count: usize,
    #[serde(default = "default_min_title_len")]
    pub min_title_len: usize,
    #[serde(default = "default_min_description_len")]
    pub min_description_len: usize,
    #[serde(default = "default_min_intro_len")]
    pub min_intro_len: usize,
    #[serde(default = "default_min_tip_len")]
    pub min_tip_len: usize,
    /// Answers shorter than this (other than yes/no/ok) are flagged
    #[serde(default = "default_min_answer_len")]
    pub min_answer_len: usize,
    /// Listening examples every module should have; fewer is an error, more a warning
    #[serde(default = "default_expected_listening_count")]
    pub expected_listening_count: usize,
    /// Listening examples shorter than this are flagged
    #[serde(default = "default_min_listening_example_len")]
    pub min_listening_example_len: usize,
    #[serde(default = "default_max_generic_questions")]
    pub max_generic_questions: usize,
    /// One answer reused for this many different questions looks like filler
    #[serde(default = "default_filler_answer_threshold")]
    pub filler_answer_threshold: usize,
    /// Lower-case phrases that mark an intro as containing Turkish explanation
    #[serde(default = "default_turkish_indicators")]
    pub turkish_indicators: Vec<String>,
    #[serde(default = "default_generic_questions")]
    pub generic_questions: Vec<String>,
    #[serde(default = "default_generic_intros")]
    pub generic_intros: Vec<String>,
    #[serde(default = "default_generic_examples")]
    pub generic_examples: Vec<String>,
    #[serde(default = "default_generic_tips")]
    pub generic_tips: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            expected_practice_count: default_expected_practice_count(),
            min_title_len: default_min_title_len(),
            min_description_len: default_min_description_len(),
            min_intro_len: default_min_intro_len(),
            min_tip_len: default_min_tip_len(),
            min_answer_len: default_min_answer_len(),
            expected_listening_count: default_expected_listening_count(),
            min_listening_example_len: default_min_listening_example_len(),
            max_generic_questions: default_max_generic_questions(),
            filler_answer_threshold: default_filler_answer_threshold(),
            turkish_indicators: default_turkish_indicators(),
            generic_questions: default_generic_questions(),
            generic_intros: default_generic_intros(),
            generic_examples: default_generic_examples(),
            generic_tips: default_generic_tips(),
        }
    }
}
