use unicode_normalization::UnicodeNormalization;

/// Text normalization used when comparing practice items
pub trait Preprocessor {
    // Default: NFKC, case-folded, typographic quotes flattened, whitespace collapsed
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text
            .nfkc()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                c => c,
            })
            .collect::<String>()
            .to_lowercase();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
