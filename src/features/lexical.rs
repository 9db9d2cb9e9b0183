use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};
use regex::Regex;
use std::sync::OnceLock;

/// Character-level counts over the whole part text.
pub struct LexicalAnalyzer {
    digit_regex: Regex,
    special_regex: Regex,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            digit_regex: Regex::new(r"\d").unwrap(),
            // Neither a word character nor whitespace, Unicode-aware
            special_regex: Regex::new(r"[^\w\s]").unwrap(),
        }
    }

    pub fn count_digits(&self, text: &str) -> usize {
        self.digit_regex.find_iter(text).count()
    }

    pub fn count_special(&self, text: &str) -> usize {
        self.special_regex.find_iter(text).count()
    }
}

/// Decimal digit, the same class the `\d` counts match. Fractions and
/// roman numerals are not digits.
pub fn is_digit(c: char) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    let digit = DIGIT.get_or_init(|| Regex::new(r"^\d$").unwrap());
    let mut buf = [0u8; 4];
    digit.is_match(c.encode_utf8(&mut buf))
}

/// True when two identical digits sit next to each other, e.g. "a11b".
pub fn has_adjacent_repeated_digit(text: &str) -> bool {
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if is_digit(c) && previous == Some(c) {
            return true;
        }
        previous = Some(c);
    }
    false
}

pub fn count_char(text: &str, target: char) -> usize {
    text.chars().filter(|&c| c == target).count()
}

impl FeatureExtractor for LexicalAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        let text = input.text;

        features.push("url_length", FeatureValue::count(text.chars().count()));
        features.push("number_of_dots_in_url", FeatureValue::count(count_char(text, '.')));
        features.push(
            "having_repeated_digits_in_url",
            FeatureValue::flag(has_adjacent_repeated_digit(text)),
        );
        features.push("number_of_digits_in_url", FeatureValue::count(self.count_digits(text)));
        features.push(
            "number_of_special_char_in_url",
            FeatureValue::count(self.count_special(text)),
        );
        features.push("number_of_hyphens_in_url", FeatureValue::count(count_char(text, '-')));
        features.push("number_of_underline_in_url", FeatureValue::count(count_char(text, '_')));
        features.push(
            "number_of_slash_in_url",
            FeatureValue::count(text.chars().filter(|&c| c == '/' || c == '\\').count()),
        );

        for (name, target) in [
            ("number_of_questionmark_in_url", '?'),
            ("number_of_equal_in_url", '='),
            ("number_of_at_in_url", '@'),
            ("number_of_dollar_in_url", '$'),
            ("number_of_exclamation_in_url", '!'),
            ("number_of_hashtag_in_url", '#'),
            ("number_of_percent_in_url", '%'),
        ] {
            features.push(name, FeatureValue::count(count_char(text, target)));
        }
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
