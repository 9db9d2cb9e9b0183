use super::lexical::{count_char, is_digit};
use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};
use std::collections::HashMap;

/// Counts over the authority (host[:port]).
pub struct DomainAnalyzer;

impl Default for DomainAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Some digit occurs more than once anywhere in `domain`.
    pub fn has_repeated_digit(domain: &str) -> bool {
        let mut seen: HashMap<char, usize> = HashMap::new();
        for c in domain.chars().filter(|&c| is_digit(c)) {
            let count = seen.entry(c).or_insert(0);
            *count += 1;
            if *count > 1 {
                return true;
            }
        }
        false
    }
}

impl FeatureExtractor for DomainAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        let domain = input.components.authority.as_str();
        let digits = domain.chars().filter(|&c| is_digit(c)).count();

        features.push("domain_length", FeatureValue::count(domain.chars().count()));
        features.push("number_of_dots_in_domain", FeatureValue::count(count_char(domain, '.')));
        features.push(
            "number_of_hyphens_in_domain",
            FeatureValue::count(count_char(domain, '-')),
        );
        // Set whenever the domain has any alphanumeric character; the model was fit on this
        features.push(
            "having_special_characters_in_domain",
            FeatureValue::flag(domain.chars().any(|c| c.is_alphanumeric())),
        );
        features.push(
            "number_of_special_characters_in_domain",
            FeatureValue::count(domain.chars().filter(|c| !c.is_alphanumeric()).count()),
        );
        features.push("having_digits_in_domain", FeatureValue::flag(digits > 0));
        features.push("number_of_digits_in_domain", FeatureValue::count(digits));
        features.push(
            "having_repeated_digits_in_domain",
            FeatureValue::flag(Self::has_repeated_digit(domain)),
        );
    }

    fn name(&self) -> &str {
        "domain"
    }
}
