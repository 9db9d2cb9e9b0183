use super::lexical::has_adjacent_repeated_digit;
use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};
use regex::Regex;

const SUBDOMAIN_SPECIALS: [char; 6] = ['!', '#', '$', '%', '&', '~'];

/// Statistics over the subdomain labels (everything before the last two labels).
///
/// The two integer averages truncate toward zero and the dot "average" is the
/// dot count of the joined subdomain. These match the values the shipped
/// models were trained on; changing them requires retraining.
pub struct SubdomainAnalyzer {
    digit_regex: Regex,
}

impl Default for SubdomainAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubdomainAnalyzer {
    pub fn new() -> Self {
        Self {
            digit_regex: Regex::new(r"\d").unwrap(),
        }
    }
}

fn truncated_average(total: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        total / count
    }
}

impl FeatureExtractor for SubdomainAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        let labels = &input.components.subdomain_labels;
        let joined = input.components.subdomain();

        let total_length: usize = labels.iter().map(|l| l.chars().count()).sum();
        let total_hyphens: usize = labels.iter().map(|l| l.matches('-').count()).sum();
        let specials = joined
            .chars()
            .filter(|c| SUBDOMAIN_SPECIALS.contains(c))
            .count();
        let digits = self.digit_regex.find_iter(&joined).count();

        features.push("number_of_subdomains", FeatureValue::count(labels.len()));
        features.push("having_dot_in_subdomain", FeatureValue::flag(joined.contains('.')));
        features.push(
            "having_hyphen_in_subdomain",
            FeatureValue::flag(labels.iter().any(|l| l.contains('-'))),
        );
        features.push(
            "average_subdomain_length",
            FeatureValue::count(truncated_average(total_length, labels.len())),
        );
        features.push(
            "average_number_of_dots_in_subdomain",
            FeatureValue::Float(joined.matches('.').count() as f64),
        );
        features.push(
            "average_number_of_hyphens_in_subdomain",
            FeatureValue::count(truncated_average(total_hyphens, labels.len())),
        );
        features.push(
            "having_special_characters_in_subdomain",
            FeatureValue::flag(specials > 0),
        );
        features.push(
            "number_of_special_characters_in_subdomain",
            FeatureValue::count(specials),
        );
        features.push("having_digits_in_subdomain", FeatureValue::flag(digits > 0));
        features.push("number_of_digits_in_subdomain", FeatureValue::count(digits));
        // Checked over the whole authority, not just the subdomain
        features.push(
            "having_repeated_digits_in_subdomain",
            FeatureValue::flag(has_adjacent_repeated_digit(&input.components.authority)),
        );
    }

    fn name(&self) -> &str {
        "subdomain"
    }
}
