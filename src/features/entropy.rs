use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};
use std::collections::HashMap;

/// Shannon entropy in bits of the character distribution of `text`.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut frequencies: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in text.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    let entropy: f64 = frequencies
        .values()
        .map(|&n| {
            let p = n as f64 / len;
            -p * p.log2()
        })
        .sum();

    // A single repeated symbol sums to -0.0
    if entropy > 0.0 {
        entropy
    } else {
        0.0
    }
}

pub struct EntropyAnalyzer;

impl FeatureExtractor for EntropyAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        features.push(
            "entropy_of_url",
            FeatureValue::Float(shannon_entropy(input.text)),
        );
        features.push(
            "entropy_of_domain",
            FeatureValue::Float(shannon_entropy(&input.components.authority)),
        );
    }

    fn name(&self) -> &str {
        "entropy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_inputs_have_zero_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("a"), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!(shannon_entropy("aaaa").is_sign_positive());
    }

    #[test]
    fn test_uniform_distributions() {
        assert!((shannon_entropy("ab") - 1.0).abs() < 1e-12);
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);
        assert!((shannon_entropy("aabbccdd") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Two distinct multi-byte characters, equally frequent
        assert!((shannon_entropy("éü") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_url_entropy() {
        let url = "http://secure-login.example-bank.co/update/verify?acct=1234";
        assert!((shannon_entropy(url) - 4.725614871285731).abs() < 1e-9);
        assert!((shannon_entropy("secure-login.example-bank.co") - 4.021640636343319).abs() < 1e-9);
    }
}
