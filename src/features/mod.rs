pub mod domain_analyzer;
pub mod entropy;
pub mod heuristics;
pub mod lexical;
pub mod structure;
pub mod subdomain;
pub mod tld_risk;

use crate::config::AssessorConfig;
use crate::decompose::{decompose, UrlComponents};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

pub use entropy::shannon_entropy;
pub use tld_risk::TldRiskAnalyzer;

/// Column schema expected by the classifier. Order matters.
pub const FEATURE_NAMES: [&str; 45] = [
    "url_length",
    "number_of_dots_in_url",
    "having_repeated_digits_in_url",
    "number_of_digits_in_url",
    "number_of_special_char_in_url",
    "number_of_hyphens_in_url",
    "number_of_underline_in_url",
    "number_of_slash_in_url",
    "number_of_questionmark_in_url",
    "number_of_equal_in_url",
    "number_of_at_in_url",
    "number_of_dollar_in_url",
    "number_of_exclamation_in_url",
    "number_of_hashtag_in_url",
    "number_of_percent_in_url",
    "domain_length",
    "number_of_dots_in_domain",
    "number_of_hyphens_in_domain",
    "having_special_characters_in_domain",
    "number_of_special_characters_in_domain",
    "having_digits_in_domain",
    "number_of_digits_in_domain",
    "having_repeated_digits_in_domain",
    "number_of_subdomains",
    "having_dot_in_subdomain",
    "having_hyphen_in_subdomain",
    "average_subdomain_length",
    "average_number_of_dots_in_subdomain",
    "average_number_of_hyphens_in_subdomain",
    "having_special_characters_in_subdomain",
    "number_of_special_characters_in_subdomain",
    "having_digits_in_subdomain",
    "number_of_digits_in_subdomain",
    "having_repeated_digits_in_subdomain",
    "having_path",
    "path_length",
    "having_query",
    "having_fragment",
    "having_anchor",
    "entropy_of_url",
    "entropy_of_domain",
    "protocol_of_url",
    "presence_of_html",
    "unusual_tld",
    "unusual_words",
];

/// A single feature value. Counts and flags are integers; entropy-like fields are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Int(v) => v as f64,
            FeatureValue::Float(v) => v,
        }
    }

    pub fn flag(condition: bool) -> Self {
        FeatureValue::Int(i64::from(condition))
    }

    pub fn count(n: usize) -> Self {
        FeatureValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Ordered, named feature values for one URL part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureVector {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: FeatureValue) {
        self.entries.push((name, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.entries.iter().copied()
    }

    /// Values in schema order, widened to f64 for numeric models.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| v.as_f64()).collect()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What each extractor sees: the raw part text and its decomposition.
pub struct FeatureInput<'a> {
    pub text: &'a str,
    pub components: &'a UrlComponents,
}

/// A group of adjacent columns in the schema.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector);
    fn name(&self) -> &str;
}

/// Runs every extractor in schema order.
pub struct FeatureEngine {
    extractors: Vec<Box<dyn FeatureExtractor>>,
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::from_config(&AssessorConfig::default())
    }
}

impl FeatureEngine {
    pub fn new(suspicious_tlds: &[String], suspicious_words: &[String]) -> Self {
        Self {
            extractors: vec![
                Box::new(lexical::LexicalAnalyzer::new()),
                Box::new(domain_analyzer::DomainAnalyzer::new()),
                Box::new(subdomain::SubdomainAnalyzer::new()),
                Box::new(structure::StructureAnalyzer::new()),
                Box::new(entropy::EntropyAnalyzer),
                Box::new(heuristics::HeuristicAnalyzer::new(
                    TldRiskAnalyzer::new(suspicious_tlds),
                    suspicious_words,
                )),
            ],
        }
    }

    pub fn from_config(config: &AssessorConfig) -> Self {
        Self::new(&config.suspicious_tlds, &config.suspicious_words)
    }

    pub fn extract(&self, text: &str, components: &UrlComponents) -> FeatureVector {
        let input = FeatureInput { text, components };
        let mut features = FeatureVector::with_capacity(FEATURE_NAMES.len());

        for extractor in &self.extractors {
            extractor.extract(&input, &mut features);
        }

        debug_assert!(
            features.names().eq(FEATURE_NAMES.iter().copied()),
            "extractors produced an out-of-schema vector"
        );
        features
    }

    /// Decompose `text` and extract its features.
    pub fn extract_text(&self, text: &str) -> FeatureVector {
        self.extract(text, &decompose(text))
    }

    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }
}
