use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};
use regex::Regex;

/// Path, query and fragment presence flags.
pub struct StructureAnalyzer {
    path_regex: Regex,
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureAnalyzer {
    pub fn new() -> Self {
        Self {
            path_regex: Regex::new(r"//[^/]+(/.*)").unwrap(),
        }
    }

    /// Length of everything from the first slash after the host, query included.
    /// Zero when the text has no `//host/` prefix.
    pub fn path_length(&self, text: &str) -> usize {
        self.path_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().chars().count())
            .unwrap_or(0)
    }
}

impl FeatureExtractor for StructureAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        let text = input.text;
        let has_fragment = text.contains('#');

        features.push(
            "having_path",
            FeatureValue::flag(input.components.path.starts_with('/')),
        );
        features.push("path_length", FeatureValue::count(self.path_length(text)));
        features.push("having_query", FeatureValue::flag(text.contains('?')));
        features.push("having_fragment", FeatureValue::flag(has_fragment));
        // Kept as its own column, the model has both
        features.push("having_anchor", FeatureValue::flag(has_fragment));
    }

    fn name(&self) -> &str {
        "structure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose;

    fn run(text: &str) -> FeatureVector {
        let components = decompose(text);
        let mut features = FeatureVector::default();
        StructureAnalyzer::new().extract(
            &FeatureInput {
                text,
                components: &components,
            },
            &mut features,
        );
        features
    }

    #[test]
    fn test_path_length_includes_query() {
        let analyzer = StructureAnalyzer::new();
        assert_eq!(analyzer.path_length("http://a.com/update/verify?acct=1234"), 24);
        assert_eq!(analyzer.path_length("http://a.com"), 0);
        assert_eq!(analyzer.path_length("/update/verify"), 0);
        assert_eq!(analyzer.path_length(""), 0);
    }

    #[test]
    fn test_having_path() {
        assert_eq!(run("http://a.com/x").get("having_path"), Some(FeatureValue::Int(1)));
        assert_eq!(run("/").get("having_path"), Some(FeatureValue::Int(1)));
        assert_eq!(run("http://a.com").get("having_path"), Some(FeatureValue::Int(0)));
        assert_eq!(run("a.com/x").get("having_path"), Some(FeatureValue::Int(0)));
    }

    #[test]
    fn test_anchor_mirrors_fragment() {
        let features = run("http://a.com/#section");
        assert_eq!(features.get("having_fragment"), Some(FeatureValue::Int(1)));
        assert_eq!(features.get("having_anchor"), Some(FeatureValue::Int(1)));
        assert_eq!(features.get("having_query"), Some(FeatureValue::Int(0)));

        let features = run("http://a.com/?q=1");
        assert_eq!(features.get("having_fragment"), Some(FeatureValue::Int(0)));
        assert_eq!(features.get("having_anchor"), Some(FeatureValue::Int(0)));
        assert_eq!(features.get("having_query"), Some(FeatureValue::Int(1)));
    }
}
