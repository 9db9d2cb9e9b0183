use super::tld_risk::TldRiskAnalyzer;
use super::{FeatureExtractor, FeatureInput, FeatureValue, FeatureVector};

const PAGE_SUFFIXES: [&str; 4] = [".html", ".html/", ".php", ".php/"];

/// Protocol category plus the page-type, TLD and vocabulary heuristics.
pub struct HeuristicAnalyzer {
    tld_risk: TldRiskAnalyzer,
    suspicious_words: Vec<String>,
}

impl HeuristicAnalyzer {
    pub fn new(tld_risk: TldRiskAnalyzer, suspicious_words: &[String]) -> Self {
        let suspicious_words = suspicious_words
            .iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            tld_risk,
            suspicious_words,
        }
    }

    /// 0 for https, 1 for http, -1 for anything else.
    pub fn protocol_category(scheme: &str) -> i64 {
        match scheme {
            "https" => 0,
            "http" => 1,
            _ => -1,
        }
    }

    pub fn is_page_path(path: &str) -> bool {
        let path = path.to_lowercase();
        PAGE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
    }

    /// First suspicious word contained in `text`, case-insensitively.
    pub fn find_suspicious_word(&self, text: &str) -> Option<&str> {
        let text = text.to_lowercase();
        self.suspicious_words
            .iter()
            .find(|word| text.contains(word.as_str()))
            .map(|word| word.as_str())
    }
}

impl FeatureExtractor for HeuristicAnalyzer {
    fn extract(&self, input: &FeatureInput<'_>, features: &mut FeatureVector) {
        let components = input.components;

        features.push(
            "protocol_of_url",
            FeatureValue::Int(Self::protocol_category(&components.scheme)),
        );
        features.push(
            "presence_of_html",
            FeatureValue::flag(Self::is_page_path(&components.path)),
        );
        features.push(
            "unusual_tld",
            FeatureValue::flag(self.tld_risk.has_unusual_tld(&components.authority)),
        );

        let word = self.find_suspicious_word(input.text);
        if let Some(word) = word {
            log::trace!("suspicious word {:?} in {:?}", word, input.text);
        }
        features.push("unusual_words", FeatureValue::flag(word.is_some()));
    }

    fn name(&self) -> &str {
        "heuristics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssessorConfig;
    use crate::decompose::decompose;

    fn analyzer() -> HeuristicAnalyzer {
        let config = AssessorConfig::default();
        HeuristicAnalyzer::new(
            TldRiskAnalyzer::new(&config.suspicious_tlds),
            &config.suspicious_words,
        )
    }

    fn run(text: &str) -> FeatureVector {
        let components = decompose(text);
        let mut features = FeatureVector::default();
        analyzer().extract(
            &FeatureInput {
                text,
                components: &components,
            },
            &mut features,
        );
        features
    }

    #[test]
    fn test_protocol_category() {
        assert_eq!(HeuristicAnalyzer::protocol_category("https"), 0);
        assert_eq!(HeuristicAnalyzer::protocol_category("http"), 1);
        assert_eq!(HeuristicAnalyzer::protocol_category("ftp"), -1);
        assert_eq!(HeuristicAnalyzer::protocol_category(""), -1);
        assert_eq!(run("HTTPS://a.com").get("protocol_of_url"), Some(FeatureValue::Int(0)));
    }

    #[test]
    fn test_page_suffixes() {
        assert!(HeuristicAnalyzer::is_page_path("/index.HTML"));
        assert!(HeuristicAnalyzer::is_page_path("/login.php/"));
        assert!(!HeuristicAnalyzer::is_page_path("/index.htm"));
        assert!(!HeuristicAnalyzer::is_page_path(""));
        // Query does not hide the page suffix
        assert_eq!(
            run("http://a.com/login.php?next=/").get("presence_of_html"),
            Some(FeatureValue::Int(1))
        );
    }

    #[test]
    fn test_suspicious_words() {
        let analyzer = analyzer();
        assert_eq!(analyzer.find_suspicious_word("http://x.com/VERIFY-now"), Some("verify"));
        assert_eq!(analyzer.find_suspicious_word("http://example.com/"), None);
        assert_eq!(run("https://www.wikipedia.org/").get("unusual_words"), Some(FeatureValue::Int(0)));
        assert_eq!(run("/reVerify").get("unusual_words"), Some(FeatureValue::Int(1)));
    }

    #[test]
    fn test_unusual_tld_uses_authority() {
        assert_eq!(run("http://mail.example.xyz/").get("unusual_tld"), Some(FeatureValue::Int(1)));
        assert_eq!(run("http://example.com/").get("unusual_tld"), Some(FeatureValue::Int(0)));
        // A bare domain has no authority
        assert_eq!(run("example.xyz").get("unusual_tld"), Some(FeatureValue::Int(0)));
    }
}
