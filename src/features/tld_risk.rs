use std::collections::HashSet;

/// Reputation lookup for top-level domains commonly abused for phishing.
#[derive(Debug, Clone, Default)]
pub struct TldRiskAnalyzer {
    suspicious_tlds: HashSet<String>,
}

impl TldRiskAnalyzer {
    /// Entries may be written as `xyz` or `.xyz`, in any case.
    pub fn new<S: AsRef<str>>(suspicious_tlds: &[S]) -> Self {
        let suspicious_tlds = suspicious_tlds
            .iter()
            .map(|tld| normalize_tld(tld.as_ref()))
            .filter(|tld| !tld.is_empty())
            .collect();

        Self { suspicious_tlds }
    }

    /// Last dot-separated label of `authority`, lower-cased.
    /// An authority without dots yields the whole authority.
    pub fn extract_tld(authority: &str) -> String {
        authority
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn is_suspicious_tld(&self, tld: &str) -> bool {
        self.suspicious_tlds.contains(&normalize_tld(tld))
    }

    pub fn has_unusual_tld(&self, authority: &str) -> bool {
        let tld = Self::extract_tld(authority);
        !tld.is_empty() && self.suspicious_tlds.contains(&tld)
    }

    pub fn len(&self) -> usize {
        self.suspicious_tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suspicious_tlds.is_empty()
    }
}

fn normalize_tld(tld: &str) -> String {
    tld.trim().trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssessorConfig;

    fn analyzer() -> TldRiskAnalyzer {
        TldRiskAnalyzer::new(&AssessorConfig::default().suspicious_tlds)
    }

    #[test]
    fn test_unusual_tld() {
        let analyzer = analyzer();
        assert!(analyzer.has_unusual_tld("mail.example.xyz"));
        assert!(!analyzer.has_unusual_tld("example.com"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(analyzer().has_unusual_tld("EXAMPLE.XYZ"));
        assert!(analyzer().is_suspicious_tld(".TK"));
    }

    #[test]
    fn test_dotted_entries_are_normalized() {
        let analyzer = TldRiskAnalyzer::new(&[".Zip", "mov", "."]);
        assert_eq!(analyzer.len(), 2);
        assert!(analyzer.has_unusual_tld("files.example.zip"));
        assert!(analyzer.has_unusual_tld("example.MOV"));
    }

    #[test]
    fn test_authority_without_dots() {
        let analyzer = analyzer();
        assert_eq!(TldRiskAnalyzer::extract_tld("top"), "top");
        assert!(analyzer.has_unusual_tld("top"));
        assert!(!analyzer.has_unusual_tld("localhost"));
        assert!(!analyzer.has_unusual_tld(""));
    }

    #[test]
    fn test_port_stays_attached_to_the_tld() {
        assert_eq!(TldRiskAnalyzer::extract_tld("example.xyz:8080"), "xyz:8080");
        assert!(!analyzer().has_unusual_tld("example.xyz:8080"));
    }
}
