use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Everything the assessor needs besides the classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessorConfig {
    #[serde(default)]
    pub weights: PartWeights,
    #[serde(default = "default_bands")]
    pub bands: Vec<Band>,
    #[serde(default = "default_suspicious_tlds")]
    pub suspicious_tlds: Vec<String>,
    #[serde(default = "default_suspicious_words")]
    pub suspicious_words: Vec<String>,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            weights: PartWeights::default(),
            bands: default_bands(),
            suspicious_tlds: default_suspicious_tlds(),
            suspicious_words: default_suspicious_words(),
        }
    }
}

impl AssessorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AssessorConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::info!(
            "Loaded assessor configuration from {} ({} bands, {} TLDs, {} words)",
            path.as_ref().display(),
            config.bands.len(),
            config.suspicious_tlds.len(),
            config.suspicious_words.len()
        );
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in tables.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            log::warn!(
                "Config file not found: {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        validate_bands(&self.bands)
    }
}

/// Per-part contribution to the final score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PartWeights {
    pub full_url: f64,
    pub domain: f64,
    pub path: f64,
}

impl Default for PartWeights {
    fn default() -> Self {
        Self {
            full_url: 0.3,
            domain: 0.6,
            path: 0.1,
        }
    }
}

impl PartWeights {
    pub fn sum(&self) -> f64 {
        self.full_url + self.domain + self.path
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (part, value) in [
            ("full_url", self.full_url),
            ("domain", self.domain),
            ("path", self.path),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { part, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE * sum.abs().max(1.0) {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// One row of the banding table. Matches `[min, max)`; the last row of a
/// table also includes `max`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub message: String,
}

impl Band {
    fn new(min: f64, max: f64, message: &str) -> Self {
        Self {
            min,
            max,
            message: message.to_string(),
        }
    }

    /// `[min, max)`, or `[min, max]` when `closed` is set.
    pub fn contains(&self, percentage: f64, closed: bool) -> bool {
        let below_max = if closed {
            percentage <= self.max
        } else {
            percentage < self.max
        };
        self.min <= percentage && below_max
    }
}

fn validate_bands(bands: &[Band]) -> Result<(), ConfigError> {
    let (first, last) = match (bands.first(), bands.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ConfigError::NoBands),
    };

    if first.min != 0.0 {
        return Err(ConfigError::BandCoverage(format!(
            "first band starts at {}",
            first.min
        )));
    }
    if last.max != 100.0 {
        return Err(ConfigError::BandCoverage(format!(
            "last band ends at {}",
            last.max
        )));
    }
    for band in bands {
        if band.min.is_nan() || band.max.is_nan() || band.min > band.max {
            return Err(ConfigError::BandCoverage(format!(
                "band [{}, {}] is inverted",
                band.min, band.max
            )));
        }
    }
    for pair in bands.windows(2) {
        if pair[0].max != pair[1].min {
            return Err(ConfigError::BandCoverage(format!(
                "gap or overlap between {} and {}",
                pair[0].max, pair[1].min
            )));
        }
    }
    Ok(())
}

fn default_bands() -> Vec<Band> {
    vec![
        Band::new(0.0, 10.0, "Extremely safe! This URL is as legitimate as it gets. 🌟"),
        Band::new(10.0, 20.0, "Very safe! Almost no signs of phishing. 😊"),
        Band::new(20.0, 30.0, "Mostly safe. Legitimate with minimal risk. 😌"),
        Band::new(
            30.0,
            40.0,
            "Somewhat safe. Could have minor risks. Proceed cautiously. 🤔",
        ),
        Band::new(
            40.0,
            50.0,
            "Neutral zone. Not clearly safe or unsafe. Stay alert! ⚖️",
        ),
        Band::new(
            50.0,
            60.0,
            "Slightly suspicious. Could be phishing. Be careful. 🧐",
        ),
        Band::new(
            60.0,
            70.0,
            "Moderately suspicious. Likely phishing. Avoid if possible. 🚨",
        ),
        Band::new(70.0, 80.0, "High risk of phishing! Do not trust this URL. ⚡"),
        Band::new(80.0, 90.0, "Severely suspicious. This URL screams danger. ❌"),
        Band::new(
            90.0,
            100.0,
            "Extremely dangerous! Definitely phishing. Stay away at all costs! 🔥",
        ),
    ]
}

fn default_suspicious_tlds() -> Vec<String> {
    [
        "xyz", "top", "club", "work", "online", "site", "win", "racing", "date", "space",
        "download", "link", "pro", "tech", "pw", "info", "cc", "tk", "ml", "ga", "cf", "gq", "cn",
        "co", "io", "me", "gov",
    ]
    .iter()
    .map(|tld| tld.to_string())
    .collect()
}

fn default_suspicious_words() -> Vec<String> {
    [
        "login",
        "account",
        "secure",
        "update",
        "verify",
        "password",
        "bank",
        "payment",
        "credentials",
        "support",
        "confirm",
        "help",
        "claim",
        "customer",
        "service",
        "thanks",
        "app",
        "securelogin",
        "signup",
        "activation",
        "submit",
        "withdraw",
        "invoice",
        "receipt",
        "paypal",
        "transfer",
        "alert",
        "reward",
        "security",
        "check",
        "gift",
        "social",
        "creditcard",
        "webmail",
        "affiliate",
        "disclaimer",
        "protected",
        "doc",
        "file",
        "important",
        "warning",
        "email",
        "promo",
        "free",
        "lottery",
        "unsubscribe",
        "urgent",
        "download",
        "banking",
        "myaccount",
        "click",
        "offer",
        "clickhere",
        "passwordreset",
        "serviceupdate",
        "newuser",
        "confidential",
        "confirms",
        "checkyourbalance",
        "accountupdate",
        "securityalert",
        "logininfo",
        "change",
        "systemalert",
        "verifyaccount",
        "newpassword",
    ]
    .iter()
    .map(|word| word.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AssessorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bands.len(), 10);
        assert_eq!(config.suspicious_tlds.len(), 27);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = PartWeights {
            full_url: 0.3,
            domain: 0.6,
            path: 0.2,
        };
        assert!(matches!(weights.validate(), Err(ConfigError::WeightSum(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = PartWeights {
            full_url: -0.1,
            domain: 1.0,
            path: 0.1,
        };
        assert_eq!(
            weights.validate(),
            Err(ConfigError::InvalidWeight {
                part: "full_url",
                value: -0.1
            })
        );
    }

    #[test]
    fn test_band_gap_rejected() {
        let mut config = AssessorConfig::default();
        config.bands.remove(3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BandCoverage(_))
        ));

        config.bands.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoBands));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "weights:\n  full_url: 0.2\n  domain: 0.5\n  path: 0.3\nsuspicious_tlds: [\".zip\"]\n";
        let config: AssessorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.weights.path, 0.3);
        assert_eq!(config.suspicious_tlds, vec![".zip".to_string()]);
        assert_eq!(config.bands.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let config = AssessorConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed: AssessorConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AssessorConfig::load_or_default("/nonexistent/url-sentinel.yaml").unwrap();
        assert_eq!(config, AssessorConfig::default());
    }
}
