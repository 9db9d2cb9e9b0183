//! Error types for configuration, model loading and URL assessment.

use thiserror::Error;

/// Problems with the weight table, banding table or reference lists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Part weights must sum to 1, got {0}")]
    WeightSum(f64),

    #[error("Part weight for {part} must be a finite non-negative number, got {value}")]
    InvalidWeight { part: &'static str, value: f64 },

    #[error("Banding table is empty")]
    NoBands,

    #[error("Banding table must cover [0, 100]: {0}")]
    BandCoverage(String),

    #[error("Failed to read configuration: {0}")]
    Io(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Problems loading or evaluating a classifier model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model feature schema does not match the extractor: {0}")]
    SchemaMismatch(String),

    #[error("Failed to read model: {0}")]
    Io(String),

    #[error("Failed to parse model: {0}")]
    Parse(String),

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by [`crate::Assessor`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Classifier returned malformed probabilities for {part}: legitimate={legitimate}, phishing={phishing}")]
    MalformedProbabilities {
        part: &'static str,
        legitimate: f64,
        phishing: f64,
    },

    #[error("Part evaluation task failed: {0}")]
    TaskFailed(String),
}

/// Reasons the input gate rejects a URL before assessment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Invalid or local URL: {0}")]
    LocalAddress(String),
}

impl From<url::ParseError> for GateError {
    fn from(err: url::ParseError) -> Self {
        GateError::InvalidFormat(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::WeightSum(0.9).to_string(),
            "Part weights must sum to 1, got 0.9"
        );
        assert_eq!(
            GateError::InvalidScheme("ftp".to_string()).to_string(),
            "Invalid URL scheme: ftp"
        );
    }

    #[test]
    fn test_config_error_wraps_into_assess_error() {
        let err: AssessError = ConfigError::NoBands.into();
        assert_eq!(err.to_string(), "Banding table is empty");
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let gate_error: GateError = url::ParseError::EmptyHost.into();

        match gate_error {
            GateError::InvalidFormat(_) => (),
            _ => panic!("Expected InvalidFormat variant"),
        }
    }
}
