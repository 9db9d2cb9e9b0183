//! Classifier boundary
//!
//! The assessor only needs something that turns a feature vector into a
//! two-class probability. [`LogisticModel`] is a small linear model that can
//! be exported from any training pipeline as YAML or JSON.

use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Two-class probability distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityPair {
    pub legitimate: f64,
    pub phishing: f64,
}

impl ProbabilityPair {
    pub fn from_phishing(phishing: f64) -> Self {
        Self {
            legitimate: 1.0 - phishing,
            phishing,
        }
    }

    /// Both values finite, inside [0, 1] and summing to 1.
    pub fn is_well_formed(&self) -> bool {
        let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        in_range(self.legitimate)
            && in_range(self.phishing)
            && (self.legitimate + self.phishing - 1.0).abs() <= PROBABILITY_TOLERANCE
    }
}

pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<ProbabilityPair, ModelError>;

    /// Column names the model was fit on, if it knows them.
    fn feature_schema(&self) -> Option<Vec<String>> {
        None
    }
}

impl<F> Classifier for F
where
    F: Fn(&FeatureVector) -> Result<ProbabilityPair, ModelError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<ProbabilityPair, ModelError> {
        self(features)
    }
}

/// Check a declared schema against the extractor's columns.
pub fn check_schema(schema: &[String]) -> Result<(), ModelError> {
    if schema.len() != FEATURE_NAMES.len() {
        return Err(ModelError::SchemaMismatch(format!(
            "expected {} columns, model has {}",
            FEATURE_NAMES.len(),
            schema.len()
        )));
    }

    for (index, (expected, actual)) in FEATURE_NAMES.iter().zip(schema).enumerate() {
        if expected != actual {
            return Err(ModelError::SchemaMismatch(format!(
                "column {} is {:?}, expected {:?}",
                index, actual, expected
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficient {
    pub feature: String,
    pub weight: f64,
}

/// Logistic regression over the 45 feature columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: Vec<Coefficient>,
}

impl LogisticModel {
    pub fn new(intercept: f64, coefficients: Vec<Coefficient>) -> Result<Self, ModelError> {
        let model = Self {
            intercept,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load a model from `.json`, or YAML for any other extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let model: LogisticModel = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ModelError::Parse(e.to_string()))?,
            _ => serde_yaml::from_str(&content).map_err(|e| ModelError::Parse(e.to_string()))?,
        };
        model.validate()?;

        log::info!(
            "Loaded logistic model from {} ({} coefficients)",
            path.display(),
            model.coefficients.len()
        );
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_schema(&self.schema())?;
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.weight.is_finite()) {
            return Err(ModelError::Parse("non-finite model parameter".to_string()));
        }
        Ok(())
    }

    fn schema(&self) -> Vec<String> {
        self.coefficients.iter().map(|c| c.feature.clone()).collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<ProbabilityPair, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::SchemaMismatch(format!(
                "vector has {} columns, model has {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        let z = self.intercept
            + features
                .iter()
                .zip(&self.coefficients)
                .map(|((_, value), c)| value.as_f64() * c.weight)
                .sum::<f64>();

        Ok(ProbabilityPair::from_phishing(sigmoid(z)))
    }

    fn feature_schema(&self) -> Option<Vec<String>> {
        Some(self.schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureEngine;

    fn zero_model(intercept: f64) -> LogisticModel {
        let coefficients = FEATURE_NAMES
            .iter()
            .map(|name| Coefficient {
                feature: name.to_string(),
                weight: 0.0,
            })
            .collect();
        LogisticModel::new(intercept, coefficients).unwrap()
    }

    #[test]
    fn test_probability_pair_validation() {
        assert!(ProbabilityPair::from_phishing(0.25).is_well_formed());
        assert!(!ProbabilityPair {
            legitimate: 0.5,
            phishing: 0.6
        }
        .is_well_formed());
        assert!(!ProbabilityPair {
            legitimate: 1.5,
            phishing: -0.5
        }
        .is_well_formed());
        assert!(!ProbabilityPair::from_phishing(f64::NAN).is_well_formed());
    }

    #[test]
    fn test_intercept_only_model() {
        let features = FeatureEngine::default().extract_text("https://example.com/");
        let pair = zero_model(0.0).predict(&features).unwrap();
        assert!((pair.phishing - 0.5).abs() < 1e-12);
        assert!(pair.is_well_formed());
    }

    #[test]
    fn test_weights_follow_schema_order() {
        let mut model = zero_model(-1.0);
        let index = FEATURE_NAMES
            .iter()
            .position(|n| *n == "unusual_tld")
            .unwrap();
        model.coefficients[index].weight = 3.0;

        let engine = FeatureEngine::default();
        let risky = model.predict(&engine.extract_text("http://a.example.xyz/")).unwrap();
        let plain = model.predict(&engine.extract_text("http://a.example.com/")).unwrap();
        assert!((risky.phishing - sigmoid(2.0)).abs() < 1e-12);
        assert!((plain.phishing - sigmoid(-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let mut model = zero_model(0.0);
        model.coefficients.swap(0, 1);
        assert!(matches!(model.validate(), Err(ModelError::SchemaMismatch(_))));

        model.coefficients.truncate(10);
        assert!(matches!(model.validate(), Err(ModelError::SchemaMismatch(_))));
    }

    #[test]
    fn test_yaml_model_parses() {
        let mut yaml = String::from("intercept: 0.5\ncoefficients:\n");
        for name in FEATURE_NAMES {
            yaml.push_str(&format!("  - feature: {}\n    weight: 0.0\n", name));
        }
        let model: LogisticModel = serde_yaml::from_str(&yaml).unwrap();
        assert!(model.validate().is_ok());
        assert_eq!(model.feature_schema().unwrap().len(), 45);
    }

    #[test]
    fn test_closures_are_classifiers() {
        let stub = |_: &FeatureVector| -> Result<ProbabilityPair, ModelError> {
            Ok(ProbabilityPair::from_phishing(0.9))
        };
        let features = FeatureEngine::default().extract_text("");
        assert_eq!(stub.predict(&features).unwrap().phishing, 0.9);
        assert!(stub.feature_schema().is_none());
    }
}
