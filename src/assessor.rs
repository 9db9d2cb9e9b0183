//! Multi-part URL assessment
//!
//! Featurizes the full URL, its authority and its path separately, asks the
//! classifier about each, then folds the three phishing probabilities into a
//! weighted percentage, a message band and a Risk/Safety label.

use crate::classifier::{check_schema, Classifier};
use crate::config::{AssessorConfig, Band, PartWeights};
use crate::decompose::decompose;
use crate::error::AssessError;
use crate::features::FeatureEngine;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const UNKNOWN_BAND_MESSAGE: &str = "Unknown risk level.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Part {
    FullUrl,
    Domain,
    Path,
}

impl Part {
    pub const ALL: [Part; 3] = [Part::FullUrl, Part::Domain, Part::Path];

    pub fn name(&self) -> &'static str {
        match self {
            Part::FullUrl => "Full URL",
            Part::Domain => "Domain",
            Part::Path => "Path",
        }
    }

    pub fn weight(&self, weights: &PartWeights) -> f64 {
        match self {
            Part::FullUrl => weights.full_url,
            Part::Domain => weights.domain,
            Part::Path => weights.path,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text of each part, in evaluation order. An empty path becomes "/".
pub fn part_texts(raw: &str) -> [(Part, String); 3] {
    let components = decompose(raw);
    let path = if components.path.is_empty() {
        "/".to_string()
    } else {
        components.path
    };

    [
        (Part::FullUrl, raw.to_string()),
        (Part::Domain, components.authority),
        (Part::Path, path),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartResult {
    pub part: Part,
    pub text: String,
    pub phishing_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictLabel {
    Risk,
    Safety,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Risk => "Risk Percentage",
            VerdictLabel::Safety => "Safety Percentage",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub phishing_percentage: f64,
    pub legitimate_percentage: f64,
    pub message: String,
    pub label: VerdictLabel,
    /// Percentage behind `label`, rounded to two decimals
    pub reported_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub parts: Vec<PartResult>,
}

/// Pick the band for `percentage`. Bands match `[min, max)`, the last one
/// `[min, max]`; the first match in table order wins.
pub fn select_band(bands: &[Band], percentage: f64) -> Option<&Band> {
    let last = bands.len().checked_sub(1)?;
    bands
        .iter()
        .enumerate()
        .find(|(index, band)| band.contains(percentage, *index == last))
        .map(|(_, band)| band)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted combination of per-part probabilities into a verdict.
pub fn combine(parts: &[PartResult], weights: &PartWeights, bands: &[Band]) -> Verdict {
    let weighted: f64 = parts
        .iter()
        .map(|p| p.part.weight(weights) * p.phishing_probability)
        .sum();

    let phishing_percentage = weighted * 100.0;
    let legitimate_percentage = 100.0 - phishing_percentage;

    let message = select_band(bands, phishing_percentage.clamp(0.0, 100.0))
        .map(|band| band.message.clone())
        .unwrap_or_else(|| UNKNOWN_BAND_MESSAGE.to_string());

    // A dead-even score reports as safety
    let (label, percentage) = if phishing_percentage > legitimate_percentage {
        (VerdictLabel::Risk, phishing_percentage)
    } else {
        (VerdictLabel::Safety, legitimate_percentage)
    };

    Verdict {
        phishing_percentage,
        legitimate_percentage,
        message,
        label,
        reported_percentage: round2(percentage),
    }
}

fn evaluate_part(
    engine: &FeatureEngine,
    classifier: &dyn Classifier,
    part: Part,
    text: String,
) -> Result<PartResult, AssessError> {
    let features = engine.extract_text(&text);
    let pair = classifier.predict(&features)?;

    if !pair.is_well_formed() {
        return Err(AssessError::MalformedProbabilities {
            part: part.name(),
            legitimate: pair.legitimate,
            phishing: pair.phishing,
        });
    }

    log::debug!(
        "{} {:?}: phishing probability {:.4}",
        part,
        text,
        pair.phishing
    );

    Ok(PartResult {
        part,
        text,
        phishing_probability: pair.phishing,
    })
}

/// Holds validated configuration, the feature engine and the classifier.
pub struct Assessor {
    config: AssessorConfig,
    engine: Arc<FeatureEngine>,
    classifier: Arc<dyn Classifier>,
}

impl Assessor {
    /// Fails when the weights or bands are invalid, or when the classifier
    /// declares a feature schema other than the extractor's.
    pub fn new(
        config: AssessorConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, AssessError> {
        config.validate()?;
        if let Some(schema) = classifier.feature_schema() {
            check_schema(&schema)?;
        }

        Ok(Self {
            engine: Arc::new(FeatureEngine::from_config(&config)),
            config,
            classifier,
        })
    }

    pub fn with_defaults(classifier: Arc<dyn Classifier>) -> Result<Self, AssessError> {
        Self::new(AssessorConfig::default(), classifier)
    }

    pub fn config(&self) -> &AssessorConfig {
        &self.config
    }

    pub fn engine(&self) -> &FeatureEngine {
        &self.engine
    }

    /// Evaluate the three parts in order and combine them.
    pub fn assess(&self, raw: &str) -> Result<Assessment, AssessError> {
        let parts = part_texts(raw)
            .into_iter()
            .map(|(part, text)| evaluate_part(&self.engine, self.classifier.as_ref(), part, text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.finish(raw, parts))
    }

    /// Same result as [`Assessor::assess`], with the parts evaluated on
    /// blocking worker tasks and joined before weighting.
    pub async fn assess_concurrent(&self, raw: &str) -> Result<Assessment, AssessError> {
        let handles: Vec<_> = part_texts(raw)
            .into_iter()
            .map(|(part, text)| {
                let engine = Arc::clone(&self.engine);
                let classifier = Arc::clone(&self.classifier);
                tokio::task::spawn_blocking(move || {
                    evaluate_part(&engine, classifier.as_ref(), part, text)
                })
            })
            .collect();

        let mut parts = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| AssessError::TaskFailed(e.to_string()))?;
            parts.push(result?);
        }

        Ok(self.finish(raw, parts))
    }

    fn finish(&self, raw: &str, parts: Vec<PartResult>) -> Assessment {
        let verdict = combine(&parts, &self.config.weights, &self.config.bands);
        log::debug!(
            "{:?}: phishing {:.2}% -> {} {:.2}%",
            raw,
            verdict.phishing_percentage,
            verdict.label,
            verdict.reported_percentage
        );
        Assessment { verdict, parts }
    }
}

/// One-shot assessment with the built-in tables.
pub fn assess(raw: &str, classifier: &dyn Classifier) -> Result<Verdict, AssessError> {
    if let Some(schema) = classifier.feature_schema() {
        check_schema(&schema)?;
    }

    let config = AssessorConfig::default();
    let engine = FeatureEngine::from_config(&config);

    let parts = part_texts(raw)
        .into_iter()
        .map(|(part, text)| evaluate_part(&engine, classifier, part, text))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(combine(&parts, &config.weights, &config.bands))
}
