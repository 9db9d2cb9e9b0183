pub mod assessor;
pub mod classifier;
pub mod config;
pub mod decompose;
pub mod error;
pub mod features;
pub mod gate;

pub use assessor::{assess, Assessment, Assessor, Part, PartResult, Verdict, VerdictLabel};
pub use classifier::{Classifier, LogisticModel, ProbabilityPair};
pub use config::{AssessorConfig, Band, PartWeights};
pub use decompose::{decompose, UrlComponents};
pub use error::{AssessError, ConfigError, GateError, ModelError};
pub use features::{FeatureEngine, FeatureValue, FeatureVector, FEATURE_NAMES};
pub use gate::validate_url;
