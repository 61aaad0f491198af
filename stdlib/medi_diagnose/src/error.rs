//! Error types for artifact loading, encoding and prediction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or assembling the artifact store
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact {name}: {reason}")]
    Invalid { name: String, reason: String },
    #[error("encoder knows {encoder} symptoms but classifier expects {classifier} features")]
    DimensionMismatch { encoder: usize, classifier: usize },
}

/// Errors raised by the symptom encoder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Unknown symptoms: {}", .0.join(", "))]
    UnknownSymptoms(Vec<String>),
}

/// Errors raised by a classifier backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("classifier produced no decision")]
    NoDecision,
    #[error("{0}")]
    Backend(String),
}

/// Errors surfaced by the prediction service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("No symptoms provided")]
    NoSymptoms,
    #[error(transparent)]
    Encoding(#[from] EncodeError),
    #[error("inference failed: {0}")]
    Inference(#[from] ClassifierError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symptoms_message_lists_inputs() {
        let err = EncodeError::UnknownSymptoms(vec!["foo".into(), "bar".into()]);
        assert_eq!(err.to_string(), "Unknown symptoms: foo, bar");
    }

    #[test]
    fn no_symptoms_message_is_fixed() {
        assert_eq!(PredictError::NoSymptoms.to_string(), "No symptoms provided");
    }

    #[test]
    fn inference_error_wraps_classifier_error() {
        let err: PredictError = ClassifierError::DimensionMismatch {
            expected: 3,
            actual: 2,
        }
        .into();
        assert_eq!(err.to_string(), "inference failed: expected 3 features, got 2");
    }
}
