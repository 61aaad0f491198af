//! Pluggable classifier backends
//!
//! A classifier maps one feature vector to exactly one disease label. The
//! concrete model family is chosen by the `kind` tag of the serialized
//! artifact; see [`ClassifierArtifact`].

use crate::backends::{DecisionTreeClassifier, LinearClassifier, RandomForestClassifier};
use crate::encoder::FeatureVector;
use crate::error::{ArtifactError, ClassifierError};
use serde::{Deserialize, Serialize};

/// Trait for trained classification models
pub trait Classifier: Send + Sync {
    /// Labels the model can emit, in class-index order
    fn classes(&self) -> &[String];

    /// Width of the feature vectors the model accepts
    fn n_features(&self) -> usize;

    /// Predict the label of a single case
    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError>;

    /// Predict one label per row
    fn predict_batch(&self, batch: &[FeatureVector]) -> Result<Vec<String>, ClassifierError> {
        batch.iter().map(|row| self.predict(row)).collect()
    }

    fn backend_name(&self) -> &str;
}

/// Serialized classifier, tagged by model family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear(LinearClassifier),
    DecisionTree(DecisionTreeClassifier),
    RandomForest(RandomForestClassifier),
}

impl ClassifierArtifact {
    /// Validate the model parameters and hand back a ready classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        match self {
            ClassifierArtifact::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ClassifierArtifact::DecisionTree(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ClassifierArtifact::RandomForest(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

pub(crate) fn check_width(expected: usize, features: &FeatureVector) -> Result<(), ClassifierError> {
    if features.len() != expected {
        return Err(ClassifierError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Index of the first maximum; NaN scores never win
pub(crate) fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if score <= b => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn label_at(classes: &[String], scores: &[f32]) -> Result<String, ClassifierError> {
    argmax(scores)
        .and_then(|i| classes.get(i))
        .cloned()
        .ok_or(ClassifierError::NoDecision)
}

pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        name: name.to_string(),
        reason: reason.into(),
    }
}
