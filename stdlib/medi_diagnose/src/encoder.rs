//! Multi-label symptom encoder
//!
//! Maps a set of symptom names onto a fixed-width binary feature vector over
//! the vocabulary learned at training time. Names outside the vocabulary are
//! dropped by [`SymptomEncoder::transform`]; callers that need to know about
//! them use [`SymptomEncoder::unknown`] or [`SymptomEncoder::encode_strict`].

use crate::error::{ArtifactError, EncodeError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Binary feature vector, one position per known symptom
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of positions set to one
    pub fn active(&self) -> usize {
        self.0.iter().filter(|v| **v > 0.0).count()
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// On-disk form of the encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SymptomEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        if classes.is_empty() {
            return Err(ArtifactError::Invalid {
                name: "symptom encoder".into(),
                reason: "vocabulary is empty".into(),
            });
        }
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), i).is_some() {
                return Err(ArtifactError::Invalid {
                    name: "symptom encoder".into(),
                    reason: format!("duplicate symptom '{class}'"),
                });
            }
        }
        Ok(Self { classes, index })
    }

    pub fn from_artifact(artifact: EncoderArtifact) -> Result<Self, ArtifactError> {
        Self::new(artifact.classes)
    }

    /// Known vocabulary in training order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn width(&self) -> usize {
        self.classes.len()
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.index.contains_key(symptom)
    }

    /// Encode a batch of symptom sets, one feature vector per set
    pub fn transform<S: AsRef<str>>(&self, batch: &[Vec<S>]) -> Vec<FeatureVector> {
        batch
            .iter()
            .map(|symptoms| {
                let mut row = FeatureVector::zeros(self.width());
                for symptom in symptoms {
                    if let Some(&i) = self.index.get(symptom.as_ref()) {
                        row.0[i] = 1.0;
                    }
                }
                row
            })
            .collect()
    }

    /// Encode a single case; unknown symptoms are ignored
    pub fn encode<S: AsRef<str> + Clone>(&self, symptoms: &[S]) -> FeatureVector {
        self.transform(&[symptoms.to_vec()])
            .pop()
            .unwrap_or_else(|| FeatureVector::zeros(self.width()))
    }

    /// Symptoms outside the vocabulary, deduplicated, in input order
    pub fn unknown<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        symptoms
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !self.contains(s) && seen.insert(*s))
            .map(str::to_string)
            .collect()
    }

    pub fn encode_strict<S: AsRef<str> + Clone>(
        &self,
        symptoms: &[S],
    ) -> Result<FeatureVector, EncodeError> {
        let unknown = self.unknown(symptoms);
        if !unknown.is_empty() {
            return Err(EncodeError::UnknownSymptoms(unknown));
        }
        Ok(self.encode(symptoms))
    }
}
