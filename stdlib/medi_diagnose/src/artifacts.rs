//! Artifact store: encoder, classifier and precaution mapping loaded once

use crate::classifier::{Classifier, ClassifierArtifact};
use crate::encoder::{EncoderArtifact, FeatureVector, SymptomEncoder};
use crate::error::{ArtifactError, ClassifierError};
use crate::precautions::PrecautionMapping;
use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;

pub const MODEL_FILE: &str = "disease_model.json";
pub const ENCODER_FILE: &str = "symptom_encoder.json";
pub const PRECAUTIONS_FILE: &str = "precaution_mapping.json";

/// Immutable bundle of the three trained artifacts
pub struct ArtifactStore {
    encoder: SymptomEncoder,
    classifier: Box<dyn Classifier>,
    precautions: PrecautionMapping,
}

impl ArtifactStore {
    /// Load all three artifacts from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let encoder: EncoderArtifact = read_json(&dir.join(ENCODER_FILE))?;
        let encoder = SymptomEncoder::from_artifact(encoder)?;
        log::info!("loaded symptom encoder with {} symptoms", encoder.width());

        let model: ClassifierArtifact = read_json(&dir.join(MODEL_FILE))?;
        let classifier = model.into_classifier()?;
        log::info!(
            "loaded {} classifier with {} classes",
            classifier.backend_name(),
            classifier.classes().len()
        );

        let precautions: PrecautionMapping = read_json(&dir.join(PRECAUTIONS_FILE))?;
        log::info!("loaded precautions for {} diseases", precautions.len());

        Self::from_parts(encoder, classifier, precautions)
    }

    /// Assemble a store from already-built parts
    pub fn from_parts(
        encoder: SymptomEncoder,
        classifier: Box<dyn Classifier>,
        precautions: PrecautionMapping,
    ) -> Result<Self, ArtifactError> {
        if encoder.width() != classifier.n_features() {
            return Err(ArtifactError::DimensionMismatch {
                encoder: encoder.width(),
                classifier: classifier.n_features(),
            });
        }
        let missing = classifier
            .classes()
            .iter()
            .filter(|label| !precautions.contains(label))
            .count();
        if missing > 0 {
            log::warn!("{missing} disease labels have no precaution entry");
        }
        Ok(Self {
            encoder,
            classifier,
            precautions,
        })
    }

    pub fn symptoms(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn encoder(&self) -> &SymptomEncoder {
        &self.encoder
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn encode<S: AsRef<str> + Clone>(&self, symptoms: &[S]) -> FeatureVector {
        self.encoder.encode(symptoms)
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        self.classifier.predict(features)
    }

    pub fn precautions(&self, label: &str) -> Vec<String> {
        self.precautions.lookup(label)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
