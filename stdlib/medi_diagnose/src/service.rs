//! Prediction service: encode, classify, look up precautions

use crate::artifacts::ArtifactStore;
use crate::error::PredictError;
use serde::{Deserialize, Serialize};

/// What to do with symptoms outside the encoder's vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSymptomPolicy {
    /// Drop them; the prediction uses only the known ones
    #[default]
    Ignore,
    /// Fail the request with [`crate::EncodeError::UnknownSymptoms`]
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    pub precautions: Vec<String>,
}

pub struct PredictionService {
    store: ArtifactStore,
    policy: UnknownSymptomPolicy,
}

impl PredictionService {
    pub fn new(store: ArtifactStore, policy: UnknownSymptomPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn policy(&self) -> UnknownSymptomPolicy {
        self.policy
    }

    /// Full symptom vocabulary in a stable order
    pub fn symptoms(&self) -> &[String] {
        self.store.symptoms()
    }

    pub fn predict<S: AsRef<str> + Clone>(&self, symptoms: &[S]) -> Result<Prediction, PredictError> {
        if symptoms.is_empty() {
            return Err(PredictError::NoSymptoms);
        }

        let features = match self.policy {
            UnknownSymptomPolicy::Reject => self.store.encoder().encode_strict(symptoms)?,
            UnknownSymptomPolicy::Ignore => {
                let unknown = self.store.encoder().unknown(symptoms);
                if !unknown.is_empty() {
                    log::warn!("ignoring unknown symptoms: {}", unknown.join(", "));
                }
                self.store.encode(symptoms)
            }
        };

        let disease = self.store.predict(&features)?;
        let precautions = self.store.precautions(&disease);
        log::debug!(
            "predicted '{disease}' from {} of {} symptoms",
            features.active(),
            symptoms.len()
        );

        Ok(Prediction {
            disease,
            precautions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::LinearClassifier;
    use crate::encoder::SymptomEncoder;
    use crate::error::EncodeError;
    use crate::precautions::{PrecautionMapping, NO_DATA};

    fn service(policy: UnknownSymptomPolicy) -> PredictionService {
        let encoder =
            SymptomEncoder::new(vec!["cough".into(), "fever".into(), "itching".into()]).unwrap();
        let classifier = LinearClassifier::new(
            vec!["Flu".into(), "Allergy".into(), "Healthy".into()],
            vec![
                vec![1.0, 1.0, 0.0],
                vec![0.0, 0.0, 2.0],
                vec![0.0, 0.0, 0.0],
            ],
            vec![0.0, 0.0, 0.5],
        )
        .unwrap();
        let precautions: PrecautionMapping = [(
            "Flu".to_string(),
            vec!["rest".to_string(), "hydrate".to_string()],
        )]
        .into_iter()
        .collect();
        let store = ArtifactStore::from_parts(encoder, Box::new(classifier), precautions).unwrap();
        PredictionService::new(store, policy)
    }

    #[test]
    fn fever_and_cough_predict_flu() {
        let p = service(UnknownSymptomPolicy::Ignore)
            .predict(&["fever", "cough"])
            .unwrap();
        assert_eq!(p.disease, "Flu");
        assert_eq!(p.precautions, vec!["rest", "hydrate"]);
    }

    #[test]
    fn unmapped_label_gets_placeholder() {
        let p = service(UnknownSymptomPolicy::Ignore)
            .predict(&["itching"])
            .unwrap();
        assert_eq!(p.disease, "Allergy");
        assert_eq!(p.precautions, vec![NO_DATA]);
    }

    #[test]
    fn unknown_only_behaves_like_zero_vector() {
        let p = service(UnknownSymptomPolicy::Ignore)
            .predict(&["not_a_real_symptom"])
            .unwrap();
        assert_eq!(p.disease, "Healthy");
    }

    #[test]
    fn reject_policy_fails_on_unknown() {
        let err = service(UnknownSymptomPolicy::Reject)
            .predict(&["fever", "not_a_real_symptom"])
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::Encoding(EncodeError::UnknownSymptoms(vec![
                "not_a_real_symptom".into()
            ]))
        );
    }

    #[test]
    fn empty_list_is_rejected() {
        let empty: Vec<String> = vec![];
        let err = service(UnknownSymptomPolicy::Ignore)
            .predict(&empty)
            .unwrap_err();
        assert_eq!(err, PredictError::NoSymptoms);
    }

    #[test]
    fn policy_parses_lowercase() {
        let p: UnknownSymptomPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(p, UnknownSymptomPolicy::Reject);
    }
}
