//! Disease prediction from symptom sets for Medi
//!
//! Wraps three pre-trained artifacts (a multi-label symptom encoder, a
//! classifier and a precaution mapping) behind an immutable
//! [`PredictionService`]. The artifacts are produced by an external training
//! pipeline; this crate only loads and queries them.

pub mod artifacts;
pub mod backends;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod precautions;
pub mod service;

pub use artifacts::{ArtifactStore, ENCODER_FILE, MODEL_FILE, PRECAUTIONS_FILE};
pub use backends::{DecisionTreeClassifier, LinearClassifier, RandomForestClassifier};
pub use classifier::{Classifier, ClassifierArtifact};
pub use encoder::{EncoderArtifact, FeatureVector, SymptomEncoder};
pub use error::{ArtifactError, ClassifierError, EncodeError, PredictError};
pub use precautions::{PrecautionMapping, NO_DATA};
pub use service::{Prediction, PredictionService, UnknownSymptomPolicy};
