//! One-vs-rest linear classifier: score_k = W_k·x + b_k, label = argmax_k

use crate::classifier::{check_width, invalid, label_at, Classifier};
use crate::encoder::FeatureVector;
use crate::error::{ArtifactError, ClassifierError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<String>,
    coefficients: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<String>,
        coefficients: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        const NAME: &str = "linear classifier";
        if self.classes.is_empty() {
            return Err(invalid(NAME, "no classes"));
        }
        if self.coefficients.len() != self.classes.len() {
            return Err(invalid(
                NAME,
                format!(
                    "{} coefficient rows for {} classes",
                    self.coefficients.len(),
                    self.classes.len()
                ),
            ));
        }
        if self.intercepts.len() != self.classes.len() {
            return Err(invalid(
                NAME,
                format!(
                    "{} intercepts for {} classes",
                    self.intercepts.len(),
                    self.classes.len()
                ),
            ));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(invalid(NAME, "coefficient rows are empty"));
        }
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(invalid(NAME, "coefficient rows differ in length"));
        }
        Ok(())
    }

    fn scores(&self, x: &[f32]) -> Vec<f32> {
        self.coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(w, b)| w.iter().zip(x.iter()).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coefficients.first().map(Vec::len).unwrap_or(0)
    }

    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        check_width(self.n_features(), features)?;
        label_at(&self.classes, &self.scores(features.as_slice()))
    }

    fn backend_name(&self) -> &str {
        "linear"
    }
}
