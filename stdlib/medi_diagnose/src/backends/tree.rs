//! Decision tree and random forest classifiers
//!
//! Trees are stored flat with node 0 as the root. Split nodes send a sample to
//! `left` when `x[feature] <= threshold` and to `right` otherwise. Leaves carry
//! one weight per class (sample counts or probabilities). Children always have
//! a larger index than their parent, so traversal terminates.

use crate::classifier::{check_width, invalid, label_at, Classifier};
use crate::encoder::FeatureVector;
use crate::error::{ArtifactError, ClassifierError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f32>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    fn validate(&self, name: &str, n_features: usize, n_classes: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(invalid(name, "tree has no nodes"));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(invalid(
                            name,
                            format!("node {i} splits on feature {feature} of {n_features}"),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(name, format!("node {i} has a non-finite threshold")));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(invalid(
                                name,
                                format!("node {i} has out-of-order child {child}"),
                            ));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(invalid(
                            name,
                            format!("leaf {i} has {} values for {n_classes} classes", value.len()),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Class weights of the leaf reached by `x`
    fn leaf(&self, x: &[f32]) -> Result<&[f32], ClassifierError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(value.as_slice()),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = x.get(*feature).ok_or_else(|| {
                        ClassifierError::Backend(format!("feature {feature} out of range"))
                    })?;
                    let next = if *v <= *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(ClassifierError::Backend(format!(
                            "node {idx} points back to {next}"
                        )));
                    }
                    idx = next;
                }
                None => return Err(ClassifierError::Backend(format!("missing node {idx}"))),
            }
        }
    }

    /// Leaf weights scaled to sum to one
    fn proba(&self, x: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        let value = self.leaf(x)?;
        let total: f32 = value.iter().sum();
        if total > 0.0 {
            Ok(value.iter().map(|v| v / total).collect())
        } else {
            Ok(value.to_vec())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    classes: Vec<String>,
    n_features: usize,
    tree: Tree,
}

impl DecisionTreeClassifier {
    pub fn new(classes: Vec<String>, n_features: usize, tree: Tree) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            n_features,
            tree,
        };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        const NAME: &str = "decision tree";
        if self.classes.is_empty() {
            return Err(invalid(NAME, "no classes"));
        }
        self.tree.validate(NAME, self.n_features, self.classes.len())
    }
}

impl Classifier for DecisionTreeClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        check_width(self.n_features, features)?;
        let value = self.tree.leaf(features.as_slice())?;
        label_at(&self.classes, value)
    }

    fn backend_name(&self) -> &str {
        "decision_tree"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForestClassifier {
    pub fn new(
        classes: Vec<String>,
        n_features: usize,
        trees: Vec<Tree>,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            classes,
            n_features,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        const NAME: &str = "random forest";
        if self.classes.is_empty() {
            return Err(invalid(NAME, "no classes"));
        }
        if self.trees.is_empty() {
            return Err(invalid(NAME, "forest has no trees"));
        }
        for tree in &self.trees {
            tree.validate(NAME, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean of the per-tree class probabilities
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f32>, ClassifierError> {
        check_width(self.n_features, features)?;
        let mut total = vec![0.0f32; self.classes.len()];
        for tree in &self.trees {
            for (acc, p) in total.iter_mut().zip(tree.proba(features.as_slice())?) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f32;
        Ok(total.into_iter().map(|p| p / n).collect())
    }
}

impl Classifier for RandomForestClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        let proba = self.predict_proba(features)?;
        label_at(&self.classes, &proba)
    }

    fn backend_name(&self) -> &str {
        "random_forest"
    }
}
