//! Backend implementations for the supported model families

pub mod linear;
pub mod tree;

pub use linear::LinearClassifier;
pub use tree::{DecisionTreeClassifier, Node, RandomForestClassifier, Tree};
