use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::ModelError;

/// A node in a fitted decision tree: either a split condition or a leaf.
///
/// Samples with `feature <= threshold` descend left, everything else right,
/// matching the convention the trees were grown with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition.
    Node {
        /// Index of the feature to split on.
        feature_idx: usize,
        /// Threshold value for the split.
        threshold: f32,
        /// Subtree for samples where `feature <= threshold`.
        left: Box<TreeNode>,
        /// Subtree for samples where `feature > threshold`.
        right: Box<TreeNode>,
    },
    /// Leaf node with the class prediction.
    Leaf {
        /// Predicted class index for this leaf.
        class_label: usize,
        /// Number of training samples that reached this leaf.
        n_samples: usize,
    },
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Node { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn check(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        match self {
            TreeNode::Leaf { class_label, .. } => {
                if *class_label >= n_classes {
                    return Err(ModelError::ClassOutOfRange {
                        index: *class_label,
                        n_classes,
                    });
                }
                Ok(())
            }
            TreeNode::Node {
                feature_idx,
                left,
                right,
                ..
            } => {
                if *feature_idx >= n_features {
                    return Err(ModelError::InvalidArtifact(format!(
                        "tree split references feature {feature_idx} but the forest has {n_features} features"
                    )));
                }
                left.check(n_features, n_classes)?;
                right.check(n_features, n_classes)
            }
        }
    }

    fn decide(&self, features: &Array1<f32>) -> usize {
        match self {
            TreeNode::Leaf { class_label, .. } => *class_label,
            TreeNode::Node {
                feature_idx,
                threshold,
                left,
                right,
            } => {
                if features[*feature_idx] <= *threshold {
                    left.decide(features)
                } else {
                    right.decide(features)
                }
            }
        }
    }
}

/// A single fitted CART classification tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// Predicts the class index for one feature vector.
    pub fn predict(&self, features: &Array1<f32>) -> usize {
        self.root.decide(features)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

/// A fitted random-forest classifier, deserialized from an artifact file.
///
/// Only the pieces needed at inference time are kept: the grown trees and
/// the feature/class dimensions the forest was trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(trees: Vec<DecisionTree>, n_features: usize, n_classes: usize) -> Self {
        Self {
            trees,
            n_features,
            n_classes,
        }
    }

    /// Number of features the forest was trained on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of classes the forest predicts over.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of trees in the forest.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Checks the deserialized forest is usable for inference: non-empty,
    /// non-degenerate dimensions, and every split/leaf in every tree within
    /// the declared feature and class ranges. A tree referencing a feature
    /// the forest does not have is a corrupt artifact, and it has to be
    /// caught here since traversal indexes the feature vector directly.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no trees".into()));
        }
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(ModelError::InvalidArtifact(
                "forest has zero features or classes".into(),
            ));
        }
        for tree in &self.trees {
            tree.root.check(self.n_features, self.n_classes)?;
        }
        Ok(())
    }

    fn check_shape(&self, features: &Array1<f32>) -> Result<(), ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        Ok(())
    }

    /// Predicts the class index for one feature vector by majority voting
    /// across the trees. Ties break toward the lower class index so the
    /// result is deterministic.
    pub fn predict(&self, features: &Array1<f32>) -> Result<usize, ModelError> {
        self.validate()?;
        let votes = self.vote(features)?;

        let mut predicted = 0;
        let mut max_votes = 0;
        for (class_idx, &count) in votes.iter().enumerate() {
            if count > max_votes {
                max_votes = count;
                predicted = class_idx;
            }
        }
        Ok(predicted)
    }

    /// Predicts the probability distribution over classes for one feature
    /// vector, as the proportion of trees voting for each class. The result
    /// sums to 1.0.
    pub fn predict_proba(&self, features: &Array1<f32>) -> Result<Array1<f32>, ModelError> {
        self.validate()?;
        let votes = self.vote(features)?;
        let n_trees = self.trees.len() as f32;
        Ok(Array1::from_iter(
            votes.iter().map(|&v| v as f32 / n_trees),
        ))
    }

    fn vote(&self, features: &Array1<f32>) -> Result<Vec<usize>, ModelError> {
        self.check_shape(features)?;
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            let class = tree.predict(features);
            if class >= self.n_classes {
                return Err(ModelError::ClassOutOfRange {
                    index: class,
                    n_classes: self.n_classes,
                });
            }
            votes[class] += 1;
        }
        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(class_label: usize) -> TreeNode {
        TreeNode::Leaf {
            class_label,
            n_samples: 1,
        }
    }

    fn two_class_forest() -> RandomForest {
        // Two leaf trees voting 1, one split tree voting on feature 0.
        let split = TreeNode::Node {
            feature_idx: 0,
            threshold: 0.5,
            left: Box::new(leaf(0)),
            right: Box::new(leaf(1)),
        };
        RandomForest::new(
            vec![
                DecisionTree::new(leaf(1)),
                DecisionTree::new(leaf(1)),
                DecisionTree::new(split),
            ],
            2,
            2,
        )
    }

    #[test]
    fn test_majority_vote() {
        let forest = two_class_forest();
        let x = Array1::from_vec(vec![0.0, 0.0]);
        assert_eq!(forest.predict(&x).unwrap(), 1);
    }

    #[test]
    fn test_split_traversal() {
        let forest = two_class_forest();
        let below = Array1::from_vec(vec![0.0, 0.0]);
        let above = Array1::from_vec(vec![1.0, 0.0]);
        // Vote of the split tree flips with the feature value.
        assert_eq!(forest.predict_proba(&below).unwrap()[0], 1.0 / 3.0);
        assert_eq!(forest.predict_proba(&above).unwrap()[0], 0.0);
    }

    #[test]
    fn test_proba_sums_to_one() {
        let forest = two_class_forest();
        let x = Array1::from_vec(vec![1.0, 2.0]);
        let proba = forest.predict_proba(&x).unwrap();
        let total: f32 = proba.sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let forest = two_class_forest();
        let x = Array1::from_vec(vec![0.0; 3]);
        assert!(matches!(
            forest.predict(&x),
            Err(ModelError::FeatureCountMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_tie_breaks_to_lower_class() {
        let forest = RandomForest::new(
            vec![DecisionTree::new(leaf(0)), DecisionTree::new(leaf(1))],
            1,
            2,
        );
        let x = Array1::from_vec(vec![0.0]);
        assert_eq!(forest.predict(&x).unwrap(), 0);
    }

    #[test]
    fn test_empty_forest_rejected() {
        let forest = RandomForest::new(vec![], 2, 2);
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_split_beyond_feature_range_rejected() {
        // A split referencing a feature the forest does not declare is a
        // corrupt artifact; it must come back as an error from validate and
        // predict alike, never a panic out of traversal.
        let bad_split = TreeNode::Node {
            feature_idx: 100,
            threshold: 0.5,
            left: Box::new(leaf(0)),
            right: Box::new(leaf(1)),
        };
        let forest = RandomForest::new(vec![DecisionTree::new(bad_split)], 2, 2);
        assert!(matches!(
            forest.validate(),
            Err(ModelError::InvalidArtifact(_))
        ));

        let x = Array1::from_vec(vec![0.0, 0.0]);
        assert!(forest.predict(&x).is_err());
        assert!(forest.predict_proba(&x).is_err());
    }

    #[test]
    fn test_leaf_beyond_class_range_rejected() {
        let nested = TreeNode::Node {
            feature_idx: 1,
            threshold: 0.0,
            left: Box::new(leaf(0)),
            right: Box::new(leaf(7)),
        };
        let forest = RandomForest::new(vec![DecisionTree::new(nested)], 2, 2);
        assert!(matches!(
            forest.validate(),
            Err(ModelError::ClassOutOfRange {
                index: 7,
                n_classes: 2
            })
        ));
    }

    #[test]
    fn test_tree_depth() {
        let split = TreeNode::Node {
            feature_idx: 0,
            threshold: 0.0,
            left: Box::new(leaf(0)),
            right: Box::new(leaf(1)),
        };
        assert_eq!(DecisionTree::new(split).depth(), 1);
        assert_eq!(DecisionTree::new(leaf(0)).depth(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let forest = two_class_forest();
        let json = serde_json::to_string(&forest).unwrap();
        let back: RandomForest = serde_json::from_str(&json).unwrap();
        let x = Array1::from_vec(vec![0.0, 0.0]);
        assert_eq!(back.predict(&x).unwrap(), forest.predict(&x).unwrap());
    }
}
