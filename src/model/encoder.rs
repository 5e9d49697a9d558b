use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ModelError;

/// The fitted label encoder: class index in `classes` equals the integer
/// code the forest was trained on, so decoding is a positional lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Returns the ordered class labels (index = integer code).
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Checks the deserialized encoder is usable: non-empty and free of
    /// duplicate labels, so decoding stays unambiguous.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::InvalidArtifact("encoder has no classes".into()));
        }
        let unique: HashSet<&str> = self.classes.iter().map(String::as_str).collect();
        if unique.len() != self.classes.len() {
            return Err(ModelError::InvalidArtifact(
                "encoder contains duplicate class labels".into(),
            ));
        }
        Ok(())
    }

    /// Decodes a predicted class index back to its display label.
    pub fn decode(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::ClassOutOfRange {
                index,
                n_classes: self.classes.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Dropout".to_string(),
            "Enrolled".to_string(),
            "Graduate".to_string(),
        ])
    }

    #[test]
    fn test_decode() {
        assert_eq!(encoder().decode(2).unwrap(), "Graduate");
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(matches!(
            encoder().decode(3),
            Err(ModelError::ClassOutOfRange {
                index: 3,
                n_classes: 3
            })
        ));
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        let bad = LabelEncoder::new(vec!["Dropout".to_string(), "Dropout".to_string()]);
        assert!(bad.validate().is_err());
        assert!(encoder().validate().is_ok());
    }
}
