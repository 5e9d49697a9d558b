use crate::artifacts::ArtifactError;
use crate::model::ModelError;

/// Represents the different types of errors that can occur around a
/// prediction cycle.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// Error occurred while locating or reading an artifact file
    #[error("Artifact error: {0}")]
    ArtifactError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// Error occurred while running the scaler or the forest
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred due to invalid input values
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ArtifactError> for PredictorError {
    fn from(err: ArtifactError) -> Self {
        PredictorError::ArtifactError(err.to_string())
    }
}

impl From<ModelError> for PredictorError {
    fn from(err: ModelError) -> Self {
        PredictorError::PredictionError(err.to_string())
    }
}
