use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};

use super::error::PredictorError;
use super::predictor::Predictor;
use crate::artifacts::{ArtifactError, ArtifactStore};
use crate::model::{LabelEncoder, RandomForest, StandardScaler};
use crate::schema::FEATURE_COUNT;

/// A builder for constructing a Predictor with a fluent interface.
///
/// Parses the three artifact files and cross-checks their shapes against the
/// form schema before a predictor can exist, so a shape mismatch fails the
/// build instead of silently producing wrong predictions later.
#[derive(Default, Debug)]
pub struct PredictorBuilder {
    forest_path: Option<String>,
    scaler_path: Option<String>,
    encoder_path: Option<String>,
    forest: Option<RandomForest>,
    scaler: Option<StandardScaler>,
    encoder: Option<LabelEncoder>,
}

fn read_artifact<T: serde::de::DeserializeOwned>(
    path: &Path,
    artifact: &str,
) -> Result<T, PredictorError> {
    if !path.exists() {
        return Err(PredictorError::from(ArtifactError::Missing(
            path.to_path_buf(),
        )));
    }
    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to read {} artifact: {}", artifact, e);
        PredictorError::ArtifactError(format!("failed to read {artifact} from {path:?}: {e}"))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        error!("Failed to parse {} artifact: {}", artifact, e);
        PredictorError::ArtifactError(format!("failed to parse {artifact} from {path:?}: {e}"))
    })
}

impl PredictorBuilder {
    /// Creates a new empty PredictorBuilder instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the three artifacts from an [`ArtifactStore`]'s directory.
    ///
    /// # Errors
    /// * `BuildError` if artifacts were already loaded
    /// * `ArtifactError` if any of the three files is absent or unparseable
    pub fn with_store(self, store: &ArtifactStore) -> Result<Self, PredictorError> {
        if let Some(missing) = store.missing().into_iter().next() {
            return Err(PredictorError::from(ArtifactError::Missing(missing)));
        }
        self.with_custom_artifacts(
            store.forest_path(),
            store.scaler_path(),
            store.encoder_path(),
        )
    }

    /// Loads the three artifacts from explicit paths.
    ///
    /// # Errors
    /// * `BuildError` if artifacts were already loaded
    /// * `ArtifactError` if a file is absent or unparseable
    /// * `BuildError` if a parsed artifact is internally inconsistent
    pub fn with_custom_artifacts<P: AsRef<Path>>(
        mut self,
        forest_path: P,
        scaler_path: P,
        encoder_path: P,
    ) -> Result<Self, PredictorError> {
        if self.forest.is_some() {
            return Err(PredictorError::BuildError(
                "Artifacts already loaded".to_string(),
            ));
        }

        let forest: RandomForest = read_artifact(forest_path.as_ref(), "forest")?;
        forest
            .validate()
            .map_err(|e| PredictorError::BuildError(e.to_string()))?;
        info!(
            "Forest loaded: {} trees, {} features, {} classes",
            forest.n_trees(),
            forest.n_features(),
            forest.n_classes()
        );

        let scaler: StandardScaler = read_artifact(scaler_path.as_ref(), "scaler")?;
        scaler
            .validate()
            .map_err(|e| PredictorError::BuildError(e.to_string()))?;
        info!("Scaler loaded: {} features", scaler.n_features());

        let encoder: LabelEncoder = read_artifact(encoder_path.as_ref(), "encoder")?;
        encoder
            .validate()
            .map_err(|e| PredictorError::BuildError(e.to_string()))?;
        info!("Encoder loaded: {} classes", encoder.n_classes());

        self.forest_path = Some(forest_path.as_ref().to_string_lossy().to_string());
        self.scaler_path = Some(scaler_path.as_ref().to_string_lossy().to_string());
        self.encoder_path = Some(encoder_path.as_ref().to_string_lossy().to_string());
        self.forest = Some(forest);
        self.scaler = Some(scaler);
        self.encoder = Some(encoder);
        Ok(self)
    }

    /// Checks the loaded artifacts agree with the form schema and with each
    /// other. The canonical feature order is not recoverable from the
    /// artifacts, but the counts are, and a count mismatch is the one
    /// inconsistency that is detectable before it corrupts predictions.
    fn validate_shapes(
        forest: &RandomForest,
        scaler: &StandardScaler,
        encoder: &LabelEncoder,
    ) -> Result<(), PredictorError> {
        if forest.n_features() != FEATURE_COUNT {
            return Err(PredictorError::BuildError(format!(
                "forest expects {} features but the form schema provides {}",
                forest.n_features(),
                FEATURE_COUNT
            )));
        }
        if scaler.n_features() != forest.n_features() {
            return Err(PredictorError::BuildError(format!(
                "scaler was fitted on {} features but the forest expects {}",
                scaler.n_features(),
                forest.n_features()
            )));
        }
        if encoder.n_classes() != forest.n_classes() {
            return Err(PredictorError::BuildError(format!(
                "encoder knows {} classes but the forest predicts over {}",
                encoder.n_classes(),
                forest.n_classes()
            )));
        }
        Ok(())
    }

    /// Builds and returns the final Predictor instance
    ///
    /// # Errors
    /// * `BuildError` if no artifacts were loaded, or their shapes disagree
    ///   with the form schema
    pub fn build(self) -> Result<Predictor, PredictorError> {
        let forest = self
            .forest
            .ok_or_else(|| PredictorError::BuildError("No artifacts loaded".to_string()))?;
        let scaler = self
            .scaler
            .ok_or_else(|| PredictorError::BuildError("No scaler loaded".to_string()))?;
        let encoder = self
            .encoder
            .ok_or_else(|| PredictorError::BuildError("No encoder loaded".to_string()))?;

        Self::validate_shapes(&forest, &scaler, &encoder)?;
        info!("Artifact shapes validated successfully");

        Ok(Predictor {
            forest_path: self.forest_path.unwrap_or_default(),
            scaler_path: self.scaler_path.unwrap_or_default(),
            encoder_path: self.encoder_path.unwrap_or_default(),
            forest: Arc::new(forest),
            scaler: Arc::new(scaler),
            encoder: Arc::new(encoder),
        })
    }
}
