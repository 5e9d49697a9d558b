//! Process-wide predictor cache.
//!
//! Artifacts are loaded once per process and shared read-only afterwards;
//! there is no write path to a cached predictor after initialization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use crate::artifacts::ArtifactStore;
use crate::predictor::{Predictor, PredictorBuilder, PredictorError};

lazy_static! {
    static ref PREDICTORS: Mutex<HashMap<PathBuf, Arc<Predictor>>> = Mutex::new(HashMap::new());
}

/// Returns the shared predictor for an artifacts directory, loading the
/// artifacts on first use. Subsequent calls with the same directory reuse
/// the cached instance; a load failure is not cached and the next call
/// retries.
pub fn shared<P: AsRef<Path>>(artifacts_dir: P) -> Result<Arc<Predictor>, PredictorError> {
    let key = artifacts_dir.as_ref().to_path_buf();

    let mut cache = PREDICTORS
        .lock()
        .map_err(|_| PredictorError::BuildError("predictor cache poisoned".to_string()))?;
    if let Some(predictor) = cache.get(&key) {
        return Ok(Arc::clone(predictor));
    }

    let store = ArtifactStore::new(&key)
        .map_err(|e| PredictorError::ArtifactError(format!("cannot open {key:?}: {e}")))?;
    let predictor = Arc::new(PredictorBuilder::new().with_store(&store)?.build()?);
    cache.insert(key, Arc::clone(&predictor));
    Ok(predictor)
}
