use std::sync::Arc;

use crate::model::{LabelEncoder, RandomForest, StandardScaler};
use crate::schema::StudentRecord;

use super::error::PredictorError;

/// The outcome of one prediction cycle: decoded label, arg-max confidence
/// and the full probability distribution over classes.
///
/// Returned as an explicit value rather than raised through the renderer,
/// so display code never has to catch anything.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Decoded display label of the predicted class.
    pub label: String,
    /// Integer code of the predicted class.
    pub class_index: usize,
    /// Probability of the predicted class (the distribution maximum).
    pub confidence: f32,
    /// Per-class probabilities in code order, paired with decoded labels.
    pub probabilities: Vec<(String, f32)>,
}

impl Prediction {
    /// The per-class probabilities sorted by descending probability, the
    /// order the result renderer charts them in.
    pub fn ranked(&self) -> Vec<(String, f32)> {
        let mut ranked = self.probabilities.clone();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// A thread-safe student outcome predictor over pre-trained artifacts.
///
/// # Thread Safety
///
/// This type is `Send + Sync` because all of its fields are thread-safe:
/// the artifacts are immutable once loaded and shared behind `Arc`, so
/// concurrent prediction cycles can share one predictor without locking.
///
/// Single-thread usage:
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use alumnus::{Predictor, StudentRecord};
///
/// let predictor = Predictor::builder()
///     .with_custom_artifacts("forest.json", "scaler.json", "encoder.json")?
///     .build()?;
///
/// let prediction = predictor.predict(&StudentRecord::default())?;
/// println!("Predicted status: {}", prediction.label);
/// # Ok(())
/// # }
/// ```
///
/// Multi-thread usage:
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use alumnus::{Predictor, StudentRecord};
/// use std::sync::Arc;
/// use std::thread;
///
/// let predictor = Arc::new(Predictor::builder()
///     .with_custom_artifacts("forest.json", "scaler.json", "encoder.json")?
///     .build()?);
///
/// let predictor_clone = Arc::clone(&predictor);
/// thread::spawn(move || {
///     predictor_clone.predict(&StudentRecord::default()).unwrap();
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Predictor {
    pub forest_path: String,
    pub scaler_path: String,
    pub encoder_path: String,
    pub forest: Arc<RandomForest>,
    pub scaler: Arc<StandardScaler>,
    pub encoder: Arc<LabelEncoder>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl Predictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            forest_path: self.forest_path.clone(),
            scaler_path: self.scaler_path.clone(),
            encoder_path: self.encoder_path.clone(),
            n_trees: self.forest.n_trees(),
            n_features: self.forest.n_features(),
            n_classes: self.forest.n_classes(),
            class_labels: self.encoder.classes().to_vec(),
        }
    }

    /// Runs one full inference cycle for a form submission.
    ///
    /// Translates the record into the canonical feature vector, applies the
    /// training-time standardization, runs the forest's predict and
    /// predict-probability operations and decodes the winning class.
    ///
    /// # Errors
    /// * `ValidationError` if a categorical value is not a known choice
    /// * `PredictionError` if the scaler or forest rejects the vector
    ///   (artifact/feature inconsistency)
    pub fn predict(&self, record: &StudentRecord) -> Result<Prediction, PredictorError> {
        let features = record.to_features()?;
        let scaled = self.scaler.transform(&features)?;

        let class_index = self.forest.predict(&scaled)?;
        let proba = self.forest.predict_proba(&scaled)?;
        let label = self.encoder.decode(class_index)?.to_string();

        let confidence = proba.iter().copied().fold(0.0_f32, f32::max);
        let probabilities = proba
            .iter()
            .enumerate()
            .map(|(idx, &p)| {
                self.encoder
                    .decode(idx)
                    .map(|class_label| (class_label.to_string(), p))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Prediction {
            label,
            class_index,
            confidence,
            probabilities,
        })
    }
}
