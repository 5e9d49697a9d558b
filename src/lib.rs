//! A thread-safe student outcome predictor: a form schema, label codecs and
//! random-forest inference over three pre-trained artifacts.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use alumnus::{ArtifactStore, Predictor, StudentRecord};
//!
//! let store = ArtifactStore::new_default()?;
//! let predictor = Predictor::builder()
//!     .with_store(&store)?
//!     .build()?;
//!
//! let record = StudentRecord {
//!     curricular_units_2nd_sem_approved: 6,
//!     curricular_units_2nd_sem_grade: 14.0,
//!     scholarship_holder: "no".to_string(),
//!     ..Default::default()
//! };
//!
//! let prediction = predictor.predict(&record)?;
//! println!("Predicted status: {} ({:.1}%)", prediction.label, prediction.confidence * 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Form surface
//!
//! The input form is described, not rendered, by this crate: one
//! [`schema::FieldSpec`] per model feature, in the exact order the model was
//! trained on, with choice widgets fed from the label maps:
//!
//! ```
//! use alumnus::schema::{self, Widget};
//!
//! for field in schema::form_fields() {
//!     if let Widget::Select { map } = field.widget {
//!         let choices: Vec<_> = map.labels().collect();
//!         assert!(!choices.is_empty(), "{} offers no choices", field.label);
//!     }
//! }
//! ```
//!
//! # Thread Safety
//!
//! The predictor is immutable after build and can be shared across threads
//! using `Arc`; see [`Predictor`]. A process-wide once-loaded handle is
//! available through [`cache::shared`].

pub mod artifacts;
pub mod cache;
pub mod model;
pub mod predictor;
pub mod report;
pub mod schema;

pub use artifacts::{ArtifactError, ArtifactManifest, ArtifactStore};
pub use model::{LabelEncoder, ModelError, RandomForest, StandardScaler};
pub use predictor::{Prediction, Predictor, PredictorBuilder, PredictorError, PredictorInfo};
pub use schema::{FieldSpec, Section, StudentRecord, Widget, FEATURE_COUNT};

pub fn init_logger() {
    env_logger::init();
}
