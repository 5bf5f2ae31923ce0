//! Cyclesense - On-device inference engine for menstrual cycle phase tracking
//!
//! Cyclesense turns a sparse, irregular history of cycle records into phase
//! classifications and forward predictions through a deterministic pipeline:
//! parameter estimation → cycle resolution → phase classification → forward
//! prediction → calendar aggregation.
//!
//! The engine owns no state and performs no I/O: records come in from a
//! storage collaborator, annotations and predictions go out to a rendering
//! collaborator, and every public operation is a pure function of its
//! arguments.

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod predictor;
pub mod resolver;
pub mod types;

pub use aggregator::annotate_day;
pub use classifier::{classify, classify_with_ovulation};
pub use config::EngineConfig;
pub use engine::{CycleEngine, RecordSource};
pub use error::EngineError;
pub use estimator::{estimate_cycle_length, estimate_ovulation_day};
pub use predictor::predict_future_cycles;
pub use resolver::resolve;
pub use types::{
    CycleRecord, DayAnnotation, EstimatedParameters, FlowIntensity, Mood, PersonId, Phase,
    PhaseDescriptor, PredictedCycle, ResolvedCycle, SubPhase, Symptom,
};

/// Engine version embedded by callers in exported annotations
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
