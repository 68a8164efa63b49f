// Stylomark Core Services

pub mod text_processor;
pub mod config_store;
pub mod detection;

pub use text_processor::*;
pub use config_store::*;

pub use detection::{
    annotate,
    extract_features,
    resolve_overlaps,
    seed_samples,
    strip_annotations,
    ClassifierAdapter,
    Detector,
    FileModelStore,
    ModelStore,
    SpanScanner,
};
