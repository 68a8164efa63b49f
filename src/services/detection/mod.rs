// Detection Module
// Stylistic AI-text detection core, organized into specialized submodules:
// - taxonomy: Static pattern categories with justifications and context radii
// - span_scanner: Finds taxonomy matches with offsets into the original text
// - annotator: Wraps detected spans in markup
// - features: Fixed-order numeric feature vector
// - classifier: Trained model adapter with heuristic fallback
// - model_store: Persistence seam for trained state
// - seed_corpus: Built-in labelled examples
// - scorer: Orchestrates everything into one report

pub mod taxonomy;
pub mod span_scanner;
pub mod annotator;
pub mod features;
pub mod classifier;
pub mod model_store;
pub mod seed_corpus;
pub mod scorer;

// Re-export commonly used items
pub use annotator::{annotate, resolve_overlaps, strip_annotations};
pub use classifier::{ClassProbabilities, ClassifierAdapter, PersistedModel, TrainedModel};
pub use features::{extract_features, formality_score};
pub use model_store::{FileModelStore, ModelStore};
pub use scorer::{Detector, MIN_ANALYSIS_CHARS};
pub use seed_corpus::{seed_samples, Authorship, TrainingSample};
pub use span_scanner::SpanScanner;
pub use taxonomy::TAXONOMY;
