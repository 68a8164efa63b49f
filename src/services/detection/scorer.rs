// Scorer
// Composes scanning, annotation, feature extraction and classification into one report

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::annotator::{annotate, resolve_overlaps};
use super::classifier::ClassifierAdapter;
use super::features::extract_features;
use super::span_scanner::SpanScanner;
use crate::error::Result;
use crate::models::{DetectedSpan, DetectionReport, DetectionStats};
use crate::services::config_store::AnnotationConfig;
use crate::services::text_processor::whitespace_word_count;

/// Inputs shorter than this (trimmed, in chars) get the neutral report.
pub const MIN_ANALYSIS_CHARS: usize = 20;

/// Round a probability to 3 decimals as integer thousandths, so the two
/// complementary values always sum to exactly 1.0. Exact ties go to even.
fn split_probability(p_ai: f64) -> (f64, f64) {
    let ai_milli = (p_ai * 1000.0).round_ties_even().clamp(0.0, 1000.0) as u32;
    (
        ai_milli as f64 / 1000.0,
        (1000 - ai_milli) as f64 / 1000.0,
    )
}

/// Two decimals, exact ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn span_stats(text: &str, spans: &[DetectedSpan]) -> DetectionStats {
    let mut spans_by_category = BTreeMap::new();
    for span in spans {
        *spans_by_category.entry(span.category).or_insert(0) += 1;
    }
    let words = whitespace_word_count(text);
    DetectionStats {
        total_spans: spans.len(),
        spans_by_category,
        span_density: if words == 0 {
            0.0
        } else {
            spans.len() as f64 / words as f64
        },
    }
}

/// The detection pipeline. Immutable after construction; share it by
/// reference across threads.
pub struct Detector {
    scanner: SpanScanner,
    classifier: ClassifierAdapter,
    resolve_overlaps: bool,
}

impl Detector {
    pub fn new(classifier: ClassifierAdapter, annotation: &AnnotationConfig) -> Result<Self> {
        Ok(Self {
            scanner: SpanScanner::new()?,
            classifier,
            resolve_overlaps: annotation.resolve_overlaps,
        })
    }

    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    /// Never fails: short input and internal errors both yield the neutral report.
    pub fn predict(&self, text: &str) -> DetectionReport {
        if text.trim().chars().count() < MIN_ANALYSIS_CHARS {
            debug!(chars = text.chars().count(), "scorer.insufficient_input");
            return DetectionReport::neutral(text);
        }

        match self.try_predict(text) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "scorer.prediction_failed_using_neutral_report");
                DetectionReport::neutral(text)
            }
        }
    }

    /// Full pipeline without the length guard or the neutral fallback.
    pub fn try_predict(&self, text: &str) -> Result<DetectionReport> {
        let spans = self.scanner.scan(text)?;

        let annotated_text = if self.resolve_overlaps {
            annotate(text, &resolve_overlaps(&spans))
        } else {
            annotate(text, &spans)
        };

        let features = extract_features(text)?;
        let proba = self.classifier.predict_proba(&features)?;
        let (ai_probability, human_probability) = split_probability(proba.ai);

        let stats = span_stats(text, &spans);
        debug!(
            spans = stats.total_spans,
            ai = ai_probability,
            trained = self.classifier.is_trained(),
            "scorer.predicted"
        );

        Ok(DetectionReport {
            ai_probability,
            human_probability,
            confidence: round2(proba.confidence),
            analyzed_length: text.chars().count(),
            detected_spans: spans,
            annotated_text,
            stats,
        })
    }
}
