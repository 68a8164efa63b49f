// Stylomark Data Models
// Report, span and feature types shared by the detection core and the request boundary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ Pattern Categories ============

/// Closed set of stylistic marker categories, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    FormalExpression,
    ComplexConnective,
    PassiveVoice,
    Superlative,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 4] = [
        PatternCategory::FormalExpression,
        PatternCategory::ComplexConnective,
        PatternCategory::PassiveVoice,
        PatternCategory::Superlative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormalExpression => "formal_expression",
            Self::ComplexConnective => "complex_connective",
            Self::PassiveVoice => "passive_voice",
            Self::Superlative => "superlative",
        }
    }
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Detected Spans ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSpan {
    pub matched_text: String,
    pub category: PatternCategory,
    pub justification: String,
    pub context: String,
    /// UTF-8 byte offset (0-based) into the original input text.
    pub start: usize,
    /// UTF-8 byte offset (0-based, end-exclusive) into the original input text.
    pub end: usize,
}

impl DetectedSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &DetectedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ============ Feature Vector ============

pub const NUM_FEATURES: usize = 8;

/// Feature names in classifier input order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "length",
    "word_count",
    "sentence_count",
    "avg_word_length",
    "words_per_sentence",
    "lexical_diversity",
    "long_word_ratio",
    "formality_score",
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub length: f64,
    pub word_count: f64,
    pub sentence_count: f64,
    pub avg_word_length: f64,
    pub words_per_sentence: f64,
    pub lexical_diversity: f64,
    pub long_word_ratio: f64,
    pub formality_score: f64,
}

impl FeatureVector {
    /// Values in the order of [`FEATURE_NAMES`].
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.length,
            self.word_count,
            self.sentence_count,
            self.avg_word_length,
            self.words_per_sentence,
            self.lexical_diversity,
            self.long_word_ratio,
            self.formality_score,
        ]
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}

// ============ Detection Report ============

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total_spans: usize,
    pub spans_by_category: BTreeMap<PatternCategory, usize>,
    pub span_density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub ai_probability: f64,
    pub human_probability: f64,
    pub confidence: f64,
    pub analyzed_length: usize,
    pub detected_spans: Vec<DetectedSpan>,
    pub annotated_text: String,
    pub stats: DetectionStats,
}

impl DetectionReport {
    /// Low-confidence, no-evidence report for short input or internal failure.
    pub fn neutral(text: &str) -> Self {
        Self {
            ai_probability: 0.5,
            human_probability: 0.5,
            confidence: 0.1,
            analyzed_length: text.chars().count(),
            detected_spans: Vec::new(),
            annotated_text: text.to_string(),
            stats: DetectionStats::default(),
        }
    }
}

// ============ Request Boundary ============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    pub original_length: usize,
    pub analyzed_length: usize,
    pub word_count: usize,
    pub sentences: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub success: bool,
    pub request_id: String,
    pub result: DetectionReport,
    pub text_stats: TextStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub backend: String,
    pub version: String,
}
