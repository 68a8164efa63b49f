// Feature Extractor
// Fixed-order numeric summary of a text, used as classifier input

use std::collections::HashSet;
use tracing::debug;

use crate::error::{DetectionError, Result};
use crate::models::{FeatureVector, FEATURE_NAMES};
use crate::services::text_processor::{sample_for_analysis, split_sentences, tokenize};

/// Tokens longer than this (in chars) count as long words.
const LONG_WORD_CHARS: usize = 6;

const FORMAL_WORDS: &[&str] = &["portanto", "consequentemente", "adicionalmente", "fundamental"];
const INFORMAL_WORDS: &[&str] = &["tipo", "assim", "ok", "bem", "acho", "tá"];

/// Net formal-over-informal vocabulary, normalized by token count.
/// Each listed word counts at most once, by substring presence.
pub fn formality_score(text: &str, token_count: usize) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let formal = FORMAL_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    let informal = INFORMAL_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
    (formal - informal) / token_count as f64
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

/// Extract the feature vector. Long texts are sampled first; `length` always
/// reports the full original length in chars.
pub fn extract_features(text: &str) -> Result<FeatureVector> {
    let sample = sample_for_analysis(text);
    let tokens = tokenize(&sample);
    let sentences = split_sentences(&sample);

    let word_count = tokens.len();
    let sentence_count = sentences.len();
    let total_token_chars: usize = tokens.iter().map(|t| t.chars().count()).sum();
    let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let long_words = tokens
        .iter()
        .filter(|t| t.chars().count() > LONG_WORD_CHARS)
        .count();

    let features = FeatureVector {
        length: text.chars().count() as f64,
        word_count: word_count as f64,
        sentence_count: sentence_count as f64,
        avg_word_length: ratio(total_token_chars as f64, word_count),
        words_per_sentence: ratio(word_count as f64, sentence_count),
        lexical_diversity: ratio(unique.len() as f64, word_count),
        long_word_ratio: ratio(long_words as f64, word_count),
        formality_score: formality_score(&sample, word_count),
    };

    for (name, value) in FEATURE_NAMES.into_iter().zip(features.to_array()) {
        if !value.is_finite() {
            return Err(DetectionError::NonFiniteFeature { name });
        }
    }

    debug!(
        length = features.length,
        words = word_count,
        sentences = sentence_count,
        sampled = sample.len() != text.len(),
        "features.extracted"
    );
    Ok(features)
}
