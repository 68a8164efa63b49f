// Span Scanner
// Finds every taxonomy match in the original text, with offsets and context

use regex::Regex;
use tracing::debug;

use super::taxonomy::{CategoryRules, MatchMode, TAXONOMY};
use crate::error::{DetectionError, Result};
use crate::models::DetectedSpan;
use crate::services::text_processor::context_window;

struct CompiledPattern {
    rules: &'static CategoryRules,
    regex: Regex,
}

/// Compiled taxonomy. Matching is case-insensitive on the original text, so
/// offsets always index the caller's string directly.
pub struct SpanScanner {
    patterns: Vec<CompiledPattern>,
}

fn compile(rules: &'static CategoryRules, pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern);
    let source = match rules.mode {
        MatchMode::Phrase => format!("(?i){}", escaped),
        MatchMode::Word => format!(r"(?i)\b{}\b", escaped),
    };
    Regex::new(&source).map_err(|source| DetectionError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl SpanScanner {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::new();
        for rules in TAXONOMY.iter() {
            for pattern in rules.patterns {
                patterns.push(CompiledPattern {
                    rules,
                    regex: compile(rules, pattern)?,
                });
            }
        }
        Ok(Self { patterns })
    }

    /// All matches, grouped by category in taxonomy order, then by pattern
    /// declaration order, then left to right. Categories are not deduplicated
    /// against each other.
    pub fn scan(&self, text: &str) -> Result<Vec<DetectedSpan>> {
        let mut spans = Vec::new();

        for compiled in &self.patterns {
            let rules = compiled.rules;
            for m in compiled.regex.find_iter(text) {
                let (start, end) = (m.start(), m.end());
                if start >= end || end > text.len() {
                    return Err(DetectionError::SpanOutOfBounds {
                        start,
                        end,
                        len: text.len(),
                    });
                }
                spans.push(DetectedSpan {
                    matched_text: m.as_str().to_string(),
                    category: rules.category,
                    justification: rules.justification.to_string(),
                    context: context_window(text, start, end, rules.context_chars).to_string(),
                    start,
                    end,
                });
            }
        }

        debug!(spans = spans.len(), text_bytes = text.len(), "span_scanner.scan");
        Ok(spans)
    }
}
