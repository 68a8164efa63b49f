// Text Processing Service
// Tokenization, sentence splitting and long-text sampling used by feature extraction

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Texts longer than this (in chars) are sampled before feature extraction.
pub const SAMPLE_THRESHOLD_CHARS: usize = 5000;
const SAMPLE_HEAD_CHARS: usize = 2000;
const SAMPLE_MIDDLE_CHARS: usize = 1000;
const SAMPLE_TAIL_CHARS: usize = 2000;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word regex"))
}

fn sentence_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence regex"))
}

/// Case-folded runs of word characters (letters, digits, underscore).
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    word_re()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split on runs of `.`, `!`, `?` followed by whitespace or end of text.
/// Fragments are trimmed; empty ones are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    sentence_break_re()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Number of whitespace-delimited words.
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Byte offset of the `char_idx`-th char, or `text.len()` past the end.
fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Representative sample of a long text: head, a window centred on the
/// midpoint, and tail. Short texts are returned untouched.
pub fn sample_for_analysis(text: &str) -> Cow<'_, str> {
    let total = text.chars().count();
    if total <= SAMPLE_THRESHOLD_CHARS {
        return Cow::Borrowed(text);
    }

    let mid = total / 2;
    let head_end = char_to_byte(text, SAMPLE_HEAD_CHARS);
    let mid_start = char_to_byte(text, mid - SAMPLE_MIDDLE_CHARS / 2);
    let mid_end = char_to_byte(text, mid + SAMPLE_MIDDLE_CHARS / 2);
    let tail_start = char_to_byte(text, total - SAMPLE_TAIL_CHARS);

    let mut sample = String::with_capacity(head_end + (mid_end - mid_start) + (text.len() - tail_start));
    sample.push_str(&text[..head_end]);
    sample.push_str(&text[mid_start..mid_end]);
    sample.push_str(&text[tail_start..]);
    Cow::Owned(sample)
}

/// Slice of `text` extending up to `radius` chars on each side of the
/// byte range `start..end`. Offsets must lie on char boundaries.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}
