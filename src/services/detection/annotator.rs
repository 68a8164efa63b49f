// Annotator
// Wraps detected spans in markup carrying their category and justification

use regex::Regex;
use std::sync::OnceLock;

use crate::models::DetectedSpan;

const SPAN_CLASS: &str = "suspicious-term";
const CLOSE_TAG: &str = "</span>";

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn open_tag(span: &DetectedSpan) -> String {
    format!(
        r#"<span class="{}" data-category="{}" title="{}">"#,
        SPAN_CLASS,
        span.category.as_str(),
        escape_attr(&span.justification)
    )
}

/// A tag to insert at a byte offset of the original text.
struct Insertion {
    pos: usize,
    is_open: bool,
    /// Tie-break among tags of the same kind at the same offset.
    rank: (usize, usize),
    tag: String,
}

/// Mark up every span, placing all tags against the original offsets in one
/// pass so text content is never shifted or lost. At a shared offset closing
/// tags come before opening tags; among spans opening together the wider one
/// opens first, and among spans closing together the later-opened one closes
/// first. Overlapping spans are all kept; crossing ranges produce
/// interleaved tags.
pub fn annotate(text: &str, spans: &[DetectedSpan]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let mut insertions = Vec::with_capacity(spans.len() * 2);
    for (idx, span) in spans.iter().enumerate() {
        if span.is_empty()
            || span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            continue;
        }
        // Wider spans open first; later-opened spans close first.
        insertions.push(Insertion {
            pos: span.start,
            is_open: true,
            rank: (usize::MAX - span.end, idx),
            tag: open_tag(span),
        });
        insertions.push(Insertion {
            pos: span.end,
            is_open: false,
            rank: (usize::MAX - span.start, usize::MAX - idx),
            tag: CLOSE_TAG.to_string(),
        });
    }
    // Closing tags precede opening tags at the same offset.
    insertions.sort_by(|a, b| {
        a.pos
            .cmp(&b.pos)
            .then(a.is_open.cmp(&b.is_open))
            .then(a.rank.cmp(&b.rank))
    });

    let markup_len: usize = insertions.iter().map(|i| i.tag.len()).sum();
    let mut out = String::with_capacity(text.len() + markup_len);
    let mut cursor = 0;
    for ins in insertions {
        out.push_str(&text[cursor..ins.pos]);
        out.push_str(&ins.tag);
        cursor = ins.pos;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Keep one span per overlapping cluster: earliest start, then longest,
/// then first detected. Result is sorted by start offset.
pub fn resolve_overlaps(spans: &[DetectedSpan]) -> Vec<DetectedSpan> {
    let mut ordered: Vec<(usize, &DetectedSpan)> = spans.iter().enumerate().collect();
    ordered.sort_by(|a, b| {
        a.1.start
            .cmp(&b.1.start)
            .then(b.1.len().cmp(&a.1.len()))
            .then(a.0.cmp(&b.0))
    });

    let mut kept: Vec<DetectedSpan> = Vec::new();
    for (_, span) in ordered {
        if kept.last().map_or(true, |last| span.start >= last.end) {
            kept.push(span.clone());
        }
    }
    kept
}

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(<span class="suspicious-term"[^>]*>)|</span>"#).expect("markup regex")
    })
}

/// Remove annotation markup, recovering the original text. A `</span>` is
/// dropped only while an annotation tag is open; spans never cover `<`, so
/// close tags already present in the input survive. Input that itself
/// contains a `suspicious-term` opening tag cannot be told apart.
pub fn strip_annotations(annotated: &str) -> String {
    let mut out = String::with_capacity(annotated.len());
    let mut open = 0usize;
    let mut cursor = 0;
    for caps in markup_re().captures_iter(annotated) {
        let Some(m) = caps.get(0) else { continue };
        let is_opener = caps.get(1).is_some();
        if !is_opener && open == 0 {
            continue;
        }
        if is_opener {
            open += 1;
        } else {
            open -= 1;
        }
        out.push_str(&annotated[cursor..m.start()]);
        cursor = m.end();
    }
    out.push_str(&annotated[cursor..]);
    out
}
