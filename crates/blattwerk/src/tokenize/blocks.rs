//! Line-to-block tokenization.
//!
//! Lines stream in reading order through an ordered rule set; the first
//! rule that fires opens a new block, otherwise the line joins the current
//! one. The rules compare geometry and typography against document-level
//! expectations, so the line-pitch statistic must be final before this
//! stage runs.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::BlockConfig;
use crate::error::ExtractionError;
use crate::observer::{Diagnostic, DiagnosticObserver};
use crate::stats::{CharacterStatistic, LinePitchStatistic};
use crate::types::content::{Page, TextBlock, TextLine};
use crate::types::font::Font;
use crate::types::geometry::Rectangle;

static REFERENCE_ANCHOR_RE: OnceLock<Regex> = OnceLock::new();

/// `^\[(.*)\]\s+`: a bracketed citation marker at the start of a line,
/// greedy inside the brackets, with at least one trailing whitespace.
fn reference_anchor_regex() -> &'static Regex {
    REFERENCE_ANCHOR_RE.get_or_init(|| Regex::new(r"^\[(.*)\]\s+").expect("reference anchor regex compiles"))
}

pub(crate) fn starts_with_reference_anchor(text: &str) -> bool {
    reference_anchor_regex().is_match(text)
}

/// Populate `page.blocks` from `page.lines`.
///
/// `doc_pitch` is the document-level pitch-by-face expectation computed
/// over all pages' lines. Lines without a usable baseline or rectangle are
/// dropped with a diagnostic; the stream continues around them.
pub fn tokenize_blocks(
    page: &mut Page,
    fonts: &[Font],
    doc_pitch: &LinePitchStatistic,
    config: &BlockConfig,
    observer: &dyn DiagnosticObserver,
) {
    page.blocks.clear();

    let mut usable: Vec<usize> = Vec::with_capacity(page.lines.len());
    for (i, line) in page.lines.iter().enumerate() {
        if line.baseline.is_none() || line.rect.is_degenerate() {
            observer.observe(Diagnostic::GeometryDropped {
                error: &ExtractionError::InconsistentGeometry {
                    page: page.number,
                    detail: format!("line '{}' has no usable baseline", truncate(&line.text)),
                },
            });
            continue;
        }
        usable.push(i);
    }

    let mut blocks: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_rect = Rectangle::empty();

    for (k, &li) in usable.iter().enumerate() {
        let prev = k.checked_sub(1).map(|p| &page.lines[usable[p]]);
        let next = usable.get(k + 1).map(|&n| &page.lines[n]);
        let line = &page.lines[li];

        let block_rect = (!current.is_empty()).then_some(current_rect);
        if introduces_new_block(prev, line, next, block_rect, fonts, doc_pitch, config) && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
            current_rect = Rectangle::empty();
        }
        current.push(li);
        current_rect = current_rect.union(&line.rect);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    page.blocks = blocks.into_iter().map(|lines| build_block(page, lines)).collect();
}

/// The ordered rule set. First rule that fires wins; none firing appends
/// the line to the current block.
fn introduces_new_block(
    prev: Option<&TextLine>,
    line: &TextLine,
    next: Option<&TextLine>,
    block_rect: Option<Rectangle>,
    fonts: &[Font],
    doc_pitch: &LinePitchStatistic,
    config: &BlockConfig,
) -> bool {
    // No previous line: the page starts here.
    let Some(prev) = prev else {
        return true;
    };
    // An empty current block always absorbs the line.
    let Some(block_rect) = block_rect else {
        return false;
    };
    if !block_rect.overlaps_horizontally(&line.rect) {
        return true;
    }
    if pitch_larger_than_expected(prev, line, doc_pitch, config) {
        return true;
    }
    let pitch_to_prev = line_pitch(prev, line);
    let pitch_to_next = next.map(|n| line_pitch(line, n)).unwrap_or(f64::NAN);
    // NaN compares false: an unknown pitch never opens a block here.
    if pitch_to_prev - pitch_to_next > config.offset_tolerance {
        return true;
    }
    if is_indented(prev, line, next, config) {
        return true;
    }
    if significant_font_face_change(prev, line, fonts, config) {
        return true;
    }
    if is_probably_reference_start(Some(prev), line, next, config) {
        return true;
    }
    false
}

/// Vertical distance between two lines' baselines; NaN when either
/// baseline is missing.
fn line_pitch(a: &TextLine, b: &TextLine) -> f64 {
    match (a.baseline, b.baseline) {
        (Some(a), Some(b)) => (a.y - b.y).abs(),
        _ => f64::NAN,
    }
}

/// True when the pitch from `prev` exceeds the document-level expectation
/// for the line's face by more than the slack, or exceeds the height
/// fallback for faces without an expectation.
fn pitch_larger_than_expected(prev: &TextLine, line: &TextLine, doc_pitch: &LinePitchStatistic, config: &BlockConfig) -> bool {
    let actual = line_pitch(prev, line);
    if !actual.is_finite() {
        return false;
    }
    if actual > config.pitch_height_factor * line.rect.height() {
        return true;
    }
    match line.stat.most_common_face().and_then(|face| doc_pitch.most_common_pitch(face)) {
        Some(expected) => actual - expected > config.pitch_slack,
        None => false,
    }
}

/// An isolated left-shifted line between two flush neighbors at even
/// pitch: the classic paragraph-opening indent.
fn is_indented(prev: &TextLine, line: &TextLine, next: Option<&TextLine>, config: &BlockConfig) -> bool {
    let Some(next) = next else {
        return false;
    };
    let pitch_prev = line_pitch(prev, line);
    let pitch_next = line_pitch(line, next);
    if !((pitch_prev - pitch_next).abs() < config.offset_tolerance) {
        return false;
    }
    if starts_with_reference_anchor(&prev.text) && starts_with_reference_anchor(&next.text) {
        return false;
    }
    line.rect.min_x - prev.rect.min_x > config.offset_tolerance
        && line.rect.min_x - next.rect.min_x > config.offset_tolerance
        && (prev.rect.min_x - next.rect.min_x).abs() < config.offset_tolerance
}

/// Faces differ significantly when the family changes, the size jumps, or
/// the weight flips. A line with no face at all differs from one with a
/// face.
fn significant_font_face_change(prev: &TextLine, line: &TextLine, fonts: &[Font], config: &BlockConfig) -> bool {
    match (prev.stat.most_common_face(), line.stat.most_common_face()) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(a), Some(b)) => {
            let font_a = &fonts[a.font.0];
            let font_b = &fonts[b.font.0];
            font_a.family_name != font_b.family_name
                || (a.size() - b.size()).abs() > config.font_size_change
                || font_a.is_bold != font_b.is_bold
        }
    }
}

/// A line opening a bracketed reference entry.
///
/// The anchor on the line itself is necessary but not sufficient: a lone
/// "[12] ..." inside running text must not split its paragraph. Neighbors
/// decide: a neighbor supports the split when its left edge is offset from
/// the line's (reference continuations are typically indented) or when it
/// carries an anchor itself. An anchored predecessor alone is decisive;
/// the line then sits inside a reference list no matter how the following
/// continuation line is set. A missing neighbor counts as offset, so
/// reference lists still split at page edges.
fn is_probably_reference_start(
    prev: Option<&TextLine>,
    line: &TextLine,
    next: Option<&TextLine>,
    config: &BlockConfig,
) -> bool {
    if !starts_with_reference_anchor(&line.text) {
        return false;
    }
    let offset_differs = |neighbor: Option<&TextLine>| -> bool {
        neighbor
            .map(|n| (n.rect.min_x - line.rect.min_x).abs() > config.anchor_offset_tolerance)
            .unwrap_or(true)
    };
    let anchored = |neighbor: Option<&TextLine>| -> bool {
        neighbor.map(|n| starts_with_reference_anchor(&n.text)).unwrap_or(false)
    };

    let prev_supports = offset_differs(prev) || anchored(prev);
    let next_supports = offset_differs(next) || anchored(next);
    prev_supports && (next_supports || anchored(prev))
}

fn build_block(page: &Page, lines: Vec<usize>) -> TextBlock {
    let mut stat = CharacterStatistic::default();
    let mut pitch_stat = LinePitchStatistic::default();
    let mut rect = Rectangle::empty();
    let mut texts: Vec<&str> = Vec::with_capacity(lines.len());

    for (k, &li) in lines.iter().enumerate() {
        let line = &page.lines[li];
        stat.merge(&line.stat);
        rect = rect.union(&line.rect);
        texts.push(&line.text);

        if let Some(&upper) = k.checked_sub(1).and_then(|p| lines.get(p)) {
            let pitch = line_pitch(&page.lines[upper], line);
            if let Some(face) = line.stat.most_common_face() {
                pitch_stat.record(face, pitch);
            }
        }
    }

    TextBlock {
        lines,
        rect,
        stat,
        pitch_stat,
        text: texts.join(" "),
        role: None,
        secondary_role: None,
    }
}

fn truncate(text: &str) -> &str {
    let end = text.char_indices().nth(40).map(|(i, _)| i).unwrap_or(text.len());
    &text[..end]
}
