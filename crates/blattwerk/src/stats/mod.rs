//! Aggregate statistics over characters and line pitches.
//!
//! Statistics are pure aggregations and merge upwards: line into block,
//! block into page, page into document. "Most common" is a stable argmax;
//! ties are broken by first-seen order, which the insertion-ordered maps
//! guarantee.

mod character;
mod counter;
mod line_pitch;

pub use character::CharacterStatistic;
pub(crate) use counter::Counter;
pub use line_pitch::LinePitchStatistic;

use crate::types::content::{Document, DocumentStatistics, Page};

/// Document-level pitch-by-face expectation over all pages' lines.
///
/// Each adjacent-line pitch on a page is attributed to the lower line's
/// most common face, so dense footnote leading never skews the body-text
/// expectation. The block tokenizer consumes this before blocks exist.
pub fn document_line_pitch(pages: &[Page]) -> LinePitchStatistic {
    let mut stat = LinePitchStatistic::default();
    for page in pages {
        for pair in page.lines.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if let (Some(a), Some(b)) = (upper.baseline, lower.baseline) {
                if let Some(face) = lower.stat.most_common_face() {
                    stat.record(face, (a.y - b.y).abs());
                }
            }
        }
    }
    stat
}

/// Page-level character statistic: the aggregate of the page's blocks,
/// the same way each block aggregates its lines.
pub fn page_statistic(page: &Page) -> CharacterStatistic {
    let mut stat = CharacterStatistic::default();
    for block in &page.blocks {
        stat.merge(&block.stat);
    }
    stat
}

/// Finalize statistics bottom-up: materialize each page's statistic from
/// its blocks, aggregate the pages into the document statistic, and
/// recompute the pitch expectations over the full line sequence.
pub fn finalize_statistics(doc: &mut Document) {
    let mut chars = CharacterStatistic::default();
    for page in &mut doc.pages {
        page.stat = page_statistic(page);
        chars.merge(&page.stat);
    }
    doc.stats = DocumentStatistics {
        chars,
        line_pitch: document_line_pitch(&doc.pages),
    };
}
