//! Serialization back-ends.
//!
//! All back-ends share one contract: deterministic UTF-8 output, selected
//! by an extraction-unit set and filtered by a semantic-role set. Role
//! filtering applies to paragraphs and everything reached through them;
//! figures, shapes, and pages are emitted whenever their unit is selected.

mod json;
mod txt;
mod xml;

pub use json::JsonSerializer;
pub use txt::TxtSerializer;
pub use xml::XmlSerializer;

use ahash::AHashSet;

use crate::error::Result;
use crate::stats::CharacterStatistic;
use crate::types::content::{Character, Document, Paragraph};
use crate::types::font::{ColorId, FontFaceKey};
use crate::types::roles::{ExtractionUnit, SemanticRole};

/// Unit selection and role filtering, shared by every back-end.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    pub units: AHashSet<ExtractionUnit>,
    pub roles: AHashSet<SemanticRole>,
}

impl Default for SerializeOptions {
    /// Paragraphs of every role.
    fn default() -> Self {
        SerializeOptions {
            units: [ExtractionUnit::Paragraph].into_iter().collect(),
            roles: SemanticRole::all().iter().copied().collect(),
        }
    }
}

impl SerializeOptions {
    pub fn includes_unit(&self, unit: ExtractionUnit) -> bool {
        self.units.contains(&unit)
    }

    pub fn includes_role(&self, role: SemanticRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A serialization back-end. Identical document and options produce an
/// identical byte sequence on every run and platform.
pub trait Serializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>>;
}

/// Renders an annotated overlay of the analyzed document (e.g. a PDF with
/// block and role markup). Implementations live outside this crate; the
/// trait only fixes the seam they plug into.
pub trait Visualizer {
    fn visualize(&self, doc: &Document) -> Result<Vec<u8>>;
}

/// Paragraphs passing the role filter, in document order.
pub(crate) fn included_paragraphs<'a>(doc: &'a Document, options: &SerializeOptions) -> Vec<&'a Paragraph> {
    doc.paragraphs
        .iter()
        .filter(|p| options.includes_role(p.role))
        .collect()
}

/// All characters of a paragraph, in reading order.
pub(crate) fn paragraph_chars<'a>(doc: &'a Document, paragraph: &'a Paragraph) -> impl Iterator<Item = &'a Character> {
    paragraph.words.iter().flat_map(move |wr| {
        let page = &doc.pages[wr.page];
        page.words[wr.word].chars.iter().map(move |&ci| &page.chars[ci])
    })
}

/// Dominant face and color over a span of characters, for the `font` and
/// `color` attributes of aggregate elements.
pub(crate) fn dominant_face<'a>(
    chars: impl Iterator<Item = &'a Character>,
) -> (Option<FontFaceKey>, Option<ColorId>) {
    let mut stat = CharacterStatistic::default();
    for c in chars {
        stat.record(c.font_face().key(), c.color, c.font_size);
    }
    (stat.most_common_face(), stat.most_common_color())
}
