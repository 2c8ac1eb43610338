//! The document content model: characters up through pages and paragraphs.
//!
//! Ownership follows the pipeline: a [`Page`] owns its characters, figures,
//! and shapes (producer output) together with the words, lines, and blocks
//! derived from them (tokenizer output). Derived entities reference their
//! constituents by index into the owning page's vectors, so the model stays
//! flat and cheaply cloneable. A [`Paragraph`] may span pages and therefore
//! addresses words through [`WordRef`].

use serde::{Deserialize, Serialize};

use super::font::{Color, ColorId, Font, FontFace, FontId};
use super::geometry::{Baseline, Position, Rectangle};
use super::roles::SemanticRole;
use crate::stats::{CharacterStatistic, LinePitchStatistic};

/// A positioned glyph as emitted by the character producer.
///
/// `glyph` is a string rather than a `char`: ligatures and surrogate
/// sequences arrive as multi-scalar units and are accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub glyph: String,
    pub rect: Rectangle,
    /// Y coordinate of the baseline the glyph rests on.
    pub baseline_y: f64,
    pub font: FontId,
    pub font_size: f32,
    pub color: ColorId,
    /// Glyph rotation in degrees, counter-clockwise. Rotated text is
    /// clustered into its own lines.
    #[serde(default)]
    pub rotation: f32,
}

impl Character {
    pub fn font_face(&self) -> FontFace {
        FontFace::new(self.font, self.font_size)
    }
}

/// A maximal run of characters without a word-sized gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Indices into the owning page's character vector, left to right.
    pub chars: Vec<usize>,
    pub rect: Rectangle,
    pub text: String,
}

/// A baseline-aligned sequence of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Indices into the owning page's word vector, left to right.
    pub words: Vec<usize>,
    pub rect: Rectangle,
    /// Missing when the producer yielded no usable baseline; such lines are
    /// dropped with a diagnostic during block tokenization.
    pub baseline: Option<Baseline>,
    pub stat: CharacterStatistic,
    pub text: String,
}

/// A visually coherent group of consecutive lines on one page.
///
/// `role` and `secondary_role` are the one sanctioned mutation point after
/// construction; only the semanticizer writes them, through its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Indices into the owning page's line vector, top to bottom.
    pub lines: Vec<usize>,
    pub rect: Rectangle,
    pub stat: CharacterStatistic,
    pub pitch_stat: LinePitchStatistic,
    pub text: String,
    pub role: Option<SemanticRole>,
    pub secondary_role: Option<SemanticRole>,
}

/// Addresses one word of one page from a document-level entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRef {
    /// 0-based page index.
    pub page: usize,
    /// Index into that page's word vector.
    pub word: usize,
}

/// A logical reading unit, possibly spanning multiple pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub role: SemanticRole,
    /// One position per text block the paragraph covers, in reading order.
    pub positions: Vec<Position>,
    pub words: Vec<WordRef>,
    pub text: String,
}

/// A raster or vector image region reported by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub position: Position,
}

/// A path-drawing region (rules, boxes, decorations) reported by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub position: Position,
}

/// One page of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub width: f64,
    pub height: f64,
    /// Characters in reading order, as produced.
    #[serde(default)]
    pub chars: Vec<Character>,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Derived by the line tokenizer.
    #[serde(default)]
    pub words: Vec<Word>,
    /// Derived by the line tokenizer, sorted top to bottom.
    #[serde(default)]
    pub lines: Vec<TextLine>,
    /// Derived by the block tokenizer, in reading order.
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
    /// Derived by the statistician: the aggregate of the page's blocks.
    #[serde(default)]
    pub stat: CharacterStatistic,
}

impl Page {
    pub fn new(number: u32, width: f64, height: f64) -> Page {
        Page {
            number,
            width,
            height,
            chars: Vec::new(),
            figures: Vec::new(),
            shapes: Vec::new(),
            words: Vec::new(),
            lines: Vec::new(),
            blocks: Vec::new(),
            stat: CharacterStatistic::default(),
        }
    }

    /// Characters of one word, in order.
    pub fn word_chars<'a>(&'a self, word: &'a Word) -> impl Iterator<Item = &'a Character> {
        word.chars.iter().map(move |&i| &self.chars[i])
    }

    /// Words of one line, in order.
    pub fn line_words<'a>(&'a self, line: &'a TextLine) -> impl Iterator<Item = &'a Word> {
        line.words.iter().map(move |&i| &self.words[i])
    }

    /// Lines of one block, in order.
    pub fn block_lines<'a>(&'a self, block: &'a TextBlock) -> impl Iterator<Item = &'a TextLine> {
        block.lines.iter().map(move |&i| &self.lines[i])
    }
}

/// Document-level aggregate statistics, finalized before semantic modules run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    pub chars: CharacterStatistic,
    pub line_pitch: LinePitchStatistic,
}

/// The root aggregate: pages plus the font/color registries and the
/// paragraphs assembled across pages.
///
/// Producer dumps may omit every derived field; deserialization fills
/// them with their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub pages: Vec<Page>,
    pub fonts: Vec<Font>,
    pub colors: Vec<Color>,
    pub paragraphs: Vec<Paragraph>,
    pub stats: DocumentStatistics,
}

impl Document {
    pub fn font(&self, id: FontId) -> &Font {
        &self.fonts[id.0]
    }

    pub fn color(&self, id: ColorId) -> &Color {
        &self.colors[id.0]
    }

    /// Total number of characters across all pages.
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.chars.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    /// Blocks of all pages in document order, with their page index.
    pub fn blocks_in_order(&self) -> impl Iterator<Item = (usize, usize, &TextBlock)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(pi, page)| page.blocks.iter().enumerate().map(move |(bi, b)| (pi, bi, b)))
    }
}
