//! The character producer seam.
//!
//! The content-stream interpreter that turns PDF bytes into positioned
//! characters lives outside this crate. It implements
//! [`CharacterProducer`] and assembles its output with
//! [`DocumentBuilder`], which interns fonts and colors into the document
//! registries.

use ahash::AHashMap;

use crate::error::Result;
use crate::types::content::{Character, Document, Figure, Page, Shape};
use crate::types::font::{Color, ColorId, Font, FontId};
use crate::types::geometry::{Position, Rectangle};

/// Produces a [`Document`] populated with pages, characters, figures,
/// shapes, and the font/color registries.
///
/// Fails with [`crate::ExtractionError::Parse`] on malformed input,
/// [`crate::ExtractionError::UnsupportedFeature`] on features it cannot
/// handle (e.g. encryption), and [`crate::ExtractionError::Io`] otherwise.
pub trait CharacterProducer {
    fn produce(&self, pdf: &[u8]) -> Result<Document>;
}

/// Producer-side document assembly with font/color interning.
///
/// Pages are opened with [`DocumentBuilder::start_page`]; content methods
/// append to the most recently opened page and panic when no page is open
/// (a producer bug, not an input condition).
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
    fonts_by_id: AHashMap<String, FontId>,
    colors_by_id: AHashMap<String, ColorId>,
}

impl DocumentBuilder {
    pub fn new() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Intern a font, returning the existing id when the producer has
    /// registered a font with the same identifier before.
    pub fn intern_font(&mut self, font: Font) -> FontId {
        if let Some(&id) = self.fonts_by_id.get(&font.id) {
            return id;
        }
        let id = FontId(self.doc.fonts.len());
        self.fonts_by_id.insert(font.id.clone(), id);
        self.doc.fonts.push(font);
        id
    }

    /// Intern a color, deduplicating by identifier.
    pub fn intern_color(&mut self, color: Color) -> ColorId {
        if let Some(&id) = self.colors_by_id.get(&color.id) {
            return id;
        }
        let id = ColorId(self.doc.colors.len());
        self.colors_by_id.insert(color.id.clone(), id);
        self.doc.colors.push(color);
        id
    }

    /// Open the next page. Page numbers are assigned sequentially from 1.
    pub fn start_page(&mut self, width: f64, height: f64) -> u32 {
        let number = self.doc.pages.len() as u32 + 1;
        self.doc.pages.push(Page::new(number, width, height));
        number
    }

    pub fn push_char(&mut self, ch: Character) {
        self.current_page().chars.push(ch);
    }

    pub fn push_figure(&mut self, rect: Rectangle) {
        let number = self.current_page_number();
        self.current_page().figures.push(Figure {
            position: Position { page: number, rect },
        });
    }

    pub fn push_shape(&mut self, rect: Rectangle) {
        let number = self.current_page_number();
        self.current_page().shapes.push(Shape {
            position: Position { page: number, rect },
        });
    }

    pub fn finish(self) -> Document {
        self.doc
    }

    fn current_page(&mut self) -> &mut Page {
        self.doc.pages.last_mut().expect("start_page before pushing content")
    }

    fn current_page_number(&self) -> u32 {
        self.doc.pages.last().expect("start_page before pushing content").number
    }
}
