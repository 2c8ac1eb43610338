//! XML back-end.
//!
//! The wire format is byte-exact: two-space indentation, one element per
//! line, XML-1.1 escaping for character data, and floats in the host's
//! shortest round-trip form. An empty document serializes to exactly
//! `<document>\n</document>\n`. Sections appear only when they have
//! content, and the fonts/colors sections carry only the registry entries
//! that emitted elements actually reference.

use ahash::AHashSet;

use super::{SerializeOptions, Serializer, dominant_face, included_paragraphs, paragraph_chars};
use crate::error::Result;
use crate::types::content::{Character, Document, Page, Word};
use crate::types::font::{ColorId, FontFaceKey, FontId};
use crate::types::geometry::{Position, Rectangle};
use crate::types::roles::{ExtractionUnit, SemanticRole};

pub struct XmlSerializer {
    options: SerializeOptions,
}

impl XmlSerializer {
    pub fn new() -> XmlSerializer {
        XmlSerializer {
            options: SerializeOptions::default(),
        }
    }

    pub fn with_options(options: SerializeOptions) -> XmlSerializer {
        XmlSerializer { options }
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        XmlSerializer::new()
    }
}

impl Serializer for XmlSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut used_fonts: AHashSet<FontId> = AHashSet::new();
        let mut used_colors: AHashSet<ColorId> = AHashSet::new();
        let paragraphs = included_paragraphs(doc, &self.options);

        let mut w = XmlWriter::new();
        w.open("document");

        if self.options.includes_unit(ExtractionUnit::Paragraph) && !paragraphs.is_empty() {
            w.open("paragraphs");
            for paragraph in &paragraphs {
                let (face, color) = dominant_face(paragraph_chars(doc, paragraph));
                note_usage(&mut used_fonts, &mut used_colors, face, color);
                w.open("paragraph");
                write_positions(&mut w, &paragraph.positions);
                w.leaf("role", paragraph.role.as_str());
                write_face(&mut w, doc, face, color);
                w.leaf("text", &paragraph.text);
                w.close("paragraph");
            }
            w.close("paragraphs");
        }

        if self.options.includes_unit(ExtractionUnit::Word) {
            let words = collect_words(doc, &paragraphs);
            if !words.is_empty() {
                w.open("words");
                for (page, word) in words {
                    let (face, color) = dominant_face(page.word_chars(word));
                    note_usage(&mut used_fonts, &mut used_colors, face, color);
                    w.open("word");
                    write_positions(
                        &mut w,
                        &[Position {
                            page: page.number,
                            rect: word.rect,
                        }],
                    );
                    write_face(&mut w, doc, face, color);
                    w.leaf("text", &word.text);
                    w.close("word");
                }
                w.close("words");
            }
        }

        if self.options.includes_unit(ExtractionUnit::Character) {
            let chars = collect_chars(doc, &paragraphs);
            if !chars.is_empty() {
                w.open("characters");
                for (page, ch) in chars {
                    used_fonts.insert(ch.font);
                    used_colors.insert(ch.color);
                    w.open("character");
                    write_positions(
                        &mut w,
                        &[Position {
                            page: page.number,
                            rect: ch.rect,
                        }],
                    );
                    write_face(&mut w, doc, Some(ch.font_face().key()), Some(ch.color));
                    w.leaf("text", &ch.glyph);
                    w.close("character");
                }
                w.close("characters");
            }
        }

        if self.options.includes_unit(ExtractionUnit::Figure) {
            let figures: Vec<Position> = doc.pages.iter().flat_map(|p| p.figures.iter().map(|f| f.position)).collect();
            if !figures.is_empty() {
                w.open("figures");
                for position in figures {
                    w.open("figure");
                    write_positions(&mut w, &[position]);
                    w.close("figure");
                }
                w.close("figures");
            }
        }

        if self.options.includes_unit(ExtractionUnit::Shape) {
            let shapes: Vec<Position> = doc.pages.iter().flat_map(|p| p.shapes.iter().map(|s| s.position)).collect();
            if !shapes.is_empty() {
                w.open("shapes");
                for position in shapes {
                    w.open("shape");
                    write_positions(&mut w, &[position]);
                    w.close("shape");
                }
                w.close("shapes");
            }
        }

        // The pages section is written after the registries, so its
        // font/color references are collected up front.
        if self.options.includes_unit(ExtractionUnit::Page) {
            for page in &doc.pages {
                for block in &page.blocks {
                    note_usage(
                        &mut used_fonts,
                        &mut used_colors,
                        block.stat.most_common_face(),
                        block.stat.most_common_color(),
                    );
                }
                for line in &page.lines {
                    note_usage(
                        &mut used_fonts,
                        &mut used_colors,
                        line.stat.most_common_face(),
                        line.stat.most_common_color(),
                    );
                }
            }
        }

        write_registries(&mut w, doc, &used_fonts, &used_colors);

        if self.options.includes_unit(ExtractionUnit::Page) && !doc.pages.is_empty() {
            w.open("pages");
            for page in &doc.pages {
                write_page(&mut w, doc, page);
            }
            w.close("pages");
        }

        w.close("document");
        Ok(w.into_bytes())
    }
}

fn note_usage(
    fonts: &mut AHashSet<FontId>,
    colors: &mut AHashSet<ColorId>,
    face: Option<FontFaceKey>,
    color: Option<ColorId>,
) {
    if let Some(face) = face {
        fonts.insert(face.font);
    }
    if let Some(color) = color {
        colors.insert(color);
    }
}

/// Words of the included paragraphs, in paragraph order.
fn collect_words<'a>(doc: &'a Document, paragraphs: &[&'a crate::types::content::Paragraph]) -> Vec<(&'a Page, &'a Word)> {
    paragraphs
        .iter()
        .flat_map(|p| {
            p.words.iter().map(|wr| {
                let page = &doc.pages[wr.page];
                (page, &page.words[wr.word])
            })
        })
        .collect()
}

/// Characters of the included paragraphs, in paragraph order.
fn collect_chars<'a>(
    doc: &'a Document,
    paragraphs: &[&'a crate::types::content::Paragraph],
) -> Vec<(&'a Page, &'a Character)> {
    paragraphs
        .iter()
        .flat_map(|p| {
            p.words.iter().flat_map(|wr| {
                let page = &doc.pages[wr.page];
                page.words[wr.word].chars.iter().map(move |&ci| (page, &page.chars[ci]))
            })
        })
        .collect()
}

fn write_positions(w: &mut XmlWriter, positions: &[Position]) {
    if positions.is_empty() {
        return;
    }
    // The wrapper is part of the stable wire format even for a single
    // position; callers key on its presence.
    w.open("positions");
    for position in positions {
        w.open("position");
        w.leaf("page", &position.page.to_string());
        write_rect(w, &position.rect);
        w.close("position");
    }
    w.close("positions");
}

fn write_rect(w: &mut XmlWriter, rect: &Rectangle) {
    w.leaf("minX", &rect.min_x.to_string());
    w.leaf("minY", &rect.min_y.to_string());
    w.leaf("maxX", &rect.max_x.to_string());
    w.leaf("maxY", &rect.max_y.to_string());
}

fn write_face(w: &mut XmlWriter, doc: &Document, face: Option<FontFaceKey>, color: Option<ColorId>) {
    if let Some(face) = face {
        w.open("font");
        w.leaf("id", &doc.font(face.font).id);
        w.leaf("fontsize", &face.size().to_string());
        w.close("font");
    }
    if let Some(color) = color {
        w.open("color");
        w.leaf("id", &doc.color(color).id);
        w.close("color");
    }
}

fn write_registries(w: &mut XmlWriter, doc: &Document, used_fonts: &AHashSet<FontId>, used_colors: &AHashSet<ColorId>) {
    let fonts: Vec<_> = (0..doc.fonts.len())
        .filter(|&i| used_fonts.contains(&FontId(i)))
        .collect();
    if !fonts.is_empty() {
        w.open("fonts");
        for i in fonts {
            let font = &doc.fonts[i];
            w.open("font");
            w.leaf("id", &font.id);
            w.leaf("name", &font.name);
            w.leaf("isBold", &font.is_bold.to_string());
            w.leaf("isItalic", &font.is_italic.to_string());
            w.leaf("isType3", &font.is_type3.to_string());
            w.close("font");
        }
        w.close("fonts");
    }

    let colors: Vec<_> = (0..doc.colors.len())
        .filter(|&i| used_colors.contains(&ColorId(i)))
        .collect();
    if !colors.is_empty() {
        w.open("colors");
        for i in colors {
            let color = &doc.colors[i];
            w.open("color");
            w.leaf("id", &color.id);
            w.leaf("r", &color.r.to_string());
            w.leaf("g", &color.g.to_string());
            w.leaf("b", &color.b.to_string());
            w.close("color");
        }
        w.close("colors");
    }
}

fn write_page(w: &mut XmlWriter, doc: &Document, page: &Page) {
    w.open("page");
    w.leaf("width", &page.width.to_string());
    w.leaf("height", &page.height.to_string());
    for block in &page.blocks {
        w.open("textBlock");
        write_positions(
            w,
            &[Position {
                page: page.number,
                rect: block.rect,
            }],
        );
        w.leaf("role", block.role.unwrap_or(SemanticRole::BodyText).as_str());
        write_face(w, doc, block.stat.most_common_face(), block.stat.most_common_color());
        w.leaf("text", &block.text);
        w.close("textBlock");
    }
    for line in &page.lines {
        w.open("textLine");
        write_positions(
            w,
            &[Position {
                page: page.number,
                rect: line.rect,
            }],
        );
        write_face(w, doc, line.stat.most_common_face(), line.stat.most_common_color());
        w.leaf("text", &line.text);
        w.close("textLine");
    }
    w.close("page");
}

/// Minimal indenting writer for the fixed wire format.
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> XmlWriter {
        XmlWriter {
            out: String::new(),
            depth: 0,
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn leaf(&mut self, tag: &str, value: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        escape_into(&mut self.out, value);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.out.into_bytes()
    }
}

/// XML 1.1 escaping: the five predefined entities, numeric references for
/// the C0/C1 controls XML 1.1 admits only in escaped form, and NUL (never
/// representable) dropped.
fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\u{0}' => {}
            '\u{1}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
                out.push_str(&format!("&#x{:X};", c as u32));
            }
            _ => out.push(c),
        }
    }
}
