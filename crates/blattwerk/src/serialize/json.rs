//! JSON back-end.
//!
//! Mirrors the XML vocabulary with camelCase keys. Output is pretty
//! printed by `serde_json`, whose map serialization is key-sorted, so the
//! byte sequence is deterministic.

use serde_json::{Value, json};

use super::{SerializeOptions, Serializer, dominant_face, included_paragraphs, paragraph_chars};
use crate::error::{ExtractionError, Result};
use crate::types::content::{Document, Page};
use crate::types::font::{ColorId, FontFaceKey, FontId};
use crate::types::geometry::{Position, Rectangle};
use crate::types::roles::{ExtractionUnit, SemanticRole};

use ahash::AHashSet;

pub struct JsonSerializer {
    options: SerializeOptions,
}

impl JsonSerializer {
    pub fn new() -> JsonSerializer {
        JsonSerializer {
            options: SerializeOptions::default(),
        }
    }

    pub fn with_options(options: SerializeOptions) -> JsonSerializer {
        JsonSerializer { options }
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        JsonSerializer::new()
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut used_fonts: AHashSet<FontId> = AHashSet::new();
        let mut used_colors: AHashSet<ColorId> = AHashSet::new();
        let paragraphs = included_paragraphs(doc, &self.options);
        let mut root = serde_json::Map::new();

        if self.options.includes_unit(ExtractionUnit::Paragraph) {
            let values: Vec<Value> = paragraphs
                .iter()
                .map(|p| {
                    let (face, color) = dominant_face(paragraph_chars(doc, p));
                    note_usage(&mut used_fonts, &mut used_colors, face, color);
                    let mut obj = serde_json::Map::new();
                    obj.insert("positions".to_string(), positions_value(&p.positions));
                    obj.insert("role".to_string(), json!(p.role.as_str()));
                    insert_face(&mut obj, doc, face, color);
                    obj.insert("text".to_string(), json!(p.text));
                    Value::Object(obj)
                })
                .collect();
            if !values.is_empty() {
                root.insert("paragraphs".to_string(), Value::Array(values));
            }
        }

        if self.options.includes_unit(ExtractionUnit::Word) {
            let mut values: Vec<Value> = Vec::new();
            for p in &paragraphs {
                for wr in &p.words {
                    let page = &doc.pages[wr.page];
                    let word = &page.words[wr.word];
                    let (face, color) = dominant_face(page.word_chars(word));
                    note_usage(&mut used_fonts, &mut used_colors, face, color);
                    let mut obj = serde_json::Map::new();
                    obj.insert(
                        "positions".to_string(),
                        positions_value(&[Position {
                            page: page.number,
                            rect: word.rect,
                        }]),
                    );
                    insert_face(&mut obj, doc, face, color);
                    obj.insert("text".to_string(), json!(word.text));
                    values.push(Value::Object(obj));
                }
            }
            if !values.is_empty() {
                root.insert("words".to_string(), Value::Array(values));
            }
        }

        if self.options.includes_unit(ExtractionUnit::Character) {
            let mut values: Vec<Value> = Vec::new();
            for p in &paragraphs {
                for wr in &p.words {
                    let page = &doc.pages[wr.page];
                    for &ci in &page.words[wr.word].chars {
                        let ch = &page.chars[ci];
                        used_fonts.insert(ch.font);
                        used_colors.insert(ch.color);
                        let mut obj = serde_json::Map::new();
                        obj.insert(
                            "positions".to_string(),
                            positions_value(&[Position {
                                page: page.number,
                                rect: ch.rect,
                            }]),
                        );
                        insert_face(&mut obj, doc, Some(ch.font_face().key()), Some(ch.color));
                        obj.insert("text".to_string(), json!(ch.glyph));
                        values.push(Value::Object(obj));
                    }
                }
            }
            if !values.is_empty() {
                root.insert("characters".to_string(), Value::Array(values));
            }
        }

        if self.options.includes_unit(ExtractionUnit::Figure) {
            let values: Vec<Value> = doc
                .pages
                .iter()
                .flat_map(|p| p.figures.iter().map(|f| json!({ "positions": positions_value(&[f.position]) })))
                .collect();
            if !values.is_empty() {
                root.insert("figures".to_string(), Value::Array(values));
            }
        }

        if self.options.includes_unit(ExtractionUnit::Shape) {
            let values: Vec<Value> = doc
                .pages
                .iter()
                .flat_map(|p| p.shapes.iter().map(|s| json!({ "positions": positions_value(&[s.position]) })))
                .collect();
            if !values.is_empty() {
                root.insert("shapes".to_string(), Value::Array(values));
            }
        }

        if self.options.includes_unit(ExtractionUnit::Page) && !doc.pages.is_empty() {
            let values: Vec<Value> = doc
                .pages
                .iter()
                .map(|page| page_value(doc, page, &mut used_fonts, &mut used_colors))
                .collect();
            root.insert("pages".to_string(), Value::Array(values));
        }

        // Registries go in last so they cover the pages section's
        // references too; the pretty printer sorts keys, so insertion
        // order never shows in the output.
        insert_registries(&mut root, doc, &used_fonts, &used_colors);

        let mut bytes = serde_json::to_vec_pretty(&Value::Object(root))
            .map_err(|e| ExtractionError::Config(format!("JSON serialization failed: {}", e)))?;
        bytes.push(b'\n');
        Ok(bytes)
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

fn rect_fields(rect: &Rectangle) -> Value {
    json!({
        "minX": rect.min_x,
        "minY": rect.min_y,
        "maxX": rect.max_x,
        "maxY": rect.max_y,
    })
}

fn positions_value(positions: &[Position]) -> Value {
    Value::Array(
        positions
            .iter()
            .map(|p| {
                let mut obj = match rect_fields(&p.rect) {
                    Value::Object(obj) => obj,
                    _ => unreachable!("rect_fields builds an object"),
                };
                obj.insert("page".to_string(), json!(p.page));
                Value::Object(obj)
            })
            .collect(),
    )
}

fn insert_face(
    obj: &mut serde_json::Map<String, Value>,
    doc: &Document,
    face: Option<FontFaceKey>,
    color: Option<ColorId>,
) {
    if let Some(face) = face {
        obj.insert(
            "font".to_string(),
            json!({ "id": doc.font(face.font).id, "fontsize": face.size() }),
        );
    }
    if let Some(color) = color {
        obj.insert("color".to_string(), json!({ "id": doc.color(color).id }));
    }
}

fn insert_registries(
    root: &mut serde_json::Map<String, Value>,
    doc: &Document,
    used_fonts: &AHashSet<FontId>,
    used_colors: &AHashSet<ColorId>,
) {
    let fonts: Vec<Value> = doc
        .fonts
        .iter()
        .enumerate()
        .filter(|(i, _)| used_fonts.contains(&FontId(*i)))
        .map(|(_, f)| {
            json!({
                "id": f.id,
                "name": f.name,
                "isBold": f.is_bold,
                "isItalic": f.is_italic,
                "isType3": f.is_type3,
            })
        })
        .collect();
    if !fonts.is_empty() {
        root.insert("fonts".to_string(), Value::Array(fonts));
    }

    let colors: Vec<Value> = doc
        .colors
        .iter()
        .enumerate()
        .filter(|(i, _)| used_colors.contains(&ColorId(*i)))
        .map(|(_, c)| json!({ "id": c.id, "r": c.r, "g": c.g, "b": c.b }))
        .collect();
    if !colors.is_empty() {
        root.insert("colors".to_string(), Value::Array(colors));
    }
}

fn page_value(doc: &Document, page: &Page, used_fonts: &mut AHashSet<FontId>, used_colors: &mut AHashSet<ColorId>) -> Value {
    let blocks: Vec<Value> = page
        .blocks
        .iter()
        .map(|b| {
            let (face, color) = (b.stat.most_common_face(), b.stat.most_common_color());
            note_usage(used_fonts, used_colors, face, color);
            let mut obj = serde_json::Map::new();
            obj.insert(
                "positions".to_string(),
                positions_value(&[Position {
                    page: page.number,
                    rect: b.rect,
                }]),
            );
            obj.insert(
                "role".to_string(),
                json!(b.role.unwrap_or(SemanticRole::BodyText).as_str()),
            );
            insert_face(&mut obj, doc, face, color);
            obj.insert("text".to_string(), json!(b.text));
            Value::Object(obj)
        })
        .collect();
    let lines: Vec<Value> = page
        .lines
        .iter()
        .map(|l| {
            let (face, color) = (l.stat.most_common_face(), l.stat.most_common_color());
            note_usage(used_fonts, used_colors, face, color);
            let mut obj = serde_json::Map::new();
            obj.insert(
                "positions".to_string(),
                positions_value(&[Position {
                    page: page.number,
                    rect: l.rect,
                }]),
            );
            insert_face(&mut obj, doc, face, color);
            obj.insert("text".to_string(), json!(l.text));
            Value::Object(obj)
        })
        .collect();
    json!({
        "width": page.width,
        "height": page.height,
        "textBlocks": blocks,
        "textLines": lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::tests::{options, tiny_document};

    #[test]
    fn test_empty_document_is_empty_object() {
        let doc = Document::default();
        let bytes = JsonSerializer::new().serialize(&doc).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{}\n");
    }

    #[test]
    fn test_paragraph_fields() {
        let doc = tiny_document();
        let bytes = JsonSerializer::with_options(options(&[ExtractionUnit::Paragraph], &[SemanticRole::BodyText]))
            .serialize(&doc)
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let paragraph = &value["paragraphs"][0];
        assert_eq!(paragraph["role"], "body-text");
        assert_eq!(paragraph["text"], "Hi");
        assert_eq!(paragraph["font"]["id"], "font-0");
        assert_eq!(paragraph["positions"][0]["page"], 1);
        assert_eq!(value["fonts"][0]["id"], "font-0");
        assert_eq!(value["colors"][0]["id"], "color-0");
    }

    #[test]
    fn test_role_filter() {
        let doc = tiny_document();
        let bytes = JsonSerializer::with_options(options(&[ExtractionUnit::Paragraph], &[SemanticRole::Heading]))
            .serialize(&doc)
            .unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{}\n");
    }

    #[test]
    fn test_page_unit_carries_faces_and_registries() {
        let doc = tiny_document();
        let bytes = JsonSerializer::with_options(options(&[ExtractionUnit::Page], &[]))
            .serialize(&doc)
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        let block = &value["pages"][0]["textBlocks"][0];
        assert_eq!(block["font"]["id"], "font-0");
        assert_eq!(block["font"]["fontsize"], 10.0);
        assert_eq!(block["color"]["id"], "color-0");
        let line = &value["pages"][0]["textLines"][0];
        assert_eq!(line["font"]["id"], "font-0");

        // The pages section's references pull the registries in.
        assert_eq!(value["fonts"].as_array().map(|a| a.len()), Some(1));
        assert_eq!(value["colors"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_deterministic_output() {
        let doc = tiny_document();
        let opts = options(ExtractionUnit::all(), SemanticRole::all());
        let first = JsonSerializer::with_options(opts.clone()).serialize(&doc).unwrap();
        let second = JsonSerializer::with_options(opts).serialize(&doc).unwrap();
        assert_eq!(first, second);
    }
}
