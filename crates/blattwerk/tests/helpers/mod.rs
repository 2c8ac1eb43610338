//! Shared builders for integration tests.

use blattwerk::types::font::{ColorId, FontId};
use blattwerk::{Character, Color, DocumentBuilder, Font, Rectangle};

/// Register the stock roman font and black color used by most fixtures.
pub fn stock_registries(builder: &mut DocumentBuilder) -> (FontId, ColorId) {
    let font = builder.intern_font(Font {
        id: "font-0".to_string(),
        name: "nimbusromno9l".to_string(),
        family_name: "Nimbus Roman".to_string(),
        base_name: "NimbusRomNo9L".to_string(),
        is_bold: false,
        is_italic: false,
        is_type3: false,
    });
    let color = builder.intern_color(Color {
        id: "color-0".to_string(),
        r: 0,
        g: 0,
        b: 0,
    });
    (font, color)
}

/// Lay out `text` as one visual line of characters starting at `x` on the
/// given baseline: fixed advance of half the font size, spaces included
/// as whitespace glyphs.
pub fn push_text_line(
    builder: &mut DocumentBuilder,
    font: FontId,
    color: ColorId,
    text: &str,
    x: f64,
    baseline: f64,
    size: f32,
) {
    let advance = f64::from(size) * 0.5;
    for (i, glyph) in text.chars().enumerate() {
        let gx = x + i as f64 * advance;
        builder.push_char(Character {
            glyph: glyph.to_string(),
            rect: Rectangle::from_corners(gx, baseline, gx + advance, baseline + f64::from(size)),
            baseline_y: baseline,
            font,
            font_size: size,
            color,
            rotation: 0.0,
        });
    }
}
