use serde::{Deserialize, Serialize};

use super::Counter;
use crate::types::font::{ColorId, FontFaceKey};

/// Distribution of font faces, colors, and sizes over a span of characters.
///
/// Carried by every line and block and merged upwards, so the full
/// distribution (not just the argmax) survives aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterStatistic {
    faces: Counter<FontFaceKey>,
    colors: Counter<ColorId>,
    size_sum: f64,
    count: u64,
}

impl CharacterStatistic {
    pub fn record(&mut self, face: FontFaceKey, color: ColorId, font_size: f32) {
        self.faces.add(face, 1);
        self.colors.add(color, 1);
        self.size_sum += f64::from(font_size);
        self.count += 1;
    }

    pub fn merge(&mut self, other: &CharacterStatistic) {
        self.faces.merge(&other.faces);
        self.colors.merge(&other.colors);
        self.size_sum += other.size_sum;
        self.count += other.count;
    }

    pub fn most_common_face(&self) -> Option<FontFaceKey> {
        self.faces.most_common()
    }

    pub fn most_common_color(&self) -> Option<ColorId> {
        self.colors.most_common()
    }

    pub fn average_font_size(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            (self.size_sum / self.count as f64) as f32
        }
    }

    pub fn char_count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::font::FontId;

    fn key(font: usize, size: f32) -> FontFaceKey {
        FontFaceKey {
            font: FontId(font),
            deci_size: (size * 10.0).round() as i32,
        }
    }

    #[test]
    fn test_empty_statistic() {
        let stat = CharacterStatistic::default();
        assert_eq!(stat.most_common_face(), None);
        assert_eq!(stat.most_common_color(), None);
        assert_eq!(stat.average_font_size(), 0.0);
        assert_eq!(stat.char_count(), 0);
    }

    #[test]
    fn test_most_common_face_after_merge() {
        let mut a = CharacterStatistic::default();
        a.record(key(0, 10.0), ColorId(0), 10.0);
        a.record(key(0, 10.0), ColorId(0), 10.0);

        let mut b = CharacterStatistic::default();
        for _ in 0..3 {
            b.record(key(1, 18.0), ColorId(1), 18.0);
        }

        a.merge(&b);
        assert_eq!(a.most_common_face(), Some(key(1, 18.0)));
        assert_eq!(a.most_common_color(), Some(ColorId(1)));
        assert_eq!(a.char_count(), 5);
    }

    #[test]
    fn test_average_font_size() {
        let mut stat = CharacterStatistic::default();
        stat.record(key(0, 10.0), ColorId(0), 10.0);
        stat.record(key(0, 14.0), ColorId(0), 14.0);
        assert_eq!(stat.average_font_size(), 12.0);
    }
}
