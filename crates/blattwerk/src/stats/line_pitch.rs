use serde::{Deserialize, Serialize};

use super::Counter;
use crate::types::font::FontFaceKey;

use indexmap::IndexMap;

/// Pitches are bucketed to a tenth of a point before counting; rendering
/// jitter below that threshold is noise.
const PITCH_QUANTUM: f64 = 10.0;

/// Distribution of adjacent-line pitches, keyed by font face.
///
/// Each observed pitch is attributed to the *lower* line's most common
/// face, so queries return a face-specific expectation: body text and
/// dense footnotes keep separate pitch profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePitchStatistic {
    by_face: IndexMap<FontFaceKey, Counter<i64>, ahash::RandomState>,
}

impl LinePitchStatistic {
    pub fn record(&mut self, face: FontFaceKey, pitch: f64) {
        if !pitch.is_finite() {
            return;
        }
        let bucket = (pitch * PITCH_QUANTUM).round() as i64;
        self.by_face.entry(face).or_default().add(bucket, 1);
    }

    pub fn merge(&mut self, other: &LinePitchStatistic) {
        for (&face, counter) in &other.by_face {
            self.by_face.entry(face).or_default().merge(counter);
        }
    }

    /// Most common pitch for the given face, if any pitch was observed.
    pub fn most_common_pitch(&self, face: FontFaceKey) -> Option<f64> {
        self.by_face
            .get(&face)
            .and_then(|c| c.most_common())
            .map(|bucket| bucket as f64 / PITCH_QUANTUM)
    }

    pub fn is_empty(&self) -> bool {
        self.by_face.values().all(|c| c.is_empty())
    }
}
