//! Character-to-line tokenization.
//!
//! Characters cluster by baseline with a tolerance proportional to the
//! page's dominant font size. Within a cluster, characters sort by their
//! left edge and split into words on gaps wider than the line's dominant
//! whitespace width. Rotated glyphs cluster separately per rotation bucket,
//! so a sideways figure label never lands inside a horizontal line.

use crate::config::LineConfig;
use crate::error::ExtractionError;
use crate::observer::{Diagnostic, DiagnosticObserver};
use crate::stats::{CharacterStatistic, Counter};
use crate::types::content::{Page, TextLine, Word};
use crate::types::geometry::{Baseline, Rectangle};

const DEFAULT_FONT_SIZE: f32 = 12.0;
/// Baselines and whitespace widths are bucketed to a tenth of a point.
const QUANTUM: f64 = 10.0;

struct Cluster {
    rotation: i32,
    chars: Vec<usize>,
    baselines: Counter<i64>,
}

impl Cluster {
    fn dominant_baseline(&self) -> f64 {
        self.baselines.most_common().map(|b| b as f64 / QUANTUM).unwrap_or(f64::NAN)
    }
}

/// Populate `page.words` and `page.lines` from `page.chars`.
///
/// Never fatal: characters with unusable geometry are dropped with a
/// diagnostic, and a page with nothing clusterable simply ends up with an
/// empty line list.
pub fn tokenize_lines(page: &mut Page, config: &LineConfig, observer: &dyn DiagnosticObserver) {
    page.words.clear();
    page.lines.clear();

    let mut usable: Vec<usize> = Vec::with_capacity(page.chars.len());
    for (i, ch) in page.chars.iter().enumerate() {
        if ch.rect.is_degenerate() || !ch.baseline_y.is_finite() {
            observer.observe(Diagnostic::GeometryDropped {
                error: &ExtractionError::InconsistentGeometry {
                    page: page.number,
                    detail: format!("character '{}' has unusable geometry", ch.glyph),
                },
            });
            continue;
        }
        usable.push(i);
    }
    if usable.is_empty() {
        return;
    }

    let mut page_stat = CharacterStatistic::default();
    for &i in &usable {
        let c = &page.chars[i];
        page_stat.record(c.font_face().key(), c.color, c.font_size);
    }
    let dominant_size = page_stat
        .most_common_face()
        .map(|f| f.size())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE);
    let tolerance = config.baseline_tolerance_factor * f64::from(dominant_size);

    let mut clusters = cluster_by_baseline(page, &usable, tolerance);
    merge_offset_baselines(page, &mut clusters, config.superscript_factor);

    let mut lines: Vec<TextLine> = Vec::with_capacity(clusters.len());
    for cluster in &mut clusters {
        if let Some(line) = build_line(page, cluster, config) {
            lines.push(line);
        }
    }

    // Top to bottom, then left to right. PDF origin is bottom-left, so the
    // top of the page has the larger y.
    lines.sort_by(|a, b| {
        let ya = a.baseline.map(|bl| bl.y).unwrap_or(f64::NEG_INFINITY);
        let yb = b.baseline.map(|bl| bl.y).unwrap_or(f64::NEG_INFINITY);
        yb.partial_cmp(&ya)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.rect.min_x.partial_cmp(&b.rect.min_x).unwrap_or(std::cmp::Ordering::Equal))
    });
    page.lines = lines;
}

fn cluster_by_baseline(page: &Page, usable: &[usize], tolerance: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for &i in usable {
        let ch = &page.chars[i];
        let rotation = ch.rotation.round() as i32;

        let mut best: Option<(usize, f64)> = None;
        for (ci, cluster) in clusters.iter().enumerate() {
            if cluster.rotation != rotation {
                continue;
            }
            let delta = (ch.baseline_y - cluster.dominant_baseline()).abs();
            if delta <= tolerance {
                match best {
                    Some((_, best_delta)) if best_delta <= delta => {}
                    _ => best = Some((ci, delta)),
                }
            }
        }

        match best {
            Some((ci, _)) => {
                clusters[ci].chars.push(i);
                clusters[ci].baselines.add((ch.baseline_y * QUANTUM).round() as i64, 1);
            }
            None => {
                let mut baselines = Counter::default();
                baselines.add((ch.baseline_y * QUANTUM).round() as i64, 1);
                clusters.push(Cluster {
                    rotation,
                    chars: vec![i],
                    baselines,
                });
            }
        }
    }
    clusters
}

/// Attach superscript/subscript clusters to their dominant neighbor: a
/// cluster whose baseline sits within `superscript_factor` of the larger
/// cluster's line height folds into it.
fn merge_offset_baselines(page: &Page, clusters: &mut Vec<Cluster>, superscript_factor: f64) {
    let mut merged = true;
    while merged {
        merged = false;
        'outer: for a in 0..clusters.len() {
            for b in (a + 1)..clusters.len() {
                if clusters[a].rotation != clusters[b].rotation {
                    continue;
                }
                let (big, small) = if clusters[a].chars.len() >= clusters[b].chars.len() {
                    (a, b)
                } else {
                    (b, a)
                };
                let delta = (clusters[big].dominant_baseline() - clusters[small].dominant_baseline()).abs();
                let height = cluster_height(page, &clusters[big]);
                if height > 0.0 && delta < superscript_factor * height {
                    let Cluster { chars, baselines, .. } = clusters.remove(small);
                    let big = if small < big { big - 1 } else { big };
                    clusters[big].chars.extend(chars);
                    clusters[big].baselines.merge(&baselines);
                    merged = true;
                    break 'outer;
                }
            }
        }
    }
}

fn cluster_height(page: &Page, cluster: &Cluster) -> f64 {
    let rect = cluster
        .chars
        .iter()
        .fold(Rectangle::empty(), |acc, &i| acc.union(&page.chars[i].rect));
    if rect.is_degenerate() { 0.0 } else { rect.height() }
}

/// Build one [`TextLine`] from a cluster, or `None` for a cluster with no
/// word-forming characters.
fn build_line(page: &mut Page, cluster: &mut Cluster, config: &LineConfig) -> Option<TextLine> {
    cluster.chars.sort_by(|&a, &b| {
        let xa = page.chars[a].rect.min_x;
        let xb = page.chars[b].rect.min_x;
        xa.partial_cmp(&xb).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
    });

    let mut stat = CharacterStatistic::default();
    for &i in &cluster.chars {
        let c = &page.chars[i];
        stat.record(c.font_face().key(), c.color, c.font_size);
    }

    let gap_threshold = word_gap_threshold(page, cluster, &stat, config);

    let mut word_indices: Vec<usize> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut prev_max_x: Option<f64> = None;
    let mut pending_break = false;

    for &i in &cluster.chars {
        let is_ws = is_whitespace(&page.chars[i].glyph);
        let min_x = page.chars[i].rect.min_x;
        let max_x = page.chars[i].rect.max_x;
        if is_ws {
            pending_break = true;
            prev_max_x = Some(max_x);
            continue;
        }
        let gap_break = prev_max_x.map(|x| min_x - x > gap_threshold).unwrap_or(false);
        if (pending_break || gap_break) && !current.is_empty() {
            word_indices.push(push_word(page, std::mem::take(&mut current)));
        }
        pending_break = false;
        current.push(i);
        prev_max_x = Some(max_x);
    }
    if !current.is_empty() {
        word_indices.push(push_word(page, current));
    }

    if word_indices.is_empty() {
        return None;
    }

    let rect = word_indices
        .iter()
        .fold(Rectangle::empty(), |acc, &w| acc.union(&page.words[w].rect));
    let text = word_indices
        .iter()
        .map(|&w| page.words[w].text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let baseline_y = cluster.dominant_baseline();
    let baseline = baseline_y
        .is_finite()
        .then(|| Baseline::new(rect.min_x, rect.max_x, baseline_y));

    Some(TextLine {
        words: word_indices,
        rect,
        baseline,
        stat,
        text,
    })
}

/// Word-gap threshold for one line: the line's most common whitespace glyph
/// width, with a font-size fraction as fallback for lines that contain no
/// whitespace glyphs.
fn word_gap_threshold(page: &Page, cluster: &Cluster, stat: &CharacterStatistic, config: &LineConfig) -> f64 {
    let mut widths = Counter::default();
    for &i in &cluster.chars {
        let ch = &page.chars[i];
        if is_whitespace(&ch.glyph) {
            widths.add((ch.rect.width() * QUANTUM).round() as i64, 1);
        }
    }
    if let Some(bucket) = widths.most_common() {
        let width = bucket as f64 / QUANTUM;
        if width > 0.0 {
            return width;
        }
    }
    let size = stat
        .most_common_face()
        .map(|f| f.size())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE);
    config.word_gap_factor * f64::from(size)
}

fn push_word(page: &mut Page, chars: Vec<usize>) -> usize {
    let rect = chars
        .iter()
        .fold(Rectangle::empty(), |acc, &i| acc.union(&page.chars[i].rect));
    let text: String = chars.iter().map(|&i| page.chars[i].glyph.as_str()).collect();
    page.words.push(Word { chars, rect, text });
    page.words.len() - 1
}

fn is_whitespace(glyph: &str) -> bool {
    !glyph.is_empty() && glyph.chars().all(char::is_whitespace)
}
