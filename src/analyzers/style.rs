use super::{load_probes, tuning::STYLE_PROBES, FeatureAnalyzer};
use crate::{
    FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, FontStyle, GlyphSample, Label,
    OutlineSource, Panose, StyleScores,
};

const SCRIPT_TERMS: &[&str] = &[
    "script",
    "handwriting",
    "cursive",
    "brush",
    "pacifico",
    "dancing",
];
const DECORATIVE_TERMS: &[&str] = &["deco", "display", "ornament", "fancy", "elite", "special"];
const INTERNAL_SCRIPT_TERMS: &[&str] = &["script", "brush", "hand"];
const INTERNAL_DECORATIVE_TERMS: &[&str] = &["deco", "display", "ornament"];

const SCRIPT_THRESHOLD: u32 = 3;
const DECORATIVE_THRESHOLD: u32 = 3;
const SERIF_THRESHOLD: u32 = 2;

/// Classifies a font as serif, sans-serif, script, decorative or monospace
///
/// Names and classification tables are consulted first; the outlines of a
/// handful of glyphs are only scored when the metadata is silent.
pub struct StyleClassifier;

impl FeatureAnalyzer for StyleClassifier {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Style
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let metrics = font.scalar_metrics();
        let record = |style| FeatureRecord::labelled(FeatureKind::Style, Label::Style(style));

        if let Some(style) = metrics
            .family_name
            .as_deref()
            .and_then(style_from_family_name)
        {
            return Ok(record(style).with_method("family name"));
        }
        if let Some(style) = metrics.panose.as_ref().and_then(style_from_panose) {
            return Ok(record(style).with_method("PANOSE"));
        }
        if metrics.is_fixed_pitch == Some(true) {
            return Ok(record(FontStyle::Monospace).with_method("fixed pitch"));
        }

        if font.has_outline_points() {
            let samples = load_probes(font, STYLE_PROBES)?;
            let scores = score_outlines(&samples);
            log::trace!("Style scores {scores:?}");
            return Ok(record(style_from_scores(&scores))
                .with_method("outline analysis")
                .with_detail(FeatureDetail::Style(scores)));
        }

        let (style, method) = if let Some(style) = metrics
            .internal_name
            .as_deref()
            .and_then(style_from_internal_name)
        {
            (style, "internal name")
        } else if let Some(style) = metrics.family_class.and_then(style_from_family_class) {
            (style, "IBM family class")
        } else {
            (FontStyle::SansSerif, "default")
        };
        Ok(record(style).estimated_by(method))
    }
}

fn contains_any(name: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| name.contains(t))
}

/// Style implied by keywords in the family name
pub(crate) fn style_from_family_name(name: &str) -> Option<FontStyle> {
    let name = name.to_lowercase();
    let serif = name.contains("serif");
    let sans = name.contains("sans");
    if name.contains("roboto") || (sans && !serif) {
        Some(FontStyle::SansSerif)
    } else if serif && !sans {
        Some(FontStyle::Serif)
    } else if contains_any(&name, SCRIPT_TERMS) {
        Some(FontStyle::Script)
    } else if contains_any(&name, DECORATIVE_TERMS) {
        Some(FontStyle::Decorative)
    } else {
        None
    }
}

fn style_from_internal_name(name: &str) -> Option<FontStyle> {
    let name = name.to_lowercase();
    if name.contains("serif") && !name.contains("sans") {
        Some(FontStyle::Serif)
    } else if name.contains("sans") {
        Some(FontStyle::SansSerif)
    } else if contains_any(&name, INTERNAL_SCRIPT_TERMS) {
        Some(FontStyle::Script)
    } else if contains_any(&name, INTERNAL_DECORATIVE_TERMS) {
        Some(FontStyle::Decorative)
    } else {
        None
    }
}

fn style_from_panose(panose: &Panose) -> Option<FontStyle> {
    match (panose.family_type, panose.serif_style) {
        (2, 0 | 11) => Some(FontStyle::SansSerif),
        (2, 2..=10 | 12..=14) => Some(FontStyle::Serif),
        (3, _) => Some(FontStyle::Script),
        (4, _) => Some(FontStyle::Decorative),
        _ => None,
    }
}

fn style_from_family_class(family_class: i16) -> Option<FontStyle> {
    match family_class >> 8 {
        1..=5 | 7 => Some(FontStyle::Serif),
        8 => Some(FontStyle::SansSerif),
        9 => Some(FontStyle::Decorative),
        10 => Some(FontStyle::Script),
        _ => None,
    }
}

fn is_asymmetric(glyph: &GlyphSample) -> bool {
    let Some(bbox) = glyph.bbox else {
        return false;
    };
    let mid = (bbox.x_min + bbox.x_max) as f64 / 2.0;
    let left = glyph.points().filter(|p| (p.x as f64) < mid).count() as f64;
    let right = glyph.points().filter(|p| (p.x as f64) > mid).count() as f64;
    left > right * 1.5 || right > left * 1.5
}

fn score_outlines(samples: &[GlyphSample]) -> StyleScores {
    let mut scores = StyleScores::default();
    for glyph in samples {
        let contours = glyph.contour_count();
        let points = glyph.point_count();
        if contours > 1 {
            scores.serif += match points {
                p if p > 20 => 2,
                p if p > 12 => 1,
                _ => 0,
            };
        }
        if contours == 1 && points > 20 {
            scores.script += 2;
        } else if contours <= 2 && is_asymmetric(glyph) {
            scores.script += 1;
        }
        if contours > 3 {
            scores.decorative += match points {
                p if p > 30 => 2,
                p if p > 20 => 1,
                _ => 0,
            };
        }
    }
    scores
}

fn style_from_scores(scores: &StyleScores) -> FontStyle {
    let StyleScores {
        serif,
        script,
        decorative,
    } = *scores;
    if script >= SCRIPT_THRESHOLD && script > serif && script > decorative {
        FontStyle::Script
    } else if decorative >= DECORATIVE_THRESHOLD && decorative > serif && decorative > script {
        FontStyle::Decorative
    } else if serif >= SERIF_THRESHOLD && serif > script && serif > decorative {
        FontStyle::Serif
    } else {
        FontStyle::SansSerif
    }
}
