use super::{
    load_probes, mean,
    tuning::{BOWL_BAR_SHARE, BOWL_STEM_SHARE, CONTRAST_PROBES, ROUND_STROKE_SHARE},
    FeatureAnalyzer, StyleClassifier,
};
use crate::{
    ContrastBand, FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, FontStyle,
    GlyphSample, Label, OutlineSource,
};

/// Estimates thick/thin stroke contrast from round and bowl glyphs
///
/// When nothing can be measured the contrast typical of the font's style
/// is reported instead, marked as estimated.
pub struct ContrastAnalyzer;

impl FeatureAnalyzer for ContrastAnalyzer {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Contrast
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let ratios: Vec<f64> = if font.has_outline_points() {
            load_probes(font, CONTRAST_PROBES)?
                .iter()
                .filter_map(contrast_ratio)
                .collect()
        } else {
            vec![]
        };

        if let Some(average) = mean(&ratios) {
            return Ok(FeatureRecord::measured(
                self.kind(),
                average,
                average,
                Label::Contrast(contrast_band(average)),
            )
            .with_detail(FeatureDetail::Contrast {
                samples: ratios.len(),
            }));
        }

        let style = match StyleClassifier.analyze(font).label {
            Label::Style(style) => Some(style),
            _ => None,
        };
        let (ratio, band) = typical_contrast(style);
        log::debug!("No contrast measurable, assuming {band} for {style:?}");
        Ok(
            FeatureRecord::measured(self.kind(), ratio, ratio, Label::Contrast(band))
                .estimated_by("style"),
        )
    }
}

fn contrast_ratio(glyph: &GlyphSample) -> Option<f64> {
    let bbox = glyph.bbox?;
    let (width, height) = (bbox.width(), bbox.height());
    let (a, b) = match glyph.character? {
        'O' | 'o' if glyph.contour_count() >= 2 => {
            (width * ROUND_STROKE_SHARE, height * ROUND_STROKE_SHARE)
        }
        'B' | 'b' | 'D' | 'd' => (width * BOWL_STEM_SHARE, height * BOWL_BAR_SHARE),
        _ => return None,
    };
    if a <= 0.0 || b <= 0.0 {
        return None;
    }
    Some(a.max(b) / a.min(b))
}

fn contrast_band(ratio: f64) -> ContrastBand {
    if ratio < 1.1 {
        ContrastBand::Monoline
    } else if ratio < 1.5 {
        ContrastBand::Low
    } else if ratio < 2.5 {
        ContrastBand::Medium
    } else if ratio < 4.0 {
        ContrastBand::High
    } else {
        ContrastBand::Extreme
    }
}

fn typical_contrast(style: Option<FontStyle>) -> (f64, ContrastBand) {
    match style {
        Some(FontStyle::Serif) => (2.5, ContrastBand::Medium),
        Some(FontStyle::SansSerif) => (1.2, ContrastBand::Low),
        Some(FontStyle::Script) => (2.0, ContrastBand::Medium),
        _ => (1.5, ContrastBand::Low),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{testutil::rect, FontScalarMetrics, MemoryFont};
    use rstest::rstest;

    #[rstest]
    #[case(1.0, ContrastBand::Monoline)]
    #[case(1.1, ContrastBand::Low)]
    #[case(2.0, ContrastBand::Medium)]
    #[case(3.0, ContrastBand::High)]
    #[case(4.0, ContrastBand::Extreme)]
    fn test_contrast_bands(#[case] ratio: f64, #[case] expected: ContrastBand) {
        assert_eq!(contrast_band(ratio), expected);
    }

    #[test]
    fn test_measured_contrast() {
        let font = MemoryFont::new(FontScalarMetrics::default())
            // Round: 300 x 900, ratio 3
            .with_glyph('O', vec![rect(0, 0, 300, 900), rect(100, 100, 200, 800)])
            // Single contour O is not measured
            .with_glyph('o', vec![rect(0, 0, 100, 500)])
            // Bowl: 0.2 * 500 = 100 against 0.1 * 700 = 70
            .with_glyph('b', vec![rect(0, 0, 500, 700)]);
        let record = ContrastAnalyzer.analyze(&font);
        let expected = (3.0 + 100.0 / 70.0) / 2.0;
        assert!((record.value.unwrap() - expected).abs() < 1e-9);
        assert_eq!(record.label, Label::Contrast(ContrastBand::Medium));
        assert_eq!(record.detail, FeatureDetail::Contrast { samples: 2 });
        assert!(!record.estimated);
    }

    #[rstest]
    #[case("Noto Serif", 2.5, ContrastBand::Medium)]
    #[case("Open Sans", 1.2, ContrastBand::Low)]
    #[case("Great Script", 2.0, ContrastBand::Medium)]
    #[case("Fancy", 1.5, ContrastBand::Low)]
    fn test_style_fallback(#[case] family: &str, #[case] ratio: f64, #[case] band: ContrastBand) {
        let mut font = MemoryFont::outline_less(FontScalarMetrics::default()).with_glyph('O', vec![]);
        font.metrics_mut().family_name = Some(family.into());
        let record = ContrastAnalyzer.analyze(&font);
        assert_eq!(record.value, Some(ratio));
        assert_eq!(record.label, Label::Contrast(band));
        assert!(record.estimated);
        assert_eq!(record.estimation_method.as_deref(), Some("style"));
    }

    #[test]
    fn test_unresolvable_probes_are_unknown() {
        let font = MemoryFont::new(FontScalarMetrics::default()).with_glyph('x', vec![rect(0, 0, 1, 1)]);
        assert_eq!(ContrastAnalyzer.analyze(&font).label, Label::Unknown);
    }
}
