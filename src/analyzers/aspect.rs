use super::{
    load_probes, mean, require_outlines,
    tuning::{ASPECT_PROBES, CONDENSED_BELOW, NORMAL_BELOW},
    FeatureAnalyzer,
};
use crate::{
    FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, Label, OutlineSource, WidthBand,
};

/// Classifies letter widths from the width/height ratio of wide and round glyphs
pub struct AspectClassifier;

impl FeatureAnalyzer for AspectClassifier {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Aspect
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        require_outlines(font)?;
        let ratios: Vec<f64> = load_probes(font, ASPECT_PROBES)?
            .iter()
            .filter_map(|g| g.bbox?.aspect_ratio())
            .filter(|r| *r > 0.0)
            .collect();
        let average = mean(&ratios).ok_or(FontPersonaError::NoMeasurements {
            what: "aspect ratios",
        })?;
        Ok(
            FeatureRecord::measured(self.kind(), average, average, Label::Width(width_band(average)))
                .with_detail(FeatureDetail::Aspect {
                    glyphs: ratios.len(),
                }),
        )
    }
}

fn width_band(aspect: f64) -> WidthBand {
    if aspect < CONDENSED_BELOW {
        WidthBand::Condensed
    } else if aspect < NORMAL_BELOW {
        WidthBand::Normal
    } else {
        WidthBand::Expanded
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{testutil::rect, FontScalarMetrics, MemoryFont};
    use rstest::rstest;

    #[rstest]
    #[case(0.5, WidthBand::Condensed)]
    #[case(0.7, WidthBand::Normal)]
    #[case(0.99, WidthBand::Normal)]
    #[case(1.0, WidthBand::Expanded)]
    fn test_width_bands(#[case] aspect: f64, #[case] expected: WidthBand) {
        assert_eq!(width_band(aspect), expected);
    }

    #[test]
    fn test_average_of_probes() {
        let font = MemoryFont::new(FontScalarMetrics::default())
            .with_glyph('H', vec![rect(0, 0, 300, 600)])
            .with_glyph('O', vec![rect(0, 0, 600, 600)])
            .with_glyph('x', vec![rect(0, 0, 900, 100)]);
        let record = AspectClassifier.analyze(&font);
        assert_eq!(record.value, Some(0.75));
        assert_eq!(record.label, Label::Width(WidthBand::Normal));
        assert_eq!(record.detail, FeatureDetail::Aspect { glyphs: 2 });
    }

    #[test]
    fn test_outline_less_is_unknown() {
        let font = MemoryFont::outline_less(FontScalarMetrics::default())
            .with_glyph('H', vec![rect(0, 0, 300, 600)]);
        let record = AspectClassifier.analyze(&font);
        assert_eq!(record.label, Label::Unknown);
        assert_eq!(
            record.reason.as_deref(),
            Some("Unsupported outline format: OpenType-CFF outlines carry no point data")
        );
    }
}
