use super::{units_per_em, FeatureAnalyzer};
use crate::{
    AdvanceBand, BearingBand, FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, Label,
    OutlineSource,
};

/// Classifies average advance widths and left side bearings over the whole font
pub struct SpacingAnalyzer;

impl FeatureAnalyzer for SpacingAnalyzer {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Spacing
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let metrics = font
            .horizontal_metrics()
            .ok_or(FontPersonaError::missing("hmtx"))?;
        if metrics.is_empty() {
            return Err(FontPersonaError::NoMeasurements {
                what: "horizontal metrics",
            });
        }
        let upm = units_per_em(font)?;
        let count = metrics.len() as f64;
        let average_advance = metrics.iter().map(|m| m.advance as f64).sum::<f64>() / count;
        let average_lsb = metrics.iter().map(|m| m.lsb as f64).sum::<f64>() / count;
        let advance = average_advance / upm;
        let bearing = average_lsb / upm;
        log::trace!("Average advance {average_advance:.1}, lsb {average_lsb:.1}");
        Ok(FeatureRecord::measured(
            self.kind(),
            average_advance,
            advance,
            Label::Spacing {
                advance: advance_band(advance),
                bearing: bearing_band(bearing),
            },
        )
        .with_detail(FeatureDetail::Spacing {
            average_advance,
            average_lsb,
            glyphs: metrics.len(),
        }))
    }
}

fn advance_band(normalized: f64) -> AdvanceBand {
    if normalized > 0.7 {
        AdvanceBand::VeryWide
    } else if normalized > 0.6 {
        AdvanceBand::Wide
    } else if normalized > 0.5 {
        AdvanceBand::Medium
    } else if normalized > 0.4 {
        AdvanceBand::Narrow
    } else {
        AdvanceBand::VeryNarrow
    }
}

fn bearing_band(normalized: f64) -> BearingBand {
    if normalized > 0.1 {
        BearingBand::Loose
    } else if normalized > 0.05 {
        BearingBand::Medium
    } else {
        BearingBand::Tight
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{FontScalarMetrics, HorizontalMetric, MemoryFont};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.75, AdvanceBand::VeryWide)]
    #[case(0.7, AdvanceBand::Wide)]
    #[case(0.55, AdvanceBand::Medium)]
    #[case(0.45, AdvanceBand::Narrow)]
    #[case(0.4, AdvanceBand::VeryNarrow)]
    fn test_advance_bands(#[case] normalized: f64, #[case] expected: AdvanceBand) {
        assert_eq!(advance_band(normalized), expected);
    }

    #[rstest]
    #[case(0.2, BearingBand::Loose)]
    #[case(0.1, BearingBand::Medium)]
    #[case(0.05, BearingBand::Tight)]
    #[case(-0.01, BearingBand::Tight)]
    fn test_bearing_bands(#[case] normalized: f64, #[case] expected: BearingBand) {
        assert_eq!(bearing_band(normalized), expected);
    }

    #[test]
    fn test_spacing_record() {
        let font = MemoryFont::new(FontScalarMetrics {
            units_per_em: Some(1000),
            ..Default::default()
        })
        .with_horizontal_metrics(vec![
            HorizontalMetric::new(500, 40),
            HorizontalMetric::new(700, 80),
        ]);
        let record = SpacingAnalyzer.analyze(&font);
        assert_eq!(record.value, Some(600.0));
        assert_eq!(record.normalized, Some(0.6));
        assert_eq!(
            record.label,
            Label::Spacing {
                advance: AdvanceBand::Medium,
                bearing: BearingBand::Medium,
            }
        );
        assert_eq!(
            record.detail,
            FeatureDetail::Spacing {
                average_advance: 600.0,
                average_lsb: 60.0,
                glyphs: 2
            }
        );
    }

    #[test]
    fn test_missing_and_empty_tables() {
        let font = MemoryFont::new(FontScalarMetrics::default());
        let record = SpacingAnalyzer.analyze(&font);
        assert_eq!(record.reason.as_deref(), Some("No hmtx table found"));

        let font = font.with_horizontal_metrics(vec![]);
        let record = SpacingAnalyzer.analyze(&font);
        assert_eq!(
            record.reason.as_deref(),
            Some("Could not measure horizontal metrics")
        );
    }
}
