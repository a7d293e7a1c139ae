use super::FeatureAnalyzer;
use crate::{
    FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, Label, OutlineSource,
    VerticalProportions, XHeightClass,
};

/// Measures x-height, cap height and ascender/descender proportions
///
/// Values come from the font's tables where present; the heights of `x` and
/// `H` stand in for missing x-height and cap height.
pub struct VerticalMetricsAnalyzer;

impl FeatureAnalyzer for VerticalMetricsAnalyzer {
    fn kind(&self) -> FeatureKind {
        FeatureKind::VerticalMetrics
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let metrics = font.scalar_metrics();
        let Some(units_per_em) = metrics.units_per_em.filter(|u| *u > 0) else {
            return Ok(FeatureRecord::error(
                self.kind(),
                FontPersonaError::missing("head").to_string(),
            ));
        };
        let pair = match (metrics.typo_ascender, metrics.typo_descender) {
            (Some(a), Some(d)) => Some((a, d)),
            _ => metrics.hhea_ascender.zip(metrics.hhea_descender),
        };
        let Some((ascender, descender)) = pair else {
            return Ok(FeatureRecord::error(
                self.kind(),
                FontPersonaError::missing("OS/2 or hhea").to_string(),
            ));
        };

        let upm = units_per_em as f64;
        let (ascender, descender) = (ascender as f64, descender as f64);
        let x_height = positive(metrics.x_height).or_else(|| glyph_height(font, 'x'));
        let cap_height = positive(metrics.cap_height).or_else(|| glyph_height(font, 'H'));
        let total_height = ascender - descender;
        if total_height == 0.0 {
            return Ok(FeatureRecord::error(
                self.kind(),
                FontPersonaError::MeasurementDegenerate("ascender and descender coincide".into())
                    .to_string(),
            ));
        }
        let ascender_ratio = Some(ascender / total_height);
        let descender_ratio = Some(descender.abs() / total_height);
        let x_to_cap_ratio = match (x_height, cap_height) {
            (Some(x), Some(cap)) if cap > 0.0 => Some(x / cap),
            _ => None,
        };
        let proportions = VerticalProportions {
            units_per_em,
            x_height,
            cap_height,
            ascender,
            descender,
            x_height_normalized: x_height.map(|x| x / upm),
            cap_height_normalized: cap_height.map(|c| c / upm),
            ascender_normalized: ascender / upm,
            descender_normalized: descender.abs() / upm,
            total_height,
            ascender_ratio,
            descender_ratio,
            x_to_cap_ratio,
        };

        let record = match x_to_cap_ratio {
            Some(ratio) => FeatureRecord::measured(
                self.kind(),
                ratio,
                proportions.x_height_normalized.unwrap_or_default(),
                Label::XHeight(x_height_class(ratio)),
            ),
            None => FeatureRecord::unknown(self.kind(), "Could not determine x-height and cap height"),
        };
        Ok(record.with_detail(FeatureDetail::Vertical(proportions)))
    }
}

fn positive(value: Option<i16>) -> Option<f64> {
    value.filter(|v| *v > 0).map(f64::from)
}

fn glyph_height(font: &dyn OutlineSource, c: char) -> Option<f64> {
    let glyph = font.glyph_by_char(c).ok()?;
    if glyph.is_empty() {
        return None;
    }
    glyph.bbox.map(|b| b.height())
}

fn x_height_class(x_to_cap: f64) -> XHeightClass {
    if x_to_cap < 0.65 {
        XHeightClass::Small
    } else if x_to_cap < 0.75 {
        XHeightClass::Medium
    } else {
        XHeightClass::Large
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{testutil::rect, FontScalarMetrics, MemoryFont};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metrics() -> FontScalarMetrics {
        FontScalarMetrics {
            units_per_em: Some(1000),
            typo_ascender: Some(800),
            typo_descender: Some(-200),
            hhea_ascender: Some(900),
            hhea_descender: Some(-300),
            x_height: Some(500),
            cap_height: Some(700),
            ..Default::default()
        }
    }

    fn proportions(record: &FeatureRecord) -> &VerticalProportions {
        match &record.detail {
            FeatureDetail::Vertical(v) => v,
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[rstest]
    #[case(0.6, XHeightClass::Small)]
    #[case(0.65, XHeightClass::Medium)]
    #[case(0.74, XHeightClass::Medium)]
    #[case(0.75, XHeightClass::Large)]
    fn test_x_height_classes(#[case] ratio: f64, #[case] expected: XHeightClass) {
        assert_eq!(x_height_class(ratio), expected);
    }

    #[test]
    fn test_table_values() {
        let record = VerticalMetricsAnalyzer.analyze(&MemoryFont::new(metrics()));
        assert_eq!(record.label, Label::XHeight(XHeightClass::Medium));
        let v = proportions(&record);
        assert_eq!(v.ascender, 800.0);
        assert_eq!(v.total_height, 1000.0);
        assert_eq!(v.ascender_ratio, Some(0.8));
        assert_eq!(v.descender_ratio, Some(0.2));
        assert_eq!(v.descender_normalized, 0.2);
        assert_eq!(v.x_height_normalized, Some(0.5));
    }

    #[test]
    fn test_glyph_fallbacks() {
        let mut m = metrics();
        m.typo_ascender = None;
        m.x_height = None;
        m.cap_height = Some(0);
        let font = MemoryFont::new(m)
            .with_glyph('x', vec![rect(0, 0, 400, 540)])
            .with_glyph('H', vec![rect(0, 0, 600, 720)]);
        let record = VerticalMetricsAnalyzer.analyze(&font);
        let v = proportions(&record);
        assert_eq!(v.ascender, 900.0);
        assert_eq!(v.descender, -300.0);
        assert_eq!(v.x_height, Some(540.0));
        assert_eq!(v.cap_height, Some(720.0));
        assert_eq!(record.label, Label::XHeight(XHeightClass::Large));
    }

    #[test]
    fn test_missing_heights_are_unknown() {
        let mut m = metrics();
        m.x_height = None;
        let record = VerticalMetricsAnalyzer.analyze(&MemoryFont::new(m));
        assert_eq!(record.label, Label::Unknown);
        assert!(record.reason.is_some());
        assert_eq!(proportions(&record).cap_height, Some(700.0));
    }

    #[test]
    fn test_errors() {
        let mut m = metrics();
        m.units_per_em = None;
        let record = VerticalMetricsAnalyzer.analyze(&MemoryFont::new(m));
        assert_eq!(record.label, Label::Error);
        assert_eq!(record.detail, FeatureDetail::None);
        assert_eq!(record.reason.as_deref(), Some("No head table found"));

        let m = FontScalarMetrics {
            units_per_em: Some(1000),
            typo_ascender: Some(800),
            ..Default::default()
        };
        let record = VerticalMetricsAnalyzer.analyze(&MemoryFont::new(m));
        assert_eq!(record.label, Label::Error);
        assert_eq!(record.value, None);

        let mut m = metrics();
        m.typo_ascender = Some(0);
        m.typo_descender = Some(0);
        let record = VerticalMetricsAnalyzer.analyze(&MemoryFont::new(m));
        assert_eq!(record.label, Label::Error);
        assert_eq!(
            record.reason.as_deref(),
            Some("Degenerate measurement: ascender and descender coincide")
        );
    }
}
