use super::{
    load_probes, mean, resolve_probes,
    tuning::{
        CIRCULAR_ASPECT, COMPLEX_SAMPLE_POINTS, SLENDER_STEM_RATIO, STEM_CORRECTION,
        STROKE_BANDS, STROKE_PROBES, VERTICAL_STROKE_ASPECT, WEIGHT_CLASS_DIVISOR,
    },
    units_per_em, FeatureAnalyzer,
};
use crate::{
    FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, GlyphSample, Label,
    OutlineSource, StrokeMethod, StrokeSample, WeightBand,
};

/// Estimates the average stem thickness of a font and the weight it implies
///
/// Each probe glyph is measured with whichever heuristic suits its shape
/// (stem, bar, ring or anything else). Fonts without point outlines get an
/// estimate from the OS/2 weight class instead.
pub struct StrokeWidthEstimator;

impl FeatureAnalyzer for StrokeWidthEstimator {
    fn kind(&self) -> FeatureKind {
        FeatureKind::StrokeWidth
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let upm = units_per_em(font)?;
        resolve_probes(font, STROKE_PROBES)?;

        if !font.has_outline_points() {
            let weight_class = font
                .scalar_metrics()
                .weight_class
                .ok_or(FontPersonaError::missing("OS/2"))?;
            let normalized = weight_class as f64 / WEIGHT_CLASS_DIVISOR;
            return Ok(FeatureRecord::measured(
                self.kind(),
                normalized * upm,
                normalized,
                Label::Weight(weight_from_class(weight_class)),
            )
            .estimated_by("OS/2 weight class"));
        }

        let samples: Vec<StrokeSample> = load_probes(font, STROKE_PROBES)?
            .iter()
            .filter_map(measure_glyph)
            .filter(|s| s.width > 0.0)
            .collect();
        let widths: Vec<f64> = samples.iter().map(|s| s.width).collect();
        let average = mean(&widths).ok_or(FontPersonaError::NoMeasurements {
            what: "stroke widths",
        })?;
        let normalized = average / upm;
        Ok(FeatureRecord::measured(
            self.kind(),
            average,
            normalized,
            Label::Weight(weight_from_stroke(normalized)),
        )
        .with_detail(FeatureDetail::Stroke { samples }))
    }
}

/// Weight band of a stroke width relative to the em
pub(crate) fn weight_from_stroke(normalized: f64) -> WeightBand {
    STROKE_BANDS
        .iter()
        .find(|(edge, _)| normalized <= *edge)
        .map(|(_, band)| *band)
        .unwrap_or(WeightBand::Black)
}

/// Weight band of an OS/2 weight class
pub(crate) fn weight_from_class(weight_class: u16) -> WeightBand {
    match weight_class {
        0..=150 => WeightBand::Thin,
        151..=250 => WeightBand::ExtraLight,
        251..=350 => WeightBand::Light,
        351..=450 => WeightBand::Regular,
        451..=550 => WeightBand::Medium,
        551..=650 => WeightBand::SemiBold,
        651..=750 => WeightBand::Bold,
        751..=850 => WeightBand::ExtraBold,
        _ => WeightBand::Black,
    }
}

fn measure_glyph(glyph: &GlyphSample) -> Option<StrokeSample> {
    let bbox = glyph.bbox?;
    let (width, height) = (bbox.width(), bbox.height());
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let contours = glyph.contour_count();
    let aspect = width / height;

    let (method, stroke) = if width < height * VERTICAL_STROKE_ASPECT && contours == 1 {
        let stroke = if height > width * SLENDER_STEM_RATIO {
            width
        } else {
            width * STEM_CORRECTION
        };
        (StrokeMethod::VerticalStroke, stroke)
    } else if height < width * VERTICAL_STROKE_ASPECT && contours == 1 {
        (StrokeMethod::HorizontalStroke, height * STEM_CORRECTION)
    } else if CIRCULAR_ASPECT.0 < aspect && aspect < CIRCULAR_ASPECT.1 && contours == 2 {
        (StrokeMethod::Circular, ring_thickness(glyph)?)
    } else {
        match nearest_neighbour_width(glyph) {
            Some(stroke) => (StrokeMethod::Complex, stroke),
            None => (
                StrokeMethod::AreaPerimeter,
                area_perimeter_width(width, height, contours),
            ),
        }
    };
    log::trace!(
        "Stroke of {:?} by {:?}: {:.1}",
        glyph.character,
        method,
        stroke
    );
    Some(StrokeSample {
        character: glyph.character?,
        method,
        width: stroke,
    })
}

/// Outer mean radius minus inner mean radius; the outer contour has more points
fn ring_thickness(glyph: &GlyphSample) -> Option<f64> {
    let [first, second] = glyph.contours.as_slice() else {
        return None;
    };
    let (outer, inner) = if first.points.len() >= second.points.len() {
        (first, second)
    } else {
        (second, first)
    };
    Some(outer.mean_radius()? - inner.mean_radius()?)
}

/// Lower quartile of the distances from each sampled on-curve point to its
/// nearest non-adjacent neighbour
fn nearest_neighbour_width(glyph: &GlyphSample) -> Option<f64> {
    let on_curve = glyph.on_curve_points();
    if on_curve.len() < 4 {
        return None;
    }
    let sampled = &on_curve[..on_curve.len().min(COMPLEX_SAMPLE_POINTS)];
    let mut distances: Vec<f64> = sampled
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            sampled
                .iter()
                .enumerate()
                .filter(|(j, _)| i.abs_diff(*j) >= 2)
                .map(|(_, q)| p.distance_to(q))
                .min_by(f64::total_cmp)
        })
        .collect();
    if distances.is_empty() {
        return None;
    }
    distances.sort_by(f64::total_cmp);
    if distances.len() >= 3 {
        Some(distances[distances.len() / 4])
    } else {
        Some(distances[0])
    }
}

fn area_perimeter_width(width: f64, height: f64, contours: usize) -> f64 {
    let area = width * height;
    let perimeter = 2.0 * (width + height);
    let aspect = width / height;
    let correction = match (!(0.5..=2.0).contains(&aspect), contours > 1) {
        (true, true) => 0.4,
        (true, false) => 0.2,
        (false, true) => 0.6,
        (false, false) => 0.3,
    };
    2.0 * area / perimeter * correction
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        testutil::rect, Contour, FontScalarMetrics, GlyphId, MemoryFont,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metrics() -> FontScalarMetrics {
        FontScalarMetrics {
            units_per_em: Some(1000),
            ..Default::default()
        }
    }

    fn sample(c: char, contours: Vec<Contour>) -> GlyphSample {
        GlyphSample::new(Some(c), GlyphId(1), contours)
    }

    #[rstest]
    #[case(0.04, WeightBand::Thin)]
    #[case(0.05, WeightBand::Thin)]
    #[case(0.06, WeightBand::Light)]
    #[case(0.08, WeightBand::Regular)]
    #[case(0.12, WeightBand::Medium)]
    #[case(0.13, WeightBand::Bold)]
    #[case(0.18, WeightBand::ExtraBold)]
    #[case(0.2, WeightBand::Black)]
    fn test_stroke_bands(#[case] normalized: f64, #[case] expected: WeightBand) {
        assert_eq!(weight_from_stroke(normalized), expected);
    }

    #[rstest]
    #[case(100, WeightBand::Thin)]
    #[case(200, WeightBand::ExtraLight)]
    #[case(300, WeightBand::Light)]
    #[case(400, WeightBand::Regular)]
    #[case(500, WeightBand::Medium)]
    #[case(600, WeightBand::SemiBold)]
    #[case(700, WeightBand::Bold)]
    #[case(800, WeightBand::ExtraBold)]
    #[case(900, WeightBand::Black)]
    fn test_weight_class_bands(#[case] weight_class: u16, #[case] expected: WeightBand) {
        assert_eq!(weight_from_class(weight_class), expected);
    }

    #[test]
    fn test_stems_and_bars() {
        let slender = measure_glyph(&sample('l', vec![rect(0, 0, 80, 700)])).unwrap();
        assert_eq!(slender.method, StrokeMethod::VerticalStroke);
        assert_eq!(slender.width, 80.0);

        let stout = measure_glyph(&sample('I', vec![rect(0, 0, 100, 400)])).unwrap();
        assert_eq!(stout.width, 85.0);

        let bar = measure_glyph(&sample('-', vec![rect(0, 0, 500, 100)])).unwrap();
        assert_eq!(bar.method, StrokeMethod::HorizontalStroke);
        assert_eq!(bar.width, 85.0);
    }

    #[test]
    fn test_complex_glyph() {
        let glyph = sample(
            'm',
            vec![
                rect(0, 0, 100, 600),
                rect(250, 0, 350, 600),
                rect(500, 0, 600, 600),
            ],
        );
        let measured = measure_glyph(&glyph).unwrap();
        assert_eq!(measured.method, StrokeMethod::Complex);
        assert_eq!(measured.width, 150.0);
    }

    #[test]
    fn test_area_perimeter_fallback() {
        let triangle = Contour::polygon(&[(0, 0), (300, 0), (150, 300)]);
        let measured = measure_glyph(&sample('v', vec![triangle])).unwrap();
        assert_eq!(measured.method, StrokeMethod::AreaPerimeter);
        assert!((measured.width - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_measures_medium() {
        let outer = Contour::polygon(&[
            (500, 0),
            (400, 300),
            (0, 500),
            (-400, 300),
            (-500, 0),
            (-400, -300),
            (0, -500),
            (400, -300),
        ]);
        let inner = Contour::polygon(&[(380, 0), (0, 380), (-380, 0), (0, -380)]);
        let font = MemoryFont::new(metrics()).with_glyph('O', vec![outer, inner]);
        let record = StrokeWidthEstimator.analyze(&font);
        assert_eq!(record.value, Some(120.0));
        assert_eq!(record.normalized, Some(0.12));
        assert_eq!(record.label, Label::Weight(WeightBand::Medium));
        assert!(!record.estimated);
    }

    #[test]
    fn test_outline_less_estimate() {
        let mut metrics = metrics();
        metrics.weight_class = Some(700);
        let font = MemoryFont::outline_less(metrics).with_glyph('H', vec![]);
        let record = StrokeWidthEstimator.analyze(&font);
        assert_eq!(record.label, Label::Weight(WeightBand::Bold));
        assert!(record.estimated);
        assert_eq!(record.estimation_method.as_deref(), Some("OS/2 weight class"));
        assert!((record.normalized.unwrap() - 700.0 / 9000.0).abs() < 1e-12);
        assert!((record.value.unwrap() - 700000.0 / 9000.0).abs() < 1e-9);
    }

    #[test]
    fn test_failures_are_unknown() {
        let font = MemoryFont::new(FontScalarMetrics::default()).with_glyph('I', vec![]);
        let record = StrokeWidthEstimator.analyze(&font);
        assert_eq!(record.label, Label::Unknown);
        assert_eq!(record.reason.as_deref(), Some("No head table found"));

        let font = MemoryFont::new(metrics()).with_glyph('I', vec![]);
        let record = StrokeWidthEstimator.analyze(&font);
        assert_eq!(record.reason.as_deref(), Some("Could not measure stroke widths"));

        let font = MemoryFont::new(metrics()).with_glyph('x', vec![rect(0, 0, 10, 10)]);
        let record = StrokeWidthEstimator.analyze(&font);
        assert_eq!(
            record.reason.as_deref(),
            Some("No sample glyphs found (tried HIOnol)")
        );
    }
}
