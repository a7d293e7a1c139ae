use super::{
    load_probes, resolve_probes,
    tuning::{LETTERFORM_BONUS, SHAPE_PROBES, SHARP_TURN_DEGREES},
    FeatureAnalyzer,
};
use crate::{
    FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, GlyphSample, Label,
    OutlineSource, ShapeBand,
};

const CURVY_KEYWORDS: &[&str] = &["round", "soft", "curv", "script", "brush", "hand"];
const ANGULAR_KEYWORDS: &[&str] = &["angular", "gothic", "square", "geo", "block", "pixel"];

/// Classifies outlines from curvy to angular
///
/// The ratio of off-curve to on-curve points gives the band; sharp average
/// turns between consecutive on-curve points push it one step toward
/// angular.
pub struct ShapeClassifier;

impl FeatureAnalyzer for ShapeClassifier {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Shape
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        resolve_probes(font, SHAPE_PROBES)?;
        if !font.has_outline_points() {
            return Ok(estimate_from_metadata(font));
        }

        let samples = load_probes(font, SHAPE_PROBES)?;
        let mut on_curve = 0;
        let mut off_curve = 0;
        let mut total_turn = 0.0;
        for glyph in &samples {
            let on = glyph.on_curve_points().len();
            if on == 0 {
                continue;
            }
            on_curve += on;
            off_curve += glyph.point_count() - on;
            total_turn += turn_degrees(glyph);
        }
        if on_curve == 0 {
            return Err(FontPersonaError::NoMeasurements { what: "contours" });
        }
        let ratio = off_curve as f64 / on_curve as f64;
        let average_turn = (total_turn > 0.0).then(|| total_turn / on_curve as f64);
        Ok(FeatureRecord::measured(
            self.kind(),
            ratio,
            ratio,
            Label::Shape(shape_from_counts(on_curve, off_curve, average_turn)),
        )
        .with_detail(FeatureDetail::Shape {
            on_curve,
            off_curve,
            average_turn,
        }))
    }
}

/// Curvature band from point counts and the average turn angle in degrees
pub(crate) fn shape_from_counts(
    on_curve: usize,
    off_curve: usize,
    average_turn: Option<f64>,
) -> ShapeBand {
    let ratio = off_curve as f64 / on_curve as f64;
    let band = if ratio > 1.5 {
        ShapeBand::VeryCurvy
    } else if ratio > 1.0 {
        ShapeBand::Curvy
    } else if ratio > 0.6 {
        ShapeBand::ModeratelyCurvy
    } else if ratio > 0.3 {
        ShapeBand::SlightlyCurvy
    } else {
        ShapeBand::Angular
    };
    match average_turn {
        Some(turn) if turn > SHARP_TURN_DEGREES => band.toward_angular(),
        _ => band,
    }
}

/// Sum of the turn angles at every on-curve point, taken as a closed loop
fn turn_degrees(glyph: &GlyphSample) -> f64 {
    let points = glyph.on_curve_points();
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..n {
        let (p1, p2, p3) = (points[i], points[(i + 1) % n], points[(i + 2) % n]);
        let v1 = ((p2.x - p1.x) as f64, (p2.y - p1.y) as f64);
        let v2 = ((p3.x - p2.x) as f64, (p3.y - p2.y) as f64);
        let m1 = v1.0.hypot(v1.1);
        let m2 = v2.0.hypot(v2.1);
        if m1 == 0.0 || m2 == 0.0 {
            continue;
        }
        let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / (m1 * m2)).clamp(-1.0, 1.0);
        total += cos.acos().to_degrees();
    }
    total
}

fn estimate_from_metadata(font: &dyn OutlineSource) -> FeatureRecord {
    let metrics = font.scalar_metrics();
    let name = metrics
        .family_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let count = |keywords: &[&str]| keywords.iter().filter(|k| name.contains(*k)).count() as u32;
    let mut curvy = count(CURVY_KEYWORDS);
    let mut angular = count(ANGULAR_KEYWORDS);
    if let Some(panose) = &metrics.panose {
        match panose.letterform {
            2..=5 => angular += LETTERFORM_BONUS,
            9..=11 => curvy += LETTERFORM_BONUS,
            _ => {}
        }
    }
    let band = match curvy.cmp(&angular) {
        std::cmp::Ordering::Greater => ShapeBand::Curvy,
        std::cmp::Ordering::Less => ShapeBand::Angular,
        std::cmp::Ordering::Equal => ShapeBand::Balanced,
    };
    FeatureRecord::labelled(FeatureKind::Shape, Label::Shape(band))
        .estimated_by("metadata analysis")
        .with_detail(FeatureDetail::ShapeKeywords { curvy, angular })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{testutil::ring, Contour, FontScalarMetrics, MemoryFont, OutlinePoint, Panose};
    use rstest::rstest;

    #[rstest]
    #[case(10, 20, None, ShapeBand::VeryCurvy)]
    #[case(10, 12, None, ShapeBand::Curvy)]
    #[case(10, 8, None, ShapeBand::ModeratelyCurvy)]
    #[case(10, 5, None, ShapeBand::SlightlyCurvy)]
    #[case(10, 3, None, ShapeBand::Angular)]
    #[case(10, 20, Some(75.0), ShapeBand::Curvy)]
    #[case(10, 5, Some(61.0), ShapeBand::Angular)]
    #[case(10, 5, Some(60.0), ShapeBand::SlightlyCurvy)]
    #[case(40, 10, Some(70.0), ShapeBand::Angular)]
    fn test_shape_bands(
        #[case] on: usize,
        #[case] off: usize,
        #[case] turn: Option<f64>,
        #[case] expected: ShapeBand,
    ) {
        assert_eq!(shape_from_counts(on, off, turn), expected);
    }

    fn square_with_controls() -> Contour {
        Contour::new(vec![
            OutlinePoint::on(0, 0),
            OutlinePoint::off(250, -10),
            OutlinePoint::on(500, 0),
            OutlinePoint::on(500, 500),
            OutlinePoint::off(250, 510),
            OutlinePoint::on(0, 500),
        ])
    }

    #[test]
    fn test_right_angles_shift_toward_angular() {
        // 4 on, 2 off: slightly curvy by ratio, every turn 90 degrees
        let font = MemoryFont::new(FontScalarMetrics::default())
            .with_glyph('o', vec![square_with_controls()]);
        let record = ShapeClassifier.analyze(&font);
        assert_eq!(record.value, Some(0.5));
        assert_eq!(record.label, Label::Shape(ShapeBand::Angular));
        match record.detail {
            FeatureDetail::Shape { average_turn, .. } => {
                assert!((average_turn.unwrap() - 90.0).abs() < 1e-9)
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_gentle_turns_keep_band() {
        // An octagon turns 45 degrees at each corner
        let mut octagon = ring(0, 0, 500, 8);
        octagon.points.insert(1, OutlinePoint::off(480, 100));
        octagon.points.insert(3, OutlinePoint::off(100, 480));
        octagon.points.insert(5, OutlinePoint::off(-100, 480));
        let font = MemoryFont::new(FontScalarMetrics::default()).with_glyph('o', vec![octagon]);
        let record = ShapeClassifier.analyze(&font);
        // 3 off / 8 on = 0.375
        assert_eq!(record.label, Label::Shape(ShapeBand::SlightlyCurvy));
    }

    #[rstest]
    #[case("Rounded Soft", None, ShapeBand::Curvy)]
    #[case("Pixel Block", None, ShapeBand::Angular)]
    #[case("Plain", None, ShapeBand::Balanced)]
    #[case("Rounded", Some(3), ShapeBand::Angular)]
    #[case("Plain", Some(10), ShapeBand::Curvy)]
    fn test_metadata_estimate(
        #[case] family: &str,
        #[case] letterform: Option<u8>,
        #[case] expected: ShapeBand,
    ) {
        let mut font = MemoryFont::outline_less(FontScalarMetrics::default()).with_glyph('a', vec![]);
        font.metrics_mut().family_name = Some(family.into());
        font.metrics_mut().panose = letterform.map(|letterform| Panose {
            letterform,
            ..Default::default()
        });
        let record = ShapeClassifier.analyze(&font);
        assert_eq!(record.label, Label::Shape(expected));
        assert!(record.estimated);
        assert_eq!(record.estimation_method.as_deref(), Some("metadata analysis"));
    }

    #[test]
    fn test_empty_cmap_is_unknown() {
        let record = ShapeClassifier.analyze(&MemoryFont::new(FontScalarMetrics::default()));
        assert_eq!(record.label, Label::Unknown);
        assert!(record.reason.is_some());
    }
}
