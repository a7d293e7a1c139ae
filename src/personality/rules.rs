use super::Trait::{self, *};
use crate::{
    analyzers::tuning::{DEEP_DESCENDER_RATIO, TALL_ASCENDER_RATIO},
    BearingBand, ContrastBand, FeatureSet, FontStyle, ShapeBand, WeightBand, XHeightClass,
};

/// A feature predicate and the trait deltas it contributes
pub(crate) struct TraitRule {
    pub name: &'static str,
    pub applies: fn(&FeatureSet) -> bool,
    pub deltas: &'static [(Trait, f64)],
}

fn style_is(features: &FeatureSet, style: FontStyle) -> bool {
    features.style() == Some(style)
}

fn width_mentions(features: &FeatureSet, word: &str) -> bool {
    features
        .width_descriptor()
        .is_some_and(|w| w.to_lowercase().contains(word))
}

fn ratio_above(ratio: Option<f64>, threshold: f64) -> bool {
    ratio.is_some_and(|r| r > threshold)
}

pub(crate) static TRAIT_RULES: &[TraitRule] = &[
    TraitRule {
        name: "serif",
        applies: |f| style_is(f, FontStyle::Serif),
        deltas: &[(Formality, 1.0), (Elegance, 1.0), (Modernity, -1.0)],
    },
    TraitRule {
        name: "sans",
        applies: |f| style_is(f, FontStyle::SansSerif),
        deltas: &[(Modernity, 1.0), (Formality, 0.5)],
    },
    TraitRule {
        name: "script",
        applies: |f| style_is(f, FontStyle::Script),
        deltas: &[(Elegance, 1.5), (Creativity, 1.5), (Playfulness, 1.0)],
    },
    TraitRule {
        name: "decorative",
        applies: |f| style_is(f, FontStyle::Decorative),
        deltas: &[(Creativity, 2.0), (Playfulness, 1.5), (Formality, -1.0)],
    },
    TraitRule {
        name: "monospace",
        applies: |f| style_is(f, FontStyle::Monospace),
        deltas: &[(Modernity, 0.5), (Creativity, -1.0)],
    },
    TraitRule {
        name: "light weight",
        applies: |f| {
            matches!(
                f.weight(),
                Some(WeightBand::Thin | WeightBand::ExtraLight | WeightBand::Light)
            )
        },
        deltas: &[(Elegance, 1.0), (Strength, -1.0)],
    },
    TraitRule {
        name: "solid weight",
        applies: |f| {
            matches!(
                f.weight(),
                Some(WeightBand::Medium | WeightBand::SemiBold | WeightBand::Bold)
            )
        },
        deltas: &[(Strength, 1.0)],
    },
    TraitRule {
        name: "heavy weight",
        applies: |f| matches!(f.weight(), Some(WeightBand::ExtraBold | WeightBand::Black)),
        deltas: &[(Strength, 2.0), (Formality, -0.5)],
    },
    TraitRule {
        name: "condensed",
        applies: |f| width_mentions(f, "condensed"),
        deltas: &[(Modernity, 0.5), (Elegance, -0.5)],
    },
    TraitRule {
        name: "expanded",
        applies: |f| !width_mentions(f, "condensed") && width_mentions(f, "expanded"),
        deltas: &[(Elegance, 0.5), (Friendliness, 0.5)],
    },
    TraitRule {
        name: "curvy",
        applies: |f| f.shape().is_some_and(|s| s.is_curvy()),
        deltas: &[(Friendliness, 1.0), (Playfulness, 0.5)],
    },
    TraitRule {
        name: "very curvy",
        applies: |f| f.shape() == Some(ShapeBand::VeryCurvy),
        deltas: &[(Friendliness, 0.5), (Playfulness, 0.5)],
    },
    TraitRule {
        name: "angular",
        applies: |f| f.shape() == Some(ShapeBand::Angular),
        deltas: &[(Strength, 1.0), (Formality, 0.5)],
    },
    TraitRule {
        name: "tight",
        applies: |f| f.bearing() == Some(BearingBand::Tight),
        deltas: &[(Modernity, 0.5)],
    },
    TraitRule {
        name: "loose",
        applies: |f| f.bearing() == Some(BearingBand::Loose),
        deltas: &[(Friendliness, 0.5), (Elegance, 0.5)],
    },
    TraitRule {
        name: "large x-height",
        applies: |f| f.x_height_class() == Some(XHeightClass::Large),
        deltas: &[(Friendliness, 0.5), (Modernity, 0.5)],
    },
    TraitRule {
        name: "small x-height",
        applies: |f| f.x_height_class() == Some(XHeightClass::Small),
        deltas: &[(Elegance, 0.5), (Formality, 0.5)],
    },
    TraitRule {
        name: "tall ascenders",
        applies: |f| ratio_above(f.vertical().and_then(|v| v.ascender_ratio), TALL_ASCENDER_RATIO),
        deltas: &[(Elegance, 0.5), (Formality, 0.5)],
    },
    TraitRule {
        name: "deep descenders",
        applies: |f| {
            ratio_above(
                f.vertical().and_then(|v| v.descender_ratio),
                DEEP_DESCENDER_RATIO,
            )
        },
        deltas: &[(Creativity, 0.5)],
    },
    TraitRule {
        name: "high contrast",
        applies: |f| matches!(f.contrast(), Some(ContrastBand::High | ContrastBand::Extreme)),
        deltas: &[(Elegance, 1.0), (Formality, 0.5), (Modernity, -0.5)],
    },
    TraitRule {
        name: "monoline",
        applies: |f| f.contrast() == Some(ContrastBand::Monoline),
        deltas: &[(Modernity, 1.0), (Friendliness, 0.5)],
    },
];

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{FeatureDetail, FeatureKind, FeatureRecord, Label, VerticalProportions};
    use rstest::rstest;

    fn fired(features: &FeatureSet) -> Vec<&'static str> {
        TRAIT_RULES
            .iter()
            .filter(|r| (r.applies)(features))
            .map(|r| r.name)
            .collect()
    }

    fn design_class(width: &str) -> FeatureSet {
        [FeatureRecord::labelled(
            FeatureKind::DesignClass,
            Label::DesignClass {
                weight: "Regular".into(),
                width: width.into(),
            },
        )]
        .into_iter()
        .collect()
    }

    #[rstest]
    #[case("Semi Condensed", vec!["condensed"])]
    #[case("Ultra Expanded", vec!["expanded"])]
    #[case("Normal", vec![])]
    #[case("Custom", vec![])]
    fn test_width_rules(#[case] width: &str, #[case] expected: Vec<&str>) {
        assert_eq!(fired(&design_class(width)), expected);
    }

    #[rstest]
    #[case(ShapeBand::VeryCurvy, vec!["curvy", "very curvy"])]
    #[case(ShapeBand::SlightlyCurvy, vec!["curvy"])]
    #[case(ShapeBand::Angular, vec!["angular"])]
    #[case(ShapeBand::Balanced, vec![])]
    fn test_shape_rules(#[case] shape: ShapeBand, #[case] expected: Vec<&str>) {
        let features: FeatureSet = [FeatureRecord::labelled(FeatureKind::Shape, Label::Shape(shape))]
            .into_iter()
            .collect();
        assert_eq!(fired(&features), expected);
    }

    #[test]
    fn test_vertical_rules() {
        let proportions = VerticalProportions {
            units_per_em: 1000,
            x_height: None,
            cap_height: None,
            ascender: 750.0,
            descender: -350.0,
            x_height_normalized: None,
            cap_height_normalized: None,
            ascender_normalized: 0.75,
            descender_normalized: 0.35,
            total_height: 1100.0,
            ascender_ratio: Some(750.0 / 1100.0),
            descender_ratio: Some(350.0 / 1100.0),
            x_to_cap_ratio: None,
        };
        let features: FeatureSet = [FeatureRecord::unknown(FeatureKind::VerticalMetrics, "no x")
            .with_detail(FeatureDetail::Vertical(proportions))]
        .into_iter()
        .collect();
        // 0.68 is not tall, 0.32 is deep
        assert_eq!(fired(&features), vec!["deep descenders"]);
    }

    #[test]
    fn test_unknown_records_fire_nothing() {
        let features: FeatureSet = [
            FeatureRecord::unknown(FeatureKind::Style, "x"),
            FeatureRecord::error(FeatureKind::StrokeWidth, "x"),
            FeatureRecord::unknown(FeatureKind::Contrast, "x"),
        ]
        .into_iter()
        .collect();
        assert!(fired(&features).is_empty());
    }
}
