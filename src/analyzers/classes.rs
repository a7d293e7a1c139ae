use super::FeatureAnalyzer;
use crate::{FeatureDetail, FeatureKind, FeatureRecord, FontPersonaError, Label, OutlineSource};

const WEIGHT_NAMES: &[(u16, &str)] = &[
    (100, "Thin"),
    (200, "Extra Light"),
    (300, "Light"),
    (400, "Regular"),
    (500, "Medium"),
    (600, "Semi Bold"),
    (700, "Bold"),
    (800, "Extra Bold"),
    (900, "Black"),
];

const WIDTH_NAMES: &[&str] = &[
    "Ultra Condensed",
    "Extra Condensed",
    "Condensed",
    "Semi Condensed",
    "Normal",
    "Semi Expanded",
    "Expanded",
    "Extra Expanded",
    "Ultra Expanded",
];

const CUSTOM: &str = "Custom";

/// Decodes the OS/2 weight and width classes into their standard names
pub struct DesignClassAnalyzer;

impl FeatureAnalyzer for DesignClassAnalyzer {
    fn kind(&self) -> FeatureKind {
        FeatureKind::DesignClass
    }

    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError> {
        let metrics = font.scalar_metrics();
        let (weight_class, width_class) = (metrics.weight_class, metrics.width_class);
        if weight_class.is_none() && width_class.is_none() {
            return Err(FontPersonaError::missing("OS/2"));
        }
        let mut record = FeatureRecord::labelled(
            self.kind(),
            Label::DesignClass {
                weight: weight_class.map_or(CUSTOM, weight_name).into(),
                width: width_class.map_or(CUSTOM, width_name).into(),
            },
        )
        .with_detail(FeatureDetail::DesignClass {
            weight_class,
            width_class,
        });
        record.value = weight_class.map(f64::from);
        Ok(record)
    }
}

/// Standard name of an OS/2 weight class, or "Custom"
pub fn weight_name(weight_class: u16) -> &'static str {
    WEIGHT_NAMES
        .iter()
        .find(|(class, _)| *class == weight_class)
        .map_or(CUSTOM, |(_, name)| *name)
}

/// Standard name of an OS/2 width class, or "Custom"
pub fn width_name(width_class: u16) -> &'static str {
    width_class
        .checked_sub(1)
        .and_then(|i| WIDTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or(CUSTOM)
}
