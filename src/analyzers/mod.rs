use crate::{FeatureKind, FeatureRecord, FontPersonaError, GlyphId, GlyphSample, OutlineSource};

/// Declare analyzers with less boilerplate
///
/// Usage: `declare_analyzers! { TypeName(module_name) => "cli_name", ... }`
///
/// Analyzers run in declaration order.
macro_rules! declare_analyzers {
    ($($(#[$meta:meta])* $type:ident($module:ident) => $name:literal),* $(,)?) => {
        // Import modules
        $(
            $(#[$meta])*
            mod $module;
        )*

        // Re-export types
        $(
            $(#[$meta])*
            pub use $module::$type;
        )*

        /// The names of all analyzers, in the order they run
        pub const ANALYZER_NAMES: &[&str] = &[$($name),*];

        /// One instance of every analyzer, in the order they run
        pub fn default_analyzers() -> Vec<Box<dyn FeatureAnalyzer>> {
            vec![$(Box::new($type)),*]
        }

        /// Look an analyzer up by its command line name
        pub fn analyzer_by_name(name: &str) -> Result<Box<dyn FeatureAnalyzer>, FontPersonaError> {
            Ok(match name {
                $(
                    $(#[$meta])*
                    $name => Box::new($type),
                )*
                _ => return Err(FontPersonaError::UnknownAnalyzer(name.to_string())),
            })
        }
    };
}

// Declare all analyzers in one place
declare_analyzers! {
    StyleClassifier(style) => "style",
    StrokeWidthEstimator(stroke) => "stroke",
    AspectClassifier(aspect) => "aspect",
    ShapeClassifier(shape) => "shape",
    SpacingAnalyzer(spacing) => "spacing",
    VerticalMetricsAnalyzer(vertical) => "vertical",
    ContrastAnalyzer(contrast) => "contrast",
    DesignClassAnalyzer(classes) => "classes",
}

pub mod tuning;

/// A strategy measuring one feature of a font
///
/// Analyzers hold no state, so one set can be shared between threads.
pub trait FeatureAnalyzer: Send + Sync {
    /// The feature this analyzer produces
    fn kind(&self) -> FeatureKind;

    /// Measure the feature, failing with the first reason it cannot be determined
    fn measure(&self, font: &dyn OutlineSource) -> Result<FeatureRecord, FontPersonaError>;

    /// Measure the feature; failures become an unknown record carrying the reason
    fn analyze(&self, font: &dyn OutlineSource) -> FeatureRecord {
        match self.measure(font) {
            Ok(record) => {
                log::debug!(
                    "{}: {} (value {:?}, normalized {:?})",
                    self.kind(),
                    record.label,
                    record.value,
                    record.normalized
                );
                record
            }
            Err(e) => {
                log::debug!("{}: unknown ({})", self.kind(), e);
                FeatureRecord::from_error(self.kind(), &e)
            }
        }
    }
}

/// Map probe characters to glyphs, keeping those the font has
///
/// Fails when the font has no character map or none of the probes resolve.
pub(crate) fn resolve_probes(
    font: &dyn OutlineSource,
    probes: &[char],
) -> Result<Vec<(char, GlyphId)>, FontPersonaError> {
    if !font.has_character_map() {
        return Err(FontPersonaError::NoCharacterMap);
    }
    let resolved: Vec<_> = probes
        .iter()
        .filter_map(|&c| font.glyph_id(c).map(|id| (c, id)))
        .collect();
    if resolved.is_empty() {
        return Err(FontPersonaError::NoProbeGlyphs {
            probes: probes.iter().collect(),
        });
    }
    Ok(resolved)
}

/// Resolve probe characters and load their non-empty outlines
///
/// Fails as [`resolve_probes`] does, and for fonts without point outlines.
/// Glyphs which cannot be read are skipped with a warning; empty glyphs are
/// skipped silently.
pub(crate) fn load_probes(
    font: &dyn OutlineSource,
    probes: &[char],
) -> Result<Vec<GlyphSample>, FontPersonaError> {
    let resolved = resolve_probes(font, probes)?;
    require_outlines(font)?;
    let mut samples = Vec::with_capacity(resolved.len());
    for (c, id) in resolved {
        match font.glyph(id) {
            Ok(mut sample) => {
                if sample.is_empty() {
                    log::trace!("Skipping empty glyph for {c:?}");
                    continue;
                }
                sample.character = Some(c);
                samples.push(sample);
            }
            Err(e) => log::warn!("Could not read glyph for {c:?}: {e}"),
        }
    }
    Ok(samples)
}

/// Fail with [`FontPersonaError::UnsupportedOutlineFormat`] for outline-less fonts
pub(crate) fn require_outlines(font: &dyn OutlineSource) -> Result<(), FontPersonaError> {
    if font.has_outline_points() {
        Ok(())
    } else {
        Err(FontPersonaError::UnsupportedOutlineFormat {
            format: font.outline_format().to_string(),
        })
    }
}

/// The font's units per em, or [`FontPersonaError::MissingTable`]
pub(crate) fn units_per_em(font: &dyn OutlineSource) -> Result<f64, FontPersonaError> {
    match font.scalar_metrics().units_per_em {
        Some(upm) if upm > 0 => Ok(upm as f64),
        _ => Err(FontPersonaError::missing("head")),
    }
}

/// Arithmetic mean, or `None` for an empty slice
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
