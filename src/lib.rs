//! Infer the typographic personality of a font from its glyph geometry
//!
//! A font is reached through the [`OutlineSource`] trait. A set of
//! [analyzers](analyzers) measure stroke width, proportions, curvature,
//! spacing, vertical metrics and contrast from its outlines and tables, each
//! producing a [`FeatureRecord`]. The resulting [`FeatureSet`] is scored
//! into a [`PersonalityProfile`]: a trait vector, a descriptive sentence and
//! lists of suitable and unsuitable uses.
//!
//! ```rust
//! use fontpersona::{analyze, FontScalarMetrics, MemoryFont};
//! let font = MemoryFont::new(FontScalarMetrics {
//!     family_name: Some("Example Serif".into()),
//!     ..Default::default()
//! });
//! let report = analyze(&font);
//! assert_eq!(report.features.style().map(|s| s.as_str()), Some("serif"));
//! ```
//!
//! Cargo features:
//!
//! - `binary` (default): [`BinaryFont`], reading TrueType and OpenType files with skrifa
//! - `rayon` (default): analyze many files in parallel with [`analyze_paths`]
//! - `cli`: the `fontpersona` command line tool
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod analyzers;
#[cfg(feature = "binary")]
mod binary;
mod error;
mod glyph;
mod metrics;
pub mod personality;
mod record;
mod report;
mod source;
#[cfg(test)]
mod testutil;

#[cfg(feature = "binary")]
pub use crate::binary::BinaryFont;
#[cfg(feature = "binary")]
pub use crate::report::{analyze_path, analyze_paths};
pub use crate::{
    error::FontPersonaError,
    glyph::{BoundingBox, Contour, GlyphId, GlyphSample, OutlinePoint},
    metrics::{FontScalarMetrics, HorizontalMetric, OutlineFormat, Panose},
    personality::PersonalityProfile,
    record::{
        AdvanceBand, BearingBand, ContrastBand, FeatureDetail, FeatureKind, FeatureRecord,
        FeatureSet, FontStyle, Label, ShapeBand, StrokeMethod, StrokeSample, StyleScores,
        VerticalProportions, WeightBand, WidthBand, XHeightClass,
    },
    report::{analyze, analyze_with, collect_font_paths, FontReport, FONT_EXTENSIONS},
    source::{MemoryFont, OutlineSource},
};
