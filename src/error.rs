use std::{io, path::PathBuf};
use thiserror::Error;

use crate::glyph::GlyphId;

/// Errors produced while using the fontpersona crate
///
/// Analyzers never return these to the caller; they are folded into the
/// `reason` of a [`crate::FeatureRecord`]. Only loading a font (and the
/// command line front end) surfaces them directly.
#[derive(Debug, Error)]
pub enum FontPersonaError {
    /// A table (or scalar derived from a table) which the analysis needs is absent
    #[error("No {table} table found")]
    MissingTable {
        /// The table tag, e.g. `cmap` or `OS/2`
        table: &'static str,
    },

    /// The font has no usable character map
    #[error("No cmap table found")]
    NoCharacterMap,

    /// None of the probe characters resolve to a glyph
    #[error("No sample glyphs found (tried {probes})")]
    NoProbeGlyphs {
        /// The characters which were looked up
        probes: String,
    },

    /// The glyph source exposes no point-level outlines
    #[error("Unsupported outline format: {format} outlines carry no point data")]
    UnsupportedOutlineFormat {
        /// The detected outline format
        format: String,
    },

    /// A measurement had zero extent (empty bounding box, zero-length vector)
    #[error("Degenerate measurement: {0}")]
    MeasurementDegenerate(String),

    /// Probe glyphs resolved but none of them produced a usable measurement
    #[error("Could not measure {what}")]
    NoMeasurements {
        /// What was being measured
        what: &'static str,
    },

    #[error("Glyph {glyph} not found")]
    /// A glyph identifier was not present in the glyph source
    GlyphNotFound {
        /// The glyph requested
        glyph: GlyphId,
    },

    #[error("Glyph {glyph} has no point outline")]
    /// The glyph exists but its outline has no point-level representation
    NoOutline {
        /// The glyph requested
        glyph: GlyphId,
    },

    #[error("Unknown analyzer: {0}")]
    /// An analyzer name given on the command line was not recognised
    UnknownAnalyzer(String),

    #[error("Unsupported font container {container} for file {path:?}")]
    /// The font is wrapped in a container the parser cannot open directly
    UnsupportedContainer {
        /// Container name (WOFF, WOFF2)
        container: &'static str,
        /// The path of the file
        path: PathBuf,
    },

    #[error("IO Error: {0}")]
    /// IO error
    IO(#[from] io::Error),

    #[cfg(feature = "binary")]
    #[error("Binary font reading error: {0}")]
    /// Binary font reading error
    BinaryFontRead(#[from] skrifa::raw::ReadError),

    #[error("JSON conversion error: {0}")]
    /// JSON conversion error
    JsonSerialize(#[from] serde_json::Error),
}

impl FontPersonaError {
    pub(crate) fn missing(table: &'static str) -> Self {
        FontPersonaError::MissingTable { table }
    }
}
