use std::collections::BTreeMap;

use crate::{
    glyph::{Contour, GlyphId, GlyphSample},
    metrics::{FontScalarMetrics, HorizontalMetric, OutlineFormat},
    FontPersonaError,
};

/// Access to the glyphs and tables of one font
///
/// This is the only boundary between the analysis engine and whatever
/// actually parses font files. Every analyzer works purely on the
/// [`GlyphSample`]s and [`FontScalarMetrics`] handed out here.
pub trait OutlineSource {
    /// The glyph the character map assigns to `c`, if any
    fn glyph_id(&self, c: char) -> Option<GlyphId>;

    /// Whether the font has a non-empty character map
    fn has_character_map(&self) -> bool;

    /// The outline of a glyph
    ///
    /// Returns [`FontPersonaError::NoOutline`] when the glyph source has no
    /// point-level data (CFF-flavoured fonts) and
    /// [`FontPersonaError::GlyphNotFound`] for identifiers out of range.
    fn glyph(&self, id: GlyphId) -> Result<GlyphSample, FontPersonaError>;

    /// Snapshot of the font's scalar metrics
    fn scalar_metrics(&self) -> &FontScalarMetrics;

    /// Whether [`OutlineSource::glyph`] can return point data at all
    ///
    /// Defaults to what the [`OutlineFormat`] implies.
    fn has_outline_points(&self) -> bool {
        self.outline_format().has_point_outlines()
    }

    /// The full advance width / side bearing table, if the font has one
    fn horizontal_metrics(&self) -> Option<&[HorizontalMetric]>;

    /// The container/outline flavour of the font
    fn outline_format(&self) -> OutlineFormat;

    /// A human readable name for the font
    fn display_name(&self) -> Option<&str> {
        let metrics = self.scalar_metrics();
        metrics
            .full_name
            .as_deref()
            .or(metrics.family_name.as_deref())
    }

    /// Look up a character and return its outline
    fn glyph_by_char(&self, c: char) -> Result<GlyphSample, FontPersonaError> {
        let id = self.glyph_id(c).ok_or(FontPersonaError::NoProbeGlyphs {
            probes: c.to_string(),
        })?;
        let mut sample = self.glyph(id)?;
        sample.character = Some(c);
        Ok(sample)
    }
}

/// A font held entirely in memory
///
/// Useful for callers which already have outlines from another toolkit, and
/// for testing. Glyph identifiers are assigned in insertion order, starting
/// at 1 (0 is reserved for `.notdef`).
///
/// ```rust
/// use fontpersona::{Contour, FontScalarMetrics, MemoryFont, OutlineSource};
/// let font = MemoryFont::new(FontScalarMetrics {
///     units_per_em: Some(1000),
///     ..Default::default()
/// })
/// .with_glyph('I', vec![Contour::polygon(&[(0, 0), (80, 0), (80, 700), (0, 700)])]);
/// let glyph = font.glyph_by_char('I').unwrap();
/// assert_eq!(glyph.bbox.unwrap().height(), 700.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFont {
    metrics: FontScalarMetrics,
    character_map: Option<BTreeMap<char, GlyphId>>,
    glyphs: BTreeMap<GlyphId, (Option<char>, Vec<Contour>)>,
    horizontal_metrics: Option<Vec<HorizontalMetric>>,
    format: OutlineFormat,
}

impl MemoryFont {
    /// A font with point outlines (TrueType flavoured) and an empty character map
    pub fn new(metrics: FontScalarMetrics) -> Self {
        MemoryFont {
            metrics,
            character_map: Some(BTreeMap::new()),
            glyphs: BTreeMap::new(),
            horizontal_metrics: None,
            format: OutlineFormat::TrueType,
        }
    }

    /// A font whose glyphs have no point outlines (CFF flavoured)
    ///
    /// Glyphs added with [`MemoryFont::with_glyph`] are still mapped, so
    /// probe characters resolve, but their outlines are never handed out.
    pub fn outline_less(metrics: FontScalarMetrics) -> Self {
        MemoryFont {
            format: OutlineFormat::OpenTypeCff,
            ..MemoryFont::new(metrics)
        }
    }

    /// Add a glyph and map `c` to it
    pub fn with_glyph(mut self, c: char, contours: Vec<Contour>) -> Self {
        let id = GlyphId(self.glyphs.len() as u32 + 1);
        self.glyphs.insert(id, (Some(c), contours));
        self.character_map
            .get_or_insert_with(BTreeMap::new)
            .insert(c, id);
        self
    }

    /// Drop the character map entirely
    pub fn without_character_map(mut self) -> Self {
        self.character_map = None;
        self
    }

    /// Attach a horizontal metrics table
    pub fn with_horizontal_metrics(mut self, metrics: Vec<HorizontalMetric>) -> Self {
        self.horizontal_metrics = Some(metrics);
        self
    }

    /// Override the reported outline format
    ///
    /// Glyph outlines are only handed out for formats with point outlines.
    pub fn with_format(mut self, format: OutlineFormat) -> Self {
        self.format = format;
        self
    }

    /// Mutable access to the scalar metrics
    pub fn metrics_mut(&mut self) -> &mut FontScalarMetrics {
        &mut self.metrics
    }
}

impl OutlineSource for MemoryFont {
    fn glyph_id(&self, c: char) -> Option<GlyphId> {
        self.character_map.as_ref()?.get(&c).copied()
    }

    fn has_character_map(&self) -> bool {
        self.character_map.as_ref().is_some_and(|m| !m.is_empty())
    }

    fn glyph(&self, id: GlyphId) -> Result<GlyphSample, FontPersonaError> {
        let (character, contours) = self
            .glyphs
            .get(&id)
            .ok_or(FontPersonaError::GlyphNotFound { glyph: id })?;
        if !self.has_outline_points() {
            return Err(FontPersonaError::NoOutline { glyph: id });
        }
        Ok(GlyphSample::new(*character, id, contours.clone()))
    }

    fn scalar_metrics(&self) -> &FontScalarMetrics {
        &self.metrics
    }

    fn horizontal_metrics(&self) -> Option<&[HorizontalMetric]> {
        self.horizontal_metrics.as_deref()
    }

    fn outline_format(&self) -> OutlineFormat {
        self.format
    }
}
