use std::path::Path;

use skrifa::{
    instance::{LocationRef, Size},
    raw::{
        tables::glyf::{Glyph, SimpleGlyph},
        ReadError, TableProvider,
    },
    string::StringId,
    FontRef, MetadataProvider, Tag,
};

use crate::{
    Contour, FontPersonaError, FontScalarMetrics, GlyphId, GlyphSample, HorizontalMetric,
    OutlineFormat, OutlinePoint, OutlineSource, Panose,
};

const CFF: Tag = Tag::new(b"CFF ");
const CFF2: Tag = Tag::new(b"CFF2");
const GLYF: Tag = Tag::new(b"glyf");
const LOCA: Tag = Tag::new(b"loca");

/// Magic numbers of the compressed web containers we cannot read directly
const CONTAINERS: &[(&[u8; 4], &str)] = &[(b"wOFF", "WOFF"), (b"wOF2", "WOFF2")];

/// A TrueType or OpenType font file, read with skrifa
///
/// The file's bytes are owned and re-parsed on demand; scalar metrics and
/// the horizontal metrics table are read once when the font is opened.
/// Font collections are opened at their first face.
#[derive(Debug, Clone)]
pub struct BinaryFont {
    data: Vec<u8>,
    metrics: FontScalarMetrics,
    horizontal_metrics: Option<Vec<HorizontalMetric>>,
    format: OutlineFormat,
    glyph_count: u32,
    has_character_map: bool,
    has_glyf: bool,
}

impl BinaryFont {
    /// Read a font file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontPersonaError> {
        let path = path.as_ref();
        log::debug!("Loading {}", path.display());
        let data = std::fs::read(path)?;
        Self::open(data, Some(path))
    }

    /// Parse a font held in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontPersonaError> {
        Self::open(data, None)
    }

    fn open(data: Vec<u8>, path: Option<&Path>) -> Result<Self, FontPersonaError> {
        if let Some((_, container)) = CONTAINERS
            .iter()
            .find(|(magic, _)| data.get(..4) == Some(magic.as_slice()))
        {
            return Err(FontPersonaError::UnsupportedContainer {
                container: *container,
                path: path.map(Path::to_path_buf).unwrap_or_default(),
            });
        }
        let font = FontRef::from_index(&data, 0)?;
        let has_glyf = font.table_data(GLYF).is_some() && font.table_data(LOCA).is_some();
        let has_cff = font.table_data(CFF).is_some() || font.table_data(CFF2).is_some();
        let format = detect_format(has_cff, has_glyf, path);
        let metrics = read_scalar_metrics(&font);
        let glyph_count = font.maxp().map(|m| m.num_glyphs() as u32).unwrap_or_default();
        let horizontal_metrics = read_horizontal_metrics(&font, glyph_count);
        let has_character_map = font.charmap().mappings().next().is_some();
        log::debug!(
            "{format} font with {glyph_count} glyphs, character map: {has_character_map}"
        );
        Ok(BinaryFont {
            data,
            metrics,
            horizontal_metrics,
            format,
            glyph_count,
            has_character_map,
            has_glyf,
        })
    }

    fn font(&self) -> Result<FontRef<'_>, ReadError> {
        FontRef::from_index(&self.data, 0)
    }
}

fn localized(font: &FontRef, id: StringId) -> Option<smol_str::SmolStr> {
    font.localized_strings(id)
        .english_or_first()
        .map(|s| s.to_string().into())
}

fn read_scalar_metrics(font: &FontRef) -> FontScalarMetrics {
    let mut metrics = FontScalarMetrics {
        family_name: localized(font, StringId::TYPOGRAPHIC_FAMILY_NAME)
            .or_else(|| localized(font, StringId::FAMILY_NAME)),
        internal_name: localized(font, StringId::POSTSCRIPT_NAME),
        full_name: localized(font, StringId::FULL_NAME),
        ..Default::default()
    };
    if let Ok(head) = font.head() {
        metrics.units_per_em = Some(head.units_per_em());
    }
    if let Ok(os2) = font.os2() {
        metrics.weight_class = Some(os2.us_weight_class());
        metrics.width_class = Some(os2.us_width_class());
        metrics.typo_ascender = Some(os2.s_typo_ascender());
        metrics.typo_descender = Some(os2.s_typo_descender());
        metrics.x_height = os2.sx_height();
        metrics.cap_height = os2.s_cap_height();
        metrics.family_class = Some(os2.s_family_class());
        metrics.panose = Panose::from_bytes(os2.panose_10());
    }
    if let Ok(hhea) = font.hhea() {
        metrics.hhea_ascender = Some(hhea.ascender().to_i16());
        metrics.hhea_descender = Some(hhea.descender().to_i16());
    }
    if let Ok(post) = font.post() {
        metrics.is_fixed_pitch = Some(post.is_fixed_pitch() != 0);
    }
    metrics
}

fn read_horizontal_metrics(font: &FontRef, glyph_count: u32) -> Option<Vec<HorizontalMetric>> {
    font.hmtx().ok()?;
    let glyph_metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
    Some(
        (0..glyph_count)
            .map(|gid| {
                let gid = skrifa::GlyphId::new(gid);
                HorizontalMetric::new(
                    glyph_metrics.advance_width(gid).unwrap_or_default() as u16,
                    glyph_metrics.left_side_bearing(gid).unwrap_or_default() as i16,
                )
            })
            .collect(),
    )
}

fn detect_format(has_cff: bool, has_glyf: bool, path: Option<&Path>) -> OutlineFormat {
    let extension = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let extension = extension.as_deref();
    if has_cff {
        OutlineFormat::OpenTypeCff
    } else if has_glyf {
        if extension == Some("otf") {
            OutlineFormat::OpenTypeTrueType
        } else {
            OutlineFormat::TrueType
        }
    } else {
        match extension {
            Some("ttf") => OutlineFormat::TrueType,
            Some("otf") => OutlineFormat::OpenTypeCff,
            Some("woff") => OutlineFormat::Woff,
            Some("woff2") => OutlineFormat::Woff2,
            _ => OutlineFormat::Unknown,
        }
    }
}

fn contours_of(glyph: &SimpleGlyph) -> Vec<Contour> {
    let mut points = glyph.points();
    let mut start = 0;
    glyph
        .end_pts_of_contours()
        .iter()
        .map(|end| {
            let end = end.get() as usize;
            let count = (end + 1).saturating_sub(start);
            start = end + 1;
            Contour::new(
                points
                    .by_ref()
                    .take(count)
                    .map(|p| OutlinePoint {
                        x: p.x as i32,
                        y: p.y as i32,
                        on_curve: p.on_curve,
                    })
                    .collect(),
            )
        })
        .collect()
}

impl OutlineSource for BinaryFont {
    fn glyph_id(&self, c: char) -> Option<GlyphId> {
        let gid = self.font().ok()?.charmap().map(c)?;
        Some(GlyphId::new(gid.to_u32()))
    }

    fn has_character_map(&self) -> bool {
        self.has_character_map
    }

    fn glyph(&self, id: GlyphId) -> Result<GlyphSample, FontPersonaError> {
        if id.0 >= self.glyph_count {
            return Err(FontPersonaError::GlyphNotFound { glyph: id });
        }
        if !self.has_glyf {
            return Err(FontPersonaError::NoOutline { glyph: id });
        }
        let font = self.font()?;
        let glyf = font.glyf()?;
        let loca = font.loca(None)?;
        let contours = match loca.get_glyf(skrifa::GlyphId::new(id.0), &glyf)? {
            Some(Glyph::Simple(simple)) => contours_of(&simple),
            // Components carry no points of their own
            Some(Glyph::Composite(_)) | None => vec![],
        };
        Ok(GlyphSample::new(None, id, contours))
    }

    fn scalar_metrics(&self) -> &FontScalarMetrics {
        &self.metrics
    }

    fn has_outline_points(&self) -> bool {
        self.has_glyf
    }

    fn horizontal_metrics(&self) -> Option<&[HorizontalMetric]> {
        self.horizontal_metrics.as_deref()
    }

    fn outline_format(&self) -> OutlineFormat {
        self.format
    }
}
