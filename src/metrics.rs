use serde::Serialize;
use smol_str::SmolStr;

/// Scalar values read from a font's tables
///
/// Every field is optional: a value is `None` when the table it comes from
/// is absent (or, for the OS/2 version-dependent fields, too old to carry it).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontScalarMetrics {
    /// Units per em (`head`)
    pub units_per_em: Option<u16>,
    /// Weight class, 100-900 (`OS/2`)
    pub weight_class: Option<u16>,
    /// Width class, 1-9 (`OS/2`)
    pub width_class: Option<u16>,
    /// Typographic ascender (`OS/2`)
    pub typo_ascender: Option<i16>,
    /// Typographic descender, usually negative (`OS/2`)
    pub typo_descender: Option<i16>,
    /// Ascender (`hhea`)
    pub hhea_ascender: Option<i16>,
    /// Descender, usually negative (`hhea`)
    pub hhea_descender: Option<i16>,
    /// x-height (`OS/2` version 2 and later)
    pub x_height: Option<i16>,
    /// Cap height (`OS/2` version 2 and later)
    pub cap_height: Option<i16>,
    /// IBM font family class; class in the high byte, subclass in the low byte (`OS/2`)
    pub family_class: Option<i16>,
    /// PANOSE classification (`OS/2`)
    pub panose: Option<Panose>,
    /// Whether the font is monospaced (`post`)
    pub is_fixed_pitch: Option<bool>,
    /// Family name (`name` ID 1, or the typographic family if present)
    pub family_name: Option<SmolStr>,
    /// Name stored with the outline data (the PostScript name)
    pub internal_name: Option<SmolStr>,
    /// Full font name (`name` ID 4)
    pub full_name: Option<SmolStr>,
}

/// The ten PANOSE classification digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Panose {
    /// Family kind (2 = Latin text, 3 = Latin hand written, 4 = Latin decorative, ...)
    pub family_type: u8,
    /// Serif style
    pub serif_style: u8,
    /// Weight
    pub weight: u8,
    /// Proportion
    pub proportion: u8,
    /// Contrast
    pub contrast: u8,
    /// Stroke variation
    pub stroke_variation: u8,
    /// Arm style
    pub arm_style: u8,
    /// Letterform
    pub letterform: u8,
    /// Midline
    pub midline: u8,
    /// x-height
    pub x_height: u8,
}

impl Panose {
    /// Decode the ten PANOSE bytes as stored in the `OS/2` table
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let b: &[u8; 10] = bytes.get(..10)?.try_into().ok()?;
        Some(Panose {
            family_type: b[0],
            serif_style: b[1],
            weight: b[2],
            proportion: b[3],
            contrast: b[4],
            stroke_variation: b[5],
            arm_style: b[6],
            letterform: b[7],
            midline: b[8],
            x_height: b[9],
        })
    }
}

/// Advance width and left side bearing of one glyph (`hmtx`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HorizontalMetric {
    /// Advance width, in font units
    pub advance: u16,
    /// Left side bearing, in font units
    pub lsb: i16,
}

impl HorizontalMetric {
    /// Create a new metric record
    pub fn new(advance: u16, lsb: i16) -> Self {
        HorizontalMetric { advance, lsb }
    }
}

/// Container and outline flavour of a font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum OutlineFormat {
    /// TrueType outlines in a .ttf file
    TrueType,
    /// PostScript (CFF or CFF2) outlines
    OpenTypeCff,
    /// TrueType outlines in a file named .otf
    OpenTypeTrueType,
    /// WOFF container
    Woff,
    /// WOFF2 container
    Woff2,
    /// Anything else
    #[default]
    Unknown,
}

impl OutlineFormat {
    /// Get the name of the format
    pub fn as_str(&self) -> &str {
        match self {
            OutlineFormat::TrueType => "TrueType",
            OutlineFormat::OpenTypeCff => "OpenType-CFF",
            OutlineFormat::OpenTypeTrueType => "OpenType-TT",
            OutlineFormat::Woff => "WOFF",
            OutlineFormat::Woff2 => "WOFF2",
            OutlineFormat::Unknown => "Unknown",
        }
    }

    /// Whether this format carries point-level quadratic outlines
    pub fn has_point_outlines(&self) -> bool {
        matches!(
            self,
            OutlineFormat::TrueType | OutlineFormat::OpenTypeTrueType
        )
    }
}

impl std::fmt::Display for OutlineFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
