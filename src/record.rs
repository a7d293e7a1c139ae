use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use crate::FontPersonaError;

/// Declare a classification band with a fixed human readable name per variant
macro_rules! band_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl $name {
            /// Get the name of the band
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

band_enum! {
    /// Broad typographic style
    FontStyle {
        /// Serifed text face
        Serif => "serif",
        /// Sans serif text face
        SansSerif => "sans-serif",
        /// Script or handwriting
        Script => "script",
        /// Display or ornamental
        Decorative => "decorative",
        /// Fixed pitch
        Monospace => "monospace",
    }
}

band_enum! {
    /// Weight, derived from stroke width or from the OS/2 weight class
    WeightBand {
        /// Thin
        Thin => "thin",
        /// Extra light
        ExtraLight => "extra light",
        /// Light
        Light => "light",
        /// Regular
        Regular => "regular",
        /// Medium
        Medium => "medium",
        /// Semi bold
        SemiBold => "semi bold",
        /// Bold
        Bold => "bold",
        /// Extra bold
        ExtraBold => "extra bold",
        /// Black
        Black => "black",
    }
}

band_enum! {
    /// Width, derived from glyph aspect ratios
    WidthBand {
        /// Narrow letterforms
        Condensed => "condensed",
        /// Normal proportions
        Normal => "normal",
        /// Wide letterforms
        Expanded => "expanded",
    }
}

band_enum! {
    /// Curvature of the outlines
    ShapeBand {
        /// Mostly curves
        VeryCurvy => "very curvy",
        /// Curvy
        Curvy => "curvy",
        /// Moderately curvy
        ModeratelyCurvy => "moderately curvy",
        /// Slightly curvy
        SlightlyCurvy => "slightly curvy",
        /// Mostly straight segments
        Angular => "angular",
        /// Metadata gave no preference either way
        Balanced => "balanced",
    }
}

impl ShapeBand {
    /// Move one band toward [`ShapeBand::Angular`], stopping there
    pub fn toward_angular(self) -> Self {
        match self {
            ShapeBand::VeryCurvy => ShapeBand::Curvy,
            ShapeBand::Curvy => ShapeBand::ModeratelyCurvy,
            ShapeBand::ModeratelyCurvy => ShapeBand::SlightlyCurvy,
            ShapeBand::SlightlyCurvy | ShapeBand::Angular => ShapeBand::Angular,
            ShapeBand::Balanced => ShapeBand::Balanced,
        }
    }

    /// Whether this is one of the curvy bands
    pub fn is_curvy(&self) -> bool {
        self.as_str().contains("curvy")
    }
}

band_enum! {
    /// Average advance width relative to the em
    AdvanceBand {
        /// Very wide
        VeryWide => "very wide",
        /// Wide
        Wide => "wide",
        /// Medium
        Medium => "medium",
        /// Narrow
        Narrow => "narrow",
        /// Very narrow
        VeryNarrow => "very narrow",
    }
}

band_enum! {
    /// Average side bearing relative to the em
    BearingBand {
        /// Generous side bearings
        Loose => "loose",
        /// Medium
        Medium => "medium",
        /// Small side bearings
        Tight => "tight",
    }
}

band_enum! {
    /// x-height relative to cap height
    XHeightClass {
        /// Small x-height
        Small => "small",
        /// Medium x-height
        Medium => "medium",
        /// Large x-height
        Large => "large",
    }
}

band_enum! {
    /// Thick/thin stroke contrast
    ContrastBand {
        /// No visible contrast
        Monoline => "monoline",
        /// Low contrast
        Low => "low contrast",
        /// Medium contrast
        Medium => "medium contrast",
        /// High contrast
        High => "high contrast",
        /// Extreme contrast
        Extreme => "extreme contrast",
    }
}

/// Which feature a [`FeatureRecord`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Typographic style
    Style,
    /// Stroke width (and the weight derived from it)
    StrokeWidth,
    /// Glyph aspect ratio (and the width derived from it)
    Aspect,
    /// Curvature
    Shape,
    /// Advance widths and side bearings
    Spacing,
    /// x-height, cap height, ascender and descender
    VerticalMetrics,
    /// Stroke contrast
    Contrast,
    /// OS/2 weight and width classes
    DesignClass,
}

impl FeatureKind {
    /// Get the name of the feature
    pub fn as_str(&self) -> &str {
        match self {
            FeatureKind::Style => "style",
            FeatureKind::StrokeWidth => "stroke",
            FeatureKind::Aspect => "aspect",
            FeatureKind::Shape => "shape",
            FeatureKind::Spacing => "spacing",
            FeatureKind::VerticalMetrics => "vertical",
            FeatureKind::Contrast => "contrast",
            FeatureKind::DesignClass => "classes",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification result of a [`FeatureRecord`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Typographic style
    Style(FontStyle),
    /// Weight band
    Weight(WeightBand),
    /// Width band
    Width(WidthBand),
    /// Curvature band
    Shape(ShapeBand),
    /// Spacing bands
    Spacing {
        /// Band of the average advance width
        advance: AdvanceBand,
        /// Band of the average left side bearing
        bearing: BearingBand,
    },
    /// x-height class
    XHeight(XHeightClass),
    /// Contrast band
    Contrast(ContrastBand),
    /// Decoded OS/2 weight and width class names
    DesignClass {
        /// Weight class name, e.g. "Semi Bold"
        weight: SmolStr,
        /// Width class name, e.g. "Condensed"
        width: SmolStr,
    },
    /// The feature could not be determined
    Unknown,
    /// The analysis failed outright
    Error,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Style(s) => write!(f, "{s}"),
            Label::Weight(w) => write!(f, "{w}"),
            Label::Width(w) => write!(f, "{w}"),
            Label::Shape(s) => write!(f, "{s}"),
            Label::Spacing { advance, bearing } => write!(f, "{advance}, {bearing}"),
            Label::XHeight(x) => write!(f, "{x} x-height"),
            Label::Contrast(c) => write!(f, "{c}"),
            Label::DesignClass { weight, width } => write!(f, "{weight} {width}"),
            Label::Unknown => f.write_str("unknown"),
            Label::Error => f.write_str("error"),
        }
    }
}

/// How the stroke width of a single glyph was measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeMethod {
    /// Tall narrow stem
    VerticalStroke,
    /// Wide flat bar
    HorizontalStroke,
    /// Ring with a counter
    Circular,
    /// Nearest-neighbour distances between on-curve points
    Complex,
    /// Area over perimeter of the bounding box
    AreaPerimeter,
}

/// One per-glyph stroke width measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeSample {
    /// The probe character
    pub character: char,
    /// How it was measured
    pub method: StrokeMethod,
    /// Width in font units
    pub width: f64,
}

/// Per-glyph outline scores used by the style classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StyleScores {
    /// Evidence for serifs
    pub serif: u32,
    /// Evidence for a script face
    pub script: u32,
    /// Evidence for a decorative face
    pub decorative: u32,
}

/// Vertical proportions of a font
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerticalProportions {
    /// Units per em
    pub units_per_em: u16,
    /// x-height in font units
    pub x_height: Option<f64>,
    /// Cap height in font units
    pub cap_height: Option<f64>,
    /// Ascender in font units
    pub ascender: f64,
    /// Descender in font units (usually negative)
    pub descender: f64,
    /// x-height divided by units per em
    pub x_height_normalized: Option<f64>,
    /// Cap height divided by units per em
    pub cap_height_normalized: Option<f64>,
    /// Ascender divided by units per em
    pub ascender_normalized: f64,
    /// Descender divided by units per em
    pub descender_normalized: f64,
    /// Ascender minus descender
    pub total_height: f64,
    /// Ascender divided by the total height
    pub ascender_ratio: Option<f64>,
    /// Absolute descender divided by the total height
    pub descender_ratio: Option<f64>,
    /// x-height divided by cap height
    pub x_to_cap_ratio: Option<f64>,
}

/// Axis-specific measurements backing a [`FeatureRecord`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureDetail {
    /// Nothing beyond the value and label
    #[default]
    None,
    /// Outline scores of the style classifier
    Style(StyleScores),
    /// Per-glyph stroke measurements
    Stroke {
        /// Measurements, in probe order
        samples: Vec<StrokeSample>,
    },
    /// Number of glyphs whose aspect ratio was averaged
    Aspect {
        /// Glyphs measured
        glyphs: usize,
    },
    /// Point statistics of the curvature analysis
    Shape {
        /// On-curve points counted
        on_curve: usize,
        /// Off-curve points counted
        off_curve: usize,
        /// Average turn angle at on-curve points, in degrees
        average_turn: Option<f64>,
    },
    /// Keyword evidence used when no outlines are available
    ShapeKeywords {
        /// Score for curvy designs
        curvy: u32,
        /// Score for angular designs
        angular: u32,
    },
    /// Spacing averages in font units
    Spacing {
        /// Mean advance width
        average_advance: f64,
        /// Mean left side bearing
        average_lsb: f64,
        /// Number of metrics averaged
        glyphs: usize,
    },
    /// Vertical proportions
    Vertical(VerticalProportions),
    /// Number of contrast ratios averaged
    Contrast {
        /// Glyphs measured
        samples: usize,
    },
    /// Raw OS/2 classes
    DesignClass {
        /// OS/2 weight class
        weight_class: Option<u16>,
        /// OS/2 width class
        width_class: Option<u16>,
    },
}

/// The result of one analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// What was analysed
    pub kind: FeatureKind,
    /// The measured value, in its natural unit
    pub value: Option<f64>,
    /// The value relative to the em (or otherwise normalised)
    pub normalized: Option<f64>,
    /// The classification
    pub label: Label,
    /// Whether the value was inferred from metadata rather than measured
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub estimated: bool,
    /// How an estimated value was obtained, or which rule decided the label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_method: Option<SmolStr>,
    /// Why the feature is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Axis-specific measurements
    pub detail: FeatureDetail,
}

impl FeatureRecord {
    /// A record with a label and nothing else
    pub fn labelled(kind: FeatureKind, label: Label) -> Self {
        FeatureRecord {
            kind,
            value: None,
            normalized: None,
            label,
            estimated: false,
            estimation_method: None,
            reason: None,
            detail: FeatureDetail::None,
        }
    }

    /// A measured record
    pub fn measured(kind: FeatureKind, value: f64, normalized: f64, label: Label) -> Self {
        FeatureRecord {
            value: Some(value),
            normalized: Some(normalized),
            ..FeatureRecord::labelled(kind, label)
        }
    }

    /// An [`Label::Unknown`] record explaining why
    pub fn unknown(kind: FeatureKind, reason: impl Into<String>) -> Self {
        FeatureRecord::labelled(kind, Label::Unknown).with_reason(reason)
    }

    /// An [`Label::Error`] record explaining why
    pub fn error(kind: FeatureKind, reason: impl Into<String>) -> Self {
        FeatureRecord::labelled(kind, Label::Error).with_reason(reason)
    }

    /// An [`Label::Unknown`] record carrying the error's message
    pub fn from_error(kind: FeatureKind, error: &FontPersonaError) -> Self {
        FeatureRecord::unknown(kind, error.to_string())
    }

    pub(crate) fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn with_method(mut self, method: &str) -> Self {
        self.estimation_method = Some(method.into());
        self
    }

    pub(crate) fn estimated_by(mut self, method: &str) -> Self {
        self.estimated = true;
        self.with_method(method)
    }

    pub(crate) fn with_detail(mut self, detail: FeatureDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Whether the record carries a usable classification
    pub fn is_known(&self) -> bool {
        !matches!(self.label, Label::Unknown | Label::Error)
    }
}

/// The union of all feature records of one font, keyed by kind
///
/// Accessors return `None` when the record is missing or its label is not
/// of the expected kind, so that consumers can simply skip absent evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureSet(IndexMap<FeatureKind, FeatureRecord>);

impl FeatureSet {
    /// An empty set
    pub fn new() -> Self {
        FeatureSet::default()
    }

    /// Add a record, replacing any earlier record of the same kind
    pub fn insert(&mut self, record: FeatureRecord) {
        self.0.insert(record.kind, record);
    }

    /// The record of a given kind
    pub fn get(&self, kind: FeatureKind) -> Option<&FeatureRecord> {
        self.0.get(&kind)
    }

    /// All records, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.0.values()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no records
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn label(&self, kind: FeatureKind) -> Option<&Label> {
        self.get(kind).map(|r| &r.label)
    }

    /// The typographic style
    pub fn style(&self) -> Option<FontStyle> {
        match self.label(FeatureKind::Style)? {
            Label::Style(s) => Some(*s),
            _ => None,
        }
    }

    /// The weight band from the stroke width analysis
    pub fn weight(&self) -> Option<WeightBand> {
        match self.label(FeatureKind::StrokeWidth)? {
            Label::Weight(w) => Some(*w),
            _ => None,
        }
    }

    /// The width band from the aspect ratio analysis
    pub fn width(&self) -> Option<WidthBand> {
        match self.label(FeatureKind::Aspect)? {
            Label::Width(w) => Some(*w),
            _ => None,
        }
    }

    /// The name of the OS/2 width class, e.g. "Semi Condensed"
    pub fn width_descriptor(&self) -> Option<&str> {
        match self.label(FeatureKind::DesignClass)? {
            Label::DesignClass { width, .. } => Some(width.as_str()),
            _ => None,
        }
    }

    /// The curvature band
    pub fn shape(&self) -> Option<ShapeBand> {
        match self.label(FeatureKind::Shape)? {
            Label::Shape(s) => Some(*s),
            _ => None,
        }
    }

    /// The side bearing band
    pub fn bearing(&self) -> Option<BearingBand> {
        match self.label(FeatureKind::Spacing)? {
            Label::Spacing { bearing, .. } => Some(*bearing),
            _ => None,
        }
    }

    /// The vertical proportions, when they could be computed
    pub fn vertical(&self) -> Option<&VerticalProportions> {
        match &self.get(FeatureKind::VerticalMetrics)?.detail {
            FeatureDetail::Vertical(v) => Some(v),
            _ => None,
        }
    }

    /// The x-height class
    pub fn x_height_class(&self) -> Option<XHeightClass> {
        match self.label(FeatureKind::VerticalMetrics)? {
            Label::XHeight(x) => Some(*x),
            _ => None,
        }
    }

    /// The contrast band
    pub fn contrast(&self) -> Option<ContrastBand> {
        match self.label(FeatureKind::Contrast)? {
            Label::Contrast(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromIterator<FeatureRecord> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = FeatureRecord>>(iter: T) -> Self {
        let mut set = FeatureSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
