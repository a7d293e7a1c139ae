//! Named constants shared by the analyzers
//!
//! Probe sets, band thresholds and correction factors. Everything is
//! expressed relative to the em unless the name says otherwise.

/// Characters sampled by the style classifier
pub const STYLE_PROBES: &[char] = &['I', 'a', 'o', 'g', 'e'];
/// Characters sampled by the stroke width estimator
pub const STROKE_PROBES: &[char] = &['H', 'I', 'O', 'n', 'o', 'l'];
/// Characters sampled by the aspect ratio classifier
pub const ASPECT_PROBES: &[char] = &['m', 'w', 'o', 'H', 'O'];
/// Characters sampled by the curvature classifier
pub const SHAPE_PROBES: &[char] = &['a', 'e', 'o', 'n', 'h', 'm', 'v', 'w', 's', 'c', 'z', 'k'];
/// Characters sampled by the contrast analyzer
pub const CONTRAST_PROBES: &[char] = &['O', 'o', 'B', 'b', 'D', 'd'];

/// Share of a straight stem's bounding box taken as the stroke
pub const STEM_CORRECTION: f64 = 0.85;
/// A stem taller than this many widths is measured at its full width
pub const SLENDER_STEM_RATIO: f64 = 5.0;
/// A glyph narrower than this share of its height is a vertical stroke
pub const VERTICAL_STROKE_ASPECT: f64 = 0.4;
/// Aspect ratio range (exclusive) in which a two-contour glyph counts as a ring
pub const CIRCULAR_ASPECT: (f64, f64) = (0.8, 1.2);
/// On-curve points sampled for the nearest-neighbour stroke estimate
pub const COMPLEX_SAMPLE_POINTS: usize = 20;

/// Stroke width bands; a value on an edge belongs to the lighter band
pub const STROKE_BANDS: &[(f64, crate::WeightBand)] = &[
    (0.05, crate::WeightBand::Thin),
    (0.07, crate::WeightBand::Light),
    (0.09, crate::WeightBand::Regular),
    (0.12, crate::WeightBand::Medium),
    (0.15, crate::WeightBand::Bold),
    (0.18, crate::WeightBand::ExtraBold),
];
/// Divisor turning an OS/2 weight class into a normalised stroke width
pub const WEIGHT_CLASS_DIVISOR: f64 = 9000.0;

/// Aspect ratio upper bound of condensed designs
pub const CONDENSED_BELOW: f64 = 0.7;
/// Aspect ratio upper bound of normal designs
pub const NORMAL_BELOW: f64 = 1.0;

/// Average turn angle, in degrees, above which the shape band moves toward angular
pub const SHARP_TURN_DEGREES: f64 = 60.0;
/// Keyword bonus from the PANOSE letterform digit
pub const LETTERFORM_BONUS: u32 = 2;

/// Share of a round glyph's width and height taken as its strokes
pub const ROUND_STROKE_SHARE: f64 = 0.15;
/// Share of a bowl glyph's width taken as its vertical stroke
pub const BOWL_STEM_SHARE: f64 = 0.2;
/// Share of a bowl glyph's height taken as its horizontal stroke
pub const BOWL_BAR_SHARE: f64 = 0.1;

/// Ascender ratio above which ascenders count as tall
pub const TALL_ASCENDER_RATIO: f64 = 0.7;
/// Descender ratio above which descenders count as deep
pub const DEEP_DESCENDER_RATIO: f64 = 0.3;
