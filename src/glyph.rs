use serde::Serialize;
use std::fmt;

/// Identifier of a glyph within its font
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct GlyphId(pub u32);

impl GlyphId {
    /// Create a new glyph identifier
    pub fn new(id: u32) -> Self {
        GlyphId(id)
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gid{}", self.0)
    }
}

/// A point of a glyph outline, in font design units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutlinePoint {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
    /// Whether the point lies on the rendered outline (as opposed to a control point)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub on_curve: bool,
}

impl OutlinePoint {
    /// An on-curve point
    pub fn on(x: i32, y: i32) -> Self {
        OutlinePoint {
            x,
            y,
            on_curve: true,
        }
    }

    /// An off-curve (control) point
    pub fn off(x: i32, y: i32) -> Self {
        OutlinePoint {
            x,
            y,
            on_curve: false,
        }
    }

    pub(crate) fn distance_to(&self, other: &OutlinePoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One closed loop of points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contour {
    /// The points of the contour, in drawing order
    pub points: Vec<OutlinePoint>,
}

impl Contour {
    /// Create a contour from its points
    pub fn new(points: Vec<OutlinePoint>) -> Self {
        Contour { points }
    }

    /// A contour made only of on-curve points
    ///
    /// ```rust
    /// use fontpersona::Contour;
    /// let square = Contour::polygon(&[(0, 0), (100, 0), (100, 100), (0, 100)]);
    /// assert_eq!(square.points.len(), 4);
    /// assert!(square.points.iter().all(|p| p.on_curve));
    /// ```
    pub fn polygon(coords: &[(i32, i32)]) -> Self {
        Contour {
            points: coords.iter().map(|&(x, y)| OutlinePoint::on(x, y)).collect(),
        }
    }

    /// The mean of the contour's points
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let sx: f64 = self.points.iter().map(|p| p.x as f64).sum();
        let sy: f64 = self.points.iter().map(|p| p.y as f64).sum();
        Some((sx / n, sy / n))
    }

    /// Average distance of the contour's points from its centroid
    pub fn mean_radius(&self) -> Option<f64> {
        let (cx, cy) = self.centroid()?;
        let total: f64 = self
            .points
            .iter()
            .map(|p| ((p.x as f64 - cx).powi(2) + (p.y as f64 - cy).powi(2)).sqrt())
            .sum();
        Some(total / self.points.len() as f64)
    }
}

/// Axis-aligned bounding box of a glyph, in font design units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    /// Minimum x
    pub x_min: i32,
    /// Maximum x
    pub x_max: i32,
    /// Minimum y
    pub y_min: i32,
    /// Maximum y
    pub y_max: i32,
}

impl BoundingBox {
    /// Compute the bounding box of a set of points, if there are any
    pub fn of<'a>(points: impl IntoIterator<Item = &'a OutlinePoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in iter {
            bbox.x_min = bbox.x_min.min(p.x);
            bbox.x_max = bbox.x_max.max(p.x);
            bbox.y_min = bbox.y_min.min(p.y);
            bbox.y_max = bbox.y_max.max(p.y);
        }
        Some(bbox)
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min) as f64
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min) as f64
    }

    /// Width divided by height, or `None` for a flat box
    pub fn aspect_ratio(&self) -> Option<f64> {
        let height = self.height();
        (height > 0.0).then(|| self.width() / height)
    }

    /// Whether the box encloses no area
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// A glyph together with the character it was looked up for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphSample {
    /// The character this glyph was resolved from, if any
    pub character: Option<char>,
    /// The glyph identifier
    pub glyph_id: GlyphId,
    /// The outline
    pub contours: Vec<Contour>,
    /// Bounding box of all points (on- and off-curve)
    pub bbox: Option<BoundingBox>,
}

impl GlyphSample {
    /// Build a sample, deriving its bounding box from the outline
    pub fn new(character: Option<char>, glyph_id: GlyphId, contours: Vec<Contour>) -> Self {
        let bbox = BoundingBox::of(contours.iter().flat_map(|c| c.points.iter()));
        GlyphSample {
            character,
            glyph_id,
            contours,
            bbox,
        }
    }

    /// Number of contours
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// All points of all contours, in order
    pub fn points(&self) -> impl Iterator<Item = &OutlinePoint> + '_ {
        self.contours.iter().flat_map(|c| c.points.iter())
    }

    /// Total number of points
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }

    /// All on-curve points of all contours, in order
    pub fn on_curve_points(&self) -> Vec<&OutlinePoint> {
        self.points().filter(|p| p.on_curve).collect()
    }

    /// A glyph with no contours or a zero-area bounding box; excluded from measurement
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty() || self.bbox.is_none_or(|b| b.is_degenerate())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_bbox_and_emptiness() {
        let glyph = GlyphSample::new(
            Some('I'),
            GlyphId(3),
            vec![Contour::polygon(&[(10, 0), (90, 0), (90, 700), (10, 700)])],
        );
        let bbox = glyph.bbox.unwrap();
        assert_eq!(bbox.width(), 80.0);
        assert_eq!(bbox.height(), 700.0);
        assert!(!glyph.is_empty());

        let flat = GlyphSample::new(None, GlyphId(4), vec![Contour::polygon(&[(0, 0), (100, 0)])]);
        assert!(flat.is_empty());

        let space = GlyphSample::new(Some(' '), GlyphId(1), vec![]);
        assert!(space.is_empty());
        assert!(space.bbox.is_none());
    }

    #[test]
    fn test_mean_radius() {
        let diamond = Contour::polygon(&[(1000, 500), (500, 1000), (0, 500), (500, 0)]);
        assert_eq!(diamond.centroid(), Some((500.0, 500.0)));
        assert_eq!(diamond.mean_radius(), Some(500.0));
        assert_eq!(Contour::default().mean_radius(), None);
    }
}
