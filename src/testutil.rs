use crate::{Contour, OutlinePoint};

/// A regular polygon of `n` on-curve points, mirror symmetric about both axes
pub(crate) fn ring(cx: i32, cy: i32, r: i32, n: usize) -> Contour {
    let step = std::f64::consts::TAU / n as f64;
    Contour::new(
        (0..n)
            .map(|k| {
                let theta = step * k as f64 + step / 2.0;
                OutlinePoint::on(
                    cx + (r as f64 * theta.cos()).round() as i32,
                    cy + (r as f64 * theta.sin()).round() as i32,
                )
            })
            .collect(),
    )
}

/// An axis-aligned rectangle of four on-curve points
pub(crate) fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
    Contour::polygon(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}
