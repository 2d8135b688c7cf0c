//! Heart geometry: the membership oracle, the drawn outline and the
//! enumeration of paintable cells.
//!
//! Membership uses the implicit heart curve
//! `(x² + y² − 1)³ − x²·y³ = 0` in a y-up frame normalized by the heart's
//! scale. A point is inside when the left-hand side is at most the
//! `tightening` constant; a negative tightening pulls the usable region
//! slightly inward from the curve so marks never touch the visual border.

use std::collections::HashSet;
use std::f64::consts::TAU;

use crate::types::{Cell, Point, SurfaceSize};

/// Vertical offset of the heart center below the surface's geometric center.
pub const CENTER_DROP: f64 = 20.0;

/// Parameter step used when tracing the outline.
pub const OUTLINE_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartShape {
    center: Point,
    scale: f64,
    tightening: f64,
}

impl HeartShape {
    pub const fn new(center: Point, scale: f64, tightening: f64) -> Self {
        Self { center, scale, tightening }
    }

    /// Heart for a surface of `size`. The scale shrinks with the surface so the
    /// heart keeps its proportion to `reference` (the size `base_scale` is tuned for).
    pub fn fitted(size: SurfaceSize, reference: SurfaceSize, base_scale: f64, tightening: f64) -> Self {
        let center = Point::new(
            size.width as f64 / 2.0,
            size.height as f64 / 2.0 + CENTER_DROP,
        );
        let fx = size.width as f64 / reference.width.max(1) as f64;
        let fy = size.height as f64 / reference.height.max(1) as f64;
        Self::new(center, base_scale * fx.min(fy), tightening)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Same heart grown (or shrunk) about its center.
    pub fn scaled(&self, factor: f64) -> Self {
        Self { scale: self.scale * factor, ..*self }
    }

    /// Left-hand side of the implicit curve at (x,y); 0 on the curve, negative inside.
    #[inline]
    pub fn equation(&self, x: f64, y: f64) -> f64 {
        let rel_x = (x - self.center.x) / (self.scale * 16.0);
        // surface y grows downward, the curve is y-up
        let rel_y = -(y - self.center.y) / (self.scale * 13.0);
        let r = rel_x * rel_x + rel_y * rel_y - 1.0;
        r * r * r - rel_x * rel_x * rel_y * rel_y * rel_y
    }

    /// The membership oracle.
    #[inline]
    pub fn is_inside(&self, x: f64, y: f64) -> bool {
        self.equation(x, y) <= self.tightening
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.is_inside(p.x, p.y)
    }

    #[inline]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        self.is_inside(cell.x as f64, cell.y as f64)
    }

    /// Closed outline of the drawn silhouette (the classic parametric heart).
    /// Visual: this is the pink shape and its white border.
    pub fn outline(&self, step: f64) -> Vec<Point> {
        let s = self.scale;
        let mut pts = Vec::with_capacity((TAU / step) as usize + 2);
        let mut t = 0.0_f64;
        while t <= TAU {
            let sin = t.sin();
            let x = self.center.x + s * (16.0 * sin * sin * sin);
            let y = self.center.y
                - s * (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
            pts.push(Point::new(x, y));
            t += step;
        }
        pts
    }

    /// Every cell of `size` that passes the oracle.
    pub fn shape_cells(&self, size: SurfaceSize) -> HashSet<Cell> {
        let mut cells = HashSet::new();
        for x in 0..size.width as i32 {
            for y in 0..size.height as i32 {
                let cell = Cell::new(x, y);
                if self.contains_cell(cell) {
                    cells.insert(cell);
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> HeartShape {
        let size = SurfaceSize::new(400, 350);
        HeartShape::fitted(size, size, 6.0, -0.05)
    }

    #[test]
    fn fitted_heart_is_centered_below_middle() {
        let h = classic();
        assert_eq!(h.center(), Point::new(200.0, 195.0));
        assert_eq!(h.scale(), 6.0);
    }

    #[test]
    fn center_is_inside() {
        let h = classic();
        assert!(h.is_inside(200.0, 195.0));
    }

    #[test]
    fn far_outside_generous_box_is_outside() {
        let h = classic();
        // the curve spans |rel_x| < 1.2 and -1 < rel_y < 1.3; use twice that
        let half_w = 2.0 * 1.2 * 16.0 * 6.0;
        let up = 2.0 * 1.3 * 13.0 * 6.0;
        let down = 2.0 * 1.0 * 13.0 * 6.0;
        for i in -20..=20 {
            let t = i as f64 / 20.0;
            // left and right walls
            assert!(!h.is_inside(200.0 - half_w - 1.0, 195.0 + t * 400.0));
            assert!(!h.is_inside(200.0 + half_w + 1.0, 195.0 + t * 400.0));
            // top and bottom walls
            assert!(!h.is_inside(200.0 + t * 400.0, 195.0 - up - 1.0));
            assert!(!h.is_inside(200.0 + t * 400.0, 195.0 + down + 1.0));
        }
    }

    #[test]
    fn symmetric_about_vertical_axis() {
        let h = classic();
        for d in 0..130 {
            for y in (60..300).step_by(3) {
                let d = d as f64 + 0.25;
                let y = y as f64;
                assert_eq!(h.is_inside(200.0 + d, y), h.is_inside(200.0 - d, y), "d={d} y={y}");
            }
        }
    }

    #[test]
    fn curve_points_are_excluded_by_tightening() {
        let h = classic();
        // rel (1, 0) lies exactly on the implicit curve
        assert_eq!(h.equation(296.0, 195.0), 0.0);
        assert!(!h.is_inside(296.0, 195.0));
        assert!(!h.is_inside(104.0, 195.0));
    }

    #[test]
    fn tightening_is_tunable() {
        let loose = HeartShape::new(Point::new(200.0, 195.0), 6.0, 0.0);
        assert!(loose.is_inside(296.0, 195.0));
        let tight = HeartShape::new(Point::new(200.0, 195.0), 6.0, -0.5);
        let classic_cells = classic().shape_cells(SurfaceSize::new(400, 350)).len();
        let tight_cells = tight.shape_cells(SurfaceSize::new(400, 350)).len();
        assert!(tight_cells < classic_cells);
    }

    #[test]
    fn lobes_are_inside_notch_is_not() {
        let h = classic();
        // upper lobes
        assert!(h.is_inside(150.0, 150.0));
        assert!(h.is_inside(250.0, 150.0));
        // the notch between the lobes at the top
        assert!(!h.is_inside(200.0, 105.0));
        // the bottom tip is below the center
        assert!(h.is_inside(200.0, 250.0));
        assert!(!h.is_inside(200.0, 280.0));
    }

    #[test]
    fn shape_cells_match_oracle() {
        let h = classic();
        let size = SurfaceSize::new(400, 350);
        let cells = h.shape_cells(size);
        assert!(cells.len() > 15_000 && cells.len() < 30_000, "{}", cells.len());
        assert!(cells.iter().all(|c| h.contains_cell(*c) && size.contains(c.x, c.y)));
        assert!(cells.contains(&Cell::new(200, 195)));
    }

    #[test]
    fn shape_cells_are_clipped_to_surface() {
        let h = HeartShape::new(Point::new(0.0, 0.0), 6.0, -0.05);
        let cells = h.shape_cells(SurfaceSize::new(50, 50));
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|c| c.x >= 0 && c.y >= 0 && c.x < 50 && c.y < 50));
    }

    #[test]
    fn outline_is_closed_loop_around_center() {
        let h = classic();
        let pts = h.outline(OUTLINE_STEP);
        assert_eq!(pts.len(), 629);
        // t = 0 starts at the top notch
        assert!((pts[0].x - 200.0).abs() < 1e-9);
        assert!((pts[0].y - (195.0 - 30.0)).abs() < 1e-9);
        let max_x = pts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((max_x - 296.0).abs() < 0.1);
    }

    #[test]
    fn scaled_heart_grows_about_center() {
        let h = classic().scaled(2.0);
        assert_eq!(h.center(), Point::new(200.0, 195.0));
        assert_eq!(h.scale(), 12.0);
        assert!(h.is_inside(296.0, 195.0));
    }

    #[test]
    fn smaller_surface_gets_smaller_heart() {
        let reference = SurfaceSize::new(400, 350);
        let h = HeartShape::fitted(SurfaceSize::new(300, 300), reference, 6.0, -0.05);
        assert_eq!(h.center(), Point::new(150.0, 170.0));
        assert_eq!(h.scale(), 4.5);
    }
}
