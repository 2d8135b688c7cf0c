//! Window ↔ surface coordinate mapping.
//!
//! The surface is shown inside the window at a display rectangle that may be
//! zoomed; pointer positions arrive in window pixels and must be mapped back
//! into surface cells before they reach the paint session.

use crate::types::{Point, SurfaceSize};

/// Where the surface is shown, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Map a window-space point into surface coordinates.
///
/// Degenerate (zero-sized) display rectangles map everything to the
/// surface origin offset, which the session then rejects as out of shape.
pub fn to_surface(point: Point, rect: DisplayRect, surface: SurfaceSize) -> Point {
    let sx = if rect.width > 0.0 { surface.width as f64 / rect.width } else { 0.0 };
    let sy = if rect.height > 0.0 { surface.height as f64 / rect.height } else { 0.0 };
    Point::new((point.x - rect.left) * sx, (point.y - rect.top) * sy)
}

/// Surface size and its display rectangle for a given window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub surface: SurfaceSize,
    pub display: DisplayRect,
}

impl Layout {
    /// Fit `preferred` into a window of `window` pixels at integer `zoom`.
    /// The surface never grows past `preferred`; it shrinks when the window
    /// is too small and is centered in whatever room is left.
    pub fn fit(window: (usize, usize), preferred: SurfaceSize, zoom: u32) -> Self {
        let zoom = zoom.max(1);
        let (ww, wh) = (window.0 as u32, window.1 as u32);
        let surface = SurfaceSize::new(
            (ww / zoom).min(preferred.width).max(1),
            (wh / zoom).min(preferred.height).max(1),
        );
        let dw = surface.width * zoom;
        let dh = surface.height * zoom;
        let left = ww.saturating_sub(dw) / 2;
        let top = wh.saturating_sub(dh) / 2;
        Self {
            surface,
            display: DisplayRect::new(left as f64, top as f64, dw as f64, dh as f64),
        }
    }

    /// Window size that shows `preferred` at `zoom` with a margin on every side.
    pub fn window_for(preferred: SurfaceSize, zoom: u32, margin: u32) -> (usize, usize) {
        let zoom = zoom.max(1);
        let side = |cells: u32| cells.saturating_mul(zoom).saturating_add(margin.saturating_mul(2)) as usize;
        (side(preferred.width), side(preferred.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_rect_matches_surface() {
        let rect = DisplayRect::new(0.0, 0.0, 400.0, 350.0);
        let p = to_surface(Point::new(123.0, 45.5), rect, SurfaceSize::new(400, 350));
        assert_eq!(p, Point::new(123.0, 45.5));
    }

    #[test]
    fn offset_and_scale_are_removed() {
        // surface shown at 2x, 40px from the window edges
        let rect = DisplayRect::new(40.0, 40.0, 800.0, 700.0);
        let p = to_surface(Point::new(440.0, 430.0), rect, SurfaceSize::new(400, 350));
        assert_eq!(p, Point::new(200.0, 195.0));
    }

    #[test]
    fn css_style_shrunk_display_scales_up() {
        // a 400x350 surface squeezed into 200x175 on screen
        let rect = DisplayRect::new(10.0, 20.0, 200.0, 175.0);
        let p = to_surface(Point::new(110.0, 20.0), rect, SurfaceSize::new(400, 350));
        assert_eq!(p, Point::new(200.0, 0.0));
    }

    #[test]
    fn points_left_of_rect_go_negative() {
        let rect = DisplayRect::new(50.0, 50.0, 400.0, 350.0);
        let p = to_surface(Point::new(10.0, 10.0), rect, SurfaceSize::new(400, 350));
        assert!(p.x < 0.0 && p.y < 0.0);
    }

    #[test]
    fn degenerate_rect_does_not_divide_by_zero() {
        let rect = DisplayRect::new(5.0, 5.0, 0.0, 0.0);
        let p = to_surface(Point::new(100.0, 100.0), rect, SurfaceSize::new(400, 350));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn window_size_saturates_instead_of_overflowing() {
        let (w, h) = Layout::window_for(SurfaceSize::new(u32::MAX, 10), u32::MAX, u32::MAX);
        assert_eq!(w, u32::MAX as usize);
        assert_eq!(h, u32::MAX as usize);
    }

    #[test]
    fn fit_keeps_preferred_size_in_large_window() {
        let l = Layout::fit((480, 430), SurfaceSize::new(400, 350), 1);
        assert_eq!(l.surface, SurfaceSize::new(400, 350));
        assert_eq!(l.display, DisplayRect::new(40.0, 40.0, 400.0, 350.0));
    }

    #[test]
    fn fit_shrinks_surface_in_small_window() {
        let l = Layout::fit((300, 300), SurfaceSize::new(400, 350), 1);
        assert_eq!(l.surface, SurfaceSize::new(300, 300));
        assert_eq!(l.display, DisplayRect::new(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn fit_applies_zoom() {
        let l = Layout::fit((880, 780), SurfaceSize::new(400, 350), 2);
        assert_eq!(l.surface, SurfaceSize::new(400, 350));
        assert_eq!(l.display, DisplayRect::new(40.0, 40.0, 800.0, 700.0));
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        let l = Layout::fit((0, 0), SurfaceSize::new(400, 350), 3);
        assert_eq!(l.surface, SurfaceSize::new(1, 1));
    }

    #[test]
    fn window_for_adds_margins() {
        assert_eq!(Layout::window_for(SurfaceSize::new(400, 350), 2, 40), (880, 780));
    }
}
