// Drawing surface abstraction + the software rasterizer behind it.
// Visual effects provided here:
// 1) Filled polygons (the pink heart, the dissolving red heart).
// 2) Thick outlines with a soft drop shadow (the white border).
// 3) Small filled squares (every scratched cell).

use crate::types::{blend_over, Color, FrameBuffer, Mask, Point, SurfaceSize};

/// Drop shadow drawn under a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub shadow: Option<Shadow>,
}

/// The canvas the widget paints on. Everything the session and the
/// sequencer render goes through these calls.
pub trait Surface {
    fn size(&self) -> SurfaceSize;
    /// Change the size; the content is discarded.
    fn resize(&mut self, size: SurfaceSize);
    /// Make every pixel transparent.
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);
    /// Fill a closed polygon (even-odd rule).
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    /// Stroke a closed polygon.
    fn stroke_polygon(&mut self, points: &[Point], style: &StrokeStyle);
}

impl FrameBuffer {
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.pixels[idx] = blend_over(self.pixels[idx], color, coverage);
    }

    /// Blend `color` everywhere the mask has coverage.
    fn blend_mask(&mut self, mask: &Mask, color: Color) {
        for (px, &a) in self.pixels.iter_mut().zip(mask.alpha.iter()) {
            if a > 0.0 {
                *px = blend_over(*px, color, a);
            }
        }
    }
}

/// Stamp a round brush into the mask. Inside `core` coverage is full; beyond it
/// coverage falls off over `feather` pixels (Gaussian when feathered, one-pixel
/// anti-aliased edge otherwise).
fn stamp_disc(mask: &mut Mask, cx: f64, cy: f64, core: f64, feather: f64) {
    let reach = core + feather.max(1.0);
    let x0 = (cx - reach).floor() as i32;
    let x1 = (cx + reach).ceil() as i32;
    let y0 = (cy - reach).floor() as i32;
    let y1 = (cy + reach).ceil() as i32;
    let sigma = feather * 0.5;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let a = if d <= core {
                1.0
            } else if feather > 0.0 {
                let t = d - core;
                if t > feather { 0.0 } else { (-(t * t) / (2.0 * sigma * sigma)).exp() }
            } else {
                (core + 0.5 - d).clamp(0.0, 1.0)
            };
            if a > 0.0 {
                mask.raise(x, y, a as f32);
            }
        }
    }
}

/// Stamp discs along every edge of a closed polyline, every half pixel.
fn stamp_polyline(mask: &mut Mask, points: &[Point], dx: f64, dy: f64, core: f64, feather: f64) {
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ex, ey) = (b.x - a.x, b.y - a.y);
        let len = (ex * ex + ey * ey).sqrt();
        let steps = ((len / 0.5).ceil() as usize).max(1);
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            stamp_disc(mask, a.x + ex * t + dx, a.y + ey * t + dy, core, feather);
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width as u32, self.height as u32)
    }

    fn resize(&mut self, size: SurfaceSize) {
        *self = FrameBuffer::new(size.width as usize, size.height as usize);
    }

    fn clear(&mut self) {
        self.fill(0);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        let x_end = (x + w as i32).min(self.width as i32);
        let y_end = (y + h as i32).min(self.height as i32);
        for py in y.max(0)..y_end {
            for px in x.max(0)..x_end {
                self.blend_pixel(px, py, color, 1.0);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let row0 = (min_y.floor() as i32).max(0);
        let row1 = (max_y.ceil() as i32).min(self.height as i32 - 1);

        let n = points.len();
        let mut xs: Vec<f64> = Vec::new();
        for y in row0..=row1 {
            // sample at pixel centers
            let yc = y as f64 + 0.5;
            xs.clear();
            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];
                if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                    xs.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for span in xs.chunks_exact(2) {
                let start = ((span[0] - 0.5).ceil() as i32).max(0);
                let end = ((span[1] - 0.5).ceil() as i32).min(self.width as i32);
                for x in start..end {
                    self.blend_pixel(x, y, color, 1.0);
                }
            }
        }
    }

    fn stroke_polygon(&mut self, points: &[Point], style: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        let core = (style.width * 0.5).max(0.5);

        if let Some(shadow) = style.shadow {
            let mut mask = Mask::new(self.width, self.height);
            stamp_polyline(&mut mask, points, shadow.offset_x, shadow.offset_y, core, shadow.blur);
            self.blend_mask(&mask, shadow.color);
        }

        let mut mask = Mask::new(self.width, self.height);
        stamp_polyline(&mut mask, points, 0.0, 0.0, core, 0.0);
        self.blend_mask(&mask, style.color);
    }
}
