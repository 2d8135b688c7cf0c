// Core types shared by the geometry, the paint session and the renderer.

/// Width/height of a drawing surface in cells (one cell = one pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when (x,y) is a cell of this surface.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// A point in surface coordinates (fractional, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One discrete, paintable coordinate of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with its alpha multiplied by `opacity` (clamped to [0,1]).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Pack as 0xAARRGGBB (minifb ignores the top byte).
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb(px: u32) -> Self {
        Self {
            a: (px >> 24) as u8,
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }
}

/// Source-over blend of `src` (scaled by `coverage`) onto the packed pixel `dst`.
/// Visual: a semi-transparent colour tints whatever is already on the surface.
#[inline]
pub fn blend_over(dst: u32, src: Color, coverage: f32) -> u32 {
    let sa = (src.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    if sa >= 1.0 {
        return src.to_argb() | 0xFF00_0000;
    }
    let d = Color::from_argb(dst);
    let da = d.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return 0;
    }
    let mix = |s: u8, d: u8| -> u8 {
        ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Color {
        r: mix(src.r, d.r),
        g: mix(src.g, d.g),
        b: mix(src.b, d.b),
        a: (out_a * 255.0).round() as u8,
    }
    .to_argb()
}

/// A packed pixel buffer: the drawing surface (ARGB, may be transparent)
/// or the window frame (alpha ignored).
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the buffer is (pixels)
    pub height: usize,     // how tall the buffer is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0xAARRGGBB
}

impl FrameBuffer {
    /// Fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels {
            *p = color;
        }
    }
}

/// Coverage mask in [0,1] per pixel; 1 = fully painted by the current stroke.
/// Visual: unseen directly; it decides how strongly a stroke colour lands on each pixel.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>, // length = width * height
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }

    /// Raise coverage at (x,y) to at least `a`; overlapping stamps do not stack.
    #[inline]
    pub fn raise(&mut self, x: i32, y: i32, a: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if a > self.alpha[idx] {
            self.alpha[idx] = a.min(1.0);
        }
    }
}
