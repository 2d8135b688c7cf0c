// Window + software composition.
// Visual effects provided here:
// 1) A resizable window that shows the heart surface on a dark page.
// 2) The surface blitted with zoom and, while shaking, a jitter offset.
// 3) A tiny 5x7 bitmap font for the instruction, the HUD and the message.
// 4) Falling hearts drawn as small filled heart sprites.

use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::coords::DisplayRect;
use crate::error::Error;
use crate::heart::HeartShape;
use crate::rain::RainDrop;
use crate::types::{Color, FrameBuffer, Point};
use crate::widget::HeartWidget;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current window size in pixels; changes when the user resizes.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Cursor position in window pixels, `None` while it is outside the window.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as f64, y as f64))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// S writes a snapshot of the current frame.
    pub fn s_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}

/* ---------- Composition ---------- */

/// Blend a square block of `size` pixels at (x,y).
#[inline]
fn fill_block(fb: &mut FrameBuffer, x: i32, y: i32, size: i32, color: Color, coverage: f32) {
    for by in 0..size {
        for bx in 0..size {
            fb.blend_pixel(x + bx, y + by, color, coverage);
        }
    }
}

/// Copy `layer` into `screen` over `rect` (nearest neighbour), shifted by
/// (`dx`,`dy`) window pixels. Transparent layer pixels let the page show through.
pub fn blit_layer(screen: &mut FrameBuffer, layer: &FrameBuffer, rect: DisplayRect, dx: i32, dy: i32) {
    if layer.width == 0 || layer.height == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let sx = layer.width as f64 / rect.width;
    let sy = layer.height as f64 / rect.height;
    let left = rect.left as i32 + dx;
    let top = rect.top as i32 + dy;
    let w = rect.width as i32;
    let h = rect.height as i32;

    for ry in 0..h {
        let y = top + ry;
        if y < 0 || y as usize >= screen.height {
            continue;
        }
        let ly = ((ry as f64 * sy) as usize).min(layer.height - 1);
        for rx in 0..w {
            let x = left + rx;
            if x < 0 || x as usize >= screen.width {
                continue;
            }
            let lx = ((rx as f64 * sx) as usize).min(layer.width - 1);
            let src = Color::from_argb(layer.pixels[ly * layer.width + lx]);
            if src.a > 0 {
                fb_blend(screen, x, y, src);
            }
        }
    }
}

#[inline]
fn fb_blend(fb: &mut FrameBuffer, x: i32, y: i32, c: Color) {
    fb.blend_pixel(x, y, c, 1.0);
}

/// A small filled heart whose bounding box starts at (x,y) and spans `size` pixels.
/// Visual: one falling heart.
pub fn draw_heart_sprite(fb: &mut FrameBuffer, x: f32, y: f32, size: f32, color: Color) {
    // the parametric heart is ~36 scale units wide and ~31 tall
    let scale = size as f64 / 36.0;
    let center = Point::new(x as f64 + size as f64 / 2.0, y as f64 + size as f64 * 0.45);
    let sprite = HeartShape::new(center, scale, 0.0);
    let (x0, y0) = (x.floor() as i32, y.floor() as i32);
    let n = size.ceil() as i32;
    for py in y0..=y0 + n {
        for px in x0..=x0 + n {
            if sprite.is_inside(px as f64 + 0.5, py as f64 + 0.5) {
                fb.blend_pixel(px, py, color, 1.0);
            }
        }
    }
}

/// Everything the user sees this frame: page, surface, text, rain.
pub fn compose_frame(screen: &mut FrameBuffer, widget: &HeartWidget<FrameBuffer>, now: Duration) {
    let config = widget.config();
    let palette = config.palette;
    screen.fill(palette.background.to_argb());

    let rect = widget.display();
    let surface = widget.surface();
    let zoom = if surface.width > 0 { rect.width / surface.width as f64 } else { 1.0 };
    let (sx, sy) = widget.shake_offset(now);
    blit_layer(screen, surface, rect, (sx as f64 * zoom) as i32, (sy as f64 * zoom) as i32);

    let text_scale = (zoom.round() as i32).max(1);
    if widget.instruction_visible() {
        let y = (rect.top as i32 - 12 * text_scale).max(4);
        draw_text_centered(screen, rect, y, &config.instruction, palette.text, text_scale, 1.0);
        if config.show_hud {
            let hud_y = (rect.top + rect.height) as i32 + 4 * text_scale;
            draw_text_centered(screen, rect, hud_y, &widget.hud_text(), palette.text, text_scale, 1.0);
        }
    }

    if widget.message_visible() {
        let scale = 4 * text_scale;
        let y = (rect.top + rect.height / 2.0) as i32 - 7 * scale / 2;
        let opacity = widget.message_opacity(now);
        draw_text_centered(screen, rect, y, &config.message, palette.text, scale, opacity);
    }

    // the rain overlay covers the whole window
    let (w, h) = (screen.width as f32, screen.height as f32);
    for drop in widget.rain_drops() {
        draw_rain_drop(screen, drop, now, w, h);
    }
}

fn draw_rain_drop(screen: &mut FrameBuffer, drop: &RainDrop, now: Duration, w: f32, h: f32) {
    let (x, y) = drop.position(now, w, h);
    draw_heart_sprite(screen, x, y, drop.size_px, drop.glyph.color());
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '♥' => g!(0b00000,0b01010,0b11111,0b11111,0b01110,0b00100,0b00000),

        _ => None,
    }
}

/// Pixel width of `text` at `scale` (5 px glyph + 1 px spacing per char).
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { (n * 6 - 1) * scale }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`-sized block.
/// Visual: a glyph with a one-block black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color, scale: i32, opacity: f32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by one block in black
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    let (px, py) = (x + rx * scale + scale, y + ry as i32 * scale + scale);
                    fill_block(fb, px, py, scale, Color::rgb(0, 0, 0), 0.6 * opacity);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    fill_block(fb, x + rx * scale, y + ry as i32 * scale, scale, color, opacity);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color, scale: i32, opacity: f32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale, opacity);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Draw `text` horizontally centered on `rect` at window row `y`.
pub fn draw_text_centered(fb: &mut FrameBuffer, rect: DisplayRect, y: i32, text: &str, color: Color, scale: i32, opacity: f32) {
    let x = (rect.left + rect.width / 2.0) as i32 - text_width(text, scale) / 2;
    draw_text_5x7(fb, x, y, text, color, scale, opacity);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> usize {
        fb.pixels.iter().filter(|p| **p & 0x00FF_FFFF != 0).count()
    }

    #[test]
    fn every_message_letter_has_a_glyph() {
        for ch in "SCRATCH THE HEART I LOVE YOU FILLED 100% ♥".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
        assert!(glyph5x7('a').is_some());
        assert!(glyph5x7('~').is_none());
    }

    #[test]
    fn text_width_counts_spacing() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 2), 22);
    }

    #[test]
    fn text_scale_draws_blocks() {
        let mut fb = FrameBuffer::new(20, 20);
        draw_text_5x7(&mut fb, 0, 0, "I", Color::WHITE, 2, 1.0);
        // top bar of 'I' is columns 1..=3, two pixels per font pixel
        assert_eq!(fb.get(2, 0).map(|p| p & 0x00FF_FFFF), Some(0x00FF_FFFF));
        assert_eq!(fb.get(0, 0), Some(0));
    }

    #[test]
    fn blit_scales_and_offsets() {
        let mut layer = FrameBuffer::new(2, 1);
        layer.pixels = vec![0xFFFF_0000, 0];
        let mut screen = FrameBuffer::new(10, 10);
        screen.fill(0xFF00_0000);
        blit_layer(&mut screen, &layer, DisplayRect::new(2.0, 3.0, 4.0, 2.0), 1, 0);
        // left layer pixel covers 2x2 window pixels starting at (3,3)
        assert_eq!(screen.get(3, 3), Some(0xFFFF_0000));
        assert_eq!(screen.get(4, 4), Some(0xFFFF_0000));
        // transparent right pixel shows the page
        assert_eq!(screen.get(5, 3), Some(0xFF00_0000));
        assert_eq!(screen.get(2, 3), Some(0xFF00_0000));
    }

    #[test]
    fn heart_sprite_stays_in_its_box() {
        let mut fb = FrameBuffer::new(40, 40);
        draw_heart_sprite(&mut fb, 10.0, 10.0, 20.0, Color::rgb(255, 0, 0));
        assert!(lit(&fb) > 100);
        for y in 0..40 {
            for x in 0..40 {
                if fb.get(x, y).is_some_and(|p| p != 0) {
                    assert!((10..=31).contains(&x) && (10..=31).contains(&y), "({x},{y})");
                }
            }
        }
    }
}
