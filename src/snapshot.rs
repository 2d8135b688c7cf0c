// Saves what is on screen as a PNG.
// Visual expectation: the written file looks exactly like the window at the
// moment S was pressed (background, heart, text and falling hearts).

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::Error;
use crate::types::FrameBuffer;

/// Unpack 0x00RRGGBB pixels into an RGB image (alpha is ignored).
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    })
}

/// Write `fb` as a PNG at `path`.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_rgb_image(fb).save_with_format(path, image::ImageFormat::Png)?;
    log::info!("snapshot written to {}", path.display());
    Ok(())
}
