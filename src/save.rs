// Write the canvas (strokes only, no video) to a lossless image file.
use crate::error::Error;
use crate::types::{Color, FrameBuffer};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;
use tracing::info;

pub const DEFAULT_OUTPUT: &str = "board_drawing.png";

/// Convert the packed canvas into an RGB image.
pub fn canvas_image(canvas: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(canvas.width as u32, canvas.height as u32, |x, y| {
        let c = Color::from_pixel(canvas.pixels[y as usize * canvas.width + x as usize]);
        Rgb([c.r, c.g, c.b])
    })
}

/// Format follows the file extension (PNG for the default name).
pub fn save_canvas(canvas: &FrameBuffer, path: &Path) -> Result<(), Error> {
    canvas_image(canvas)
        .save(path)
        .map_err(|source| Error::Save { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), "canvas saved");
    Ok(())
}
