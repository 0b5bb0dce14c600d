// Paint the canvas strokes over the live frame.
// Pixels whose canvas intensity passes the ink threshold show the stroke colour
// opaquely; every other pixel keeps the live video.
use crate::error::Error;
use crate::types::FrameBuffer;
use crate::vision::intensity;

/// Canvas intensity above this counts as ink.
pub const INK_THRESHOLD: u8 = 20;

const KEEP: u32 = 0x00FF_FFFF;

/// Per-pixel mask: 0 under ink, all ones elsewhere (replicated over the three channels).
pub fn ink_mask(canvas: &FrameBuffer) -> Vec<u32> {
    canvas
        .pixels
        .iter()
        .map(|&px| if intensity(px) > INK_THRESHOLD { 0 } else { KEEP })
        .collect()
}

/// `frame = (frame AND mask) OR canvas`, in place.
pub fn composite(frame: &mut FrameBuffer, canvas: &FrameBuffer) -> Result<(), Error> {
    if !frame.same_size(canvas) {
        return Err(Error::FrameSize(format!(
            "composite: frame {}x{} vs canvas {}x{}",
            frame.width, frame.height, canvas.width, canvas.height
        )));
    }

    let mask = ink_mask(canvas);
    for ((live, &m), &ink) in frame.pixels.iter_mut().zip(&mask).zip(&canvas.pixels) {
        *live = (*live & m) | ink;
    }
    Ok(())
}
