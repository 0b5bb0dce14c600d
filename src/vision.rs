// Frame preprocessing between the camera and the rest of the pipeline.
// After `resize_mirrored` the frame behaves like a mirror: raise your right
// hand and the pointer moves on the right side of the window.
use crate::types::FrameBuffer;

/// Nearest-neighbour resize to (width,height) with a horizontal flip.
pub fn resize_mirrored(src: &FrameBuffer, width: usize, height: usize) -> FrameBuffer {
    let mut out = FrameBuffer::blank(width, height);
    if src.width == 0 || src.height == 0 || width == 0 || height == 0 {
        return out;
    }

    // Precompute the source column for each output column (mirrored).
    let cols: Vec<usize> = (0..width)
        .map(|x| {
            let mirrored = width - 1 - x;
            (mirrored * src.width / width).min(src.width - 1)
        })
        .collect();

    for y in 0..height {
        let sy = (y * src.height / height).min(src.height - 1);
        let src_row = &src.pixels[sy * src.width..(sy + 1) * src.width];
        let dst_row = &mut out.pixels[y * width..(y + 1) * width];
        for (dst, &sx) in dst_row.iter_mut().zip(&cols) {
            *dst = src_row[sx];
        }
    }
    out
}

/// Unpack 0x00RRGGBB pixels into tightly packed RGB bytes (row-major).
pub fn to_rgb_bytes(fb: &FrameBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(fb.pixels.len() * 3);
    for &px in &fb.pixels {
        out.push(((px >> 16) & 0xFF) as u8);
        out.push(((px >> 8) & 0xFF) as u8);
        out.push((px & 0xFF) as u8);
    }
    out
}

/// Luma of one packed pixel, same weights as the usual BGR→gray conversion.
#[inline]
pub fn intensity(px: u32) -> u8 {
    let r = ((px >> 16) & 0xFF) as u32;
    let g = ((px >> 8) & 0xFF) as u32;
    let b = (px & 0xFF) as u32;
    // 0.299 R + 0.587 G + 0.114 B in 16.16 fixed point, rounded
    ((19_595 * r + 38_470 * g + 7_471 * b + 32_768) >> 16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_flips_columns() {
        let src = FrameBuffer { width: 3, height: 1, pixels: vec![1, 2, 3] };
        let out = resize_mirrored(&src, 3, 1);
        assert_eq!(out.pixels, vec![3, 2, 1]);
    }

    #[test]
    fn upscale_repeats_pixels() {
        let src = FrameBuffer { width: 2, height: 2, pixels: vec![1, 2, 3, 4] };
        let out = resize_mirrored(&src, 4, 4);
        assert_eq!(out.width, 4);
        assert_eq!(out.height, 4);
        assert_eq!(&out.pixels[0..4], &[2, 2, 1, 1]);
        assert_eq!(&out.pixels[12..16], &[4, 4, 3, 3]);
    }

    #[test]
    fn rgb_bytes_are_unpacked_in_order() {
        let fb = FrameBuffer { width: 2, height: 1, pixels: vec![0x00AA_BBCC, 0x0001_0203] };
        assert_eq!(to_rgb_bytes(&fb), vec![0xAA, 0xBB, 0xCC, 1, 2, 3]);
    }

    #[test]
    fn intensity_of_primaries() {
        assert_eq!(intensity(0x00FF_FFFF), 255);
        assert_eq!(intensity(0), 0);
        assert_eq!(intensity(0x0000_00FF), 29); // pure blue
        assert_eq!(intensity(0x00FF_0000), 76); // pure red
    }
}
