// Core pixel types shared by the camera, the canvas and the window.

/// A frame (or the drawing canvas) as packed pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// All-zero (black) buffer. This is also the "nothing drawn" canvas state.
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pixel at (x,y), or None when outside the buffer.
    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Reset every pixel to zero.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Three-channel colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB.
    #[inline]
    pub fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub fn from_pixel(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

/// Pixel coordinate in frame space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_packs_as_rrggbb() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_pixel(), 0x0012_3456);
        assert_eq!(Color::from_pixel(0x00AB_CDEF), Color::new(0xAB, 0xCD, 0xEF));
    }

    #[test]
    fn get_is_bounds_checked() {
        let mut fb = FrameBuffer::blank(4, 3);
        fb.pixels[2 * 4 + 3] = 7;
        assert_eq!(fb.get(3, 2), Some(7));
        assert_eq!(fb.get(4, 2), None);
        assert_eq!(fb.get(-1, 0), None);
    }

    #[test]
    fn clear_zeroes_every_pixel() {
        let mut fb = FrameBuffer::blank(3, 3);
        fb.pixels.fill(0x00FF_FFFF);
        assert!(!fb.is_blank());
        fb.clear();
        assert!(fb.is_blank());
    }
}
