// Window + software drawing utilities.
// Provided here:
// 1) A window that shows the composited frame, plus the keyboard/mouse polling we need.
// 2) Pixel, line, thick line and filled circle primitives on a FrameBuffer.
// 3) A tiny 5x7 bitmap font (scalable) for button labels and the FPS counter.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the frame.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Cap how often `present` returns (pose viewer pacing).
    pub fn set_target_fps(&mut self, fps: usize) {
        self.window.set_target_fps(fps);
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

    /// Quit signal: Q or ESC held down.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0) as i32, y.max(0.0) as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }
}

/* ---------- Software drawing: pixels, lines, discs ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Walk the Bresenham path from `a` to `b`, calling `plot` on every step (ends included).
fn walk_line(a: Point, b: Point, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Thin 1-pixel line.
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, color: u32) {
    walk_line(a, b, |x, y| put_pixel(fb, x, y, color));
}

/// Solid disc of `radius` pixels centred at `c`. Radius 0 is a single pixel.
pub fn fill_circle(fb: &mut FrameBuffer, c: Point, radius: i32, color: u32) {
    let r = radius.max(0);
    let r2 = r * r;
    for y in (c.y - r)..=(c.y + r) {
        for x in (c.x - r)..=(c.x + r) {
            let (dx, dy) = (x - c.x, y - c.y);
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Line `thickness` pixels wide with round caps (a disc stamped along the path).
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: u32) {
    let radius = (thickness / 2) as i32;
    if radius == 0 {
        draw_line(fb, a, b, color);
        return;
    }
    walk_line(a, b, |x, y| fill_circle(fb, Point::new(x, y), radius, color));
}

/* ---------- 5x7 bitmap font ---------- */

const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
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

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Fill one `scale`x`scale` block per glyph bit, offset by (x,y).
fn blit_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], scale: i32, color: u32) {
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let (bx, by) = (x + rx * scale, y + ry as i32 * scale);
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, bx + sx, by + sy, color);
                }
            }
        }
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-step black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        blit_glyph(fb, x + scale, y + scale, &rows, scale, 0x00000000);
        blit_glyph(fb, x, y, &rows, scale, color);
    }
}

/// Pixel size (w,h) of `text` at `scale`.
pub fn text_size(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    if n == 0 {
        return (0, 0);
    }
    let advance = (GLYPH_W + 1) * scale;
    (n * advance - scale, GLYPH_H * scale)
}

/// Draw a text string with its top-left corner at (x,y).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += (GLYPH_W + 1) * scale; // glyph width + 1 step spacing
    }
}
