// Rectangular on-screen controls: buttons, swatches and the whiteboard itself.
// A region is translucent at rest and turns solid while it is being triggered.
use crate::draw::{draw_text_5x7, text_size};
use crate::types::{Color, FrameBuffer, Point};

/// Resting overlay: half live video, half fill colour.
pub const RESTING_ALPHA: f32 = 0.5;
/// Fully highlighted: the fill colour covers the video.
pub const ACTIVE_ALPHA: f32 = 0.0;

const LABEL_SCALE: i32 = 2;
const LABEL_COLOR: u32 = 0x00FF_FFFF;

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub color: Color,
    pub label: String,
    /// Weight of the background in [0,1].
    pub alpha: f32,
}

impl Region {
    pub fn new(x: i32, y: i32, w: i32, h: i32, color: Color) -> Self {
        debug_assert!(w > 0 && h > 0, "region size must be positive");
        Self { x, y, w, h, color, label: String::new(), alpha: RESTING_ALPHA }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Strictly inside: points on the border do not count.
    pub fn hit(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x + self.w && self.y < p.y && p.y < self.y + self.h
    }

    /// Set the per-frame feedback alpha.
    pub fn highlight(&mut self, active: bool) {
        self.alpha = if active { ACTIVE_ALPHA } else { RESTING_ALPHA };
    }

    #[cfg(test)]
    pub fn is_highlighted(&self) -> bool {
        self.alpha == ACTIVE_ALPHA
    }

    /// Blend the fill into `fb` as `alpha*background + (1-alpha)*fill`, then draw the centred label.
    pub fn render(&self, fb: &mut FrameBuffer) {
        let x0 = (self.x.max(0) as usize).min(fb.width);
        let y0 = (self.y.max(0) as usize).min(fb.height);
        let x1 = ((self.x + self.w).max(0) as usize).clamp(x0, fb.width);
        let y1 = ((self.y + self.h).max(0) as usize).clamp(y0, fb.height);

        let a = self.alpha.clamp(0.0, 1.0);
        let inv = 1.0 - a;
        let fill = [self.color.r as f32, self.color.g as f32, self.color.b as f32];

        for y in y0..y1 {
            let row = &mut fb.pixels[y * fb.width + x0..y * fb.width + x1];
            for px in row {
                let bg = Color::from_pixel(*px);
                let mix = |b: u8, f: f32| (a * b as f32 + inv * f).round().clamp(0.0, 255.0) as u8;
                *px = Color::new(mix(bg.r, fill[0]), mix(bg.g, fill[1]), mix(bg.b, fill[2])).to_pixel();
            }
        }

        if !self.label.is_empty() {
            let (tw, th) = text_size(&self.label, LABEL_SCALE);
            let tx = self.x + self.w / 2 - tw / 2;
            let ty = self.y + self.h / 2 - th / 2;
            draw_text_5x7(fb, tx, ty, &self.label, LABEL_SCALE, LABEL_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_excludes_the_border() {
        let r = Region::new(200, 0, 100, 100, Color::WHITE);
        assert!(r.hit(Point::new(250, 50)));
        assert!(!r.hit(Point::new(200, 0)));
        assert!(!r.hit(Point::new(300, 0)));
        assert!(!r.hit(Point::new(250, 100)));
        assert!(r.hit(Point::new(201, 1)));
        assert!(r.hit(Point::new(299, 99)));
    }

    #[test]
    fn solid_render_replaces_background() {
        let mut fb = FrameBuffer::blank(20, 20);
        fb.pixels.fill(0x0010_2030);
        let r = Region::new(5, 5, 4, 4, Color::new(200, 100, 50)).with_alpha(ACTIVE_ALPHA);
        r.render(&mut fb);
        assert_eq!(fb.get(6, 6), Some(Color::new(200, 100, 50).to_pixel()));
        assert_eq!(fb.get(4, 4), Some(0x0010_2030));
        assert_eq!(fb.get(9, 9), Some(0x0010_2030));
    }

    #[test]
    fn resting_render_is_half_and_half() {
        let mut fb = FrameBuffer::blank(10, 10);
        let r = Region::new(0, 0, 10, 10, Color::new(200, 100, 50));
        r.render(&mut fb);
        assert_eq!(fb.get(0, 0), Some(Color::new(100, 50, 25).to_pixel()));
    }

    #[test]
    fn render_is_clipped_to_the_frame() {
        let mut fb = FrameBuffer::blank(10, 10);
        let r = Region::new(8, 8, 100, 100, Color::WHITE).with_alpha(ACTIVE_ALPHA);
        r.render(&mut fb);
        assert_eq!(fb.get(9, 9), Some(0x00FF_FFFF));
        assert_eq!(fb.get(7, 7), Some(0));
    }

    #[test]
    fn label_is_drawn_in_white() {
        let mut fb = FrameBuffer::blank(100, 100);
        let r = Region::new(0, 0, 100, 100, Color::BLACK).with_label("I");
        r.render(&mut fb);
        assert!(fb.pixels.contains(&LABEL_COLOR));
    }

    #[test]
    fn highlight_toggles_alpha() {
        let mut r = Region::new(0, 0, 1, 1, Color::BLACK);
        assert!(!r.is_highlighted());
        r.highlight(true);
        assert!(r.is_highlighted());
        r.highlight(false);
        assert_eq!(r.alpha, RESTING_ALPHA);
    }
}
