// The persistent drawing layer and the pen that paints on it.
//
// Each frame the hand is in exactly one of three states:
//   Interact - pointing somewhere off the board: hover the controls
//   Draw     - index finger alone on the visible board: extend the stroke
//   Idle     - anything else: lift the pen
// Only Draw touches the canvas. Strokes are joined segment by segment, so the
// cursor remembers where the last segment ended and is dropped whenever the
// gesture is interrupted.
use crate::draw::{draw_thick_line, fill_circle};
use crate::gesture::HandReading;
use crate::region::Region;
use crate::types::{Color, FrameBuffer, Point};
use tracing::info;

/// Selecting this colour turns the pen into an eraser (drawing zero pixels).
pub const ERASER_COLOR: Color = Color::BLACK;
pub const ERASER_WIDTH: u32 = 20;
pub const BRUSH_SIZES: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_COLOR: Color = Color::new(0, 0, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenState {
    pub color: Color,
    pub brush_width: u32,
    pub eraser_width: u32,
}

impl Default for PenState {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR, brush_width: BRUSH_SIZES[0], eraser_width: ERASER_WIDTH }
    }
}

impl PenState {
    pub fn is_erasing(&self) -> bool {
        self.color == ERASER_COLOR
    }

    /// Width of the line the pen lays down right now.
    pub fn stroke_width(&self) -> u32 {
        if self.is_erasing() { self.eraser_width } else { self.brush_width }
    }
}

/// What the hand does this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    Interact(Point),
    Draw(Point),
    Idle,
}

/// Decide this frame's action from the gesture and the pointer position alone.
pub fn classify(reading: &HandReading, board: &Region, board_visible: bool) -> FrameAction {
    match *reading {
        HandReading::Detected { fingertip, fingers } if fingers.index && !board.hit(fingertip) => {
            FrameAction::Interact(fingertip)
        }
        HandReading::Detected { fingertip, fingers } if fingers.is_drawing() && board_visible => {
            FrameAction::Draw(fingertip)
        }
        _ => FrameAction::Idle,
    }
}

/// A pen-size button and the brush width it selects.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeOption {
    pub button: Region,
    pub width: u32,
}

pub struct DrawingEngine {
    canvas: FrameBuffer,
    pen: PenState,
    /// End of the previous segment; None when the pen is lifted.
    cursor: Option<Point>,
}

impl DrawingEngine {
    /// Blank canvas of the frame size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { canvas: FrameBuffer::blank(width, height), pen: PenState::default(), cursor: None }
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn pen(&self) -> PenState {
        self.pen
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Lift the pen: the next Draw starts a fresh stroke.
    pub fn break_stroke(&mut self) {
        self.cursor = None;
    }

    /// Draw branch: show the pen tip on the live frame and extend the stroke on the canvas.
    pub fn stroke_to(&mut self, frame: &mut FrameBuffer, tip: Point) {
        let width = self.pen.stroke_width();
        fill_circle(frame, tip, width as i32, self.pen.color.to_pixel());

        // First point of a stroke has nothing to connect to yet.
        if let Some(prev) = self.cursor {
            draw_thick_line(&mut self.canvas, prev, tip, width, self.pen.color.to_pixel());
        }
        self.cursor = Some(tip);
    }

    pub fn select_color(&mut self, color: Color) {
        if self.pen.color != color {
            let eraser = color == ERASER_COLOR;
            info!(?color, eraser, "pen colour selected");
        }
        self.pen.color = color;
    }

    pub fn select_brush(&mut self, width: u32) {
        if self.pen.brush_width != width {
            info!(width, "brush width selected");
        }
        self.pen.brush_width = width;
    }

    /// Wipe the whole canvas back to zero.
    pub fn clear(&mut self) {
        if !self.canvas.is_blank() {
            info!("canvas cleared");
        }
        self.canvas.clear();
    }

    /// Colour panel hover: the swatch under the tip becomes the pen colour,
    /// and Clear wipes the canvas on every frame it is hovered.
    pub fn hover_colors(&mut self, swatches: &mut [Region], clear: &mut Region, tip: Point) {
        for swatch in swatches.iter_mut() {
            let hit = swatch.hit(tip);
            swatch.highlight(hit);
            if hit {
                self.select_color(swatch.color);
            }
        }

        let hit = clear.hit(tip);
        clear.highlight(hit);
        if hit {
            self.clear();
        }
    }

    /// Pen-size panel hover.
    pub fn hover_pen_sizes(&mut self, options: &mut [SizeOption], tip: Point) {
        for option in options.iter_mut() {
            let hit = option.button.hit(tip);
            option.button.highlight(hit);
            if hit {
                self.select_brush(option.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Fingers;

    fn board() -> Region {
        Region::new(50, 120, 1020, 580, Color::WHITE)
    }

    fn index_only(x: i32, y: i32) -> HandReading {
        HandReading::Detected { fingertip: Point::new(x, y), fingers: Fingers { index: true, ..Fingers::default() } }
    }

    #[test]
    fn classify_three_ways() {
        let b = board();
        assert_eq!(classify(&index_only(100, 50), &b, true), FrameAction::Interact(Point::new(100, 50)));
        assert_eq!(classify(&index_only(300, 300), &b, true), FrameAction::Draw(Point::new(300, 300)));
        assert_eq!(classify(&HandReading::NotDetected, &b, true), FrameAction::Idle);

        let two = HandReading::Detected {
            fingertip: Point::new(300, 300),
            fingers: Fingers { index: true, middle: true, ..Fingers::default() },
        };
        assert_eq!(classify(&two, &b, true), FrameAction::Idle);

        let fist = HandReading::Detected { fingertip: Point::new(100, 50), fingers: Fingers::default() };
        assert_eq!(classify(&fist, &b, true), FrameAction::Idle);
    }

    #[test]
    fn hidden_board_never_draws() {
        assert_eq!(classify(&index_only(300, 300), &board(), false), FrameAction::Idle);
    }

    #[test]
    fn first_point_draws_nothing() {
        let mut e = DrawingEngine::new(100, 100);
        let mut frame = FrameBuffer::blank(100, 100);
        e.stroke_to(&mut frame, Point::new(50, 50));
        assert!(e.canvas().is_blank());
        assert_eq!(e.cursor(), Some(Point::new(50, 50)));
        // The pen tip is still shown on the live frame.
        assert_eq!(frame.get(50, 50), Some(DEFAULT_COLOR.to_pixel()));
    }

    #[test]
    fn consecutive_points_are_joined() {
        let mut e = DrawingEngine::new(200, 200);
        let mut frame = FrameBuffer::blank(200, 200);
        let blue = DEFAULT_COLOR.to_pixel();
        e.stroke_to(&mut frame, Point::new(20, 20));
        e.stroke_to(&mut frame, Point::new(120, 20));
        e.stroke_to(&mut frame, Point::new(120, 150));
        assert_eq!(e.canvas().get(70, 20), Some(blue));
        assert_eq!(e.canvas().get(120, 20), Some(blue));
        assert_eq!(e.canvas().get(120, 90), Some(blue));
        assert_eq!(e.canvas().get(70, 90), Some(0));
    }

    #[test]
    fn broken_stroke_restarts() {
        let mut e = DrawingEngine::new(200, 200);
        let mut frame = FrameBuffer::blank(200, 200);
        e.stroke_to(&mut frame, Point::new(20, 20));
        e.stroke_to(&mut frame, Point::new(60, 20));
        e.break_stroke();
        e.stroke_to(&mut frame, Point::new(160, 160));
        assert_eq!(e.canvas().get(110, 90), Some(0));
        assert_eq!(e.canvas().get(160, 160), Some(0));
    }

    #[test]
    fn eraser_uses_its_own_width() {
        let mut pen = PenState::default();
        assert_eq!(pen.stroke_width(), 5);
        pen.color = ERASER_COLOR;
        assert!(pen.is_erasing());
        assert_eq!(pen.stroke_width(), ERASER_WIDTH);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut e = DrawingEngine::new(50, 50);
        let mut frame = FrameBuffer::blank(50, 50);
        e.stroke_to(&mut frame, Point::new(5, 5));
        e.stroke_to(&mut frame, Point::new(40, 40));
        assert!(!e.canvas().is_blank());
        e.clear();
        assert!(e.canvas().is_blank());
        e.clear();
        assert!(e.canvas().is_blank());
    }

    #[test]
    fn hovering_a_swatch_selects_and_highlights_it() {
        let mut e = DrawingEngine::new(10, 10);
        let mut swatches = vec![
            Region::new(300, 0, 100, 100, Color::new(255, 0, 0)),
            Region::new(400, 0, 100, 100, Color::new(0, 255, 0)),
        ];
        let mut clear = Region::new(900, 0, 100, 100, Color::new(100, 100, 100));
        e.hover_colors(&mut swatches, &mut clear, Point::new(450, 50));
        assert_eq!(e.pen().color, Color::new(0, 255, 0));
        assert!(!swatches[0].is_highlighted());
        assert!(swatches[1].is_highlighted());
        assert!(!clear.is_highlighted());
    }

    #[test]
    fn hovering_clear_wipes_every_frame() {
        let mut e = DrawingEngine::new(100, 100);
        let mut frame = FrameBuffer::blank(100, 100);
        let mut clear = Region::new(900, 0, 100, 100, Color::new(100, 100, 100));
        for _ in 0..2 {
            e.stroke_to(&mut frame, Point::new(10, 10));
            e.stroke_to(&mut frame, Point::new(90, 90));
            e.hover_colors(&mut [], &mut clear, Point::new(950, 50));
            assert!(e.canvas().is_blank());
            assert!(clear.is_highlighted());
        }
    }

    #[test]
    fn hovering_a_size_selects_it() {
        let mut e = DrawingEngine::new(10, 10);
        let mut options: Vec<SizeOption> = BRUSH_SIZES
            .iter()
            .enumerate()
            .map(|(i, &width)| SizeOption {
                button: Region::new(1100, 50 + 100 * i as i32, 100, 100, Color::new(50, 50, 50)),
                width,
            })
            .collect();
        e.hover_pen_sizes(&mut options, Point::new(1150, 280));
        assert_eq!(e.pen().brush_width, 15);
        assert!(options[2].button.is_highlighted());
        assert!(!options[0].button.is_highlighted());

        // Holding over the same button keeps the selection without re-selecting.
        e.hover_pen_sizes(&mut options, Point::new(1150, 280));
        assert_eq!(e.pen().brush_width, 15);
        e.hover_pen_sizes(&mut options, Point::new(600, 30));
        assert_eq!(e.pen().brush_width, 15);
        assert!(options.iter().all(|o| !o.button.is_highlighted()));
    }
}
