// Drawing mode: one synchronous pass per camera frame.
//
//   camera -> resize + mirror -> gesture -> interact | draw | idle -> controls -> board + canvas -> window
//
// `Session` holds all UI and canvas state and knows nothing about devices, so
// the whole per-frame behaviour can be driven from tests with synthetic
// frames. `DrawingMode` owns the camera, window and tracker around it.
use crate::camera::CameraCapture;
use crate::composite::composite;
use crate::config::{Config, InputKind};
use crate::draw::Drawer;
use crate::engine::{DrawingEngine, FrameAction, classify};
use crate::error::Error;
use crate::gesture::{HandReading, pointer_reading};
use crate::layout::{Controls, FRAME_HEIGHT, FRAME_WIDTH};
use crate::save::save_canvas;
use crate::toggle::{Panel, STARTUP_COOLDOWN, ToggleController};
use crate::tracker::HandTracker;
use crate::types::{FrameBuffer, Point};
use crate::vision::resize_mirrored;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// What the orchestrator should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    SaveRequested,
}

/// How drawing mode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    Quit,
    PoseOverlay,
}

pub struct Session {
    controls: Controls,
    toggles: ToggleController,
    engine: DrawingEngine,
}

impl Session {
    pub fn new(controls: Controls, width: usize, height: usize) -> Self {
        Self::with_toggles(controls, ToggleController::new(STARTUP_COOLDOWN), width, height)
    }

    pub fn with_toggles(controls: Controls, toggles: ToggleController, width: usize, height: usize) -> Self {
        Self { controls, toggles, engine: DrawingEngine::new(width, height) }
    }

    pub fn canvas(&self) -> &FrameBuffer {
        self.engine.canvas()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn toggles(&self) -> &ToggleController {
        &self.toggles
    }

    #[cfg(test)]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Process one mirrored frame in place: act on the gesture, then draw the UI over it.
    pub fn step(&mut self, frame: &mut FrameBuffer, reading: &HandReading) -> Result<StepOutcome, Error> {
        self.toggles.tick();

        let board_visible = self.toggles.is_visible(Panel::Board);
        let outcome = match classify(reading, &self.controls.board, board_visible) {
            FrameAction::Interact(tip) => {
                self.engine.break_stroke();
                self.interact(tip)
            }
            FrameAction::Draw(tip) => {
                self.engine.stroke_to(frame, tip);
                StepOutcome::Continue
            }
            FrameAction::Idle => {
                self.engine.break_stroke();
                StepOutcome::Continue
            }
        };

        self.render(frame)?;
        Ok(outcome)
    }

    /// Pointer is off the board: panels first, then the cooled triggers.
    fn interact(&mut self, tip: Point) -> StepOutcome {
        let c = &mut self.controls;
        if self.toggles.is_visible(Panel::PenSizes) {
            self.engine.hover_pen_sizes(&mut c.pen_sizes, tip);
        }
        if self.toggles.is_visible(Panel::Colors) {
            self.engine.hover_colors(&mut c.swatches, &mut c.clear, tip);
        }

        self.toggles.try_toggle(Panel::Colors, &mut c.colors_button, tip);
        self.toggles.try_toggle(Panel::PenSizes, &mut c.pen_button, tip);
        self.toggles.try_toggle(Panel::Board, &mut c.board_button, tip);

        if self.toggles.try_trigger(&mut c.save_button, tip) {
            info!("save requested");
            return StepOutcome::SaveRequested;
        }
        StepOutcome::Continue
    }

    fn render(&mut self, frame: &mut FrameBuffer) -> Result<(), Error> {
        let c = &mut self.controls;
        c.colors_button.render(frame);
        c.board_button.render(frame);
        c.pen_button.color = self.engine.pen().color;
        c.pen_button.render(frame);
        c.save_button.render(frame);

        if self.toggles.is_visible(Panel::Board) {
            c.board.render(frame);
            composite(frame, self.engine.canvas())?;
        }
        if self.toggles.is_visible(Panel::Colors) {
            c.swatches.iter().for_each(|s| s.render(frame));
            c.clear.render(frame);
        }
        if self.toggles.is_visible(Panel::PenSizes) {
            c.pen_sizes.iter().for_each(|o| o.button.render(frame));
        }
        Ok(())
    }
}

/// Gesture source for drawing mode.
enum GestureInput {
    Hands(HandTracker),
    Pointer,
}

/// Camera, window and tracker for drawing mode. Dropping it releases all three.
pub struct DrawingMode {
    cam: CameraCapture,
    drawer: Drawer,
    input: GestureInput,
    session: Session,
    output: PathBuf,
}

impl DrawingMode {
    pub fn open(config: &Config) -> Result<Self, Error> {
        let cam = CameraCapture::new(config.camera, FRAME_WIDTH as u32, FRAME_HEIGHT as u32)?;
        let drawer = Drawer::new("Air Canvas", FRAME_WIDTH, FRAME_HEIGHT)?;
        let input = match config.input {
            InputKind::Hands => GestureInput::Hands(HandTracker::new(
                &config.python,
                &config.hand_script,
                config.min_confidence,
            )?),
            InputKind::Pointer => GestureInput::Pointer,
        };
        let session = Session::new(Controls::standard(&mut rand::rng()), FRAME_WIDTH, FRAME_HEIGHT);
        Ok(Self { cam, drawer, input, session, output: config.output.clone() })
    }

    fn read_gesture(&mut self, frame: &FrameBuffer) -> Result<HandReading, Error> {
        match &mut self.input {
            GestureInput::Hands(tracker) => tracker.detect(frame),
            GestureInput::Pointer => Ok(pointer_reading(
                self.drawer.mouse_pos(),
                self.drawer.left_mouse_down(),
                self.drawer.right_mouse_down(),
            )),
        }
    }

    /// Run until quit, window close, capture failure, or a successful save.
    pub fn run(&mut self) -> Result<Handoff, Error> {
        let mut last_fps_time = Instant::now();
        let mut frames_this_second: u32 = 0;

        while self.drawer.is_open() && !self.drawer.quit_pressed() {
            let raw = match self.cam.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("capture stopped: {e}");
                    return Ok(Handoff::Quit);
                }
            };
            let mut frame = resize_mirrored(&raw, FRAME_WIDTH, FRAME_HEIGHT);

            let reading = self.read_gesture(&frame)?;
            if self.session.step(&mut frame, &reading)? == StepOutcome::SaveRequested {
                match save_canvas(self.session.canvas(), &self.output) {
                    Ok(()) => return Ok(Handoff::PoseOverlay),
                    Err(e) => error!("{e}"),
                }
            }

            self.drawer.present(&frame)?;

            frames_this_second += 1;
            let now = Instant::now();
            if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
                let secs = now.duration_since(last_fps_time).as_secs_f32();
                let fps = frames_this_second as f32 / secs;
                debug!(fps, "drawing mode");
                frames_this_second = 0;
                last_fps_time = now;
            }
        }
        Ok(Handoff::Quit)
    }
}
