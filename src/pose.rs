// Pose overlay mode: live video with the detected body skeleton and a frame-rate counter.
// Entered only after drawing mode has released the camera; owns its own camera,
// window and detector, all released when the mode is dropped.
use crate::camera::CameraCapture;
use crate::config::Config;
use crate::draw::{Drawer, draw_text_5x7, draw_thick_line, fill_circle};
use crate::error::Error;
use crate::layout::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::tracker::PoseTracker;
use crate::types::{FrameBuffer, Point};
use std::time::Instant;
use tracing::{debug, warn};

/// Skeleton edges between the 33 body landmarks (MediaPipe pose topology).
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    (0, 1), (1, 2), (2, 3), (3, 7), (0, 4), (4, 5), (5, 6), (6, 8), (9, 10),
    (11, 12), (11, 13), (13, 15), (15, 17), (15, 19), (15, 21), (17, 19),
    (12, 14), (14, 16), (16, 18), (16, 20), (16, 22), (18, 20),
    (11, 23), (12, 24), (23, 24), (23, 25), (24, 26), (25, 27), (26, 28),
    (27, 29), (28, 30), (29, 31), (30, 32), (27, 31), (28, 32),
];

const BONE_COLOR: u32 = 0x00FF_FFFF;
const JOINT_COLOR: u32 = 0x00FF_0000;
const FPS_COLOR: u32 = 0x0000_FF00;

/// Draw bones first, then joints on top. Edges touching a missing or hidden
/// landmark are skipped.
pub fn draw_skeleton(fb: &mut FrameBuffer, landmarks: &[Option<Point>]) {
    for &(a, b) in &POSE_CONNECTIONS {
        if let (Some(&Some(pa)), Some(&Some(pb))) = (landmarks.get(a), landmarks.get(b)) {
            draw_thick_line(fb, pa, pb, 2, BONE_COLOR);
        }
    }
    for &p in landmarks.iter().flatten() {
        fill_circle(fb, p, 4, JOINT_COLOR);
    }
}

/// Instantaneous frame rate from the gap between consecutive frames.
#[derive(Default)]
pub struct FpsMeter {
    last: Option<Instant>,
}

impl FpsMeter {
    /// Record a frame at `now`; returns 1/dt, or 0 for the first frame.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let fps = match self.last {
            Some(prev) => {
                let dt = now.duration_since(prev).as_secs_f32();
                if dt > 0.0 { (1.0 / dt) as u32 } else { 0 }
            }
            None => 0,
        };
        self.last = Some(now);
        fps
    }
}

pub struct PoseOverlayMode {
    cam: CameraCapture,
    drawer: Drawer,
    tracker: PoseTracker,
    fps: FpsMeter,
}

impl PoseOverlayMode {
    pub fn open(config: &Config) -> Result<Self, Error> {
        let cam = CameraCapture::new(config.camera, FRAME_WIDTH as u32, FRAME_HEIGHT as u32)?;
        let (w, h) = cam.resolution();
        let mut drawer = Drawer::new("Pose Detection", w as usize, h as usize)?;
        drawer.set_target_fps(config.pose_fps);
        let tracker = PoseTracker::new(&config.python, &config.pose_script)?;
        Ok(Self { cam, drawer, tracker, fps: FpsMeter::default() })
    }

    /// Run until quit, window close, or capture failure.
    pub fn run(&mut self) -> Result<(), Error> {
        while self.drawer.is_open() && !self.drawer.quit_pressed() {
            let mut frame = match self.cam.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("capture stopped: {e}");
                    break;
                }
            };

            let landmarks = self.tracker.detect(&frame)?;
            if !landmarks.is_empty() {
                debug!(?landmarks, "pose landmarks");
            }
            draw_skeleton(&mut frame, &landmarks);

            let fps = self.fps.tick(Instant::now());
            draw_text_5x7(&mut frame, 10, 40, &fps.to_string(), 4, FPS_COLOR);

            self.drawer.present(&frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fps_is_inverse_frame_gap() {
        let mut meter = FpsMeter::default();
        let t0 = Instant::now();
        assert_eq!(meter.tick(t0), 0);
        assert_eq!(meter.tick(t0 + Duration::from_millis(250)), 4);
        assert_eq!(meter.tick(t0 + Duration::from_millis(250)), 0);
    }

    #[test]
    fn skeleton_joins_shoulders() {
        let mut fb = FrameBuffer::blank(200, 200);
        let mut lm = vec![Some(Point::new(-50, -50)); 33];
        lm[11] = Some(Point::new(50, 100));
        lm[12] = Some(Point::new(150, 100));
        draw_skeleton(&mut fb, &lm);
        assert_eq!(fb.get(100, 100), Some(BONE_COLOR));
        assert_eq!(fb.get(50, 100), Some(JOINT_COLOR));
    }

    #[test]
    fn partial_landmarks_do_not_panic() {
        let mut fb = FrameBuffer::blank(20, 20);
        draw_skeleton(&mut fb, &[Some(Point::new(2, 2)), Some(Point::new(18, 2))]);
        assert_eq!(fb.get(2, 2), Some(JOINT_COLOR));
        assert_eq!(fb.get(10, 2), Some(BONE_COLOR));
        assert_eq!(fb.get(19, 19), Some(0));
    }

    #[test]
    fn hidden_joint_drops_its_bones() {
        let mut fb = FrameBuffer::blank(200, 200);
        let mut lm = vec![None; 33];
        lm[11] = Some(Point::new(50, 100));
        lm[13] = Some(Point::new(50, 180));
        draw_skeleton(&mut fb, &lm);
        // 11-13 is drawn, 11-12 is not because 12 is hidden.
        assert_eq!(fb.get(50, 140), Some(BONE_COLOR));
        assert_eq!(fb.get(100, 100), Some(0));
        assert_eq!(fb.get(50, 100), Some(JOINT_COLOR));
    }
}
