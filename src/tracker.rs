//! Landmark detection through a Python/MediaPipe subprocess.
//!
//! The child prints `READY` once its model is loaded. For every frame we write
//! a 12-byte header (width, height, channels as little-endian u32) followed by
//! the raw RGB bytes, and the child answers with exactly one JSON line.
//! Landmark coordinates in the reply are normalised to [0,1].
//!
//! Scripts for both detectors live under `scripts/`.

use crate::error::Error;
use crate::gesture::{Fingers, HandReading};
use crate::types::{FrameBuffer, Point};
use crate::vision::to_rgb_bytes;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, info, warn};

/// Hand landmark indices (MediaPipe hand model convention).
pub mod hand {
    pub const COUNT: usize = 21;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// Pose joints below this visibility are treated as out of view.
pub const MIN_VISIBILITY: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    // Hand replies carry none; only pose joints can be occluded.
    #[serde(default = "fully_visible")]
    pub visibility: f32,
}

fn fully_visible() -> f32 {
    1.0
}

impl Landmark {
    pub fn to_pixel(&self, width: usize, height: usize) -> Point {
        Point::new((self.x * width as f32) as i32, (self.y * height as f32) as i32)
    }
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score: f32,
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize, Debug)]
struct HandResponse {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PoseResponse {
    #[serde(default)]
    landmarks: Vec<Landmark>,
    #[serde(default)]
    error: Option<String>,
}

/// A running detector child with its pipes.
struct LandmarkProcess {
    name: &'static str,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl LandmarkProcess {
    fn spawn(name: &'static str, python: &Path, script: &Path) -> Result<Self, Error> {
        if !script.exists() {
            return Err(Error::Tracker(format!("{name} script not found at {}", script.display())));
        }

        info!(detector = name, script = %script.display(), "starting landmark detector");
        let mut child = Command::new(python)
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Tracker(format!("spawn {}: {e}", python.display())))?;

        let stdin = child.stdin.take().ok_or_else(|| Error::Tracker("child stdin missing".into()))?;
        let stdout = child.stdout.take().ok_or_else(|| Error::Tracker("child stdout missing".into()))?;
        let mut process = Self { name, child, stdin, stdout: BufReader::new(stdout) };

        // Wait for the model to load.
        let ready = process.read_line()?;
        if ready.trim() != "READY" {
            return Err(Error::Tracker(format!("{name} did not signal ready, got {ready:?}")));
        }
        info!(detector = name, "landmark detector ready");
        Ok(process)
    }

    fn read_line(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        let n = self
            .stdout
            .read_line(&mut line)
            .map_err(|e| Error::Tracker(format!("{} read: {e}", self.name)))?;
        if n == 0 {
            return Err(Error::Tracker(format!("{} closed its output", self.name)));
        }
        Ok(line)
    }

    /// Send one frame and return the raw reply line.
    fn request(&mut self, frame: &FrameBuffer) -> Result<String, Error> {
        let write = |stdin: &mut ChildStdin| -> std::io::Result<()> {
            stdin.write_all(&(frame.width as u32).to_le_bytes())?;
            stdin.write_all(&(frame.height as u32).to_le_bytes())?;
            stdin.write_all(&3u32.to_le_bytes())?;
            stdin.write_all(&to_rgb_bytes(frame))?;
            stdin.flush()
        };
        write(&mut self.stdin).map_err(|e| Error::Tracker(format!("{} write: {e}", self.name)))?;
        self.read_line()
    }
}

impl Drop for LandmarkProcess {
    fn drop(&mut self) {
        // Kill the subprocess when the tracker is dropped
        let _ = self.child.kill();
        let _ = self.child.wait();
        info!(detector = self.name, "landmark detector stopped");
    }
}

/// Finger extension from the 21 hand landmarks (image coordinates, y grows down).
/// Fingers are up when the tip is above the PIP joint. The thumb folds sideways,
/// so it is up when its tip is farther from the pinky knuckle than its IP joint.
pub fn fingers_from_landmarks(lm: &[Landmark]) -> Fingers {
    if lm.len() < hand::COUNT {
        return Fingers::default();
    }
    let above = |tip: usize, pip: usize| lm[tip].y < lm[pip].y;
    let pinky_x = lm[hand::PINKY_MCP].x;
    Fingers {
        thumb: (lm[hand::THUMB_TIP].x - pinky_x).abs() > (lm[hand::THUMB_IP].x - pinky_x).abs(),
        index: above(hand::INDEX_TIP, hand::INDEX_PIP),
        middle: above(hand::MIDDLE_TIP, hand::MIDDLE_PIP),
        ring: above(hand::RING_TIP, hand::RING_PIP),
        pinky: above(hand::PINKY_TIP, hand::PINKY_PIP),
    }
}

/// Turn one hand-detector reply into a reading for a `width`x`height` frame.
pub fn parse_hand_reply(line: &str, width: usize, height: usize, min_confidence: f32) -> Result<HandReading, Error> {
    let reply: HandResponse =
        serde_json::from_str(line).map_err(|e| Error::Tracker(format!("hand reply {line:?}: {e}")))?;
    if let Some(error) = reply.error {
        warn!("hand detector error: {error}");
        return Ok(HandReading::NotDetected);
    }

    // First hand with sufficient confidence wins
    for hand in reply.hands {
        if hand.score < min_confidence {
            continue;
        }
        if hand.landmarks.len() != hand::COUNT {
            warn!("expected {} landmarks, got {}", hand::COUNT, hand.landmarks.len());
            continue;
        }
        let fingertip = hand.landmarks[hand::INDEX_TIP].to_pixel(width, height);
        let fingers = fingers_from_landmarks(&hand.landmarks);
        debug!(handedness = %hand.handedness, score = hand.score, ?fingertip, ?fingers, "hand detected");
        return Ok(HandReading::Detected { fingertip, fingers });
    }
    Ok(HandReading::NotDetected)
}

/// Hand tracker backed by the MediaPipe hand landmarker.
pub struct HandTracker {
    process: LandmarkProcess,
    min_confidence: f32,
}

impl HandTracker {
    pub fn new(python: &Path, script: &Path, min_confidence: f32) -> Result<Self, Error> {
        let process = LandmarkProcess::spawn("hands", python, script)?;
        Ok(Self { process, min_confidence: min_confidence.clamp(0.0, 1.0) })
    }

    /// Detect the pointing hand in `frame`. No hand is not an error.
    pub fn detect(&mut self, frame: &FrameBuffer) -> Result<HandReading, Error> {
        if frame.pixels.is_empty() {
            return Ok(HandReading::NotDetected);
        }
        let line = self.process.request(frame)?;
        parse_hand_reply(&line, frame.width, frame.height, self.min_confidence)
    }
}

/// Body-pose tracker backed by the MediaPipe pose landmarker.
pub struct PoseTracker {
    process: LandmarkProcess,
}

impl PoseTracker {
    pub fn new(python: &Path, script: &Path) -> Result<Self, Error> {
        Ok(Self { process: LandmarkProcess::spawn("pose", python, script)? })
    }

    /// Landmarks in pixel coordinates, indexed like the pose model; empty when
    /// no body is in view.
    pub fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<Option<Point>>, Error> {
        if frame.pixels.is_empty() {
            return Ok(Vec::new());
        }
        let line = self.process.request(frame)?;
        parse_pose_reply(&line, frame.width, frame.height)
    }
}

/// Parse one pose-detector reply. Joints with low visibility become `None`
/// so the remaining indices still line up with the skeleton edges.
pub fn parse_pose_reply(line: &str, width: usize, height: usize) -> Result<Vec<Option<Point>>, Error> {
    let reply: PoseResponse =
        serde_json::from_str(line).map_err(|e| Error::Tracker(format!("pose reply {line:?}: {e}")))?;
    if let Some(error) = reply.error {
        warn!("pose detector error: {error}");
        return Ok(Vec::new());
    }
    Ok(reply
        .landmarks
        .iter()
        .map(|lm| (lm.visibility >= MIN_VISIBILITY).then(|| lm.to_pixel(width, height)))
        .collect())
}
