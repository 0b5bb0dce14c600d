// Command-line / environment configuration.
use crate::save::DEFAULT_OUTPUT;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where the per-frame gesture comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// Hand landmarks from the detector subprocess.
    Hands,
    /// The window mouse: left button draws, right button selects.
    Pointer,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "air-canvas", about = "Draw on live video by pointing at it")]
pub struct Config {
    /// Camera device index.
    #[arg(long, env = "AIR_CANVAS_CAMERA", default_value_t = 0)]
    pub camera: u32,

    #[arg(long, value_enum, default_value_t = InputKind::Hands)]
    pub input: InputKind,

    /// Interpreter that runs the landmark detector scripts.
    #[arg(long, env = "AIR_CANVAS_PYTHON", default_value = "python3")]
    pub python: PathBuf,

    #[arg(long, default_value = "scripts/hand_detect.py")]
    pub hand_script: PathBuf,

    #[arg(long, default_value = "scripts/pose_detect.py")]
    pub pose_script: PathBuf,

    /// Minimum hand detection score in [0,1].
    #[arg(long, default_value_t = 0.5)]
    pub min_confidence: f32,

    /// Where Save writes the canvas.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Redraw cap of the pose viewer.
    #[arg(long, default_value_t = 100)]
    pub pose_fps: usize,

    /// Verbose logging (RUST_LOG is honoured when set).
    #[arg(long)]
    pub debug: bool,
}
