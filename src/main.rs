// What you SEE:
// • Your mirrored camera feed with four buttons along the edges: Board, Colors, Pen, Save.
// • Point with the index finger at a button to toggle its panel.
// • With the board shown, index finger alone draws; lift it or raise a second finger to stop.
// • Colors panel: pick a colour, the eraser, or Clear. Pen panel: pick a brush width.
// • Save writes the drawing to disk and switches to the pose viewer. Q or ESC quits.

mod app;
mod camera;
mod composite;
mod config;
mod draw;
mod engine;
mod error;
mod gesture;
mod layout;
mod logging;
mod pose;
mod region;
mod save;
mod toggle;
mod tracker;
mod types;
mod vision;

use app::{DrawingMode, Handoff};
use clap::Parser;
use config::Config;
use error::Error;
use pose::PoseOverlayMode;
use tracing::{info, warn};

fn main() -> Result<(), Error> {
    let config = Config::parse();
    logging::init(config.debug);
    info!(input = ?config.input, camera = config.camera, "starting drawing mode");

    // Drawing mode's camera and window are dropped at the end of this block,
    // before pose mode opens its own.
    let handoff = {
        let mut drawing = DrawingMode::open(&config)?;
        drawing.run()?
    };

    if handoff == Handoff::PoseOverlay {
        info!("switching to pose overlay mode");
        match PoseOverlayMode::open(&config) {
            Ok(mut pose) => pose.run()?,
            Err(e @ Error::CameraInit(_)) => warn!("pose mode could not start: {e}"),
            Err(e) => return Err(e),
        }
    }

    info!("bye");
    Ok(())
}
