// One error type for the whole app.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("Landmark tracker error: {0}")]
    Tracker(String), // Detector subprocess failed or replied garbage
    #[error("Frame size error: {0}")]
    FrameSize(String), // Two buffers that must match do not
    #[error("Saving canvas to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
