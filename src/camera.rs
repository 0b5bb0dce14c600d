// The webcam as a scoped resource: opened by `new`, stream stopped on drop.
// Each mode opens its own CameraCapture, so dropping the drawing mode frees
// the device before the pose viewer asks for it.

use crate::error::Error;
use crate::types::{Color, FrameBuffer};

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};
use tracing::{info, warn};

pub struct CameraCapture {
    cam: Camera,
    index: u32,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` as close to the requested resolution as it offers.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!(index, width = actual.width(), height = actual.height(), "camera opened");

        Ok(Self { cam, index, width: actual.width(), height: actual.height() })
    }

    /// Grab one frame (blocks until the camera has one) as 0x00RRGGBB pixels.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2]).to_pixel())
            .collect();

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        match self.cam.stop_stream() {
            Ok(()) => info!(index = self.index, "camera released"),
            Err(e) => warn!(index = self.index, "stopping camera stream: {e}"),
        }
    }
}
