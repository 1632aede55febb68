//! The media collaborator: something that produces the pixels behind the surface.
//!
//! Acquiring a real camera is outside this crate. Sessions only need read
//! access to the current frame at capture time.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::CaptureError;

/// A live pixel-producing surface with a known native size.
pub trait FrameSource {
    /// Native pixel dimensions of the frames this source produces.
    fn native_size(&self) -> (u32, u32);

    /// A copy of the current frame.
    fn current_frame(&self) -> Result<RgbaImage, CaptureError>;

    /// Bumped whenever the frame content changes.
    fn version(&self) -> u64 {
        0
    }

    /// Advance to the next frame. Sources without motion ignore this.
    fn advance(&mut self) {}
}

/// A source whose frame never changes, such as a still loaded from disk.
#[derive(Debug, Clone)]
pub struct StillFrameSource {
    frame: RgbaImage,
}

impl StillFrameSource {
    pub fn new(frame: RgbaImage) -> Self {
        Self { frame }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let frame = image::open(path)
            .map_err(|err| CaptureError::media("NotReadableError", format!("{}: {}", path.display(), err)))?
            .to_rgba8();
        log::info!("Opened still source {} ({}x{})", path.display(), frame.width(), frame.height());
        Ok(Self { frame })
    }
}

impl FrameSource for StillFrameSource {
    fn native_size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn current_frame(&self) -> Result<RgbaImage, CaptureError> {
        Ok(self.frame.clone())
    }
}

/// Scrolling color bars, standing in for a camera when none is configured.
#[derive(Debug, Clone)]
pub struct TestPatternSource {
    width: u32,
    height: u32,
    tick: u64,
}

const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

impl TestPatternSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, tick: 0 }
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        let bar_width = (self.width / BARS.len() as u32).max(1);
        let shifted = (x as u64 + self.tick) % self.width.max(1) as u64;
        let [r, g, b] = BARS[(shifted as u32 / bar_width).min(BARS.len() as u32 - 1) as usize];
        // Darken towards the bottom so vertical position is visible in crops.
        let shade = 255 - (y * 128 / self.height.max(1)) as u16;
        let scale = |c: u8| (c as u16 * shade / 255) as u8;
        Rgba([scale(r), scale(g), scale(b), 255])
    }
}

impl FrameSource for TestPatternSource {
    fn native_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn current_frame(&self) -> Result<RgbaImage, CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::media("NotFoundError", "test pattern has no pixels"));
        }
        Ok(RgbaImage::from_fn(self.width, self.height, |x, y| self.pixel(x, y)))
    }

    fn version(&self) -> u64 {
        self.tick
    }

    fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}
