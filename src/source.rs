//! Frame sources.
//!
//! The simulation samples whatever the host's video pipeline produced most
//! recently. That pipeline lives outside this crate; the [`FrameSource`]
//! trait is its entire interface. A source that is not ready (camera still
//! warming up, stream stalled) causes the tick to skip physics and apply
//! only the trail fade — it never blocks and never errors.

use image::RgbaImage;
use std::path::Path;

use crate::error::FrameError;

/// Provider of the current video frame.
///
/// Implementations are queried once per tick. `frame()` must return a buffer
/// whose dimensions match the viewport the simulation was initialized with;
/// the sampler scales it down to analysis resolution itself.
pub trait FrameSource {
    /// Whether a frame is available this tick.
    fn ready(&self) -> bool;

    /// The current frame. Returning `None` while `ready()` is true is
    /// treated the same as not ready.
    fn frame(&self) -> Option<&RgbaImage>;
}

/// A source that serves one fixed image forever.
///
/// Useful for stills, tests, and for hosts that double-buffer camera frames
/// and swap the image between ticks.
pub struct StillSource {
    frame: RgbaImage,
}

impl StillSource {
    /// Wrap an already-decoded image.
    pub fn new(frame: RgbaImage) -> Self {
        Self { frame }
    }

    /// Load an image from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameError> {
        let img = image::open(path)?;
        Ok(Self {
            frame: img.to_rgba8(),
        })
    }

    /// Replace the held frame (e.g. with the next camera capture).
    pub fn set_frame(&mut self, frame: RgbaImage) {
        self.frame = frame;
    }
}

impl FrameSource for StillSource {
    fn ready(&self) -> bool {
        true
    }

    fn frame(&self) -> Option<&RgbaImage> {
        Some(&self.frame)
    }
}

/// A source that is never ready.
///
/// Stands in for a video pipeline that has not produced its first frame.
#[derive(Debug, Default)]
pub struct PendingSource;

impl FrameSource for PendingSource {
    fn ready(&self) -> bool {
        false
    }

    fn frame(&self) -> Option<&RgbaImage> {
        None
    }
}

/// Build a horizontal luminance ramp, dark on the left, bright on the right.
///
/// A predictable synthetic frame for demos and tests.
pub fn gradient_frame(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let v = if width > 1 {
            ((x as f32 / (width - 1) as f32) * 255.0) as u8
        } else {
            0
        };
        image::Rgba([v, v, v, 255])
    })
}

/// Build a uniformly colored frame.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_source_always_ready() {
        let src = StillSource::new(solid_frame(8, 8, [10, 20, 30]));
        assert!(src.ready());
        assert_eq!(src.frame().unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn test_pending_source_never_ready() {
        let src = PendingSource;
        assert!(!src.ready());
        assert!(src.frame().is_none());
    }

    #[test]
    fn test_gradient_frame_ramps() {
        let frame = gradient_frame(256, 4);
        assert_eq!(frame.get_pixel(0, 0)[0], 0);
        assert_eq!(frame.get_pixel(255, 0)[0], 255);
        let mid = frame.get_pixel(128, 2)[0];
        assert!(mid > 120 && mid < 136, "midpoint should be near 128, got {}", mid);
    }
}
