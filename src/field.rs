//! Brightness field sampling.
//!
//! Every tick the current video frame is collapsed into a small luminance
//! grid at analysis resolution (viewport dimensions times the configured
//! analysis scale). Particles never touch the full-resolution frame; all
//! brightness lookups and gradient estimates go through this field.
//!
//! The field has no identity across ticks — it is rebuilt from the frame
//! each time and dropped at tick end.

use image::RgbaImage;

/// Downsampled per-cell luminance of one video frame.
///
/// Cell values are in 0–255. Lookups clamp into bounds; a read that still
/// misses the backing store resolves to brightness 0 rather than panicking.
#[derive(Debug, Clone)]
pub struct BrightnessField {
    width: u32,
    height: u32,
    /// Maps a full-resolution coordinate to cell space.
    scale: f32,
    cells: Vec<f32>,
}

impl BrightnessField {
    /// Build the field for one frame.
    ///
    /// `viewport` is the simulation's coordinate space; the frame may have
    /// different pixel dimensions and is resampled against its own size.
    /// Returns `None` when the analysis resolution would collapse below one
    /// cell in either axis — the caller skips physics for that tick.
    pub fn from_frame(
        frame: &RgbaImage,
        viewport_width: u32,
        viewport_height: u32,
        analysis_scale: f32,
    ) -> Option<Self> {
        let width = (viewport_width as f32 * analysis_scale).floor() as u32;
        let height = (viewport_height as f32 * analysis_scale).floor() as u32;
        if width < 1 || height < 1 {
            return None;
        }
        let (fw, fh) = frame.dimensions();
        if fw == 0 || fh == 0 {
            return None;
        }

        let texels: &[[u8; 4]] = bytemuck::cast_slice(frame.as_raw());
        let mut cells = Vec::with_capacity((width * height) as usize);

        // Box-average the block of frame pixels covered by each cell, then
        // average the three color channels into one luminance value.
        for cy in 0..height {
            let y0 = (cy as u64 * fh as u64 / height as u64) as u32;
            let y1 = (((cy + 1) as u64 * fh as u64 / height as u64) as u32).max(y0 + 1);
            for cx in 0..width {
                let x0 = (cx as u64 * fw as u64 / width as u64) as u32;
                let x1 = (((cx + 1) as u64 * fw as u64 / width as u64) as u32).max(x0 + 1);

                let mut sum = 0u64;
                for y in y0..y1.min(fh) {
                    let row = (y * fw) as usize;
                    for x in x0..x1.min(fw) {
                        let [r, g, b, _] = texels[row + x as usize];
                        sum += r as u64 + g as u64 + b as u64;
                    }
                }
                let count = ((y1.min(fh) - y0) * (x1.min(fw) - x0)).max(1) as u64;
                cells.push(sum as f32 / (3 * count) as f32);
            }
        }

        Some(Self {
            width,
            height,
            scale: analysis_scale,
            cells,
        })
    }

    /// Analysis grid width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Analysis grid height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Brightness at a cell coordinate, clamped into bounds.
    pub fn at_cell(&self, cx: i32, cy: i32) -> f32 {
        let cx = cx.clamp(0, self.width as i32 - 1);
        let cy = cy.clamp(0, self.height as i32 - 1);
        let idx = cy as usize * self.width as usize + cx as usize;
        self.cells.get(idx).copied().unwrap_or(0.0)
    }

    /// Brightness at a full-resolution coordinate.
    ///
    /// Scales into cell space, then clamps to the nearest cell.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.at_cell((x * self.scale) as i32, (y * self.scale) as i32)
    }

    /// Brightness a fixed cell offset away from a full-resolution coordinate.
    ///
    /// Used by the flow field's gradient estimate. Clamped like [`sample`].
    ///
    /// [`sample`]: BrightnessField::sample
    pub fn sample_offset(&self, x: f32, y: f32, dx: i32, dy: i32) -> f32 {
        self.at_cell((x * self.scale) as i32 + dx, (y * self.scale) as i32 + dy)
    }
}
