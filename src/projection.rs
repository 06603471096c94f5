//! Perspective projection for the depth variant.
//!
//! Simulated positions live in viewport pixels with a depth axis pointing
//! toward the viewer. Before drawing, each position is swayed by a slow
//! fixed camera animation (two small sinusoidal rotations — nothing the
//! user controls), then perspective-divided onto the screen. Particles
//! projected far outside the viewport are culled from drawing but keep
//! simulating.

use glam::{Vec2, Vec3};

use crate::style::Tuning;

/// A projected particle: screen position plus the perspective scale to
/// apply to its size and stroke widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position in viewport pixels.
    pub screen: Vec2,
    /// Perspective scale; greater than 1 for particles closer than the
    /// focal plane.
    pub scale: f32,
}

/// Projects simulated coordinates onto the screen.
#[derive(Debug, Clone)]
pub struct Projector {
    center: Vec2,
    bounds: Vec2,
    focal_length: f32,
    sway_amplitude: f32,
    sway_rate_x: f32,
    sway_rate_y: f32,
    cull_margin: f32,
}

impl Projector {
    /// Build a projector for a viewport.
    pub fn new(width: u32, height: u32, tuning: &Tuning) -> Self {
        Self {
            center: Vec2::new(width as f32, height as f32) * 0.5,
            bounds: Vec2::new(width as f32, height as f32),
            focal_length: tuning.focal_length,
            sway_amplitude: tuning.sway_amplitude,
            sway_rate_x: tuning.sway_rate_x,
            sway_rate_y: tuning.sway_rate_y,
            cull_margin: tuning.cull_margin,
        }
    }

    /// Project one position at the given simulation time.
    ///
    /// Returns `None` when the particle lands behind the camera or outside
    /// the viewport (plus margin); the caller skips drawing it.
    pub fn project(&self, position: Vec3, time: f32) -> Option<Projected> {
        let p = Vec3::new(
            position.x - self.center.x,
            position.y - self.center.y,
            position.z,
        );

        // Ambient sway: rotation around Y, then around X.
        let ay = self.sway_amplitude * (time * self.sway_rate_x).sin();
        let ax = self.sway_amplitude * (time * self.sway_rate_y).sin();

        let (sy, cy) = ay.sin_cos();
        let x1 = p.x * cy + p.z * sy;
        let z1 = -p.x * sy + p.z * cy;

        let (sx, cx) = ax.sin_cos();
        let y1 = p.y * cx - z1 * sx;
        let z2 = p.y * sx + z1 * cx;

        let denom = self.focal_length - z2;
        if denom <= 1.0 {
            return None;
        }
        let scale = self.focal_length / denom;
        let screen = Vec2::new(x1, y1) * scale + self.center;

        let m = self.cull_margin;
        if screen.x < -m || screen.y < -m || screen.x > self.bounds.x + m || screen.y > self.bounds.y + m {
            return None;
        }

        Some(Projected { screen, scale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_tuning() -> Tuning {
        Tuning {
            sway_amplitude: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_identity_at_zero_depth_without_sway() {
        let projector = Projector::new(200, 100, &flat_tuning());
        let p = projector
            .project(Vec3::new(30.0, 40.0, 0.0), 5.0)
            .expect("in-view point must project");
        assert!((p.screen - Vec2::new(30.0, 40.0)).length() < 1e-4);
        assert!((p.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_closer_particles_render_larger() {
        let projector = Projector::new(200, 100, &flat_tuning());
        let near = projector.project(Vec3::new(100.0, 50.0, 100.0), 0.0).unwrap();
        let far = projector.project(Vec3::new(100.0, 50.0, -100.0), 0.0).unwrap();
        assert!(near.scale > 1.0);
        assert!(far.scale < 1.0);
        assert!(near.scale > far.scale);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let tuning = flat_tuning();
        let projector = Projector::new(200, 100, &tuning);
        assert!(projector
            .project(Vec3::new(100.0, 50.0, tuning.focal_length + 10.0), 0.0)
            .is_none());
    }

    #[test]
    fn test_offscreen_is_culled_beyond_margin() {
        let tuning = flat_tuning();
        let projector = Projector::new(200, 100, &tuning);
        // Just outside the margin.
        assert!(projector
            .project(Vec3::new(-(tuning.cull_margin + 150.0), 50.0, 0.0), 0.0)
            .is_none());
        // Inside the margin: drawn even though off the viewport proper.
        assert!(projector
            .project(Vec3::new(-(tuning.cull_margin - 5.0), 50.0, 0.0), 0.0)
            .is_some());
    }

    #[test]
    fn test_sway_is_deterministic_in_time() {
        let projector = Projector::new(200, 100, &Tuning::default());
        let a = projector.project(Vec3::new(60.0, 60.0, 30.0), 3.3);
        let b = projector.project(Vec3::new(60.0, 60.0, 30.0), 3.3);
        assert_eq!(a, b);

        // And actually moves with time.
        let c = projector.project(Vec3::new(60.0, 60.0, 30.0), 9.9).unwrap();
        assert_ne!(a.unwrap().screen, c.screen);
    }
}
