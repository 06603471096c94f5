//! The particle itself.

use glam::{Vec2, Vec3};

/// One particle in the field.
///
/// `origin` is the lattice point the particle was created at and is fixed
/// for the particle's lifetime — it is the anchor for the return spring and
/// the coordinate brightness is sampled at. Everything else is per-tick
/// mutable state.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position. `z` stays 0 unless the depth variant is enabled.
    pub position: Vec3,
    /// Current velocity. `z` stays 0 unless the depth variant is enabled.
    pub velocity: Vec3,
    /// Current rendered size in pixels.
    pub size: f32,
    /// Color picked from the palette at the last lit tick.
    pub color: Vec3,
    /// Brightness sampled at the last lit tick, 0–255.
    pub brightness: f32,
    origin: Vec2,
}

impl Particle {
    /// Create a particle resting at its lattice origin.
    pub fn at_origin(origin: Vec2, size: f32) -> Self {
        Self {
            position: origin.extend(0.0),
            velocity: Vec3::ZERO,
            size,
            color: Vec3::ZERO,
            brightness: 0.0,
            origin,
        }
    }

    /// The fixed home coordinate. Set at grid creation, never mutated.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}
