//! Particle storage: a fixed-topology lattice covering the viewport.
//!
//! The grid is created whole and replaced whole. A viewport resize or a
//! change to the configured gap rebuilds it from scratch; no state migrates
//! from the old lattice to the new one.

use glam::Vec2;

use crate::particle::Particle;

/// The ordered set of particles, laid out one per `gap × gap` lattice cell.
///
/// Particle count is `⌊width / gap⌋ × ⌊height / gap⌋` with the gap in effect
/// at initialization. Particles keep their index for the lifetime of the
/// grid; iteration order is lattice order (row-major from the top-left).
#[derive(Debug)]
pub struct ParticleGrid {
    particles: Vec<Particle>,
    gap: i32,
}

impl ParticleGrid {
    /// Build the lattice for a viewport.
    ///
    /// A non-positive `gap` is a configuration error, not a panic: the grid
    /// comes back empty and stays empty until reinitialized with a valid gap.
    pub fn new(width: u32, height: u32, gap: i32, initial_size: f32) -> Self {
        if gap <= 0 {
            return Self {
                particles: Vec::new(),
                gap,
            };
        }

        let cols = width as i32 / gap;
        let rows = height as i32 / gap;
        let mut particles = Vec::with_capacity((cols.max(0) * rows.max(0)) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let origin = Vec2::new((col * gap) as f32, (row * gap) as f32);
                particles.push(Particle::at_origin(origin, initial_size));
            }
        }

        Self { particles, gap }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the grid holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The gap the lattice was built with.
    #[inline]
    pub fn gap(&self) -> i32 {
        self.gap
    }

    /// Shared view of the particles in lattice order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the particles in lattice order.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_formula() {
        let grid = ParticleGrid::new(100, 100, 10, 0.5);
        assert_eq!(grid.len(), 100);

        // Non-divisible viewport floors both axes.
        let grid = ParticleGrid::new(105, 93, 10, 0.5);
        assert_eq!(grid.len(), 10 * 9);
    }

    #[test]
    fn test_origin_layout() {
        let grid = ParticleGrid::new(100, 100, 10, 0.5);
        assert_eq!(grid.particles()[0].origin(), Vec2::new(0.0, 0.0));
        assert_eq!(grid.particles()[1].origin(), Vec2::new(10.0, 0.0));
        assert_eq!(grid.particles()[10].origin(), Vec2::new(0.0, 10.0));
        assert_eq!(grid.particles()[99].origin(), Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_non_positive_gap_yields_empty_grid() {
        assert!(ParticleGrid::new(100, 100, 0, 0.5).is_empty());
        assert!(ParticleGrid::new(100, 100, -3, 0.5).is_empty());
    }

    #[test]
    fn test_rebuild_is_independent_of_previous_state() {
        let mut grid = ParticleGrid::new(100, 100, 10, 0.5);
        for p in grid.particles_mut() {
            p.position.x += 500.0;
            p.velocity.x = 9.0;
            p.brightness = 200.0;
        }

        // A fresh grid with a new gap owes nothing to the old one.
        let grid = ParticleGrid::new(100, 100, 20, 0.5);
        assert_eq!(grid.len(), 25);
        for p in grid.particles() {
            assert_eq!(p.velocity.x, 0.0);
            assert_eq!(p.brightness, 0.0);
            assert_eq!(p.position.truncate(), p.origin());
        }
    }

    #[test]
    fn test_gap_larger_than_viewport() {
        let grid = ParticleGrid::new(30, 30, 40, 0.5);
        assert!(grid.is_empty());
    }
}
