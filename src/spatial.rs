//! Per-tick spatial hashing for the connection pass.
//!
//! Connective lines need "who is near whom" for thousands of particles.
//! A transient bucket map keyed by integer cell coordinate bounds that cost
//! to a 3×3 neighborhood scan per particle instead of an all-pairs sweep.
//! The grid is rebuilt from scratch each tick and discarded at tick end;
//! nothing about it persists.

use std::collections::HashMap;

use glam::Vec2;

use crate::particle::Particle;
use crate::render::DrawSurface;

/// Width of a connective stroke.
const LINE_WIDTH: f32 = 1.0;

/// Transient index from cell coordinate to the particles inside it.
///
/// Entries carry the position they were inserted at — in the depth variant
/// that is the projected screen position, so connections are measured in
/// the same space they are drawn in. Cell size is the connection distance,
/// floor-bounded so a tiny distance cannot degenerate into thousands of
/// single-particle cells.
#[derive(Debug)]
pub struct SpatialHashGrid {
    cell_size: f32,
    buckets: HashMap<(i32, i32), Vec<(usize, Vec2)>>,
    inserted: usize,
}

impl SpatialHashGrid {
    /// Create an empty grid for the given connection distance.
    pub fn new(connection_distance: f32, cell_floor: f32) -> Self {
        Self {
            cell_size: connection_distance.max(cell_floor),
            buckets: HashMap::new(),
            inserted: 0,
        }
    }

    /// The effective cell size after flooring.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of particles inserted this tick.
    #[inline]
    pub fn len(&self) -> usize {
        self.inserted
    }

    /// Whether anything has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Register a particle index at the position it is drawn at.
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let cell = (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        );
        self.buckets.entry(cell).or_default().push((index, position));
        self.inserted += 1;
    }

    /// Draw fading lines between every pair of registered particles closer
    /// than `distance`.
    ///
    /// For each particle the 3×3 block of neighboring cells is scanned;
    /// a candidate pair survives only with a strictly greater index, so
    /// each pair is considered exactly once and no particle connects to
    /// itself. A cheap bounding-box rejection runs before the squared
    /// distance. Alpha falls off linearly from 1 at zero distance to 0 at
    /// the threshold; the stroke takes the lower-indexed endpoint's color.
    pub fn draw_connections(
        &self,
        particles: &[Particle],
        distance: f32,
        surface: &mut dyn DrawSurface,
    ) {
        if distance <= 0.0 {
            return;
        }
        let dist_sq = distance * distance;

        for (&(cx, cy), bucket) in &self.buckets {
            for &(i, pi) in bucket {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let Some(neighbors) = self.buckets.get(&(cx + dx, cy + dy)) else {
                            continue;
                        };
                        for &(j, pj) in neighbors {
                            if j <= i {
                                continue;
                            }
                            if (pj.x - pi.x).abs() > distance || (pj.y - pi.y).abs() > distance {
                                continue;
                            }
                            let d2 = pi.distance_squared(pj);
                            if d2 > dist_sq {
                                continue;
                            }
                            let alpha = 1.0 - d2.sqrt() / distance;
                            surface.stroke_line(pi, pj, LINE_WIDTH, particles[i].color, alpha);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, RecordingSurface};
    use glam::{Vec2, Vec3};

    fn particle_at(x: f32, y: f32) -> Particle {
        let mut p = Particle::at_origin(Vec2::new(x, y), 1.0);
        p.color = Vec3::ONE;
        p
    }

    fn connect(particles: &[Particle], distance: f32) -> RecordingSurface {
        let mut grid = SpatialHashGrid::new(distance, 40.0);
        for (i, p) in particles.iter().enumerate() {
            grid.insert(i, p.position.truncate());
        }
        let mut surface = RecordingSurface::new();
        grid.draw_connections(particles, distance, &mut surface);
        surface
    }

    #[test]
    fn test_cell_size_floor() {
        assert_eq!(SpatialHashGrid::new(12.0, 40.0).cell_size(), 40.0);
        assert_eq!(SpatialHashGrid::new(75.0, 40.0).cell_size(), 75.0);
    }

    #[test]
    fn test_pair_connected_once() {
        let particles = vec![particle_at(0.0, 0.0), particle_at(30.0, 0.0)];
        let surface = connect(&particles, 50.0);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_no_self_connection() {
        let particles = vec![particle_at(10.0, 10.0)];
        let surface = connect(&particles, 50.0);
        assert_eq!(surface.line_count(), 0);
    }

    #[test]
    fn test_triangle_yields_three_lines() {
        let particles = vec![
            particle_at(0.0, 0.0),
            particle_at(20.0, 0.0),
            particle_at(0.0, 20.0),
        ];
        let surface = connect(&particles, 50.0);
        assert_eq!(surface.line_count(), 3);
    }

    #[test]
    fn test_connection_across_cell_boundary() {
        // 35 and 45 land in different 40px cells but are 10 apart.
        let particles = vec![particle_at(35.0, 0.0), particle_at(45.0, 0.0)];
        let surface = connect(&particles, 20.0);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_alpha_falloff() {
        // Touching pair: alpha 1.
        let particles = vec![particle_at(0.0, 0.0), particle_at(0.0, 0.0)];
        let surface = connect(&particles, 40.0);
        match &surface.ops[0] {
            DrawOp::Line { alpha, .. } => assert!((alpha - 1.0).abs() < 1e-6),
            op => panic!("expected line, got {:?}", op),
        }

        // Pair at exactly the threshold: alpha 0.
        let particles = vec![particle_at(0.0, 0.0), particle_at(40.0, 0.0)];
        let surface = connect(&particles, 40.0);
        assert_eq!(surface.line_count(), 1);
        match &surface.ops[0] {
            DrawOp::Line { alpha, .. } => assert!(alpha.abs() < 1e-6),
            op => panic!("expected line, got {:?}", op),
        }
    }

    #[test]
    fn test_beyond_threshold_not_connected() {
        let particles = vec![particle_at(0.0, 0.0), particle_at(40.1, 0.0)];
        let surface = connect(&particles, 40.0);
        assert_eq!(surface.line_count(), 0);
    }

    #[test]
    fn test_zero_distance_draws_nothing() {
        let particles = vec![particle_at(0.0, 0.0), particle_at(1.0, 0.0)];
        let mut grid = SpatialHashGrid::new(0.0, 40.0);
        for (i, p) in particles.iter().enumerate() {
            grid.insert(i, p.position.truncate());
        }
        let mut surface = RecordingSurface::new();
        grid.draw_connections(&particles, 0.0, &mut surface);
        assert_eq!(surface.line_count(), 0);
    }

    #[test]
    fn test_dense_cluster_pair_count() {
        // 5 particles all within range of each other: C(5,2) = 10 lines,
        // no duplicates regardless of bucket layout.
        let particles: Vec<_> = (0..5).map(|i| particle_at(i as f32 * 3.0, 0.0)).collect();
        let surface = connect(&particles, 50.0);
        assert_eq!(surface.line_count(), 10);
    }

    #[test]
    fn test_inserted_position_wins_over_particle_position() {
        // The grid measures the positions it was given at insert time, not
        // whatever the particle struct holds (the depth variant inserts
        // projected coordinates).
        let particles = vec![particle_at(0.0, 0.0), particle_at(500.0, 0.0)];
        let mut grid = SpatialHashGrid::new(40.0, 40.0);
        grid.insert(0, Vec2::new(0.0, 0.0));
        grid.insert(1, Vec2::new(10.0, 0.0));
        let mut surface = RecordingSurface::new();
        grid.draw_connections(&particles, 40.0, &mut surface);
        assert_eq!(surface.line_count(), 1);
    }
}
