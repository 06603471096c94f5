//! Drawing boundary and the shape renderer.
//!
//! The simulation never talks to a real canvas, GPU surface or window — it
//! issues primitive draw calls against the [`DrawSurface`] trait and lets
//! the host composite them. [`RecordingSurface`] captures those calls for
//! tests and headless runs.

use glam::{Vec2, Vec3};

use crate::style::{BlendMode, ParticleShape};

/// Receiver of primitive draw calls for one tick.
///
/// Implementations are expected to support both compositing modes of
/// [`BlendMode`]; `fade` must composite in normal mode regardless of the
/// currently selected blend so trails darken instead of accumulating.
pub trait DrawSurface {
    /// Select the compositing mode for subsequent particle draws.
    fn set_blend(&mut self, mode: BlendMode);

    /// Cover the whole surface with `color` at the given alpha.
    ///
    /// This is the trail fade: low alpha leaves long trails, alpha 1 wipes
    /// the previous frame completely.
    fn fade(&mut self, color: Vec3, alpha: f32);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3);

    /// Fill an axis-aligned square given its half extent.
    fn fill_square(&mut self, center: Vec2, half_extent: f32, color: Vec3);

    /// Stroke a line segment with the given width and alpha.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32);
}

/// Velocity magnitude below which a streak has no meaningful direction.
const STREAK_STILL: f32 = 0.05;

/// Draw one particle.
///
/// Pure dispatch on the closed shape set: state in, draw calls out. `size`
/// and stroke widths arrive pre-scaled by the caller (the projection step
/// scales them in the depth variant).
pub fn draw_particle(
    surface: &mut dyn DrawSurface,
    shape: ParticleShape,
    position: Vec2,
    size: f32,
    velocity: Vec2,
    color: Vec3,
) {
    match shape {
        ParticleShape::Disc => surface.fill_circle(position, size, color),
        ParticleShape::Square => surface.fill_square(position, size, color),
        ParticleShape::Streak => {
            let dir = if velocity.length() > STREAK_STILL {
                velocity.normalize()
            } else {
                Vec2::X
            };
            let half = dir * size;
            surface.stroke_line(
                position - half,
                position + half,
                (size * 0.4).max(0.5),
                color,
                1.0,
            );
        }
        ParticleShape::Cross => {
            let w = (size * 0.3).max(0.5);
            surface.stroke_line(
                position - Vec2::new(size, 0.0),
                position + Vec2::new(size, 0.0),
                w,
                color,
                1.0,
            );
            surface.stroke_line(
                position - Vec2::new(0.0, size),
                position + Vec2::new(0.0, size),
                w,
                color,
                1.0,
            );
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Blend mode change.
    SetBlend(BlendMode),
    /// Full-surface fade.
    Fade {
        /// Fade color.
        color: Vec3,
        /// Fade alpha.
        alpha: f32,
    },
    /// Filled disc.
    Circle {
        /// Center position.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Vec3,
    },
    /// Filled square.
    Square {
        /// Center position.
        center: Vec2,
        /// Half extent in pixels.
        half_extent: f32,
        /// Fill color.
        color: Vec3,
    },
    /// Stroked line.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Vec3,
        /// Stroke alpha.
        alpha: f32,
    },
}

/// A surface that records every call it receives.
///
/// The test double for the drawing boundary; also handy for headless runs
/// that want to count or inspect emitted primitives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// All recorded calls, in issue order.
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of recorded line strokes.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    /// Number of recorded shape fills (circles and squares).
    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. } | DrawOp::Square { .. }))
            .count()
    }

    /// Number of recorded fades.
    pub fn fade_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Fade { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_blend(&mut self, mode: BlendMode) {
        self.ops.push(DrawOp::SetBlend(mode));
    }

    fn fade(&mut self, color: Vec3, alpha: f32) {
        self.ops.push(DrawOp::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_square(&mut self, center: Vec2, half_extent: f32, color: Vec3) {
        self.ops.push(DrawOp::Square {
            center,
            half_extent,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Vec3, alpha: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_and_square_dispatch() {
        let mut surface = RecordingSurface::new();
        draw_particle(
            &mut surface,
            ParticleShape::Disc,
            Vec2::new(5.0, 5.0),
            2.0,
            Vec2::ZERO,
            Vec3::ONE,
        );
        draw_particle(
            &mut surface,
            ParticleShape::Square,
            Vec2::new(9.0, 9.0),
            3.0,
            Vec2::ZERO,
            Vec3::ONE,
        );
        assert_eq!(surface.fill_count(), 2);
        assert!(matches!(surface.ops[0], DrawOp::Circle { radius, .. } if radius == 2.0));
        assert!(matches!(surface.ops[1], DrawOp::Square { half_extent, .. } if half_extent == 3.0));
    }

    #[test]
    fn test_streak_follows_velocity() {
        let mut surface = RecordingSurface::new();
        draw_particle(
            &mut surface,
            ParticleShape::Streak,
            Vec2::new(10.0, 10.0),
            4.0,
            Vec2::new(0.0, 3.0),
            Vec3::ONE,
        );
        match &surface.ops[0] {
            DrawOp::Line { from, to, .. } => {
                assert_eq!(*from, Vec2::new(10.0, 6.0));
                assert_eq!(*to, Vec2::new(10.0, 14.0));
            }
            op => panic!("expected a line, got {:?}", op),
        }
    }

    #[test]
    fn test_streak_fallback_when_still() {
        let mut surface = RecordingSurface::new();
        draw_particle(
            &mut surface,
            ParticleShape::Streak,
            Vec2::new(10.0, 10.0),
            4.0,
            Vec2::new(0.001, 0.0),
            Vec3::ONE,
        );
        match &surface.ops[0] {
            DrawOp::Line { from, to, .. } => {
                // Horizontal fallback orientation.
                assert_eq!(from.y, to.y);
                assert!(from.x < to.x);
            }
            op => panic!("expected a line, got {:?}", op),
        }
    }

    #[test]
    fn test_cross_issues_two_strokes() {
        let mut surface = RecordingSurface::new();
        draw_particle(
            &mut surface,
            ParticleShape::Cross,
            Vec2::new(0.0, 0.0),
            2.0,
            Vec2::new(5.0, 5.0),
            Vec3::ONE,
        );
        // Orientation is fixed regardless of velocity.
        assert_eq!(surface.line_count(), 2);
    }
}
