//! The force model.
//!
//! Each tick a particle accumulates velocity increments from up to five
//! independent contributions: the origin-return spring, the brightness
//! flow field, random jitter, pointer repulsion, and (in the depth variant)
//! a Z spring. Contributions are purely additive and commute; each is gated
//! by its own configuration strength.
//!
//! Everything except the jitter term is a deterministic function of
//! (particle state, brightness field, pointer snapshot, elapsed time), so a
//! replay with the noise strength at zero reproduces velocities bit for bit.

use glam::{Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::field::BrightnessField;
use crate::particle::Particle;
use crate::pointer::{PointerKind, PointerState};
use crate::style::{StyleConfig, Tuning};

/// Per-tick context shared by every particle's force evaluation.
pub struct ForceContext<'a> {
    /// Active style.
    pub style: &'a StyleConfig,
    /// Tuning constants.
    pub tuning: &'a Tuning,
    /// This tick's brightness field.
    pub field: &'a BrightnessField,
    /// Pointer snapshot taken at the top of the tick.
    pub pointer: PointerState,
    /// Elapsed simulation time in seconds, drives the turbulence phase.
    pub time: f32,
}

/// Deterministic pseudo-turbulence, one component per axis.
///
/// `sin(x·k + t)·cos(y·k + t)` and its axis-swapped partner. The same
/// (position, time) always yields the same value — there is no randomness
/// here, which is what makes force replays reproducible.
pub fn turbulence(position: Vec2, t: f32, frequency: f32) -> Vec2 {
    let px = position.x * frequency;
    let py = position.y * frequency;
    Vec2::new(
        (px + t).sin() * (py + t).cos(),
        (px + t).cos() * (py + t).sin(),
    )
}

/// Accumulate all deterministic velocity increments for one particle.
///
/// The stochastic jitter term lives in [`noise_jitter`] so callers (and
/// tests) can replay this function exactly.
pub fn accumulate(p: &Particle, ctx: &ForceContext<'_>) -> Vec3 {
    let mut dv = Vec3::ZERO;
    dv += spring(p, ctx).extend(0.0);
    dv += flow(p, ctx).extend(0.0);
    dv += pointer_repulsion(p, ctx);
    if ctx.style.depth_enabled() {
        dv.z += depth_spring(p, ctx);
    }
    dv
}

/// Origin-return spring. The dominant force: it is what keeps the field
/// recognizable as the source image.
///
/// `Δv = (origin − position) × snap`, with snap scaling up with brightness
/// so lit subjects anchor crisply while dim background drifts.
fn spring(p: &Particle, ctx: &ForceContext<'_>) -> Vec2 {
    let t = ctx.tuning;
    let lit = (p.brightness / 255.0).clamp(0.0, 1.0);
    let snap = t.snap_base
        * ctx.style.speed
        * (t.snap_floor + (1.0 - t.snap_floor) * lit);
    (p.origin() - p.position.truncate()) * snap
}

/// Brightness-gradient flow with blended turbulence.
///
/// The gradient is estimated from cardinal neighbor cells; motion follows
/// the iso-brightness contour (perpendicular to the gradient). Turbulence
/// is attenuated by brightness so lit subjects stay put while the
/// background churns.
fn flow(p: &Particle, ctx: &ForceContext<'_>) -> Vec2 {
    if ctx.style.flow_strength <= 0.0 {
        return Vec2::ZERO;
    }
    let t = ctx.tuning;
    let (x, y) = (p.position.x, p.position.y);
    let o = t.flow_cell_offset;

    let gx = ctx.field.sample_offset(x, y, o, 0) - ctx.field.sample_offset(x, y, -o, 0);
    let gy = ctx.field.sample_offset(x, y, 0, o) - ctx.field.sample_offset(x, y, 0, -o);
    let gradient = Vec2::new(gx, gy);

    let mut dv = Vec2::ZERO;
    let mag = gradient.length();
    if mag > f32::EPSILON {
        // Contour-following: run along iso-brightness lines.
        let tangent = Vec2::new(-gy, gx) / mag;
        dv += tangent * ctx.style.flow_strength * (mag / 255.0).min(1.0);
    }

    let damp = 1.0 - t.turbulence_damp * (p.brightness / 255.0).clamp(0.0, 1.0);
    let phase = ctx.time * t.turbulence_speed;
    dv += turbulence(p.position.truncate(), phase, t.turbulence_frequency)
        * ctx.style.flow_strength
        * t.turbulence_amplitude
        * damp;

    dv
}

/// Pointer repulsion, pushing particles out of a radius around the pointer.
///
/// A tracked hand gets a wider radius and a stronger push than a precise
/// pointer. Falls off linearly from full strength at the pointer to zero at
/// the radius. In the depth variant the pointer sits at a fixed virtual
/// depth in front of the scene and the push gains a Z component.
fn pointer_repulsion(p: &Particle, ctx: &ForceContext<'_>) -> Vec3 {
    if !ctx.pointer.active {
        return Vec3::ZERO;
    }
    let t = ctx.tuning;
    let (radius, strength) = match ctx.pointer.kind {
        PointerKind::Precise => (t.pointer_radius, t.pointer_force),
        PointerKind::Tracked => (t.tracked_radius, t.tracked_force),
    };

    let pointer_pos = if ctx.style.depth_enabled() {
        ctx.pointer.position.extend(t.pointer_depth)
    } else {
        ctx.pointer.position.extend(0.0)
    };

    let away = p.position - pointer_pos;
    let dist = away.length();
    if dist >= radius || dist <= 0.001 {
        return Vec3::ZERO;
    }
    let force = (radius - dist) / radius * strength * ctx.style.speed;
    away / dist * force
}

/// Depth spring toward a brightness-proportional target depth.
fn depth_spring(p: &Particle, ctx: &ForceContext<'_>) -> f32 {
    let t = ctx.tuning;
    let lit = (p.brightness / 255.0).clamp(0.0, 1.0);
    let target_z = lit * t.depth_range * ctx.style.depth_strength;
    (target_z - p.position.z) * t.depth_spring
}

/// Independent per-axis random jitter — the one stochastic contribution.
///
/// The Z axis only jitters in the depth variant.
pub fn noise_jitter(strength: f32, depth: bool, rng: &mut SmallRng) -> Vec3 {
    if strength <= 0.0 {
        return Vec3::ZERO;
    }
    let axis = |rng: &mut SmallRng| (rng.gen::<f32>() - 0.5) * 2.0 * strength;
    Vec3::new(
        axis(rng),
        axis(rng),
        if depth { axis(rng) } else { 0.0 },
    )
}
