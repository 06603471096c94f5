//! # lumafield
//!
//! A luminance-driven particle field engine: a live video source rendered
//! as thousands of physically simulated particles whose color, size and
//! motion follow per-pixel brightness, producing painterly and abstract
//! styles.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lumafield::prelude::*;
//!
//! let mut sim = Simulation::new(1280, 720)
//!     .with_style(StylePreset::StarryNight.config());
//!
//! // Host frame callback:
//! loop {
//!     sim.tick(&video, &mut surface);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The tick
//!
//! Each call to [`Simulation::tick`] runs the whole pipeline once: the
//! current frame is collapsed into a [`BrightnessField`], every particle
//! samples brightness at its origin, maps it to color and size, gathers
//! force contributions, integrates, and is drawn; finally nearby particles
//! are joined by fading lines through a transient [`SpatialHashGrid`].
//! The host owns scheduling — a frame callback, a timer, or a plain test
//! loop — and flips an atomic pause flag to stop the field.
//!
//! ### Forces
//!
//! Velocity increments are additive and independently gated: an
//! origin-return spring that stiffens with brightness, a contour-following
//! flow field with deterministic pseudo-turbulence, optional random
//! jitter, pointer repulsion (mouse or tracked hand), and a depth spring
//! in the 3D variant.
//!
//! ### External collaborators
//!
//! Video capture, hand tracking and compositing live outside this crate.
//! They meet it at three seams: [`FrameSource`] supplies pixels,
//! [`Pointer`] receives input positions, and [`DrawSurface`] accepts
//! primitive draw calls.
//!
//! ### Styles
//!
//! A [`StyleConfig`] is immutable during a tick and swapped between ticks.
//! [`StylePreset`] ships complete looks; [`Tuning`] exposes the simulation
//! constants that differ between variants of the effect.

pub mod error;
pub mod field;
pub mod forces;
pub mod grid;
pub mod particle;
pub mod pointer;
pub mod projection;
pub mod render;
pub mod simulation;
pub mod source;
pub mod spatial;
pub mod style;
pub mod time;

pub use error::{ConfigError, FrameError};
pub use field::BrightnessField;
pub use glam::{Vec2, Vec3};
pub use grid::ParticleGrid;
pub use particle::Particle;
pub use pointer::{Pointer, PointerKind, PointerState};
pub use projection::{Projected, Projector};
pub use render::{draw_particle, DrawOp, DrawSurface, RecordingSurface};
pub use simulation::{Simulation, TickStatus};
pub use source::{FrameSource, PendingSource, StillSource};
pub use spatial::SpatialHashGrid;
pub use style::{color_for, BlendMode, ParticleShape, StyleConfig, StylePreset, Tuning};
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use lumafield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::pointer::{Pointer, PointerKind, PointerState};
    pub use crate::render::{DrawSurface, RecordingSurface};
    pub use crate::simulation::{Simulation, TickStatus};
    pub use crate::source::{FrameSource, StillSource};
    pub use crate::style::{BlendMode, ParticleShape, StyleConfig, StylePreset, Tuning};
    pub use crate::{Vec2, Vec3};
}
