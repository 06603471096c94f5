//! Simulation owner and tick orchestration.
//!
//! One [`Simulation`] owns the particle grid, the pointer, the clock and
//! the active style. The host drives it by calling [`Simulation::tick`]
//! from whatever per-frame mechanism it has (frame callback, timer, test
//! loop); each tick runs to completion before the next is scheduled, and
//! nothing here is shared across threads. The only cross-context control is
//! the atomic pause flag, checked once at the top of each tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::field::BrightnessField;
use crate::forces::{self, ForceContext};
use crate::grid::ParticleGrid;
use crate::pointer::Pointer;
use crate::projection::Projector;
use crate::render::{draw_particle, DrawSurface};
use crate::source::FrameSource;
use crate::spatial::SpatialHashGrid;
use crate::style::{color_for, StyleConfig, Tuning};
use crate::time::Clock;

/// What a call to [`Simulation::tick`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Physics ran and particles were drawn.
    Stepped,
    /// The frame was not ready or the analysis buffer was degenerate; only
    /// the trail fade was applied so the visual keeps breathing.
    FadeOnly,
    /// The pause flag was set; nothing was touched.
    Paused,
}

/// A luminance-driven particle field over one viewport.
///
/// # Usage
///
/// ```ignore
/// let mut sim = Simulation::new(1280, 720)
///     .with_style(StylePreset::StarryNight.config());
///
/// // per frame:
/// sim.tick(&video, &mut surface);
/// ```
pub struct Simulation {
    width: u32,
    height: u32,
    style: StyleConfig,
    tuning: Tuning,
    grid: ParticleGrid,
    pointer: Pointer,
    projector: Projector,
    clock: Clock,
    paused: Arc<AtomicBool>,
    rng: SmallRng,
}

impl Simulation {
    /// Create a simulation for a viewport, with the default style.
    pub fn new(width: u32, height: u32) -> Self {
        let style = StyleConfig::default();
        let tuning = Tuning::default();
        let grid = Self::build_grid(width, height, &style);
        let projector = Projector::new(width, height, &tuning);
        Self {
            width,
            height,
            style,
            tuning,
            grid,
            pointer: Pointer::new(),
            projector,
            clock: Clock::new(),
            paused: Arc::new(AtomicBool::new(false)),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Replace the style (builder form).
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.set_style(style);
        self
    }

    /// Replace the tuning constants (builder form).
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.set_tuning(tuning);
        self
    }

    /// Pin a fixed per-tick delta for reproducible runs (builder form).
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.clock.set_fixed_delta(Some(delta));
        self
    }

    /// Seed the jitter RNG for reproducible runs (builder form).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    fn build_grid(width: u32, height: u32, style: &StyleConfig) -> ParticleGrid {
        ParticleGrid::new(width, height, style.gap, style.size_min)
    }

    /// Swap in a new style.
    ///
    /// A changed gap rebuilds the particle grid from scratch; all previous
    /// particle state is discarded. Other fields take effect next tick
    /// without touching the grid.
    pub fn set_style(&mut self, style: StyleConfig) {
        let respace = style.gap != self.grid.gap();
        self.style = style;
        if respace {
            self.grid = Self::build_grid(self.width, self.height, &self.style);
        }
    }

    /// Swap in new tuning constants.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning;
        self.projector = Projector::new(self.width, self.height, &self.tuning);
    }

    /// Resize the viewport. Rebuilds the grid and projector; previous
    /// particle state is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.grid = Self::build_grid(width, height, &self.style);
        self.projector = Projector::new(width, height, &self.tuning);
    }

    /// The active style.
    #[inline]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The active tuning constants.
    #[inline]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Number of particles in the grid.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.grid.len()
    }

    /// Shared view of the particles.
    #[inline]
    pub fn particles(&self) -> &[crate::particle::Particle] {
        self.grid.particles()
    }

    /// Mutable view of the particles.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [crate::particle::Particle] {
        self.grid.particles_mut()
    }

    /// The pointer, for feeding input events and tracker detections.
    #[inline]
    pub fn pointer_mut(&mut self) -> &mut Pointer {
        &mut self.pointer
    }

    /// Clone of the pause flag, for flipping from outside the tick context.
    pub fn pause_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.paused)
    }

    /// Set the pause flag. The current tick (if any) completes; the next
    /// one is skipped.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Relaxed);
    }

    /// Clear the pause flag.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    /// Whether the pause flag is set.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Run one tick: sample the frame, update every particle, draw, and
    /// run the connection pass.
    ///
    /// Never fails. Degraded inputs (frame not ready, analysis buffer
    /// collapsed, invalid style fields) disable the affected part of the
    /// tick and report what happened through [`TickStatus`].
    pub fn tick(&mut self, source: &dyn FrameSource, surface: &mut dyn DrawSurface) -> TickStatus {
        if self.paused.load(Ordering::Relaxed) {
            self.clock.pause();
            return TickStatus::Paused;
        }
        self.clock.resume();
        let (elapsed, _delta) = self.clock.update();

        // Trail fade runs on every non-paused tick, including degraded ones.
        let fade_alpha = 1.0 - self.style.trail_persistence.clamp(0.0, 1.0);
        if fade_alpha > 0.0 {
            surface.fade(self.style.background, fade_alpha);
        }

        let Some(frame) = source.frame().filter(|_| source.ready()) else {
            return TickStatus::FadeOnly;
        };
        let Some(field) =
            BrightnessField::from_frame(frame, self.width, self.height, self.tuning.analysis_scale)
        else {
            return TickStatus::FadeOnly;
        };

        surface.set_blend(self.style.blend_mode);

        let depth = self.style.depth_enabled();
        let mut spatial = self
            .style
            .connections_enabled()
            .then(|| SpatialHashGrid::new(self.style.connection_distance, self.tuning.connection_cell_floor));

        let ctx = ForceContext {
            style: &self.style,
            tuning: &self.tuning,
            field: &field,
            pointer: self.pointer.state(),
            time: elapsed,
        };
        let tuning = &self.tuning;
        let style = &self.style;
        let projector = &self.projector;
        let rng = &mut self.rng;

        for (index, p) in self.grid.particles_mut().iter_mut().enumerate() {
            let origin = p.origin();
            let brightness = field.sample(origin.x, origin.y);

            // Unlit: decay toward the size floor and skip everything else.
            if brightness < tuning.visibility_threshold {
                if p.size > tuning.size_floor {
                    p.size = (p.size * tuning.unlit_decay).max(tuning.size_floor);
                }
                continue;
            }

            p.brightness = brightness;
            p.color = color_for(brightness, &style.palette);

            // Ease size toward the brightness-interpolated target. An
            // inverted size range is a config error: clamp to the minimum.
            let target = if style.size_min <= style.size_max {
                style.size_min + (style.size_max - style.size_min) * (brightness / 255.0)
            } else {
                style.size_min
            };
            p.size += (target - p.size) * tuning.size_smoothing;

            let dv = forces::accumulate(p, &ctx)
                + forces::noise_jitter(style.noise_strength, depth, rng);
            p.velocity += dv;

            p.velocity.x *= style.friction;
            p.velocity.y *= style.friction;
            if depth {
                p.velocity.z *= tuning.depth_damping;
            }

            p.position += p.velocity;

            let (screen, scale) = if depth {
                match projector.project(p.position, elapsed) {
                    Some(proj) => (proj.screen, proj.scale),
                    // Culled: keeps simulating, just not drawn this tick.
                    None => continue,
                }
            } else {
                (p.position.truncate(), 1.0)
            };

            draw_particle(
                surface,
                style.shape,
                screen,
                p.size * scale,
                p.velocity.truncate(),
                p.color,
            );

            if let Some(grid) = spatial.as_mut() {
                grid.insert(index, screen);
            }
        }

        if let Some(grid) = spatial {
            grid.draw_connections(
                self.grid.particles(),
                self.style.connection_distance,
                surface,
            );
        }

        TickStatus::Stepped
    }
}
