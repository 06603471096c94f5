//! Style configuration for the particle field.
//!
//! A [`StyleConfig`] describes everything visual about a running field:
//! palette, particle sizing, lattice spacing, force strengths, trail fade
//! and compositing mode. Styles are immutable during a tick; swapping one in
//! takes effect at the next tick boundary.
//!
//! # Usage
//!
//! ```ignore
//! let sim = Simulation::new(1280, 720)
//!     .with_style(StylePreset::StarryNight.config())
//!     .with_tuning(Tuning::default());
//! ```

use glam::Vec3;

use crate::error::ConfigError;

/// Blend mode used when compositing particles onto the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over compositing (default).
    #[default]
    Normal,

    /// Additive ("lighter") compositing. Overlapping particles accumulate
    /// brightness, which reads as glow on dark backgrounds.
    Additive,
}

/// The visual primitive drawn for each particle.
///
/// A closed set dispatched once per particle per tick; the renderer matches
/// on it directly rather than going through any dynamic indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleShape {
    /// Filled disc (default).
    #[default]
    Disc,

    /// Filled axis-aligned square.
    Square,

    /// Line segment centered on the particle, oriented along its velocity.
    /// Falls back to a horizontal stroke when the particle is nearly still.
    Streak,

    /// Fixed upright cross, one stroke per axis.
    Cross,
}

/// Complete visual style for a particle field.
///
/// All force strengths gate their own contribution: a strength of zero
/// disables that term entirely. `connection_distance` of zero disables the
/// connective-line pass, including the spatial index build behind it.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Ordered color stops, indexed by quantized brightness. Must be
    /// non-empty for particles to pick up color.
    pub palette: Vec<Vec3>,
    /// Smallest rendered particle size, in pixels.
    pub size_min: f32,
    /// Largest rendered particle size, in pixels.
    pub size_max: f32,
    /// Lattice spacing in pixels. One particle is placed every `gap` pixels
    /// in both axes at (re)initialization.
    pub gap: i32,
    /// Global speed multiplier applied to spring and pointer forces.
    pub speed: f32,
    /// Per-tick velocity retention, strictly inside (0, 1).
    pub friction: f32,
    /// Maximum distance at which two particles are joined by a fading line.
    /// Zero disables connective rendering.
    pub connection_distance: f32,
    /// How strongly previous frames persist, in [0, 1]. 0 clears every tick;
    /// values near 1 leave long trails.
    pub trail_persistence: f32,
    /// Per-axis random jitter strength. The only stochastic force term.
    pub noise_strength: f32,
    /// Strength of the brightness-gradient flow field. Zero disables it.
    pub flow_strength: f32,
    /// Strength of brightness-proportional depth displacement. Zero keeps
    /// the simulation flat; any positive value enables the 3D variant.
    pub depth_strength: f32,
    /// Compositing mode for particle draws.
    pub blend_mode: BlendMode,
    /// Primitive drawn per particle.
    pub shape: ParticleShape,
    /// Background color laid down by the trail fade.
    pub background: Vec3,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: vec![Vec3::splat(0.2), Vec3::splat(0.6), Vec3::ONE],
            size_min: 0.5,
            size_max: 4.0,
            gap: 10,
            speed: 1.0,
            friction: 0.9,
            connection_distance: 0.0,
            trail_persistence: 0.6,
            noise_strength: 0.0,
            flow_strength: 0.0,
            depth_strength: 0.0,
            blend_mode: BlendMode::Normal,
            shape: ParticleShape::Disc,
            background: Vec3::ZERO,
        }
    }
}

impl StyleConfig {
    /// Check every field against the ranges the simulation expects.
    ///
    /// The tick loop tolerates invalid styles by disabling the affected
    /// feature; this is for hosts that want to reject bad input up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gap <= 0 {
            return Err(ConfigError::NonPositiveGap(self.gap));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.size_min > self.size_max {
            return Err(ConfigError::InvalidSizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        if !(0.0..=1.0).contains(&self.trail_persistence) {
            return Err(ConfigError::TrailOutOfRange(self.trail_persistence));
        }
        Ok(())
    }

    /// Whether the 3D depth variant is active.
    #[inline]
    pub fn depth_enabled(&self) -> bool {
        self.depth_strength > 0.0
    }

    /// Whether the connective-line pass should run.
    #[inline]
    pub fn connections_enabled(&self) -> bool {
        self.connection_distance > 0.0
    }
}

/// Map a brightness sample to a palette entry.
///
/// `index = floor((brightness / 255) * (len - 1))`, clamped into range.
/// Deterministic and pure: identical inputs always return the identical
/// palette entry. An empty palette yields white rather than panicking.
pub fn color_for(brightness: f32, palette: &[Vec3]) -> Vec3 {
    if palette.is_empty() {
        return Vec3::ONE;
    }
    let last = palette.len() - 1;
    let index = ((brightness / 255.0) * last as f32).floor() as isize;
    palette[index.clamp(0, last as isize) as usize]
}

/// Pre-built styles.
///
/// Each preset is a complete [`StyleConfig`]; use `config()` as a starting
/// point and override fields as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    /// Swirling golds on deep blue, heavy flow field, soft trails.
    StarryNight,
    /// Sparse bright points joined by fading lines on near-black.
    Constellation,
    /// Additive fire colors with restless jitter.
    Ember,
    /// Grayscale squares, crisp, no trails.
    Monochrome,
    /// Additive violet depth field (3D variant).
    Nebula,
}

impl StylePreset {
    /// Build the full style for this preset.
    pub fn config(&self) -> StyleConfig {
        match self {
            StylePreset::StarryNight => StyleConfig {
                palette: vec![
                    Vec3::new(0.04, 0.07, 0.22),
                    Vec3::new(0.10, 0.20, 0.45),
                    Vec3::new(0.35, 0.45, 0.65),
                    Vec3::new(0.85, 0.75, 0.35),
                    Vec3::new(1.0, 0.92, 0.55),
                ],
                size_min: 1.0,
                size_max: 5.0,
                gap: 8,
                speed: 1.2,
                friction: 0.92,
                connection_distance: 0.0,
                trail_persistence: 0.82,
                noise_strength: 0.12,
                flow_strength: 1.6,
                depth_strength: 0.0,
                blend_mode: BlendMode::Normal,
                shape: ParticleShape::Streak,
                background: Vec3::new(0.02, 0.03, 0.08),
            },
            StylePreset::Constellation => StyleConfig {
                palette: vec![
                    Vec3::new(0.55, 0.65, 0.85),
                    Vec3::new(0.75, 0.82, 0.95),
                    Vec3::ONE,
                ],
                size_min: 0.6,
                size_max: 2.6,
                gap: 16,
                speed: 0.8,
                friction: 0.9,
                connection_distance: 48.0,
                trail_persistence: 0.3,
                noise_strength: 0.05,
                flow_strength: 0.0,
                depth_strength: 0.0,
                blend_mode: BlendMode::Normal,
                shape: ParticleShape::Disc,
                background: Vec3::new(0.01, 0.01, 0.03),
            },
            StylePreset::Ember => StyleConfig {
                palette: vec![
                    Vec3::new(0.1, 0.0, 0.0),
                    Vec3::new(0.5, 0.05, 0.0),
                    Vec3::new(1.0, 0.3, 0.0),
                    Vec3::new(1.0, 0.7, 0.1),
                    Vec3::new(1.0, 1.0, 0.75),
                ],
                size_min: 0.8,
                size_max: 3.6,
                gap: 9,
                speed: 1.4,
                friction: 0.88,
                connection_distance: 0.0,
                trail_persistence: 0.7,
                noise_strength: 0.4,
                flow_strength: 0.9,
                depth_strength: 0.0,
                blend_mode: BlendMode::Additive,
                shape: ParticleShape::Disc,
                background: Vec3::ZERO,
            },
            StylePreset::Monochrome => StyleConfig {
                palette: vec![
                    Vec3::splat(0.15),
                    Vec3::splat(0.4),
                    Vec3::splat(0.65),
                    Vec3::splat(0.9),
                ],
                size_min: 1.0,
                size_max: 6.0,
                gap: 12,
                speed: 1.0,
                friction: 0.9,
                connection_distance: 0.0,
                trail_persistence: 0.0,
                noise_strength: 0.0,
                flow_strength: 0.0,
                depth_strength: 0.0,
                blend_mode: BlendMode::Normal,
                shape: ParticleShape::Square,
                background: Vec3::ZERO,
            },
            StylePreset::Nebula => StyleConfig {
                palette: vec![
                    Vec3::new(0.12, 0.02, 0.25),
                    Vec3::new(0.35, 0.08, 0.5),
                    Vec3::new(0.7, 0.25, 0.75),
                    Vec3::new(0.95, 0.6, 0.9),
                ],
                size_min: 0.8,
                size_max: 4.2,
                gap: 10,
                speed: 1.0,
                friction: 0.9,
                connection_distance: 0.0,
                trail_persistence: 0.75,
                noise_strength: 0.15,
                flow_strength: 0.6,
                depth_strength: 1.0,
                blend_mode: BlendMode::Additive,
                shape: ParticleShape::Disc,
                background: Vec3::new(0.01, 0.0, 0.04),
            },
        }
    }
}

/// Tunable simulation constants.
///
/// The source material runs several slightly divergent variants of the same
/// simulation, each with its own decay factors, force radii and smoothing
/// constants. Rather than bless any one variant's literals, every such knob
/// lives here with a workable default.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Fraction of the viewport resolution at which brightness is analyzed.
    pub analysis_scale: f32,
    /// Brightness below which a particle is treated as unlit.
    pub visibility_threshold: f32,
    /// Exponential smoothing factor easing size toward its target.
    pub size_smoothing: f32,
    /// Per-tick multiplicative size decay for unlit particles.
    pub unlit_decay: f32,
    /// Size floor under which unlit decay stops.
    pub size_floor: f32,
    /// Base spring constant for the origin-return force.
    pub snap_base: f32,
    /// Fraction of snap strength retained at zero brightness. Brighter
    /// samples anchor harder; dim ones drift.
    pub snap_floor: f32,
    /// Cardinal offset, in analysis cells, for the gradient estimate.
    pub flow_cell_offset: i32,
    /// Spatial frequency of the deterministic pseudo-turbulence term.
    pub turbulence_frequency: f32,
    /// Rate at which the turbulence time parameter advances.
    pub turbulence_speed: f32,
    /// Turbulence contribution per unit of flow strength.
    pub turbulence_amplitude: f32,
    /// How much brightness attenuates turbulence, in [0, 1]. At 1, fully lit
    /// particles ignore turbulence entirely.
    pub turbulence_damp: f32,
    /// Pointer repulsion radius for a precise source (mouse/touch), pixels.
    pub pointer_radius: f32,
    /// Pointer repulsion strength for a precise source.
    pub pointer_force: f32,
    /// Repulsion radius for a tracked hand; wider than the precise radius
    /// because detections wobble.
    pub tracked_radius: f32,
    /// Repulsion strength for a tracked hand.
    pub tracked_force: f32,
    /// Maximum brightness-proportional depth displacement, pixels.
    pub depth_range: f32,
    /// Spring constant pulling a particle toward its target depth.
    pub depth_spring: f32,
    /// Per-tick Z velocity retention (3D variant only).
    pub depth_damping: f32,
    /// Virtual pointer depth in front of the scene (3D variant).
    pub pointer_depth: f32,
    /// Lower bound on the spatial-hash cell size, pixels.
    pub connection_cell_floor: f32,
    /// Perspective focal length, pixels.
    pub focal_length: f32,
    /// Amplitude of the ambient camera sway, radians.
    pub sway_amplitude: f32,
    /// Angular rate of the sway around the Y axis.
    pub sway_rate_x: f32,
    /// Angular rate of the sway around the X axis.
    pub sway_rate_y: f32,
    /// How far outside the viewport a projected particle may fall before it
    /// is culled from drawing, pixels.
    pub cull_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            analysis_scale: 0.14,
            visibility_threshold: 10.0,
            size_smoothing: 0.1,
            unlit_decay: 0.9,
            size_floor: 0.1,
            snap_base: 0.01,
            snap_floor: 0.25,
            flow_cell_offset: 1,
            turbulence_frequency: 0.02,
            turbulence_speed: 0.5,
            turbulence_amplitude: 0.5,
            turbulence_damp: 0.6,
            pointer_radius: 90.0,
            pointer_force: 2.0,
            tracked_radius: 140.0,
            tracked_force: 3.0,
            depth_range: 120.0,
            depth_spring: 0.05,
            depth_damping: 0.92,
            pointer_depth: 160.0,
            connection_cell_floor: 40.0,
            focal_length: 600.0,
            sway_amplitude: 0.08,
            sway_rate_x: 0.23,
            sway_rate_y: 0.31,
            cull_margin: 64.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_endpoints() {
        let palette = vec![Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE];
        assert_eq!(color_for(0.0, &palette), Vec3::ZERO);
        assert_eq!(color_for(255.0, &palette), Vec3::ONE);
    }

    #[test]
    fn test_color_for_deterministic() {
        let palette = StylePreset::StarryNight.config().palette;
        let a = color_for(131.0, &palette);
        let b = color_for(131.0, &palette);
        assert_eq!(a, b, "identical inputs must return the identical entry");
    }

    #[test]
    fn test_color_for_quantization() {
        // 4 stops: brightness bands are [0,85), [85,170), [170,255), {255}
        let palette = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::ONE,
        ];
        assert_eq!(color_for(84.0, &palette), palette[0]);
        assert_eq!(color_for(85.0, &palette), palette[1]);
        assert_eq!(color_for(254.0, &palette), palette[2]);
    }

    #[test]
    fn test_color_for_out_of_range_clamps() {
        let palette = vec![Vec3::ZERO, Vec3::ONE];
        assert_eq!(color_for(-40.0, &palette), Vec3::ZERO);
        assert_eq!(color_for(400.0, &palette), Vec3::ONE);
    }

    #[test]
    fn test_color_for_empty_palette() {
        assert_eq!(color_for(128.0, &[]), Vec3::ONE);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(StyleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut style = StyleConfig::default();
        style.gap = 0;
        assert!(matches!(
            style.validate(),
            Err(crate::error::ConfigError::NonPositiveGap(0))
        ));

        let mut style = StyleConfig::default();
        style.palette.clear();
        assert!(matches!(
            style.validate(),
            Err(crate::error::ConfigError::EmptyPalette)
        ));

        let mut style = StyleConfig::default();
        style.size_min = 10.0;
        style.size_max = 1.0;
        assert!(style.validate().is_err());

        let mut style = StyleConfig::default();
        style.friction = 1.0;
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_presets_validate() {
        for preset in [
            StylePreset::StarryNight,
            StylePreset::Constellation,
            StylePreset::Ember,
            StylePreset::Monochrome,
            StylePreset::Nebula,
        ] {
            assert!(
                preset.config().validate().is_ok(),
                "{:?} preset must be valid",
                preset
            );
        }
    }

    #[test]
    fn test_depth_gating() {
        assert!(!StylePreset::StarryNight.config().depth_enabled());
        assert!(StylePreset::Nebula.config().depth_enabled());
        assert!(StylePreset::Constellation.config().connections_enabled());
        assert!(!StylePreset::Ember.config().connections_enabled());
    }
}
