//! # Headless demo
//!
//! Runs the simulation against a still frame (a synthetic gradient, or an
//! image passed on the command line) and prints what each phase of the run
//! emitted. No window, no GPU — the drawing surface is a recorder.
//!
//! Run with: `cargo run --example headless --release [-- path/to/image.png]`

use lumafield::prelude::*;
use lumafield::source::gradient_frame;

fn main() {
    let (width, height) = (640, 360);

    let source = match std::env::args().nth(1) {
        Some(path) => match StillSource::open(&path) {
            Ok(src) => {
                println!("Frame: {}", path);
                src
            }
            Err(e) => {
                eprintln!("Could not load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Frame: synthetic {}x{} gradient", width, height);
            StillSource::new(gradient_frame(width, height))
        }
    };

    for preset in [
        StylePreset::StarryNight,
        StylePreset::Constellation,
        StylePreset::Nebula,
    ] {
        let mut sim = Simulation::new(width, height)
            .with_style(preset.config())
            .with_fixed_delta(1.0 / 60.0)
            .with_seed(42);

        // Park a pointer mid-frame so the repulsion path runs too.
        sim.pointer_mut().set_manual(Vec2::new(
            width as f32 * 0.5,
            height as f32 * 0.5,
        ));

        let mut surface = RecordingSurface::new();
        let mut last = TickStatus::Stepped;
        for _ in 0..120 {
            surface.clear();
            last = sim.tick(&source, &mut surface);
        }

        println!(
            "{:?}: {} particles | last tick: {:?}, {} fills, {} lines, {} fades",
            preset,
            sim.particle_count(),
            last,
            surface.fill_count(),
            surface.line_count(),
            surface.fade_count(),
        );
    }
}
