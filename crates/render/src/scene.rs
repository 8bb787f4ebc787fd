//! End-to-end image generation: masses, field, palette, trajectories.
//!
//! The generator is consumed in a fixed order so a seed reproduces an image
//! exactly: masses (`x`, `y`, `m` each), palette shuffle, then per trajectory
//! the start point (`x`, `y`) and its color draw.

use gravlines_core::trajectory::random_start;
use gravlines_core::{generate_masses, trace, EngineError, Field, Palette, RenderConfig, Xorshift64};
use tracing::{debug, debug_span, info, warn};

use crate::canvas::Canvas;
use crate::draw::{render_field, render_mass, render_trajectory};

/// Renders the image described by `config`, seeding a fresh generator from
/// `config.seed`.
pub fn render(config: &RenderConfig) -> Result<Canvas, EngineError> {
    let mut rng = Xorshift64::new(config.seed);
    render_scene(config, &mut rng)
}

/// Renders the image described by `config`, drawing from `rng`.
///
/// Returns `EngineError::InvalidDimensions` if the config is rejected by
/// [`RenderConfig::validate`].
pub fn render_scene(config: &RenderConfig, rng: &mut Xorshift64) -> Result<Canvas, EngineError> {
    config.validate()?;

    let masses = generate_masses(config, rng);
    let field = {
        let _span = debug_span!("field", rows = config.rows(), cols = config.cols()).entered();
        Field::compute(&masses, config)?
    };

    // created already filled with the background
    let mut canvas = Canvas::new(config.width, config.height, config.background)?;

    let mut palette = Palette::default_strokes();
    palette.shuffle(rng);
    debug!(palette = ?palette.colors().iter().map(|c| c.to_hex()).collect::<Vec<_>>(), "shuffled palette");

    if config.show_overlay {
        let _span = debug_span!("overlay").entered();
        render_field(&mut canvas, &field);
        for mass in &masses {
            render_mass(&mut canvas, mass);
        }
    }

    if config.iterations == 0 && config.lines > 0 {
        warn!(lines = config.lines, "zero iterations: trajectories have no segments to draw");
    }

    {
        let _span = debug_span!("trajectories", lines = config.lines).entered();
        for _ in 0..config.lines {
            let start = random_start(config, rng);
            let trajectory = trace(start, &field, &palette, config, rng);
            render_trajectory(&mut canvas, &trajectory, config.stroke_width);
        }
    }

    info!(
        width = config.width,
        height = config.height,
        lines = config.lines,
        iterations = config.iterations,
        seed = config.seed,
        "rendered scene"
    );
    Ok(canvas)
}
