//! Offline confetti runs, handy for tuning the physics settings.

use clap::Subcommand;
use focusdeck_core::confetti::Canvas;
use focusdeck_core::{BurstScale, Config, ConfettiAnimation, Particle, Viewport};
use serde::Serialize;

const MAX_FRAMES: usize = 100_000;

#[derive(Subcommand)]
pub enum ConfettiAction {
    /// Fire one burst and run the frame loop until it settles
    Simulate {
        /// Burst scale: large (session end) or small (task done)
        #[arg(long, default_value = "large")]
        scale: BurstScale,
        /// Particle count (defaults to the configured count for the scale)
        #[arg(long)]
        count: Option<usize>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Print an ASCII frame every N frames
        #[arg(long)]
        draw_every: Option<usize>,
    },
}

#[derive(Serialize)]
struct SimulationSummary {
    scale: BurstScale,
    particles: usize,
    frames: usize,
    settled: bool,
}

/// Rasterizes particles onto a character grid.
struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    cells: Vec<char>,
}

impl AsciiCanvas {
    fn new(viewport: Viewport, cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cell_w: viewport.width / cols as f64,
            cell_h: viewport.height / rows as f64,
            cells: vec![' '; cols * rows],
        }
    }

    fn to_text(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for AsciiCanvas {
    fn clear(&mut self, viewport: Viewport) {
        self.cell_w = viewport.width / self.cols as f64;
        self.cell_h = viewport.height / self.rows as f64;
        self.cells.fill(' ');
    }

    fn draw_particle(&mut self, particle: &Particle) {
        if particle.x < 0.0 || particle.y < 0.0 {
            return;
        }
        let col = (particle.x / self.cell_w) as usize;
        let row = (particle.y / self.cell_h) as usize;
        if col < self.cols && row < self.rows {
            const GLYPHS: [char; 4] = ['*', '+', 'o', '.'];
            let glyph = GLYPHS[(particle.color.hue / 90.0) as usize % GLYPHS.len()];
            self.cells[row * self.cols + col] = glyph;
        }
    }
}

pub fn run(action: ConfettiAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        ConfettiAction::Simulate {
            scale,
            count,
            seed,
            draw_every,
        } => {
            let viewport = config.display.viewport();
            let physics = config.confetti.physics();
            let mut anim = match seed {
                Some(seed) => ConfettiAnimation::with_seed(viewport, physics, seed),
                None => ConfettiAnimation::new(viewport, physics),
            };
            let count = count.unwrap_or(match scale {
                BurstScale::Large => config.confetti.session_particles,
                BurstScale::Small => config.confetti.task_particles,
            });
            let origin = match scale {
                BurstScale::Large => viewport.bottom_center(),
                BurstScale::Small => viewport.center(),
            };
            anim.burst(origin, count, scale);

            let mut canvas = AsciiCanvas::new(viewport, 64, 20);
            let mut frames = 0;
            while frames < MAX_FRAMES && anim.frame() {
                frames += 1;
                if let Some(n) = draw_every.filter(|n| *n > 0) {
                    if frames % n == 0 {
                        anim.render(&mut canvas);
                        println!("-- frame {frames} ({} particles)", anim.particles().len());
                        println!("{}", canvas.to_text());
                    }
                }
            }

            let summary = SimulationSummary {
                scale,
                particles: count,
                frames,
                settled: !anim.is_running(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
