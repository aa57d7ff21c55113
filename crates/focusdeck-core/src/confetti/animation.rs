//! Frame loop for the live particle set.
//!
//! The animation does not own a frame timer. `burst()` reports whether it
//! (re)started the loop, the host then calls `frame()` once per display
//! frame until it returns `false`, at which point the host drops its timer.

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::particle::{BurstScale, Particle, Point, Viewport};

/// Physics constants shared by every particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    /// Added to `vy` every frame.
    pub gravity: f64,
    /// Particles further than this below the visible area are dropped.
    pub cull_margin: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            cull_margin: 100.0,
        }
    }
}

/// Drawing target for `ConfettiAnimation::render`.
pub trait Canvas {
    fn clear(&mut self, viewport: Viewport);
    fn draw_particle(&mut self, particle: &Particle);
}

pub struct ConfettiAnimation {
    particles: Vec<Particle>,
    viewport: Viewport,
    physics: Physics,
    running: bool,
    rng: Mcg128Xsl64,
}

impl ConfettiAnimation {
    /// Animation with an entropy-seeded generator.
    pub fn new(viewport: Viewport, physics: Physics) -> Self {
        Self::with_rng(viewport, physics, Mcg128Xsl64::from_entropy())
    }

    /// Animation whose bursts are reproducible.
    pub fn with_seed(viewport: Viewport, physics: Physics, seed: u64) -> Self {
        Self::with_rng(viewport, physics, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, physics: Physics, rng: Mcg128Xsl64) -> Self {
        Self {
            particles: Vec::new(),
            viewport,
            physics,
            running: false,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Spawn `count` particles at `origin`.
    ///
    /// Returns `true` if the frame loop was stopped and is now running again,
    /// i.e. the host has to schedule frames.
    pub fn burst(&mut self, origin: Point, count: usize, scale: BurstScale) -> bool {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(origin, scale, &mut self.rng));
        }
        debug!(count, ?scale, live = self.particles.len(), "confetti burst");

        if self.running || self.particles.is_empty() {
            return false;
        }
        self.running = true;
        true
    }

    /// Advance every particle by one frame and cull the fallen ones.
    ///
    /// Returns whether the loop keeps running. Once no particle is above the
    /// bottom edge the loop stops and the live set is emptied.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let Physics {
            gravity,
            cull_margin,
        } = self.physics;
        let height = self.viewport.height;

        let mut on_screen = false;
        for p in &mut self.particles {
            p.advance(gravity);
            on_screen |= p.y < height;
        }
        self.particles.retain(|p| p.y < height + cull_margin);

        if !on_screen {
            self.particles.clear();
            self.running = false;
            debug!("confetti settled");
        }
        self.running
    }

    /// Clear the canvas and draw the live particles.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear(self.viewport);
        for p in &self.particles {
            canvas.draw_particle(p);
        }
    }

    /// Drive the loop until it stops, returning the number of frames taken.
    /// `max_frames` guards against physics settings that never settle.
    pub fn run_to_completion(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.frame() {
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation() -> ConfettiAnimation {
        ConfettiAnimation::with_seed(Viewport::new(800.0, 600.0), Physics::default(), 42)
    }

    #[derive(Default)]
    struct CountingCanvas {
        clears: usize,
        drawn: usize,
    }

    impl Canvas for CountingCanvas {
        fn clear(&mut self, _viewport: Viewport) {
            self.clears += 1;
            self.drawn = 0;
        }

        fn draw_particle(&mut self, _particle: &Particle) {
            self.drawn += 1;
        }
    }

    #[test]
    fn large_burst_settles_to_empty_stopped_loop() {
        let mut anim = animation();
        let origin = anim.viewport().bottom_center();
        assert!(anim.burst(origin, 150, BurstScale::Large));
        assert_eq!(anim.particles().len(), 150);

        let frames = anim.run_to_completion(10_000);
        assert!(frames > 0 && frames < 10_000);
        assert!(anim.particles().is_empty());
        assert!(!anim.is_running());
        assert!(!anim.frame());
    }

    #[test]
    fn second_burst_does_not_restart_running_loop() {
        let mut anim = animation();
        let origin = anim.viewport().center();
        assert!(anim.burst(origin, 10, BurstScale::Small));
        assert!(!anim.burst(origin, 10, BurstScale::Small));
        assert_eq!(anim.particles().len(), 20);
    }

    #[test]
    fn burst_after_settling_restarts_loop() {
        let mut anim = animation();
        let origin = anim.viewport().center();
        anim.burst(origin, 5, BurstScale::Small);
        anim.run_to_completion(10_000);
        assert!(!anim.is_running());
        assert!(anim.burst(origin, 5, BurstScale::Small));
        assert!(anim.is_running());
    }

    #[test]
    fn empty_burst_leaves_loop_stopped() {
        let mut anim = animation();
        assert!(!anim.burst(Point::default(), 0, BurstScale::Large));
        assert!(!anim.is_running());
    }

    #[test]
    fn particles_below_margin_are_culled_while_others_fly() {
        let mut anim = animation();
        anim.burst(Point::new(100.0, 100.0), 1, BurstScale::Small);
        // Anything spawned far below the view falls straight out.
        anim.burst(Point::new(100.0, 600.0 + 500.0), 3, BurstScale::Small);
        anim.frame();
        assert_eq!(anim.particles().len(), 1);
        assert!(anim.is_running());
    }

    #[test]
    fn render_draws_every_live_particle() {
        let mut anim = animation();
        anim.burst(Point::new(50.0, 50.0), 12, BurstScale::Small);
        let mut canvas = CountingCanvas::default();
        anim.render(&mut canvas);
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.drawn, 12);
    }

    #[test]
    fn seeded_animations_repeat() {
        let mut a = animation();
        let mut b = animation();
        a.burst(Point::default(), 3, BurstScale::Large);
        b.burst(Point::default(), 3, BurstScale::Large);
        assert_eq!(a.particles(), b.particles());
    }
}
