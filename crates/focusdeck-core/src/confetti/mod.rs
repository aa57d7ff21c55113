//! Decorative confetti bursts.
//!
//! Particles are spawned in batches and advanced once per frame with a
//! constant downward pull until every one of them has fallen out of view.
//! There is no collision or drag; motion is intentionally random and not
//! reproducible unless the animation is built with a seed.

mod animation;
mod particle;

pub use animation::{Canvas, ConfettiAnimation, Physics};
pub use particle::{BurstScale, Hsl, Particle, Point, Viewport};
