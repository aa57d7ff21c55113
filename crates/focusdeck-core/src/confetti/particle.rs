use rand::Rng;
use serde::{Deserialize, Serialize};

/// A position on the drawing surface. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Size of the visible drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Middle of the bottom edge, where session bursts erupt from.
    pub fn bottom_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height)
    }
}

/// How violent a burst is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstScale {
    /// Session completed.
    Large,
    /// Task checked off.
    Small,
}

impl BurstScale {
    /// Width of the horizontal velocity range.
    pub fn spread_x(self) -> f64 {
        match self {
            BurstScale::Large => 20.0,
            BurstScale::Small => 10.0,
        }
    }

    /// Width of the upward velocity range.
    pub fn spread_y(self) -> f64 {
        match self {
            BurstScale::Large => 25.0,
            BurstScale::Small => 15.0,
        }
    }
}

impl std::str::FromStr for BurstScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "large" => Ok(BurstScale::Large),
            "small" => Ok(BurstScale::Small),
            other => Err(format!("unknown burst scale: {other}")),
        }
    }
}

/// Fully saturated pastel colour; only the hue varies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hsl({:.0}, 100%, 70%)", self.hue)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub color: Hsl,
    /// Degrees.
    pub rotation: f64,
    /// Degrees per frame.
    pub rotation_speed: f64,
}

impl Particle {
    /// Spawn at `origin`, thrown upwards with a random spread set by `scale`.
    pub fn spawn<R: Rng + ?Sized>(origin: Point, scale: BurstScale, rng: &mut R) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            vx: (rng.gen::<f64>() - 0.5) * scale.spread_x(),
            vy: (rng.gen::<f64>() - 1.0) * scale.spread_y() - 5.0,
            size: rng.gen::<f64>() * 8.0 + 4.0,
            color: Hsl {
                hue: rng.gen::<f64>() * 360.0,
            },
            rotation: rng.gen::<f64>() * 360.0,
            rotation_speed: (rng.gen::<f64>() - 0.5) * 10.0,
        }
    }

    /// One frame of motion: move, then let gravity act on the vertical speed.
    pub fn advance(&mut self, gravity: f64) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;
        self.rotation += self.rotation_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for scale in [BurstScale::Large, BurstScale::Small] {
            for _ in 0..500 {
                let p = Particle::spawn(Point::new(10.0, 20.0), scale, &mut rng);
                assert_eq!((p.x, p.y), (10.0, 20.0));
                assert!(p.vx.abs() <= scale.spread_x() / 2.0);
                assert!(p.vy < -5.0 && p.vy >= -5.0 - scale.spread_y());
                assert!((4.0..12.0).contains(&p.size));
                assert!((0.0..360.0).contains(&p.color.hue));
                assert!(p.rotation_speed.abs() <= 5.0);
            }
        }
    }

    #[test]
    fn advance_applies_velocity_then_gravity() {
        let mut p = Particle {
            x: 0.0,
            y: 100.0,
            vx: 2.0,
            vy: -10.0,
            size: 5.0,
            color: Hsl { hue: 0.0 },
            rotation: 0.0,
            rotation_speed: 3.0,
        };
        p.advance(0.5);
        assert_eq!((p.x, p.y, p.vy, p.rotation), (2.0, 90.0, -9.5, 3.0));
    }

    #[test]
    fn hsl_renders_css_string() {
        assert_eq!(Hsl { hue: 200.4 }.to_string(), "hsl(200, 100%, 70%)");
    }

    #[test]
    fn viewport_anchors() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.bottom_center(), Point::new(400.0, 600.0));
        assert_eq!(vp.center(), Point::new(400.0, 300.0));
    }
}
