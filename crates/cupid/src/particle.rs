use crate::geometry::{Point, Size};
use crate::surface::Sprite;
use crate::swatch::{CONFETTI_PALETTE, Swatch};
use crate::tuning::ConfettiTuning;
use rand::Rng;
use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { width: f64, height: f64 },
    Disc { radius: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub dx: f64,
    pub dy: f64,
    pub rotation: f64,
    pub spin: f64,
    pub color: Swatch,
    shape: Shape,
}

impl Particle {
    /// Somewhere across the full width, up to one surface height above the top edge, so the
    /// batch falls into view.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Size, tuning: &ConfettiTuning) -> Self {
        let x = rng.random::<f64>() * bounds.width;
        let y = rng.random::<f64>() * bounds.height - bounds.height;

        let rect_chance = if tuning.rect_chance.is_nan() {
            0.0
        } else {
            tuning.rect_chance.clamp(0.0, 1.0)
        };
        let shape = if rng.random_bool(rect_chance) {
            Shape::Rect {
                width: tuning.rect_width.sample(rng),
                height: tuning.rect_height.sample(rng),
            }
        } else {
            Shape::Disc {
                radius: tuning.radius.sample(rng),
            }
        };

        let color = tuning
            .palette
            .choose(rng)
            .copied()
            .unwrap_or(CONFETTI_PALETTE[0]);

        Self {
            position: Point::new(x, y),
            dx: tuning.drift.sample(rng),
            dy: tuning.fall_speed.sample(rng),
            rotation: rng.random_range(0.0..360.0),
            spin: tuning.spin.sample(rng),
            color,
            shape,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_expired(&self, surface_height: f64, margin: f64) -> bool {
        self.position.y > surface_height + margin
    }

    pub fn advance(&mut self, gravity: f64) {
        self.position.x += self.dx;
        self.position.y += self.dy;
        self.dy += gravity;
        self.rotation += self.spin;
    }

    /// Fully opaque well above the bottom edge, fading out linearly as the particle sinks past it.
    pub fn opacity(&self, surface_height: f64, fade_offset: f64, fade_span: f64) -> f64 {
        if fade_span <= 0.0 {
            return 1.0;
        }
        ((surface_height - self.position.y + fade_offset) / fade_span).clamp(0.0, 1.0)
    }

    pub fn sprite(&self, alpha: f64) -> Sprite {
        Sprite {
            center: self.position,
            rotation: self.rotation,
            shape: self.shape,
            color: self.color,
            alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn particle_at(y: f64) -> Particle {
        Particle {
            position: Point::new(100.0, y),
            dx: 1.0,
            dy: 2.0,
            rotation: 0.0,
            spin: 3.0,
            color: CONFETTI_PALETTE[0],
            shape: Shape::Disc { radius: 4.0 },
        }
    }

    #[test]
    fn test_spawn_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let tuning = ConfettiTuning::default();
        let bounds = Size::new(800.0, 600.0);

        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, bounds, &tuning);
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((-600.0..0.0).contains(&p.position.y));
            assert!((2.0..5.0).contains(&p.dy));
            assert!((-2.0..2.0).contains(&p.dx));
            assert!((0.0..360.0).contains(&p.rotation));
            assert!(tuning.palette.contains(&p.color));
            match p.shape() {
                Shape::Rect { width, height } => {
                    assert!((4.0..12.0).contains(&width));
                    assert!((2.0..7.0).contains(&height));
                }
                Shape::Disc { radius } => assert!((3.0..10.0).contains(&radius)),
            }
        }
    }

    #[test]
    fn test_spawn_mixes_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let tuning = ConfettiTuning::default();
        let rects = (0..200)
            .map(|_| Particle::spawn(&mut rng, Size::new(800.0, 600.0), &tuning))
            .filter(|p| matches!(p.shape(), Shape::Rect { .. }))
            .count();
        assert!(rects > 50 && rects < 150, "rects = {rects}");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let tuning = ConfettiTuning {
            palette: Vec::new(),
            ..Default::default()
        };
        let p = Particle::spawn(&mut rng, Size::new(10.0, 10.0), &tuning);
        assert_eq!(p.color, CONFETTI_PALETTE[0]);
    }

    #[test]
    fn test_advance_applies_gravity() {
        let mut p = particle_at(0.0);
        p.advance(0.04);
        assert_eq!(p.position, Point::new(101.0, 2.0));
        assert!((p.dy - 2.04).abs() < 1e-12);
        assert_eq!(p.rotation, 3.0);

        p.advance(0.04);
        assert!((p.position.y - 4.04).abs() < 1e-12);
    }

    #[test]
    fn test_expiry_threshold() {
        assert!(!particle_at(620.0).is_expired(600.0, 20.0));
        assert!(particle_at(620.5).is_expired(600.0, 20.0));
    }

    #[test]
    fn test_opacity_ramp() {
        let h = 600.0;
        assert_eq!(particle_at(100.0).opacity(h, 200.0, 300.0), 1.0);
        assert_eq!(particle_at(500.0).opacity(h, 200.0, 300.0), 1.0);
        assert!((particle_at(650.0).opacity(h, 200.0, 300.0) - 0.5).abs() < 1e-12);
        assert_eq!(particle_at(800.0).opacity(h, 200.0, 300.0), 0.0);
        assert_eq!(particle_at(2000.0).opacity(h, 200.0, 300.0), 0.0);
    }
}
