//! Background motion: petals drifting up the screen and blinking fireflies.

use crate::geometry::{Point, Size};
use crate::swatch::{self, Swatch};
use rand::Rng;
use std::f64::consts::{PI, TAU};
use std::time::Duration;
use strum::{Display, EnumIter};

pub const FIREFLY_COUNT: usize = 20;
const SWAY: f64 = 20.0;
const PETAL_OPACITY: f64 = 0.7;
const EDGE_FADE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PetalKind {
    Heart,
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingPetal {
    /// Seconds before the first appearance.
    pub delay: f64,
    /// Horizontal anchor, percent of the viewport width.
    pub left: f64,
    pub size: f64,
    pub color: Swatch,
    /// Seconds for one bottom-to-top pass.
    pub duration: f64,
    pub kind: PetalKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalPose {
    pub center: Point,
    pub rotation: f64,
    pub opacity: f64,
}

const fn petal(
    delay: f64,
    left: f64,
    size: f64,
    color: Swatch,
    duration: f64,
    kind: PetalKind,
) -> FloatingPetal {
    FloatingPetal {
        delay,
        left,
        size,
        color,
        duration,
        kind,
    }
}

pub const FLOATING_PETALS: [FloatingPetal; 15] = [
    petal(0.0, 5.0, 18.0, swatch::BLUSH, 14.0, PetalKind::Heart),
    petal(2.0, 15.0, 14.0, swatch::PETAL, 12.0, PetalKind::Heart),
    petal(4.0, 25.0, 22.0, swatch::FERN, 16.0, PetalKind::Leaf),
    petal(1.0, 35.0, 16.0, swatch::ROSE, 13.0, PetalKind::Heart),
    petal(3.0, 45.0, 20.0, swatch::LIME, 15.0, PetalKind::Leaf),
    petal(5.0, 55.0, 15.0, swatch::SALMON, 11.0, PetalKind::Heart),
    petal(2.0, 65.0, 24.0, swatch::JADE, 17.0, PetalKind::Leaf),
    petal(0.5, 75.0, 17.0, swatch::BLUSH, 14.0, PetalKind::Heart),
    petal(3.5, 85.0, 20.0, swatch::MINT, 13.0, PetalKind::Leaf),
    petal(1.5, 92.0, 13.0, swatch::PETAL, 12.0, PetalKind::Heart),
    petal(4.5, 10.0, 19.0, swatch::FERN, 16.0, PetalKind::Leaf),
    petal(6.0, 50.0, 16.0, swatch::ROSE, 10.0, PetalKind::Heart),
    petal(7.0, 30.0, 21.0, swatch::LIME, 18.0, PetalKind::Leaf),
    petal(0.8, 70.0, 12.0, swatch::SALMON, 11.0, PetalKind::Heart),
    petal(5.5, 40.0, 18.0, swatch::JADE, 14.0, PetalKind::Leaf),
];

impl FloatingPetal {
    /// Where the petal is `elapsed` after start-up, or `None` while it waits for its delay.
    pub fn pose(&self, elapsed: Duration, viewport: Size) -> Option<PetalPose> {
        let t = elapsed.as_secs_f64() - self.delay;
        if t < 0.0 || self.duration <= 0.0 || viewport.is_empty() {
            return None;
        }

        let progress = (t % self.duration) / self.duration;
        let travel = viewport.height + 2.0 * self.size;
        let y = viewport.height + self.size - progress * travel;
        let x = viewport.width * self.left / 100.0 + (progress * 2.0 * TAU).sin() * SWAY;

        let rotation = match self.kind {
            PetalKind::Heart => (progress * TAU).sin() * 15.0,
            PetalKind::Leaf => progress * 360.0,
        };

        let edge = (progress / EDGE_FADE).min((1.0 - progress) / EDGE_FADE);
        Some(PetalPose {
            center: Point::new(x, y),
            rotation,
            opacity: edge.clamp(0.0, 1.0) * PETAL_OPACITY,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firefly {
    pub left: f64,
    pub top: f64,
    pub delay: f64,
    pub period: f64,
}

impl Firefly {
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Self> {
        (0..count)
            .map(|_| Self {
                left: rng.random_range(0.0..100.0),
                top: rng.random_range(0.0..100.0),
                delay: rng.random_range(0.0..5.0),
                period: rng.random_range(3.0..7.0),
            })
            .collect()
    }

    pub fn center(&self, viewport: Size) -> Point {
        Point::new(
            viewport.width * self.left / 100.0,
            viewport.height * self.top / 100.0,
        )
    }

    /// 0 when dark, 1 at the peak of each blink.
    pub fn glow(&self, elapsed: Duration) -> f64 {
        let t = elapsed.as_secs_f64() - self.delay;
        if t < 0.0 || self.period <= 0.0 {
            return 0.0;
        }
        ((t % self.period) / self.period * PI).sin().max(0.0)
    }

    pub fn color(&self) -> Swatch {
        swatch::FIREFLY
    }
}
