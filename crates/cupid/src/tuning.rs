use crate::geometry::Size;
use crate::swatch::{CONFETTI_PALETTE, Swatch};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Half-open sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Collapsed or inverted spans always yield `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min < self.max {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiTuning {
    pub count: usize,
    pub gravity: f64,
    pub expiry_margin: f64,
    pub fade_offset: f64,
    pub fade_span: f64,
    pub drift: Span,
    pub fall_speed: Span,
    pub spin: Span,
    pub radius: Span,
    pub rect_width: Span,
    pub rect_height: Span,
    pub rect_chance: f64,
    pub palette: Vec<Swatch>,
    #[serde(with = "millis")]
    pub follow_up_delay: Duration,
}

impl Default for ConfettiTuning {
    fn default() -> Self {
        Self {
            count: 260,
            gravity: 0.04,
            expiry_margin: 20.0,
            fade_offset: 200.0,
            fade_span: 300.0,
            drift: Span::new(-2.0, 2.0),
            fall_speed: Span::new(2.0, 5.0),
            spin: Span::new(-4.0, 4.0),
            radius: Span::new(3.0, 10.0),
            rect_width: Span::new(4.0, 12.0),
            rect_height: Span::new(2.0, 7.0),
            rect_chance: 0.5,
            palette: CONFETTI_PALETTE.to_vec(),
            follow_up_delay: Duration::from_millis(1200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasiveTuning {
    pub control: Size,
    pub margin: f64,
    pub trailing_margin: f64,
}

impl Default for EvasiveTuning {
    fn default() -> Self {
        Self {
            control: Size::new(140.0, 52.0),
            margin: 20.0,
            trailing_margin: 40.0,
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
