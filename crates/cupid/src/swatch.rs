use derive_more::{Deref, From, Into};
use palette::Srgb;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One palette entry, written as a hex code (`#ff6b8a`) in config files.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, DeserializeFromStr, SerializeDisplay,
)]
pub struct Swatch(Srgb<u8>);

#[derive(Debug, Error)]
#[error("invalid color '{input}': {reason}")]
pub struct InvalidSwatch {
    input: String,
    reason: String,
}

impl Swatch {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// Linear 0..1 components for cairo.
    pub fn components(&self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl FromStr for Swatch {
    type Err = InvalidSwatch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|e| InvalidSwatch {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Pinks, greens and lilacs of the confetti bursts.
pub const CONFETTI_PALETTE: [Swatch; 15] = [
    Swatch::rgb8(0xff, 0x6b, 0x8a),
    Swatch::rgb8(0xff, 0x85, 0xa1),
    Swatch::rgb8(0xff, 0xc2, 0xd1),
    Swatch::rgb8(0xb5, 0xe4, 0x8c),
    Swatch::rgb8(0x76, 0xc8, 0x93),
    Swatch::rgb8(0x52, 0xb6, 0x9a),
    Swatch::rgb8(0xd4, 0xa5, 0xff),
    Swatch::rgb8(0xff, 0xd6, 0xe0),
    Swatch::rgb8(0xa7, 0xf3, 0xd0),
    Swatch::rgb8(0xff, 0xf1, 0xf2),
    Swatch::rgb8(0xf9, 0xc6, 0xd3),
    Swatch::rgb8(0x86, 0xef, 0xac),
    Swatch::rgb8(0xfd, 0xa4, 0xaf),
    Swatch::rgb8(0xbb, 0xf7, 0xd0),
    Swatch::rgb8(0xe8, 0xb4, 0xf8),
];

pub const ROSE: Swatch = Swatch::rgb8(0xff, 0x6b, 0x8a);
pub const BLUSH: Swatch = Swatch::rgb8(0xff, 0x85, 0xa1);
pub const PETAL: Swatch = Swatch::rgb8(0xff, 0xc2, 0xd1);
pub const SALMON: Swatch = Swatch::rgb8(0xfd, 0xa4, 0xaf);
pub const FERN: Swatch = Swatch::rgb8(0x76, 0xc8, 0x93);
pub const LIME: Swatch = Swatch::rgb8(0xb5, 0xe4, 0x8c);
pub const JADE: Swatch = Swatch::rgb8(0x52, 0xb6, 0x9a);
pub const MINT: Swatch = Swatch::rgb8(0x86, 0xef, 0xac);
pub const FIREFLY: Swatch = Swatch::rgb8(0xff, 0xf3, 0xb0);
