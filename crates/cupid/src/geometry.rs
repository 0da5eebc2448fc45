use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size with a zero, negative or non-finite side cannot hold anything.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sizes() {
        assert!(Size::new(0.0, 600.0).is_empty());
        assert!(Size::new(800.0, -1.0).is_empty());
        assert!(Size::new(f64::NAN, 600.0).is_empty());
        assert!(Size::new(f64::INFINITY, 600.0).is_empty());
        assert!(!Size::new(800.0, 600.0).is_empty());
    }
}
