use crate::geometry::{Point, Size};
use crate::particle::Shape;
use crate::swatch::Swatch;

/// One filled shape, centred on `center` and rotated by `rotation` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub center: Point,
    pub rotation: f64,
    pub shape: Shape,
    pub color: Swatch,
    pub alpha: f64,
}

/// A 2D raster target with a clearable backing buffer.
///
/// Implementations never fail outward: a buffer that cannot be allocated or drawn to turns the
/// calls into no-ops.
pub trait Surface {
    /// Reallocates the backing buffer, discarding whatever was drawn.
    fn resize(&mut self, size: Size);
    fn size(&self) -> Size;
    fn clear(&mut self);
    fn fill(&mut self, sprite: &Sprite);
    /// Called once a frame is complete.
    fn present(&mut self) {}
}
