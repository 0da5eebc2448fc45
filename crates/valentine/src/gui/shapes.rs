//! Heart and leaf outlines, traced in a 24x24 box.

use cairo::Context;
use cupid::Point;
use cupid::decor::PetalKind;

pub const VIEWBOX: f64 = 24.0;

pub fn trace_heart(cr: &Context) {
    cr.move_to(12.0, 21.35);
    cr.line_to(10.55, 20.03);
    cr.curve_to(5.4, 15.36, 2.0, 12.28, 2.0, 8.5);
    cr.curve_to(2.0, 5.42, 4.42, 3.0, 7.5, 3.0);
    cr.curve_to(9.24, 3.0, 10.91, 3.81, 12.0, 5.09);
    cr.curve_to(13.09, 3.81, 14.76, 3.0, 16.5, 3.0);
    cr.curve_to(19.58, 3.0, 22.0, 5.42, 22.0, 8.5);
    cr.curve_to(22.0, 12.28, 18.6, 15.36, 13.45, 20.04);
    cr.close_path();
}

pub fn trace_leaf(cr: &Context) {
    cr.move_to(17.0, 8.0);
    cr.curve_to(8.0, 10.0, 5.9, 16.17, 3.82, 21.34);
    cr.line_to(5.71, 22.0);
    cr.line_to(6.66, 19.7);
    cr.curve_to(7.14, 19.87, 7.64, 20.0, 8.0, 20.0);
    cr.curve_to(19.0, 20.0, 22.0, 3.0, 22.0, 3.0);
    cr.curve_to(21.0, 5.0, 14.0, 5.25, 9.0, 6.25);
    cr.curve_to(4.0, 7.25, 2.0, 11.5, 2.0, 13.5);
    cr.curve_to(2.0, 15.5, 3.75, 17.25, 3.75, 17.25);
    cr.curve_to(7.0, 8.0, 17.0, 8.0, 17.0, 8.0);
    cr.close_path();
}

/// Fills `kind` centred on `center`, `size` pixels across, rotated by `rotation` degrees.
pub fn fill_petal(
    cr: &Context,
    kind: PetalKind,
    center: Point,
    size: f64,
    rotation: f64,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(rotation.to_radians());
    let scale = size / VIEWBOX;
    cr.scale(scale, scale);
    cr.translate(-VIEWBOX / 2.0, -VIEWBOX / 2.0);
    match kind {
        PetalKind::Heart => trace_heart(cr),
        PetalKind::Leaf => trace_leaf(cr),
    }
    cr.fill()?;
    cr.restore()
}
