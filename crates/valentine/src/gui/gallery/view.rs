use super::TILE_RADIUS;
use super::model::Photo;
use crate::gui::shapes;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use cupid::Point;
use cupid::decor::PetalKind;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    /// Fill the box, cropping overflow.
    Cover,
    /// Show the whole photo, letterboxed.
    Contain,
}

impl Fit {
    fn scale(&self, image: (f64, f64), frame: (f64, f64)) -> f64 {
        let (sx, sy) = (frame.0 / image.0, frame.1 / image.1);
        match self {
            Self::Cover => sx.max(sy),
            Self::Contain => sx.min(sy),
        }
    }
}

pub fn draw_thumbnail(
    cr: &Context,
    photo: &Photo,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let (w, h) = (width as f64, height as f64);
    cr.save()?;
    rounded_rect(cr, w, h, TILE_RADIUS);
    cr.clip();

    match &photo.thumbnail {
        Some(pixbuf) => paint_fitted(cr, pixbuf, Fit::Cover, w, h)?,
        None => draw_placeholder(cr, colors, w, h)?,
    }
    cr.restore()
}

pub fn draw_photo(
    cr: &Context,
    photo: &Photo,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let (w, h) = (width as f64, height as f64);
    match &photo.full {
        Some(pixbuf) => paint_fitted(cr, pixbuf, Fit::Contain, w, h),
        None => draw_placeholder(cr, colors, w, h),
    }
}

fn paint_fitted(
    cr: &Context,
    pixbuf: &Pixbuf,
    fit: Fit,
    w: f64,
    h: f64,
) -> Result<(), cairo::Error> {
    let image = (pixbuf.width() as f64, pixbuf.height() as f64);
    if image.0 <= 0.0 || image.1 <= 0.0 {
        return Ok(());
    }
    let scale = fit.scale(image, (w, h));
    // center in frame
    let (ix, iy) = (
        (w - image.0 * scale) / 2.0,
        (h - image.1 * scale) / 2.0,
    );

    cr.save()?;
    cr.translate(ix, iy);
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_placeholder(cr: &Context, colors: &ThemeColors, w: f64, h: f64) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.placeholder.into_components();
    cr.set_source_rgba(r, g, b, a * 0.4);
    cr.paint()?;
    cr.set_source_rgba(r, g, b, a);
    shapes::fill_petal(
        cr,
        PetalKind::Heart,
        Point::new(w / 2.0, h / 2.0),
        w.min(h) / 3.0,
        0.0,
    )
}

fn rounded_rect(cr: &Context, w: f64, h: f64, radius: f64) {
    let r = radius.min(w / 2.0).min(h / 2.0);
    cr.new_sub_path();
    cr.arc(w - r, r, r, -PI / 2.0, 0.0);
    cr.arc(w - r, h - r, r, 0.0, PI / 2.0);
    cr.arc(r, h - r, r, PI / 2.0, PI);
    cr.arc(r, r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_fills_and_contain_fits() {
        let image = (400.0, 200.0);
        let frame = (100.0, 100.0);

        let cover = Fit::Cover.scale(image, frame);
        assert_eq!(cover, 0.5);
        assert!(image.0 * cover >= frame.0 && image.1 * cover >= frame.1);

        let contain = Fit::Contain.scale(image, frame);
        assert_eq!(contain, 0.25);
        assert!(image.0 * contain <= frame.0 && image.1 * contain <= frame.1);
    }
}
