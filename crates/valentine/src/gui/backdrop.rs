use crate::gui::shapes;
use crate::gui::theme::{self, ThemeColors};
use cairo::{Context, LinearGradient, RadialGradient};
use cupid::Size;
use cupid::decor::{FIREFLY_COUNT, FLOATING_PETALS, Firefly};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::Rng;
use std::rc::Rc;
use std::time::Instant;

const FIREFLY_RADIUS: f64 = 6.0;

pub struct Backdrop {
    started: Instant,
    fireflies: Vec<Firefly>,
}

impl Backdrop {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            started: Instant::now(),
            fireflies: Firefly::scatter(rng, FIREFLY_COUNT),
        }
    }

    /// Draws on `area` and keeps it redrawing on every frame.
    pub fn attach(self, area: &gtk::DrawingArea) {
        let backdrop = Rc::new(self);
        area.set_draw_func(move |area, cr, width, height| {
            let colors = ThemeColors::from_context(&area.style_context());
            let viewport = Size::new(width as f64, height as f64);
            if let Err(e) = backdrop.draw(cr, viewport, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });
        area.add_tick_callback(|area, _| {
            area.queue_draw();
            glib::ControlFlow::Continue
        });
    }

    fn draw(&self, cr: &Context, viewport: Size, colors: &ThemeColors) -> Result<(), cairo::Error> {
        draw_gradient(cr, viewport, colors)?;

        let elapsed = self.started.elapsed();
        for petal in &FLOATING_PETALS {
            if let Some(pose) = petal.pose(elapsed, viewport) {
                let (r, g, b, a) = theme::with_alpha(petal.color, pose.opacity).into_components();
                cr.set_source_rgba(r, g, b, a);
                shapes::fill_petal(cr, petal.kind, pose.center, petal.size, pose.rotation)?;
            }
        }

        for fly in &self.fireflies {
            let glow = fly.glow(elapsed);
            if glow <= 0.0 {
                continue;
            }
            let center = fly.center(viewport);
            let (r, g, b) = fly.color().components();
            let halo = RadialGradient::new(
                center.x,
                center.y,
                0.0,
                center.x,
                center.y,
                FIREFLY_RADIUS,
            );
            halo.add_color_stop_rgba(0.0, r, g, b, glow);
            halo.add_color_stop_rgba(1.0, r, g, b, 0.0);
            cr.set_source(&halo)?;
            cr.arc(
                center.x,
                center.y,
                FIREFLY_RADIUS,
                0.0,
                2.0 * std::f64::consts::PI,
            );
            cr.fill()?;
        }
        Ok(())
    }
}

fn draw_gradient(cr: &Context, viewport: Size, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let wash = LinearGradient::new(0.0, 0.0, 0.0, viewport.height);
    let (r, g, b, a) = colors.backdrop_top.into_components();
    wash.add_color_stop_rgba(0.0, r, g, b, a);
    let (r, g, b, a) = colors.backdrop_bottom.into_components();
    wash.add_color_stop_rgba(1.0, r, g, b, a);
    cr.set_source(&wash)?;
    cr.paint()?;

    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    let vignette = RadialGradient::new(cx, cy, cx.min(cy), cx, cy, cx.hypot(cy));
    let (r, g, b, a) = colors.vignette.into_components();
    vignette.add_color_stop_rgba(0.0, r, g, b, 0.0);
    vignette.add_color_stop_rgba(1.0, r, g, b, a);
    cr.set_source(&vignette)?;
    cr.paint()
}
