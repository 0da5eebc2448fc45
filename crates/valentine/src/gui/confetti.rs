use cairo::{Context, Format, ImageSurface, Operator};
use cupid::particle::Shape;
use cupid::{Callback, FrameToken, Scheduler, Size, Sprite, Surface, TokenSeq};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;
use std::time::Duration;

/// Offscreen buffer the confetti runs draw into, composited over the window by `paint`.
pub struct CairoSurface {
    widget: gtk::DrawingArea,
    size: Size,
    buffer: Option<(ImageSurface, Context)>,
}

impl CairoSurface {
    pub fn new(widget: gtk::DrawingArea) -> Self {
        Self {
            widget,
            size: Size::default(),
            buffer: None,
        }
    }

    pub fn paint(&self, cr: &Context) -> Result<(), cairo::Error> {
        if let Some((buffer, _)) = &self.buffer {
            cr.set_source_surface(buffer, 0.0, 0.0)?;
            cr.paint()?;
        }
        Ok(())
    }

    fn allocate(size: Size) -> Result<(ImageSurface, Context), cairo::Error> {
        let buffer = ImageSurface::create(
            Format::ARgb32,
            size.width.ceil() as i32,
            size.height.ceil() as i32,
        )?;
        let cr = Context::new(&buffer)?;
        Ok((buffer, cr))
    }
}

impl Surface for CairoSurface {
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.buffer = if size.is_empty() {
            None
        } else {
            Self::allocate(size)
                .map_err(|e| log::warn!("Failed to allocate confetti buffer: {}", e))
                .ok()
        };
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        if let Some((_, cr)) = &self.buffer
            && let Err(e) = clear(cr)
        {
            log::warn!("Failed to clear confetti buffer: {}", e);
        }
    }

    fn fill(&mut self, sprite: &Sprite) {
        if let Some((_, cr)) = &self.buffer
            && let Err(e) = draw_sprite(cr, sprite)
        {
            log::warn!("Failed to draw confetti: {}", e);
        }
    }

    fn present(&mut self) {
        self.widget.queue_draw();
    }
}

fn clear(cr: &Context) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_operator(Operator::Clear);
    cr.paint()?;
    cr.restore()
}

fn draw_sprite(cr: &Context, sprite: &Sprite) -> Result<(), cairo::Error> {
    let (r, g, b) = sprite.color.components();
    cr.save()?;
    cr.translate(sprite.center.x, sprite.center.y);
    cr.rotate(sprite.rotation.to_radians());
    cr.set_source_rgba(r, g, b, sprite.alpha);
    match sprite.shape {
        Shape::Rect { width, height } => cr.rectangle(-width / 2.0, -height / 2.0, width, height),
        Shape::Disc { radius } => cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI),
    }
    cr.fill()?;
    cr.restore()
}

/// Frames come from the widget's frame clock, delays from glib timeouts.
pub struct GtkScheduler {
    widget: gtk::Widget,
    seq: TokenSeq,
    ticks: Rc<RefCell<HashMap<FrameToken, gtk::TickCallbackId>>>,
    timers: Rc<RefCell<HashMap<FrameToken, glib::SourceId>>>,
}

impl GtkScheduler {
    pub fn new(widget: &impl IsA<gtk::Widget>) -> Self {
        Self {
            widget: widget.clone().upcast(),
            seq: TokenSeq::default(),
            ticks: Rc::new(RefCell::new(HashMap::new())),
            timers: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl Scheduler for GtkScheduler {
    fn schedule_next_frame(&self, callback: Callback) -> FrameToken {
        let token = self.seq.next();
        let ticks = self.ticks.clone();
        let slot = RefCell::new(Some(callback));

        let id = self.widget.add_tick_callback(move |_, _| {
            ticks.borrow_mut().remove(&token);
            let callback = slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
            glib::ControlFlow::Break
        });
        self.ticks.borrow_mut().insert(token, id);
        token
    }

    fn schedule_after(&self, delay: Duration, callback: Callback) -> FrameToken {
        let token = self.seq.next();
        let timers = self.timers.clone();

        let id = glib::timeout_add_local_once(delay, move || {
            timers.borrow_mut().remove(&token);
            callback();
        });
        self.timers.borrow_mut().insert(token, id);
        token
    }

    fn cancel(&self, token: FrameToken) {
        let tick = self.ticks.borrow_mut().remove(&token);
        if let Some(id) = tick {
            id.remove();
        }
        let timer = self.timers.borrow_mut().remove(&token);
        if let Some(id) = timer {
            id.remove();
        }
    }
}
