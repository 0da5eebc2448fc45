//! Deterministic stand-ins for the host loop and the raster target.

use crate::geometry::Size;
use crate::scheduler::{Callback, FrameToken, Scheduler, TokenSeq};
use crate::surface::{Sprite, Surface};
use std::cell::{Cell, RefCell};
use std::time::Duration;

pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
pub struct ManualScheduler {
    seq: TokenSeq,
    now: Cell<Duration>,
    frames: RefCell<Vec<(FrameToken, Callback)>>,
    timers: RefCell<Vec<(FrameToken, Duration, Callback)>>,
}

impl ManualScheduler {
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Runs the frame callbacks queued so far, then moves the clock one frame ahead.
    pub fn tick(&self) {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        for (_, callback) in frames {
            callback();
        }
        self.advance(FRAME);
    }

    /// Ticks until no frame is pending, giving up after `limit` ticks. Returns the tick count.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut ticks = 0;
        while self.pending_frames() > 0 && ticks < limit {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
        loop {
            let due = {
                let mut timers = self.timers.borrow_mut();
                let now = self.now.get();
                let next = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= now)
                    .min_by_key(|(_, (token, at, _))| (*at, *token))
                    .map(|(i, _)| i);
                next.map(|i| timers.remove(i))
            };
            match due {
                Some((_, _, callback)) => callback(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next_frame(&self, callback: Callback) -> FrameToken {
        let token = self.seq.next();
        self.frames.borrow_mut().push((token, callback));
        token
    }

    fn schedule_after(&self, delay: Duration, callback: Callback) -> FrameToken {
        let token = self.seq.next();
        let at = self.now.get() + delay;
        self.timers.borrow_mut().push((token, at, callback));
        token
    }

    fn cancel(&self, token: FrameToken) {
        self.frames.borrow_mut().retain(|(t, _)| *t != token);
        self.timers.borrow_mut().retain(|(t, _, _)| *t != token);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub resizes: Vec<Size>,
    pub clears: usize,
    pub presents: usize,
    pub fills: usize,
    /// Sprites drawn since the last clear.
    pub frame: Vec<Sprite>,
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.resizes.push(size);
        self.frame.clear();
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.frame.clear();
    }

    fn fill(&mut self, sprite: &Sprite) {
        self.fills += 1;
        self.frame.push(*sprite);
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}
