use crate::geometry::Size;
use crate::run::{self, CancelHandle};
use crate::scheduler::{FrameToken, Scheduler};
use crate::state::Effect;
use crate::surface::Surface;
use crate::tuning::ConfettiTuning;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Fires confetti runs onto one shared surface and keeps their handles.
pub struct Launcher<S: Surface> {
    surface: Rc<RefCell<S>>,
    scheduler: Rc<dyn Scheduler>,
    rng: Rc<RefCell<StdRng>>,
    tuning: Rc<RefCell<ConfettiTuning>>,
    runs: Rc<RefCell<Vec<CancelHandle>>>,
    timers: Rc<RefCell<Vec<FrameToken>>>,
}

impl<S: Surface> Clone for Launcher<S> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            scheduler: self.scheduler.clone(),
            rng: self.rng.clone(),
            tuning: self.tuning.clone(),
            runs: self.runs.clone(),
            timers: self.timers.clone(),
        }
    }
}

impl<S: Surface + 'static> Launcher<S> {
    pub fn new(
        surface: Rc<RefCell<S>>,
        scheduler: Rc<dyn Scheduler>,
        rng: StdRng,
        tuning: ConfettiTuning,
    ) -> Self {
        Self {
            surface,
            scheduler,
            rng: Rc::new(RefCell::new(rng)),
            tuning: Rc::new(RefCell::new(tuning)),
            runs: Rc::new(RefCell::new(Vec::new())),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    /// Applies to runs launched from now on.
    pub fn set_tuning(&self, tuning: ConfettiTuning) {
        *self.tuning.borrow_mut() = tuning;
    }

    pub fn burst(&self, viewport: Size) -> CancelHandle {
        let tuning = self.tuning.borrow().clone();
        let handle = run::launch(
            &self.surface,
            self.scheduler.clone(),
            &mut *self.rng.borrow_mut(),
            viewport,
            &tuning,
        );

        let mut runs = self.runs.borrow_mut();
        runs.retain(CancelHandle::is_running);
        runs.push(handle.clone());
        handle
    }

    /// Carries out effects from a state transition. `viewport` is read when each burst fires,
    /// so a delayed burst sees the window as it is then.
    pub fn play(&self, effects: &[Effect], viewport: impl Fn() -> Size + 'static) {
        let viewport = Rc::new(viewport);
        for effect in effects {
            match *effect {
                Effect::LaunchConfetti { delay } if delay == Duration::ZERO => {
                    self.burst(viewport());
                }
                Effect::LaunchConfetti { delay } => {
                    let launcher = self.clone();
                    let viewport = viewport.clone();
                    let own = Rc::new(Cell::new(None));
                    let fired = own.clone();
                    let token = self.scheduler.schedule_after(
                        delay,
                        Box::new(move || {
                            if let Some(token) = fired.get() {
                                launcher.timers.borrow_mut().retain(|t| *t != token);
                            }
                            launcher.burst(viewport());
                        }),
                    );
                    own.set(Some(token));
                    self.timers.borrow_mut().push(token);
                }
            }
        }
    }

    pub fn active_runs(&self) -> usize {
        self.runs.borrow().iter().filter(|r| r.is_running()).count()
    }

    /// Delayed bursts that have not fired yet.
    pub fn pending_bursts(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn runs(&self) -> Vec<CancelHandle> {
        self.runs.borrow().clone()
    }

    pub fn cancel_all(&self) {
        for token in self.timers.borrow_mut().drain(..) {
            self.scheduler.cancel(token);
        }
        for run in self.runs.borrow_mut().drain(..) {
            run.cancel();
        }
    }
}
