use crate::geometry::Size;
use crate::particle::Particle;
use crate::scheduler::{FrameToken, Scheduler};
use crate::surface::Surface;
use crate::tuning::ConfettiTuning;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use strum::Display;

/// One batch of particles, from trigger to full expiry.
#[derive(Debug, Clone)]
pub struct ConfettiRun {
    particles: Vec<Particle>,
    bounds: Size,
    gravity: f64,
    expiry_margin: f64,
    fade_offset: f64,
    fade_span: f64,
    alive: bool,
    frames: u64,
}

impl ConfettiRun {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Size, tuning: &ConfettiTuning) -> Self {
        let particles = if bounds.is_empty() {
            Vec::new()
        } else {
            (0..tuning.count)
                .map(|_| Particle::spawn(rng, bounds, tuning))
                .collect()
        };

        Self {
            particles,
            bounds,
            gravity: tuning.gravity,
            expiry_margin: tuning.expiry_margin,
            fade_offset: tuning.fade_offset,
            fade_span: tuning.fade_span,
            alive: true,
            frames: 0,
        }
    }

    /// Clears the surface, moves and draws every live particle. Returns whether any particle was
    /// still live this frame; once that is false the run is over for good.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.alive {
            return false;
        }

        surface.clear();

        let height = self.bounds.height;
        let mut alive = false;
        for particle in self
            .particles
            .iter_mut()
            .filter(|p| !p.is_expired(height, self.expiry_margin))
        {
            alive = true;
            particle.advance(self.gravity);
            let alpha = particle.opacity(height, self.fade_offset, self.fade_span);
            surface.fill(&particle.sprite(alpha));
        }
        surface.present();

        self.alive = alive;
        self.frames += 1;
        alive
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particles not yet past the bottom edge plus margin.
    pub fn remaining(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| !p.is_expired(self.bounds.height, self.expiry_margin))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunState {
    Running,
    Finished,
    Cancelled,
}

struct Slot {
    run: RefCell<ConfettiRun>,
    scheduler: Rc<dyn Scheduler>,
    pending: Cell<Option<FrameToken>>,
    state: Cell<RunState>,
}

/// Handle to a launched run. Cancelling is idempotent and a no-op once the run has finished.
#[derive(Clone)]
pub struct CancelHandle(Rc<Slot>);

impl CancelHandle {
    pub fn cancel(&self) {
        if self.0.state.get() == RunState::Running {
            self.0.state.set(RunState::Cancelled);
            log::debug!("confetti run cancelled");
        }
        if let Some(token) = self.0.pending.take() {
            self.0.scheduler.cancel(token);
        }
    }

    pub fn state(&self) -> RunState {
        self.0.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn remaining(&self) -> usize {
        self.0.run.borrow().remaining()
    }

    pub fn frames(&self) -> u64 {
        self.0.run.borrow().frames()
    }

    pub fn snapshot(&self) -> ConfettiRun {
        self.0.run.borrow().clone()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("state", &self.state())
            .field("pending", &self.0.pending.get())
            .finish()
    }
}

/// Resets `surface` to `viewport`, spawns a run and draws its first frame right away. Later frames
/// follow on the scheduler until every particle has expired or the handle is cancelled.
pub fn launch<S, R>(
    surface: &Rc<RefCell<S>>,
    scheduler: Rc<dyn Scheduler>,
    rng: &mut R,
    viewport: Size,
    tuning: &ConfettiTuning,
) -> CancelHandle
where
    S: Surface + 'static,
    R: Rng + ?Sized,
{
    surface.borrow_mut().resize(viewport);
    let run = ConfettiRun::spawn(rng, viewport, tuning);
    log::debug!(
        "launching {} particles on {}x{}",
        run.particles().len(),
        viewport.width,
        viewport.height
    );

    let handle = CancelHandle(Rc::new(Slot {
        run: RefCell::new(run),
        scheduler,
        pending: Cell::new(None),
        state: Cell::new(RunState::Running),
    }));
    frame(surface.clone(), handle.clone());
    handle
}

fn frame<S: Surface + 'static>(surface: Rc<RefCell<S>>, handle: CancelHandle) {
    let slot = &handle.0;
    slot.pending.set(None);
    if slot.state.get() != RunState::Running {
        return;
    }

    let alive = slot.run.borrow_mut().step(&mut *surface.borrow_mut());
    if alive {
        let next = handle.clone();
        let token = slot
            .scheduler
            .schedule_next_frame(Box::new(move || frame(surface, next)));
        slot.pending.set(Some(token));
    } else {
        slot.state.set(RunState::Finished);
        log::debug!("confetti run finished after {} frames", slot.run.borrow().frames());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualScheduler, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn fixture() -> (Rc<RefCell<RecordingSurface>>, Rc<ManualScheduler>, StdRng) {
        (
            Rc::new(RefCell::new(RecordingSurface::default())),
            Rc::new(ManualScheduler::default()),
            StdRng::seed_from_u64(2024),
        )
    }

    #[test]
    fn test_launch_resets_surface_and_draws_first_frame() {
        let (surface, scheduler, mut rng) = fixture();
        let tuning = ConfettiTuning::default();

        let handle = launch(&surface, scheduler.clone(), &mut rng, VIEWPORT, &tuning);

        let surface = surface.borrow();
        assert_eq!(surface.resizes, vec![VIEWPORT]);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.frame.len(), 260);
        assert_eq!(surface.presents, 1);
        assert_eq!(handle.remaining(), 260);
        assert!(handle.is_running());
        assert_eq!(scheduler.pending_frames(), 1);
    }

    #[test]
    fn test_vertical_position_never_decreases() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut run = ConfettiRun::spawn(&mut rng, VIEWPORT, &ConfettiTuning::default());
        let mut surface = RecordingSurface::default();

        let mut previous: Vec<f64> = run.particles().iter().map(|p| p.position.y).collect();
        while run.step(&mut surface) {
            for (before, p) in previous.iter().zip(run.particles()) {
                assert!(p.position.y >= *before);
            }
            previous = run.particles().iter().map(|p| p.position.y).collect();
        }
        assert_eq!(run.remaining(), 0);
    }

    #[test]
    fn test_liveness_turns_off_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let tuning = ConfettiTuning {
            count: 30,
            ..Default::default()
        };
        let mut run = ConfettiRun::spawn(&mut rng, VIEWPORT, &tuning);
        let mut surface = RecordingSurface::default();

        let history: Vec<bool> = (0..2000).map(|_| run.step(&mut surface)).collect();
        let flips = history.windows(2).filter(|w| w[0] != w[1]).count();

        assert_eq!(flips, 1);
        assert!(history[0]);
        assert!(!history[history.len() - 1]);
        assert!(!run.is_alive());
    }

    #[test]
    fn test_expired_particles_are_kept_but_skipped() {
        let mut rng = StdRng::seed_from_u64(8);
        let tuning = ConfettiTuning {
            count: 50,
            ..Default::default()
        };
        let mut run = ConfettiRun::spawn(&mut rng, VIEWPORT, &tuning);
        let mut surface = RecordingSurface::default();

        while run.remaining() == run.particles().len() {
            run.step(&mut surface);
        }
        run.step(&mut surface);

        assert_eq!(run.particles().len(), 50);
        assert!(surface.frame.len() < 50);
    }

    #[test]
    fn test_run_stops_scheduling_when_done() {
        let (surface, scheduler, mut rng) = fixture();
        let handle = launch(
            &surface,
            scheduler.clone(),
            &mut rng,
            VIEWPORT,
            &ConfettiTuning::default(),
        );

        let ticks = scheduler.run_until_idle(5000);

        assert!(ticks < 5000);
        assert_eq!(handle.state(), RunState::Finished);
        assert_eq!(handle.remaining(), 0);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_cancel_after_completion_is_inert() {
        let (surface, scheduler, mut rng) = fixture();
        let handle = launch(
            &surface,
            scheduler.clone(),
            &mut rng,
            VIEWPORT,
            &ConfettiTuning::default(),
        );
        scheduler.run_until_idle(5000);
        let frames = handle.frames();

        handle.cancel();
        handle.cancel();
        scheduler.tick();

        assert_eq!(handle.state(), RunState::Finished);
        assert_eq!(handle.frames(), frames);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_cancel_mid_run_stops_immediately() {
        let (surface, scheduler, mut rng) = fixture();
        let handle = launch(
            &surface,
            scheduler.clone(),
            &mut rng,
            VIEWPORT,
            &ConfettiTuning::default(),
        );
        for _ in 0..10 {
            scheduler.tick();
        }

        handle.cancel();
        let frames = handle.frames();
        scheduler.tick();
        handle.cancel();

        assert_eq!(handle.state(), RunState::Cancelled);
        assert_eq!(handle.frames(), frames);
        assert_eq!(scheduler.pending_frames(), 0);
        assert!(handle.remaining() > 0);
    }

    #[test]
    fn test_overlapping_runs_are_independent() {
        let (surface, scheduler, mut rng) = fixture();
        let tuning = ConfettiTuning::default();

        let first = launch(&surface, scheduler.clone(), &mut rng, VIEWPORT, &tuning);
        for _ in 0..40 {
            scheduler.tick();
        }
        let second = launch(&surface, scheduler.clone(), &mut rng, VIEWPORT, &tuning);
        assert_eq!(second.remaining(), 260);
        assert_eq!(scheduler.pending_frames(), 2);

        first.cancel();
        scheduler.tick();
        assert_eq!(second.frames(), 2);
        assert!(second.is_running());

        scheduler.run_until_idle(5000);
        assert_eq!(second.state(), RunState::Finished);
        assert_eq!(first.state(), RunState::Cancelled);
        assert_eq!(surface.borrow().resizes.len(), 2);
    }

    #[test]
    fn test_finished_run_does_not_touch_next_run() {
        let (surface, scheduler, mut rng) = fixture();
        let tuning = ConfettiTuning::default();

        let first = launch(&surface, scheduler.clone(), &mut rng, VIEWPORT, &tuning);
        scheduler.run_until_idle(5000);
        assert_eq!(first.remaining(), 0);

        let second = launch(&surface, scheduler.clone(), &mut rng, VIEWPORT, &tuning);
        assert_eq!(second.remaining(), 260);
        assert_eq!(first.remaining(), 0);
    }

    #[test]
    fn test_empty_viewport_degrades_to_empty_run() {
        let (surface, scheduler, mut rng) = fixture();
        let handle = launch(
            &surface,
            scheduler.clone(),
            &mut rng,
            Size::new(0.0, 600.0),
            &ConfettiTuning::default(),
        );

        assert_eq!(handle.state(), RunState::Finished);
        assert_eq!(handle.remaining(), 0);
        assert_eq!(scheduler.pending_frames(), 0);
        assert!(surface.borrow().frame.is_empty());
        handle.cancel();
    }

    #[test]
    fn test_fading_alpha_reaches_surface() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut run = ConfettiRun::spawn(&mut rng, VIEWPORT, &ConfettiTuning::default());
        let mut surface = RecordingSurface::default();

        let mut saw_fading = false;
        while run.step(&mut surface) {
            for sprite in &surface.frame {
                assert!((0.0..=1.0).contains(&sprite.alpha));
                saw_fading |= sprite.alpha < 1.0;
            }
        }
        assert!(saw_fading);
    }
}
