//! Confetti, the evasive button and the rest of the card's state, without any toolkit.

pub mod decor;
pub mod evasive;
pub mod gallery;
pub mod geometry;
pub mod launcher;
pub mod macros;
pub mod particle;
pub mod run;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod swatch;
pub mod tuning;

#[cfg(test)]
mod testing;

pub use geometry::{Point, Size};
pub use launcher::Launcher;
pub use run::{CancelHandle, ConfettiRun, RunState, launch};
pub use scheduler::{Callback, FrameToken, Scheduler, TokenSeq};
pub use state::{AppState, Effect, IntroStage, Screen};
pub use surface::{Sprite, Surface};
pub use tuning::{ConfettiTuning, EvasiveTuning, Span};
