use crate::evasive::EvasiveButton;
use crate::gallery::Lightbox;
use crate::geometry::{Point, Size};
use crate::tuning::{ConfettiTuning, EvasiveTuning};
use rand::Rng;
use std::time::Duration;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Screen {
    #[default]
    Asking,
    Celebrating,
}

/// Start-up reveal: content fades in first, then the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumIter)]
pub enum IntroStage {
    #[default]
    Hidden,
    Content,
    Card,
}

impl IntroStage {
    pub fn delay(&self) -> Duration {
        match self {
            Self::Hidden => Duration::ZERO,
            Self::Content => Duration::from_millis(300),
            Self::Card => Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    LaunchConfetti { delay: Duration },
}

/// Everything the view reads. Changed only through the methods below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    screen: Screen,
    intro: IntroStage,
    evasive: EvasiveButton,
    lightbox: Lightbox,
}

impl AppState {
    pub fn new(photo_count: usize) -> Self {
        Self {
            lightbox: Lightbox::new(photo_count),
            ..Default::default()
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn intro(&self) -> IntroStage {
        self.intro
    }

    pub fn evasive(&self) -> &EvasiveButton {
        &self.evasive
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// The card's controls take input only once the card is fully revealed.
    pub fn accepts_input(&self) -> bool {
        self.screen == Screen::Asking && self.intro == IntroStage::Card
    }

    pub fn reveal(&mut self, stage: IntroStage) {
        self.intro = self.intro.max(stage);
    }

    /// The only way out of `Asking`. Fires two bursts, the second after `follow_up_delay`.
    pub fn accept(&mut self, tuning: &ConfettiTuning) -> Vec<Effect> {
        match self.screen {
            Screen::Asking => {
                self.screen = Screen::Celebrating;
                vec![
                    Effect::LaunchConfetti {
                        delay: Duration::ZERO,
                    },
                    Effect::LaunchConfetti {
                        delay: tuning.follow_up_delay,
                    },
                ]
            }
            Screen::Celebrating => Vec::new(),
        }
    }

    /// Clicking the evasive control, if anyone manages it, changes nothing.
    pub fn decline(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    pub fn evade<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Size,
        tuning: &EvasiveTuning,
    ) -> Option<Point> {
        (self.screen == Screen::Asking).then(|| self.evasive.dodge(rng, viewport, tuning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_accept_fires_two_bursts_once() {
        let mut state = AppState::new(12);
        let tuning = ConfettiTuning::default();

        let effects = state.accept(&tuning);
        assert_eq!(state.screen(), Screen::Celebrating);
        assert_eq!(
            effects,
            vec![
                Effect::LaunchConfetti {
                    delay: Duration::ZERO
                },
                Effect::LaunchConfetti {
                    delay: Duration::from_millis(1200)
                },
            ]
        );

        assert!(state.accept(&tuning).is_empty());
        assert_eq!(state.screen(), Screen::Celebrating);
    }

    #[test]
    fn test_decline_is_inert() {
        let mut state = AppState::new(12);
        let before = state.clone();
        assert!(state.decline().is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_evade_moves_button_only_while_asking() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = AppState::new(12);
        let tuning = EvasiveTuning::default();

        let moved = state.evade(&mut rng, Size::new(800.0, 600.0), &tuning);
        assert!(moved.is_some());
        assert_eq!(state.evasive().position(), moved);

        state.accept(&ConfettiTuning::default());
        assert_eq!(state.evade(&mut rng, Size::new(800.0, 600.0), &tuning), None);
        assert_eq!(state.evasive().dodges(), 1);
    }

    #[test]
    fn test_intro_only_moves_forward() {
        let mut state = AppState::default();
        state.reveal(IntroStage::Card);
        state.reveal(IntroStage::Content);
        assert_eq!(state.intro(), IntroStage::Card);

        let delays: Vec<_> = IntroStage::iter().map(|s| s.delay()).collect();
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_card_controls_wait_for_reveal() {
        let mut state = AppState::new(12);
        assert!(!state.accepts_input());

        state.reveal(IntroStage::Content);
        assert!(!state.accepts_input());

        state.reveal(IntroStage::Card);
        assert!(state.accepts_input());

        state.accept(&ConfettiTuning::default());
        assert!(!state.accepts_input());
    }
}
