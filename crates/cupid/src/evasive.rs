use crate::geometry::{Point, Size};
use crate::tuning::EvasiveTuning;
use rand::Rng;

/// Picks a spot for the control, keeping `margin` from the leading edges and
/// `margin + trailing_margin` from the trailing ones.
///
/// A viewport too small for the control gives a degenerate range, and the result may fall
/// outside the viewport.
pub fn relocate<R: Rng + ?Sized>(rng: &mut R, viewport: Size, tuning: &EvasiveTuning) -> Point {
    let inset = 2.0 * tuning.margin + tuning.trailing_margin;
    let span_x = viewport.width - tuning.control.width - inset;
    let span_y = viewport.height - tuning.control.height - inset;

    Point::new(
        tuning.margin + rng.random::<f64>() * span_x,
        tuning.margin + rng.random::<f64>() * span_y,
    )
}

/// Where the evasive control sits. `None` leaves it in its place in the card layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvasiveButton {
    position: Option<Point>,
    dodges: u32,
}

impl EvasiveButton {
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn dodge<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Size,
        tuning: &EvasiveTuning,
    ) -> Point {
        let point = relocate(rng, viewport, tuning);
        self.position = Some(point);
        self.dodges = self.dodges.saturating_add(1);
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_relocate_stays_inside_800x600() {
        let mut rng = StdRng::seed_from_u64(99);
        let tuning = EvasiveTuning::default();
        let viewport = Size::new(800.0, 600.0);

        for _ in 0..10_000 {
            let p = relocate(&mut rng, viewport, &tuning);
            assert!((20.0..=600.0).contains(&p.x), "x = {}", p.x);
            assert!((20.0..=488.0).contains(&p.y), "y = {}", p.y);
        }
    }

    #[test]
    fn test_relocated_box_fits_viewport() {
        let mut rng = StdRng::seed_from_u64(3);
        let tuning = EvasiveTuning::default();
        let viewport = Size::new(1280.0, 720.0);

        for _ in 0..1000 {
            let p = relocate(&mut rng, viewport, &tuning);
            assert!(p.x >= tuning.margin);
            assert!(p.y >= tuning.margin);
            let trailing = tuning.margin + tuning.trailing_margin;
            assert!(p.x + tuning.control.width + trailing <= viewport.width);
            assert!(p.y + tuning.control.height + trailing <= viewport.height);
        }
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(4);
        let tuning = EvasiveTuning::default();

        let p = relocate(&mut rng, Size::new(100.0, 40.0), &tuning);
        assert!(p.x <= tuning.margin);
        assert!(p.y <= tuning.margin);

        relocate(&mut rng, Size::new(0.0, 0.0), &tuning);
    }

    #[test]
    fn test_dodge_overrides_layout() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut button = EvasiveButton::default();
        assert_eq!(button.position(), None);

        let first = button.dodge(&mut rng, Size::new(800.0, 600.0), &EvasiveTuning::default());
        assert_eq!(button.position(), Some(first));

        let second = button.dodge(&mut rng, Size::new(800.0, 600.0), &EvasiveTuning::default());
        assert_eq!(button.position(), Some(second));
        assert_ne!(first, second);
        assert_eq!(button.dodges(), 2);
    }
}
