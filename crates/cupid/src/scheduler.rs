use derive_more::{Display, From, Into};
use std::cell::Cell;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct FrameToken(u64);

pub type Callback = Box<dyn FnOnce()>;

/// Host loop capability: run a callback on the next display refresh, or after a delay.
///
/// Cancelling a token that already fired, or that this scheduler never issued, does nothing.
pub trait Scheduler {
    fn schedule_next_frame(&self, callback: Callback) -> FrameToken;
    fn schedule_after(&self, delay: Duration, callback: Callback) -> FrameToken;
    fn cancel(&self, token: FrameToken);
}

/// Hands out increasing tokens for a single scheduler.
#[derive(Debug, Default)]
pub struct TokenSeq(Cell<u64>);

impl TokenSeq {
    pub fn next(&self) -> FrameToken {
        let id = self.0.get() + 1;
        self.0.set(id);
        FrameToken(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_increasing() {
        let seq = TokenSeq::default();
        let a = seq.next();
        let b = seq.next();
        assert!(a < b);
        assert_eq!(u64::from(b), 2);
    }
}
