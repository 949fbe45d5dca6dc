/// `true` when `score` reaches `threshold`.
#[must_use]
pub fn should_alert(score: u32, threshold: u32) -> bool {
    score >= threshold
}

/// Threshold predicate deciding which scores trigger a notification.
///
/// Only decides; dispatching is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertGate {
    threshold: u32,
}

impl AlertGate {
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[must_use]
    pub fn should_alert(&self, score: u32) -> bool {
        should_alert(score, self.threshold)
    }
}
