//! One-shot millisecond deadlines

/// A deadline that is either armed at an instant or idle
///
/// Arming again replaces the previous instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at_ms: Option<u64>,
}

impl Deadline {
    /// An idle deadline
    pub const fn new() -> Self {
        Self { at_ms: None }
    }

    /// Expire `duration_ms` after `now_ms`
    pub fn arm(&mut self, now_ms: u64, duration_ms: u32) {
        self.at_ms = Some(now_ms.saturating_add(duration_ms as u64));
    }

    /// Make idle
    pub fn cancel(&mut self) {
        self.at_ms = None;
    }

    /// Check if armed
    pub fn is_armed(&self) -> bool {
        self.at_ms.is_some()
    }

    /// Armed and reached. The boundary is inclusive: a deadline armed for
    /// `timeout_ms` has expired once exactly `timeout_ms` have passed.
    pub fn expired(&self, now_ms: u64) -> bool {
        matches!(self.at_ms, Some(at) if now_ms >= at)
    }

    /// Time left, `None` when idle
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.at_ms.map(|at| at.saturating_sub(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_never_expires() {
        let deadline = Deadline::new();
        assert!(!deadline.is_armed());
        assert!(!deadline.expired(u64::MAX));
        assert_eq!(deadline.remaining_ms(0), None);
    }

    #[test]
    fn test_expiry() {
        let mut deadline = Deadline::new();
        deadline.arm(1000, 100);
        assert!(!deadline.expired(1099));
        assert!(deadline.expired(1100));
        assert_eq!(deadline.remaining_ms(1040), Some(60));
        assert_eq!(deadline.remaining_ms(2000), Some(0));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut deadline = Deadline::new();
        deadline.arm(0, 100);
        assert_eq!(deadline.remaining_ms(100), Some(0));
        assert!(deadline.expired(100));
    }

    #[test]
    fn test_rearm_supersedes() {
        let mut deadline = Deadline::new();
        deadline.arm(0, 100);
        deadline.arm(90, 100);
        assert!(!deadline.expired(150));
        assert!(deadline.expired(190));

        deadline.cancel();
        assert!(!deadline.expired(1000));
    }

    #[test]
    fn test_arm_saturates() {
        let mut deadline = Deadline::new();
        deadline.arm(u64::MAX - 1, 100);
        assert!(deadline.expired(u64::MAX));
    }
}
