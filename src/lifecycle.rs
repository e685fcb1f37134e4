//! Open/close state of a picker and the blur race it has to survive.
//!
//! Clicking from the anchor into the floating panel blurs the anchor before
//! the click reaches the canvas. A blur therefore never hides immediately:
//! it queues a check that runs [`BLUR_GRACE`] later and only hides if nothing
//! inside the panel was touched in the meantime.
//!
//! Queued checks are not cancelled by later transitions. A `hide` followed by
//! a `show` inside the grace window still lets the old check run against the
//! interaction flag as it is at that moment.

use std::collections::VecDeque;
use std::time::Instant;

use crate::constants::BLUR_GRACE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

#[derive(Debug, Default)]
pub struct Lifecycle {
    visibility: Visibility,
    interacted: bool,
    pending_blur_checks: VecDeque<Instant>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn interacted(&self) -> bool {
        self.interacted
    }

    /// Enter `Visible` and start a fresh interaction cycle.
    pub fn open(&mut self) {
        self.visibility = Visibility::Visible;
        self.interacted = false;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn mark_interaction(&mut self) {
        self.interacted = true;
    }

    pub fn schedule_blur_check(&mut self, now: Instant) {
        self.pending_blur_checks.push_back(now + BLUR_GRACE);
    }

    pub fn pending_blur_checks(&self) -> usize {
        self.pending_blur_checks.len()
    }

    /// Run every blur check that is due at `now`.
    ///
    /// Returns `true` when at least one check closed the picker.
    pub fn run_due_checks(&mut self, now: Instant) -> bool {
        let mut closed = false;
        while let Some(deadline) = self.pending_blur_checks.front().copied() {
            if deadline > now {
                break;
            }
            self.pending_blur_checks.pop_front();
            if !self.interacted {
                if self.visibility.is_visible() {
                    closed = true;
                }
                self.close();
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_hidden() {
        let l = Lifecycle::new();
        assert_eq!(l.visibility(), Visibility::Hidden);
        assert!(!l.interacted());
    }

    #[test]
    fn open_resets_interaction() {
        let mut l = Lifecycle::new();
        l.open();
        l.mark_interaction();
        assert!(l.interacted());
        l.open();
        assert!(!l.interacted());
        assert!(l.visibility().is_visible());
    }

    #[test]
    fn blur_check_waits_for_grace_period() {
        let mut l = Lifecycle::new();
        let t0 = Instant::now();
        l.open();
        l.schedule_blur_check(t0);
        assert!(!l.run_due_checks(t0 + BLUR_GRACE - Duration::from_millis(1)));
        assert!(l.visibility().is_visible());
        assert!(l.run_due_checks(t0 + BLUR_GRACE));
        assert_eq!(l.visibility(), Visibility::Hidden);
        assert_eq!(l.pending_blur_checks(), 0);
    }

    #[test]
    fn interaction_keeps_panel_open() {
        let mut l = Lifecycle::new();
        let t0 = Instant::now();
        l.open();
        l.schedule_blur_check(t0);
        l.mark_interaction();
        assert!(!l.run_due_checks(t0 + BLUR_GRACE));
        assert!(l.visibility().is_visible());
    }

    #[test]
    fn stale_check_survives_reopen() {
        let mut l = Lifecycle::new();
        let t0 = Instant::now();
        l.open();
        l.schedule_blur_check(t0);
        l.close();
        l.open();
        // The old check fires against the fresh, untouched cycle.
        assert!(l.run_due_checks(t0 + BLUR_GRACE));
        assert_eq!(l.visibility(), Visibility::Hidden);
    }

    #[test]
    fn checks_fire_in_deadline_order() {
        let mut l = Lifecycle::new();
        let t0 = Instant::now();
        l.open();
        l.schedule_blur_check(t0);
        l.schedule_blur_check(t0 + Duration::from_millis(100));
        l.mark_interaction();
        assert!(!l.run_due_checks(t0 + BLUR_GRACE));
        assert_eq!(l.pending_blur_checks(), 1);
        l.open();
        assert!(l.run_due_checks(t0 + Duration::from_millis(300)));
        assert_eq!(l.pending_blur_checks(), 0);
    }
}
