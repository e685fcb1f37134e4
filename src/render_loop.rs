//! Per-frame paint gate for the picker.
//!
//! The host's event loop calls [`RenderLoop::next_frame`] once per idle tick.
//! The loop keeps "rescheduling" itself simply by being called again on the
//! next tick; it only paints while the picker is visible. Unlike a bare
//! animation-frame chain it can be stopped through a [`CancelToken`], after
//! which it never paints again.

use std::cell::Cell;
use std::rc::Rc;

use crate::lifecycle::Visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Paint,
    Skip,
    Stopped,
}

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Debug, Default)]
pub struct RenderLoop {
    token: CancelToken,
    ticks: u64,
    painted: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn next_frame(&mut self, visibility: Visibility) -> FrameStatus {
        if self.token.is_cancelled() {
            return FrameStatus::Stopped;
        }
        self.ticks += 1;
        if visibility.is_visible() {
            self.painted += 1;
            FrameStatus::Paint
        } else {
            FrameStatus::Skip
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn painted(&self) -> u64 {
        self.painted
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}
