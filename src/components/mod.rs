use std::time::Instant;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod debug_log;
pub mod hint_bar;
pub mod picker_panel;
pub mod text_input;

pub use debug_log::{DebugLogComponent, DebugLogHandle};
pub use hint_bar::HintBar;
pub use picker_panel::{PanelChrome, PanelHit};
pub use text_input::TextInputComponent;

/// Per-call UI metadata handed to components.
///
/// `now` is the frame or event timestamp. Components that schedule deferred
/// work read time from here instead of the system clock so hosts and tests
/// decide what "now" is.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    now: Instant,
}

impl ComponentContext {
    pub fn new(focused: bool, now: Instant) -> Self {
        Self { focused, now }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false, Instant::now())
    }
}

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
