//! Clock faces: the pluggable drawing strategies behind a picker's canvas.
//!
//! A face is created once per picker from a [`FaceContext`] and then asked to
//! paint every visible frame with the picker's current time. The picker never
//! looks inside a face. When the user picks something on the dial the face
//! reports it by triggering `HourChange` / `MinuteChange` on the context bus.

pub mod analog;
pub mod dial;

use std::collections::BTreeMap;
use std::fmt;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::error::{PickerError, Result};
use crate::event_bus::EventBus;
use crate::options::PickerOptions;
use crate::time_state::TimeState;
use crate::ui::UiFrame;

pub use analog::{AnalogFace, HourScheme};

pub trait ClockFace {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, time: TimeState);

    /// Handle input aimed at the canvas. `area` is the canvas rect from the
    /// most recent render.
    fn handle_event(&mut self, _event: &Event, _area: Rect, _time: TimeState) -> bool {
        false
    }
}

/// Everything a face factory gets to work with.
#[derive(Debug, Clone)]
pub struct FaceContext {
    pub options: PickerOptions,
    pub bus: EventBus,
}

pub type FaceFactory = fn(FaceContext) -> Box<dyn ClockFace>;

#[derive(Clone)]
pub struct FaceRegistry {
    factories: BTreeMap<String, FaceFactory>,
}

impl FaceRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the `"12"` and `"24"` analog faces.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("12", analog::twelve_hour);
        registry.register("24", analog::twenty_four_hour);
        registry
    }

    /// Register `factory` under `id`, replacing any earlier registration.
    pub fn register(&mut self, id: impl Into<String>, factory: FaceFactory) {
        self.factories.insert(id.into(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn create(&self, id: &str, ctx: FaceContext) -> Result<Box<dyn ClockFace>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| PickerError::UnknownFace(id.to_string()))?;
        Ok(factory(ctx))
    }
}

impl Default for FaceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for FaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;
    impl ClockFace for Blank {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _time: TimeState) {}
    }

    fn blank(_ctx: FaceContext) -> Box<dyn ClockFace> {
        Box::new(Blank)
    }

    fn ctx() -> FaceContext {
        FaceContext {
            options: PickerOptions::default(),
            bus: EventBus::new(),
        }
    }

    #[test]
    fn builtin_has_both_dials() {
        let r = FaceRegistry::builtin();
        assert_eq!(r.ids(), vec!["12", "24"]);
        assert!(r.create("12", ctx()).is_ok());
        assert!(r.create("24", ctx()).is_ok());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let r = FaceRegistry::builtin();
        match r.create("13", ctx()) {
            Err(PickerError::UnknownFace(id)) => assert_eq!(id, "13"),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected unknown face"),
        }
    }

    #[test]
    fn custom_faces_can_be_registered() {
        let mut r = FaceRegistry::empty();
        assert!(!r.contains("blank"));
        r.register("blank", blank);
        assert!(r.contains("blank"));
        assert!(r.create("blank", ctx()).is_ok());
    }

    #[test]
    fn default_face_handles_no_events() {
        let mut face = Blank;
        let event = Event::FocusGained;
        assert!(!face.handle_event(&event, Rect::default(), TimeState::default()));
    }
}
