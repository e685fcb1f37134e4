//! The text field a picker is attached to.

use crossterm::event::Event;
use ratatui::layout::Rect;

/// What a picker needs from the field it reads from and writes into.
///
/// The expected text format on read is `H+:M+` but nothing enforces it;
/// the picker always writes `HH:MM`.
pub trait AnchorField {
    fn value(&self) -> &str;

    fn set_value(&mut self, value: &str);

    /// Last on-screen rect of the field, used to place the panel.
    fn bounds(&self) -> Rect;

    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);

    /// Offer an input event to the field's own editor.
    fn handle_input(&mut self, _event: &Event) -> bool {
        false
    }
}
