use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::keybindings::{Action, KeyBindings};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-line footer listing key hints on the left and a status on the right.
#[derive(Debug, Clone, Default)]
pub struct HintBar {
    hints: Vec<(String, String)>,
    status: String,
}

impl HintBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build hints from the first binding of each action.
    pub fn from_bindings(bindings: &KeyBindings, actions: &[(Action, &str)]) -> Self {
        let hints = actions
            .iter()
            .filter_map(|(action, label)| {
                bindings
                    .first_combo(*action)
                    .map(|combo| (combo.display(), (*label).to_string()))
            })
            .collect();
        Self {
            hints,
            status: String::new(),
        }
    }

    pub fn set_status<T: Into<String>>(&mut self, value: T) {
        self.status = value.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn hints(&self) -> &[(String, String)] {
        &self.hints
    }
}

impl Component for HintBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let key_style = Style::default().fg(crate::theme::hint_key_fg());
        let text_style = Style::default().fg(crate::theme::hint_fg());

        let mut x = area.x;
        for (key, label) in &self.hints {
            safe_set_string(buffer, bounds, x, area.y, key, key_style);
            x = x.saturating_add(key.chars().count() as u16 + 1);
            let label = format!("{label}  ");
            safe_set_string(buffer, bounds, x, area.y, &label, text_style);
            x = x.saturating_add(label.chars().count() as u16);
        }

        if !self.status.is_empty() {
            let status = truncate_to_width(&self.status, width);
            let status_width = status.chars().count();
            let start_x = area.x.saturating_add((width - status_width) as u16);
            if start_x >= x {
                safe_set_string(buffer, bounds, start_x, area.y, &status, text_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn hints_come_from_bindings() {
        let bar = HintBar::from_bindings(
            &KeyBindings::default(),
            &[(Action::Quit, "quit"), (Action::PickerAccept, "ok")],
        );
        assert_eq!(
            bar.hints(),
            &[
                ("Ctrl+Q".to_string(), "quit".to_string()),
                ("Enter".to_string(), "ok".to_string())
            ]
        );
    }

    #[test]
    fn status_is_right_aligned() {
        let mut bar = HintBar::from_bindings(&KeyBindings::default(), &[(Action::Quit, "quit")]);
        bar.set_status("07:05");
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            bar.render(&mut ui, area, &ComponentContext::default());
        }
        let line = row(&buf, 30);
        assert!(line.starts_with("Ctrl+Q quit"));
        assert!(line.ends_with("07:05"));
    }
}
