use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::anchor::AnchorField;
use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, safe_set_string};

/// Single-line text field rendered as `label [value____]`.
#[derive(Debug, Clone, Default)]
pub struct TextInputComponent {
    label: String,
    value: String,
    cursor: usize,
    focused: bool,
    area: Rect,
}

impl TextInputComponent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(&value.into());
        self
    }

    /// Pin the on-screen rect without rendering, mainly for tests.
    pub fn with_bounds(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    fn field_rect(&self, area: Rect) -> Rect {
        let label_width = self.label.chars().count() as u16 + 1;
        Rect {
            x: area.x.saturating_add(label_width),
            width: area.width.saturating_sub(label_width),
            ..area
        }
    }
}

impl AnchorField for TextInputComponent {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.char_len();
    }

    fn bounds(&self) -> Rect {
        self.field_rect(self.area)
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_input(&mut self, event: &Event) -> bool {
        if !self.focused {
            return false;
        }
        let Event::Key(key) = event else {
            return false;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => return false,
        }
        true
    }
}

impl Component for TextInputComponent {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let label_style = Style::default().fg(crate::theme::label_fg());
        let field_style = if self.focused {
            Style::default()
                .fg(crate::theme::field_focus_fg())
                .bg(crate::theme::field_focus_bg())
        } else {
            Style::default()
                .fg(crate::theme::field_fg())
                .bg(crate::theme::field_bg())
        };
        let field = self.field_rect(area);
        frame.fill(Rect { height: 1, ..field }, field_style);
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        safe_set_string(buffer, bounds, area.x, area.y, &self.label, label_style);
        safe_set_string(buffer, bounds, field.x, field.y, &self.value, field_style);
        if self.focused {
            let cursor_x = field.x.saturating_add(self.cursor as u16);
            if cursor_x < field.x.saturating_add(field.width)
                && let Some(cell) = buffer.cell_mut((cursor_x, field.y))
            {
                cell.set_style(field_style.add_modifier(Modifier::REVERSED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn edits_only_while_focused() {
        let mut input = TextInputComponent::new("Start");
        assert!(!input.handle_input(&key(KeyCode::Char('1'))));
        input.set_focused(true);
        for c in "7:05".chars() {
            assert!(input.handle_input(&key(KeyCode::Char(c))));
        }
        assert_eq!(input.value(), "7:05");
    }

    #[test]
    fn cursor_editing() {
        let mut input = TextInputComponent::new("t").with_value("0705");
        input.set_focused(true);
        assert_eq!(input.cursor(), 4);
        input.handle_input(&key(KeyCode::Left));
        input.handle_input(&key(KeyCode::Left));
        input.handle_input(&key(KeyCode::Char(':')));
        assert_eq!(input.value(), "07:05");
        input.handle_input(&key(KeyCode::Home));
        input.handle_input(&key(KeyCode::Delete));
        assert_eq!(input.value(), "7:05");
        input.handle_input(&key(KeyCode::End));
        input.handle_input(&key(KeyCode::Backspace));
        assert_eq!(input.value(), "7:0");
    }

    #[test]
    fn ctrl_keys_are_left_to_the_host() {
        let mut input = TextInputComponent::new("t");
        input.set_focused(true);
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!input.handle_input(&ev));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn bounds_exclude_label() {
        let input = TextInputComponent::new("Start").with_bounds(Rect::new(2, 3, 20, 1));
        assert_eq!(input.bounds(), Rect::new(8, 3, 14, 1));
    }

    #[test]
    fn render_writes_label_and_value() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        let mut input = TextInputComponent::new("At").with_value("09:30");
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            input.render(&mut ui, area, &ComponentContext::default());
        }
        let line: String = (0..area.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(line.starts_with("At 09:30"));
        assert_eq!(input.bounds(), Rect::new(3, 0, 17, 1));
    }
}
