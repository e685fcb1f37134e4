use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use crate::ui::{UiFrame, rect_contains, safe_set_string};

const CANCEL_LABEL: &str = "[ Cancel ]";
const OK_LABEL: &str = "[ OK ]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Canvas,
    Ok,
    Cancel,
    /// Border, padding or button row outside the buttons.
    Chrome,
}

/// Border, canvas slot and the Cancel/OK row of the floating panel.
///
/// Hit rects are refreshed on every render and cleared when the panel is
/// not drawn, so a stale layout never swallows clicks.
#[derive(Debug, Default)]
pub struct PanelChrome {
    panel: Option<Rect>,
    canvas: Option<Rect>,
    ok_rect: Option<Rect>,
    cancel_rect: Option<Rect>,
}

impl PanelChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn canvas(&self) -> Option<Rect> {
        self.canvas
    }

    pub fn ok_rect(&self) -> Option<Rect> {
        self.ok_rect
    }

    pub fn cancel_rect(&self) -> Option<Rect> {
        self.cancel_rect
    }

    /// Draw the chrome into `rect` and return the canvas slot.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, rect: Rect, background: Color) -> Option<Rect> {
        self.clear();
        if rect.width < 4 || rect.height < 4 {
            return None;
        }
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(" Time ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(crate::theme::panel_border()))
            .style(Style::default().bg(background));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.panel = Some(rect);

        let canvas = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let button_y = inner.y.saturating_add(inner.height.saturating_sub(1));
        let buttons_width = (CANCEL_LABEL.len() + 1 + OK_LABEL.len()) as u16;
        let start_x = inner
            .x
            .saturating_add(inner.width.saturating_sub(buttons_width));
        let ok_x = start_x.saturating_add(CANCEL_LABEL.len() as u16 + 1);

        let buffer = frame.buffer_mut();
        let bounds = inner.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return None;
        }
        let cancel_style = Style::default()
            .fg(crate::theme::button_fg())
            .bg(crate::theme::button_bg());
        let ok_style = Style::default()
            .fg(crate::theme::button_primary_fg())
            .bg(crate::theme::button_primary_bg())
            .add_modifier(Modifier::BOLD);
        safe_set_string(buffer, bounds, start_x, button_y, CANCEL_LABEL, cancel_style);
        safe_set_string(buffer, bounds, ok_x, button_y, OK_LABEL, ok_style);
        self.cancel_rect = Some(Rect::new(start_x, button_y, CANCEL_LABEL.len() as u16, 1));
        self.ok_rect = Some(Rect::new(ok_x, button_y, OK_LABEL.len() as u16, 1));
        self.canvas = (canvas.height > 0).then_some(canvas);
        self.canvas
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<PanelHit> {
        let inside = |rect: Option<Rect>| rect.is_some_and(|r| rect_contains(r, column, row));
        if inside(self.ok_rect) {
            Some(PanelHit::Ok)
        } else if inside(self.cancel_rect) {
            Some(PanelHit::Cancel)
        } else if inside(self.canvas) {
            Some(PanelHit::Canvas)
        } else if inside(self.panel) {
            Some(PanelHit::Chrome)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn rendered(rect: Rect) -> (PanelChrome, Buffer) {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        let mut chrome = PanelChrome::new();
        {
            let mut ui = UiFrame::from_parts(area, &mut buf);
            chrome.render(&mut ui, rect, Color::Black);
        }
        (chrome, buf)
    }

    #[test]
    fn layout_reserves_button_row() {
        let (chrome, _) = rendered(Rect::new(10, 5, 34, 18));
        assert_eq!(chrome.canvas(), Some(Rect::new(11, 6, 32, 15)));
        assert_eq!(chrome.ok_rect(), Some(Rect::new(37, 21, 6, 1)));
        assert_eq!(chrome.cancel_rect(), Some(Rect::new(26, 21, 10, 1)));
    }

    #[test]
    fn hit_testing_prefers_buttons() {
        let (chrome, buf) = rendered(Rect::new(10, 5, 34, 18));
        assert_eq!(chrome.hit(38, 21), Some(PanelHit::Ok));
        assert_eq!(chrome.hit(27, 21), Some(PanelHit::Cancel));
        assert_eq!(chrome.hit(20, 10), Some(PanelHit::Canvas));
        assert_eq!(chrome.hit(10, 5), Some(PanelHit::Chrome));
        assert_eq!(chrome.hit(12, 21), Some(PanelHit::Chrome));
        assert_eq!(chrome.hit(0, 0), None);
        assert_eq!(buf.cell((39, 21)).unwrap().symbol(), "O");
    }

    #[test]
    fn tiny_rect_draws_nothing() {
        let (chrome, _) = rendered(Rect::new(0, 0, 3, 3));
        assert_eq!(chrome.hit(1, 1), None);
        assert_eq!(chrome.canvas(), None);
    }
}
