//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! The picker panel is positioned with signed coordinates and may hang off
//! any edge of a small terminal. Writing outside the buffer panics, so every
//! draw goes through `UiFrame`, which intersects the target with the visible
//! area first and drops fully off-screen draws.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    ///
    /// Tests render into a bare `Buffer` through this.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Reset every visible cell of `area` to a blank with `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(area) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }
}

/// Convert a signed origin plus size into the on-screen part of that rect.
///
/// Returns `None` when nothing of it lands inside `bounds`.
pub fn visible_rect(left: i32, top: i32, width: u16, height: u16, bounds: Rect) -> Option<Rect> {
    let x0 = left.max(bounds.x as i32);
    let y0 = top.max(bounds.y as i32);
    let x1 = (left + width as i32).min(bounds.x as i32 + bounds.width as i32);
    let y1 = (top + height as i32).min(bounds.y as i32 + bounds.height as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    })
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 2,
        };
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 1, 0, "hello", Style::default());
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "h");

        // outside bounds should be ignored (no panic)
        safe_set_string(&mut buf, bounds, 100, 0, "x", Style::default());
    }

    #[test]
    fn fill_clips_to_frame_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.fill(
            Rect {
                x: 2,
                y: 1,
                width: 10,
                height: 10,
            },
            Style::default().bg(Color::Red),
        );
        assert_eq!(buf.cell((3, 1)).unwrap().bg, Color::Red);
        assert_eq!(buf.cell((1, 1)).unwrap().bg, Color::Reset);
    }

    #[test]
    fn visible_rect_clips_negative_origin() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 10,
        };
        assert_eq!(
            visible_rect(-3, 2, 8, 4, bounds),
            Some(Rect {
                x: 0,
                y: 2,
                width: 5,
                height: 4
            })
        );
        assert_eq!(visible_rect(-10, 0, 8, 4, bounds), None);
        assert_eq!(visible_rect(18, 8, 8, 4, bounds).map(|r| r.area()), Some(4));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect {
            x: 2,
            y: 2,
            width: 3,
            height: 1,
        };
        assert!(rect_contains(r, 2, 2));
        assert!(rect_contains(r, 4, 2));
        assert!(!rect_contains(r, 5, 2));
        assert!(!rect_contains(r, 2, 3));
    }
}
