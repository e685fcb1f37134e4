//! Geometry and drawing shared by the analog faces.
//!
//! The dial lives in canvas space: origin at the center, `y` up, radius 1.
//! Terminal cells are roughly twice as tall as they are wide, so the canvas
//! bounds are stretched along the longer axis to keep the circle round.
//! Angles are degrees clockwise from twelve o'clock.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};

use crate::ui::UiFrame;

pub const DIAL_RADIUS: f64 = 0.95;
pub const TICK_INNER: f64 = 0.85;
pub const LABEL_RADIUS: f64 = 0.7;
pub const HOUR_HAND: f64 = 0.45;
pub const MINUTE_HAND: f64 = 0.8;

/// Presses closer to the center than this pick the hour.
pub const HOUR_RING: f64 = 0.55;
/// Presses up to this radius (and beyond `HOUR_RING`) pick the minute.
pub const MINUTE_RING: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl DialBounds {
    pub fn for_area(area: Rect) -> Self {
        if area.width == 0 || area.height == 0 {
            return Self {
                x: [-1.0, 1.0],
                y: [-1.0, 1.0],
            };
        }
        let aspect = area.width as f64 / (2.0 * area.height as f64);
        if aspect >= 1.0 {
            Self {
                x: [-aspect, aspect],
                y: [-1.0, 1.0],
            }
        } else {
            Self {
                x: [-1.0, 1.0],
                y: [-1.0 / aspect, 1.0 / aspect],
            }
        }
    }

    /// Canvas units covered by one terminal column.
    pub fn cell_width(&self, area: Rect) -> f64 {
        (self.x[1] - self.x[0]) / area.width.max(1) as f64
    }

    /// Center of the cell at `(column, row)` in canvas space.
    pub fn cell_to_point(&self, area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
        if !crate::ui::rect_contains(area, column, row) {
            return None;
        }
        let fx = (column - area.x) as f64 + 0.5;
        let fy = (row - area.y) as f64 + 0.5;
        let x = self.x[0] + fx * (self.x[1] - self.x[0]) / area.width as f64;
        let y = self.y[1] - fy * (self.y[1] - self.y[0]) / area.height as f64;
        Some((x, y))
    }
}

/// Point at `radius` along `angle`.
pub fn polar(angle: f64, radius: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (radius * rad.sin(), radius * rad.cos())
}

/// Angle of `(x, y)` in `[0, 360)`.
pub fn angle_of(x: f64, y: f64) -> f64 {
    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Nearest of `steps` evenly spaced positions, 0 at twelve o'clock.
pub fn snap(angle: f64, steps: u32) -> u32 {
    let step = 360.0 / steps as f64;
    ((angle / step).round() as u32) % steps
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    Hour,
    Minute,
    Outside,
}

pub fn ring_at(x: f64, y: f64) -> Ring {
    let r = x.hypot(y);
    if r <= HOUR_RING {
        Ring::Hour
    } else if r <= MINUTE_RING {
        Ring::Minute
    } else {
        Ring::Outside
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialStyle {
    pub color: Color,
    pub background: Color,
    pub highlight: Color,
}

/// One frame's worth of dial content.
#[derive(Debug, Clone)]
pub struct DialScene {
    pub ticks: u32,
    pub labels: Vec<(f64, String)>,
    pub hour_angle: f64,
    pub minute_angle: f64,
}

pub fn draw_dial(frame: &mut UiFrame<'_>, area: Rect, style: DialStyle, scene: &DialScene) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let bounds = DialBounds::for_area(area);
    let half_cell = bounds.cell_width(area) / 2.0;
    let canvas = Canvas::default()
        .background_color(style.background)
        .marker(Marker::Braille)
        .x_bounds(bounds.x)
        .y_bounds(bounds.y)
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: DIAL_RADIUS,
                color: style.color,
            });
            for i in 0..scene.ticks {
                let angle = i as f64 * 360.0 / scene.ticks as f64;
                let (x1, y1) = polar(angle, TICK_INNER);
                let (x2, y2) = polar(angle, DIAL_RADIUS);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: style.color,
                });
            }
            ctx.layer();
            for (angle, length) in [
                (scene.hour_angle, HOUR_HAND),
                (scene.minute_angle, MINUTE_HAND),
            ] {
                let (x2, y2) = polar(angle, length);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2,
                    y2,
                    color: style.highlight,
                });
            }
            ctx.layer();
            for (angle, label) in &scene.labels {
                let (x, y) = polar(*angle, LABEL_RADIUS);
                let offset = half_cell * label.chars().count() as f64;
                ctx.print(
                    x - offset,
                    y,
                    Span::styled(label.clone(), Style::default().fg(style.color)),
                );
            }
        });
    frame.render_widget(canvas, area);
}
