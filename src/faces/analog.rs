use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::dial::{self, DialBounds, DialScene, DialStyle, Ring};
use super::{ClockFace, FaceContext};
use crate::event_bus::{EventBus, Topic};
use crate::keybindings::{Action, KeyBindings};
use crate::time_state::TimeState;
use crate::ui::{UiFrame, rect_contains, safe_set_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourScheme {
    /// 12 positions plus an AM/PM switch in the footer.
    Twelve,
    /// 24 positions, no switch.
    TwentyFour,
}

impl HourScheme {
    fn positions(self) -> u32 {
        match self {
            HourScheme::Twelve => 12,
            HourScheme::TwentyFour => 24,
        }
    }
}

pub fn twelve_hour(ctx: FaceContext) -> Box<dyn super::ClockFace> {
    Box::new(AnalogFace::new(ctx, HourScheme::Twelve))
}

pub fn twenty_four_hour(ctx: FaceContext) -> Box<dyn super::ClockFace> {
    Box::new(AnalogFace::new(ctx, HourScheme::TwentyFour))
}

/// Braille dial with a one-line footer showing the digital time.
#[derive(Debug)]
pub struct AnalogFace {
    scheme: HourScheme,
    style: DialStyle,
    bus: EventBus,
    keys: KeyBindings,
    am_rect: Option<Rect>,
    pm_rect: Option<Rect>,
}

impl AnalogFace {
    pub fn new(ctx: FaceContext, scheme: HourScheme) -> Self {
        let style = DialStyle {
            color: ctx.options.color(),
            background: ctx.options.background(),
            highlight: ctx.options.highlight(),
        };
        Self {
            scheme,
            style,
            bus: ctx.bus,
            keys: KeyBindings::default(),
            am_rect: None,
            pm_rect: None,
        }
    }

    fn split(area: Rect) -> (Rect, Option<Rect>) {
        if area.height < 3 {
            return (area, None);
        }
        let dial = Rect {
            height: area.height - 1,
            ..area
        };
        let footer = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        (dial, Some(footer))
    }

    fn scene(&self, time: TimeState) -> DialScene {
        let positions = self.scheme.positions();
        let step = 360.0 / positions as f64;
        let labelled: Vec<u32> = match self.scheme {
            HourScheme::Twelve => vec![12, 3, 6, 9],
            HourScheme::TwentyFour => vec![0, 6, 12, 18],
        };
        let labels = labelled
            .into_iter()
            .map(|h| ((h % positions) as f64 * step, h.to_string()))
            .collect();
        let minute = (time.minute % 60) as f64;
        DialScene {
            ticks: positions,
            labels,
            hour_angle: ((time.hour % positions) as f64 + minute / 60.0) * step,
            minute_angle: minute * 6.0,
        }
    }

    fn is_pm(time: TimeState) -> bool {
        time.hour % 24 >= 12
    }

    fn publish_hour(&self, hour: u32) {
        self.bus.trigger(Topic::HourChange, Some(hour));
    }

    fn publish_minute(&self, minute: u32) {
        self.bus.trigger(Topic::MinuteChange, Some(minute));
    }

    fn pick_hour(&self, position: u32, time: TimeState) -> u32 {
        match self.scheme {
            HourScheme::Twelve if Self::is_pm(time) => position + 12,
            _ => position,
        }
    }

    fn render_footer(&mut self, frame: &mut UiFrame<'_>, footer: Rect, time: TimeState) {
        let base = Style::default().fg(self.style.color).bg(self.style.background);
        let selected = Style::default()
            .fg(self.style.background)
            .bg(self.style.highlight)
            .add_modifier(Modifier::BOLD);
        frame.fill(footer, base);
        let buffer = frame.buffer_mut();
        let bounds = footer.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let digital = time.to_string();
        let x = footer.x.saturating_add(1);
        safe_set_string(buffer, bounds, x, footer.y, &digital, base);
        if self.scheme != HourScheme::Twelve {
            return;
        }
        let pm = Self::is_pm(time);
        let am_x = footer
            .x
            .saturating_add(footer.width.saturating_sub(8));
        let pm_x = am_x.saturating_add(4);
        let (am_style, pm_style) = if pm { (base, selected) } else { (selected, base) };
        safe_set_string(buffer, bounds, am_x, footer.y, " AM ", am_style);
        safe_set_string(buffer, bounds, pm_x, footer.y, " PM ", pm_style);
        self.am_rect = Some(Rect::new(am_x, footer.y, 4, 1));
        self.pm_rect = Some(Rect::new(pm_x, footer.y, 4, 1));
    }

    fn handle_meridiem_click(&self, column: u16, row: u16, time: TimeState) -> bool {
        let hour = time.hour % 24;
        if self.am_rect.is_some_and(|r| rect_contains(r, column, row)) {
            if Self::is_pm(time) {
                self.publish_hour(hour - 12);
            }
            return true;
        }
        if self.pm_rect.is_some_and(|r| rect_contains(r, column, row)) {
            if !Self::is_pm(time) {
                self.publish_hour(hour + 12);
            }
            return true;
        }
        false
    }

    fn handle_dial_press(&self, area: Rect, column: u16, row: u16, time: TimeState) -> bool {
        let (dial_area, _) = Self::split(area);
        let bounds = DialBounds::for_area(dial_area);
        let Some((x, y)) = bounds.cell_to_point(dial_area, column, row) else {
            return false;
        };
        let angle = dial::angle_of(x, y);
        match dial::ring_at(x, y) {
            Ring::Hour => {
                let position = dial::snap(angle, self.scheme.positions());
                self.publish_hour(self.pick_hour(position, time));
                true
            }
            Ring::Minute => {
                self.publish_minute(dial::snap(angle, 60));
                true
            }
            Ring::Outside => false,
        }
    }
}

impl ClockFace for AnalogFace {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, time: TimeState) {
        self.am_rect = None;
        self.pm_rect = None;
        let (dial_area, footer) = Self::split(area);
        dial::draw_dial(frame, dial_area, self.style, &self.scene(time));
        if let Some(footer) = footer {
            self.render_footer(frame, footer, time);
        }
    }

    fn handle_event(&mut self, event: &Event, area: Rect, time: TimeState) -> bool {
        match event {
            Event::Mouse(mouse)
                if matches!(
                    mouse.kind,
                    MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
                ) =>
            {
                if matches!(mouse.kind, MouseEventKind::Down(_))
                    && self.handle_meridiem_click(mouse.column, mouse.row, time)
                {
                    return true;
                }
                self.handle_dial_press(area, mouse.column, mouse.row, time)
            }
            Event::Key(key) => {
                let hour = time.hour % 24;
                let minute = time.minute % 60;
                if self.keys.matches(Action::HourUp, key) {
                    self.publish_hour((hour + 1) % 24);
                } else if self.keys.matches(Action::HourDown, key) {
                    self.publish_hour((hour + 23) % 24);
                } else if self.keys.matches(Action::MinuteUp, key) {
                    self.publish_minute((minute + 1) % 60);
                } else if self.keys.matches(Action::MinuteDown, key) {
                    self.publish_minute((minute + 59) % 60);
                } else if self.scheme == HourScheme::Twelve
                    && self.keys.matches(Action::ToggleMeridiem, key)
                {
                    self.publish_hour((hour + 12) % 24);
                } else {
                    return false;
                }
                true
            }
            _ => false,
        }
    }
}
