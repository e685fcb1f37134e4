use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_timepicker::components::TextInputComponent;
use term_timepicker::drivers::InputDriver;
use term_timepicker::event_loop::{ControlFlow, EventLoop, Tick};
use term_timepicker::ui::UiFrame;
use term_timepicker::{AnchorField, OptionOverrides, TimePicker, TimeState, Topic, Visibility};

struct Scripted {
    events: VecDeque<Event>,
}

impl InputDriver for Scripted {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::other("script exhausted"))
    }
}

fn press(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn anchor(value: &str) -> TextInputComponent {
    TextInputComponent::new("Start")
        .with_value(value)
        .with_bounds(Rect::new(0, 2, 20, 1))
}

fn render(picker: &mut TimePicker<TextInputComponent>, buf: &mut Buffer, now: Instant) {
    let area = buf.area;
    let mut frame = UiFrame::from_parts(area, buf);
    picker.render_frame(&mut frame, now);
}

#[test]
fn event_loop_drives_open_adjust_save() {
    let mut picker = TimePicker::new(anchor("07:05"), OptionOverrides::new().face("24")).unwrap();
    let driver = Scripted {
        events: VecDeque::from(vec![
            press(8, 2),
            key(KeyCode::Up),
            key(KeyCode::Right),
            key(KeyCode::Enter),
        ]),
    };
    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    let mut frames = 0;
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
    event_loop
        .run(|driver, tick| {
            match tick {
                Tick::Frame(now) => {
                    frames += 1;
                    render(&mut picker, &mut buf, now);
                    if driver.events.is_empty() && frames > 1 {
                        return Ok(ControlFlow::Quit);
                    }
                }
                Tick::Input(event, now) => {
                    picker.handle_event_at(&event, now);
                }
            }
            Ok(ControlFlow::Continue)
        })
        .unwrap();

    assert_eq!(picker.anchor().value(), "08:06");
    assert_eq!(picker.visibility(), Visibility::Hidden);
    assert!(picker.anchor().is_focused());
}

#[test]
fn observers_see_time_and_open_events() {
    let mut picker = TimePicker::new(anchor("xx 10:30 yy"), OptionOverrides::default()).unwrap();
    let handle = picker.time_handle();
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&opened);
    picker
        .bus()
        .on(Topic::ControlOpen, move |payload| sink.borrow_mut().push(payload));

    picker.show();
    assert_eq!(handle.get(), TimeState::new(10, 30));
    assert_eq!(*opened.borrow(), vec![None]);

    picker.bus().trigger(Topic::HourChange, Some(22));
    assert_eq!(handle.get(), TimeState::new(22, 30));
}

#[test]
fn blur_race_keeps_panel_when_canvas_is_used() {
    let t0 = Instant::now();
    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    let mut picker = TimePicker::new(anchor(""), OptionOverrides::default()).unwrap();

    picker.handle_event_at(&press(8, 2), t0);
    render(&mut picker, &mut buf, t0);
    let panel = picker.panel_rect().unwrap();
    // Somewhere inside the dial, away from the border.
    picker.handle_event_at(&press(panel.x + 16, panel.y + 8), t0 + Duration::from_millis(5));
    render(&mut picker, &mut buf, t0 + Duration::from_millis(400));
    assert!(picker.is_visible());
}

#[test]
fn blur_race_hides_when_clicking_away() {
    let t0 = Instant::now();
    let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
    let mut picker = TimePicker::new(anchor(""), OptionOverrides::default()).unwrap();

    picker.handle_event_at(&press(8, 2), t0);
    render(&mut picker, &mut buf, t0);
    picker.handle_event_at(&press(1, 22), t0);
    render(&mut picker, &mut buf, t0 + Duration::from_millis(199));
    assert!(picker.is_visible());
    render(&mut picker, &mut buf, t0 + Duration::from_millis(200));
    assert!(!picker.is_visible());
    // Hidden panels leave nothing to click.
    assert!(!picker.handle_event_at(&press(30, 10), t0 + Duration::from_millis(300)));
}

#[test]
fn stale_blur_check_runs_after_reopen() {
    let t0 = Instant::now();
    let mut picker = TimePicker::new(anchor(""), OptionOverrides::default()).unwrap();
    picker.show();
    picker.handle_blur(t0);
    picker.hide();
    picker.show();
    picker.tick(t0 + Duration::from_millis(200));
    assert!(!picker.is_visible());
}
