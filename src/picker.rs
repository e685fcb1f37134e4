//! The widget facade: one picker bound to one anchor field.
//!
//! `TimePicker` owns everything that makes up a single time picker: the
//! current [`TimeState`], the open/close [`Lifecycle`], the [`RenderLoop`]
//! gate, the clock face and the panel chrome. The host feeds it input and
//! idle frames with explicit timestamps; the picker decides when to show,
//! hide, save and paint.
//!
//! The face talks back only through the picker's [`EventBus`]. The hour and
//! minute subscriptions made at construction are the only writers of the
//! time besides [`TimePicker::show`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::anchor::AnchorField;
use crate::components::{Component, ComponentContext, PanelChrome, PanelHit};
use crate::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, PANEL_HEIGHT, PANEL_WIDTH};
use crate::error::Result;
use crate::event_bus::{EventBus, Topic};
use crate::faces::{ClockFace, FaceContext, FaceRegistry};
use crate::keybindings::{Action, KeyBindings};
use crate::lifecycle::{Lifecycle, Visibility};
use crate::options::{OptionOverrides, PickerOptions};
use crate::placement::{AnchorRect, PanelGeometry, PanelSize, PlacementMetrics, place_panel_in};
use crate::render_loop::{CancelToken, FrameStatus, RenderLoop};
use crate::time_state::{TimeHandle, TimeState};
use crate::ui::{UiFrame, rect_contains, visible_rect};

pub struct TimePicker<A: AnchorField> {
    anchor: A,
    options: PickerOptions,
    time: Rc<Cell<TimeState>>,
    bus: EventBus,
    lifecycle: Lifecycle,
    render_loop: RenderLoop,
    face: Box<dyn ClockFace>,
    chrome: PanelChrome,
    metrics: PlacementMetrics,
    panel_size: PanelSize,
    viewport: Rect,
    geometry: Option<PanelGeometry>,
    keys: KeyBindings,
}

impl<A: AnchorField> TimePicker<A> {
    /// Build a picker using the builtin faces.
    pub fn new(anchor: A, overrides: OptionOverrides) -> Result<Self> {
        Self::with_registry(anchor, overrides, &FaceRegistry::builtin())
    }

    /// Build a picker whose face is looked up in `faces`.
    ///
    /// Fails with [`PickerError::UnknownFace`](crate::error::PickerError)
    /// when the resolved face id has no factory.
    pub fn with_registry(anchor: A, overrides: OptionOverrides, faces: &FaceRegistry) -> Result<Self> {
        let options = PickerOptions::resolve(overrides);
        let time = Rc::new(Cell::new(TimeState::default()));
        let bus = EventBus::new();
        let face = faces.create(
            &options.face,
            FaceContext {
                options: options.clone(),
                bus: bus.clone(),
            },
        )?;

        let hour_cell = Rc::clone(&time);
        bus.on(Topic::HourChange, move |hour| {
            if let Some(hour) = hour {
                hour_cell.set(TimeState {
                    hour,
                    ..hour_cell.get()
                });
            }
        });
        let minute_cell = Rc::clone(&time);
        bus.on(Topic::MinuteChange, move |minute| {
            if let Some(minute) = minute {
                minute_cell.set(TimeState {
                    minute,
                    ..minute_cell.get()
                });
            }
        });

        tracing::debug!(face = %options.face, "time picker created");
        Ok(Self {
            anchor,
            options,
            time,
            bus,
            lifecycle: Lifecycle::new(),
            render_loop: RenderLoop::new(),
            face,
            chrome: PanelChrome::new(),
            metrics: PlacementMetrics::CELLS,
            panel_size: PanelSize {
                width: PANEL_WIDTH as i32,
                height: PANEL_HEIGHT as i32,
            },
            viewport: Rect::new(0, 0, DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            geometry: None,
            keys: KeyBindings::default(),
        })
    }

    pub fn with_placement(mut self, metrics: PlacementMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_panel_size(mut self, size: PanelSize) -> Self {
        self.panel_size = size;
        self
    }

    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_keybindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    /// Parse the anchor, open the panel next to it and announce `controlOpen`.
    ///
    /// Calling it while already visible re-parses and re-positions.
    pub fn show(&mut self) {
        let time = TimeState::parse_or_default(self.anchor.value());
        self.time.set(time);
        self.lifecycle.open();
        let geometry = place_panel_in(
            AnchorRect::from_rect(self.anchor.bounds()),
            self.panel_size,
            self.viewport.right() as i32,
            self.viewport.bottom() as i32,
            self.metrics,
        );
        self.geometry = Some(geometry);
        tracing::debug!(%time, left = geometry.left, top = geometry.top, "picker shown");
        self.bus.trigger(Topic::ControlOpen, None);
    }

    pub fn hide(&mut self) {
        if self.lifecycle.visibility().is_visible() {
            tracing::debug!("picker hidden");
        }
        self.lifecycle.close();
    }

    /// Write the current time into the anchor as `HH:MM` and close.
    pub fn save(&mut self) {
        let text = self.time.get().to_string();
        tracing::debug!(value = %text, "picker saved");
        self.anchor.set_value(&text);
        self.hide();
    }

    /// Anchor lost focus: queue a check that hides unless the panel is used.
    pub fn handle_blur(&mut self, now: Instant) {
        self.lifecycle.schedule_blur_check(now);
    }

    /// Run the blur checks that are due.
    pub fn tick(&mut self, now: Instant) {
        if self.lifecycle.run_due_checks(now) {
            tracing::debug!("blur check closed picker");
        }
    }

    pub fn mark_interaction(&mut self) {
        self.lifecycle.mark_interaction();
    }

    /// Stop the render loop for good and close the panel.
    pub fn dispose(&mut self) {
        self.render_loop.token().cancel();
        self.hide();
        self.chrome.clear();
    }

    /// Give the anchor focus; showing the picker is the focus reaction.
    pub fn focus_anchor(&mut self) {
        if self.anchor.is_focused() {
            return;
        }
        self.anchor.set_focused(true);
        self.show();
    }

    pub fn blur_anchor(&mut self, now: Instant) {
        if !self.anchor.is_focused() {
            return;
        }
        self.anchor.set_focused(false);
        self.handle_blur(now);
    }

    pub fn visibility(&self) -> Visibility {
        self.lifecycle.visibility()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility().is_visible()
    }

    pub fn time(&self) -> TimeState {
        self.time.get()
    }

    pub fn time_handle(&self) -> TimeHandle {
        TimeHandle::new(Rc::clone(&self.time))
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn geometry(&self) -> Option<PanelGeometry> {
        self.geometry
    }

    pub fn interacted(&self) -> bool {
        self.lifecycle.interacted()
    }

    pub fn pending_blur_checks(&self) -> usize {
        self.lifecycle.pending_blur_checks()
    }

    pub fn render_token(&self) -> CancelToken {
        self.render_loop.token()
    }

    /// Frames painted so far.
    pub fn frames_painted(&self) -> u64 {
        self.render_loop.painted()
    }

    pub fn anchor(&self) -> &A {
        &self.anchor
    }

    pub fn anchor_mut(&mut self) -> &mut A {
        &mut self.anchor
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Area the panel is placed and clipped against. Takes effect on the
    /// next `show`.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// On-screen part of the panel, if it is visible at all.
    pub fn panel_rect(&self) -> Option<Rect> {
        if !self.is_visible() {
            return None;
        }
        let geometry = self.geometry?;
        visible_rect(
            geometry.left,
            geometry.top,
            self.panel_size.width.max(0) as u16,
            self.panel_size.height.max(0) as u16,
            self.viewport,
        )
    }

    /// One host frame: due blur checks, then paint if the loop allows it.
    pub fn render_frame(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        self.tick(now);
        match self.render_loop.next_frame(self.lifecycle.visibility()) {
            FrameStatus::Paint => self.paint(frame),
            FrameStatus::Skip | FrameStatus::Stopped => self.chrome.clear(),
        }
    }

    fn paint(&mut self, frame: &mut UiFrame<'_>) {
        let Some(rect) = self
            .panel_rect()
            .map(|r| r.intersection(frame.area()))
            .filter(|r| r.width > 0 && r.height > 0)
        else {
            self.chrome.clear();
            return;
        };
        let background = self.options.background();
        let Some(canvas) = self.chrome.render(frame, rect, background) else {
            return;
        };
        frame.fill(canvas, Style::default().bg(background));
        self.face.render(frame, canvas, self.time.get());
    }

    /// Route one input event. Returns `true` when the picker consumed it.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, event, now),
            Event::Key(key) => self.handle_key(key, event, now),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, event: &Event, now: Instant) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if rect_contains(self.anchor.bounds(), mouse.column, mouse.row) {
                    self.focus_anchor();
                    return true;
                }
                // The anchor blurs before the press lands anywhere else.
                self.blur_anchor(now);
                if !self.is_visible() {
                    return false;
                }
                match self.chrome.hit(mouse.column, mouse.row) {
                    Some(PanelHit::Canvas) => {
                        self.mark_interaction();
                        self.forward_to_face(event);
                        true
                    }
                    Some(PanelHit::Ok) => {
                        self.save();
                        true
                    }
                    Some(PanelHit::Cancel) => {
                        self.hide();
                        true
                    }
                    Some(PanelHit::Chrome) => true,
                    None => false,
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.is_visible()
                    && self.chrome.hit(mouse.column, mouse.row) == Some(PanelHit::Canvas)
                {
                    self.mark_interaction();
                    self.forward_to_face(event);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &Event, now: Instant) -> bool {
        if self.is_visible() {
            if self.keys.matches(Action::PickerAccept, key) {
                self.save();
                return true;
            }
            if self.keys.matches(Action::PickerCancel, key) {
                self.hide();
                return true;
            }
            if self.forward_to_face(event) {
                self.mark_interaction();
                return true;
            }
        }
        if !self.anchor.is_focused() {
            return false;
        }
        if self.keys.matches(Action::FocusNext, key) || self.keys.matches(Action::FocusPrev, key) {
            // Focus moves on; the host decides where.
            self.blur_anchor(now);
            return false;
        }
        if !self.is_visible() && self.keys.matches(Action::PickerAccept, key) {
            self.show();
            return true;
        }
        self.anchor.handle_input(event)
    }

    fn forward_to_face(&mut self, event: &Event) -> bool {
        let area = self.chrome.canvas().unwrap_or_default();
        let time = self.time.get();
        self.face.handle_event(event, area, time)
    }
}

impl<A: AnchorField> Component for TimePicker<A> {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.viewport = area;
    }

    /// Paints the floating panel only; the anchor is rendered by the host.
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.viewport = area;
        self.render_frame(frame, ctx.now());
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.handle_event_at(event, ctx.now())
    }
}
