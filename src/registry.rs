//! Host-facing adapter that keeps one picker per anchor.
//!
//! Attaching the same key twice hands back the picker built the first time;
//! the second anchor is dropped. The face comes from the anchor's
//! `data-mode` attribute when present, otherwise from the registry defaults.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map::Entry;
use std::time::Instant;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::anchor::AnchorField;
use crate::constants::FACE_ATTRIBUTE;
use crate::error::Result;
use crate::faces::FaceRegistry;
use crate::keybindings::{Action, KeyBindings};
use crate::options::OptionOverrides;
use crate::picker::TimePicker;
use crate::ui::UiFrame;

pub struct PickerRegistry<K: Ord, A: AnchorField> {
    pickers: BTreeMap<K, TimePicker<A>>,
    faces: FaceRegistry,
    defaults: OptionOverrides,
    viewport: Option<Rect>,
    keys: KeyBindings,
}

impl<K: Ord + Clone, A: AnchorField> PickerRegistry<K, A> {
    pub fn new() -> Self {
        Self {
            pickers: BTreeMap::new(),
            faces: FaceRegistry::builtin(),
            defaults: OptionOverrides::default(),
            viewport: None,
            keys: KeyBindings::default(),
        }
    }

    pub fn with_faces(mut self, faces: FaceRegistry) -> Self {
        self.faces = faces;
        self
    }

    /// Options applied to every picker attached afterwards.
    pub fn with_defaults(mut self, defaults: OptionOverrides) -> Self {
        self.defaults = defaults;
        self
    }

    /// Bindings used for focus cycling. Pickers keep their own.
    pub fn with_keybindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    pub fn faces(&self) -> &FaceRegistry {
        &self.faces
    }

    /// Return the picker for `key`, building it on first use.
    pub fn attach(
        &mut self,
        key: K,
        anchor: A,
        attrs: &HashMap<String, String>,
    ) -> Result<&mut TimePicker<A>> {
        match self.pickers.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let mut overrides = self.defaults.clone();
                if let Some(face) = attrs.get(FACE_ATTRIBUTE) {
                    overrides.face = Some(face.clone());
                }
                let mut picker = TimePicker::with_registry(anchor, overrides, &self.faces)?;
                if let Some(viewport) = self.viewport {
                    picker = picker.with_viewport(viewport);
                }
                Ok(entry.insert(picker))
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&TimePicker<A>> {
        self.pickers.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut TimePicker<A>> {
        self.pickers.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.pickers.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &TimePicker<A>)> {
        self.pickers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut TimePicker<A>)> {
        self.pickers.iter_mut()
    }

    pub fn focused_key(&self) -> Option<&K> {
        self.pickers
            .iter()
            .find(|(_, p)| p.anchor().is_focused())
            .map(|(k, _)| k)
    }

    pub fn resize(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
        for picker in self.pickers.values_mut() {
            picker.set_viewport(viewport);
        }
    }

    /// Route input to the pickers.
    ///
    /// Mouse presses go to every picker so each can react to focus leaving
    /// its anchor. Focus keys cycle anchors here, before any picker sees
    /// them. Other keys go to the focused picker, then to open ones.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Mouse(_) => {
                let mut handled = false;
                for picker in self.pickers.values_mut() {
                    handled |= picker.handle_event_at(event, now);
                }
                handled
            }
            Event::Key(key) if self.keys.matches(Action::FocusNext, key) => {
                self.focus_next(now);
                !self.pickers.is_empty()
            }
            Event::Key(key) if self.keys.matches(Action::FocusPrev, key) => {
                self.focus_prev(now);
                !self.pickers.is_empty()
            }
            Event::Key(_) => {
                if let Some(picker) = self.pickers.values_mut().find(|p| p.anchor().is_focused())
                    && picker.handle_event_at(event, now)
                {
                    return true;
                }
                self.pickers
                    .values_mut()
                    .filter(|p| p.is_visible() && !p.anchor().is_focused())
                    .any(|p| p.handle_event_at(event, now))
            }
            _ => false,
        }
    }

    /// Move focus to the next anchor in key order, wrapping around.
    pub fn focus_next(&mut self, now: Instant) {
        self.cycle_focus(now, false);
    }

    pub fn focus_prev(&mut self, now: Instant) {
        self.cycle_focus(now, true);
    }

    fn cycle_focus(&mut self, now: Instant, backwards: bool) {
        let keys: Vec<K> = self.pickers.keys().cloned().collect();
        if keys.is_empty() {
            return;
        }
        let current = self
            .focused_key()
            .and_then(|k| keys.iter().position(|candidate| candidate == k));
        let next = match (current, backwards) {
            (None, false) => 0,
            (None, true) => keys.len() - 1,
            (Some(i), false) => (i + 1) % keys.len(),
            (Some(i), true) => (i + keys.len() - 1) % keys.len(),
        };
        if current == Some(next) {
            return;
        }
        tracing::debug!(from = ?current, to = next, "focus cycle");
        for picker in self.pickers.values_mut() {
            picker.blur_anchor(now);
        }
        if let Some(picker) = self.pickers.get_mut(&keys[next]) {
            picker.focus_anchor();
        }
    }

    /// Run one frame for every picker: blur checks, then panels.
    pub fn render_overlays(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        for picker in self.pickers.values_mut() {
            picker.render_frame(frame, now);
        }
    }

    pub fn dispose_all(&mut self) {
        for picker in self.pickers.values_mut() {
            picker.dispose();
        }
    }
}

impl<K: Ord + Clone, A: AnchorField> Default for PickerRegistry<K, A> {
    fn default() -> Self {
        Self::new()
    }
}
