use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Focus moves between anchors
    FocusNext,
    FocusPrev,
    // Panel buttons
    PickerAccept,
    PickerCancel,
    // Dial stepping
    HourUp,
    HourDown,
    MinuteUp,
    MinuteDown,
    ToggleMeridiem,
    ToggleDebugLog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::FocusNext => "Focus next field",
            Action::FocusPrev => "Focus previous field",
            Action::PickerAccept => "Save time",
            Action::PickerCancel => "Close picker",
            Action::HourUp => "Hour +1",
            Action::HourDown => "Hour -1",
            Action::MinuteUp => "Minute +1",
            Action::MinuteDown => "Minute -1",
            Action::ToggleMeridiem => "Toggle AM/PM",
            Action::ToggleDebugLog => "Toggle debug log",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(FocusPrev, KeyCombo::plain(KeyCode::BackTab));
        kb.add(PickerAccept, KeyCombo::plain(KeyCode::Enter));
        kb.add(PickerCancel, KeyCombo::plain(KeyCode::Esc));
        kb.add(HourUp, KeyCombo::plain(KeyCode::Up));
        kb.add(HourDown, KeyCombo::plain(KeyCode::Down));
        kb.add(MinuteUp, KeyCombo::plain(KeyCode::Right));
        kb.add(MinuteDown, KeyCombo::plain(KeyCode::Left));
        kb.add(
            ToggleMeridiem,
            KeyCombo::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
        );
        kb.add(ToggleDebugLog, KeyCombo::plain(KeyCode::F(12)));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}
