use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in key reporting.
///
/// Shift+Tab arrives as `Tab` with SHIFT on some terminals and as `BackTab`
/// on others; it is always reported as `BackTab`. Release events are dropped
/// everywhere, and on Windows repeats and held Esc are collapsed as well.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(mut key) = evt else {
            return Some(evt);
        };
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
        }
        if key.code == KeyCode::BackTab {
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        if cfg!(windows) && key.code == KeyCode::Esc {
            if self.esc_down {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        Some(Event::Key(key))
    }
}
