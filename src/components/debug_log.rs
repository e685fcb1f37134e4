use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const DEFAULT_MAX_LINES: usize = 500;
static GLOBAL_LOG: OnceLock<DebugLogHandle> = OnceLock::new();

pub fn set_global_debug_log(handle: DebugLogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_debug_log() -> Option<DebugLogHandle> {
    GLOBAL_LOG.get().cloned()
}

/// Shared ring of log lines. Cloning shares the same buffer.
#[derive(Clone, Debug)]
pub struct DebugLogHandle {
    inner: Arc<Mutex<VecDeque<String>>>,
    max_lines: usize,
}

impl DebugLogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            max_lines: max_lines.max(1),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.inner.lock() {
            lines.push_back(line.into());
            while lines.len() > self.max_lines {
                lines.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let Ok(lines) = self.inner.lock() else {
            return Vec::new();
        };
        let skip = lines.len().saturating_sub(count);
        lines.iter().skip(skip).cloned().collect()
    }

    pub fn writer(&self) -> DebugLogWriter {
        DebugLogWriter {
            handle: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// `io::Write` adapter that splits writes into lines.
#[derive(Debug)]
pub struct DebugLogWriter {
    handle: DebugLogHandle,
    pending: Vec<u8>,
}

impl DebugLogWriter {
    fn push_complete_lines(&mut self) {
        let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return;
        };
        let drained: Vec<u8> = self.pending.drain(..=pos).collect();
        for line in String::from_utf8_lossy(&drained).split('\n') {
            if !line.is_empty() {
                self.handle.push(line.to_string());
            }
        }
    }
}

impl Write for DebugLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.push_complete_lines();
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).to_string();
            self.pending.clear();
            self.handle.push(rest);
        }
        Ok(())
    }
}

impl Drop for DebugLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Bordered pane that always shows the newest lines.
#[derive(Debug)]
pub struct DebugLogComponent {
    handle: DebugLogHandle,
}

impl DebugLogComponent {
    pub fn new(max_lines: usize) -> (Self, DebugLogHandle) {
        let handle = DebugLogHandle::new(max_lines);
        (
            Self {
                handle: handle.clone(),
            },
            handle,
        )
    }

    pub fn new_default() -> (Self, DebugLogHandle) {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl Component for DebugLogComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let border = if ctx.focused() {
            crate::theme::accent()
        } else {
            crate::theme::panel_border()
        };
        let block = Block::default()
            .title(" Debug log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.fill(area, Style::default());
        frame.render_widget(block, area);
        let lines = self.handle.tail(inner.height as usize);
        let text = Text::from(lines.into_iter().map(Line::from).collect::<Vec<_>>());
        frame.render_widget(Paragraph::new(text), inner);
    }
}
