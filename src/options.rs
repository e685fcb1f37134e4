//! Picker configuration.
//!
//! Options are resolved once, when a picker is built, by laying whatever the
//! caller supplied over the documented defaults. Values stay strings until
//! they are used; a color that does not parse falls back to that slot's
//! default when the face asks for it.

use ratatui::style::Color;

use crate::colors::parse_color;
use crate::constants::DEFAULT_FACE;

pub const DEFAULT_COLOR: &str = "white";
pub const DEFAULT_BACKGROUND: &str = "black";
pub const DEFAULT_HIGHLIGHT: &str = "#8dae28";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// Text, tick and dial color.
    pub color: String,
    /// Canvas fill.
    pub background: String,
    /// Hands and selection markers.
    pub highlight: String,
    /// Face identifier looked up in the face registry.
    pub face: String,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            highlight: DEFAULT_HIGHLIGHT.to_string(),
            face: DEFAULT_FACE.to_string(),
        }
    }
}

/// Caller supplied values; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub color: Option<String>,
    pub background: Option<String>,
    pub highlight: Option<String>,
    pub face: Option<String>,
}

impl OptionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    pub fn highlight(mut self, value: impl Into<String>) -> Self {
        self.highlight = Some(value.into());
        self
    }

    pub fn face(mut self, value: impl Into<String>) -> Self {
        self.face = Some(value.into());
        self
    }

    /// Collect overrides from loose key/value pairs.
    ///
    /// Accepts `highlightColor` as an alias of `highlight`. Unknown keys are
    /// ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut out = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "color" => out.color = Some(value.into()),
                "background" => out.background = Some(value.into()),
                "highlight" | "highlightColor" => out.highlight = Some(value.into()),
                "face" | "faceId" => out.face = Some(value.into()),
                other => tracing::debug!(key = other, "ignoring unknown picker option"),
            }
        }
        out
    }
}

impl PickerOptions {
    pub fn resolve(overrides: OptionOverrides) -> Self {
        let defaults = Self::default();
        Self {
            color: overrides.color.unwrap_or(defaults.color),
            background: overrides.background.unwrap_or(defaults.background),
            highlight: overrides.highlight.unwrap_or(defaults.highlight),
            face: overrides.face.unwrap_or(defaults.face),
        }
    }

    pub fn color(&self) -> Color {
        coerce("color", &self.color, DEFAULT_COLOR)
    }

    pub fn background(&self) -> Color {
        coerce("background", &self.background, DEFAULT_BACKGROUND)
    }

    pub fn highlight(&self) -> Color {
        coerce("highlight", &self.highlight, DEFAULT_HIGHLIGHT)
    }
}

fn coerce(slot: &str, value: &str, fallback: &str) -> Color {
    if let Some(color) = parse_color(value) {
        return color;
    }
    tracing::warn!(slot, value, "unparseable color, using default");
    parse_color(fallback).unwrap_or(Color::Reset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let o = PickerOptions::default();
        assert_eq!(o.color, "white");
        assert_eq!(o.background, "black");
        assert_eq!(o.highlight, "#8dae28");
        assert_eq!(o.face, "12");
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let o = PickerOptions::resolve(OptionOverrides::new().face("24").color("yellow"));
        assert_eq!(o.face, "24");
        assert_eq!(o.color, "yellow");
        assert_eq!(o.background, "black");
        assert_eq!(o.highlight, "#8dae28");
    }

    #[test]
    fn pairs_ignore_unknown_keys() {
        let overrides = OptionOverrides::from_pairs([
            ("highlightColor", "red"),
            ("wobble", "yes"),
            ("faceId", "24"),
        ]);
        let o = PickerOptions::resolve(overrides);
        assert_eq!(o.highlight, "red");
        assert_eq!(o.face, "24");
        assert_eq!(o.color, "white");
    }

    #[test]
    fn bad_colors_fall_back_at_use_site() {
        let o = PickerOptions::resolve(OptionOverrides::new().background("plaid"));
        assert_eq!(o.background, "plaid");
        assert_eq!(o.background(), Color::Black);
        assert_eq!(o.color(), Color::White);
    }
}
