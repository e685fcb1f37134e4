use std::str::FromStr;

use ratatui::style::Color;

/// Parse a user supplied color string (`white`, `light-blue`, `#8dae28`, `208`).
///
/// Hex colors are routed through [`map_rgb_to_color`] so terminals without
/// truecolor still get a close xterm-256 match. Everything else is handed to
/// ratatui's own parser.
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    if let Some((r, g, b)) = parse_hex(text) {
        return Some(map_rgb_to_color(r, g, b));
    }
    Color::from_str(text).ok()
}

fn parse_hex(text: &str) -> Option<(u8, u8, u8)> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Map an RGB triple to a color the current terminal can show.
///
/// `COLORTERM=truecolor` (or `24bit`) keeps the exact value, otherwise the
/// nearest xterm-256 index is used.
pub fn map_rgb_to_color(r: u8, g: u8, b: u8) -> Color {
    let truecolor = std::env::var("COLORTERM")
        .map(|v| {
            let v = v.to_lowercase();
            v.contains("truecolor") || v.contains("24bit")
        })
        .unwrap_or(false);
    rgb_for_terminal(r, g, b, truecolor)
}

pub fn rgb_for_terminal(r: u8, g: u8, b: u8, truecolor: bool) -> Color {
    if truecolor {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(xterm_index(r, g, b))
    }
}

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_cube_level(v: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (v as i32 - **level as i32).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = x as i32 - y as i32;
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

fn xterm_index(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (nearest_cube_level(r), nearest_cube_level(g), nearest_cube_level(b));
    let cube_rgb = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    // Gray ramp 232..=255 covers 8, 18, ..., 238.
    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let gray_step = (avg.saturating_sub(3) / 10).min(23) as u8;
    let gray = 8 + gray_step * 10;

    let target = (r, g, b);
    if distance_sq(target, (gray, gray, gray)) < distance_sq(target, cube_rgb) {
        232 + gray_step
    } else {
        cube_index as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_parse() {
        assert_eq!(parse_color("white"), Some(Color::White));
        assert_eq!(parse_color(" black "), Some(Color::Black));
    }

    #[test]
    fn hex_keeps_exact_value_on_truecolor() {
        assert_eq!(rgb_for_terminal(0x8d, 0xae, 0x28, true), Color::Rgb(0x8d, 0xae, 0x28));
        assert!(matches!(
            parse_color("#8dae28"),
            Some(Color::Rgb(0x8d, 0xae, 0x28)) | Some(Color::Indexed(_))
        ));
    }

    #[test]
    fn hex_maps_to_cube_without_truecolor() {
        assert_eq!(rgb_for_terminal(255, 0, 0, false), Color::Indexed(196));
        assert_eq!(rgb_for_terminal(0, 0, 0, false), Color::Indexed(16));
    }

    #[test]
    fn grays_prefer_the_gray_ramp() {
        assert_eq!(rgb_for_terminal(128, 128, 128, false), Color::Indexed(244));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }
}
