use ratatui::style::Color;

// Host chrome colors. The picker canvas itself is colored from
// `PickerOptions`; these only cover fields, buttons and panel borders.

pub const ACCENT_RGB: (u8, u8, u8) = (0x8d, 0xae, 0x28);

pub fn accent() -> Color {
    crate::colors::map_rgb_to_color(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Text fields
pub fn label_fg() -> Color {
    Color::Gray
}
pub fn field_fg() -> Color {
    Color::White
}
pub fn field_bg() -> Color {
    Color::DarkGray
}
pub fn field_focus_fg() -> Color {
    Color::Black
}
pub fn field_focus_bg() -> Color {
    Color::White
}

// Panel
pub fn panel_border() -> Color {
    Color::DarkGray
}
pub fn button_fg() -> Color {
    Color::White
}
pub fn button_bg() -> Color {
    Color::DarkGray
}
pub fn button_primary_fg() -> Color {
    Color::Black
}
pub fn button_primary_bg() -> Color {
    accent()
}

// Hints
pub fn hint_key_fg() -> Color {
    accent()
}
pub fn hint_fg() -> Color {
    Color::Gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_returns_a_color_variant() {
        match accent() {
            Color::Rgb(_, _, _) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant {other:?}"),
        }
    }
}
