use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    /// Column letters and row numbers
    pub header: Color,
    pub header_bg: Color,
    pub focus_bg: Color,
    pub edit_bg: Color,
    pub panel_bg: Color,
    pub panel_border: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            header: Color::Rgb(0xDA, 0xB8, 0xF0),
            header_bg: Color::Rgb(0x1A, 0x0A, 0x2E),
            focus_bg: Color::Rgb(0x3D, 0x14, 0x38),
            edit_bg: Color::Rgb(0x24, 0x10, 0x40),
            panel_bg: Color::Rgb(0x14, 0x06, 0x28),
            panel_border: Color::Rgb(0xFB, 0x41, 0x96),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Defaults with any `[ui.colors]` overrides applied. Unknown slots and
    /// malformed colors are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring malformed color");
                continue;
            };
            let slot = match key.as_str() {
                "background" => &mut theme.background,
                "text" => &mut theme.text,
                "text_bright" => &mut theme.text_bright,
                "highlight" => &mut theme.highlight,
                "dim" => &mut theme.dim,
                "red" => &mut theme.red,
                "green" => &mut theme.green,
                "header" => &mut theme.header,
                "header_bg" => &mut theme.header_bg,
                "focus_bg" => &mut theme.focus_bg,
                "edit_bg" => &mut theme.edit_bg,
                "panel_bg" => &mut theme.panel_bg,
                "panel_border" => &mut theme.panel_border,
                "selection_bg" => &mut theme.selection_bg,
                _ => continue,
            };
            *slot = color;
        }
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_need_hash_and_six_digits() {
        assert_eq!(
            parse_hex_color("#3D1438"),
            Some(Color::Rgb(0x3D, 0x14, 0x38))
        );
        assert_eq!(parse_hex_color("3D1438"), None);
        assert_eq!(parse_hex_color("#3D14"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn config_overrides_only_named_slots() {
        let mut ui = UiConfig::default();
        ui.colors.insert("selection_bg".into(), "#102030".into());
        ui.colors.insert("panel_border".into(), "not a color".into());
        ui.colors.insert("no_such_slot".into(), "#FFFFFF".into());

        let theme = Theme::from_config(&ui);
        let defaults = Theme::default();
        assert_eq!(theme.selection_bg, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(theme.panel_border, defaults.panel_border);
        assert_eq!(theme.text, defaults.text);
    }
}
