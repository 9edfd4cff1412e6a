//! Presentation colors derived from the color mode.
//!
//! Everything here is a pure function of [`ColorMode`]; logic never looks at
//! colors.

use codeblock_core::ColorMode;
use codeblock_core::highlight::{CodePalette, Rgb, TokenStyle};
use ratatui::style::{Color, Modifier, Style};

/// Ambient values handed to every render function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    pub mode: ColorMode,
}

impl RenderContext {
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    pub fn chrome(self) -> Chrome {
        Chrome::for_mode(self.mode)
    }
}

/// Colors for everything around the highlighted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub header_bg: Color,
    pub header_fg: Color,
    pub logo_fg: Color,
    pub file_icon_fg: Color,
    pub button_fg: Color,
    pub button_hover_fg: Color,
    pub copied_fg: Color,
    pub hint_key_fg: Color,
    pub hint_fg: Color,
    /// Used when the highlight theme has no background.
    pub code_bg: Color,
}

impl Chrome {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => Self {
                header_bg: Color::Rgb(0x1f, 0x29, 0x37),
                header_fg: Color::White,
                logo_fg: Color::Rgb(0xe7, 0xc2, 0x00),
                file_icon_fg: Color::Rgb(0x9c, 0xa3, 0xaf),
                button_fg: Color::Rgb(0x9c, 0xa3, 0xaf),
                button_hover_fg: Color::White,
                copied_fg: Color::Green,
                hint_key_fg: Color::Magenta,
                hint_fg: Color::DarkGray,
                code_bg: Color::Rgb(0x28, 0x2c, 0x34),
            },
            ColorMode::Light => Self {
                header_bg: Color::Rgb(0xf3, 0xf4, 0xf6),
                header_fg: Color::Rgb(0x1f, 0x29, 0x37),
                logo_fg: Color::Rgb(0xb8, 0x96, 0x00),
                file_icon_fg: Color::Rgb(0x6b, 0x72, 0x80),
                button_fg: Color::Rgb(0x6b, 0x72, 0x80),
                button_hover_fg: Color::Rgb(0x1f, 0x29, 0x37),
                copied_fg: Color::Rgb(0x16, 0xa3, 0x4a),
                hint_key_fg: Color::Magenta,
                hint_fg: Color::Gray,
                code_bg: Color::Rgb(0xfa, 0xfa, 0xfa),
            },
        }
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Base style of the code region.
pub fn code_style(palette: CodePalette, chrome: Chrome) -> Style {
    let mut style = Style::default().bg(palette.background.map_or(chrome.code_bg, rgb));
    if let Some(fg) = palette.foreground {
        style = style.fg(rgb(fg));
    }
    style
}

/// Converts a token style into a terminal style.
pub fn token_style(token: TokenStyle) -> Style {
    let mut style = Style::default();
    if let Some(fg) = token.fg {
        style = style.fg(rgb(fg));
    }
    if token.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if token.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if token.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}
