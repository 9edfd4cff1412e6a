//! Non-interactive rendering to a string (for `codeblock print`).
//!
//! Same header and highlighting as the viewer, without the copy button.

use codeblock_core::highlight::{Highlighter, Rgb, StyledLine, TokenStyle};
use codeblock_core::{DisplayRequest, FileKind};
use crossterm::style::{Color, Stylize};

use crate::common::expand_tabs;
use crate::render::file_icon;
use crate::theme::{Chrome, RenderContext};

/// Renders the header line and all code lines, one per output line.
///
/// With `color = false` only text is emitted, no escape sequences.
pub fn render_ansi(
    request: &DisplayRequest,
    highlighter: &dyn Highlighter,
    ctx: RenderContext,
    color: bool,
) -> String {
    let mut out = String::new();
    let kind = FileKind::from_filename(&request.filename);
    let icon = file_icon(kind);

    if color {
        let chrome = Chrome::for_mode(ctx.mode);
        let icon_fg = if kind.is_recognized() {
            chrome.logo_fg
        } else {
            chrome.file_icon_fg
        };
        out.push_str(&format!(
            "{} {}",
            icon.with(to_crossterm(icon_fg)),
            request.filename.as_str().bold()
        ));
    } else {
        out.push_str(&format!("{icon} {}", request.filename));
    }
    out.push('\n');

    let highlighted = highlighter.highlight(&request.source_text, &request.language_tag, ctx.mode);
    for line in highlighted.lines {
        if color {
            write_styled_line(&mut out, &line);
        } else {
            out.push_str(&expand_tabs(&line.text()));
        }
        out.push('\n');
    }

    out
}

fn write_styled_line(out: &mut String, line: &StyledLine) {
    for span in &line.spans {
        out.push_str(&styled(&expand_tabs(&span.text), span.style).to_string());
    }
}

fn styled(text: &str, style: TokenStyle) -> crossterm::style::StyledContent<&str> {
    let mut content = text.stylize();
    if let Some(Rgb(r, g, b)) = style.fg {
        content = content.with(Color::Rgb { r, g, b });
    }
    if style.bold {
        content = content.bold();
    }
    if style.italic {
        content = content.italic();
    }
    if style.underline {
        content = content.underlined();
    }
    content
}

fn to_crossterm(color: ratatui::style::Color) -> Color {
    match color {
        ratatui::style::Color::Rgb(r, g, b) => Color::Rgb { r, g, b },
        ratatui::style::Color::White => Color::White,
        ratatui::style::Color::Green => Color::Green,
        ratatui::style::Color::Magenta => Color::Magenta,
        ratatui::style::Color::Gray => Color::Grey,
        ratatui::style::Color::DarkGray => Color::DarkGrey,
        _ => Color::Reset,
    }
}
