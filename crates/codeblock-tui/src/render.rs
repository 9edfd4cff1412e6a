//! Pure view/render functions for the code block.
//!
//! Functions here take state by immutable reference, draw to a ratatui
//! `Frame`, and never mutate state or return effects.

use codeblock_core::FileKind;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::truncate_with_ellipsis;
use crate::copy_state::CopyAffordance;
use crate::state::{AppState, BlockState};
use crate::theme::{Chrome, RenderContext, code_style, token_style};

/// Logo shown for recognized filenames.
pub const RECOGNIZED_ICON: &str = "◆";

/// Icon shown for every other filename.
pub const GENERIC_ICON: &str = "▤";

/// Returns the header icon for a file kind.
pub fn file_icon(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Recognized => RECOGNIZED_ICON,
        FileKind::Generic => GENERIC_ICON,
    }
}

/// Renders the whole viewer.
pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = app.layout();
    let chrome = app.ctx.chrome();

    render_header(frame, layout.header, &app.block.request.filename, app.ctx);
    render_code(frame, layout.body, layout.code, &app.block, app.scroll, chrome);
    render_copy_button(
        frame,
        layout.button,
        app.block.copy.affordance(),
        app.button_hovered,
        chrome,
    );
    render_hints(frame, layout.hints, app.block.copy.affordance(), chrome);
}

/// Builds the header line: icon plus filename.
pub fn header_line(filename: &str, ctx: RenderContext, width: u16) -> Line<'static> {
    let chrome = ctx.chrome();
    let kind = FileKind::from_filename(filename);
    let icon_fg = if kind.is_recognized() {
        chrome.logo_fg
    } else {
        chrome.file_icon_fg
    };
    let icon = file_icon(kind);

    // "  <icon> <name>"
    let reserved = 2 + icon.width() + 1;
    let name = truncate_with_ellipsis(filename, (width as usize).saturating_sub(reserved));

    Line::from(vec![
        Span::raw("  "),
        Span::styled(icon, Style::default().fg(icon_fg)),
        Span::raw(" "),
        Span::styled(name, Style::default().fg(chrome.header_fg)),
    ])
}

/// Renders the one-row header bar.
pub fn render_header(frame: &mut Frame, area: Rect, filename: &str, ctx: RenderContext) {
    if area.height == 0 {
        return;
    }
    let chrome = ctx.chrome();
    let bar = Paragraph::new(header_line(filename, ctx, area.width)).style(
        Style::default()
            .bg(chrome.header_bg)
            .fg(chrome.header_fg),
    );
    frame.render_widget(bar, area);
}

/// Renders the highlighted rows visible from `scroll`.
fn render_code(
    frame: &mut Frame,
    body: Rect,
    code: Rect,
    block: &BlockState,
    scroll: usize,
    chrome: Chrome,
) {
    let base = code_style(block.palette, chrome);
    frame.render_widget(Block::default().style(base), body);

    if code.width == 0 || code.height == 0 {
        return;
    }

    let lines: Vec<Line<'static>> = block
        .rows(code.width)
        .into_iter()
        .skip(scroll)
        .take(code.height as usize)
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(text, style)| Span::styled(text, token_style(style)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(base), code);
}

/// Renders the copy button and, when hovered, its tooltip to the left.
fn render_copy_button(
    frame: &mut Frame,
    button: Rect,
    affordance: CopyAffordance,
    hovered: bool,
    chrome: Chrome,
) {
    if button.width == 0 || button.height == 0 {
        return;
    }

    let fg = match affordance {
        CopyAffordance::Copied => chrome.copied_fg,
        CopyAffordance::Copy if hovered => chrome.button_hover_fg,
        CopyAffordance::Copy => chrome.button_fg,
    };
    let icon = Paragraph::new(Span::styled(
        affordance.icon(),
        Style::default().fg(fg).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(icon, button);

    if hovered {
        let label = format!(" {} ", affordance.tooltip());
        let width = (label.width() as u16).min(button.x);
        let tooltip = Rect::new(button.x - width, button.y, width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default()
                    .fg(chrome.header_fg)
                    .bg(chrome.header_bg),
            )),
            tooltip,
        );
    }
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Builds the key hint line; the copy hint mirrors the button state.
pub fn hints_line(affordance: CopyAffordance, chrome: Chrome) -> Line<'static> {
    let copy_hint = match affordance {
        CopyAffordance::Copied => InputHint::new("✓", "Copied!"),
        CopyAffordance::Copy => InputHint::new("y", "Copy to clipboard"),
    };
    let hints = [
        copy_hint,
        InputHint::new("↑↓", "scroll"),
        InputHint::new("t", "light/dark"),
        InputHint::new("q", "quit"),
    ];

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(chrome.hint_fg)));
        }
        spans.push(Span::styled(
            hint.key.to_string(),
            Style::default().fg(chrome.hint_key_fg),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(chrome.hint_fg),
        ));
    }
    Line::from(spans)
}

fn render_hints(frame: &mut Frame, area: Rect, affordance: CopyAffordance, chrome: Chrome) {
    if area.height == 0 {
        return;
    }
    let para = Paragraph::new(hints_line(affordance, chrome)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}
