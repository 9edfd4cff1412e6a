//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::copy_state::COPY_FEEDBACK_DURATION;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;

/// Rows scrolled per mouse wheel notch.
const WHEEL_SCROLL_ROWS: isize = 3;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            let area = Rect::new(0, 0, width, height);
            if app.area != area {
                app.area = area;
                app.clamp_scroll();
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::CopyResetElapsed { timer } => {
            if app.block.copy.on_reset_elapsed(timer) {
                tracing::debug!(timer = timer.0, "copy feedback reset");
            } else {
                tracing::trace!(timer = timer.0, "stale copy reset ignored");
            }
            vec![]
        }
    }
}

/// Copies the source text and flashes the "Copied!" state.
///
/// The flag flips immediately; it does not wait for the clipboard write.
pub fn copy_source(app: &mut AppState) -> Vec<UiEffect> {
    let armed = app.block.copy.on_copy();

    let mut effects = vec![UiEffect::CopyToClipboard {
        text: app.block.request.source_text.clone(),
    }];
    if let Some(token) = armed.replaced {
        effects.push(UiEffect::CancelTask { token });
    }
    effects.push(UiEffect::ScheduleCopyReset {
        timer: armed.timer,
        delay: COPY_FEEDBACK_DURATION,
        cancel: armed.cancel,
    });
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(width, height) => {
            app.area = Rect::new(0, 0, width, height);
            app.clamp_scroll();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let page = app.layout().code.height.max(1) as isize;

    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('y' | 'c') => return copy_source(app),
        KeyCode::Char('t') => app.set_color_mode(app.ctx.mode.toggled()),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-page),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(page),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => {}
    }
    vec![]
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let over_button = app
        .layout()
        .button
        .contains(Position::new(mouse.column, mouse.row));

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if over_button => {
            app.button_hovered = true;
            return copy_source(app);
        }
        MouseEventKind::Moved | MouseEventKind::Drag(_) => app.button_hovered = over_button,
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_SCROLL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_SCROLL_ROWS),
        _ => {}
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use codeblock_core::highlight::PlainHighlighter;
    use codeblock_core::{ColorMode, DisplayRequest};
    use crossterm::event::KeyEventState;

    use super::*;
    use crate::copy_state::TimerId;

    const SOURCE: &str = "resource \"aws_s3_bucket\" \"b\" {\n\tbucket = \"docs\"\n}\n";

    fn app() -> AppState {
        let mut app = AppState::new(
            DisplayRequest::from_source(SOURCE),
            Box::new(PlainHighlighter),
            ColorMode::Dark,
        );
        update(
            &mut app,
            UiEvent::Frame {
                width: 40,
                height: 10,
            },
        );
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn scheduled_timer(effects: &[UiEffect]) -> TimerId {
        effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::ScheduleCopyReset { timer, .. } => Some(*timer),
                _ => None,
            })
            .expect("reset scheduled")
    }

    #[test]
    fn test_copy_writes_exact_source_and_flips_flag() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('y')));

        assert!(app.block.copy.is_copied());
        assert!(matches!(
            &effects[0],
            UiEffect::CopyToClipboard { text } if text == SOURCE
        ));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::ScheduleCopyReset { delay, .. } if *delay == COPY_FEEDBACK_DURATION
        )));
        assert!(
            !effects
                .iter()
                .any(|effect| matches!(effect, UiEffect::CancelTask { .. }))
        );
    }

    #[test]
    fn test_reset_event_reverts_flag() {
        let mut app = app();
        let effects = update(&mut app, key(KeyCode::Char('c')));
        let timer = scheduled_timer(&effects);

        update(&mut app, UiEvent::CopyResetElapsed { timer });

        assert!(!app.block.copy.is_copied());
    }

    #[test]
    fn test_second_copy_cancels_first_timer() {
        let mut app = app();
        let first = update(&mut app, key(KeyCode::Char('y')));
        let first_timer = scheduled_timer(&first);
        let second = update(&mut app, key(KeyCode::Char('y')));
        let second_timer = scheduled_timer(&second);

        assert!(
            second
                .iter()
                .any(|effect| matches!(effect, UiEffect::CancelTask { .. }))
        );

        // The stale timer does not clear the fresh copy feedback.
        update(&mut app, UiEvent::CopyResetElapsed { timer: first_timer });
        assert!(app.block.copy.is_copied());

        update(&mut app, UiEvent::CopyResetElapsed {
            timer: second_timer,
        });
        assert!(!app.block.copy.is_copied());
    }

    #[test]
    fn test_click_on_button_copies() {
        let mut app = app();
        let button = app.layout().button;

        let effects = update(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), button.x + 1, button.y),
        );

        assert!(app.block.copy.is_copied());
        assert!(!effects.is_empty());
    }

    #[test]
    fn test_click_elsewhere_does_nothing() {
        let mut app = app();
        let effects = update(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 3, 4),
        );

        assert!(!app.block.copy.is_copied());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_hover_tracks_button() {
        let mut app = app();
        let button = app.layout().button;

        update(&mut app, mouse(MouseEventKind::Moved, button.x, button.y));
        assert!(app.button_hovered);

        update(&mut app, mouse(MouseEventKind::Moved, 0, 5));
        assert!(!app.button_hovered);
    }

    #[test]
    fn test_toggle_color_mode() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.ctx.mode, ColorMode::Light);
        update(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.ctx.mode, ColorMode::Dark);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        update(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.should_quit);
        assert!(!app.block.copy.is_copied());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent {
                code: KeyCode::Char('y'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            })),
        );
        assert!(effects.is_empty());
        assert!(!app.block.copy.is_copied());
    }

    #[test]
    fn test_reset_without_copy_is_ignored() {
        let mut app = app();
        update(&mut app, UiEvent::CopyResetElapsed { timer: TimerId(42) });
        assert!(!app.block.copy.is_copied());
    }
}
