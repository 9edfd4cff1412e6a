//! Screen layout of the code block.
//!
//! Shared by the renderer and the reducer (mouse hit-testing), so both agree
//! on where the copy button is.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header bar height.
pub const HEADER_HEIGHT: u16 = 1;

/// Key hint line height.
pub const HINTS_HEIGHT: u16 = 1;

/// Horizontal padding around code.
pub const CODE_PADDING_X: u16 = 2;

/// Vertical padding around code.
pub const CODE_PADDING_Y: u16 = 1;

/// Copy button width (" ⧉ ").
pub const BUTTON_WIDTH: u16 = 3;

/// Gap between the button and the body's right edge.
const BUTTON_MARGIN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockLayout {
    pub header: Rect,
    pub body: Rect,
    pub code: Rect,
    pub button: Rect,
    pub hints: Rect,
}

pub fn block_layout(area: Rect) -> BlockLayout {
    let [header, body, hints] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(HINTS_HEIGHT),
    ])
    .areas(area);

    let code = Rect::new(
        body.x + CODE_PADDING_X.min(body.width),
        body.y + CODE_PADDING_Y.min(body.height),
        body.width.saturating_sub(CODE_PADDING_X * 2),
        body.height.saturating_sub(CODE_PADDING_Y * 2),
    );

    let button_width = BUTTON_WIDTH.min(body.width);
    let button = Rect::new(
        body.right()
            .saturating_sub(button_width + BUTTON_MARGIN)
            .max(body.x),
        body.y,
        button_width,
        body.height.min(1),
    );

    BlockLayout {
        header,
        body,
        code,
        button,
        hints,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Position;

    use super::*;

    #[test]
    fn test_layout_regions() {
        let layout = block_layout(Rect::new(0, 0, 40, 10));

        assert_eq!(layout.header, Rect::new(0, 0, 40, 1));
        assert_eq!(layout.body, Rect::new(0, 1, 40, 8));
        assert_eq!(layout.hints, Rect::new(0, 9, 40, 1));
        assert_eq!(layout.code, Rect::new(2, 2, 36, 6));
        assert_eq!(layout.button, Rect::new(36, 1, 3, 1));
    }

    #[test]
    fn test_button_hit_test() {
        let layout = block_layout(Rect::new(0, 0, 40, 10));

        assert!(layout.button.contains(Position::new(37, 1)));
        assert!(!layout.button.contains(Position::new(37, 2)));
        assert!(!layout.button.contains(Position::new(10, 1)));
    }

    #[test]
    fn test_tiny_area_does_not_underflow() {
        let layout = block_layout(Rect::new(0, 0, 2, 2));
        assert_eq!(layout.code.width, 0);
        assert!(layout.button.width <= 2);
    }
}
