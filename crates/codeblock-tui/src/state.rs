//! Viewer state.
//!
//! `AppState` is owned by the runtime and mutated only by the reducer.

use codeblock_core::highlight::{CodePalette, Highlighter, StyledLine};
use codeblock_core::{ColorMode, DisplayRequest, FileKind};
use ratatui::layout::Rect;

use crate::common::{text::Row, wrap_styled_line};
use crate::copy_state::CopyState;
use crate::layout::{BlockLayout, block_layout};
use crate::theme::RenderContext;

/// The code block: its request, highlighted lines and copy state.
#[derive(Debug)]
pub struct BlockState {
    pub request: DisplayRequest,
    pub lines: Vec<StyledLine>,
    pub palette: CodePalette,
    pub copy: CopyState,
}

impl BlockState {
    /// Highlights the request for `mode`.
    pub fn new(request: DisplayRequest, highlighter: &dyn Highlighter, mode: ColorMode) -> Self {
        let mut block = Self {
            request,
            lines: Vec::new(),
            palette: CodePalette::default(),
            copy: CopyState::new(),
        };
        block.rehighlight(highlighter, mode);
        block
    }

    /// Runs the highlighter again (e.g. after a color mode change).
    pub fn rehighlight(&mut self, highlighter: &dyn Highlighter, mode: ColorMode) {
        let highlighted =
            highlighter.highlight(&self.request.source_text, &self.request.language_tag, mode);
        self.palette = highlighted.palette;
        self.lines = highlighted.lines.collect();
        tracing::debug!(
            language = %self.request.language_tag,
            lines = self.lines.len(),
            %mode,
            "highlighted"
        );
    }

    pub fn file_kind(&self) -> FileKind {
        FileKind::from_filename(&self.request.filename)
    }

    /// Display rows after wrapping to `width` columns.
    pub fn rows(&self, width: u16) -> Vec<Row> {
        self.lines
            .iter()
            .flat_map(|line| wrap_styled_line(line, width as usize))
            .collect()
    }

    pub fn row_count(&self, width: u16) -> usize {
        self.lines
            .iter()
            .map(|line| wrap_styled_line(line, width as usize).len())
            .sum()
    }
}

/// Complete viewer state.
pub struct AppState {
    pub block: BlockState,
    pub ctx: RenderContext,
    pub highlighter: Box<dyn Highlighter>,
    /// Terminal area from the latest frame.
    pub area: Rect,
    /// First visible code row.
    pub scroll: usize,
    /// Pointer is over the copy button.
    pub button_hovered: bool,
    pub should_quit: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("block", &self.block)
            .field("ctx", &self.ctx)
            .field("area", &self.area)
            .field("scroll", &self.scroll)
            .field("button_hovered", &self.button_hovered)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(request: DisplayRequest, highlighter: Box<dyn Highlighter>, mode: ColorMode) -> Self {
        let block = BlockState::new(request, highlighter.as_ref(), mode);
        Self {
            block,
            ctx: RenderContext::new(mode),
            highlighter,
            area: Rect::default(),
            scroll: 0,
            button_hovered: false,
            should_quit: false,
        }
    }

    pub fn layout(&self) -> BlockLayout {
        block_layout(self.area)
    }

    /// Switches the ambient color mode and re-highlights.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        if self.ctx.mode == mode {
            return;
        }
        self.ctx = RenderContext::new(mode);
        self.block.rehighlight(self.highlighter.as_ref(), mode);
    }

    /// Largest useful scroll offset for the current area.
    pub fn max_scroll(&self) -> usize {
        let code = self.layout().code;
        self.block
            .row_count(code.width)
            .saturating_sub(code.height as usize)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll = target.min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
