//! Text utilities for TUI rendering.
//!
//! Shared text processing functions used across rendering paths.

use std::borrow::Cow;

use codeblock_core::highlight::{StyledLine, TokenStyle};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Replaces tabs with a fixed number of spaces.
///
/// `unicode_width` reports tabs as zero columns while terminals render them
/// to the next tab stop, which breaks wrapping math. A fixed expansion is
/// exact for leading indentation and close enough mid-line.
pub fn expand_tabs(s: &str) -> Cow<'_, str> {
    if s.contains('\t') {
        Cow::Owned(s.replace('\t', &" ".repeat(TAB_WIDTH)))
    } else {
        Cow::Borrowed(s)
    }
}

/// One display row: text runs with their token style.
pub type Row = Vec<(String, TokenStyle)>;

/// Breaks a highlighted line into rows of at most `width` columns.
///
/// Wrapping happens at any character (code has no natural break points we
/// want to honor). An empty line yields one empty row. A zero width disables
/// wrapping.
pub fn wrap_styled_line(line: &StyledLine, width: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut row_width = 0;

    for span in &line.spans {
        let text = expand_tabs(&span.text);
        let mut run = String::new();
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if width > 0 && row_width > 0 && row_width + ch_width > width {
                if !run.is_empty() {
                    row.push((std::mem::take(&mut run), span.style));
                }
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            run.push(ch);
            row_width += ch_width;
        }
        if !run.is_empty() {
            row.push((run, span.style));
        }
    }

    rows.push(row);
    rows
}

#[cfg(test)]
mod tests {
    use codeblock_core::highlight::StyledSpan;

    use super::*;

    fn row_text(row: &Row) -> String {
        row.iter().map(|(text, _)| text.as_str()).collect()
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("main.tf", 10), "main.tf");
        assert_eq!(truncate_with_ellipsis("variables.tf", 6), "varia…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("no tabs"), "no tabs");
        assert_eq!(expand_tabs("\tx"), "    x");
    }

    #[test]
    fn test_wrap_keeps_short_line_on_one_row() {
        let line = StyledLine {
            spans: vec![StyledSpan::plain("a = "), StyledSpan::plain("1")],
        };
        let rows = wrap_styled_line(&line, 20);

        assert_eq!(rows.len(), 1);
        assert_eq!(row_text(&rows[0]), "a = 1");
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_wrap_splits_across_spans() {
        let line = StyledLine {
            spans: vec![StyledSpan::plain("abcd"), StyledSpan::plain("efgh")],
        };
        let rows = wrap_styled_line(&line, 3);

        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_empty_line_is_one_row() {
        let rows = wrap_styled_line(&StyledLine::default(), 10);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_empty());
    }

    #[test]
    fn test_wrap_zero_width_disables_wrapping() {
        let line = StyledLine {
            spans: vec![StyledSpan::plain("a long line of code")],
        };
        assert_eq!(wrap_styled_line(&line, 0).len(), 1);
    }
}
