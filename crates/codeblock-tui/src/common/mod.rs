pub mod text;

pub use text::{expand_tabs, truncate_with_ellipsis, wrap_styled_line};
