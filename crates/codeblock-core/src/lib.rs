//! Core codeblock library (request model, highlighting, clipboard, config).

pub mod clipboard;
pub mod color_mode;
pub mod config;
pub mod file_kind;
pub mod highlight;
pub mod logging;
pub mod request;

pub use color_mode::ColorMode;
pub use file_kind::FileKind;
pub use request::DisplayRequest;
