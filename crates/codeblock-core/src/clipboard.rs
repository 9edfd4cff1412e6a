//! Clipboard access.
//!
//! Provides clipboard writes with multiple transport fallbacks:
//! 1. OSC 52 - Terminal clipboard escape sequence (works over SSH)
//! 2. System clipboard via `arboard` crate

use std::io::Write;

use base64::Engine;

/// Something that can receive copied text.
///
/// The code block only ever writes; reading the clipboard is out of scope.
pub trait ClipboardWriter: Send + Sync {
    /// Writes `text` verbatim.
    ///
    /// # Errors
    /// Returns an error if no transport accepted the text.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard interface with multiple transport fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct Clipboard {
    osc52: bool,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self { osc52: true }
    }
}

impl Clipboard {
    /// Creates a clipboard; `osc52 = false` goes straight to the system clipboard.
    pub fn new(osc52: bool) -> Self {
        Self { osc52 }
    }

    /// Copies text to the clipboard.
    ///
    /// Tries in order:
    /// 1. OSC 52 escape sequence (if enabled)
    /// 2. System clipboard via arboard
    ///
    /// # Errors
    /// Returns the system clipboard error if every transport failed.
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.osc52 {
            match Self::copy_osc52(text) {
                Ok(()) => return Ok(()),
                Err(err) => tracing::debug!(error = %err, "OSC 52 copy failed, trying system"),
            }
        }

        Self::copy_system(text)
    }

    /// Copies text using OSC 52 escape sequence.
    ///
    /// This writes directly to stdout, which the terminal intercepts
    /// and copies to the system clipboard.
    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;
        stdout
            .flush()
            .map_err(|e| ClipboardError::Osc52(e.to_string()))?;

        Ok(())
    }

    /// Copies text using the system clipboard.
    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))?;

        Ok(())
    }
}

impl ClipboardWriter for Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.copy(text)
    }
}

/// Builds the OSC 52 sequence for `text`.
///
/// Format: `ESC ] 52 ; c ; <base64-data> ESC \` where `c` selects the
/// system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Clipboard operation errors.
#[derive(Debug)]
pub enum ClipboardError {
    /// OSC 52 write failed.
    Osc52(String),
    /// System clipboard operation failed.
    System(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Osc52(msg) => write!(f, "OSC 52 clipboard failed: {msg}"),
            ClipboardError::System(msg) => write!(f, "System clipboard failed: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_text_verbatim() {
        let seq = osc52_sequence("a = \"b\"\n");

        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with("\x1b\\"));

        let payload = &seq["\x1b]52;c;".len()..seq.len() - 2];
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, b"a = \"b\"\n");
    }

    #[test]
    fn test_error_display() {
        let err = ClipboardError::System("no display".to_string());
        assert_eq!(err.to_string(), "System clipboard failed: no display");
    }
}
