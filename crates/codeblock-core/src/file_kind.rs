//! File kind detection for the header icon.

/// Filename suffixes that get the logo icon.
pub const RECOGNIZED_EXTENSIONS: [&str; 3] = [".tf", ".tfvars", ".tofu"];

/// Which icon the header shows for a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Filename ends with one of [`RECOGNIZED_EXTENSIONS`].
    Recognized,
    /// Anything else, including the empty string.
    Generic,
}

impl FileKind {
    /// Classifies a filename by case-sensitive suffix match.
    ///
    /// No normalization is applied: `MAIN.TF` is generic.
    pub fn from_filename(filename: &str) -> Self {
        if RECOGNIZED_EXTENSIONS
            .iter()
            .any(|ext| filename.ends_with(ext))
        {
            FileKind::Recognized
        } else {
            FileKind::Generic
        }
    }

    pub fn is_recognized(self) -> bool {
        matches!(self, FileKind::Recognized)
    }
}
