//! The immutable input of a code block.

/// Language tag used when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "hcl";

/// Filename shown in the header when the caller does not supply one.
pub const DEFAULT_FILENAME: &str = "main.tf";

/// What to display: the source text, how to highlight it, and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    pub source_text: String,
    pub language_tag: String,
    pub filename: String,
}

impl DisplayRequest {
    /// Builds a request, falling back to the defaults for omitted values.
    pub fn new(
        source_text: impl Into<String>,
        language_tag: Option<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            language_tag: language_tag.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            filename: filename.unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        }
    }

    /// Builds a request with the default language and filename.
    pub fn from_source(source_text: impl Into<String>) -> Self {
        Self::new(source_text, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_values_fall_back_to_defaults() {
        let request = DisplayRequest::from_source("resource \"a\" \"b\" {}");

        assert_eq!(request.language_tag, "hcl");
        assert_eq!(request.filename, "main.tf");
    }

    #[test]
    fn test_supplied_values_are_kept_verbatim() {
        let request = DisplayRequest::new(
            "  x = 1\n",
            Some("toml".to_string()),
            Some(String::new()),
        );

        assert_eq!(request.source_text, "  x = 1\n");
        assert_eq!(request.language_tag, "toml");
        // An explicit empty filename is not replaced by the default.
        assert_eq!(request.filename, "");
    }
}
