//! Syntax highlighting.
//!
//! The code block never tokenizes anything itself. It asks a [`Highlighter`]
//! for a lazy sequence of display lines and renders whatever comes back.
//! [`SyntectHighlighter`] is the production implementation; [`PlainHighlighter`]
//! emits unstyled lines.

use std::path::Path;

use anyhow::{Context, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{self, FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::color_mode::ColorMode;

const HCL_SYNTAX: &str = include_str!("../syntaxes/HCL.sublime-syntax");

/// Theme used for dark mode unless configured otherwise.
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

/// Theme used for light mode unless configured otherwise.
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<highlighting::Color> for Rgb {
    fn from(color: highlighting::Color) -> Self {
        Rgb(color.r, color.g, color.b)
    }
}

/// Style of a single token (UI-agnostic).
///
/// Converted to terminal styles at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    pub fg: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl From<highlighting::Style> for TokenStyle {
    fn from(style: highlighting::Style) -> Self {
        Self {
            fg: Some(style.foreground.into()),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }
}

/// A styled span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: TokenStyle,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TokenStyle::default(),
        }
    }
}

/// A display line of styled spans. Never contains a line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Background and default foreground of the code region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodePalette {
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
}

/// Result of highlighting: palette plus a one-shot line sequence.
pub struct Highlighted<'a> {
    pub palette: CodePalette,
    pub lines: Box<dyn Iterator<Item = StyledLine> + 'a>,
}

impl std::fmt::Debug for Highlighted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighted")
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

/// Turns source text into styled display lines.
///
/// Unknown languages are the implementation's concern; the caller only sees
/// lines.
pub trait Highlighter {
    fn highlight<'a>(&'a self, code: &'a str, language: &str, mode: ColorMode) -> Highlighted<'a>;
}

/// Emits each source line as a single unstyled span.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight<'a>(
        &'a self,
        code: &'a str,
        _language: &str,
        _mode: ColorMode,
    ) -> Highlighted<'a> {
        Highlighted {
            palette: CodePalette::default(),
            lines: Box::new(code.lines().map(|line| StyledLine {
                spans: vec![StyledSpan::plain(line)],
            })),
        }
    }
}

/// Maps common aliases onto the tag syntaxes are registered under.
pub fn canonical_language(language: &str) -> &str {
    match language {
        "terraform" | "tofu" | "opentofu" | "tf" | "tfvars" => "hcl",
        "shell" | "console" => "bash",
        "yml" => "yaml",
        other => other,
    }
}

/// Highlighter backed by syntect's bundled syntaxes and themes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    dark: Theme,
    light: Theme,
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .field("dark", &self.dark.name)
            .field("light", &self.light.name)
            .finish()
    }
}

impl SyntectHighlighter {
    /// Creates a highlighter with the default themes and bundled syntaxes.
    ///
    /// # Errors
    /// Returns an error if the bundled syntaxes or themes are missing.
    pub fn new() -> Result<Self> {
        Self::with_themes(DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME, None)
    }

    /// Creates a highlighter with named themes and an optional folder of
    /// extra `.sublime-syntax` definitions.
    ///
    /// Unknown theme names fall back to the defaults with a warning.
    ///
    /// # Errors
    /// Returns an error if the bundled HCL syntax or the extra syntax folder
    /// cannot be loaded.
    pub fn with_themes(dark: &str, light: &str, syntaxes_dir: Option<&Path>) -> Result<Self> {
        let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
        builder.add(hcl_syntax()?);
        if let Some(dir) = syntaxes_dir {
            builder
                .add_from_folder(dir, true)
                .with_context(|| format!("Failed to load syntaxes from {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "loaded extra syntaxes");
        }
        let syntaxes = builder.build();

        let mut themes = ThemeSet::load_defaults();
        let dark = take_theme(&mut themes, dark, DEFAULT_DARK_THEME)?;
        let light = take_theme(&mut themes, light, DEFAULT_LIGHT_THEME)?;

        Ok(Self {
            syntaxes,
            dark,
            light,
        })
    }

    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        let mut names: Vec<String> = ThemeSet::load_defaults().themes.into_keys().collect();
        names.sort();
        names
    }

    fn theme_for(&self, mode: ColorMode) -> &Theme {
        match mode {
            ColorMode::Dark => &self.dark,
            ColorMode::Light => &self.light,
        }
    }

    fn find_syntax(&self, language: &str) -> &SyntaxReference {
        let token = canonical_language(language);
        self.syntaxes
            .find_syntax_by_token(token)
            .or_else(|| self.syntaxes.find_syntax_by_extension(token))
            .unwrap_or_else(|| {
                tracing::debug!(language, "no syntax found, using plain text");
                self.syntaxes.find_syntax_plain_text()
            })
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight<'a>(&'a self, code: &'a str, language: &str, mode: ColorMode) -> Highlighted<'a> {
        let syntax = self.find_syntax(language);
        let theme = self.theme_for(mode);
        let palette = CodePalette {
            background: theme.settings.background.map(Rgb::from),
            foreground: theme.settings.foreground.map(Rgb::from),
        };

        let syntaxes = &self.syntaxes;
        let mut highlighter = HighlightLines::new(syntax, theme);
        let lines = LinesWithEndings::from(code).map(move |line| {
            match highlighter.highlight_line(line, syntaxes) {
                Ok(ranges) => StyledLine {
                    spans: ranges
                        .into_iter()
                        .filter_map(|(style, text)| {
                            let text = strip_line_ending(text);
                            (!text.is_empty()).then(|| StyledSpan {
                                text: text.to_string(),
                                style: style.into(),
                            })
                        })
                        .collect(),
                },
                Err(err) => {
                    tracing::debug!(error = %err, "highlighting failed for line");
                    StyledLine {
                        spans: vec![StyledSpan::plain(strip_line_ending(line))],
                    }
                }
            }
        });

        Highlighted {
            palette,
            lines: Box::new(lines),
        }
    }
}

/// HCL is not among syntect's bundled syntaxes.
fn hcl_syntax() -> Result<SyntaxDefinition> {
    SyntaxDefinition::load_from_str(HCL_SYNTAX, true, None).context("Failed to parse HCL syntax")
}

fn take_theme(themes: &mut ThemeSet, name: &str, fallback: &str) -> Result<Theme> {
    if let Some(theme) = themes.themes.get(name) {
        return Ok(theme.clone());
    }
    tracing::warn!(theme = name, fallback, "unknown theme, using fallback");
    themes
        .themes
        .get(fallback)
        .cloned()
        .with_context(|| format!("Bundled theme '{fallback}' is missing"))
}

fn strip_line_ending(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}
