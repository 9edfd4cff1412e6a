//! Command handlers.

pub mod config;
pub mod print;
pub mod themes;
pub mod view;

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use codeblock_core::DisplayRequest;
use codeblock_core::config::Config;
use codeblock_core::highlight::SyntectHighlighter;

use super::SourceArgs;

/// Reads the source text and builds the request.
///
/// Language and filename fall back to the file's extension and name when a
/// file is given, then to the request defaults.
pub(crate) fn load_request(source: &SourceArgs) -> Result<DisplayRequest> {
    let path = source.file.as_deref().filter(|p| *p != Path::new("-"));

    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => read_stdin()?,
    };

    let language = source.language.clone().or_else(|| {
        path.and_then(Path::extension)
            .map(|ext| ext.to_string_lossy().into_owned())
    });
    let filename = source.filename.clone().or_else(|| {
        path.and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    });

    Ok(DisplayRequest::new(text, language, filename))
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No input: pass a FILE or pipe source code on stdin");
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Builds the syntect highlighter from config.
pub(crate) fn highlighter(config: &Config) -> Result<SyntectHighlighter> {
    SyntectHighlighter::with_themes(
        &config.theme.dark,
        &config.theme.light,
        config.resolved_syntaxes_dir().as_deref(),
    )
}
