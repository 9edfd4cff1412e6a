//! Non-interactive print command.

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use codeblock_core::config::Config;
use codeblock_tui::print::render_ansi;
use codeblock_tui::theme::RenderContext;

use crate::cli::{ColorChoice, SourceArgs, resolve_mode};

pub fn run(source: &SourceArgs, config: &Config, color: ColorChoice) -> Result<()> {
    let request = super::load_request(source)?;
    let highlighter = super::highlighter(config)?;
    let ctx = RenderContext::new(resolve_mode(source, config));

    let mut stdout = std::io::stdout();
    let color = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout.is_terminal(),
    };

    let out = render_ansi(&request, &highlighter, ctx, color);
    stdout
        .write_all(out.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
