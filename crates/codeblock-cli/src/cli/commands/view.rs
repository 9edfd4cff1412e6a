//! Interactive viewer command.

use std::sync::Arc;

use anyhow::Result;
use codeblock_core::clipboard::Clipboard;
use codeblock_core::config::Config;

use crate::cli::{SourceArgs, resolve_mode};

pub async fn run(source: &SourceArgs, config: &Config) -> Result<()> {
    let request = super::load_request(source)?;
    let highlighter = super::highlighter(config)?;
    let clipboard = Arc::new(Clipboard::new(config.clipboard.osc52));
    let mode = resolve_mode(source, config);

    codeblock_tui::run_viewer(request, Box::new(highlighter), clipboard, mode).await
}
