//! Shared configuration helpers for CLI commands

use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::grid::{Layout, MEDIUM_LAYOUT, SMALL_LAYOUT};

/// Load a layout for a command.
///
/// `name_or_path` accepts the built-in names `small` and `medium`, or a
/// path to an ASCII layout file. `None` selects the built-in medium maze.
pub fn load_layout(name_or_path: Option<&str>) -> anyhow::Result<Arc<Layout>> {
    let layout = match name_or_path {
        None | Some("medium") => Layout::parse(MEDIUM_LAYOUT)?,
        Some("small") => Layout::parse(SMALL_LAYOUT)?,
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading layout file '{path}'"))?;
            Layout::parse(&text).with_context(|| format!("parsing layout file '{path}'"))?
        }
    };
    Ok(Arc::new(layout))
}
