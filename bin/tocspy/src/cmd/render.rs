//! Render command - print static navigation HTML

use std::path::Path;

use color_eyre::eyre::Result;
use tocspy_core::{Config, render_html};

use super::load_tree;

/// Run the render command.
///
/// Prints nothing when the article has no headings.
pub fn run(path: &Path, active: Option<&str>, config: &Config) -> Result<()> {
    tracing::info!(?path, ?active, "Rendering table of contents");

    match render(path, active, config)? {
        Some(html) => print!("{html}"),
        None => tracing::info!("No headings, nothing rendered"),
    }

    Ok(())
}

/// Navigation HTML for the article at `path`, `None` when it has no headings.
pub fn render(path: &Path, active: Option<&str>, config: &Config) -> Result<Option<String>> {
    let tree = load_tree(path, config)?;
    if let Some(id) = active {
        if !tree.flatten().iter().any(|h| h.id == id) {
            tracing::warn!(id, "active id does not match any heading");
        }
    }

    Ok(render_html(&tree, active, &config.toc))
}
