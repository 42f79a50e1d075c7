//! Command implementations.

pub mod check;
pub mod extract;
pub mod render;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tocspy_core::{Config, HeadingTree};
use tocspy_parser::MarkdownParser;

/// Load a heading tree from a Markdown article or a JSON tree file.
pub fn load_tree(path: &Path, config: &Config) -> Result<HeadingTree> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        tracing::debug!(?path, "Reading heading tree from JSON");
        return HeadingTree::from_json(&content)
            .wrap_err_with(|| format!("Invalid heading tree in {}", path.display()));
    }

    let parser = MarkdownParser::with_settings(config.markdown.clone());
    Ok(parser.headings(&content))
}
