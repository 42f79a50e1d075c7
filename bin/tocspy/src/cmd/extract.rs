//! Extract command - print the heading tree of an article

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tocspy_core::{Config, HeadingTree};

use super::load_tree;

/// Run the extract command.
///
/// Prints the nested tree as JSON, or one `id<TAB>anchor` line per heading
/// in tracking order when `flat` is set.
pub fn run(path: &Path, flat: bool, config: &Config) -> Result<()> {
    tracing::info!(?path, flat, "Extracting headings");

    let tree = load_tree(path, config)?;
    let output = format_tree(&tree, flat)?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Format a heading tree for printing.
pub fn format_tree(tree: &HeadingTree, flat: bool) -> Result<String> {
    if flat {
        return Ok(tree
            .flatten()
            .iter()
            .map(|h| format!("{}\t{}", h.id, h.anchor))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    serde_json::to_string_pretty(tree).wrap_err("Failed to serialize heading tree")
}

#[cfg(test)]
mod tests {
    use tocspy_core::HeadingNode;

    use super::*;

    fn tree() -> HeadingTree {
        HeadingTree::new(vec![
            HeadingNode::new("Install", "#install")
                .with_children(vec![HeadingNode::new("Linux", "#linux")]),
            HeadingNode::new("Usage", "#usage"),
        ])
    }

    #[test]
    fn test_format_flat() {
        let output = format_tree(&tree(), true).unwrap();
        assert_eq!(output, "install\t#install\nlinux\t#linux\nusage\t#usage");
    }

    #[test]
    fn test_format_json() {
        let output = format_tree(&tree(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["children"][0]["anchor"], "#linux");
        assert_eq!(value[1]["title"], "Usage");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_tree(&HeadingTree::default(), true).unwrap(), "");
        assert_eq!(format_tree(&HeadingTree::default(), false).unwrap(), "[]");
    }
}
