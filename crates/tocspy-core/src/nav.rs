//! Navigation model and static rendering.
//!
//! [`build_nav`] turns the heading tree into entries that know their depth
//! and whether they are highlighted. [`render_html`] serializes the same
//! model for pages that ship without the interactive component.

use std::fmt::Write as _;

use crate::{
    config::NavSettings,
    heading::{HeadingNode, HeadingTree},
};

/// A heading as it appears in the navigation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry<'a> {
    /// Link label.
    pub title: &'a str,

    /// Link target.
    pub anchor: &'a str,

    /// Element id behind the anchor.
    pub id: &'a str,

    /// Nesting depth, roots are 0.
    pub depth: usize,

    /// Whether this entry is the active section.
    pub active: bool,

    /// Nested entries.
    pub children: Vec<NavEntry<'a>>,
}

impl NavEntry<'_> {
    /// Number of highlighted entries in this subtree.
    pub fn active_count(&self) -> usize {
        usize::from(self.active)
            + self
                .children
                .iter()
                .map(NavEntry::active_count)
                .sum::<usize>()
    }
}

/// Build navigation entries for `nodes`, highlighting `active_id`.
pub fn build_nav<'a>(nodes: &'a [HeadingNode], active_id: Option<&str>) -> Vec<NavEntry<'a>> {
    build_level(nodes, active_id, 0)
}

fn build_level<'a>(
    nodes: &'a [HeadingNode],
    active_id: Option<&str>,
    depth: usize,
) -> Vec<NavEntry<'a>> {
    nodes
        .iter()
        .map(|node| NavEntry {
            title: &node.title,
            anchor: &node.anchor,
            id: node.id(),
            depth,
            active: active_id == Some(node.id()),
            children: build_level(&node.children, active_id, depth + 1),
        })
        .collect()
}

/// Render a static, collapsible navigation list.
///
/// Returns `None` for an empty tree so callers emit no empty container.
pub fn render_html(
    tree: &HeadingTree,
    active_id: Option<&str>,
    settings: &NavSettings,
) -> Option<String> {
    if tree.is_empty() {
        return None;
    }

    let entries = build_nav(tree.nodes(), active_id);
    let mut html = String::new();
    let _ = write!(
        html,
        "<nav class=\"tocspy-toc\" aria-label=\"{}\">\n<details class=\"tocspy-toc-panel\">\n<summary class=\"tocspy-toc-toggle\">{}</summary>\n",
        html_escape(&settings.aria_label),
        html_escape(&settings.title)
    );
    render_list(&mut html, &entries, 0);
    html.push_str("</details>\n</nav>\n");
    Some(html)
}

fn render_list(html: &mut String, entries: &[NavEntry<'_>], depth: usize) {
    let _ = writeln!(
        html,
        "<ul class=\"tocspy-toc-list tocspy-toc-depth-{depth}\">"
    );
    for entry in entries {
        if entry.active {
            html.push_str("<li class=\"tocspy-toc-item active\">");
        } else {
            html.push_str("<li class=\"tocspy-toc-item\">");
        }
        let _ = write!(
            html,
            "<a href=\"{}\" class=\"tocspy-toc-link\"{}>{}</a>",
            html_escape(entry.anchor),
            if entry.active {
                " aria-current=\"location\""
            } else {
                ""
            },
            html_escape(entry.title)
        );
        if !entry.children.is_empty() {
            html.push('\n');
            render_list(html, &entry.children, depth + 1);
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
