//! Heading tree model and flattening.
//!
//! A [`HeadingTree`] is what the content pipeline hands over: nested headings
//! with their anchors. The tracker never works on the tree directly, it works
//! on the flat [`FlatHeadingRef`] list produced by [`flatten`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A heading in the article outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Display text.
    pub title: String,

    /// URI fragment of the heading element, e.g. `#install`.
    pub anchor: String,

    /// Nested headings, in document order.
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    /// Create a leaf heading.
    pub fn new(title: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            children: Vec::new(),
        }
    }

    /// Add child headings.
    pub fn with_children(mut self, children: Vec<HeadingNode>) -> Self {
        self.children = children;
        self
    }

    /// Element id targeted by this heading's anchor.
    pub fn id(&self) -> &str {
        anchor_id(&self.anchor)
    }
}

/// Strip the leading fragment marker from an anchor.
pub fn anchor_id(anchor: &str) -> &str {
    anchor.strip_prefix('#').unwrap_or(anchor)
}

/// Flattened heading, used as an observation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatHeadingRef {
    /// Anchor without the `#`, used for element lookup.
    pub id: String,

    /// Original anchor, used for links.
    pub anchor: String,
}

impl From<&HeadingNode> for FlatHeadingRef {
    fn from(node: &HeadingNode) -> Self {
        Self {
            id: node.id().to_string(),
            anchor: node.anchor.clone(),
        }
    }
}

/// Root sequence of an article outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadingTree(Vec<HeadingNode>);

impl HeadingTree {
    /// Wrap root nodes into a tree.
    pub fn new(nodes: Vec<HeadingNode>) -> Self {
        Self(nodes)
    }

    /// Build a tree from arbitrary JSON.
    ///
    /// Anything that is not an array yields an empty tree. Array elements
    /// that are not headings are dropped.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            if !value.is_null() {
                tracing::warn!("heading tree is not a sequence, treating it as empty");
            }
            return Self::default();
        };

        let nodes = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match HeadingNode::deserialize(item) {
                Ok(node) => Some(node),
                Err(e) => {
                    tracing::warn!(index, error = %e, "dropping malformed heading node");
                    None
                }
            })
            .collect();

        Self(nodes)
    }

    /// Parse a tree from JSON text.
    ///
    /// Only text that is not JSON at all is an error; well-formed JSON of the
    /// wrong shape goes through [`HeadingTree::from_value`].
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Root nodes.
    pub fn nodes(&self) -> &[HeadingNode] {
        &self.0
    }

    /// Whether the tree has no headings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of headings, nested ones included.
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    /// Depth-first flat view of the tree.
    pub fn flatten(&self) -> Vec<FlatHeadingRef> {
        flatten(&self.0)
    }

    /// Ids that occur more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order = Vec::new();
        for heading in self.flatten() {
            let count = counts.entry(heading.id.clone()).or_default();
            *count += 1;
            if *count == 2 {
                order.push(heading.id);
            }
        }
        order
    }
}

impl From<Vec<HeadingNode>> for HeadingTree {
    fn from(nodes: Vec<HeadingNode>) -> Self {
        Self(nodes)
    }
}

impl From<Option<Vec<HeadingNode>>> for HeadingTree {
    fn from(nodes: Option<Vec<HeadingNode>>) -> Self {
        Self(nodes.unwrap_or_default())
    }
}

/// Flatten nested headings, parent before children, siblings in order.
pub fn flatten(nodes: &[HeadingNode]) -> Vec<FlatHeadingRef> {
    let mut flat = Vec::new();
    let mut stack: Vec<&HeadingNode> = nodes.iter().rev().collect();

    while let Some(node) = stack.pop() {
        flat.push(FlatHeadingRef::from(node));
        stack.extend(node.children.iter().rev());
    }

    flat
}

/// Memoized flattening keyed on tree value.
#[derive(Debug, Default)]
pub struct FlatCache {
    source: Option<HeadingTree>,
    flat: Vec<FlatHeadingRef>,
}

impl FlatCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache up to date with `tree`.
    ///
    /// Returns `true` when the flat list was recomputed.
    pub fn refresh(&mut self, tree: &HeadingTree) -> bool {
        if self.source.as_ref() == Some(tree) {
            return false;
        }
        self.flat = tree.flatten();
        self.source = Some(tree.clone());
        true
    }

    /// Last computed flat list.
    pub fn current(&self) -> &[FlatHeadingRef] {
        &self.flat
    }

    /// Forget the cached tree.
    pub fn clear(&mut self) {
        self.source = None;
        self.flat.clear();
    }
}
