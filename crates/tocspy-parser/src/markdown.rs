//! Markdown heading extraction using pulldown-cmark.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use tocspy_core::{HeadingNode, HeadingTree, MarkdownSettings};

use crate::slug::Slugger;

/// Rendered article body together with its outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// HTML body; every heading carries its anchor id.
    pub html: String,

    /// Nested outline of the headings within the configured levels.
    pub headings: HeadingTree,
}

/// Markdown parser producing heading-anchored HTML and a heading tree.
#[derive(Debug)]
pub struct MarkdownParser {
    options: Options,
    settings: MarkdownSettings,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        Self::with_settings(MarkdownSettings::default())
    }

    /// Create a parser listing a custom range of heading levels.
    pub fn with_settings(settings: MarkdownSettings) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

        Self { options, settings }
    }

    /// Parse markdown into HTML and its heading tree.
    pub fn parse(&self, content: &str) -> ParsedDocument {
        let mut slugger = Slugger::new();
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut outline: Vec<(u8, HeadingNode)> = Vec::new();
        let mut pending: Option<PendingHeading<'_>> = None;

        for event in Parser::new_ext(content, self.options) {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    pending = Some(PendingHeading {
                        level: level as u8,
                        explicit_id: id,
                        classes,
                        attrs,
                        title: String::new(),
                        inner: Vec::new(),
                    });
                }

                Event::End(TagEnd::Heading(level)) => {
                    let Some(heading) = pending.take() else {
                        events.push(Event::End(TagEnd::Heading(level)));
                        continue;
                    };

                    let title = heading.title.trim().to_string();
                    let anchor = match &heading.explicit_id {
                        Some(id) => slugger.claim(id),
                        None => slugger.slug(&title),
                    };

                    if self.settings.includes(heading.level) {
                        outline.push((heading.level, HeadingNode::new(title, format!("#{anchor}"))));
                    }

                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(CowStr::from(anchor)),
                        classes: heading.classes,
                        attrs: heading.attrs,
                    }));
                    events.extend(heading.inner);
                    events.push(Event::End(TagEnd::Heading(level)));
                }

                other => match pending.as_mut() {
                    Some(heading) => {
                        match &other {
                            Event::Text(text) | Event::Code(text) => heading.title.push_str(text),
                            Event::SoftBreak | Event::HardBreak => heading.title.push(' '),
                            _ => {}
                        }
                        heading.inner.push(other);
                    }
                    None => events.push(other),
                },
            }
        }

        let mut html_out = String::new();
        html::push_html(&mut html_out, events.into_iter());

        let headings = HeadingTree::new(nest(outline));
        tracing::debug!(headings = headings.len(), "extracted heading tree");

        ParsedDocument {
            html: html_out,
            headings,
        }
    }

    /// Extract only the heading tree.
    pub fn headings(&self, content: &str) -> HeadingTree {
        self.parse(content).headings
    }
}

/// Heading whose closing tag has not been seen yet.
struct PendingHeading<'a> {
    level: u8,
    explicit_id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    title: String,
    inner: Vec<Event<'a>>,
}

/// Nest headings under the nearest preceding heading of a lower level.
fn nest(outline: Vec<(u8, HeadingNode)>) -> Vec<HeadingNode> {
    let mut roots = Vec::new();
    let mut stack: Vec<(u8, HeadingNode)> = Vec::new();

    for (level, node) in outline {
        while stack.last().is_some_and(|(top, _)| *top >= level) {
            if let Some((_, done)) = stack.pop() {
                close(&mut stack, &mut roots, done);
            }
        }
        stack.push((level, node));
    }

    while let Some((_, done)) = stack.pop() {
        close(&mut stack, &mut roots, done);
    }

    roots
}

fn close(stack: &mut [(u8, HeadingNode)], roots: &mut Vec<HeadingNode>, node: HeadingNode) {
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push(node),
        None => roots.push(node),
    }
}
