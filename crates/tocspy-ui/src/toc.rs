//! Table of contents component.
//!
//! Renders the heading tree as a collapsible nested list and highlights the
//! heading the reader is currently looking at.

use leptos::prelude::*;
use tocspy_core::{Config, HeadingNode, HeadingTree};

use crate::tracking::{HeadingTracker, use_heading_tracker};

const PANEL_ID: &str = "tocspy-toc-panel";

/// Table of contents with active-section highlighting.
///
/// Renders nothing for an empty tree.
#[component]
pub fn TableOfContents(
    /// Heading tree of the article.
    #[prop(into)]
    tree: Signal<HeadingTree>,
    /// Panel labels and tracking settings.
    #[prop(optional)]
    config: Config,
) -> impl IntoView {
    let tracker = use_heading_tracker(tree, config.tracker);
    let title = config.toc.title;
    let aria_label = config.toc.aria_label;
    let expanded = tracker.expanded();

    view! {
      <Show when=move || tree.with(|t| !t.is_empty())>
        <nav class="tocspy-toc" aria-label=aria_label.clone()>
          <button
            type="button"
            class="tocspy-toc-toggle"
            aria-controls=PANEL_ID
            aria-expanded=move || expanded.get().to_string()
            on:click=move |_| tracker.toggle()
          >
            {title.clone()}
          </button>
          <div id=PANEL_ID class="tocspy-toc-panel" hidden=move || !expanded.get()>
            {move || {
              let nodes = tree.with(|t| t.nodes().to_vec());
              view! { <TocList nodes=nodes depth=0 tracker=tracker /> }
            }}
          </div>
        </nav>
      </Show>
    }
}

/// One level of the navigation list.
#[component]
fn TocList(nodes: Vec<HeadingNode>, depth: usize, tracker: HeadingTracker) -> impl IntoView {
    let class = format!("tocspy-toc-list tocspy-toc-depth-{depth}");

    view! {
      <ul class=class>
        {nodes
          .into_iter()
          .map(|node| view! { <TocItem node=node depth=depth tracker=tracker /> })
          .collect_view()}
      </ul>
    }
}

/// Navigation entry, recursing into its children.
#[component]
fn TocItem(node: HeadingNode, depth: usize, tracker: HeadingTracker) -> impl IntoView {
    let HeadingNode {
        title,
        anchor,
        children,
    } = node;
    let id = tocspy_core::anchor_id(&anchor).to_string();
    let is_active = Memo::new(move |_| tracker.is_active(&id));
    let href = anchor.clone();

    let nested = (!children.is_empty()).then(|| {
        view! { <TocList nodes=children depth={depth + 1} tracker=tracker /> }.into_any()
    });

    view! {
      <li class="tocspy-toc-item" class:active=move || is_active.get()>
        <a
          href=href
          class="tocspy-toc-link"
          aria-current=move || is_active.get().then_some("location")
          on:click=move |ev: web_sys::MouseEvent| {
            tracker.activate_link(&ev, &anchor);
          }
        >
          {title}
        </a>
        {nested}
      </li>
    }
}
